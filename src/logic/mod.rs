mod encoding;
mod hash;

pub use encoding::{decode, encode, Base64Codepath};
pub use hash::{hash_identifier, sha256};
