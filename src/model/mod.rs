mod api_level;
mod digest;
mod encoded_identifier;
mod identity_config;
mod key_system_id;
mod property;
mod raw_identifier;
mod release_protocol;

pub use api_level::ApiLevel;
pub use digest::Digest;
pub use encoded_identifier::{EncodedIdentifier, EncodingError};
pub use identity_config::IdentityConfig;
pub use key_system_id::{KeySystemId, KeySystemIdError};
pub use property::PropertyName;
pub use raw_identifier::{RawIdentifier, RawIdentifierError};
pub use release_protocol::ReleaseProtocol;
