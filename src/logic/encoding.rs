//! Base64 text form of a digest
//!
//! Two encoders exist because older Android releases lack
//! `java.util.Base64`. The legacy path streams the digest through a
//! writer, as `android.util.Base64OutputStream` does with `NO_WRAP`;
//! output is identical.

use std::io::Write;

use base64::engine::general_purpose;
use base64::write::EncoderStringWriter;
use base64::Engine as _;
use tracing::debug;

use crate::model::{ApiLevel, Digest, EncodedIdentifier, EncodingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base64Codepath {
    Standard,
    Legacy,
}

impl Base64Codepath {
    pub fn for_api_level(level: ApiLevel) -> Self {
        if level.has_standard_base64() {
            Self::Standard
        } else {
            Self::Legacy
        }
    }

    pub fn encode(self, digest: &Digest) -> Result<EncodedIdentifier, EncodingError> {
        let text = match self {
            Base64Codepath::Standard => general_purpose::STANDARD.encode(digest.as_bytes()),
            Base64Codepath::Legacy => encode_streaming(digest.as_bytes(), Digest::LENGTH)?,
        };
        debug!("Encoded digest with {:?} base64 codepath", self);
        Ok(EncodedIdentifier::from_encoded(text))
    }
}

/// Write `bytes` into a streaming encoder, `chunk` bytes per write
fn encode_streaming(bytes: &[u8], chunk: usize) -> Result<String, EncodingError> {
    let mut writer = EncoderStringWriter::new(&general_purpose::STANDARD);
    for part in bytes.chunks(chunk.max(1)) {
        writer
            .write_all(part)
            .map_err(|e| EncodingError::Stream {
                reason: e.to_string(),
            })?;
    }
    Ok(writer.into_inner())
}

/// Encode with the codepath matching `level`
pub fn encode(digest: &Digest, level: ApiLevel) -> Result<EncodedIdentifier, EncodingError> {
    Base64Codepath::for_api_level(level).encode(digest)
}

/// Decode base64 text back into a digest
pub fn decode(text: &str) -> Result<Digest, EncodingError> {
    let bytes = general_purpose::STANDARD
        .decode(text)
        .map_err(|e| EncodingError::InvalidBase64 {
            reason: e.to_string(),
        })?;

    let array: [u8; Digest::LENGTH] = bytes.as_slice().try_into().map_err(|_| {
        EncodingError::InvalidLength {
            expected: Digest::LENGTH,
            actual: bytes.len(),
        }
    })?;

    Ok(Digest::new(array))
}
