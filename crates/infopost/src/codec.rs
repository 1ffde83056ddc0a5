//! Request parameter encoding.
//!
//! The router expects its `class`, `type` and `param` values in an encoded
//! text form. The live site uses standard base64; the encoding sits behind
//! [`RequestCodec`] so a change upstream only needs a new codec.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::InfopostError;

/// A reversible text encoding for router parameters.
pub trait RequestCodec: Send + Sync {
    /// Encode a plain parameter value.
    fn encode(&self, plain: &str) -> String;

    /// Decode a value produced by [`encode`](Self::encode).
    fn decode(&self, encoded: &str) -> Result<String, InfopostError>;
}

/// Standard (padded) base64, byte-compatible with the browser client.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl RequestCodec for Base64Codec {
    fn encode(&self, plain: &str) -> String {
        STANDARD.encode(plain.as_bytes())
    }

    fn decode(&self, encoded: &str) -> Result<String, InfopostError> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| InfopostError::InvalidRequest(format!("base64: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| InfopostError::InvalidRequest(e.to_string()))
    }
}
