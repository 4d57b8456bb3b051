//! Session token claims decoding
//!
//! The backend issues a compact three-segment token (`header.payload.signature`).
//! Only the payload's numeric `exp` claim matters to the client: it is the
//! instant, in whole seconds since the Unix epoch, after which the session is
//! dead. The signature is never verified here; the client merely schedules
//! local expiry around a token the backend already signed.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Claims decoded from a token's payload segment
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Claims {
    /// Expiry instant, whole seconds since the Unix epoch
    pub exp: i64,
}

/// Why a token could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token is not a three-segment compact token")]
    Malformed,

    #[error("token payload is not valid base64url: {0}")]
    Encoding(String),

    #[error("token payload is not a valid claims object: {0}")]
    Payload(String),

    #[error("exp claim is out of timestamp range")]
    BadTimestamp,
}

/// Decode base64url (URL-safe base64 without padding)
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    // Base64url uses - instead of + and _ instead of /
    let standard_b64 = input.replace('-', "+").replace('_', "/");

    // Add padding if needed
    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err("Invalid base64url length".to_string()),
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD
        .decode(&padded)
        .map_err(|e| e.to_string())
}

/// Decode the payload segment of a token into [`Claims`]
pub fn decode(token: &str) -> std::result::Result<Claims, DecodeError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(DecodeError::Malformed);
    }

    let payload_bytes = base64_decode_url(parts[1]).map_err(DecodeError::Encoding)?;

    serde_json::from_slice(&payload_bytes).map_err(|e| DecodeError::Payload(e.to_string()))
}

impl Claims {
    /// The expiry instant as a UTC timestamp
    pub fn expires_at(&self) -> std::result::Result<DateTime<Utc>, DecodeError> {
        DateTime::from_timestamp(self.exp, 0).ok_or(DecodeError::BadTimestamp)
    }
}
