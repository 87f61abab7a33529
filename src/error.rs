//! Error types for the rsa-docsign library.

use thiserror::Error;

/// The main error type for rsa-docsign operations.
///
/// Verification outcomes are not errors; see
/// [`VerificationReason`](crate::verifier::VerificationReason).
#[derive(Error, Debug)]
pub enum SignError {
    /// Error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error with JSON serialization/deserialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with base64 encoding/decoding.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Error with hex encoding/decoding.
    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The RSA provider could not produce a key pair.
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// PEM envelope, base64 body, or key structure is malformed.
    #[error("Invalid key: {0}")]
    KeyParse(String),

    /// The RSA provider rejected the signing operation.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// A signature did not verify under the given public key.
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// Invalid digest or signature format.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type alias for rsa-docsign operations.
pub type Result<T> = std::result::Result<T, SignError>;
