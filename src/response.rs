//! JSON payloads of the remote signing service (`/create-keys`, `/sign`,
//! `/verify`). Only the shapes live here; there is no HTTP layer.

use crate::keys::KeyPair;
use crate::signature::SignedDocument;
use crate::verifier::{VerificationReason, VerificationResult};
use serde::{Deserialize, Serialize};

/// Response of `POST /create-keys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateKeysResponse {
    /// SPKI public key envelope.
    pub public_key: String,

    /// PKCS#8 private key envelope.
    pub private_key: String,
}

impl From<&KeyPair> for CreateKeysResponse {
    fn from(keypair: &KeyPair) -> Self {
        Self {
            public_key: keypair.public_key_pem().to_string(),
            private_key: keypair.private_key_pem().to_string(),
        }
    }
}

/// Response of `POST /sign`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignResponse {
    /// Base64 signature over the digest bytes.
    pub signature: String,

    /// Lowercase hex SHA-256 digest of the document.
    pub hash: String,
}

impl From<&SignedDocument> for SignResponse {
    fn from(signed: &SignedDocument) -> Self {
        Self {
            signature: signed.signature.clone(),
            hash: signed.hash.clone(),
        }
    }
}

/// Response of `POST /verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// `"valid"` or `"invalid"`.
    pub status: String,

    /// Wire name of the verification reason, e.g. `"HASH_MISMATCH"`.
    pub reason: VerificationReason,
}

impl From<VerificationResult> for VerifyResponse {
    fn from(result: VerificationResult) -> Self {
        Self {
            status: result.status().to_string(),
            reason: result.reason,
        }
    }
}
