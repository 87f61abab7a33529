//! Signature verification functionality.
//!
//! Verification is ordered and short-circuiting: the public key is parsed
//! first, then the document digest is compared against the claimed digest,
//! and only a matching digest has its signature checked. Each failing step
//! has its own [`VerificationReason`].

use crate::error::Result;
use crate::hash::{digest_bytes, digest_file, DocumentDigest};
use crate::keys::PublicKey;
use crate::signature::{Signature, SignedDocument};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Why a verification succeeded or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationReason {
    /// Digest and signature both check out.
    Ok,

    /// The document does not hash to the claimed digest; it was modified.
    HashMismatch,

    /// The digest matches but the signature does not verify under the key.
    SignatureInvalid,

    /// The public key, claimed digest, or claimed signature could not be
    /// decoded.
    MalformedInput,
}

impl VerificationReason {
    /// The wire name of the reason, e.g. `"HASH_MISMATCH"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationReason::Ok => "OK",
            VerificationReason::HashMismatch => "HASH_MISMATCH",
            VerificationReason::SignatureInvalid => "SIGNATURE_INVALID",
            VerificationReason::MalformedInput => "MALFORMED_INPUT",
        }
    }
}

impl fmt::Display for VerificationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single verification call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// True only when the reason is [`VerificationReason::Ok`].
    pub valid: bool,

    /// The first check that failed, or `Ok`.
    pub reason: VerificationReason,
}

impl VerificationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            reason: VerificationReason::Ok,
        }
    }

    fn rejected(reason: VerificationReason) -> Self {
        Self {
            valid: false,
            reason,
        }
    }

    /// `"valid"` or `"invalid"`, as reported by the remote service.
    pub fn status(&self) -> &'static str {
        if self.valid {
            "valid"
        } else {
            "invalid"
        }
    }
}

/// Verifier bound to one public key.
#[derive(Debug)]
pub struct Verifier<'a> {
    key: &'a PublicKey,
}

impl<'a> Verifier<'a> {
    /// Create a verifier for the given public key.
    pub fn new(key: &'a PublicKey) -> Self {
        Self { key }
    }

    /// Verify a byte slice against a claimed hex digest and base64 signature.
    pub fn verify_bytes(
        &self,
        data: &[u8],
        claimed_digest: &str,
        claimed_signature: &str,
    ) -> VerificationResult {
        self.verify_with_digest(digest_bytes(data), claimed_digest, claimed_signature)
    }

    /// Verify a byte slice against the output of a sign operation.
    pub fn verify_signed(&self, data: &[u8], signed: &SignedDocument) -> VerificationResult {
        self.verify_bytes(data, &signed.hash, &signed.signature)
    }

    /// Verify against an already computed document digest.
    pub fn verify_with_digest(
        &self,
        actual: DocumentDigest,
        claimed_digest: &str,
        claimed_signature: &str,
    ) -> VerificationResult {
        let claimed = match DocumentDigest::from_hex(claimed_digest) {
            Ok(digest) => digest,
            Err(e) => {
                debug!("Claimed digest is malformed: {}", e);
                return VerificationResult::rejected(VerificationReason::MalformedInput);
            }
        };

        if !actual.ct_eq(&claimed) {
            debug!("Digest mismatch: document hashes to {}", actual);
            return VerificationResult::rejected(VerificationReason::HashMismatch);
        }

        let signature = match Signature::from_base64(claimed_signature) {
            Ok(signature) => signature,
            Err(e) => {
                debug!("Claimed signature is malformed: {}", e);
                return VerificationResult::rejected(VerificationReason::MalformedInput);
            }
        };

        match self.key.verify_digest(&actual, &signature) {
            Ok(()) => {
                debug!("Signature valid for digest {}", actual);
                VerificationResult::ok()
            }
            Err(e) => {
                debug!("Signature rejected for digest {}: {}", actual, e);
                VerificationResult::rejected(VerificationReason::SignatureInvalid)
            }
        }
    }

    /// Quick check if a byte slice verifies.
    pub fn is_valid_bytes(
        &self,
        data: &[u8],
        claimed_digest: &str,
        claimed_signature: &str,
    ) -> bool {
        self.verify_bytes(data, claimed_digest, claimed_signature).valid
    }
}

/// Verify a document against a PEM-encoded SPKI public key, a claimed hex
/// digest and a claimed base64 signature.
///
/// Never fails: every problem with the inputs is reported as a
/// [`VerificationReason`].
pub fn verify_document(
    public_key_pem: &str,
    document: &[u8],
    claimed_digest: &str,
    claimed_signature: &str,
) -> VerificationResult {
    let key = match PublicKey::from_pem(public_key_pem) {
        Ok(key) => key,
        Err(e) => {
            debug!("Public key rejected: {}", e);
            return VerificationResult::rejected(VerificationReason::MalformedInput);
        }
    };
    Verifier::new(&key).verify_bytes(document, claimed_digest, claimed_signature)
}

/// Verify a file on disk. Only failing to read the document is an error.
pub fn verify_file<P: AsRef<Path>>(
    public_key_pem: &str,
    path: P,
    claimed_digest: &str,
    claimed_signature: &str,
) -> Result<VerificationResult> {
    let key = match PublicKey::from_pem(public_key_pem) {
        Ok(key) => key,
        Err(e) => {
            debug!("Public key rejected: {}", e);
            return Ok(VerificationResult::rejected(VerificationReason::MalformedInput));
        }
    };
    let actual = digest_file(path)?;
    Ok(Verifier::new(&key).verify_with_digest(actual, claimed_digest, claimed_signature))
}
