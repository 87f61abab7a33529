//! # rsa-docsign
//!
//! A document signing library using SHA-256 digests and RSA signatures.
//!
//! ## Features
//!
//! - **RSA-2048 key pairs** exported as PEM envelopes (SPKI / PKCS#8)
//! - **SHA-256 digests** over the raw document bytes, rendered as lowercase hex
//! - **PKCS#1 v1.5 signatures** over the digest, rendered as base64
//! - **Distinct verification outcomes** for modified data, bad signatures and
//!   malformed input
//!
//! ## Quick Start
//!
//! ### Generate a Key Pair
//!
//! ```rust
//! use rsa_docsign::generate_key_pair;
//!
//! let keypair = generate_key_pair().unwrap();
//! assert!(keypair.public_key_pem().starts_with("-----BEGIN PUBLIC KEY-----"));
//! // keypair.save_to_dir(&rsa_docsign::OutputConfig::new("keys")).unwrap();
//! ```
//!
//! ### Sign and Verify a Document
//!
//! ```rust
//! use rsa_docsign::{generate_key_pair, sign_document, verify_document, VerificationReason};
//!
//! let keypair = generate_key_pair().unwrap();
//! let document = b"Important document content";
//!
//! let signed = sign_document(keypair.private_key_pem(), document).unwrap();
//! println!("hash: {}", signed.hash);
//!
//! let result = verify_document(
//!     keypair.public_key_pem(),
//!     document,
//!     &signed.hash,
//!     &signed.signature,
//! );
//! assert!(result.valid);
//!
//! let tampered = verify_document(
//!     keypair.public_key_pem(),
//!     b"Important document content!",
//!     &signed.hash,
//!     &signed.signature,
//! );
//! assert_eq!(tampered.reason, VerificationReason::HashMismatch);
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod keys;
pub mod pem;
pub mod response;
pub mod signature;
pub mod signer;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types for convenience
pub use config::{ArtifactNames, OutputConfig};
pub use error::{Result, SignError};
pub use hash::{digest_bytes, digest_file, DocumentDigest};
pub use keys::{generate_key_pair, KeyPair, PrivateKey, PublicKey, KEY_BITS, PUBLIC_EXPONENT};
pub use response::{CreateKeysResponse, SignResponse, VerifyResponse};
pub use signature::{Signature, SignedDocument, SIGNATURE_SCHEME};
pub use signer::{sign_document, sign_file, Signer};
pub use verifier::{verify_document, verify_file, VerificationReason, VerificationResult, Verifier};
