//! Document signing functionality.

use crate::error::Result;
use crate::hash::{digest_bytes, digest_file, DocumentDigest};
use crate::keys::PrivateKey;
use crate::signature::SignedDocument;
use log::debug;
use std::path::Path;

/// Signs documents with a borrowed private key. Holds no other state.
#[derive(Debug)]
pub struct Signer<'a> {
    key: &'a PrivateKey,
}

impl<'a> Signer<'a> {
    /// Create a new signer with the given private key.
    pub fn new(key: &'a PrivateKey) -> Self {
        Self { key }
    }

    /// Sign a byte slice.
    pub fn sign_bytes(&self, data: &[u8]) -> Result<SignedDocument> {
        self.sign_digest(digest_bytes(data))
    }

    /// Sign a file.
    pub fn sign_file<P: AsRef<Path>>(&self, path: P) -> Result<SignedDocument> {
        self.sign_digest(digest_file(path)?)
    }

    fn sign_digest(&self, digest: DocumentDigest) -> Result<SignedDocument> {
        let signature = self.key.sign_digest(&digest)?;
        debug!("Signed document with digest {}", digest);
        Ok(SignedDocument::new(&digest, &signature))
    }
}

/// Sign a document with a PEM-encoded PKCS#8 private key.
pub fn sign_document(private_key_pem: &str, document: &[u8]) -> Result<SignedDocument> {
    let key = PrivateKey::from_pem(private_key_pem)?;
    Signer::new(&key).sign_bytes(document)
}

/// Sign a file with a PEM-encoded PKCS#8 private key.
pub fn sign_file<P: AsRef<Path>>(private_key_pem: &str, path: P) -> Result<SignedDocument> {
    let key = PrivateKey::from_pem(private_key_pem)?;
    Signer::new(&key).sign_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignError;
    use crate::test_support::alice;

    #[test]
    fn test_sign_bytes() {
        let key = alice().private_key().unwrap();
        let doc = Signer::new(&key).sign_bytes(b"hello world").unwrap();

        assert_eq!(
            doc.hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(doc.signature().unwrap().as_bytes().len(), 256);
    }

    #[test]
    fn test_digest_is_stable_across_calls() {
        let pem = alice().private_key_pem();
        let first = sign_document(pem, b"Test document content").unwrap();
        let second = sign_document(pem, b"Test document content").unwrap();

        assert_eq!(first.hash, second.hash);
        // PKCS#1 v1.5 is deterministic.
        assert_eq!(first.signature, second.signature);
    }

    #[test]
    fn test_sign_empty_document() {
        let doc = sign_document(alice().private_key_pem(), b"").unwrap();
        assert_eq!(
            doc.hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert!(!doc.signature.is_empty());
    }

    #[test]
    fn test_sign_file_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("document.txt");
        std::fs::write(&path, b"file contents").unwrap();

        let pem = alice().private_key_pem();
        let from_file = sign_file(pem, &path).unwrap();
        let from_bytes = sign_document(pem, b"file contents").unwrap();
        assert_eq!(from_file.hash, from_bytes.hash);
        assert_eq!(from_file.signature, from_bytes.signature);
    }

    #[test]
    fn test_malformed_key_is_reported() {
        assert!(matches!(
            sign_document("garbage", b"data"),
            Err(SignError::KeyParse(_))
        ));
        // A public key is not accepted as a signing key.
        assert!(matches!(
            sign_document(alice().public_key_pem(), b"data"),
            Err(SignError::KeyParse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = sign_file(alice().private_key_pem(), dir.path().join("missing"));
        assert!(matches!(result, Err(SignError::Io(_))));
    }
}
