//! Signature values and the signed-document bundle.

use crate::config::OutputConfig;
use crate::error::{Result, SignError};
use crate::hash::DocumentDigest;
use base64::Engine;
use chrono::{DateTime, Utc};
use rsa::Pkcs1v15Sign;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fs;
use std::path::{Path, PathBuf};

/// The fixed signature scheme. The SHA-256 document digest is signed as a
/// pre-computed hash, so signing cost does not depend on document size.
pub const SIGNATURE_SCHEME: &str = "RSASSA-PKCS1-v1_5/SHA-256";

pub(crate) fn signature_scheme() -> Pkcs1v15Sign {
    Pkcs1v15Sign::new::<Sha256>()
}

/// Raw RSA signature bytes. Transported as standard base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Wrap raw signature bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encode the signature as base64.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.0)
    }

    /// Decode a signature from base64, ignoring surrounding whitespace.
    pub fn from_base64(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SignError::InvalidFormat("Empty signature".to_string()));
        }
        let bytes = base64::engine::general_purpose::STANDARD.decode(s)?;
        Ok(Self(bytes))
    }

    /// Write the base64 signature to a text file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_base64())?;
        Ok(())
    }

    /// Read a base64 signature from a text file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        let content = std::str::from_utf8(&bytes).map_err(|_| {
            SignError::InvalidFormat("Signature file is not UTF-8 text".to_string())
        })?;
        Self::from_base64(content)
    }
}

/// The output of a sign operation: the document digest and the signature
/// over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedDocument {
    /// Lowercase hex SHA-256 digest of the document.
    pub hash: String,

    /// Base64 signature over the digest bytes.
    pub signature: String,

    /// When the signature was created.
    pub signed_at: DateTime<Utc>,
}

impl SignedDocument {
    /// Bundle a digest and its signature.
    pub fn new(digest: &DocumentDigest, signature: &Signature) -> Self {
        Self {
            hash: digest.to_hex(),
            signature: signature.to_base64(),
            signed_at: Utc::now(),
        }
    }

    /// Get the document digest.
    pub fn digest(&self) -> Result<DocumentDigest> {
        DocumentDigest::from_hex(&self.hash)
    }

    /// Get the signature.
    pub fn signature(&self) -> Result<Signature> {
        Signature::from_base64(&self.signature)
    }

    /// Parse a signed document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(json)?;
        Ok(doc)
    }

    /// Serialize the signed document to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }

    /// Write the digest and signature files into the configured directory.
    ///
    /// Returns the hash and signature paths, in that order.
    pub fn save_artifacts(&self, config: &OutputConfig) -> Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(config.dir())?;
        let hash_path = config.hash_path();
        let signature_path = config.signature_path();
        fs::write(&hash_path, &self.hash)?;
        fs::write(&signature_path, &self.signature)?;
        Ok((hash_path, signature_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::digest_bytes;

    #[test]
    fn test_signature_base64_tolerates_whitespace() {
        let signature = Signature::from_bytes(vec![0xde, 0xad, 0xbe, 0xef]);
        let encoded = format!("{}\r\n", signature.to_base64());
        assert_eq!(Signature::from_base64(&encoded).unwrap(), signature);
    }

    #[test]
    fn test_signature_rejects_garbage() {
        assert!(matches!(
            Signature::from_base64("   "),
            Err(SignError::InvalidFormat(_))
        ));
        assert!(matches!(
            Signature::from_base64("not*base64"),
            Err(SignError::Base64(_))
        ));
    }

    #[test]
    fn test_signed_document_json() {
        let digest = digest_bytes(b"Test document content");
        let signature = Signature::from_bytes(vec![7u8; 256]);
        let doc = SignedDocument::new(&digest, &signature);

        let json = doc.to_json().unwrap();
        assert!(json.contains("\"hash\""));
        assert!(json.contains("\"signature\""));
        assert!(json.contains("\"signed_at\""));

        let restored = SignedDocument::from_json(&json).unwrap();
        assert_eq!(restored, doc);
        assert_eq!(restored.digest().unwrap(), digest);
        assert_eq!(restored.signature().unwrap(), signature);
    }

    #[test]
    fn test_save_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = OutputConfig::new(dir.path());
        let digest = digest_bytes(b"hello world");
        let signature = Signature::from_bytes(vec![1, 2, 3]);
        let doc = SignedDocument::new(&digest, &signature);

        let (hash_path, signature_path) = doc.save_artifacts(&config).unwrap();
        assert_eq!(DocumentDigest::load(&hash_path).unwrap(), digest);
        assert_eq!(Signature::load(&signature_path).unwrap(), signature);

        fs::write(&signature_path, [0x80, 0x81, 0x82]).unwrap();
        assert!(matches!(
            Signature::load(&signature_path),
            Err(SignError::InvalidFormat(_))
        ));
    }
}
