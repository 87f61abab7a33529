//! SHA-256 document digests.
//!
//! The digest is always computed over the raw document bytes. Its canonical
//! rendering is 64 lowercase hex characters.

use crate::error::{Result, SignError};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;

/// The size of a SHA-256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Length of the hex rendering of a digest.
pub const DIGEST_HEX_LEN: usize = DIGEST_SIZE * 2;

/// A SHA-256 digest of document content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentDigest([u8; DIGEST_SIZE]);

impl DocumentDigest {
    /// Create a digest from raw bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the digest.
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Encode the digest as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode a digest from hex. Surrounding whitespace is ignored and either
    /// letter case is accepted.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != DIGEST_HEX_LEN {
            return Err(SignError::InvalidFormat(format!(
                "Invalid digest length: expected {} hex characters, got {}",
                DIGEST_HEX_LEN,
                s.len()
            )));
        }
        let mut arr = [0u8; DIGEST_SIZE];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }

    /// Compare two digests without short-circuiting on the first differing
    /// byte.
    pub fn ct_eq(&self, other: &DocumentDigest) -> bool {
        let mut diff = 0u8;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            diff |= a ^ b;
        }
        diff == 0
    }

    /// Write the hex digest to a text file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_hex())?;
        Ok(())
    }

    /// Read a hex digest from a text file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| SignError::InvalidFormat("Digest file is not UTF-8 text".to_string()))?;
        Self::from_hex(content)
    }
}

impl fmt::Display for DocumentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute the SHA-256 digest of a byte slice.
pub fn digest_bytes(data: &[u8]) -> DocumentDigest {
    DocumentDigest(Sha256::digest(data).into())
}

/// Compute the SHA-256 digest of a file's contents.
pub fn digest_file<P: AsRef<Path>>(path: P) -> Result<DocumentDigest> {
    let data = fs::read(path)?;
    Ok(digest_bytes(&data))
}
