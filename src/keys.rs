//! RSA key generation and PEM import/export.

use crate::config::OutputConfig;
use crate::error::{Result, SignError};
use crate::hash::DocumentDigest;
use crate::pem::{self, PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL};
use crate::signature::{signature_scheme, Signature};
use log::debug;
use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// RSA modulus size in bits.
pub const KEY_BITS: usize = 2048;

/// RSA public exponent.
pub const PUBLIC_EXPONENT: u32 = 65537;

/// A freshly generated key pair in its portable PEM encoding.
///
/// The public key is an SPKI envelope, the private key a PKCS#8 envelope.
pub struct KeyPair {
    public_key: String,
    private_key: Zeroizing<String>,
}

impl KeyPair {
    /// Generate a new random key pair.
    pub fn generate() -> Result<Self> {
        debug!("Generating {}-bit RSA key pair", KEY_BITS);
        let exponent = BigUint::from(PUBLIC_EXPONENT);
        let private = RsaPrivateKey::new_with_exp(&mut OsRng, KEY_BITS, &exponent)
            .map_err(|e| SignError::KeyGeneration(e.to_string()))?;

        let private_der = private
            .to_pkcs8_der()
            .map_err(|e| SignError::KeyGeneration(format!("PKCS#8 export: {}", e)))?;
        let public_der = private
            .to_public_key()
            .to_public_key_der()
            .map_err(|e| SignError::KeyGeneration(format!("SPKI export: {}", e)))?;

        Ok(Self {
            public_key: pem::encode(PUBLIC_KEY_LABEL, public_der.as_bytes()).to_string(),
            private_key: pem::encode(PRIVATE_KEY_LABEL, private_der.as_bytes()),
        })
    }

    /// The SPKI public key envelope.
    pub fn public_key_pem(&self) -> &str {
        &self.public_key
    }

    /// The PKCS#8 private key envelope.
    pub fn private_key_pem(&self) -> &str {
        &self.private_key
    }

    /// Parse the public half.
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_pem(&self.public_key)
    }

    /// Parse the private half.
    pub fn private_key(&self) -> Result<PrivateKey> {
        PrivateKey::from_pem(&self.private_key)
    }

    /// Write both envelopes into the configured output directory.
    ///
    /// Returns the private and public key paths, in that order.
    pub fn save_to_dir(&self, config: &OutputConfig) -> Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(config.dir())?;
        let private_path = config.private_key_path();
        let public_path = config.public_key_path();
        fs::write(&private_path, self.private_key.as_bytes())?;
        fs::write(&public_path, self.public_key.as_bytes())?;
        Ok((private_path, public_path))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Generate a new key pair with the fixed algorithm parameters.
pub fn generate_key_pair() -> Result<KeyPair> {
    KeyPair::generate()
}

/// Imported keys must have the same modulus size and exponent as generated
/// ones, so every signature is `KEY_BITS / 8` bytes.
fn check_parameters<K: PublicKeyParts>(key: &K) -> Result<()> {
    let bits = key.n().bits();
    if bits != KEY_BITS {
        return Err(SignError::KeyParse(format!(
            "unsupported RSA modulus size: expected {} bits, got {}",
            KEY_BITS, bits
        )));
    }
    if *key.e() != BigUint::from(PUBLIC_EXPONENT) {
        return Err(SignError::KeyParse(format!(
            "unsupported RSA public exponent: expected {}",
            PUBLIC_EXPONENT
        )));
    }
    Ok(())
}

/// An RSA private key used for signing.
pub struct PrivateKey {
    inner: RsaPrivateKey,
}

impl PrivateKey {
    /// Parse a PKCS#8 `PRIVATE KEY` envelope.
    pub fn from_pem(text: &str) -> Result<Self> {
        let der = pem::decode(PRIVATE_KEY_LABEL, text)?;
        let inner = RsaPrivateKey::from_pkcs8_der(&der)
            .map_err(|e| SignError::KeyParse(format!("not a PKCS#8 RSA private key: {}", e)))?;
        check_parameters(&inner)?;
        Ok(Self { inner })
    }

    /// Load a private key envelope from a file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = pem::read_file(path)?;
        Self::from_pem(&content)
    }

    /// The public half of this key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
        }
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.inner.n().bits()
    }

    /// Sign a digest with the fixed signature scheme.
    pub fn sign_digest(&self, digest: &DocumentDigest) -> Result<Signature> {
        let bytes = self
            .inner
            .sign_with_rng(&mut OsRng, signature_scheme(), digest.as_bytes())
            .map_err(|e| SignError::Signing(e.to_string()))?;
        Ok(Signature::from_bytes(bytes))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

/// An RSA public key used for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: RsaPublicKey,
}

impl PublicKey {
    /// Parse an SPKI `PUBLIC KEY` envelope.
    pub fn from_pem(text: &str) -> Result<Self> {
        let der = pem::decode(PUBLIC_KEY_LABEL, text)?;
        let inner = RsaPublicKey::from_public_key_der(&der)
            .map_err(|e| SignError::KeyParse(format!("not an SPKI RSA public key: {}", e)))?;
        check_parameters(&inner)?;
        Ok(Self { inner })
    }

    /// Encode as an SPKI `PUBLIC KEY` envelope.
    pub fn to_pem(&self) -> Result<String> {
        let der = self
            .inner
            .to_public_key_der()
            .map_err(|e| SignError::KeyParse(format!("SPKI export: {}", e)))?;
        Ok(pem::encode(PUBLIC_KEY_LABEL, der.as_bytes()).to_string())
    }

    /// Load a public key envelope from a file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = pem::read_file(path)?;
        Self::from_pem(&content)
    }

    /// Save the public key envelope to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_pem()?)?;
        Ok(())
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.inner.n().bits()
    }

    /// Check a signature over a digest with the fixed signature scheme.
    pub fn verify_digest(&self, digest: &DocumentDigest, signature: &Signature) -> Result<()> {
        self.inner
            .verify(signature_scheme(), digest.as_bytes(), signature.as_bytes())
            .map_err(|e| SignError::VerificationFailed(e.to_string()))
    }
}
