//! Output locations for persisted artifacts.
//!
//! Key size, exponent and signature scheme are fixed constants and are not
//! configurable here.

use log::debug;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no output directory is given.
pub const OUT_DIR_ENV: &str = "DOCSIGN_OUT_DIR";

/// File names used when artifacts are written to a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    /// PKCS#8 private key envelope.
    pub private_key: String,

    /// SPKI public key envelope.
    pub public_key: String,

    /// Hex digest of the last signed document.
    pub hash: String,

    /// Base64 signature of the last signed document.
    pub signature: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            private_key: "private_key.pem".to_string(),
            public_key: "public_key.pem".to_string(),
            hash: "hash.txt".to_string(),
            signature: "signature.txt".to_string(),
        }
    }
}

/// Where artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory all artifacts are written into.
    pub out_dir: PathBuf,

    /// File names inside `out_dir`.
    pub names: ArtifactNames,
}

impl OutputConfig {
    /// Create a config writing default file names into `out_dir`.
    pub fn new<P: Into<PathBuf>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.into(),
            names: ArtifactNames::default(),
        }
    }

    /// Resolve the output directory.
    ///
    /// Precedence: explicit value > `DOCSIGN_OUT_DIR` > current directory.
    pub fn resolve(cli_out_dir: Option<PathBuf>) -> Self {
        Self::resolve_with(cli_out_dir, env::var(OUT_DIR_ENV).ok())
    }

    fn resolve_with(cli_out_dir: Option<PathBuf>, env_out_dir: Option<String>) -> Self {
        let out_dir = match (cli_out_dir, env_out_dir) {
            (Some(dir), _) => dir,
            (None, Some(dir)) if !dir.trim().is_empty() => {
                debug!("Using output directory from {}", OUT_DIR_ENV);
                PathBuf::from(dir)
            }
            _ => PathBuf::from("."),
        };
        Self::new(out_dir)
    }

    /// Full path of the private key file.
    pub fn private_key_path(&self) -> PathBuf {
        self.out_dir.join(&self.names.private_key)
    }

    /// Full path of the public key file.
    pub fn public_key_path(&self) -> PathBuf {
        self.out_dir.join(&self.names.public_key)
    }

    /// Full path of the digest file.
    pub fn hash_path(&self) -> PathBuf {
        self.out_dir.join(&self.names.hash)
    }

    /// Full path of the signature file.
    pub fn signature_path(&self) -> PathBuf {
        self.out_dir.join(&self.names.signature)
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.out_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let config = OutputConfig::new("/tmp/out");
        assert_eq!(config.private_key_path(), PathBuf::from("/tmp/out/private_key.pem"));
        assert_eq!(config.public_key_path(), PathBuf::from("/tmp/out/public_key.pem"));
        assert_eq!(config.hash_path(), PathBuf::from("/tmp/out/hash.txt"));
        assert_eq!(config.signature_path(), PathBuf::from("/tmp/out/signature.txt"));
    }

    #[test]
    fn test_resolution_precedence() {
        let cli = OutputConfig::resolve_with(Some("cli".into()), Some("env".into()));
        assert_eq!(cli.dir(), Path::new("cli"));

        let env = OutputConfig::resolve_with(None, Some("env".into()));
        assert_eq!(env.dir(), Path::new("env"));

        let blank = OutputConfig::resolve_with(None, Some("  ".into()));
        assert_eq!(blank.dir(), Path::new("."));

        let default = OutputConfig::resolve_with(None, None);
        assert_eq!(default.dir(), Path::new("."));
    }
}
