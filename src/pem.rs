//! PEM-style textual envelopes around DER key material.
//!
//! Writers emit a single-line base64 body:
//!
//! ```text
//! -----BEGIN PUBLIC KEY-----
//! <base64 SPKI bytes>
//! -----END PUBLIC KEY-----
//! ```
//!
//! Readers accept single-line or wrapped bodies, CRLF line endings and any
//! surrounding whitespace.

use crate::error::{Result, SignError};
use base64::Engine;
use std::fs;
use std::path::Path;
use zeroize::Zeroizing;

/// Label of an SPKI public key envelope.
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// Label of a PKCS#8 private key envelope.
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

fn begin_marker(label: &str) -> String {
    format!("-----BEGIN {}-----", label)
}

fn end_marker(label: &str) -> String {
    format!("-----END {}-----", label)
}

/// Wrap DER bytes in an envelope with the given label.
pub fn encode(label: &str, der: &[u8]) -> Zeroizing<String> {
    let body = Zeroizing::new(base64::engine::general_purpose::STANDARD.encode(der));
    Zeroizing::new(format!(
        "{}\n{}\n{}",
        begin_marker(label),
        body.as_str(),
        end_marker(label)
    ))
}

/// Extract the DER bytes from an envelope with the given label.
///
/// Error messages describe only the structural fault, never the body.
pub fn decode(label: &str, text: &str) -> Result<Zeroizing<Vec<u8>>> {
    let begin = begin_marker(label);
    let end = end_marker(label);

    let start = text
        .find(&begin)
        .map(|idx| idx + begin.len())
        .ok_or_else(|| SignError::KeyParse(format!("missing '{}' marker", begin)))?;
    let stop = text[start..]
        .find(&end)
        .map(|idx| start + idx)
        .ok_or_else(|| SignError::KeyParse(format!("missing '{}' marker", end)))?;

    let body: Zeroizing<String> = Zeroizing::new(
        text[start..stop]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect(),
    );
    if body.is_empty() {
        return Err(SignError::KeyParse(format!("empty {} body", label)));
    }

    base64::engine::general_purpose::STANDARD
        .decode(body.as_bytes())
        .map(Zeroizing::new)
        .map_err(|_| SignError::KeyParse(format!("malformed base64 in {} body", label)))
}

/// Read an envelope file. Content that is not UTF-8 text cannot be an
/// envelope and is reported as [`SignError::KeyParse`].
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Zeroizing<String>> {
    let bytes = Zeroizing::new(fs::read(path)?);
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| SignError::KeyParse("key file is not UTF-8 text".to_string()))?;
    Ok(Zeroizing::new(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let pem = encode(PUBLIC_KEY_LABEL, &[1, 2, 3, 4]);
        assert_eq!(
            pem.as_str(),
            "-----BEGIN PUBLIC KEY-----\nAQIDBA==\n-----END PUBLIC KEY-----"
        );
    }

    #[test]
    fn test_decode_tolerates_wrapping_and_crlf() {
        let der: Vec<u8> = (0u8..=200).collect();
        let pem = encode(PRIVATE_KEY_LABEL, &der);

        let lines: Vec<&str> = pem.lines().collect();
        let body = lines[1];
        let wrapped: Vec<&str> = body
            .as_bytes()
            .chunks(64)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect();
        let reflowed = format!(
            "  {}\r\n{}\r\n{}\r\n\r\n",
            lines[0],
            wrapped.join("\r\n"),
            lines[2]
        );

        assert_eq!(decode(PRIVATE_KEY_LABEL, &reflowed).unwrap().as_slice(), &der[..]);
    }

    #[test]
    fn test_decode_missing_markers() {
        let err = decode(PUBLIC_KEY_LABEL, "AQIDBA==\n-----END PUBLIC KEY-----").unwrap_err();
        assert!(matches!(err, SignError::KeyParse(ref m) if m.contains("BEGIN")));

        let err = decode(PUBLIC_KEY_LABEL, "-----BEGIN PUBLIC KEY-----\nAQIDBA==\n").unwrap_err();
        assert!(matches!(err, SignError::KeyParse(ref m) if m.contains("END")));
    }

    #[test]
    fn test_decode_wrong_label() {
        let pem = encode(PRIVATE_KEY_LABEL, &[1, 2, 3]);
        assert!(matches!(
            decode(PUBLIC_KEY_LABEL, &pem),
            Err(SignError::KeyParse(_))
        ));
    }

    #[test]
    fn test_decode_bad_base64_and_empty_body() {
        let bad = "-----BEGIN PUBLIC KEY-----\n!!not base64!!\n-----END PUBLIC KEY-----";
        assert!(matches!(
            decode(PUBLIC_KEY_LABEL, bad),
            Err(SignError::KeyParse(_))
        ));

        let empty = "-----BEGIN PUBLIC KEY-----\n\n-----END PUBLIC KEY-----";
        assert!(matches!(
            decode(PUBLIC_KEY_LABEL, empty),
            Err(SignError::KeyParse(_))
        ));
    }

    #[test]
    fn test_read_file_rejects_binary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pem");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80, 0xc3]).unwrap();
        assert!(matches!(read_file(&path), Err(SignError::KeyParse(_))));

        let missing = read_file(dir.path().join("missing.pem"));
        assert!(matches!(missing, Err(SignError::Io(_))));
    }
}
