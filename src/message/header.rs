//! src/message/header.rs
//! Envelope header encode/parse.

use crate::aliases::{Iv16, Salt16};
use crate::consts::{
    MESSAGE_HEADER_LEN, MESSAGE_LATEST_VERSION, MESSAGE_TAG, PBKDF2_MAX_ITER, PBKDF2_MIN_ITER,
};
use crate::error::WadcryptError;
use std::io::Write;

/// Parsed envelope header: everything needed to derive the key and start
/// the CBC chain.
#[derive(Debug)]
pub struct MessageHeader {
    pub iterations: u32,
    pub salt: Salt16,
    pub iv: Iv16,
}

/// Parse a full 38-byte envelope header.
pub fn parse_message_header(bytes: &[u8; MESSAGE_HEADER_LEN]) -> Result<MessageHeader, WadcryptError> {
    if bytes[0] != MESSAGE_TAG {
        return Err(WadcryptError::Header(
            "not an envelope: invalid leading tag".into(),
        ));
    }

    let version = bytes[1];
    if version != MESSAGE_LATEST_VERSION {
        return Err(WadcryptError::UnsupportedVersion(version));
    }

    let mut iter_bytes = [0u8; 4];
    iter_bytes.copy_from_slice(&bytes[2..6]);
    let iterations = u32::from_be_bytes(iter_bytes);
    if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&iterations) {
        return Err(WadcryptError::Header("invalid KDF iterations".into()));
    }

    let mut salt = [0u8; 16];
    salt.copy_from_slice(&bytes[6..22]);
    let mut iv = [0u8; 16];
    iv.copy_from_slice(&bytes[22..38]);

    Ok(MessageHeader {
        iterations,
        salt: Salt16::new(salt),
        iv: Iv16::new(iv),
    })
}

/// Write an envelope header for the encrypt path.
pub fn write_message_header<W: Write>(
    writer: &mut W,
    iterations: u32,
    salt: &Salt16,
    iv: &Iv16,
) -> Result<(), WadcryptError> {
    if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&iterations) {
        return Err(WadcryptError::Header("invalid KDF iterations".into()));
    }
    writer.write_all(&[MESSAGE_TAG, MESSAGE_LATEST_VERSION])?;
    writer.write_all(&iterations.to_be_bytes())?;
    writer.write_all(salt.expose_secret())?;
    writer.write_all(iv.expose_secret())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header_bytes() -> [u8; MESSAGE_HEADER_LEN] {
        let mut out = Vec::new();
        write_message_header(
            &mut out,
            1000,
            &Salt16::new([0x11; 16]),
            &Iv16::new([0x22; 16]),
        )
        .unwrap();
        out.try_into().unwrap()
    }

    #[test]
    fn roundtrip() {
        let head = parse_message_header(&sample_header_bytes()).unwrap();
        assert_eq!(head.iterations, 1000);
        assert_eq!(head.salt.expose_secret(), &[0x11; 16]);
        assert_eq!(head.iv.expose_secret(), &[0x22; 16]);
    }

    #[test]
    fn invalid_tag_rejected() {
        let mut bytes = sample_header_bytes();
        bytes[0] = b'I';
        let err = parse_message_header(&bytes).unwrap_err();
        assert_eq!(err.to_string(), "Header error: not an envelope: invalid leading tag");
    }

    #[test]
    fn unsupported_version_rejected() {
        let mut bytes = sample_header_bytes();
        bytes[1] = 9;
        let err = parse_message_header(&bytes).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported version: 9");
    }

    #[test]
    fn zero_iterations_rejected() {
        let mut bytes = sample_header_bytes();
        bytes[2..6].copy_from_slice(&0u32.to_be_bytes());
        assert!(matches!(
            parse_message_header(&bytes),
            Err(WadcryptError::Header(_))
        ));
    }
}
