//! tests/keyfile_tests.rs
//! Key-file loading and unwrapping cases.

mod common;

use common::*;
use wadcrypt::keyfile::{decrypt_key_file_content, load_key_from_file};
use wadcrypt::WadcryptError;

#[test]
fn plain_key_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_key_file(&dir, TEST_KEY_SECRET);

    let content = load_key_from_file(&path, None).unwrap();
    let secret = decrypt_key_file_content(&content, None).unwrap();
    assert_eq!(secret.expose_secret(), TEST_KEY_SECRET);
}

#[test]
fn trailing_line_break_is_trimmed() {
    for raw in [
        format!("{TEST_KEY_SECRET}\n"),
        format!("{TEST_KEY_SECRET}\r\n"),
    ] {
        let secret = decrypt_key_file_content(raw.as_bytes(), None).unwrap();
        assert_eq!(secret.expose_secret(), TEST_KEY_SECRET);
    }

    // Only one trailing break is editor noise; more is content.
    let secret = decrypt_key_file_content(format!("{TEST_KEY_SECRET}\n\n").as_bytes(), None)
        .unwrap();
    assert_eq!(secret.expose_secret(), &format!("{TEST_KEY_SECRET}\n"));
}

#[test]
fn encrypted_key_file_decrypts_with_its_passphrase() {
    let encrypted = encrypt_to_vec(TEST_KEY_SECRET.as_bytes(), "key file guard");

    let guard = passphrase("key file guard");
    let secret = decrypt_key_file_content(&encrypted, Some(&guard)).unwrap();
    assert_eq!(secret.expose_secret(), TEST_KEY_SECRET);
}

#[test]
fn encrypted_key_file_without_passphrase_is_rejected() {
    let encrypted = encrypt_to_vec(TEST_KEY_SECRET.as_bytes(), "key file guard");

    assert!(matches!(
        decrypt_key_file_content(&encrypted, None),
        Err(WadcryptError::InvalidKeyFilePassphrase)
    ));
}

#[test]
fn encrypted_key_file_with_wrong_passphrase_is_rejected() {
    let encrypted = encrypt_to_vec(TEST_KEY_SECRET.as_bytes(), "key file guard");

    let wrong = passphrase("not the guard");
    assert!(decrypt_key_file_content(&encrypted, Some(&wrong)).is_err());
}

#[test]
fn missing_key_file_is_an_io_error() {
    let err = load_key_from_file("/nonexistent/path/message.key", None).unwrap_err();
    assert!(matches!(err, WadcryptError::Io(_)));
}

#[test]
fn url_without_fetch_tool_is_rejected() {
    let err = load_key_from_file("https://example.invalid/message.key", None).unwrap_err();
    assert!(matches!(err, WadcryptError::KeyFileLoad(_)));
}

#[test]
fn key_file_envelope_end_to_end() {
    // An encrypted key file guarding a key-only message.
    let dir = tempfile::tempdir().unwrap();
    let key_blob = encrypt_to_vec(TEST_KEY_SECRET.as_bytes(), "key file guard");
    let path = dir.path().join("guarded.key");
    std::fs::write(&path, &key_blob).unwrap();

    let message = encrypt_to_vec(b"guarded message", TEST_KEY_SECRET);

    let config = wadcrypt::DecryptConfig::new("").with_key_file_passphrase("key file guard");
    let mut metadata = wadcrypt::Metadata {
        key_file: path.to_str().unwrap().to_string(),
        key_only: true,
    };
    let out = decrypt_to_vec(&message, &config, &mut metadata).unwrap();
    assert_eq!(out, b"guarded message");
}
