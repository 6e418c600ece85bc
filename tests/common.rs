//! tests/common.rs
//! Shared constants and fixtures for the integration tests.

use std::io::Cursor;
use wadcrypt::aliases::Passphrase;
use wadcrypt::pipeline::{DecryptConfig, Metadata};

/// Fast iteration count for tests - performance testing is in benches/
pub const TEST_ITERATIONS: u32 = 5;

/// Standard passphrase for the outer (user) envelope
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSPHRASE: &str = "correct horse battery staple";

/// Secret stored in test key files
#[allow(dead_code)] // Used across multiple test files
pub const TEST_KEY_SECRET: &str = "0f8e2a91-key-file-secret";

#[allow(dead_code)] // Used across multiple test files
pub fn passphrase(s: &str) -> Passphrase {
    Passphrase::new(s.to_string())
}

/// Encrypt `plain` into a passphrase envelope held in memory.
#[allow(dead_code)] // Used across multiple test files
pub fn encrypt_to_vec(plain: &[u8], secret: &str) -> Vec<u8> {
    let mut out = Vec::new();
    wadcrypt::encrypt(
        Cursor::new(plain),
        &mut out,
        &passphrase(secret),
        TEST_ITERATIONS,
    )
    .unwrap();
    out
}

/// Decrypt `input` fully, returning the produced plaintext.
#[allow(dead_code)] // Used across multiple test files
pub fn decrypt_to_vec(
    input: &[u8],
    config: &DecryptConfig,
    metadata: &mut Metadata,
) -> Result<Vec<u8>, wadcrypt::WadcryptError> {
    let mut out = Vec::new();
    wadcrypt::decrypt(Cursor::new(input), &mut out, config, metadata)?;
    Ok(out)
}

/// Write a key file holding `secret` into `dir` and return its path.
#[allow(dead_code)] // Used across multiple test files
pub fn write_key_file(dir: &tempfile::TempDir, secret: &str) -> String {
    let path = dir.path().join("message.key");
    std::fs::write(&path, secret).unwrap();
    path.to_str().unwrap().to_string()
}
