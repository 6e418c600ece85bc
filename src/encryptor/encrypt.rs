//! src/encryptor/encrypt.rs

use crate::aliases::{Aes256Key, Iv16, Passphrase, Salt16};
use crate::consts::{PBKDF2_MAX_ITER, PBKDF2_MIN_ITER};
use crate::crypto::kdf::derive_envelope_key;
use crate::crypto::rng::SecureRandomExt;
use crate::encryptor::stream::encrypt_stream;
use crate::error::WadcryptError;
use crate::message::write_message_header;
use crate::wad::write_wad;
use std::io::{Cursor, Read, Write};

/// Encrypt `input` into a passphrase envelope.
#[inline(always)]
pub fn encrypt<R, W>(
    mut input: R,
    mut output: W,
    passphrase: &Passphrase,
    kdf_iterations: u32,
) -> Result<(), WadcryptError>
where
    R: Read,
    W: Write,
{
    if passphrase.expose_secret().is_empty() {
        return Err(WadcryptError::Header("empty passphrase".into()));
    }
    if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&kdf_iterations) {
        return Err(WadcryptError::Header("invalid KDF iterations".into()));
    }

    let salt = Salt16::random();
    let iv = Iv16::random();

    write_message_header(&mut output, kdf_iterations, &salt, &iv)?;

    let mut key = Aes256Key::new([0u8; 32]);
    derive_envelope_key(passphrase, &salt, kdf_iterations, &mut key)?;

    encrypt_stream(&mut input, &mut output, &iv, &key)
}

/// Encrypt `input` with the key file's secret and wrap the result in a
/// WAD container referencing `key_file_name`.
pub fn encrypt_wad<R, W>(
    input: R,
    output: &mut W,
    key: &Passphrase,
    kdf_iterations: u32,
    key_file_name: &str,
) -> Result<(), WadcryptError>
where
    R: Read,
    W: Write,
{
    let mut payload = Vec::new();
    encrypt(input, &mut payload, key, kdf_iterations)?;
    write_wad(output, key_file_name, &payload)
}

/// Produce the nested envelope: `input` encrypted with the key file's
/// secret, wrapped in a WAD, and the whole container encrypted again with
/// the user passphrase.
pub fn encrypt_nested<R, W>(
    input: R,
    output: W,
    passphrase: &Passphrase,
    key: &Passphrase,
    kdf_iterations: u32,
    key_file_name: &str,
) -> Result<(), WadcryptError>
where
    R: Read,
    W: Write,
{
    let mut container = Vec::new();
    encrypt_wad(input, &mut container, key, kdf_iterations, key_file_name)?;
    encrypt(Cursor::new(container), output, passphrase, kdf_iterations)
}
