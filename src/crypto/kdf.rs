//! src/crypto/kdf.rs

use crate::aliases::{Aes256Key, Passphrase, Salt16};
use crate::consts::{PBKDF2_MAX_ITER, PBKDF2_MIN_ITER};
use crate::error::WadcryptError;

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha512;

/// Derive PBKDF2-HMAC-SHA512 directly into an Aes256Key buffer.
/// Zero allocation, zero copy.
#[inline(always)]
pub fn derive_envelope_key(
    passphrase: &Passphrase,
    salt: &Salt16,
    iterations: u32,
    out_key: &mut Aes256Key,
) -> Result<(), WadcryptError> {
    if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&iterations) {
        return Err(WadcryptError::Crypto("invalid PBKDF2 iterations".into()));
    }

    pbkdf2::<Hmac<Sha512>>(
        passphrase.expose_secret().as_bytes(),
        salt.expose_secret(),
        iterations,
        out_key.expose_secret_mut(),
    )
    .map_err(|e| WadcryptError::Crypto(format!("PBKDF2 failed: {e}")))?;

    Ok(())
}
