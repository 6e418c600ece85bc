//! src/crypto/key_service.rs
//! Pairs a passphrase with a one-slot cache of the key derived from it.
//!
//! Each decryption session owns exactly one `KeyService`; the message
//! reader derives through it once the envelope header names the salt and
//! iteration count. Re-deriving for the same (salt, iterations) pair is a
//! cache hit, so a session never pays the KDF twice.

use crate::aliases::{Aes256Key, Passphrase, Salt16};
use crate::crypto::kdf::derive_envelope_key;
use crate::error::WadcryptError;

pub struct KeyService {
    passphrase: Passphrase,
    cached: Option<(([u8; 16], u32), Aes256Key)>,
}

impl KeyService {
    pub fn new(passphrase: Passphrase) -> Self {
        Self {
            passphrase,
            cached: None,
        }
    }

    /// Derive (or fetch the cached) envelope key for the given KDF inputs.
    pub fn unlock_key(
        &mut self,
        salt: &Salt16,
        iterations: u32,
    ) -> Result<&Aes256Key, WadcryptError> {
        let slot = (*salt.expose_secret(), iterations);

        let hit = matches!(&self.cached, Some((key_id, _)) if *key_id == slot);
        if !hit {
            let mut key = Aes256Key::new([0u8; 32]);
            derive_envelope_key(&self.passphrase, salt, iterations, &mut key)?;
            self.cached = Some((slot, key));
        }

        let (_, key) = self.cached.as_ref().expect("cache slot filled above");
        Ok(key)
    }
}
