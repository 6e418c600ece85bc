#[cfg(feature = "batch-ops")]
use rayon::prelude::*;
#[cfg(feature = "batch-ops")]
use std::io::{Read, Write};

#[cfg(feature = "batch-ops")]
use crate::aliases::Passphrase;
#[cfg(feature = "batch-ops")]
use crate::pipeline::{DecryptConfig, Metadata};
#[cfg(feature = "batch-ops")]
use crate::{decrypt, encrypt, WadcryptError};

#[cfg(feature = "batch-ops")]
pub fn encrypt_batch<R, W>(
    batch: &mut [(R, W)],
    passphrase: &Passphrase,
    kdf_iterations: u32,
) -> Result<(), WadcryptError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| encrypt(src, dst, passphrase, kdf_iterations))
}

#[cfg(feature = "batch-ops")]
pub fn decrypt_batch<R, W>(
    batch: &mut [(R, W)],
    config: &DecryptConfig,
) -> Result<(), WadcryptError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch.par_iter_mut().try_for_each(|(src, dst)| {
        let mut metadata = Metadata::default();
        decrypt(src, dst, config, &mut metadata)
    })
}
