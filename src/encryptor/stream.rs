//! src/encryptor/stream.rs
//! CBC+HMAC streaming encryption loop.

use crate::aliases::{Aes256Key, HmacSha256, Iv16, PlainTextBlock16};
use crate::error::WadcryptError;
use crate::utils::{read_full, xor_blocks};
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes256Enc, Block as AesBlock};
use hmac::Mac;
use std::io::{Read, Write};

/// Encrypt `source` into `destination`: PKCS#7-padded AES-256-CBC blocks
/// followed by the HMAC-SHA256 trailer over all ciphertext blocks.
#[inline(always)]
pub(crate) fn encrypt_stream<R, W>(
    source: &mut R,
    destination: &mut W,
    iv: &Iv16,
    key: &Aes256Key,
) -> Result<(), WadcryptError>
where
    R: Read,
    W: Write,
{
    let cipher = Aes256Enc::new(key.expose_secret().into());
    let mut hmac = <HmacSha256 as Mac>::new_from_slice(key.expose_secret())
        .expect("derived key is always 32 bytes — valid HMAC-SHA256 key");

    let mut prev_block: [u8; 16] = *iv.expose_secret();
    let mut plaintext_block = PlainTextBlock16::new([0u8; 16]);

    loop {
        let n = read_full(source, plaintext_block.expose_secret_mut())?;

        let is_final = n < 16;
        if is_final {
            let pad = (16 - n) as u8;
            plaintext_block.expose_secret_mut()[n..].fill(pad);
        }

        let mut xor_output = PlainTextBlock16::new([0u8; 16]);
        xor_blocks(
            plaintext_block.expose_secret(),
            &prev_block,
            xor_output.expose_secret_mut(),
        );

        let mut aes_block = AesBlock::from(*xor_output.expose_secret());
        cipher.encrypt_block(&mut aes_block);
        let mut ct_array = [0u8; 16];
        ct_array.copy_from_slice(aes_block.as_ref());

        hmac.update(&ct_array);
        destination.write_all(&ct_array)?;

        prev_block = ct_array;

        if is_final {
            break;
        }
    }

    destination.write_all(hmac.finalize().into_bytes().as_slice())?;
    Ok(())
}
