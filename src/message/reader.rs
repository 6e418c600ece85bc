//! src/message/reader.rs
//! Incremental envelope decryptor.
//!
//! `update` and `finish` both take the pipeline's working buffer and
//! replace its contents with whatever plaintext can be produced. The
//! reader keeps a raw carry of undecrypted bytes: the last 48 bytes seen
//! are always withheld during `update`, because they may still turn out
//! to be the padded final block plus the HMAC trailer. `finish` resolves
//! the carry, verifies the trailer and emits the rest.

use crate::aliases::{HmacSha256, Passphrase, PlainTextBlock16};
use crate::consts::{CIPHER_BLOCK_LEN, HMAC_TRAILER_LEN, MESSAGE_HEADER_LEN, READER_HOLD_BACK};
use crate::crypto::KeyService;
use crate::error::WadcryptError;
use crate::message::header::parse_message_header;
use crate::utils::xor_blocks;
use aes::cipher::{BlockDecrypt, KeyInit};
use aes::{Aes256Dec, Block as AesBlock};
use hmac::Mac;
use secure_gate::conversions::SecureConversionsExt;
use std::mem;

enum ReaderState {
    AwaitingHeader,
    Streaming {
        cipher: Aes256Dec,
        hmac: HmacSha256,
        prev: [u8; CIPHER_BLOCK_LEN],
    },
    Finished,
}

pub struct MessageReader {
    key_service: KeyService,
    state: ReaderState,
    carry: Vec<u8>,
}

impl MessageReader {
    pub fn new(passphrase: Passphrase) -> Self {
        Self {
            key_service: KeyService::new(passphrase),
            state: ReaderState::AwaitingHeader,
            carry: Vec::new(),
        }
    }

    /// Consume the ciphertext in `buf` and replace it with the plaintext
    /// producible so far. May produce nothing while the header or the
    /// hold-back window is still filling.
    pub fn update(&mut self, buf: &mut Vec<u8>) -> Result<(), WadcryptError> {
        if matches!(self.state, ReaderState::Finished) {
            return Err(WadcryptError::Crypto("update after finish".into()));
        }

        self.carry.append(buf);
        self.try_start_streaming()?;
        self.produce_available(buf);
        Ok(())
    }

    /// Consume the final ciphertext in `buf`, verify the trailer, and
    /// replace `buf` with the remaining plaintext. Called exactly once.
    pub fn finish(&mut self, buf: &mut Vec<u8>) -> Result<(), WadcryptError> {
        if matches!(self.state, ReaderState::Finished) {
            return Err(WadcryptError::Crypto("finish called twice".into()));
        }

        self.carry.append(buf);
        self.try_start_streaming()?;

        let state = mem::replace(&mut self.state, ReaderState::Finished);
        let ReaderState::Streaming {
            cipher,
            mut hmac,
            mut prev,
        } = state
        else {
            return Err(WadcryptError::Header("truncated envelope".into()));
        };

        let len = self.carry.len();
        if len < CIPHER_BLOCK_LEN + HMAC_TRAILER_LEN
            || (len - HMAC_TRAILER_LEN) % CIPHER_BLOCK_LEN != 0
        {
            return Err(WadcryptError::Header(
                "truncated or corrupt envelope trailer".into(),
            ));
        }

        // Authenticate before any of the held-back plaintext leaves.
        let body_len = len - HMAC_TRAILER_LEN;
        for chunk in self.carry[..body_len].chunks_exact(CIPHER_BLOCK_LEN) {
            hmac.update(chunk);
        }
        let computed = hmac.finalize().into_bytes();
        if !computed.as_slice().ct_eq(&self.carry[body_len..]) {
            return Err(WadcryptError::Crypto(
                "message authentication failed (wrong passphrase or corrupt data)".into(),
            ));
        }

        let block_count = body_len / CIPHER_BLOCK_LEN;
        let mut plain = PlainTextBlock16::new([0u8; CIPHER_BLOCK_LEN]);
        for (i, chunk) in self.carry[..body_len]
            .chunks_exact(CIPHER_BLOCK_LEN)
            .enumerate()
        {
            let mut block = *AesBlock::from_slice(chunk);
            cipher.decrypt_block(&mut block);
            xor_blocks(block.as_slice(), &prev, plain.expose_secret_mut());
            prev.copy_from_slice(chunk);

            if i + 1 < block_count {
                buf.extend_from_slice(plain.expose_secret());
            } else {
                let kept = strip_padding(plain.expose_secret())?;
                buf.extend_from_slice(&plain.expose_secret()[..kept]);
            }
        }

        self.carry.clear();
        Ok(())
    }

    /// Parse the header once enough bytes are buffered and set up the
    /// cipher, HMAC and CBC chain.
    fn try_start_streaming(&mut self) -> Result<(), WadcryptError> {
        if !matches!(self.state, ReaderState::AwaitingHeader)
            || self.carry.len() < MESSAGE_HEADER_LEN
        {
            return Ok(());
        }

        let mut head_bytes = [0u8; MESSAGE_HEADER_LEN];
        head_bytes.copy_from_slice(&self.carry[..MESSAGE_HEADER_LEN]);
        let head = parse_message_header(&head_bytes)?;

        let key = self.key_service.unlock_key(&head.salt, head.iterations)?;
        let cipher = Aes256Dec::new(key.expose_secret().into());
        let hmac = <HmacSha256 as Mac>::new_from_slice(key.expose_secret())
            .expect("derived key is always 32 bytes — valid HMAC-SHA256 key");

        self.carry.drain(..MESSAGE_HEADER_LEN);
        self.state = ReaderState::Streaming {
            cipher,
            hmac,
            prev: *head.iv.expose_secret(),
        };
        Ok(())
    }

    /// Decrypt every block that can no longer be part of the trailer.
    fn produce_available(&mut self, out: &mut Vec<u8>) {
        let ReaderState::Streaming { cipher, hmac, prev } = &mut self.state else {
            return;
        };
        if self.carry.len() < READER_HOLD_BACK + CIPHER_BLOCK_LEN {
            return;
        }

        let ready = (self.carry.len() - READER_HOLD_BACK) / CIPHER_BLOCK_LEN * CIPHER_BLOCK_LEN;
        let mut plain = PlainTextBlock16::new([0u8; CIPHER_BLOCK_LEN]);
        for chunk in self.carry[..ready].chunks_exact(CIPHER_BLOCK_LEN) {
            hmac.update(chunk);
            let mut block = *AesBlock::from_slice(chunk);
            cipher.decrypt_block(&mut block);
            xor_blocks(block.as_slice(), prev.as_slice(), plain.expose_secret_mut());
            out.extend_from_slice(plain.expose_secret());
            prev.copy_from_slice(chunk);
        }
        self.carry.drain(..ready);
    }
}

/// Validate PKCS#7 padding and return how many plaintext bytes the final
/// block holds.
fn strip_padding(block: &[u8; CIPHER_BLOCK_LEN]) -> Result<usize, WadcryptError> {
    let padding = block[CIPHER_BLOCK_LEN - 1];
    if padding == 0 || padding as usize > CIPHER_BLOCK_LEN {
        return Err(WadcryptError::Header("invalid PKCS#7 padding".into()));
    }

    let padding_start = CIPHER_BLOCK_LEN - padding as usize;
    let expected = [padding; CIPHER_BLOCK_LEN];
    if !block[padding_start..].ct_eq(&expected[padding_start..]) {
        return Err(WadcryptError::Header("corrupt PKCS#7 padding".into()));
    }

    Ok(padding_start)
}
