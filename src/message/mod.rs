// src/message/mod.rs

//! The symmetric message envelope.
//!
//! Wire layout: a 38-byte header (tag, format version, PBKDF2 iteration
//! count, salt, public IV), AES-256-CBC ciphertext with PKCS#7 padding,
//! and a 32-byte HMAC-SHA256 trailer over the ciphertext blocks. The key
//! for both cipher and HMAC is PBKDF2-HMAC-SHA512(passphrase, salt).
//!
//! [`MessageReader`] is the incremental decryptor the pipeline feeds one
//! buffer at a time; the matching one-shot encrypt loop lives in
//! `encryptor::stream`.

pub(crate) mod header;
pub(crate) mod reader;

pub use header::{parse_message_header, write_message_header, MessageHeader};
pub use reader::MessageReader;
