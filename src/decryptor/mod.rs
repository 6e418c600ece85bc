// src/decryptor/mod.rs

//! High-level decryption facade.
//!
//! Core API: `decrypt(input, output, config, metadata)?` for full stream
//! handling over any `Read`/`Write` pair. `decrypt_stream` is the same
//! entry point over pre-built [`InStream`](crate::stream::InStream)/
//! [`OutStream`](crate::stream::OutStream) endpoints.

pub(crate) mod decrypt;

pub use decrypt::{decrypt, decrypt_stream};
