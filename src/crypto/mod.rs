// src/crypto/mod.rs

//! Low-level crypto primitives (KDF, HMAC aliases, RNG, key service).

pub mod hmac;
pub mod kdf;
pub mod key_service;
pub mod rng;

pub use key_service::KeyService;
