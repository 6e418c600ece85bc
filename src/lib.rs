// src/lib.rs

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod keyfile;
pub mod message;
pub mod pipeline;
pub mod stream;
pub mod utils;
pub mod wad;

// High-level API — this is what 99% of users import
pub use decryptor::{decrypt, decrypt_stream};
pub use encryptor::{encrypt, encrypt_nested, encrypt_wad};
pub use error::WadcryptError;
pub use pipeline::{DecryptConfig, Metadata};

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};
