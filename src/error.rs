//! # Error Types
//!
//! This module defines the error types used throughout the library.
//! All operations return [`Result<T, WadcryptError>`](WadcryptError).

use thiserror::Error;

/// The error type for all wadcrypt operations.
///
/// This enum covers I/O errors, cryptographic errors, envelope header
/// errors, and the typed results recorded by the decryption pipeline.
#[derive(Error, Debug)]
pub enum WadcryptError {
    /// I/O error occurred during stream operations.
    ///
    /// This variant wraps [`std::io::Error`] and is automatically created
    /// when reads or writes on the input source or output sink fail.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cryptographic operation failed.
    ///
    /// This variant is used for errors in cryptographic operations such as:
    /// - KDF derivation failures
    /// - Message authentication failures (wrong passphrase or corrupt data)
    /// - Violations of the reader's update/finish contract
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Envelope header parsing or validation error.
    ///
    /// Used for a leading byte that is not the envelope tag, out-of-range
    /// KDF iteration counts, truncated headers and corrupt trailers.
    #[error("Header error: {0}")]
    Header(String),

    /// Unsupported envelope format version.
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u8),

    /// A key-file envelope was detected but no key-file reference is
    /// available (neither pre-supplied nor embedded in the WAD header).
    #[error("key file not specified")]
    KeyFileNotSpecified,

    /// The key file loaded but did not decrypt with the configured
    /// key-file passphrase.
    #[error("invalid key file passphrase")]
    InvalidKeyFilePassphrase,

    /// The WAD container header is malformed, or still truncated when the
    /// input reached EOF.
    #[error("invalid or incomplete WAD file")]
    InvalidOrIncompleteWad,

    /// Loading a key file from a path or URL failed.
    #[error("key file load error: {0}")]
    KeyFileLoad(String),

    /// No pipeline state was admissible. Cannot occur for well-formed
    /// input; terminates the dispatcher instead of spinning.
    #[error("decryption pipeline stalled")]
    Stalled,
}

impl From<&'static str> for WadcryptError {
    fn from(msg: &'static str) -> Self {
        WadcryptError::Crypto(msg.to_string())
    }
}
