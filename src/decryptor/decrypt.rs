//! src/decryptor/decrypt.rs

use crate::error::WadcryptError;
use crate::pipeline::{self, DecryptConfig, DecryptionContext, Metadata};
use crate::stream::{InStream, OutStream, ReadInStream};
use std::io::{Read, Write};

/// Decrypt a passphrase, key-file, WAD or nested-WAD envelope stream.
///
/// The envelope kind is sniffed from the stream itself; `metadata` feeds
/// in what the caller already knows (a pre-supplied key-file reference,
/// the key-only assertion) and is updated with what the run discovers.
#[inline(always)]
pub fn decrypt<R: Read, W: Write>(
    input: R,
    mut output: W,
    config: &DecryptConfig,
    metadata: &mut Metadata,
) -> Result<(), WadcryptError> {
    let mut source = ReadInStream::new(input);
    decrypt_stream(&mut source, &mut output, config, metadata)
}

/// Decrypt over caller-built stream endpoints.
pub fn decrypt_stream<I: InStream, O: OutStream>(
    input: &mut I,
    output: &mut O,
    config: &DecryptConfig,
    metadata: &mut Metadata,
) -> Result<(), WadcryptError> {
    let mut cx = DecryptionContext::new(input, output, config, metadata);
    pipeline::run(&mut cx)
}
