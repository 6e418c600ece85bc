//! src/stream.rs
//! Byte-stream contracts the decryption pipeline runs over.
//!
//! The pipeline needs more than `std::io::Read` gives it: EOF must be
//! observable *after the last byte is consumed* (several states decide
//! differently at EOF), and the read stage wants a cheap remaining-bytes
//! hint. `InStream` adds both. `OutStream` is an absorb-all sink.

use crate::error::WadcryptError;
use std::io::Read;

/// Byte source for a decryption run.
pub trait InStream {
    /// Read up to `dst.len()` bytes. A return of 0 is only valid at EOF.
    fn read(&mut self, dst: &mut [u8]) -> Result<usize, WadcryptError>;

    /// Bytes known to remain. A hint; may under-report for adapted
    /// readers, never over-reports.
    fn available(&self) -> usize;

    /// True once every byte has been consumed.
    fn is_eof(&self) -> bool;
}

/// Byte sink for a decryption run. No partial-write semantics: the sink
/// absorbs all bytes or fails.
pub trait OutStream {
    fn write(&mut self, data: &[u8]) -> Result<(), WadcryptError>;
}

impl<W: std::io::Write> OutStream for W {
    #[inline]
    fn write(&mut self, data: &[u8]) -> Result<(), WadcryptError> {
        self.write_all(data).map_err(WadcryptError::Io)
    }
}

/// In-memory byte source over a borrowed slice.
pub struct MemoryInStream<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> MemoryInStream<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl InStream for MemoryInStream<'_> {
    fn read(&mut self, dst: &mut [u8]) -> Result<usize, WadcryptError> {
        let n = dst.len().min(self.bytes.len() - self.pos);
        dst[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn available(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn is_eof(&self) -> bool {
        self.pos == self.bytes.len()
    }
}

/// Adapter giving any `std::io::Read` the `InStream` contract.
///
/// Keeps a one-byte lookahead so `is_eof` flips exactly when the last
/// byte has been handed out, not one call later.
pub struct ReadInStream<R: Read> {
    inner: R,
    lookahead: Option<u8>,
    eof: bool,
}

impl<R: Read> ReadInStream<R> {
    pub fn new(inner: R) -> Self {
        let mut this = Self {
            inner,
            lookahead: None,
            eof: false,
        };
        this.probe();
        this
    }

    /// Pull one byte ahead so EOF is observable the moment the stream is
    /// drained. A failed probe is retried by the next `read`.
    fn probe(&mut self) {
        if self.eof || self.lookahead.is_some() {
            return;
        }
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => {
                    self.eof = true;
                    return;
                }
                Ok(_) => {
                    self.lookahead = Some(byte[0]);
                    return;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(_) => return,
            }
        }
    }
}

impl<R: Read> InStream for ReadInStream<R> {
    fn read(&mut self, dst: &mut [u8]) -> Result<usize, WadcryptError> {
        if dst.is_empty() {
            return Ok(0);
        }

        let mut filled = 0;
        if let Some(byte) = self.lookahead.take() {
            dst[0] = byte;
            filled = 1;
        }

        if filled < dst.len() && !self.eof {
            loop {
                match self.inner.read(&mut dst[filled..]) {
                    Ok(0) => {
                        self.eof = true;
                        break;
                    }
                    Ok(n) => {
                        filled += n;
                        break;
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(WadcryptError::Io(e)),
                }
            }
        }

        self.probe();
        Ok(filled)
    }

    fn available(&self) -> usize {
        usize::from(self.lookahead.is_some())
    }

    fn is_eof(&self) -> bool {
        self.eof && self.lookahead.is_none()
    }
}
