//! src/pipeline/context.rs
//! Per-run mutable state the dispatcher's states cooperate over.

use crate::aliases::Passphrase;
use crate::consts::DEFAULT_READ_CHUNK;
use crate::error::WadcryptError;
use crate::keyfile::HttpFetch;
use crate::pipeline::session::DecryptionSession;
use crate::stream::{InStream, OutStream};

/// Detected envelope format of the input stream.
///
/// Starts `Unknown`; the format sniffer narrows it in one or two stages.
/// `MessageOrNestedWad` is the unresolved intermediate: the leading byte
/// says "envelope", but only the first decrypted bytes reveal whether a
/// WAD hides inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Unknown,
    Empty,
    Message,
    MessageByKeyFile,
    MessageOrNestedWad,
    Wad,
    NestedWad,
}

/// Caller-visible facts about the message being decrypted. `key_file` may
/// be pre-supplied or discovered from a WAD header mid-run; `key_only`
/// asserts the input is key-file-encrypted so no passphrase is consulted.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub key_file: String,
    pub key_only: bool,
}

/// Immutable per-run configuration.
///
/// Strong defaults; chain `with_*` to adjust.
pub struct DecryptConfig {
    pub passphrase: Passphrase,
    pub key_file_passphrase: Option<Passphrase>,
    pub http_fetch: Option<HttpFetch>,
    pub read_chunk_size: usize,
}

impl DecryptConfig {
    #[must_use]
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: Passphrase::new(passphrase.into()),
            key_file_passphrase: None,
            http_fetch: None,
            read_chunk_size: DEFAULT_READ_CHUNK,
        }
    }

    /// Passphrase used to decrypt an envelope-encrypted key file.
    #[must_use]
    pub fn with_key_file_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.key_file_passphrase = Some(Passphrase::new(passphrase.into()));
        self
    }

    /// External tool spawned for URL key-file references.
    #[must_use]
    pub fn with_http_fetch(mut self, tool_path: impl Into<String>, parameters: impl Into<String>) -> Self {
        self.http_fetch = Some(HttpFetch {
            tool_path: tool_path.into(),
            parameters: parameters.into(),
        });
        self
    }

    /// Read chunk size for the input stage (minimum 1). A tuning knob:
    /// output is identical for any value.
    #[must_use]
    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size.max(1);
        self
    }
}

/// Mutable carrier of one decryption run.
///
/// `buffer` holds the hot working bytes (just read, or just produced by a
/// filter pass); `pending` stages bytes for a consumer that needs more
/// input before it can decide (format sniffer, WAD head parser). The two
/// are handed back and forth by O(1) swaps, never copied.
pub struct DecryptionContext<'a, I: InStream, O: OutStream> {
    pub(crate) input: &'a mut I,
    pub(crate) output: &'a mut O,
    pub(crate) config: &'a DecryptConfig,
    pub(crate) metadata: &'a mut Metadata,
    pub(crate) buffer: Vec<u8>,
    pub(crate) pending: Vec<u8>,
    pub(crate) format: Format,
    pub(crate) filter_count: u8,
    pub(crate) passphrase_session: Option<DecryptionSession>,
    pub(crate) key_file_session: Option<DecryptionSession>,
    pub(crate) wad_head_finished: bool,
    pub(crate) failure: Option<WadcryptError>,
}

impl<'a, I: InStream, O: OutStream> DecryptionContext<'a, I, O> {
    pub fn new(
        input: &'a mut I,
        output: &'a mut O,
        config: &'a DecryptConfig,
        metadata: &'a mut Metadata,
    ) -> Self {
        Self {
            input,
            output,
            config,
            metadata,
            buffer: Vec::new(),
            pending: Vec::new(),
            format: Format::Unknown,
            filter_count: 0,
            passphrase_session: None,
            key_file_session: None,
            wad_head_finished: false,
            failure: None,
        }
    }

    /// Record a failure; the dispatcher enters the terminal Fail state on
    /// its next scan. First error wins.
    pub(crate) fn fail(&mut self, err: WadcryptError) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    pub(crate) fn take_failure(&mut self) -> WadcryptError {
        self.failure
            .take()
            .expect("Fail state admitted only with a recorded failure")
    }
}
