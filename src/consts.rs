//! Global constants for the envelope and container formats.
//!
//! Includes the wire-format markers, KDF parameters, and pipeline defaults.

/// Leading tag byte of a passphrase/key-file envelope. The high bit is set
/// and the value is not 0xEF, which is what the format sniffer keys on.
pub const MESSAGE_TAG: u8 = 0xC3;

/// Current envelope format version.
pub const MESSAGE_LATEST_VERSION: u8 = 1;

/// Envelope header length: tag + version + iterations + salt + public IV.
pub const MESSAGE_HEADER_LEN: usize = 1 + 1 + 4 + 16 + 16;

/// HMAC-SHA256 trailer length at the end of an envelope.
pub const HMAC_TRAILER_LEN: usize = 32;

/// Raw bytes a reader must hold back during streaming: the trailer plus
/// one cipher block that may turn out to be the final (padded) block.
pub const READER_HOLD_BACK: usize = HMAC_TRAILER_LEN + CIPHER_BLOCK_LEN;

/// AES block length.
pub const CIPHER_BLOCK_LEN: usize = 16;

/// Minimum allowed PBKDF2 iterations.
pub const PBKDF2_MIN_ITER: u32 = 1;

/// Maximum allowed PBKDF2 iterations (5 million).
pub const PBKDF2_MAX_ITER: u32 = 5_000_000;

/// Recommended PBKDF2 iteration count.
/// Provides ~0.1–0.3s on modern hardware; balances usability and
/// resistance to GPU attacks.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 300_000;

/// Default read chunk size for the pipeline's input stage.
///
/// Correctness does not depend on this value; tests drive the pipeline
/// with chunk sizes down to a single byte.
pub const DEFAULT_READ_CHUNK: usize = 4096;

/// WAD container magics.
pub const WAD_IDENT_IWAD: &[u8; 4] = b"IWAD";
pub const WAD_IDENT_PWAD: &[u8; 4] = b"PWAD";

/// WAD header length: magic + lump count + directory offset.
pub const WAD_HEADER_LEN: usize = 12;

/// WAD directory entry length: file position + size + 8-byte name.
pub const WAD_DIR_ENTRY_LEN: usize = 16;

/// Lump carrying the key-file reference string.
pub const WAD_KEY_LUMP: &[u8; 8] = b"_KEYPATH";

/// Lump carrying the encrypted payload. A recorded size of zero means the
/// payload extends to the end of the container.
pub const WAD_PAYLOAD_LUMP: &[u8; 8] = b"_PAYLOAD";
