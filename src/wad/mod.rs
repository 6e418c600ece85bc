// src/wad/mod.rs

//! The WAD archive container.
//!
//! A small Doom-style container: 12-byte header (`IWAD`/`PWAD` magic,
//! lump count, directory offset) and a directory of 16-byte entries. Two
//! lumps matter here: `_KEYPATH` names the key file and `_PAYLOAD` spans
//! the encrypted payload. A payload size of zero means the payload runs
//! to the end of the container; a non-zero size smaller than the
//! remaining bytes marks the legacy layout that stores the directory and
//! key string *after* the payload.

pub(crate) mod parse;
pub(crate) mod write;

pub use parse::{parse_wad, WadHead};
pub use write::{write_wad, write_wad_with_trailer};
