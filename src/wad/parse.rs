//! src/wad/parse.rs
//! WAD header/directory parsing over a buffered prefix of the stream.

use crate::consts::{
    WAD_DIR_ENTRY_LEN, WAD_HEADER_LEN, WAD_IDENT_IWAD, WAD_IDENT_PWAD, WAD_KEY_LUMP,
    WAD_PAYLOAD_LUMP,
};
use crate::error::WadcryptError;

/// Parsed container head: where the payload lives and which key file the
/// archive references.
pub struct WadHead {
    pub payload_offset: u32,
    pub payload_size: u32,
    pub key_file: String,
}

/// Parse the container from a buffered prefix.
///
/// The caller feeds a growing prefix of the stream; anything the parser
/// cannot reach yet is reported as [`WadcryptError::InvalidOrIncompleteWad`],
/// the same code a malformed container gets. The WADHead pipeline state
/// tells the two apart by whether the input is at EOF.
pub fn parse_wad(bytes: &[u8]) -> Result<WadHead, WadcryptError> {
    if bytes.len() < WAD_HEADER_LEN {
        return Err(WadcryptError::InvalidOrIncompleteWad);
    }

    let ident = &bytes[0..4];
    if ident != WAD_IDENT_IWAD && ident != WAD_IDENT_PWAD {
        return Err(WadcryptError::InvalidOrIncompleteWad);
    }

    let lump_count = read_u32_le(bytes, 4);
    let dir_offset = read_u32_le(bytes, 8);

    // Directory must be fully buffered before any entry is trusted.
    let dir_end = dir_offset as u64 + lump_count as u64 * WAD_DIR_ENTRY_LEN as u64;
    if dir_end > bytes.len() as u64 {
        return Err(WadcryptError::InvalidOrIncompleteWad);
    }

    let mut key_file = String::new();
    let mut payload: Option<(u32, u32)> = None;

    for i in 0..lump_count as usize {
        let entry = dir_offset as usize + i * WAD_DIR_ENTRY_LEN;
        let filepos = read_u32_le(bytes, entry);
        let size = read_u32_le(bytes, entry + 4);
        let name = &bytes[entry + 8..entry + 16];

        if name == WAD_KEY_LUMP {
            let end = filepos as u64 + size as u64;
            if end > bytes.len() as u64 {
                return Err(WadcryptError::InvalidOrIncompleteWad);
            }
            key_file = String::from_utf8(bytes[filepos as usize..end as usize].to_vec())
                .map_err(|_| WadcryptError::InvalidOrIncompleteWad)?;
        } else if name == WAD_PAYLOAD_LUMP {
            payload = Some((filepos, size));
        }
    }

    let Some((payload_offset, payload_size)) = payload else {
        return Err(WadcryptError::InvalidOrIncompleteWad);
    };

    // The head stage erases everything before the payload, so the prefix
    // must already cover it.
    if payload_offset as u64 > bytes.len() as u64 {
        return Err(WadcryptError::InvalidOrIncompleteWad);
    }

    Ok(WadHead {
        payload_offset,
        payload_size,
        key_file,
    })
}

#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(raw)
}
