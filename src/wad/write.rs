//! src/wad/write.rs
//! WAD container writers for the encrypt path.

use crate::consts::{WAD_HEADER_LEN, WAD_IDENT_IWAD, WAD_IDENT_PWAD, WAD_KEY_LUMP, WAD_PAYLOAD_LUMP};
use crate::error::WadcryptError;
use std::io::Write;

/// Wrap `payload` in a container with the directory up front.
///
/// Layout: header, directory, key string, payload. The payload lump
/// records size zero, so the payload may run to the end of the container
/// and a reader can locate it from the buffered prefix alone.
pub fn write_wad<W: Write>(
    output: &mut W,
    key_file: &str,
    payload: &[u8],
) -> Result<(), WadcryptError> {
    let key_bytes = key_file.as_bytes();
    let dir_len = 2 * 16;
    let key_pos = (WAD_HEADER_LEN + dir_len) as u32;
    let payload_pos = key_pos + key_bytes.len() as u32;

    write_header(output, WAD_IDENT_IWAD, 2, WAD_HEADER_LEN as u32)?;
    write_dir_entry(output, key_pos, key_bytes.len() as u32, WAD_KEY_LUMP)?;
    write_dir_entry(output, payload_pos, 0, WAD_PAYLOAD_LUMP)?;
    output.write_all(key_bytes)?;
    output.write_all(payload)?;
    Ok(())
}

/// Wrap `payload` in the legacy trailer layout: payload first, key string
/// and directory after it, with the payload's real size recorded. A
/// reader must buffer the whole container to reach the directory, then
/// trim the trailing bytes off the payload.
pub fn write_wad_with_trailer<W: Write>(
    output: &mut W,
    key_file: &str,
    payload: &[u8],
) -> Result<(), WadcryptError> {
    let key_bytes = key_file.as_bytes();
    let payload_pos = WAD_HEADER_LEN as u32;
    let key_pos = payload_pos + payload.len() as u32;
    let dir_offset = key_pos + key_bytes.len() as u32;

    write_header(output, WAD_IDENT_PWAD, 2, dir_offset)?;
    output.write_all(payload)?;
    output.write_all(key_bytes)?;
    write_dir_entry(output, payload_pos, payload.len() as u32, WAD_PAYLOAD_LUMP)?;
    write_dir_entry(output, key_pos, key_bytes.len() as u32, WAD_KEY_LUMP)?;
    Ok(())
}

fn write_header<W: Write>(
    output: &mut W,
    ident: &[u8; 4],
    lump_count: u32,
    dir_offset: u32,
) -> Result<(), WadcryptError> {
    output.write_all(ident)?;
    output.write_all(&lump_count.to_le_bytes())?;
    output.write_all(&dir_offset.to_le_bytes())?;
    Ok(())
}

fn write_dir_entry<W: Write>(
    output: &mut W,
    filepos: u32,
    size: u32,
    name: &[u8; 8],
) -> Result<(), WadcryptError> {
    output.write_all(&filepos.to_le_bytes())?;
    output.write_all(&size.to_le_bytes())?;
    output.write_all(name)?;
    Ok(())
}
