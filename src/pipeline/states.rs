//! src/pipeline/states.rs
//! Admission predicates and actions for every pipeline state.
//!
//! A "need more bytes" outcome is never an error here: ParseFormat and
//! WadHead park what they have in `pending` and return without acting,
//! the dispatcher falls through to ReadIn, and the next chunk resumes
//! them. Real errors go through `DecryptionContext::fail`.

use crate::consts::{WAD_IDENT_IWAD, WAD_IDENT_PWAD};
use crate::error::WadcryptError;
use crate::keyfile::{decrypt_key_file_content, load_key_from_file};
use crate::pipeline::context::{DecryptionContext, Format};
use crate::pipeline::session::DecryptionSession;
use crate::stream::{InStream, OutStream};
use crate::wad::parse_wad;
use std::mem;

// ── ReadIn ───────────────────────────────────────────────────────────────

pub(crate) fn read_in_on_enter<I: InStream, O: OutStream>(cx: &mut DecryptionContext<I, O>) {
    cx.buffer.resize(cx.config.read_chunk_size.max(1), 0);
    match cx.input.read(&mut cx.buffer) {
        Ok(n) => cx.buffer.truncate(n),
        Err(e) => {
            cx.buffer.clear();
            cx.fail(e);
        }
    }
    // Each fresh chunk traverses the filter pipeline from pass 0.
    cx.filter_count = 0;
}

// ── End ──────────────────────────────────────────────────────────────────

pub(crate) fn end_can_enter<I: InStream, O: OutStream>(cx: &DecryptionContext<I, O>) -> bool {
    cx.input.is_eof() && cx.buffer.is_empty() && cx.pending.is_empty()
}

// ── ParseFormat ──────────────────────────────────────────────────────────

pub(crate) fn parse_format_can_enter<I: InStream, O: OutStream>(
    cx: &DecryptionContext<I, O>,
) -> bool {
    match cx.format {
        Format::Unknown => {}
        Format::MessageOrNestedWad if cx.filter_count == 1 => {}
        _ => return false,
    }
    // Admissible only when there is something new to chew on: fresh bytes
    // in the working buffer, or EOF forcing a decision on what is parked
    // in `pending`. Otherwise control falls through to ReadIn.
    !cx.buffer.is_empty() || (cx.input.is_eof() && !cx.pending.is_empty())
}

pub(crate) fn parse_format_on_enter<I: InStream, O: OutStream>(cx: &mut DecryptionContext<I, O>) {
    let required_bytes = if cx.filter_count == 1 { 4 } else { 1 };
    cx.pending.append(&mut cx.buffer);

    // We need more bytes
    if cx.pending.len() < required_bytes && !cx.input.is_eof() {
        return;
    }

    if cx.filter_count == 0 {
        let b = cx.pending[0];
        if b & 0x80 != 0 && b != 0xEF {
            // The leading byte matches an envelope tag.
            cx.format = if cx.metadata.key_only {
                Format::MessageByKeyFile
            } else {
                Format::MessageOrNestedWad
            };
        } else {
            // WAD archives start with ASCII I or P, whose high bit is clear.
            cx.format = Format::Wad;
        }
    } else {
        let marker = cx.pending.get(..4);
        cx.format = match marker {
            Some(m) if m == WAD_IDENT_IWAD || m == WAD_IDENT_PWAD => Format::NestedWad,
            _ => Format::Message,
        };
    }

    mem::swap(&mut cx.buffer, &mut cx.pending);
}

// ── SetPassphraseSession ─────────────────────────────────────────────────

pub(crate) fn set_passphrase_session_can_enter<I: InStream, O: OutStream>(
    cx: &DecryptionContext<I, O>,
) -> bool {
    matches!(cx.format, Format::Message | Format::MessageOrNestedWad)
        && cx.passphrase_session.is_none()
}

pub(crate) fn set_passphrase_session_on_enter<I: InStream, O: OutStream>(
    cx: &mut DecryptionContext<I, O>,
) {
    cx.passphrase_session = Some(DecryptionSession::from_passphrase(&cx.config.passphrase));
}

// ── ReadKeyFile ──────────────────────────────────────────────────────────

pub(crate) fn read_key_file_can_enter<I: InStream, O: OutStream>(
    cx: &DecryptionContext<I, O>,
) -> bool {
    if cx.key_file_session.is_some() {
        return false;
    }
    match cx.format {
        Format::MessageByKeyFile => true,
        Format::Wad | Format::NestedWad => cx.wad_head_finished,
        _ => false,
    }
}

pub(crate) fn read_key_file_on_enter<I: InStream, O: OutStream>(cx: &mut DecryptionContext<I, O>) {
    if cx.metadata.key_file.is_empty() {
        cx.fail(WadcryptError::KeyFileNotSpecified);
        return;
    }

    let content = match load_key_from_file(&cx.metadata.key_file, cx.config.http_fetch.as_ref()) {
        Ok(content) => content,
        Err(e) => {
            cx.fail(e);
            return;
        }
    };

    match decrypt_key_file_content(&content, cx.config.key_file_passphrase.as_ref()) {
        Ok(passphrase) => {
            cx.key_file_session = Some(DecryptionSession::from_passphrase(&passphrase));
        }
        Err(_) => cx.fail(WadcryptError::InvalidKeyFilePassphrase),
    }
}

// ── WadHead ──────────────────────────────────────────────────────────────

pub(crate) fn wad_head_can_enter<I: InStream, O: OutStream>(cx: &DecryptionContext<I, O>) -> bool {
    if cx.wad_head_finished {
        return false;
    }
    // Same progress rule as ParseFormat: new bytes, or EOF forcing the
    // parked prefix to parse or fail.
    if cx.buffer.is_empty() && !(cx.input.is_eof() && !cx.pending.is_empty()) {
        return false;
    }
    matches!(cx.format, Format::Wad | Format::NestedWad)
}

pub(crate) fn wad_head_on_enter<I: InStream, O: OutStream>(cx: &mut DecryptionContext<I, O>) {
    cx.pending.append(&mut cx.buffer);

    let head = match parse_wad(&cx.pending) {
        Ok(head) => head,
        Err(WadcryptError::InvalidOrIncompleteWad) => {
            if cx.input.is_eof() {
                cx.fail(WadcryptError::InvalidOrIncompleteWad);
            }
            return;
        }
        Err(e) => {
            cx.fail(e);
            return;
        }
    };

    if cx.metadata.key_file.is_empty() {
        cx.metadata.key_file = head.key_file;
    }

    mem::swap(&mut cx.buffer, &mut cx.pending);
    cx.buffer.drain(..head.payload_offset as usize);
    let payload_size = head.payload_size as usize;
    if payload_size != 0 && payload_size < cx.buffer.len() {
        // Legacy layout: the key string and directory sit after the
        // payload and must be trimmed off.
        cx.buffer.truncate(payload_size);
    }
    cx.wad_head_finished = true;
}

// ── Decrypt ──────────────────────────────────────────────────────────────

pub(crate) fn decrypt_can_enter<I: InStream, O: OutStream>(cx: &DecryptionContext<I, O>) -> bool {
    if cx.filter_count > 1 {
        return false;
    }

    let session_ready = match cx.format {
        Format::Empty | Format::Unknown => false,

        Format::Message | Format::MessageOrNestedWad => {
            cx.passphrase_session.is_some() && cx.filter_count == 0
        }

        Format::MessageByKeyFile => cx.key_file_session.is_some() && cx.filter_count == 0,

        Format::Wad => {
            cx.wad_head_finished && cx.key_file_session.is_some() && cx.filter_count == 0
        }

        Format::NestedWad => {
            cx.passphrase_session.is_some()
                && !(cx.filter_count == 1
                    && (!cx.wad_head_finished || cx.key_file_session.is_none()))
        }
    };

    session_ready && !cx.buffer.is_empty()
}

pub(crate) fn decrypt_on_enter<I: InStream, O: OutStream>(cx: &mut DecryptionContext<I, O>) {
    let session = match cx.format {
        Format::Message | Format::MessageOrNestedWad => cx.passphrase_session.as_mut(),

        Format::NestedWad => {
            if cx.filter_count == 0 {
                cx.passphrase_session.as_mut()
            } else {
                cx.key_file_session.as_mut()
            }
        }

        _ => cx.key_file_session.as_mut(),
    };
    let reader = &mut session
        .expect("Decrypt admitted only with the selected session present")
        .reader;

    let result = if cx.input.is_eof() {
        reader.finish(&mut cx.buffer)
    } else {
        reader.update(&mut cx.buffer)
    };
    if let Err(e) = result {
        cx.fail(e);
    }
    cx.filter_count += 1;
}

// ── WriteOut ─────────────────────────────────────────────────────────────

pub(crate) fn write_out_can_enter<I: InStream, O: OutStream>(cx: &DecryptionContext<I, O>) -> bool {
    if cx.buffer.is_empty() {
        return false;
    }

    match cx.format {
        Format::Empty | Format::Unknown | Format::MessageOrNestedWad => false,

        Format::Message | Format::MessageByKeyFile | Format::Wad => cx.filter_count == 1,

        Format::NestedWad => cx.filter_count == 2,
    }
}

pub(crate) fn write_out_on_enter<I: InStream, O: OutStream>(cx: &mut DecryptionContext<I, O>) {
    if let Err(e) = cx.output.write(&cx.buffer) {
        cx.fail(e);
        return;
    }
    cx.buffer.clear();
}
