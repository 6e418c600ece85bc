//! src/pipeline/dispatcher.rs
//! First-match cooperative scheduler over the ordered state list.

use crate::error::WadcryptError;
use crate::pipeline::context::DecryptionContext;
use crate::pipeline::states;
use crate::stream::{InStream, OutStream};

/// The pipeline's states. The declaration order here is *the* priority
/// order and is part of the correctness contract: later pipeline stages
/// outrank earlier ones so buffered work drains before new input is
/// fetched, and the terminal states outrank everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Fail,
    End,
    WriteOut,
    Decrypt,
    SetPassphraseSession,
    ReadKeyFile,
    WadHead,
    ParseFormat,
    ReadIn,
}

const STAGE_PRIORITY: [Stage; 9] = [
    Stage::Fail,
    Stage::End,
    Stage::WriteOut,
    Stage::Decrypt,
    Stage::SetPassphraseSession,
    Stage::ReadKeyFile,
    Stage::WadHead,
    Stage::ParseFormat,
    Stage::ReadIn,
];

impl Stage {
    fn can_enter<I: InStream, O: OutStream>(self, cx: &DecryptionContext<I, O>) -> bool {
        match self {
            Stage::Fail => cx.failure.is_some(),
            Stage::End => states::end_can_enter(cx),
            Stage::WriteOut => states::write_out_can_enter(cx),
            Stage::Decrypt => states::decrypt_can_enter(cx),
            Stage::SetPassphraseSession => states::set_passphrase_session_can_enter(cx),
            Stage::ReadKeyFile => states::read_key_file_can_enter(cx),
            Stage::WadHead => states::wad_head_can_enter(cx),
            Stage::ParseFormat => states::parse_format_can_enter(cx),
            Stage::ReadIn => cx.buffer.is_empty(),
        }
    }

    fn on_enter<I: InStream, O: OutStream>(self, cx: &mut DecryptionContext<I, O>) {
        match self {
            // Terminal states are resolved by `run` before this is called.
            Stage::Fail | Stage::End => {}
            Stage::WriteOut => states::write_out_on_enter(cx),
            Stage::Decrypt => states::decrypt_on_enter(cx),
            Stage::SetPassphraseSession => states::set_passphrase_session_on_enter(cx),
            Stage::ReadKeyFile => states::read_key_file_on_enter(cx),
            Stage::WadHead => states::wad_head_on_enter(cx),
            Stage::ParseFormat => states::parse_format_on_enter(cx),
            Stage::ReadIn => states::read_in_on_enter(cx),
        }
    }
}

/// Drive the context to a terminal state.
///
/// Each step scans the priority list from the top and enters the first
/// admissible state; the scan restarts after every entry. Terminates on
/// `End` (success), `Fail` (the recorded error), or — unreachable for
/// well-formed input — a scan where nothing is admissible.
pub fn run<I: InStream, O: OutStream>(
    cx: &mut DecryptionContext<I, O>,
) -> Result<(), WadcryptError> {
    loop {
        let stage = STAGE_PRIORITY.iter().copied().find(|s| s.can_enter(cx));
        match stage {
            Some(Stage::End) => return Ok(()),
            Some(Stage::Fail) => return Err(cx.take_failure()),
            Some(stage) => stage.on_enter(cx),
            None => return Err(WadcryptError::Stalled),
        }
    }
}
