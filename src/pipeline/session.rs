//! src/pipeline/session.rs

use crate::aliases::Passphrase;
use crate::message::MessageReader;

/// One decryption envelope's worth of state: a stateful reader whose key
/// service owns the passphrase it decrypts with.
///
/// The context holds at most one passphrase session and one key-file
/// session per run, each created exactly once.
pub struct DecryptionSession {
    pub reader: MessageReader,
}

impl DecryptionSession {
    pub fn from_passphrase(passphrase: &Passphrase) -> Self {
        Self {
            reader: MessageReader::new(Passphrase::new(passphrase.expose_secret().clone())),
        }
    }
}
