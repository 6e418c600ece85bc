//! src/keyfile.rs
//! Key-file loading and unwrapping.
//!
//! A key file is an external resource whose (possibly envelope-encrypted)
//! text content becomes the passphrase for the message. References are
//! either local paths or URLs; URLs are fetched by spawning a configured
//! external tool and capturing its stdout, so the crate itself never
//! speaks a network protocol.

use crate::aliases::Passphrase;
use crate::consts::MESSAGE_TAG;
use crate::error::WadcryptError;
use crate::message::MessageReader;
use std::process::Command;

/// External HTTP fetch configuration: the tool to spawn for URL key-file
/// references, plus extra whitespace-separated arguments.
#[derive(Debug, Clone, Default)]
pub struct HttpFetch {
    pub tool_path: String,
    pub parameters: String,
}

/// Load the raw content of a key file from a local path or a URL.
pub fn load_key_from_file(
    path_or_url: &str,
    http: Option<&HttpFetch>,
) -> Result<Vec<u8>, WadcryptError> {
    if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
        let Some(http) = http else {
            return Err(WadcryptError::KeyFileLoad(
                "no HTTP fetch tool configured for URL key file".into(),
            ));
        };

        let output = Command::new(&http.tool_path)
            .args(http.parameters.split_whitespace())
            .arg(path_or_url)
            .output()
            .map_err(|e| WadcryptError::KeyFileLoad(format!("{}: {e}", http.tool_path)))?;

        if !output.status.success() {
            return Err(WadcryptError::KeyFileLoad(format!(
                "{} exited with {}",
                http.tool_path, output.status
            )));
        }
        return Ok(output.stdout);
    }

    Ok(std::fs::read(path_or_url)?)
}

/// Turn raw key-file content into the message passphrase.
///
/// Content starting with the envelope tag is decrypted with the
/// configured key-file passphrase; anything else is taken as plain text.
/// One trailing line break is trimmed either way, so key files written
/// with an editor behave the same as generated ones.
pub fn decrypt_key_file_content(
    content: &[u8],
    key_file_passphrase: Option<&Passphrase>,
) -> Result<Passphrase, WadcryptError> {
    let text = if content.first() == Some(&MESSAGE_TAG) {
        let Some(passphrase) = key_file_passphrase else {
            return Err(WadcryptError::InvalidKeyFilePassphrase);
        };

        let mut reader = MessageReader::new(Passphrase::new(passphrase.expose_secret().clone()));
        let mut buf = content.to_vec();
        reader.finish(&mut buf)?;
        String::from_utf8(buf).map_err(|_| WadcryptError::InvalidKeyFilePassphrase)?
    } else {
        String::from_utf8(content.to_vec()).map_err(|_| WadcryptError::InvalidKeyFilePassphrase)?
    };

    let trimmed = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(&text);

    Ok(Passphrase::new(trimmed.to_string()))
}
