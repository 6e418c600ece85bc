// src/aliases.rs

//! Global secure type aliases.
//!
//! Every key, IV, salt and passphrase in the crate lives behind a
//! `secure-gate` alias so it is zeroed on drop and never printed.

use secure_gate::{dynamic_alias, fixed_alias};

// ─────────────────────────────────────────────────────────────────────────────
// Core secrets — must stay separate
// ─────────────────────────────────────────────────────────────────────────────
fixed_alias!(Aes256Key, 32); // Derived envelope key (AES + HMAC)
fixed_alias!(Iv16, 16); // Public IV from the envelope header
fixed_alias!(Salt16, 16); // PBKDF2 salt from the envelope header
fixed_alias!(PlainTextBlock16, 16); // Decrypted blocks in the stream loops

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
dynamic_alias!(Passphrase, String);

// Re-exported crypto primitives — users get them from the same `aliases::*` import
pub use crate::crypto::hmac::{HmacSha256, HmacSha512};
