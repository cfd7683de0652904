//! Export configuration
//!
//! `ExportOptions` can be embedded in a caller's configuration file; every
//! field has a default.

pub use gmkey_crypto::{LineEnding, PemCipher};
use serde::{Deserialize, Serialize};

/// Options controlling PEM output
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Cipher for password-protected output
    pub cipher: PemCipher,
    /// Line ending of the PEM text
    pub line_ending: LineEnding,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cipher(mut self, cipher: PemCipher) -> Self {
        self.cipher = cipher;
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}
