//! Symmetric encryption algorithms
//!
//! Block ciphers in CBC mode as used by the legacy encrypted-PEM convention.

pub mod cbc;

pub use self::cbc::{PemCipher, BLOCK_SIZE};
