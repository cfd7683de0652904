//! GM Key Cryptography Library
//!
//! This library provides the primitives the key codec builds on: PEM
//! container framing, legacy password-encrypted PEM blocks, the OpenSSL
//! password key derivation and AES-CBC.

pub mod error;

pub mod encoding;
pub mod kdf;
pub mod symmetric;

// Re-export commonly used types for convenience
pub use encoding::{
    decode_pem, decrypt_pem_block, encode_pem, encrypt_pem_block, is_encrypted_pem_block,
    LineEnding, PemBlock,
};
pub use symmetric::PemCipher;
