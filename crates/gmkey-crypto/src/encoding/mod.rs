//! Key container encodings
//!
//! This module provides the PEM container framing used for key material,
//! including the legacy password-encrypted form.

pub mod pem_block;

pub use pem_block::{
    decode_pem, decrypt_pem_block, encode_pem, encrypt_pem_block, is_encrypted_pem_block,
    load_pem_from_file, save_pem_to_file, LineEnding, PemBlock,
};
