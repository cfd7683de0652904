//! AES-CBC with PKCS#7 padding
//!
//! Provides the block ciphers that may appear in a `DEK-Info` header.

use std::{fmt, str::FromStr};

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// AES block size, which is also the IV length
pub const BLOCK_SIZE: usize = 16;

/// Cipher named in the `DEK-Info` header of an encrypted PEM block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PemCipher {
    #[serde(rename = "AES-128-CBC")]
    Aes128Cbc,
    #[serde(rename = "AES-192-CBC")]
    Aes192Cbc,
    #[default]
    #[serde(rename = "AES-256-CBC")]
    Aes256Cbc,
}

impl PemCipher {
    /// Name as written in `DEK-Info`
    pub fn name(&self) -> &'static str {
        match self {
            PemCipher::Aes128Cbc => "AES-128-CBC",
            PemCipher::Aes192Cbc => "AES-192-CBC",
            PemCipher::Aes256Cbc => "AES-256-CBC",
        }
    }

    /// Key length in bytes
    pub fn key_size(&self) -> usize {
        match self {
            PemCipher::Aes128Cbc => 16,
            PemCipher::Aes192Cbc => 24,
            PemCipher::Aes256Cbc => 32,
        }
    }

    /// IV length in bytes
    pub fn iv_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Encrypt `plaintext`, appending PKCS#7 padding
    pub fn encrypt(&self, key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let ciphertext = match self {
            PemCipher::Aes128Cbc => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
                .map_err(|e| Error::EncryptionError(format!("AES-128-CBC init failed: {}", e)))?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            PemCipher::Aes192Cbc => cbc::Encryptor::<Aes192>::new_from_slices(key, iv)
                .map_err(|e| Error::EncryptionError(format!("AES-192-CBC init failed: {}", e)))?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            PemCipher::Aes256Cbc => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
                .map_err(|e| Error::EncryptionError(format!("AES-256-CBC init failed: {}", e)))?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        };
        Ok(ciphertext)
    }

    /// Decrypt `ciphertext` and strip PKCS#7 padding
    ///
    /// A padding failure almost always means the password was wrong.
    pub fn decrypt(&self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(Error::DecryptionError(format!(
                "ciphertext length {} is not a multiple of the block size",
                ciphertext.len()
            )));
        }

        let plaintext = match self {
            PemCipher::Aes128Cbc => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
                .map_err(|e| Error::DecryptionError(format!("AES-128-CBC init failed: {}", e)))?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            PemCipher::Aes192Cbc => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)
                .map_err(|e| Error::DecryptionError(format!("AES-192-CBC init failed: {}", e)))?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            PemCipher::Aes256Cbc => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
                .map_err(|e| Error::DecryptionError(format!("AES-256-CBC init failed: {}", e)))?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        };

        plaintext.map_err(|_| Error::DecryptionError("invalid padding, incorrect password?".to_string()))
    }
}

impl fmt::Display for PemCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PemCipher {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "AES-128-CBC" => Ok(PemCipher::Aes128Cbc),
            "AES-192-CBC" => Ok(PemCipher::Aes192Cbc),
            "AES-256-CBC" => Ok(PemCipher::Aes256Cbc),
            other => Err(Error::UnsupportedCipher(other.to_string())),
        }
    }
}
