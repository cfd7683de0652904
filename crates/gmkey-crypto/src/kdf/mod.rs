//! Password key derivation for encrypted PEM blocks
//!
//! Legacy encrypted PEM (RFC 1421 style, as written by OpenSSL's
//! `PEM_write_bio_*` and Go's `x509.EncryptPEMBlock`) derives the cipher key
//! with OpenSSL's `EVP_BytesToKey`: MD5, one iteration, salted with the first
//! eight bytes of the IV.

use md5::{Digest, Md5};
use zeroize::Zeroizing;

/// Number of IV bytes used as the derivation salt
pub const SALT_LEN: usize = 8;

/// Derive `key_len` bytes of key material from `password` and `salt`
///
/// ```text
/// D_1 = MD5(password || salt)
/// D_i = MD5(D_{i-1} || password || salt)
/// key = D_1 || D_2 || ...  (truncated to key_len)
/// ```
pub fn bytes_to_key(password: &[u8], salt: &[u8], key_len: usize) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(Vec::with_capacity(key_len));
    let mut previous = Zeroizing::new(Vec::new());

    while key.len() < key_len {
        let mut hasher = Md5::new();
        hasher.update(previous.as_slice());
        hasher.update(password);
        hasher.update(salt);
        let digest = hasher.finalize();

        let take = (key_len - key.len()).min(digest.len());
        key.extend_from_slice(&digest[.. take]);

        previous.clear();
        previous.extend_from_slice(&digest);
    }

    key
}
