//! SM2 key import and export
//!
//! Private keys are written as PKCS#8 (`PRIVATE KEY`) or, when a password is
//! given, as a legacy encrypted PEM block around a standalone `ECPrivateKey`.
//! Public keys are written as `SubjectPublicKeyInfo` (`PUBLIC KEY`).
//!
//! ```no_run
//! use gmkey_key::{pem_to_private_key, private_key_to_pem, Sm2PrivateKey};
//!
//! # fn main() -> gmkey_key::Result<()> {
//! let key = Sm2PrivateKey::from_scalar_bytes(&[0x2a; 32])?;
//! let pem = private_key_to_pem(Some(&key), b"secret")?;
//! assert_eq!(pem_to_private_key(&pem, b"secret")?, key);
//! # Ok(())
//! # }
//! ```

pub mod asn1;
pub mod codec;
pub mod error;
pub mod key;
pub mod options;

pub use codec::{
    der_to_private_key, der_to_public_key, pem_to_private_key, pem_to_public_key,
    private_key_to_der, private_key_to_encrypted_pem, private_key_to_encrypted_pem_with_rng,
    private_key_to_pem, private_key_to_pem_with_options, public_key_to_der,
    public_key_to_encrypted_pem, public_key_to_encrypted_pem_with_rng, public_key_to_pem,
    public_key_to_pem_with_options, PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL,
};
pub use error::{Error, Result};
pub use key::{Curve, KeyPem, Sm2PrivateKey, Sm2PublicKey};
pub use options::{ExportOptions, LineEnding, PemCipher};
