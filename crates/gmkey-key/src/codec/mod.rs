//! PEM / DER import and export of SM2 keys
//!
//! Exporters build DER, optionally encrypt it under a password, and frame it
//! as PEM. Importers reverse the steps and finish with an algorithm check so
//! that a well-formed key of another type is reported as `TypeMismatch`.

pub mod private;
pub mod public;

use gmkey_crypto::{
    decode_pem, decrypt_pem_block, encode_pem, encrypt_pem_block, is_encrypted_pem_block,
};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

pub use self::{
    private::{
        der_to_private_key, pem_to_private_key, private_key_to_der, private_key_to_encrypted_pem,
        private_key_to_encrypted_pem_with_rng, private_key_to_pem,
        private_key_to_pem_with_options, PRIVATE_KEY_LABEL,
    },
    public::{
        der_to_public_key, pem_to_public_key, public_key_to_der, public_key_to_encrypted_pem,
        public_key_to_encrypted_pem_with_rng, public_key_to_pem, public_key_to_pem_with_options,
        PUBLIC_KEY_LABEL,
    },
};
use crate::{
    error::{Error, Result},
    options::ExportOptions,
};

/// Encrypt `der` under `password` and frame it as PEM text
fn seal_pem<R: RngCore + CryptoRng>(
    rng: &mut R,
    label: &str,
    der: &[u8],
    password: &[u8],
    options: &ExportOptions,
) -> Result<String> {
    let block = encrypt_pem_block(rng, label, der, password, options.cipher)?;
    Ok(encode_pem(&block, options.line_ending))
}

/// Decode PEM text, decrypt it when needed, and hand the DER to `parse`
fn open_pem<T, F>(pem: &[u8], password: &[u8], parse: F) -> Result<T>
where
    F: Fn(&[u8]) -> Result<T>,
{
    if pem.is_empty() {
        return Err(Error::InvalidInput(
            "invalid PEM. It must be different from nil".to_string(),
        ));
    }

    let block = decode_pem(pem)?;
    let encrypted = is_encrypted_pem_block(&block);
    tracing::debug!(label = block.label(), encrypted, "decoded PEM block");

    if !encrypted {
        return parse(block.contents()).map_err(rejected);
    }

    if password.is_empty() {
        tracing::warn!(label = block.label(), "encrypted PEM block supplied without a password");
        return Err(Error::MissingPassword);
    }

    let decrypted = Zeroizing::new(decrypt_pem_block(&block, password).map_err(|e| {
        tracing::warn!(label = block.label(), "PEM block decryption failed");
        Error::from(e)
    })?);

    // Garbage that happened to unpad cleanly: the password was wrong.
    parse(&decrypted).map_err(|e| {
        rejected(match e {
            Error::DecodeError(msg) => Error::DecryptionError(format!(
                "decrypted data is not a valid key, incorrect password? ({})",
                msg
            )),
            other => other,
        })
    })
}

fn rejected(err: Error) -> Error {
    tracing::warn!(error = %err, "rejected key material");
    err
}
