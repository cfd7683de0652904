use rand::{rngs::OsRng, CryptoRng, RngCore};

use super::{open_pem, seal_pem};
use crate::{
    asn1::{decode_private_key_der, encode_ec_private_key, wrap_pkcs8, EcKeyForm},
    error::{Error, Result},
    key::{KeyPem, Sm2PrivateKey},
    options::ExportOptions,
};
use gmkey_crypto::{encode_pem, PemBlock};

/// PEM label for private keys, plain or encrypted
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

fn require_key(key: Option<&Sm2PrivateKey>) -> Result<&Sm2PrivateKey> {
    key.ok_or_else(|| {
        Error::InvalidKey("invalid SM2 private key. It must be different from nil".to_string())
    })
}

// ============================================================================
// Export
// ============================================================================

/// Convert a private key to PEM
///
/// With an empty password the key is written as an unencrypted PKCS#8
/// `PRIVATE KEY` block. Otherwise this is [`private_key_to_encrypted_pem`].
pub fn private_key_to_pem(key: Option<&Sm2PrivateKey>, password: &[u8]) -> Result<String> {
    private_key_to_pem_with_options(key, password, &ExportOptions::default())
}

/// [`private_key_to_pem`] with explicit export options
pub fn private_key_to_pem_with_options(
    key: Option<&Sm2PrivateKey>,
    password: &[u8],
    options: &ExportOptions,
) -> Result<String> {
    if !password.is_empty() {
        return private_key_to_encrypted_pem_with_rng(&mut OsRng, key, password, options);
    }
    let key = require_key(key)?;

    let ec_key = encode_ec_private_key(key, EcKeyForm::Wrapped)?;
    let pkcs8 = wrap_pkcs8(&ec_key)?;

    tracing::debug!("exporting SM2 private key as PKCS#8 PEM");
    let block = PemBlock::new(PRIVATE_KEY_LABEL, pkcs8.to_vec());
    Ok(encode_pem(&block, options.line_ending))
}

/// Convert a private key to a password-encrypted PEM block
///
/// The payload is the standalone `ECPrivateKey` (curve OID included), not a
/// PKCS#8 container.
pub fn private_key_to_encrypted_pem(
    key: Option<&Sm2PrivateKey>,
    password: &[u8],
) -> Result<String> {
    private_key_to_encrypted_pem_with_rng(&mut OsRng, key, password, &ExportOptions::default())
}

/// [`private_key_to_encrypted_pem`] with a caller-supplied random source
pub fn private_key_to_encrypted_pem_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: Option<&Sm2PrivateKey>,
    password: &[u8],
    options: &ExportOptions,
) -> Result<String> {
    let key = require_key(key)?;
    if password.is_empty() {
        return Err(Error::MissingPassword);
    }

    let raw = encode_ec_private_key(key, EcKeyForm::Standalone)?;

    tracing::debug!(cipher = options.cipher.name(), "exporting SM2 private key as encrypted PEM");
    seal_pem(rng, PRIVATE_KEY_LABEL, &raw, password, options)
}

/// Convert a private key to standalone `ECPrivateKey` DER
pub fn private_key_to_der(key: Option<&Sm2PrivateKey>) -> Result<Vec<u8>> {
    let key = require_key(key)?;
    let der = encode_ec_private_key(key, EcKeyForm::Standalone)?;
    Ok(der.to_vec())
}

// ============================================================================
// Import
// ============================================================================

/// Parse a private key from PEM, decrypting it when the block is encrypted
pub fn pem_to_private_key<T: AsRef<[u8]>>(pem: T, password: &[u8]) -> Result<Sm2PrivateKey> {
    open_pem(pem.as_ref(), password, decode_private_key_der)
}

/// Parse a private key from PKCS#8 or `ECPrivateKey` DER
pub fn der_to_private_key(der: &[u8]) -> Result<Sm2PrivateKey> {
    if der.is_empty() {
        return Err(Error::InvalidInput(
            "invalid DER. It must be different from nil".to_string(),
        ));
    }
    decode_private_key_der(der)
}

impl KeyPem for Sm2PrivateKey {
    const PEM_LABEL: &'static str = PRIVATE_KEY_LABEL;

    fn to_pem(&self, password: &[u8]) -> Result<String> {
        private_key_to_pem(Some(self), password)
    }

    fn from_pem<T: AsRef<[u8]>>(pem: T, password: &[u8]) -> Result<Self> {
        pem_to_private_key(pem, password)
    }

    fn to_der(&self) -> Result<Vec<u8>> {
        private_key_to_der(Some(self))
    }

    fn from_der(der: &[u8]) -> Result<Self> {
        der_to_private_key(der)
    }
}
