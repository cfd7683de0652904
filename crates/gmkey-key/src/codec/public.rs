use rand::{rngs::OsRng, CryptoRng, RngCore};

use super::{open_pem, seal_pem};
use crate::{
    asn1::{decode_spki, encode_spki},
    error::{Error, Result},
    key::{KeyPem, Sm2PublicKey},
    options::ExportOptions,
};
use gmkey_crypto::{encode_pem, PemBlock};

/// PEM label for public keys, plain or encrypted
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

fn require_key(key: Option<&Sm2PublicKey>) -> Result<&Sm2PublicKey> {
    key.ok_or_else(|| {
        Error::InvalidKey("invalid SM2 public key. It must be different from nil".to_string())
    })
}

// ============================================================================
// Export
// ============================================================================

/// Convert a public key to PEM
///
/// With an empty password the key is written as a plain `PUBLIC KEY` block
/// holding its `SubjectPublicKeyInfo`; otherwise the block is encrypted.
pub fn public_key_to_pem(key: Option<&Sm2PublicKey>, password: &[u8]) -> Result<String> {
    public_key_to_pem_with_options(key, password, &ExportOptions::default())
}

/// [`public_key_to_pem`] with explicit export options
pub fn public_key_to_pem_with_options(
    key: Option<&Sm2PublicKey>,
    password: &[u8],
    options: &ExportOptions,
) -> Result<String> {
    if !password.is_empty() {
        return public_key_to_encrypted_pem_with_rng(&mut OsRng, key, password, options);
    }
    let key = require_key(key)?;

    let der = encode_spki(key)?;

    tracing::debug!("exporting SM2 public key as PEM");
    let block = PemBlock::new(PUBLIC_KEY_LABEL, der);
    Ok(encode_pem(&block, options.line_ending))
}

/// Convert a public key to a password-encrypted PEM block
///
/// Unlike [`public_key_to_pem`], an empty password is an error here.
pub fn public_key_to_encrypted_pem(key: Option<&Sm2PublicKey>, password: &[u8]) -> Result<String> {
    public_key_to_encrypted_pem_with_rng(&mut OsRng, key, password, &ExportOptions::default())
}

/// [`public_key_to_encrypted_pem`] with a caller-supplied random source
pub fn public_key_to_encrypted_pem_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: Option<&Sm2PublicKey>,
    password: &[u8],
    options: &ExportOptions,
) -> Result<String> {
    let key = require_key(key)?;
    if password.is_empty() {
        return Err(Error::MissingPassword);
    }

    let der = encode_spki(key)?;

    tracing::debug!(cipher = options.cipher.name(), "exporting SM2 public key as encrypted PEM");
    seal_pem(rng, PUBLIC_KEY_LABEL, &der, password, options)
}

/// Convert a public key to `SubjectPublicKeyInfo` DER
pub fn public_key_to_der(key: Option<&Sm2PublicKey>) -> Result<Vec<u8>> {
    encode_spki(require_key(key)?)
}

// ============================================================================
// Import
// ============================================================================

/// Parse a public key from PEM, decrypting it when the block is encrypted
pub fn pem_to_public_key<T: AsRef<[u8]>>(pem: T, password: &[u8]) -> Result<Sm2PublicKey> {
    open_pem(pem.as_ref(), password, decode_spki)
}

/// Parse a public key from `SubjectPublicKeyInfo` DER
pub fn der_to_public_key(der: &[u8]) -> Result<Sm2PublicKey> {
    if der.is_empty() {
        return Err(Error::InvalidInput(
            "invalid DER. It must be different from nil".to_string(),
        ));
    }
    decode_spki(der)
}

impl KeyPem for Sm2PublicKey {
    const PEM_LABEL: &'static str = PUBLIC_KEY_LABEL;

    fn to_pem(&self, password: &[u8]) -> Result<String> {
        public_key_to_pem(Some(self), password)
    }

    fn from_pem<T: AsRef<[u8]>>(pem: T, password: &[u8]) -> Result<Self> {
        pem_to_public_key(pem, password)
    }

    fn to_der(&self) -> Result<Vec<u8>> {
        public_key_to_der(Some(self))
    }

    fn from_der(der: &[u8]) -> Result<Self> {
        der_to_public_key(der)
    }
}

#[cfg(test)]
mod tests {
    use gmkey_crypto::{decode_pem, is_encrypted_pem_block, LineEnding, PemCipher};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::key::Sm2PrivateKey;

    // openssl pkey -pubout, same key as the private codec fixture
    const OPENSSL_PEM: &str = "-----BEGIN PUBLIC KEY-----
MFkwEwYHKoZIzj0CAQYIKoEcz1UBgi0DQgAE2cjiMRleK7goOQXFoAUG5gJF4WxC
DKDSn3Q9YqvhM974Nu6hy84bW7a0MX4bpebiI6UFqMHo7bTUKVJep7GQag==
-----END PUBLIC KEY-----
";
    const OPENSSL_SCALAR: &str = "150fee598c8ddd96b6a7f6038280259417b21c56c107cf8259cacbc8e193d54b";

    const P256_PEM: &str = "-----BEGIN PUBLIC KEY-----
MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE0zmHhfWlpbYl1IDGg/L9/YdXnkSG
byVmVp3GPFy/19RvWUE700NqrBjnnVh+KFabA6z56Tu+1LJSojFfpAoW4A==
-----END PUBLIC KEY-----
";

    const ED25519_PEM: &str = "-----BEGIN PUBLIC KEY-----
MCowBQYDK2VwAyEArcPRxWl/iJHlFufSz84AihYC6IsRj/711KlROAL2Dr8=
-----END PUBLIC KEY-----
";

    fn fixture_key() -> Sm2PublicKey {
        let private =
            Sm2PrivateKey::from_scalar_bytes(&hex::decode(OPENSSL_SCALAR).unwrap()).unwrap();
        private.public_key().clone()
    }

    fn random_key() -> Sm2PublicKey {
        loop {
            if let Ok(key) = Sm2PrivateKey::from_scalar_bytes(&rand::random::<[u8; 32]>()) {
                return key.public_key().clone();
            }
        }
    }

    #[test]
    fn test_plain_export_matches_openssl() {
        let pem = public_key_to_pem(Some(&fixture_key()), b"").unwrap();
        assert_eq!(pem, OPENSSL_PEM);
        assert_eq!(pem_to_public_key(OPENSSL_PEM, b"").unwrap(), fixture_key());
    }

    #[test]
    fn test_plain_roundtrip() {
        for _ in 0 .. 8 {
            let key = random_key();
            let pem = public_key_to_pem(Some(&key), b"").unwrap();
            let imported = pem_to_public_key(&pem, b"").unwrap();
            assert_eq!(imported.x(), key.x());
            assert_eq!(imported.y(), key.y());
            assert_eq!(imported.curve(), key.curve());
        }
    }

    #[test]
    fn test_encrypted_roundtrip() {
        let key = random_key();

        let via_pem = public_key_to_pem(Some(&key), b"pw").unwrap();
        let via_entry = public_key_to_encrypted_pem(Some(&key), b"pw").unwrap();

        for pem in [&via_pem, &via_entry] {
            let block = decode_pem(pem.as_bytes()).unwrap();
            assert_eq!(block.label(), PUBLIC_KEY_LABEL);
            assert!(is_encrypted_pem_block(&block));
            assert_eq!(pem_to_public_key(pem, b"pw").unwrap(), key);
        }
    }

    #[test]
    fn test_password_errors() {
        let key = random_key();
        let pem = public_key_to_encrypted_pem(Some(&key), b"right").unwrap();

        assert!(matches!(pem_to_public_key(&pem, b""), Err(Error::MissingPassword)));
        assert!(matches!(
            pem_to_public_key(&pem, b"wrong"),
            Err(Error::DecryptionError(_))
        ));
        assert!(matches!(
            public_key_to_encrypted_pem(Some(&key), b""),
            Err(Error::MissingPassword)
        ));
    }

    #[test]
    fn test_null_key() {
        assert!(matches!(public_key_to_pem(None, b""), Err(Error::InvalidKey(_))));
        assert!(matches!(public_key_to_pem(None, b"pw"), Err(Error::InvalidKey(_))));
        assert!(matches!(public_key_to_encrypted_pem(None, b""), Err(Error::InvalidKey(_))));
        assert!(matches!(public_key_to_der(None), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert!(matches!(pem_to_public_key(b"", b""), Err(Error::InvalidInput(_))));
        assert!(matches!(pem_to_public_key("garbage", b""), Err(Error::DecodeError(_))));
        assert!(matches!(der_to_public_key(&[]), Err(Error::InvalidInput(_))));
        assert!(matches!(der_to_public_key(&[0x30, 0x00]), Err(Error::DecodeError(_))));
    }

    #[test]
    fn test_other_algorithms_rejected() {
        assert!(matches!(pem_to_public_key(P256_PEM, b""), Err(Error::TypeMismatch(_))));
        assert!(matches!(pem_to_public_key(ED25519_PEM, b""), Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn test_private_pem_is_not_a_public_key() {
        let private = Sm2PrivateKey::from_scalar_bytes(&[7]).unwrap();
        let pem = crate::codec::private_key_to_pem(Some(&private), b"").unwrap();
        assert!(pem_to_public_key(&pem, b"").is_err());
    }

    #[test]
    fn test_der_roundtrip() {
        let key = random_key();
        let der = public_key_to_der(Some(&key)).unwrap();
        assert_eq!(der.len(), 91);
        assert_eq!(der_to_public_key(&der).unwrap(), key);
    }

    #[test]
    fn test_seeded_rng_and_options() {
        let key = fixture_key();
        let options = ExportOptions::new()
            .with_cipher(PemCipher::Aes192Cbc)
            .with_line_ending(LineEnding::Crlf);

        let a = public_key_to_encrypted_pem_with_rng(
            &mut StdRng::seed_from_u64(42),
            Some(&key),
            b"pw",
            &options,
        )
        .unwrap();
        let b = public_key_to_encrypted_pem_with_rng(
            &mut StdRng::seed_from_u64(42),
            Some(&key),
            b"pw",
            &options,
        )
        .unwrap();

        assert_eq!(a, b);
        assert!(a.contains("DEK-Info: AES-192-CBC,"));
        assert!(a.contains("\r\n"));
        assert_eq!(pem_to_public_key(&a, b"pw").unwrap(), key);
    }

    #[test]
    fn test_key_pem_trait_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sm2.pub");

        let key = random_key();
        key.save_to_file(&path, b"").unwrap();
        assert_eq!(Sm2PublicKey::load_from_file(&path, b"").unwrap(), key);

        key.save_to_file(&path, b"pw").unwrap();
        assert_eq!(Sm2PublicKey::load_from_file(&path, b"pw").unwrap(), key);

        assert_eq!(Sm2PublicKey::from_der(&key.to_der().unwrap()).unwrap(), key);
        assert_eq!(Sm2PublicKey::PEM_LABEL, "PUBLIC KEY");
    }
}
