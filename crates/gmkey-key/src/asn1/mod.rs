//! ASN.1 structures for SM2 keys
//!
//! ```ASN.1
//! ECPrivateKey ::= SEQUENCE {
//!   version        INTEGER { ecPrivkeyVer1(1) } (ecPrivkeyVer1),
//!   privateKey     OCTET STRING,
//!   parameters [0] EXPLICIT OBJECT IDENTIFIER OPTIONAL,
//!   publicKey  [1] EXPLICIT BIT STRING OPTIONAL
//! }
//!
//! PrivateKeyInfo ::= SEQUENCE {
//!   version              INTEGER (0),
//!   privateKeyAlgorithm  SEQUENCE { ecPublicKey, sm2 },
//!   privateKey           OCTET STRING  -- DER of ECPrivateKey
//! }
//! ```
//!
//! Which optional fields are present is fixed by [`EcKeyForm`]: other PKI
//! tooling expects the curve OID to be absent inside a PKCS#8 container and
//! present in a self-describing EC key.

use der::{
    asn1::{AnyRef, BitStringRef, ObjectIdentifier, OctetStringRef},
    Decode, Encode, Sequence,
};
use pkcs8::{
    spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef},
    PrivateKeyInfo,
};
use zeroize::Zeroizing;

use crate::{
    error::{Error, Result},
    key::{util, Sm2PrivateKey, Sm2PublicKey, ID_EC_PUBLIC_KEY, SM2_CURVE_OID},
};

/// `ecPrivkeyVer1`
pub const EC_PRIVATE_KEY_VERSION: u8 = 1;

/// `ECPrivateKey` as laid out on the wire
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct EcPrivateKeyDer<'a> {
    pub version: u8,
    pub private_key: OctetStringRef<'a>,
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    pub named_curve: Option<ObjectIdentifier>,
    #[asn1(context_specific = "1", tag_mode = "EXPLICIT", optional = "true")]
    pub public_key: Option<BitStringRef<'a>>,
}

/// The two encodings of an SM2 private key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EcKeyForm {
    /// Inner key of a PKCS#8 container; the container names the curve, so
    /// `parameters` is omitted. The public point is kept.
    Wrapped,
    /// Self-describing key (the payload of an encrypted PEM block); carries
    /// both the curve OID and the public point.
    Standalone,
}

impl EcKeyForm {
    fn named_curve(&self) -> Option<ObjectIdentifier> {
        match self {
            EcKeyForm::Wrapped => None,
            EcKeyForm::Standalone => Some(SM2_CURVE_OID),
        }
    }
}

fn encoding_error(context: &str) -> impl Fn(der::Error) -> Error + '_ {
    move |e| Error::EncodingError(format!("{}: {}", context, e))
}

fn sm2_algorithm(curve: &ObjectIdentifier) -> AlgorithmIdentifierRef<'_> {
    AlgorithmIdentifierRef {
        oid: ID_EC_PUBLIC_KEY,
        parameters: Some(AnyRef::from(curve)),
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode `key` as an `ECPrivateKey` in the given form
///
/// `privateKey` is always `SCALAR_LEN` bytes, zero-padded on the left.
pub fn encode_ec_private_key(key: &Sm2PrivateKey, form: EcKeyForm) -> Result<Zeroizing<Vec<u8>>> {
    let scalar = Zeroizing::new(key.to_scalar_bytes());
    let point = key.public_key().to_uncompressed_point();

    let ec_key = EcPrivateKeyDer {
        version: EC_PRIVATE_KEY_VERSION,
        private_key: OctetStringRef::new(scalar.as_slice())
            .map_err(encoding_error("Failed to encode SM2 scalar"))?,
        named_curve: form.named_curve(),
        public_key: Some(
            BitStringRef::from_bytes(&point)
                .map_err(encoding_error("Failed to encode SM2 public point"))?,
        ),
    };

    let der = ec_key
        .to_der()
        .map_err(encoding_error("error marshaling SM2 key to asn1"))?;
    Ok(Zeroizing::new(der))
}

/// Wrap an `ECPrivateKey` (wrapped form) in a PKCS#8 `PrivateKeyInfo`
pub fn wrap_pkcs8(ec_key_der: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let curve = SM2_CURVE_OID;
    let info = PrivateKeyInfo::new(sm2_algorithm(&curve), ec_key_der);

    let der = info
        .to_der()
        .map_err(encoding_error("error marshaling EC key to PKCS#8"))?;
    Ok(Zeroizing::new(der))
}

/// Encode `key` as a `SubjectPublicKeyInfo`
pub fn encode_spki(key: &Sm2PublicKey) -> Result<Vec<u8>> {
    let curve = SM2_CURVE_OID;
    let point = key.to_uncompressed_point();

    let spki = SubjectPublicKeyInfoRef {
        algorithm: sm2_algorithm(&curve),
        subject_public_key: BitStringRef::from_bytes(&point)
            .map_err(encoding_error("Failed to encode SM2 public point"))?,
    };

    spki.to_der()
        .map_err(encoding_error("error marshaling SM2 public key to SPKI"))
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode an SM2 private key from PKCS#8 or standalone `ECPrivateKey` DER
pub fn decode_private_key_der(der: &[u8]) -> Result<Sm2PrivateKey> {
    match PrivateKeyInfo::try_from(der) {
        Ok(info) => {
            util::check_algorithm(&info.algorithm)?;
            let ec_key = EcPrivateKeyDer::from_der(info.private_key).map_err(|e| {
                Error::DecodeError(format!("Failed to parse EC key inside PKCS#8: {}", e))
            })?;
            tracing::debug!("parsed PKCS#8 SM2 private key");
            ec_key_to_private_key(&ec_key)
        }
        Err(pkcs8_err) => {
            let ec_key = EcPrivateKeyDer::from_der(der).map_err(|_| {
                Error::DecodeError(format!(
                    "not a PKCS#8 or EC private key: {}",
                    pkcs8_err
                ))
            })?;
            tracing::debug!("parsed standalone SM2 private key");
            ec_key_to_private_key(&ec_key)
        }
    }
}

fn ec_key_to_private_key(ec_key: &EcPrivateKeyDer<'_>) -> Result<Sm2PrivateKey> {
    if ec_key.version != EC_PRIVATE_KEY_VERSION {
        return Err(Error::DecodeError(format!(
            "unknown EC private key version {}",
            ec_key.version
        )));
    }

    if let Some(curve) = &ec_key.named_curve {
        util::check_curve(curve)?;
    }

    let key = Sm2PrivateKey::from_scalar_bytes(ec_key.private_key.as_bytes())
        .map_err(|e| Error::DecodeError(format!("invalid SM2 private scalar: {}", e)))?;

    if let Some(bits) = &ec_key.public_key {
        let point = bits.as_bytes().ok_or_else(|| {
            Error::DecodeError("EC public key bit string is not octet aligned".to_string())
        })?;
        let embedded = Sm2PublicKey::from_sec1_bytes(point)
            .map_err(|e| Error::DecodeError(format!("invalid embedded public key: {}", e)))?;

        if &embedded != key.public_key() {
            return Err(Error::DecodeError(
                "embedded public key does not match the private scalar".to_string(),
            ));
        }
    }

    Ok(key)
}

/// Decode an SM2 public key from `SubjectPublicKeyInfo` DER
pub fn decode_spki(der: &[u8]) -> Result<Sm2PublicKey> {
    let spki = SubjectPublicKeyInfoRef::try_from(der)
        .map_err(|e| Error::DecodeError(format!("Failed to parse SPKI: {}", e)))?;

    util::check_algorithm(&spki.algorithm)?;

    let point = spki.subject_public_key.as_bytes().ok_or_else(|| {
        Error::DecodeError("SPKI public key bit string is not octet aligned".to_string())
    })?;

    Sm2PublicKey::from_sec1_bytes(point)
        .map_err(|e| Error::DecodeError(format!("invalid SM2 public key: {}", e)))
}
