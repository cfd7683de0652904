pub mod sm2;
pub mod util;

use std::{fs, path::Path};

use der::asn1::ObjectIdentifier;
use serde::{Deserialize, Serialize};

pub use self::sm2::{pad_scalar, Sm2PrivateKey, Sm2PublicKey, COORDINATE_LEN, SCALAR_LEN};
use crate::error::Result;

/// Elliptic curve public key algorithm, `1.2.840.10045.2.1`
pub const ID_EC_PUBLIC_KEY: ObjectIdentifier = const_oid::db::rfc5912::ID_EC_PUBLIC_KEY;

/// SM2 named curve, `1.2.156.10197.1.301`
pub const SM2_CURVE_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.156.10197.1.301");

/// Supported curves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// GM/T 0003 SM2 (sm2p256v1)
    Sm2,
}

impl Curve {
    /// Named curve object identifier
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Curve::Sm2 => SM2_CURVE_OID,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Curve::Sm2 => "SM2",
        }
    }

    /// Byte width of a scalar, `ceil(bitlen(N) / 8)`
    pub fn scalar_size(&self) -> usize {
        match self {
            Curve::Sm2 => SCALAR_LEN,
        }
    }

    /// Byte width of one affine coordinate
    pub fn coordinate_size(&self) -> usize {
        match self {
            Curve::Sm2 => COORDINATE_LEN,
        }
    }
}

/// PEM / DER conversion for key types
///
/// `to_pem` with a non-empty password produces an encrypted PEM block;
/// `from_pem` requires the password only when the block is encrypted.
pub trait KeyPem: Sized {
    /// Label of the PEM block this key type is written under
    const PEM_LABEL: &'static str;

    fn to_pem(&self, password: &[u8]) -> Result<String>;

    fn from_pem<T: AsRef<[u8]>>(pem: T, password: &[u8]) -> Result<Self>;

    fn to_der(&self) -> Result<Vec<u8>>;

    fn from_der(der: &[u8]) -> Result<Self>;

    /// Save the key to a PEM file
    fn save_to_file<P: AsRef<Path>>(&self, path: P, password: &[u8]) -> Result<()> {
        let pem = self.to_pem(password)?;
        fs::write(path, pem)?;
        Ok(())
    }

    /// Load a key from a PEM file
    fn load_from_file<P: AsRef<Path>>(path: P, password: &[u8]) -> Result<Self> {
        let pem = fs::read(path)?;
        Self::from_pem(pem, password)
    }
}
