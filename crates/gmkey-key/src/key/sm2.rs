use std::fmt;

use sm2::{elliptic_curve::sec1::ToEncodedPoint, FieldBytes, PublicKey, SecretKey};
use zeroize::Zeroizing;

use super::Curve;
use crate::error::{Error, Result};

/// Bit length of the SM2 group order `N`
pub const ORDER_BITS: usize = 256;

/// Fixed width of an encoded scalar, `ceil(bitlen(N) / 8)`
pub const SCALAR_LEN: usize = (ORDER_BITS + 7) / 8;

/// Fixed width of an affine coordinate
pub const COORDINATE_LEN: usize = 32;

/// `0x04 || X || Y`
pub const UNCOMPRESSED_POINT_LEN: usize = 1 + 2 * COORDINATE_LEN;

/// Left-pad a big-endian integer with zeros to exactly `width` bytes
///
/// Leading zeros in `bytes` are ignored; fails when the significant bytes do
/// not fit.
pub fn pad_scalar(bytes: &[u8], width: usize) -> Result<Zeroizing<Vec<u8>>> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[start ..];

    if significant.len() > width {
        return Err(Error::InvalidKey(format!(
            "integer of {} bytes does not fit in {} bytes",
            significant.len(),
            width
        )));
    }

    let mut padded = Zeroizing::new(vec![0u8; width]);
    padded[width - significant.len() ..].copy_from_slice(significant);
    Ok(padded)
}

// ============================================================================
// Private key
// ============================================================================

/// SM2 private key: secret scalar `D` and its public point `(X, Y)`
#[derive(Clone)]
pub struct Sm2PrivateKey {
    secret: SecretKey,
    public: Sm2PublicKey,
}

impl From<SecretKey> for Sm2PrivateKey {
    fn from(secret: SecretKey) -> Self {
        let public = Sm2PublicKey {
            point: secret.public_key(),
        };
        Self { secret, public }
    }
}

impl Sm2PrivateKey {
    /// Create from a big-endian scalar of at most `SCALAR_LEN` significant bytes
    ///
    /// The scalar must lie in `[1, N-1]`.
    pub fn from_scalar_bytes(bytes: &[u8]) -> Result<Self> {
        let padded = pad_scalar(bytes, SCALAR_LEN)?;
        let secret = SecretKey::from_bytes(FieldBytes::from_slice(&padded))
            .map_err(|_| Error::InvalidKey("SM2 scalar must be in [1, N-1]".to_string()))?;
        Ok(secret.into())
    }

    /// Fixed-width big-endian encoding of `D`
    pub fn to_scalar_bytes(&self) -> [u8; SCALAR_LEN] {
        self.secret.to_bytes().into()
    }

    pub fn public_key(&self) -> &Sm2PublicKey {
        &self.public
    }

    pub fn curve(&self) -> Curve {
        Curve::Sm2
    }

    /// Underlying curve primitive
    pub fn as_secret_key(&self) -> &SecretKey {
        &self.secret
    }
}

impl PartialEq for Sm2PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.secret == other.secret && self.public == other.public
    }
}

impl Eq for Sm2PrivateKey {}

impl fmt::Debug for Sm2PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm2PrivateKey")
            .field("curve", &self.curve())
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Public key
// ============================================================================

/// SM2 public key: the point `(X, Y)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sm2PublicKey {
    point: PublicKey,
}

impl From<PublicKey> for Sm2PublicKey {
    fn from(point: PublicKey) -> Self {
        Self { point }
    }
}

impl Sm2PublicKey {
    /// Parse an SEC1 encoded point (uncompressed or compressed)
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        let point = PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| Error::InvalidKey("invalid SM2 public point".to_string()))?;
        Ok(Self { point })
    }

    /// Create from big-endian affine coordinates
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self> {
        let x = pad_scalar(x, COORDINATE_LEN)?;
        let y = pad_scalar(y, COORDINATE_LEN)?;

        let mut encoded = Vec::with_capacity(UNCOMPRESSED_POINT_LEN);
        encoded.push(0x04);
        encoded.extend_from_slice(&x);
        encoded.extend_from_slice(&y);
        Self::from_sec1_bytes(&encoded)
    }

    /// `0x04 || X || Y`, each coordinate padded to `COORDINATE_LEN`
    pub fn to_uncompressed_point(&self) -> Vec<u8> {
        self.point.to_encoded_point(false).as_bytes().to_vec()
    }

    pub fn x(&self) -> [u8; COORDINATE_LEN] {
        self.coordinate(1)
    }

    pub fn y(&self) -> [u8; COORDINATE_LEN] {
        self.coordinate(1 + COORDINATE_LEN)
    }

    fn coordinate(&self, offset: usize) -> [u8; COORDINATE_LEN] {
        let encoded = self.to_uncompressed_point();
        let mut out = [0u8; COORDINATE_LEN];
        out.copy_from_slice(&encoded[offset .. offset + COORDINATE_LEN]);
        out
    }

    pub fn curve(&self) -> Curve {
        Curve::Sm2
    }

    /// Underlying curve primitive
    pub fn as_public_key(&self) -> &PublicKey {
        &self.point
    }
}
