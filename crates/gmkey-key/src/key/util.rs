use std::convert::TryFrom;

use der::asn1::{AnyRef, ObjectIdentifier};
use pkcs8::spki::AlgorithmIdentifierRef;

use super::{Curve, ID_EC_PUBLIC_KEY, SM2_CURVE_OID};
use crate::error::{Error, Result};

/// 检查容器中的算法标识，确认是 SM2 曲线上的 EC 密钥。
///
/// Parsing a PKCS#8 or SPKI structure succeeds for any algorithm; this is the
/// explicit tag check that rejects everything except `ecPublicKey` on SM2.
pub fn check_algorithm(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<Curve> {
    if algorithm.oid != ID_EC_PUBLIC_KEY {
        return Err(Error::TypeMismatch(format!(
            "expected an EC key ({}), found algorithm {}",
            ID_EC_PUBLIC_KEY, algorithm.oid
        )));
    }

    let params = algorithm.parameters.ok_or_else(|| {
        Error::DecodeError("EC key is missing curve parameters".to_string())
    })?;
    let curve_oid = parse_curve_oid(params)?;

    check_curve(&curve_oid)
}

/// Map a named-curve OID to a supported curve
pub fn check_curve(curve_oid: &ObjectIdentifier) -> Result<Curve> {
    if *curve_oid == SM2_CURVE_OID {
        return Ok(Curve::Sm2);
    }

    Err(Error::TypeMismatch(format!(
        "unsupported EC curve OID: {curve_oid}"
    )))
}

fn parse_curve_oid(any: AnyRef<'_>) -> Result<ObjectIdentifier> {
    ObjectIdentifier::try_from(any)
        .map_err(|e| Error::DecodeError(format!("Failed to parse curve OID: {e}")))
}
