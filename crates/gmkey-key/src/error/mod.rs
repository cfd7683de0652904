use thiserror::Error;

/// 密钥编解码错误类型
#[derive(Error, Debug)]
pub enum Error {
    /// 导出时密钥缺失或无效
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// 导入时输入为空
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// PEM 或 DER 解析失败
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// 加密路径缺少口令
    #[error("Encrypted key requires a password")]
    MissingPassword,

    /// 口令错误或密文损坏
    #[error("Decryption error: {0}")]
    DecryptionError(String),

    /// ASN.1 结构构造或加密失败
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// 解析成功但不是 SM2 密钥
    #[error("Key type mismatch: {0}")]
    TypeMismatch(String),

    /// IO错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<gmkey_crypto::error::Error> for Error {
    fn from(err: gmkey_crypto::error::Error) -> Self {
        use gmkey_crypto::error::Error as CryptoError;

        match err {
            CryptoError::PemError(e) => Error::DecodeError(format!("Failed to decode PEM: {}", e)),
            CryptoError::MalformedHeader(msg) => Error::DecodeError(msg),
            CryptoError::MissingPassword => Error::MissingPassword,
            CryptoError::UnsupportedCipher(name) => {
                Error::DecryptionError(format!("Unsupported PEM cipher: {}", name))
            }
            CryptoError::DecryptionError(msg) => Error::DecryptionError(msg),
            CryptoError::EncryptionError(msg) => Error::EncodingError(msg),
            CryptoError::IoError(e) => Error::IoError(e),
        }
    }
}

/// Result类型别名
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_error_mapping() {
        use gmkey_crypto::error::Error as CryptoError;

        assert!(matches!(Error::from(CryptoError::MissingPassword), Error::MissingPassword));
        assert!(matches!(
            Error::from(CryptoError::DecryptionError("bad padding".into())),
            Error::DecryptionError(_)
        ));
        assert!(matches!(
            Error::from(CryptoError::EncryptionError("rng".into())),
            Error::EncodingError(_)
        ));
        assert!(matches!(
            Error::from(CryptoError::MalformedHeader("no DEK-Info".into())),
            Error::DecodeError(_)
        ));
    }
}
