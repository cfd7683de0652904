use thiserror::Error;

/// Crypto模块的错误类型
#[derive(Error, Debug)]
pub enum Error {
    /// PEM 格式错误
    #[error("PEM error: {0}")]
    PemError(#[from] pem::PemError),

    /// 加密 PEM 块缺少口令
    #[error("Encrypted PEM block requires a password")]
    MissingPassword,

    /// 不支持的对称算法
    #[error("Unsupported PEM cipher: {0}")]
    UnsupportedCipher(String),

    /// 加密头格式错误
    #[error("Malformed encryption header: {0}")]
    MalformedHeader(String),

    /// 加密失败
    #[error("Encryption error: {0}")]
    EncryptionError(String),

    /// 解密失败（口令错误或密文损坏）
    #[error("Decryption error: {0}")]
    DecryptionError(String),

    /// IO错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result类型别名
pub type Result<T> = std::result::Result<T, Error>;
