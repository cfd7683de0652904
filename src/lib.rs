//! # GM Key - 国密密钥编解码
//!
//! SM2 私钥/公钥的 PEM 与 DER 导入导出，支持口令加密的 PEM
//!
//! ## 模块
//!
//! - `gmkey_crypto` - PEM 封装、口令派生与 AES-CBC
//! - `gmkey_key` - SM2 密钥模型与编解码

// Re-export all sub-crates
pub use gmkey_crypto;
pub use gmkey_key;

pub use gmkey_key::{
    der_to_private_key, der_to_public_key, pem_to_private_key, pem_to_public_key,
    private_key_to_der, private_key_to_encrypted_pem, private_key_to_pem, public_key_to_der,
    public_key_to_encrypted_pem, public_key_to_pem, Error, ExportOptions, KeyPem, Result,
    Sm2PrivateKey, Sm2PublicKey,
};
