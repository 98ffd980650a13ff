use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid key size: {0} bytes. Secret must be 16, 24, or 32 bytes")]
    InvalidKeySize(usize),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Identifier '{0}' not found")]
    IdentifierNotFound(String),

    #[error("Entry is sealed: decrypt it before changing its content")]
    EntrySealed,

    #[error("Secret not found: set ENVAULT_SECRET or create a .secret file")]
    SecretNotFound,
}

pub type Result<T> = std::result::Result<T, EnvaultError>;
