// Error types shared by the arithmetic and RSA layers

use thiserror::Error;

/// Errors raised by the number-theoretic and RSA operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Input outside the domain an operation is defined on
    #[error("domain error: {0}")]
    Domain(String),

    /// A bounded rejection loop ran out of attempts
    #[error("generation error: {0}")]
    Generation(String),

    /// Recovered plaintext does not fit the expected representation
    #[error("decryption error: {0}")]
    Decryption(String),

    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    #[error("arithmetic overflow: {0}")]
    Overflow(String),
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, CryptoError>;
