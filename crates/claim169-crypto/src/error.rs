//! Error types for the crypto providers.

use claim169_core::Algorithm;
use thiserror::Error;

/// Errors raised by signing, verification, encryption and decryption
/// providers.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key material has the wrong length or does not parse.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Signature verification failed or the verifier rejected the input.
    #[error("signature verification failed: {0}")]
    Signature(String),

    /// The encryptor failed or produced wrong-sized output.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// AEAD tag mismatch, wrong key, or malformed ciphertext.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// The envelope names an algorithm this provider cannot handle.
    #[error("provider does not support algorithm {0}")]
    UnsupportedAlgorithm(Algorithm),
}

/// Result type for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
