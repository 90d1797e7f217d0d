//! Error type for the credential orchestrator.

use claim169_core::CoreError;
use claim169_crypto::CryptoError;
use thiserror::Error;

/// Errors surfaced by encode, decode and inspect.
///
/// Codec-layer failures (Base45, zlib, CBOR/COSE, CWT, claim 169) arrive as
/// [`CoreError`]; provider failures (signature, encryption, decryption, key
/// parsing) as [`CryptoError`]. The remaining variants are raised by the
/// orchestrator itself.
#[derive(Debug, Error)]
pub enum Claim169Error {
    /// Codec-layer error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Crypto provider error.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Post-decode validation failed (for example a malformed date).
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested operation is misconfigured (for example encryption
    /// without a signer, or decode without any verification path).
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for orchestrator operations.
pub type Result<T> = std::result::Result<T, Claim169Error>;
