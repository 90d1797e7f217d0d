//! Error types for the core codecs.

use thiserror::Error;

/// Errors raised by the codec layers (Base45, zlib, CBOR, COSE, CWT, schema).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input contains characters outside the Base45 alphabet, or has an
    /// invalid length (length mod 3 == 1 is never a valid encoding).
    #[error("base45 decode error: {0}")]
    Base45Decode(String),

    /// zlib stream is malformed or would inflate past the configured cap.
    #[error("decompress error: {0}")]
    Decompress(String),

    /// CBOR is malformed, the COSE tag or array shape is wrong, or the
    /// algorithm is not one this library supports.
    #[error("COSE parse error: {0}")]
    CoseParse(String),

    /// CWT map is structurally wrong, an enum field is out of range, or the
    /// timestamps are inverted (exp < nbf or exp < iat).
    #[error("CWT parse error: {0}")]
    CwtParse(String),

    /// The CWT decoded fine but carries no claim 169.
    #[error("claim 169 not found in CWT")]
    Claim169NotFound,

    /// The credential is expired (now > exp + skew).
    #[error("credential expired at {exp} (now {now})")]
    Expired { exp: u64, now: u64 },

    /// The credential is not yet valid (now < nbf - skew).
    #[error("credential not valid before {nbf} (now {now})")]
    NotYetValid { nbf: u64, now: u64 },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
