//! Configuration records and key forms for the encode/decode entry points.

use serde::{Deserialize, Serialize};

/// Options for the decode pipeline.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Skip parsing biometric fields (keys 50-65) to avoid allocating large
    /// byte strings. A parse-time optimization only; the signed bytes are
    /// untouched.
    pub skip_biometrics: bool,

    /// Hard cap on the decompressed credential size.
    pub max_decompressed_bytes: usize,

    /// Check `exp` / `nbf` against the clock.
    pub validate_timestamps: bool,

    /// Symmetric tolerance applied to `exp` and `nbf`, in seconds.
    pub clock_skew_tolerance_seconds: i64,

    /// Accept credentials without verifying them. Also enables the legacy
    /// untagged envelope form, and downgrades a failed verification to
    /// [`VerificationStatus::Failed`](crate::VerificationStatus::Failed)
    /// when a verifier was supplied.
    pub allow_unverified: bool,

    /// Injected clock (seconds since epoch); `None` uses the system clock.
    pub now: Option<u64>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            skip_biometrics: false,
            max_decompressed_bytes: claim169_core::deflate::DEFAULT_MAX_DECOMPRESSED_BYTES,
            validate_timestamps: true,
            clock_skew_tolerance_seconds: 0,
            allow_unverified: false,
            now: None,
        }
    }
}

/// Options for the encode pipeline.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Omit biometric fields (keys 50-65) from the encoded credential.
    pub skip_biometrics: bool,
}

/// The CWT metadata carried alongside the identity record.
///
/// Used both as encode input and as part of the decode result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CwtMeta {
    pub issuer: Option<String>,
    pub subject: Option<String>,
    pub expires_at: Option<u64>,
    pub not_before: Option<u64>,
    pub issued_at: Option<u64>,
}

/// A signing key, by form. One form per credential by construction.
#[derive(Debug, Clone)]
pub enum SignerKey {
    /// 32-byte Ed25519 private seed.
    Ed25519Seed(Vec<u8>),
    /// 32-byte ECDSA P-256 private scalar.
    EcdsaP256Scalar(Vec<u8>),
}

/// A verification key, by form. One form per decode by construction.
#[derive(Debug, Clone)]
pub enum VerifierKey {
    /// Raw 32-byte Ed25519 public key.
    Ed25519(Vec<u8>),
    /// Raw SEC1 P-256 public key, compressed (33) or uncompressed (65).
    EcdsaP256(Vec<u8>),
    /// SPKI PEM Ed25519 public key.
    Ed25519Pem(String),
    /// SPKI PEM P-256 public key.
    EcdsaP256Pem(String),
}

/// An encryption key, by form. One form per credential by construction.
#[derive(Debug, Clone)]
pub enum EncryptionKey {
    /// 32-byte AES-256-GCM key.
    Aes256(Vec<u8>),
    /// 16-byte AES-128-GCM key.
    Aes128(Vec<u8>),
}
