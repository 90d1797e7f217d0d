//! Header-level credential inspection.
//!
//! `inspect` peels the Base45/zlib/CBOR layers and reports what the COSE
//! envelope exposes without verifying anything. It never decrypts, so
//! for an Encrypt0 credential only the header fields are populated.

use serde::{Deserialize, Serialize};

use claim169_core::{base45, cbor, deflate, CwtClaims, Envelope};

use crate::error::Result;
use crate::options::DecodeOptions;

/// The COSE envelope kind found at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoseType {
    Sign1,
    Encrypt0,
}

impl CoseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoseType::Sign1 => "Sign1",
            CoseType::Encrypt0 => "Encrypt0",
        }
    }
}

impl std::fmt::Display for CoseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a credential reveals without verification or decryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectResult {
    /// Envelope kind (tag 18 or tag 16).
    pub cose_type: CoseType,
    /// Algorithm name from the protected header, when present.
    pub algorithm: Option<String>,
    /// Key identifier from the unprotected header, when present.
    pub key_id: Option<Vec<u8>>,
    /// CWT issuer; `None` for encrypted credentials.
    pub issuer: Option<String>,
    /// CWT subject; `None` for encrypted credentials.
    pub subject: Option<String>,
    /// CWT expiry; `None` for encrypted credentials.
    pub expires_at: Option<u64>,
}

/// Inspect a credential's envelope and visible CWT fields.
pub fn inspect(qr_text: &str) -> Result<InspectResult> {
    let options = DecodeOptions::default();
    if qr_text.is_empty() {
        return Err(claim169_core::CoreError::Base45Decode("empty credential".into()).into());
    }
    let compressed = base45::decode(qr_text.trim())?;
    let cbor_bytes = deflate::decompress(&compressed, options.max_decompressed_bytes)?;
    let value = cbor::decode_with_limit(&cbor_bytes, options.max_decompressed_bytes)?;

    // Inspection is diagnostic: tolerate the legacy untagged form.
    match Envelope::from_value(&value, true)? {
        Envelope::Sign1(sign1) => {
            // Payload problems should not hide the headers here; claims
            // that fail to parse simply leave the CWT fields empty.
            let claims = CwtClaims::from_bytes(&sign1.payload).unwrap_or_default();
            Ok(InspectResult {
                cose_type: CoseType::Sign1,
                algorithm: sign1.algorithm()?.map(|alg| alg.name().to_string()),
                key_id: sign1.kid,
                issuer: claims.issuer,
                subject: claims.subject,
                expires_at: claims.expires_at,
            })
        }
        Envelope::Encrypt0(encrypt0) => Ok(InspectResult {
            cose_type: CoseType::Encrypt0,
            algorithm: encrypt0.algorithm()?.map(|alg| alg.name().to_string()),
            key_id: encrypt0.kid,
            issuer: None,
            subject: None,
            expires_at: None,
        }),
    }
}
