//! COSE envelopes (RFC 9052): Sign1 and Encrypt0.
//!
//! Only the single-signer and single-recipient forms are implemented. The
//! decoded [`CoseSign1`] keeps the serialized protected header verbatim;
//! the signature covers those exact bytes, so they are never re-canonicalized
//! when rebuilding the `Sig_structure` for verification.

use crate::cbor::{self, map_get, Value};
use crate::error::{CoreError, Result};

/// CBOR tag for COSE_Sign1.
pub const TAG_SIGN1: u64 = 18;

/// CBOR tag for COSE_Encrypt0.
pub const TAG_ENCRYPT0: u64 = 16;

/// Header label for the algorithm (protected).
const HDR_ALG: i64 = 1;

/// Header label for the key identifier (unprotected).
const HDR_KID: i64 = 4;

/// Header label for the initialization vector (unprotected).
const HDR_IV: i64 = 5;

/// AES-GCM IV length in bytes.
pub const IV_LEN: usize = 12;

/// COSE algorithms this library speaks (IANA labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// EdDSA over Ed25519 (label -8, 64-byte signature).
    EdDsa,
    /// ECDSA with SHA-256 over P-256 (label -7, 64-byte r||s signature).
    Es256,
    /// AES-128-GCM (label 1, 16-byte key).
    A128Gcm,
    /// AES-256-GCM (label 3, 32-byte key).
    A256Gcm,
}

impl Algorithm {
    /// Parse an IANA algorithm label.
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            -8 => Some(Algorithm::EdDsa),
            -7 => Some(Algorithm::Es256),
            1 => Some(Algorithm::A128Gcm),
            3 => Some(Algorithm::A256Gcm),
            _ => None,
        }
    }

    /// The IANA label.
    pub fn label(&self) -> i64 {
        match self {
            Algorithm::EdDsa => -8,
            Algorithm::Es256 => -7,
            Algorithm::A128Gcm => 1,
            Algorithm::A256Gcm => 3,
        }
    }

    /// The registered algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::EdDsa => "EdDSA",
            Algorithm::Es256 => "ES256",
            Algorithm::A128Gcm => "A128GCM",
            Algorithm::A256Gcm => "A256GCM",
        }
    }

    /// True for the signature algorithms.
    pub fn is_signing(&self) -> bool {
        matches!(self, Algorithm::EdDsa | Algorithm::Es256)
    }

    /// Signature length in bytes, for the signing algorithms.
    pub fn signature_len(&self) -> Option<usize> {
        self.is_signing().then_some(64)
    }

    /// Symmetric key length in bytes, for the AEAD algorithms.
    pub fn key_len(&self) -> Option<usize> {
        match self {
            Algorithm::A128Gcm => Some(16),
            Algorithm::A256Gcm => Some(32),
            _ => None,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Serialize a protected header map carrying the algorithm, if any.
pub fn build_protected(alg: Option<Algorithm>) -> Vec<u8> {
    let mut entries = Vec::new();
    if let Some(alg) = alg {
        entries.push((Value::from_i64(HDR_ALG), Value::from_i64(alg.label())));
    }
    cbor::encode(&Value::Map(entries))
}

/// Parse a serialized protected header, returning the algorithm if present.
///
/// A zero-length byte string counts as an empty header map.
fn parse_protected(protected: &[u8]) -> Result<Option<Algorithm>> {
    if protected.is_empty() {
        return Ok(None);
    }
    let value = cbor::decode(protected)?;
    let map = value
        .as_map()
        .ok_or_else(|| CoreError::CoseParse("protected header is not a map".into()))?;
    match map_get(map, HDR_ALG) {
        None => Ok(None),
        Some(v) => {
            let label = v
                .as_i64()
                .ok_or_else(|| CoreError::CoseParse("alg header is not an integer".into()))?;
            Algorithm::from_label(label)
                .map(Some)
                .ok_or_else(|| CoreError::CoseParse(format!("unsupported algorithm {}", label)))
        }
    }
}

fn unprotected_bytes(map: &[(Value, Value)], label: i64) -> Option<Vec<u8>> {
    map_get(map, label).and_then(|v| v.as_bytes()).map(<[u8]>::to_vec)
}

/// A COSE_Sign1 structure (tag 18).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoseSign1 {
    /// Serialized protected header, preserved byte-for-byte.
    pub protected: Vec<u8>,
    /// Key identifier from the unprotected header, if present.
    pub kid: Option<Vec<u8>>,
    /// The payload (a CWT claims map, serialized).
    pub payload: Vec<u8>,
    /// The signature; empty for unsigned credentials.
    pub signature: Vec<u8>,
}

impl CoseSign1 {
    /// Assemble a Sign1 with a freshly built protected header.
    pub fn new(alg: Option<Algorithm>, kid: Option<Vec<u8>>, payload: Vec<u8>, signature: Vec<u8>) -> Self {
        Self {
            protected: build_protected(alg),
            kid,
            payload,
            signature,
        }
    }

    /// The algorithm recorded in the protected header.
    pub fn algorithm(&self) -> Result<Option<Algorithm>> {
        parse_protected(&self.protected)
    }

    /// Build the Sig_structure these bytes are signed over:
    /// `["Signature1", protected, external_aad = h'', payload]`.
    pub fn sig_structure(&self) -> Vec<u8> {
        cbor::encode(&Value::Array(vec![
            Value::Text("Signature1".into()),
            Value::Bytes(self.protected.clone()),
            Value::Bytes(Vec::new()),
            Value::Bytes(self.payload.clone()),
        ]))
    }

    /// Build the Sig_structure for a not-yet-assembled Sign1.
    pub fn sig_structure_for(protected: &[u8], payload: &[u8]) -> Vec<u8> {
        cbor::encode(&Value::Array(vec![
            Value::Text("Signature1".into()),
            Value::Bytes(protected.to_vec()),
            Value::Bytes(Vec::new()),
            Value::Bytes(payload.to_vec()),
        ]))
    }

    fn unprotected_value(&self) -> Value {
        let mut entries = Vec::new();
        if let Some(kid) = &self.kid {
            entries.push((Value::from_i64(HDR_KID), Value::Bytes(kid.clone())));
        }
        Value::Map(entries)
    }

    /// Serialize as a tagged CBOR item.
    pub fn to_value(&self) -> Value {
        Value::Tag(
            TAG_SIGN1,
            Box::new(Value::Array(vec![
                Value::Bytes(self.protected.clone()),
                self.unprotected_value(),
                Value::Bytes(self.payload.clone()),
                Value::Bytes(self.signature.clone()),
            ])),
        )
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        cbor::encode(&self.to_value())
    }

    fn from_array(items: &[Value]) -> Result<Self> {
        if items.len() != 4 {
            return Err(CoreError::CoseParse(format!(
                "COSE_Sign1 must be a 4-element array, got {}",
                items.len()
            )));
        }
        let protected = items[0]
            .as_bytes()
            .ok_or_else(|| CoreError::CoseParse("Sign1 protected is not a byte string".into()))?
            .to_vec();
        let unprotected = items[1]
            .as_map()
            .ok_or_else(|| CoreError::CoseParse("Sign1 unprotected is not a map".into()))?;
        let payload = items[2]
            .as_bytes()
            .ok_or_else(|| CoreError::CoseParse("Sign1 payload is not a byte string".into()))?
            .to_vec();
        let signature = items[3]
            .as_bytes()
            .ok_or_else(|| CoreError::CoseParse("Sign1 signature is not a byte string".into()))?
            .to_vec();

        let sign1 = Self {
            protected,
            kid: unprotected_bytes(unprotected, HDR_KID),
            payload,
            signature,
        };
        // Surface an unsupported alg at parse time, not verify time.
        sign1.algorithm()?;
        Ok(sign1)
    }
}

/// A COSE_Encrypt0 structure (tag 16): `[protected, unprotected, ciphertext]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoseEncrypt0 {
    /// Serialized protected header, preserved byte-for-byte.
    pub protected: Vec<u8>,
    /// Key identifier from the unprotected header, if present.
    pub kid: Option<Vec<u8>>,
    /// The 12-byte AES-GCM IV from the unprotected header.
    pub iv: Vec<u8>,
    /// Ciphertext with the authentication tag appended.
    pub ciphertext: Vec<u8>,
}

impl CoseEncrypt0 {
    /// Assemble an Encrypt0 with a freshly built protected header.
    pub fn new(alg: Algorithm, kid: Option<Vec<u8>>, iv: Vec<u8>, ciphertext: Vec<u8>) -> Self {
        Self {
            protected: build_protected(Some(alg)),
            kid,
            iv,
            ciphertext,
        }
    }

    /// The algorithm recorded in the protected header.
    pub fn algorithm(&self) -> Result<Option<Algorithm>> {
        parse_protected(&self.protected)
    }

    /// Build the Enc_structure used as AEAD associated data:
    /// `["Encrypt0", protected, external_aad = h'']`.
    pub fn enc_structure(&self) -> Vec<u8> {
        Self::enc_structure_for(&self.protected)
    }

    /// Build the Enc_structure for a not-yet-assembled Encrypt0.
    pub fn enc_structure_for(protected: &[u8]) -> Vec<u8> {
        cbor::encode(&Value::Array(vec![
            Value::Text("Encrypt0".into()),
            Value::Bytes(protected.to_vec()),
            Value::Bytes(Vec::new()),
        ]))
    }

    /// Serialize as a tagged CBOR item.
    pub fn to_value(&self) -> Value {
        let mut unprotected = Vec::new();
        if let Some(kid) = &self.kid {
            unprotected.push((Value::from_i64(HDR_KID), Value::Bytes(kid.clone())));
        }
        unprotected.push((Value::from_i64(HDR_IV), Value::Bytes(self.iv.clone())));
        Value::Tag(
            TAG_ENCRYPT0,
            Box::new(Value::Array(vec![
                Value::Bytes(self.protected.clone()),
                Value::Map(unprotected),
                Value::Bytes(self.ciphertext.clone()),
            ])),
        )
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        cbor::encode(&self.to_value())
    }

    fn from_array(items: &[Value]) -> Result<Self> {
        if items.len() != 3 {
            return Err(CoreError::CoseParse(format!(
                "COSE_Encrypt0 must be a 3-element array, got {}",
                items.len()
            )));
        }
        let protected = items[0]
            .as_bytes()
            .ok_or_else(|| CoreError::CoseParse("Encrypt0 protected is not a byte string".into()))?
            .to_vec();
        let unprotected = items[1]
            .as_map()
            .ok_or_else(|| CoreError::CoseParse("Encrypt0 unprotected is not a map".into()))?;
        let ciphertext = items[2]
            .as_bytes()
            .ok_or_else(|| CoreError::CoseParse("Encrypt0 ciphertext is not a byte string".into()))?
            .to_vec();

        let iv = unprotected_bytes(unprotected, HDR_IV)
            .ok_or_else(|| CoreError::CoseParse("Encrypt0 is missing the iv header".into()))?;
        if iv.len() != IV_LEN {
            return Err(CoreError::CoseParse(format!(
                "Encrypt0 iv must be {} bytes, got {}",
                IV_LEN,
                iv.len()
            )));
        }

        let encrypt0 = Self {
            protected,
            kid: unprotected_bytes(unprotected, HDR_KID),
            iv,
            ciphertext,
        };
        encrypt0.algorithm()?;
        Ok(encrypt0)
    }
}

/// A decoded COSE envelope, dispatched on the CBOR tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Sign1(CoseSign1),
    Encrypt0(CoseEncrypt0),
}

impl Envelope {
    /// Parse an envelope from a decoded CBOR item.
    ///
    /// Tag 18 selects Sign1, tag 16 selects Encrypt0. An untagged array is
    /// accepted only when `allow_untagged` is set (legacy credentials), and
    /// is disambiguated by arity: 4 elements is Sign1, 3 is Encrypt0.
    pub fn from_value(value: &Value, allow_untagged: bool) -> Result<Self> {
        match value {
            Value::Tag(TAG_SIGN1, inner) => {
                let items = inner
                    .as_array()
                    .ok_or_else(|| CoreError::CoseParse("tag 18 content is not an array".into()))?;
                Ok(Envelope::Sign1(CoseSign1::from_array(items)?))
            }
            Value::Tag(TAG_ENCRYPT0, inner) => {
                let items = inner
                    .as_array()
                    .ok_or_else(|| CoreError::CoseParse("tag 16 content is not an array".into()))?;
                Ok(Envelope::Encrypt0(CoseEncrypt0::from_array(items)?))
            }
            Value::Tag(tag, _) => Err(CoreError::CoseParse(format!(
                "unexpected CBOR tag {} (want 18 or 16)",
                tag
            ))),
            Value::Array(items) if allow_untagged => match items.len() {
                4 => Ok(Envelope::Sign1(CoseSign1::from_array(items)?)),
                3 => Ok(Envelope::Encrypt0(CoseEncrypt0::from_array(items)?)),
                n => Err(CoreError::CoseParse(format!(
                    "untagged COSE array has {} elements (want 3 or 4)",
                    n
                ))),
            },
            Value::Array(_) => Err(CoreError::CoseParse(
                "untagged COSE structure (enable legacy mode to accept)".into(),
            )),
            _ => Err(CoreError::CoseParse("credential is not a COSE structure".into())),
        }
    }
}
