//! CWT claims map (RFC 8392).
//!
//! The claims map is integer-keyed: `1 iss`, `2 sub`, `4 exp`, `5 nbf`,
//! `6 iat`, and `169` for the identity record, carried as a byte string
//! wrapping its own CBOR map. Unrecognized claims are preserved as raw
//! values and re-emitted on encode, so decode-then-re-encode of a signed
//! payload stays byte-stable.

use crate::cbor::{self, map_get, Value};
use crate::error::{CoreError, Result};

/// CWT claim key: issuer.
pub const CLAIM_ISS: i64 = 1;
/// CWT claim key: subject.
pub const CLAIM_SUB: i64 = 2;
/// CWT claim key: expiration time (seconds since epoch).
pub const CLAIM_EXP: i64 = 4;
/// CWT claim key: not before.
pub const CLAIM_NBF: i64 = 5;
/// CWT claim key: issued at.
pub const CLAIM_IAT: i64 = 6;
/// CWT claim key: the Claim 169 identity record.
pub const CLAIM_169: i64 = 169;

/// A decoded CWT claims map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CwtClaims {
    pub issuer: Option<String>,
    pub subject: Option<String>,
    pub expires_at: Option<u64>,
    pub not_before: Option<u64>,
    pub issued_at: Option<u64>,
    /// Raw CBOR bytes of the inner identity map (claim key 169).
    pub claim169: Option<Vec<u8>>,
    /// Unrecognized claims, preserved verbatim in (key, value) form.
    pub unknown: Vec<(Value, Value)>,
}

impl CwtClaims {
    /// Serialize to a CBOR map value (deterministic ordering applied by the
    /// writer).
    pub fn to_value(&self) -> Value {
        let mut entries = Vec::new();
        if let Some(iss) = &self.issuer {
            entries.push((Value::from_i64(CLAIM_ISS), Value::Text(iss.clone())));
        }
        if let Some(sub) = &self.subject {
            entries.push((Value::from_i64(CLAIM_SUB), Value::Text(sub.clone())));
        }
        if let Some(exp) = self.expires_at {
            entries.push((Value::from_i64(CLAIM_EXP), Value::Uint(exp)));
        }
        if let Some(nbf) = self.not_before {
            entries.push((Value::from_i64(CLAIM_NBF), Value::Uint(nbf)));
        }
        if let Some(iat) = self.issued_at {
            entries.push((Value::from_i64(CLAIM_IAT), Value::Uint(iat)));
        }
        if let Some(claim169) = &self.claim169 {
            entries.push((Value::from_i64(CLAIM_169), Value::Bytes(claim169.clone())));
        }
        entries.extend(self.unknown.iter().cloned());
        Value::Map(entries)
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        cbor::encode(&self.to_value())
    }

    /// Parse a claims map from CBOR bytes.
    ///
    /// Rejects wrongly typed standard claims and inverted timestamps
    /// (`exp < nbf` or `exp < iat`).
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let value = cbor::decode(data).map_err(into_cwt_error)?;
        let map = value
            .as_map()
            .ok_or_else(|| CoreError::CwtParse("CWT payload is not a map".into()))?;

        let mut claims = CwtClaims {
            issuer: text_claim(map, CLAIM_ISS, "iss")?,
            subject: text_claim(map, CLAIM_SUB, "sub")?,
            expires_at: time_claim(map, CLAIM_EXP, "exp")?,
            not_before: time_claim(map, CLAIM_NBF, "nbf")?,
            issued_at: time_claim(map, CLAIM_IAT, "iat")?,
            claim169: None,
            unknown: Vec::new(),
        };

        match map_get(map, CLAIM_169) {
            Some(Value::Bytes(b)) => claims.claim169 = Some(b.clone()),
            // Some issuers inline the identity map instead of wrapping it;
            // normalize to the wrapped form.
            Some(inner @ Value::Map(_)) => claims.claim169 = Some(cbor::encode(inner)),
            Some(_) => {
                return Err(CoreError::CwtParse(
                    "claim 169 is neither a byte string nor a map".into(),
                ))
            }
            None => {}
        }

        for (key, val) in map {
            let known = matches!(
                key.as_i64(),
                Some(CLAIM_ISS | CLAIM_SUB | CLAIM_EXP | CLAIM_NBF | CLAIM_IAT | CLAIM_169)
            );
            if !known {
                claims.unknown.push((key.clone(), val.clone()));
            }
        }

        if let Some(exp) = claims.expires_at {
            if let Some(nbf) = claims.not_before {
                if exp < nbf {
                    return Err(CoreError::CwtParse(format!(
                        "exp {} precedes nbf {}",
                        exp, nbf
                    )));
                }
            }
            if let Some(iat) = claims.issued_at {
                if exp < iat {
                    return Err(CoreError::CwtParse(format!(
                        "exp {} precedes iat {}",
                        exp, iat
                    )));
                }
            }
        }

        Ok(claims)
    }

    /// The raw inner identity bytes, or [`CoreError::Claim169NotFound`].
    pub fn claim169_bytes(&self) -> Result<&[u8]> {
        self.claim169
            .as_deref()
            .ok_or(CoreError::Claim169NotFound)
    }

    /// Enforce the expiry window against `now`, with a symmetric skew
    /// tolerance in seconds.
    pub fn validate_timestamps(&self, now: u64, skew_seconds: i64) -> Result<()> {
        let now = now as i128;
        let skew = skew_seconds as i128;
        if let Some(exp) = self.expires_at {
            if now > exp as i128 + skew {
                return Err(CoreError::Expired {
                    exp,
                    now: now as u64,
                });
            }
        }
        if let Some(nbf) = self.not_before {
            if now < nbf as i128 - skew {
                return Err(CoreError::NotYetValid {
                    nbf,
                    now: now as u64,
                });
            }
        }
        Ok(())
    }
}

fn into_cwt_error(err: CoreError) -> CoreError {
    match err {
        CoreError::CoseParse(msg) => CoreError::CwtParse(msg),
        other => other,
    }
}

fn text_claim(map: &[(Value, Value)], key: i64, name: &str) -> Result<Option<String>> {
    match map_get(map, key) {
        None => Ok(None),
        Some(Value::Text(s)) => Ok(Some(s.clone())),
        Some(_) => Err(CoreError::CwtParse(format!("{} claim is not text", name))),
    }
}

fn time_claim(map: &[(Value, Value)], key: i64, name: &str) -> Result<Option<u64>> {
    match map_get(map, key) {
        None => Ok(None),
        Some(Value::Uint(n)) => Ok(Some(*n)),
        Some(_) => Err(CoreError::CwtParse(format!(
            "{} claim is not an unsigned integer",
            name
        ))),
    }
}
