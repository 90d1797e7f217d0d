//! # Claim 169 Core
//!
//! Pure codec primitives for Claim 169 QR credentials.
//!
//! This crate contains no I/O, no clock, and no randomness. It is pure
//! computation over the credential wire layers:
//!
//! - [`base45`] - RFC 9285 printable encoding (the QR text layer)
//! - [`deflate`] - RFC 1950 zlib framing with a decompression cap
//! - [`cbor`] - bounded CBOR reader and deterministic writer (RFC 8949)
//! - [`cose`] - COSE Sign1 / Encrypt0 envelopes (RFC 9052)
//! - [`cwt`] - CWT claims map with claim key 169 (RFC 8392)
//! - [`identity`] - the typed Claim 169 identity record
//!
//! ## Determinism
//!
//! The CBOR writer always emits RFC 8949 §4.2.1 deterministic encoding, and
//! decoded COSE structures keep their protected header bytes verbatim, so
//! signatures stay valid across decode/re-encode round trips.

pub mod base45;
pub mod cbor;
pub mod cose;
pub mod cwt;
pub mod deflate;
pub mod error;
pub mod identity;

pub use cbor::Value;
pub use cose::{Algorithm, CoseEncrypt0, CoseSign1, Envelope};
pub use cwt::CwtClaims;
pub use error::{CoreError, Result};
pub use identity::{Biometric, Gender, IdentityRecord, MaritalStatus, PhotoFormat};
