//! # Claim 169
//!
//! Encode, decode and inspect Claim 169 QR credentials.
//!
//! A credential is a single Base45 string layering five codecs:
//!
//! ```text
//! Base45 → zlib → CBOR → COSE (Sign1 / Encrypt0) → CWT → identity map
//! ```
//!
//! ## Encoding
//!
//! ```
//! use claim169::{encode_with_ed25519, CwtMeta, EncodeOptions, IdentityRecord};
//!
//! let claim = IdentityRecord {
//!     id: Some("ID-001".into()),
//!     full_name: Some("Test Person".into()),
//!     ..Default::default()
//! };
//! let meta = CwtMeta {
//!     issuer: Some("https://issuer.example.org".into()),
//!     expires_at: Some(1_900_000_000),
//!     ..Default::default()
//! };
//! let seed = [0x42u8; 32];
//! let qr = encode_with_ed25519(&claim, &meta, &seed, &EncodeOptions::default()).unwrap();
//! assert!(!qr.is_empty());
//! ```
//!
//! ## Decoding
//!
//! ```
//! # use claim169::*;
//! # let claim = IdentityRecord { id: Some("ID-001".into()), ..Default::default() };
//! # let meta = CwtMeta { expires_at: Some(1_900_000_000), ..Default::default() };
//! # let seed = [0x42u8; 32];
//! # let qr = encode_with_ed25519(&claim, &meta, &seed, &EncodeOptions::default()).unwrap();
//! # let public_key = Ed25519Signer::from_seed(&seed).unwrap().public_key_bytes();
//! let result = decode_with_ed25519(&qr, &public_key, &DecodeOptions::default()).unwrap();
//! assert_eq!(result.verification_status, VerificationStatus::Verified);
//! assert_eq!(result.claim169.id.as_deref(), Some("ID-001"));
//! ```
//!
//! Signed-then-encrypted credentials wrap the Sign1 in an Encrypt0
//! (AES-GCM); see [`encode_signed_encrypted`] and [`decode_encrypted_aes256`].
//! Custom HSM/KMS providers plug in through the
//! [`Signer`]/[`SignatureVerifier`]/[`Encryptor`]/[`Decryptor`] traits.

mod decode;
mod encode;
mod error;
mod inspect;
mod options;
mod validate;

pub use decode::{
    decode, decode_encrypted_aes128, decode_encrypted_aes256, decode_unverified,
    decode_with_decryptor, decode_with_ecdsa_p256, decode_with_ecdsa_p256_pem, decode_with_ed25519,
    decode_with_ed25519_pem, decode_with_verifier, DecodeResult, VerificationStatus,
};
pub use encode::{
    encode, encode_signed_encrypted, encode_signed_encrypted_aes128, encode_unsigned,
    encode_with_ecdsa_p256, encode_with_ed25519, encode_with_signer,
    encode_with_signer_and_encryptor,
};
pub use error::{Claim169Error, Result};
pub use inspect::{inspect, CoseType, InspectResult};
pub use options::{
    CwtMeta, DecodeOptions, EncodeOptions, EncryptionKey, SignerKey, VerifierKey,
};
pub use validate::validate_date;

// Re-export the data model and the crypto capability surface.
pub use claim169_core::{
    Algorithm, Biometric, CoreError, Gender, IdentityRecord, MaritalStatus, PhotoFormat,
};
pub use claim169_crypto::{
    generate_nonce, AesGcmDecryptor, AesGcmEncryptor, CryptoError, Decryptor, EcdsaP256Signer,
    EcdsaP256Verifier, Ed25519Signer, Ed25519Verifier, Encryptor, SignatureVerifier, Signer,
};

/// The library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
