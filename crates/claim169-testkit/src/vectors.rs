//! Golden vectors for cross-implementation verification.
//!
//! Every implementation of the credential format must produce, for the same
//! record, metadata and keys:
//! - identical CWT payload bytes
//! - an identical Sign1 (Ed25519 is deterministic)
//! - identical Base45 text
//!
//! Encrypt0 credentials carry a random IV and are checked by round-trip
//! rather than byte equality.

use serde::{Deserialize, Serialize};

use claim169::{encode_unsigned, encode_with_ed25519, CwtMeta, EncodeOptions, IdentityRecord};

/// Ed25519 private seed used across the fixed vectors (RFC 8032 vector 1).
pub const ED25519_SEED_HEX: &str =
    "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

/// Public key matching [`ED25519_SEED_HEX`].
pub const ED25519_PUBLIC_HEX: &str =
    "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";

/// AES-256-GCM demo key `000102...1f`.
pub const AES256_KEY_HEX: &str =
    "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

/// The fixed Ed25519 seed as bytes.
pub fn ed25519_seed() -> Vec<u8> {
    hex::decode(ED25519_SEED_HEX).expect("valid hex")
}

/// The fixed Ed25519 public key as bytes.
pub fn ed25519_public_key() -> Vec<u8> {
    hex::decode(ED25519_PUBLIC_HEX).expect("valid hex")
}

/// The fixed AES-256 key as bytes.
pub fn aes256_key() -> Vec<u8> {
    hex::decode(AES256_KEY_HEX).expect("valid hex")
}

/// A single golden vector: inputs plus the derived credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,
    /// Whether the credential is Ed25519-signed (else unsigned).
    pub signed: bool,
    pub claim: IdentityRecord,
    pub meta: CwtMeta,
    /// The Base45 credential text.
    pub qr_data: String,
}

fn generate_vector(
    name: &str,
    description: &str,
    signed: bool,
    claim: IdentityRecord,
    meta: CwtMeta,
) -> GoldenVector {
    let qr_data = if signed {
        encode_with_ed25519(&claim, &meta, &ed25519_seed(), &EncodeOptions::default())
            .expect("vector encodes")
    } else {
        encode_unsigned(&claim, &meta, &EncodeOptions::default()).expect("vector encodes")
    };
    GoldenVector {
        name: name.to_string(),
        description: description.to_string(),
        signed,
        claim,
        meta,
        qr_data,
    }
}

/// Generate the full vector set.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        generate_vector(
            "minimal_unsigned",
            "Minimal unsigned credential: id and full_name only",
            false,
            IdentityRecord {
                id: Some("X".into()),
                full_name: Some("A".into()),
                ..Default::default()
            },
            CwtMeta {
                issuer: Some("https://e.org".into()),
                expires_at: Some(1_900_000_000),
                ..Default::default()
            },
        ),
        generate_vector(
            "ed25519_roundtrip",
            "Ed25519-signed credential with the RFC 8032 test key",
            true,
            IdentityRecord {
                id: Some("ROUNDTRIP-001".into()),
                full_name: Some("Roundtrip Test Person".into()),
                email: Some("roundtrip@test.org".into()),
                ..Default::default()
            },
            CwtMeta {
                issuer: Some("https://roundtrip.example.org".into()),
                issued_at: Some(1_700_000_000),
                expires_at: Some(1_900_000_000),
                ..Default::default()
            },
        ),
        generate_vector(
            "demographics_full",
            "Every demographic field populated",
            true,
            IdentityRecord {
                id: Some("FULL-DEMO-001".into()),
                version: Some("1.0.0".into()),
                language: Some("en".into()),
                full_name: Some("Full Demographics Person".into()),
                first_name: Some("Full".into()),
                middle_name: Some("Demo".into()),
                last_name: Some("Person".into()),
                date_of_birth: Some("1985-06-15".into()),
                gender: Some(claim169::Gender::Female),
                address: Some("456 Demo Avenue, Test City".into()),
                email: Some("full@demo.org".into()),
                phone: Some("+1987654321".into()),
                nationality: Some("CA".into()),
                marital_status: Some(claim169::MaritalStatus::Married),
                guardian: Some("Guardian Name".into()),
                photo: Some(vec![0xff, 0xd8, 0xff, 0xe0]),
                photo_format: Some(claim169::PhotoFormat::Jpeg),
                best_quality_fingers: Some(vec![1, 6]),
                secondary_full_name: Some("Nom Complet".into()),
                secondary_language: Some("fr".into()),
                location_code: Some("CA-QC".into()),
                legal_status: Some("permanent_resident".into()),
                country_of_issuance: Some("CA".into()),
                ..Default::default()
            },
            CwtMeta {
                issuer: Some("https://demographics.example.org".into()),
                subject: Some("demo-subject".into()),
                issued_at: Some(1_700_000_000),
                expires_at: Some(1_900_000_000),
                not_before: Some(1_700_000_000),
            },
        ),
        generate_vector(
            "unicode_fields",
            "Unicode text in name and address",
            true,
            IdentityRecord {
                id: Some("UNICODE-001".into()),
                full_name: Some("日本語テスト".into()),
                address: Some("東京都渋谷区".into()),
                ..Default::default()
            },
            CwtMeta {
                expires_at: Some(1_900_000_000),
                ..Default::default()
            },
        ),
        generate_vector(
            "biometric_face",
            "A single face biometric entry with format metadata",
            true,
            IdentityRecord {
                id: Some("BIO-FACE-001".into()),
                full_name: Some("Face Test Person".into()),
                face: Some(vec![claim169::Biometric {
                    data: b"\x89PNG\r\n\x1a\nFACE_IMAGE_DATA".to_vec(),
                    format: Some(0),
                    sub_format: Some(1),
                    issuer: Some("TestIssuer".into()),
                }]),
                ..Default::default()
            },
            CwtMeta {
                expires_at: Some(1_900_000_000),
                ..Default::default()
            },
        ),
    ]
}
