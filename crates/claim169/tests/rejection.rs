//! Rejection paths: tampering, wrong keys, bombs, bad enums, bad dates,
//! expired credentials.

use claim169::{
    decode_encrypted_aes256, decode_unverified, decode_with_ed25519, decode_with_verifier,
    encode_signed_encrypted, encode_unsigned, encode_with_ed25519, Claim169Error, CoreError,
    CryptoError, CwtMeta, DecodeOptions, Ed25519Signer, Ed25519Verifier, EncodeOptions,
    IdentityRecord, VerificationStatus,
};
use claim169_core::cbor::Value;
use claim169_core::cose::{build_protected, CoseSign1};
use claim169_core::{base45, cbor, deflate, CwtClaims};

const ED25519_SEED_HEX: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
const ED25519_PUBLIC_HEX: &str =
    "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";

fn ed25519_seed() -> Vec<u8> {
    hex::decode(ED25519_SEED_HEX).unwrap()
}

fn ed25519_public() -> Vec<u8> {
    hex::decode(ED25519_PUBLIC_HEX).unwrap()
}

fn signed_credential() -> String {
    let claim = IdentityRecord {
        id: Some("TAMPER-001".into()),
        full_name: Some("Tamper Test Person".into()),
        ..Default::default()
    };
    let meta = CwtMeta {
        issuer: Some("https://tamper.example.org".into()),
        expires_at: Some(1_900_000_000),
        ..Default::default()
    };
    encode_with_ed25519(&claim, &meta, &ed25519_seed(), &EncodeOptions::default()).unwrap()
}

/// Wrap raw CBOR bytes in the zlib + Base45 outer layers.
fn armor(cbor_bytes: &[u8]) -> String {
    base45::encode(&deflate::compress(cbor_bytes))
}

/// Build an unsigned Sign1 credential around arbitrary claim-169 map bytes.
fn unsigned_credential_with_identity(identity: &Value) -> String {
    let claims = CwtClaims {
        expires_at: Some(1_900_000_000),
        claim169: Some(cbor::encode(identity)),
        ..Default::default()
    };
    let sign1 = CoseSign1 {
        protected: build_protected(None),
        kid: None,
        payload: claims.to_bytes(),
        signature: Vec::new(),
    };
    armor(&sign1.to_bytes())
}

#[test]
fn tampering_any_character_fails() {
    let qr = signed_credential();
    let chars: Vec<char> = qr.chars().collect();
    const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

    // Flip every 7th character to a different alphabet symbol. Depending on
    // where the flip lands this surfaces as a Base45, zlib, COSE or
    // signature error; it must never produce a verified result.
    for i in (0..chars.len()).step_by(7) {
        let mut tampered: Vec<char> = chars.clone();
        let replacement = ALPHABET
            .chars()
            .find(|&c| c != tampered[i])
            .expect("alphabet has 45 symbols");
        tampered[i] = replacement;
        let tampered: String = tampered.into_iter().collect();

        assert!(
            decode_with_ed25519(&tampered, &ed25519_public(), &DecodeOptions::default()).is_err(),
            "tampered credential at position {} must not decode",
            i
        );
    }
}

#[test]
fn tampered_signature_bytes_fail_with_signature_error() {
    // Tamper below the compression layer so the error is specifically the
    // signature check.
    let qr = signed_credential();
    let compressed = base45::decode(&qr).unwrap();
    let mut cbor_bytes = deflate::decompress(&compressed, 65536).unwrap();
    let len = cbor_bytes.len();
    // The Ed25519 signature is the trailing 64 bytes of the Sign1 array.
    cbor_bytes[len - 1] ^= 0x01;
    let tampered = armor(&cbor_bytes);

    let err = decode_with_ed25519(&tampered, &ed25519_public(), &DecodeOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Claim169Error::Crypto(CryptoError::Signature(_))
    ));
}

#[test]
fn wrong_public_key_fails_with_signature_error() {
    let qr = signed_credential();
    let other = Ed25519Signer::from_seed(&[0x42u8; 32]).unwrap();
    let err = decode_with_ed25519(&qr, &other.public_key_bytes(), &DecodeOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Claim169Error::Crypto(CryptoError::Signature(_))
    ));
}

#[test]
fn failed_status_when_allow_unverified_with_bad_key() {
    let qr = signed_credential();
    let other = Ed25519Signer::from_seed(&[0x42u8; 32]).unwrap();
    let verifier = Ed25519Verifier::from_bytes(&other.public_key_bytes()).unwrap();
    let options = DecodeOptions {
        allow_unverified: true,
        ..Default::default()
    };
    let result = decode_with_verifier(&qr, &verifier, &options).unwrap();
    assert_eq!(result.verification_status, VerificationStatus::Failed);
    assert_eq!(result.claim169.id.as_deref(), Some("TAMPER-001"));
}

#[test]
fn wrong_decryption_key_fails() {
    let claim = IdentityRecord {
        id: Some("ENC-WRONG-KEY".into()),
        full_name: Some("Enc Person".into()),
        ..Default::default()
    };
    let meta = CwtMeta {
        expires_at: Some(1_900_000_000),
        ..Default::default()
    };
    let encrypt_key: Vec<u8> = (0u8..32).collect();

    let qr = encode_signed_encrypted(
        &claim,
        &meta,
        &ed25519_seed(),
        &encrypt_key,
        &EncodeOptions::default(),
    )
    .unwrap();

    let options = DecodeOptions {
        allow_unverified: true,
        ..Default::default()
    };
    let err = decode_encrypted_aes256(&qr, &[0u8; 32], None, &options).unwrap_err();
    assert!(matches!(
        err,
        Claim169Error::Crypto(CryptoError::Decryption(_))
    ));
}

#[test]
fn zip_bomb_fails_before_allocation() {
    // A stream claiming to inflate far past the cap.
    let bomb = deflate::compress(&vec![0u8; 4 * 1024 * 1024]);
    let qr = base45::encode(&bomb);

    let err = decode_unverified(&qr, &DecodeOptions::default()).unwrap_err();
    assert!(matches!(err, Claim169Error::Core(CoreError::Decompress(_))));
}

#[test]
fn decompression_cap_is_configurable() {
    let claim = IdentityRecord {
        id: Some("CAP-001".into()),
        photo: Some(vec![0x5au8; 2048]),
        ..Default::default()
    };
    let meta = CwtMeta {
        expires_at: Some(1_900_000_000),
        ..Default::default()
    };
    let qr = encode_unsigned(&claim, &meta, &EncodeOptions::default()).unwrap();

    let tight = DecodeOptions {
        max_decompressed_bytes: 256,
        ..Default::default()
    };
    assert!(matches!(
        decode_unverified(&qr, &tight).unwrap_err(),
        Claim169Error::Core(CoreError::Decompress(_))
    ));
    assert!(decode_unverified(&qr, &DecodeOptions::default()).is_ok());
}

#[test]
fn out_of_range_enums_fail() {
    for (key, bad) in [(9i64, 4u64), (14, 4), (17, 5)] {
        let identity = Value::Map(vec![
            (Value::from_i64(1), Value::Text("ENUM".into())),
            (Value::from_i64(key), Value::Uint(bad)),
        ]);
        let qr = unsigned_credential_with_identity(&identity);
        let err = decode_unverified(&qr, &DecodeOptions::default()).unwrap_err();
        assert!(
            matches!(err, Claim169Error::Core(CoreError::CwtParse(_))),
            "key {} value {} must be rejected",
            key,
            bad
        );
    }
}

#[test]
fn expired_credential_rejected_unless_validation_off() {
    let claim = IdentityRecord {
        id: Some("EXPIRED-001".into()),
        ..Default::default()
    };
    let meta = CwtMeta {
        expires_at: Some(1),
        ..Default::default()
    };
    let qr = encode_unsigned(&claim, &meta, &EncodeOptions::default()).unwrap();

    let err = decode_unverified(&qr, &DecodeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Claim169Error::Core(CoreError::Expired { .. })
    ));

    let options = DecodeOptions {
        validate_timestamps: false,
        ..Default::default()
    };
    assert!(decode_unverified(&qr, &options).is_ok());
}

#[test]
fn expiry_skew_boundary() {
    let exp = 1_800_000_000u64;
    let skew = 30i64;
    let claim = IdentityRecord {
        id: Some("SKEW-001".into()),
        ..Default::default()
    };
    let meta = CwtMeta {
        expires_at: Some(exp),
        ..Default::default()
    };
    let qr = encode_unsigned(&claim, &meta, &EncodeOptions::default()).unwrap();

    let at_boundary = DecodeOptions {
        clock_skew_tolerance_seconds: skew,
        now: Some(exp + skew as u64),
        ..Default::default()
    };
    assert!(decode_unverified(&qr, &at_boundary).is_ok());

    let past_boundary = DecodeOptions {
        clock_skew_tolerance_seconds: skew,
        now: Some(exp + skew as u64 + 1),
        ..Default::default()
    };
    assert!(decode_unverified(&qr, &past_boundary).is_err());
}

#[test]
fn not_yet_valid_credential_rejected() {
    let claim = IdentityRecord {
        id: Some("NBF-001".into()),
        ..Default::default()
    };
    let meta = CwtMeta {
        not_before: Some(1_800_000_000),
        expires_at: Some(1_900_000_000),
        ..Default::default()
    };
    let qr = encode_unsigned(&claim, &meta, &EncodeOptions::default()).unwrap();

    let early = DecodeOptions {
        now: Some(1_700_000_000),
        ..Default::default()
    };
    assert!(matches!(
        decode_unverified(&qr, &early).unwrap_err(),
        Claim169Error::Core(CoreError::NotYetValid { .. })
    ));

    let after = DecodeOptions {
        now: Some(1_800_000_001),
        ..Default::default()
    };
    assert!(decode_unverified(&qr, &after).is_ok());
}

#[test]
fn invalid_dates_rejected_in_both_forms() {
    for bad in ["1990-02-30", "19900230"] {
        let claim = IdentityRecord {
            id: Some("DOB-001".into()),
            date_of_birth: Some(bad.into()),
            ..Default::default()
        };
        let meta = CwtMeta {
            expires_at: Some(1_900_000_000),
            ..Default::default()
        };
        let qr = encode_unsigned(&claim, &meta, &EncodeOptions::default()).unwrap();
        let err = decode_unverified(&qr, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, Claim169Error::Validation(_)), "{:?}", bad);
    }
}

#[test]
fn date_forms_are_preserved_not_normalized() {
    for good in ["1990-01-15", "19900115"] {
        let claim = IdentityRecord {
            id: Some("DOB-OK".into()),
            date_of_birth: Some(good.into()),
            ..Default::default()
        };
        let meta = CwtMeta {
            expires_at: Some(1_900_000_000),
            ..Default::default()
        };
        let qr = encode_unsigned(&claim, &meta, &EncodeOptions::default()).unwrap();
        let result = decode_unverified(&qr, &DecodeOptions::default()).unwrap();
        assert_eq!(result.claim169.date_of_birth.as_deref(), Some(good));
    }
}

#[test]
fn missing_claim169_reported() {
    let claims = CwtClaims {
        issuer: Some("https://no-claim.example.org".into()),
        expires_at: Some(1_900_000_000),
        ..Default::default()
    };
    let sign1 = CoseSign1 {
        protected: build_protected(None),
        kid: None,
        payload: claims.to_bytes(),
        signature: Vec::new(),
    };
    let qr = armor(&sign1.to_bytes());

    let err = decode_unverified(&qr, &DecodeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Claim169Error::Core(CoreError::Claim169NotFound)
    ));
}

#[test]
fn timestamp_inversion_rejected() {
    let identity = Value::Map(vec![(Value::from_i64(1), Value::Text("INV".into()))]);
    let claims = Value::Map(vec![
        (Value::from_i64(4), Value::Uint(100)),
        (Value::from_i64(5), Value::Uint(200)),
        (Value::from_i64(169), Value::Bytes(cbor::encode(&identity))),
    ]);
    let sign1 = CoseSign1 {
        protected: build_protected(None),
        kid: None,
        payload: cbor::encode(&claims),
        signature: Vec::new(),
    };
    let qr = armor(&sign1.to_bytes());

    let options = DecodeOptions {
        validate_timestamps: false,
        ..Default::default()
    };
    assert!(matches!(
        decode_unverified(&qr, &options).unwrap_err(),
        Claim169Error::Core(CoreError::CwtParse(_))
    ));
}

#[test]
fn garbage_inputs_rejected() {
    assert!(decode_unverified("", &DecodeOptions::default()).is_err());
    assert!(decode_unverified("not base45 at all!", &DecodeOptions::default()).is_err());
    // Valid Base45 but not a zlib stream.
    let qr = base45::encode(b"random bytes, not compressed");
    assert!(matches!(
        decode_unverified(&qr, &DecodeOptions::default()).unwrap_err(),
        Claim169Error::Core(CoreError::Decompress(_))
    ));
    // Valid zlib but not CBOR.
    let qr = armor(b"\xffnot cbor");
    assert!(decode_unverified(&qr, &DecodeOptions::default()).is_err());
    // Valid CBOR but not a COSE envelope.
    let qr = armor(&cbor::encode(&Value::Uint(42)));
    assert!(matches!(
        decode_unverified(&qr, &DecodeOptions::default()).unwrap_err(),
        Claim169Error::Core(CoreError::CoseParse(_))
    ));
}
