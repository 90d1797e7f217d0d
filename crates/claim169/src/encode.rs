//! Encode pipeline: identity record → CWT → COSE → zlib → Base45.
//!
//! Credentials are signed (Sign1), signed then encrypted (Sign1 inside
//! Encrypt0), or unsigned for testing. Encryption without a signature is
//! rejected: an encrypted-but-unsigned credential would authenticate nobody.

use tracing::debug;
use zeroize::Zeroizing;

use claim169_core::cose::{build_protected, CoseEncrypt0, CoseSign1};
use claim169_core::{base45, deflate, CwtClaims, IdentityRecord};
use claim169_crypto::{
    generate_nonce, AesGcmEncryptor, EcdsaP256Signer, Ed25519Signer, Encryptor, Signer,
};

use crate::error::{Claim169Error, Result};
use crate::options::{CwtMeta, EncodeOptions, EncryptionKey, SignerKey};

/// Encode an unsigned credential. Testing only: the decode side will report
/// `verification_status = Skipped`.
pub fn encode_unsigned(
    claim: &IdentityRecord,
    meta: &CwtMeta,
    options: &EncodeOptions,
) -> Result<String> {
    let sign1 = build_sign1(claim, meta, None, options)?;
    Ok(finish(&sign1.to_bytes()))
}

/// Encode a credential signed by the given provider.
pub fn encode_with_signer(
    claim: &IdentityRecord,
    meta: &CwtMeta,
    signer: &dyn Signer,
    options: &EncodeOptions,
) -> Result<String> {
    let sign1 = build_sign1(claim, meta, Some(signer), options)?;
    Ok(finish(&sign1.to_bytes()))
}

/// Encode a credential signed with an Ed25519 private seed (32 bytes).
pub fn encode_with_ed25519(
    claim: &IdentityRecord,
    meta: &CwtMeta,
    private_seed: &[u8],
    options: &EncodeOptions,
) -> Result<String> {
    let signer = Ed25519Signer::from_seed(private_seed)?;
    encode_with_signer(claim, meta, &signer, options)
}

/// Encode a credential signed with an ECDSA P-256 private scalar (32 bytes).
pub fn encode_with_ecdsa_p256(
    claim: &IdentityRecord,
    meta: &CwtMeta,
    private_scalar: &[u8],
    options: &EncodeOptions,
) -> Result<String> {
    let signer = EcdsaP256Signer::from_scalar(private_scalar)?;
    encode_with_signer(claim, meta, &signer, options)
}

/// Encode a signed credential wrapped in an Encrypt0 envelope.
pub fn encode_with_signer_and_encryptor(
    claim: &IdentityRecord,
    meta: &CwtMeta,
    signer: &dyn Signer,
    encryptor: &dyn Encryptor,
    options: &EncodeOptions,
) -> Result<String> {
    let sign1 = build_sign1(claim, meta, Some(signer), options)?;
    // The serialized Sign1 carries the identity record; wipe it once sealed.
    let plaintext = Zeroizing::new(sign1.to_bytes());

    let alg = encryptor.algorithm();
    if alg.key_len().is_none() {
        return Err(Claim169Error::Configuration(format!(
            "{} is not an encryption algorithm",
            alg
        )));
    }
    let protected = build_protected(Some(alg));
    let aad = CoseEncrypt0::enc_structure_for(&protected);
    let iv = generate_nonce();

    let ciphertext = encryptor.encrypt(&iv, &aad, &plaintext)?;
    if ciphertext.len() != plaintext.len() + 16 {
        return Err(Claim169Error::Crypto(
            claim169_crypto::CryptoError::Encryption(format!(
                "encryptor returned {} bytes for a {}-byte plaintext",
                ciphertext.len(),
                plaintext.len()
            )),
        ));
    }

    let encrypt0 = CoseEncrypt0 {
        protected,
        kid: encryptor.key_id(),
        iv: iv.to_vec(),
        ciphertext,
    };
    debug!(alg = %alg, "sealed Sign1 into Encrypt0");
    Ok(finish(&encrypt0.to_bytes()))
}

/// Encode a credential signed with Ed25519 and encrypted with AES-256-GCM.
pub fn encode_signed_encrypted(
    claim: &IdentityRecord,
    meta: &CwtMeta,
    sign_private_seed: &[u8],
    encryption_key: &[u8],
    options: &EncodeOptions,
) -> Result<String> {
    if encryption_key.len() != 32 {
        return Err(Claim169Error::Crypto(
            claim169_crypto::CryptoError::InvalidKey(format!(
                "AES-256-GCM key must be 32 bytes, got {}",
                encryption_key.len()
            )),
        ));
    }
    let signer = Ed25519Signer::from_seed(sign_private_seed)?;
    let encryptor = AesGcmEncryptor::from_key(encryption_key)?;
    encode_with_signer_and_encryptor(claim, meta, &signer, &encryptor, options)
}

/// Encode a credential signed with Ed25519 and encrypted with AES-128-GCM.
pub fn encode_signed_encrypted_aes128(
    claim: &IdentityRecord,
    meta: &CwtMeta,
    sign_private_seed: &[u8],
    encryption_key: &[u8],
    options: &EncodeOptions,
) -> Result<String> {
    if encryption_key.len() != 16 {
        return Err(Claim169Error::Crypto(
            claim169_crypto::CryptoError::InvalidKey(format!(
                "AES-128-GCM key must be 16 bytes, got {}",
                encryption_key.len()
            )),
        ));
    }
    let signer = Ed25519Signer::from_seed(sign_private_seed)?;
    let encryptor = AesGcmEncryptor::from_key(encryption_key)?;
    encode_with_signer_and_encryptor(claim, meta, &signer, &encryptor, options)
}

/// Unified encode: dispatch on key forms.
///
/// Key-form enums make "more than one signing key" unrepresentable; the
/// remaining cross-field rule (encryption requires a signer) is checked
/// here. Without a signer, pass `allow_unsigned` to get a test credential.
pub fn encode(
    claim: &IdentityRecord,
    meta: &CwtMeta,
    signer: Option<&SignerKey>,
    encryption: Option<&EncryptionKey>,
    allow_unsigned: bool,
    options: &EncodeOptions,
) -> Result<String> {
    match (signer, encryption) {
        (None, Some(_)) => Err(Claim169Error::Configuration(
            "encryption requires a signing key".into(),
        )),
        (None, None) if allow_unsigned => encode_unsigned(claim, meta, options),
        (None, None) => Err(Claim169Error::Configuration(
            "encode requires a signing key (or allow_unsigned)".into(),
        )),
        (Some(key), encryption) => {
            let signer: Box<dyn Signer> = match key {
                SignerKey::Ed25519Seed(seed) => Box::new(Ed25519Signer::from_seed(seed)?),
                SignerKey::EcdsaP256Scalar(scalar) => {
                    Box::new(EcdsaP256Signer::from_scalar(scalar)?)
                }
            };
            match encryption {
                None => encode_with_signer(claim, meta, signer.as_ref(), options),
                Some(EncryptionKey::Aes256(key)) => {
                    encode_signed_encrypted_with(claim, meta, signer.as_ref(), key, 32, options)
                }
                Some(EncryptionKey::Aes128(key)) => {
                    encode_signed_encrypted_with(claim, meta, signer.as_ref(), key, 16, options)
                }
            }
        }
    }
}

fn encode_signed_encrypted_with(
    claim: &IdentityRecord,
    meta: &CwtMeta,
    signer: &dyn Signer,
    key: &[u8],
    expected_len: usize,
    options: &EncodeOptions,
) -> Result<String> {
    if key.len() != expected_len {
        return Err(Claim169Error::Crypto(
            claim169_crypto::CryptoError::InvalidKey(format!(
                "AES-GCM key must be {} bytes, got {}",
                expected_len,
                key.len()
            )),
        ));
    }
    let encryptor = AesGcmEncryptor::from_key(key)?;
    encode_with_signer_and_encryptor(claim, meta, signer, &encryptor, options)
}

/// Build the Sign1 envelope holding the CWT payload.
fn build_sign1(
    claim: &IdentityRecord,
    meta: &CwtMeta,
    signer: Option<&dyn Signer>,
    options: &EncodeOptions,
) -> Result<CoseSign1> {
    let claims = CwtClaims {
        issuer: meta.issuer.clone(),
        subject: meta.subject.clone(),
        expires_at: meta.expires_at,
        not_before: meta.not_before,
        issued_at: meta.issued_at,
        claim169: Some(claim.to_bytes(options.skip_biometrics)),
        unknown: Vec::new(),
    };
    let payload = claims.to_bytes();

    match signer {
        None => Ok(CoseSign1 {
            protected: build_protected(None),
            kid: None,
            payload,
            signature: Vec::new(),
        }),
        Some(signer) => {
            let alg = signer.algorithm();
            if !alg.is_signing() {
                return Err(Claim169Error::Configuration(format!(
                    "{} is not a signing algorithm",
                    alg
                )));
            }
            let protected = build_protected(Some(alg));
            let sig_structure = CoseSign1::sig_structure_for(&protected, &payload);
            let signature = signer.sign(&sig_structure)?;
            if Some(signature.len()) != alg.signature_len() {
                return Err(Claim169Error::Crypto(
                    claim169_crypto::CryptoError::Signature(format!(
                        "signer returned a {}-byte signature, {} expects {}",
                        signature.len(),
                        alg,
                        alg.signature_len().unwrap_or(0)
                    )),
                ));
            }
            debug!(alg = %alg, payload_len = payload.len(), "signed CWT payload");
            Ok(CoseSign1 {
                protected,
                kid: signer.key_id(),
                payload,
                signature,
            })
        }
    }
}

/// Compress and armor a serialized envelope.
fn finish(envelope_bytes: &[u8]) -> String {
    base45::encode(&deflate::compress(envelope_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_claim() -> IdentityRecord {
        IdentityRecord {
            id: Some("TEST".into()),
            full_name: Some("Test".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_unsigned_is_smaller_than_signed() {
        let claim = minimal_claim();
        let meta = CwtMeta {
            expires_at: Some(1_900_000_000),
            ..Default::default()
        };
        let seed = [0x42u8; 32];

        let unsigned = encode_unsigned(&claim, &meta, &EncodeOptions::default()).unwrap();
        let signed =
            encode_with_ed25519(&claim, &meta, &seed, &EncodeOptions::default()).unwrap();
        assert!(unsigned.len() < signed.len());
    }

    #[test]
    fn test_encode_rejects_short_keys() {
        let claim = minimal_claim();
        let meta = CwtMeta::default();
        assert!(encode_with_ed25519(&claim, &meta, &[0u8; 16], &EncodeOptions::default()).is_err());
        assert!(
            encode_with_ecdsa_p256(&claim, &meta, &[0u8; 16], &EncodeOptions::default()).is_err()
        );
        assert!(encode_signed_encrypted(
            &claim,
            &meta,
            &[0x42u8; 32],
            &[0u8; 16],
            &EncodeOptions::default()
        )
        .is_err());
        assert!(encode_signed_encrypted_aes128(
            &claim,
            &meta,
            &[0x42u8; 32],
            &[0u8; 32],
            &EncodeOptions::default()
        )
        .is_err());
    }

    #[test]
    fn test_unified_encode_rejects_encrypt_without_sign() {
        let err = encode(
            &minimal_claim(),
            &CwtMeta::default(),
            None,
            Some(&EncryptionKey::Aes256(vec![0u8; 32])),
            true,
            &EncodeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Claim169Error::Configuration(_)));
    }

    #[test]
    fn test_unified_encode_requires_signer_by_default() {
        let err = encode(
            &minimal_claim(),
            &CwtMeta::default(),
            None,
            None,
            false,
            &EncodeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Claim169Error::Configuration(_)));
    }

    #[test]
    fn test_output_is_base45() {
        let qr = encode_unsigned(
            &minimal_claim(),
            &CwtMeta::default(),
            &EncodeOptions::default(),
        )
        .unwrap();
        const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";
        assert!(qr.chars().all(|c| ALPHABET.contains(c)));
    }
}
