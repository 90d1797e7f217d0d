//! Decode pipeline: Base45 → zlib → CBOR → COSE → CWT → identity record.
//!
//! Every stage failure halts the decode with a typed error; there is no
//! partial result. The one advertised exception is `skip_biometrics`, which
//! omits only the biometric sub-parse.

use tracing::{debug, warn};

use claim169_core::{
    base45, cbor, deflate, CoreError, CoseSign1, CwtClaims, Envelope, IdentityRecord,
};
use claim169_crypto::{
    AesGcmDecryptor, Decryptor, EcdsaP256Verifier, Ed25519Verifier, SignatureVerifier,
};
use serde::{Deserialize, Serialize};

use crate::error::{Claim169Error, Result};
use crate::options::{CwtMeta, DecodeOptions, VerifierKey};
use crate::validate;

/// Whether and how the credential's signature was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// A verifier ran and accepted the signature.
    Verified,
    /// No verifier ran (unsigned credential, or none supplied).
    Skipped,
    /// A verifier ran and rejected the signature, but `allow_unverified`
    /// asked for the result anyway.
    Failed,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Skipped => "skipped",
            VerificationStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully decoded credential.
#[derive(Debug, Clone)]
pub struct DecodeResult {
    /// The typed identity record.
    pub claim169: IdentityRecord,
    /// The CWT metadata (issuer, subject, validity window).
    pub cwt_meta: CwtMeta,
    /// Signature verification outcome.
    pub verification_status: VerificationStatus,
}

/// Decode without any signature verification.
///
/// Testing and diagnostics only; the result always reports
/// [`VerificationStatus::Skipped`].
pub fn decode_unverified(qr_text: &str, options: &DecodeOptions) -> Result<DecodeResult> {
    let mut options = options.clone();
    options.allow_unverified = true;
    match decode_envelope(qr_text, &options)? {
        Envelope::Sign1(sign1) => finish_sign1(&sign1, None, &options),
        Envelope::Encrypt0(_) => Err(Claim169Error::Configuration(
            "credential is encrypted; use a decrypting decode".into(),
        )),
    }
}

/// Decode and verify with a custom verifier capability.
pub fn decode_with_verifier(
    qr_text: &str,
    verifier: &dyn SignatureVerifier,
    options: &DecodeOptions,
) -> Result<DecodeResult> {
    match decode_envelope(qr_text, options)? {
        Envelope::Sign1(sign1) => finish_sign1(&sign1, Some(verifier), options),
        Envelope::Encrypt0(_) => Err(Claim169Error::Configuration(
            "credential is encrypted; use a decrypting decode".into(),
        )),
    }
}

/// Decode and verify with a raw Ed25519 public key (32 bytes).
pub fn decode_with_ed25519(
    qr_text: &str,
    public_key: &[u8],
    options: &DecodeOptions,
) -> Result<DecodeResult> {
    let verifier = Ed25519Verifier::from_bytes(public_key)?;
    decode_with_verifier(qr_text, &verifier, options)
}

/// Decode and verify with an SPKI PEM Ed25519 public key.
pub fn decode_with_ed25519_pem(
    qr_text: &str,
    public_key_pem: &str,
    options: &DecodeOptions,
) -> Result<DecodeResult> {
    let verifier = Ed25519Verifier::from_pem(public_key_pem)?;
    decode_with_verifier(qr_text, &verifier, options)
}

/// Decode and verify with a SEC1 P-256 public key (33 or 65 bytes).
pub fn decode_with_ecdsa_p256(
    qr_text: &str,
    public_key: &[u8],
    options: &DecodeOptions,
) -> Result<DecodeResult> {
    let verifier = EcdsaP256Verifier::from_sec1_bytes(public_key)?;
    decode_with_verifier(qr_text, &verifier, options)
}

/// Decode and verify with an SPKI PEM P-256 public key.
pub fn decode_with_ecdsa_p256_pem(
    qr_text: &str,
    public_key_pem: &str,
    options: &DecodeOptions,
) -> Result<DecodeResult> {
    let verifier = EcdsaP256Verifier::from_pem(public_key_pem)?;
    decode_with_verifier(qr_text, &verifier, options)
}

/// Decrypt with a custom decryptor, then verify the inner Sign1.
///
/// Without a verifier, `allow_unverified` must be set: decryption alone
/// authenticates the symmetric key holder, not the issuer.
pub fn decode_with_decryptor(
    qr_text: &str,
    decryptor: &dyn Decryptor,
    verifier: Option<&dyn SignatureVerifier>,
    options: &DecodeOptions,
) -> Result<DecodeResult> {
    if verifier.is_none() && !options.allow_unverified {
        return Err(Claim169Error::Configuration(
            "decrypting decode requires a verifier or allow_unverified".into(),
        ));
    }

    let encrypt0 = match decode_envelope(qr_text, options)? {
        Envelope::Encrypt0(encrypt0) => encrypt0,
        Envelope::Sign1(_) => {
            return Err(Claim169Error::Configuration(
                "credential is not encrypted; use a plain decode".into(),
            ))
        }
    };

    let alg = encrypt0
        .algorithm()
        .map_err(Claim169Error::from)?
        .ok_or_else(|| {
            Claim169Error::Core(CoreError::CoseParse(
                "Encrypt0 protected header carries no algorithm".into(),
            ))
        })?;
    let aad = encrypt0.enc_structure();
    let plaintext = decryptor.decrypt(
        alg,
        encrypt0.kid.as_deref(),
        &encrypt0.iv,
        &aad,
        &encrypt0.ciphertext,
    )?;
    debug!(alg = %alg, plaintext_len = plaintext.len(), "decrypted Encrypt0");

    // The plaintext is a complete Sign1 (sign-then-encrypt); the AEAD tag
    // already authenticated it, so the legacy untagged form is tolerated.
    let value = cbor::decode_with_limit(&plaintext, options.max_decompressed_bytes)?;
    match Envelope::from_value(&value, true)? {
        Envelope::Sign1(sign1) => finish_sign1(&sign1, verifier, options),
        Envelope::Encrypt0(_) => Err(Claim169Error::Core(CoreError::CoseParse(
            "Encrypt0 plaintext is not a Sign1".into(),
        ))),
    }
}

/// Decrypt with a 32-byte AES-256-GCM key, then verify the inner Sign1.
pub fn decode_encrypted_aes256(
    qr_text: &str,
    key: &[u8],
    verifier: Option<&dyn SignatureVerifier>,
    options: &DecodeOptions,
) -> Result<DecodeResult> {
    if key.len() != 32 {
        return Err(Claim169Error::Crypto(
            claim169_crypto::CryptoError::InvalidKey(format!(
                "AES-256-GCM key must be 32 bytes, got {}",
                key.len()
            )),
        ));
    }
    let decryptor = AesGcmDecryptor::from_key(key)?;
    decode_with_decryptor(qr_text, &decryptor, verifier, options)
}

/// Decrypt with a 16-byte AES-128-GCM key, then verify the inner Sign1.
pub fn decode_encrypted_aes128(
    qr_text: &str,
    key: &[u8],
    verifier: Option<&dyn SignatureVerifier>,
    options: &DecodeOptions,
) -> Result<DecodeResult> {
    if key.len() != 16 {
        return Err(Claim169Error::Crypto(
            claim169_crypto::CryptoError::InvalidKey(format!(
                "AES-128-GCM key must be 16 bytes, got {}",
                key.len()
            )),
        ));
    }
    let decryptor = AesGcmDecryptor::from_key(key)?;
    decode_with_decryptor(qr_text, &decryptor, verifier, options)
}

/// Unified decode: dispatch on the verifier key form.
///
/// With no key, `allow_unverified` must be set explicitly.
pub fn decode(
    qr_text: &str,
    verifier: Option<&VerifierKey>,
    options: &DecodeOptions,
) -> Result<DecodeResult> {
    let result = match verifier {
        Some(VerifierKey::Ed25519(key)) => decode_with_ed25519(qr_text, key, options),
        Some(VerifierKey::EcdsaP256(key)) => decode_with_ecdsa_p256(qr_text, key, options),
        Some(VerifierKey::Ed25519Pem(pem)) => decode_with_ed25519_pem(qr_text, pem, options),
        Some(VerifierKey::EcdsaP256Pem(pem)) => decode_with_ecdsa_p256_pem(qr_text, pem, options),
        None if options.allow_unverified => decode_unverified(qr_text, options),
        None => Err(Claim169Error::Configuration(
            "decode requires a verification key or allow_unverified".into(),
        )),
    }?;
    Ok(result)
}

/// Run the outer text layers and parse the COSE envelope.
fn decode_envelope(qr_text: &str, options: &DecodeOptions) -> Result<Envelope> {
    if qr_text.is_empty() {
        return Err(Claim169Error::Core(CoreError::Base45Decode(
            "empty credential".into(),
        )));
    }
    let compressed = base45::decode(qr_text.trim())?;
    let cbor_bytes = deflate::decompress(&compressed, options.max_decompressed_bytes)?;
    debug!(
        compressed_len = compressed.len(),
        decompressed_len = cbor_bytes.len(),
        "decompressed credential"
    );
    let value = cbor::decode_with_limit(&cbor_bytes, options.max_decompressed_bytes)?;
    Ok(Envelope::from_value(&value, options.allow_unverified)?)
}

/// Verify (if asked), then parse CWT claims and the identity record.
fn finish_sign1(
    sign1: &CoseSign1,
    verifier: Option<&dyn SignatureVerifier>,
    options: &DecodeOptions,
) -> Result<DecodeResult> {
    let verification_status = match verifier {
        None => VerificationStatus::Skipped,
        Some(verifier) => match verify_sign1(sign1, verifier) {
            Ok(()) => VerificationStatus::Verified,
            Err(err) if options.allow_unverified => {
                warn!(error = %err, "signature verification failed; continuing unverified");
                VerificationStatus::Failed
            }
            Err(err) => return Err(err),
        },
    };

    let claims = CwtClaims::from_bytes(&sign1.payload)?;
    if options.validate_timestamps {
        claims.validate_timestamps(current_time(options), options.clock_skew_tolerance_seconds)?;
    }
    if claims.expires_at.is_none() {
        warn!("credential carries no exp claim");
    }
    if !claims.unknown.is_empty() {
        warn!(count = claims.unknown.len(), "credential carries unrecognized CWT claims");
    }

    let identity_bytes = claims.claim169_bytes()?;
    let record = IdentityRecord::from_bytes(identity_bytes, options.skip_biometrics)?;
    validate::validate_record(&record)?;
    debug!(status = %verification_status, "decoded credential");

    Ok(DecodeResult {
        claim169: record,
        cwt_meta: CwtMeta {
            issuer: claims.issuer.clone(),
            subject: claims.subject.clone(),
            expires_at: claims.expires_at,
            not_before: claims.not_before,
            issued_at: claims.issued_at,
        },
        verification_status,
    })
}

fn verify_sign1(sign1: &CoseSign1, verifier: &dyn SignatureVerifier) -> Result<()> {
    let alg = sign1.algorithm()?.ok_or_else(|| {
        Claim169Error::Crypto(claim169_crypto::CryptoError::Signature(
            "credential carries no signature algorithm".into(),
        ))
    })?;
    if sign1.signature.is_empty() {
        return Err(Claim169Error::Crypto(
            claim169_crypto::CryptoError::Signature("credential is unsigned".into()),
        ));
    }
    // Sig_structure embeds the protected bytes exactly as received.
    let sig_structure = sign1.sig_structure();
    verifier
        .verify(alg, sign1.kid.as_deref(), &sig_structure, &sign1.signature)
        .map_err(Claim169Error::from)
}

fn current_time(options: &DecodeOptions) -> u64 {
    options.now.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    })
}
