//! ES256: ECDSA with SHA-256 over P-256, the `-7` COSE algorithm.
//!
//! Signatures are the COSE fixed-width `r || s` form (64 bytes), not DER.
//! Public keys are SEC1 points, compressed (33 bytes) or uncompressed
//! (65 bytes, `0x04 || X || Y`).

use p256::ecdsa::signature::{Signer as P256Signer, Verifier as P256Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::pkcs8::DecodePublicKey;
use zeroize::Zeroizing;

use claim169_core::Algorithm;

use crate::error::{CryptoError, Result};
use crate::traits::{SignatureVerifier, Signer};

/// P-256 private scalar length in bytes.
pub const SCALAR_LEN: usize = 32;

/// ES256 signature length in bytes (`r || s`).
pub const SIGNATURE_LEN: usize = 64;

/// Signs with a P-256 private scalar (RFC 6979 deterministic nonces).
pub struct EcdsaP256Signer {
    signing_key: SigningKey,
    kid: Option<Vec<u8>>,
}

impl EcdsaP256Signer {
    /// Build from a 32-byte big-endian private scalar.
    pub fn from_scalar(scalar: &[u8]) -> Result<Self> {
        if scalar.len() != SCALAR_LEN {
            return Err(CryptoError::InvalidKey(format!(
                "P-256 private scalar must be {} bytes, got {}",
                SCALAR_LEN,
                scalar.len()
            )));
        }
        let scalar = Zeroizing::new(scalar.to_vec());
        let signing_key = SigningKey::from_slice(&scalar)
            .map_err(|e| CryptoError::InvalidKey(format!("invalid P-256 scalar: {}", e)))?;
        Ok(Self {
            signing_key,
            kid: None,
        })
    }

    /// Attach a key identifier to be carried in the unprotected header.
    pub fn with_key_id(mut self, kid: impl Into<Vec<u8>>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    /// The corresponding public key, SEC1 uncompressed (65 bytes).
    pub fn public_key_bytes(&self) -> Vec<u8> {
        VerifyingKey::from(&self.signing_key)
            .to_encoded_point(false)
            .as_bytes()
            .to_vec()
    }
}

impl Signer for EcdsaP256Signer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Es256
    }

    fn key_id(&self) -> Option<Vec<u8>> {
        self.kid.clone()
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signature: Signature = self.signing_key.sign(data);
        Ok(signature.to_bytes().to_vec())
    }
}

/// Verifies ES256 signatures against a SEC1 or PEM-loaded public key.
pub struct EcdsaP256Verifier {
    verifying_key: VerifyingKey,
}

impl EcdsaP256Verifier {
    /// Build from a SEC1 public key, compressed or uncompressed.
    pub fn from_sec1_bytes(public_key: &[u8]) -> Result<Self> {
        if public_key.len() != 33 && public_key.len() != 65 {
            return Err(CryptoError::InvalidKey(format!(
                "P-256 public key must be 33 or 65 bytes SEC1, got {}",
                public_key.len()
            )));
        }
        let verifying_key = VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|e| CryptoError::InvalidKey(format!("invalid P-256 public key: {}", e)))?;
        Ok(Self { verifying_key })
    }

    /// Build from an SPKI PEM public key.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let verifying_key = VerifyingKey::from_public_key_pem(pem)
            .map_err(|e| CryptoError::InvalidKey(format!("invalid P-256 PEM: {}", e)))?;
        Ok(Self { verifying_key })
    }
}

impl SignatureVerifier for EcdsaP256Verifier {
    fn verify(
        &self,
        algorithm: Algorithm,
        _key_id: Option<&[u8]>,
        data: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        if algorithm != Algorithm::Es256 {
            return Err(CryptoError::UnsupportedAlgorithm(algorithm));
        }
        if signature.len() != SIGNATURE_LEN {
            return Err(CryptoError::Signature(format!(
                "ES256 signature must be {} bytes, got {}",
                SIGNATURE_LEN,
                signature.len()
            )));
        }
        let signature = Signature::from_slice(signature)
            .map_err(|e| CryptoError::Signature(format!("malformed ES256 signature: {}", e)))?;
        self.verifying_key
            .verify(data, &signature)
            .map_err(|_| CryptoError::Signature("ES256 verification failed".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_signer() -> EcdsaP256Signer {
        // Any nonzero scalar below the group order works as a test key.
        let scalar = [0x17u8; 32];
        EcdsaP256Signer::from_scalar(&scalar).unwrap()
    }

    #[test]
    fn test_sign_verify_roundtrip_uncompressed() {
        let signer = test_signer();
        let public = signer.public_key_bytes();
        assert_eq!(public.len(), 65);
        assert_eq!(public[0], 0x04);

        let verifier = EcdsaP256Verifier::from_sec1_bytes(&public).unwrap();
        let sig = signer.sign(b"Sig_structure bytes").unwrap();
        assert_eq!(sig.len(), SIGNATURE_LEN);
        verifier
            .verify(Algorithm::Es256, None, b"Sig_structure bytes", &sig)
            .expect("valid signature should verify");
    }

    #[test]
    fn test_verify_with_compressed_key() {
        let signer = test_signer();
        let uncompressed = signer.public_key_bytes();
        let compressed = VerifyingKey::from_sec1_bytes(&uncompressed)
            .unwrap()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec();
        assert_eq!(compressed.len(), 33);

        let verifier = EcdsaP256Verifier::from_sec1_bytes(&compressed).unwrap();
        let sig = signer.sign(b"message").unwrap();
        verifier
            .verify(Algorithm::Es256, None, b"message", &sig)
            .expect("compressed key should verify");
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = test_signer();
        assert_eq!(signer.sign(b"m").unwrap(), signer.sign(b"m").unwrap());
    }

    #[test]
    fn test_tampered_message_fails() {
        let signer = test_signer();
        let verifier = EcdsaP256Verifier::from_sec1_bytes(&signer.public_key_bytes()).unwrap();
        let sig = signer.sign(b"message").unwrap();
        assert!(verifier
            .verify(Algorithm::Es256, None, b"messagE", &sig)
            .is_err());
    }

    #[test]
    fn test_wrong_key_fails() {
        let signer = test_signer();
        let other = EcdsaP256Signer::from_scalar(&[0x2au8; 32]).unwrap();
        let verifier = EcdsaP256Verifier::from_sec1_bytes(&other.public_key_bytes()).unwrap();
        let sig = signer.sign(b"message").unwrap();
        assert!(verifier
            .verify(Algorithm::Es256, None, b"message", &sig)
            .is_err());
    }

    #[test]
    fn test_rejects_bad_key_lengths() {
        assert!(EcdsaP256Signer::from_scalar(&[0u8; 16]).is_err());
        assert!(EcdsaP256Verifier::from_sec1_bytes(&[0x04u8; 64]).is_err());
    }

    #[test]
    fn test_rejects_wrong_algorithm() {
        let verifier =
            EcdsaP256Verifier::from_sec1_bytes(&test_signer().public_key_bytes()).unwrap();
        assert!(matches!(
            verifier.verify(Algorithm::EdDsa, None, b"m", &[0u8; 64]),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
    }
}
