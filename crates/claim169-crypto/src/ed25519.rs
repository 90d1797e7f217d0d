//! EdDSA over Ed25519 (RFC 8032), the `-8` COSE algorithm.

use ed25519_dalek::pkcs8::DecodePublicKey;
use ed25519_dalek::{
    Signature, Signer as DalekSigner, SigningKey, Verifier as DalekVerifier, VerifyingKey,
};
use zeroize::Zeroize;

use claim169_core::Algorithm;

use crate::error::{CryptoError, Result};
use crate::traits::{SignatureVerifier, Signer};

/// Ed25519 seed length in bytes.
pub const SEED_LEN: usize = 32;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Signs with an Ed25519 private seed. Signatures are deterministic.
pub struct Ed25519Signer {
    signing_key: SigningKey,
    kid: Option<Vec<u8>>,
}

impl Ed25519Signer {
    /// Build from a 32-byte private seed.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let mut bytes: [u8; SEED_LEN] = seed.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "Ed25519 seed must be {} bytes, got {}",
                SEED_LEN,
                seed.len()
            ))
        })?;
        let signing_key = SigningKey::from_bytes(&bytes);
        bytes.zeroize();
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

    /// The corresponding public key.
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.signing_key.verifying_key().to_bytes()
    }
}

impl Signer for Ed25519Signer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::EdDsa
    }

    fn key_id(&self) -> Option<Vec<u8>> {
        self.kid.clone()
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.signing_key.sign(data).to_bytes().to_vec())
    }
}

/// Verifies Ed25519 signatures against a raw or PEM-loaded public key.
pub struct Ed25519Verifier {
    verifying_key: VerifyingKey,
}

impl Ed25519Verifier {
    /// Build from a raw 32-byte public key.
    pub fn from_bytes(public_key: &[u8]) -> Result<Self> {
        let bytes: [u8; PUBLIC_KEY_LEN] = public_key.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "Ed25519 public key must be {} bytes, got {}",
                PUBLIC_KEY_LEN,
                public_key.len()
            ))
        })?;
        let verifying_key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| CryptoError::InvalidKey(format!("invalid Ed25519 public key: {}", e)))?;
        Ok(Self { verifying_key })
    }

    /// Build from an SPKI PEM public key.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let verifying_key = VerifyingKey::from_public_key_pem(pem)
            .map_err(|e| CryptoError::InvalidKey(format!("invalid Ed25519 PEM: {}", e)))?;
        Ok(Self { verifying_key })
    }
}

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        algorithm: Algorithm,
        _key_id: Option<&[u8]>,
        data: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        if algorithm != Algorithm::EdDsa {
            return Err(CryptoError::UnsupportedAlgorithm(algorithm));
        }
        let bytes: [u8; SIGNATURE_LEN] = signature.try_into().map_err(|_| {
            CryptoError::Signature(format!(
                "Ed25519 signature must be {} bytes, got {}",
                SIGNATURE_LEN,
                signature.len()
            ))
        })?;
        self.verifying_key
            .verify(data, &Signature::from_bytes(&bytes))
            .map_err(|_| CryptoError::Signature("Ed25519 verification failed".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 8032 test vector 1.
    const SEED_HEX: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const PUBLIC_HEX: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";

    #[test]
    fn test_public_key_derivation() {
        let seed = hex::decode(SEED_HEX).unwrap();
        let signer = Ed25519Signer::from_seed(&seed).unwrap();
        assert_eq!(hex::encode(signer.public_key_bytes()), PUBLIC_HEX);
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let seed = hex::decode(SEED_HEX).unwrap();
        let signer = Ed25519Signer::from_seed(&seed).unwrap();
        let verifier = Ed25519Verifier::from_bytes(&hex::decode(PUBLIC_HEX).unwrap()).unwrap();

        let data = b"Sig_structure bytes";
        let sig = signer.sign(data).unwrap();
        assert_eq!(sig.len(), SIGNATURE_LEN);
        verifier
            .verify(Algorithm::EdDsa, None, data, &sig)
            .expect("valid signature should verify");
    }

    #[test]
    fn test_signing_is_deterministic() {
        let seed = hex::decode(SEED_HEX).unwrap();
        let signer = Ed25519Signer::from_seed(&seed).unwrap();
        assert_eq!(signer.sign(b"m").unwrap(), signer.sign(b"m").unwrap());
    }

    #[test]
    fn test_tampered_message_fails() {
        let seed = hex::decode(SEED_HEX).unwrap();
        let signer = Ed25519Signer::from_seed(&seed).unwrap();
        let verifier = Ed25519Verifier::from_bytes(&hex::decode(PUBLIC_HEX).unwrap()).unwrap();

        let sig = signer.sign(b"message").unwrap();
        assert!(verifier
            .verify(Algorithm::EdDsa, None, b"messagE", &sig)
            .is_err());
    }

    #[test]
    fn test_wrong_key_fails() {
        let seed = hex::decode(SEED_HEX).unwrap();
        let signer = Ed25519Signer::from_seed(&seed).unwrap();
        let other = Ed25519Signer::from_seed(&[0x42; 32]).unwrap();
        let verifier = Ed25519Verifier::from_bytes(&other.public_key_bytes()).unwrap();

        let sig = signer.sign(b"message").unwrap();
        assert!(verifier
            .verify(Algorithm::EdDsa, None, b"message", &sig)
            .is_err());
    }

    #[test]
    fn test_rejects_wrong_algorithm() {
        let verifier = Ed25519Verifier::from_bytes(&hex::decode(PUBLIC_HEX).unwrap()).unwrap();
        assert!(matches!(
            verifier.verify(Algorithm::Es256, None, b"m", &[0u8; 64]),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_rejects_short_keys() {
        assert!(Ed25519Signer::from_seed(&[0u8; 16]).is_err());
        assert!(Ed25519Verifier::from_bytes(&[0u8; 16]).is_err());
    }
}
