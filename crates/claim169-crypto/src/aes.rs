//! AES-GCM providers for COSE Encrypt0 (A128GCM and A256GCM).
//!
//! The IV always comes from the caller (the orchestrator generates one per
//! credential); the `Enc_structure` is passed through as AEAD associated
//! data. Key bytes live in wipe-on-drop buffers.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use claim169_core::Algorithm;

use crate::error::{CryptoError, Result};
use crate::nonce::IV_LEN;
use crate::traits::{Decryptor, Encryptor};

fn algorithm_for_key(key: &[u8]) -> Result<Algorithm> {
    match key.len() {
        16 => Ok(Algorithm::A128Gcm),
        32 => Ok(Algorithm::A256Gcm),
        n => Err(CryptoError::InvalidKey(format!(
            "AES-GCM key must be 16 or 32 bytes, got {}",
            n
        ))),
    }
}

fn check_iv(iv: &[u8]) -> Result<()> {
    if iv.len() != IV_LEN {
        return Err(CryptoError::InvalidKey(format!(
            "AES-GCM IV must be {} bytes, got {}",
            IV_LEN,
            iv.len()
        )));
    }
    Ok(())
}

fn seal(key: &[u8], alg: Algorithm, iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_iv(iv)?;
    let payload = Payload {
        msg: plaintext,
        aad,
    };
    let nonce = Nonce::from_slice(iv);
    let result = match alg {
        Algorithm::A128Gcm => Aes128Gcm::new_from_slice(key)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?
            .encrypt(nonce, payload),
        Algorithm::A256Gcm => Aes256Gcm::new_from_slice(key)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?
            .encrypt(nonce, payload),
        other => return Err(CryptoError::UnsupportedAlgorithm(other)),
    };
    result.map_err(|_| CryptoError::Encryption("AES-GCM encryption failed".into()))
}

fn open(
    key: &[u8],
    alg: Algorithm,
    iv: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    check_iv(iv)?;
    let payload = Payload {
        msg: ciphertext,
        aad,
    };
    let nonce = Nonce::from_slice(iv);
    let result = match alg {
        Algorithm::A128Gcm => Aes128Gcm::new_from_slice(key)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?
            .decrypt(nonce, payload),
        Algorithm::A256Gcm => Aes256Gcm::new_from_slice(key)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?
            .decrypt(nonce, payload),
        other => return Err(CryptoError::UnsupportedAlgorithm(other)),
    };
    result
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::Decryption("AEAD tag mismatch or wrong key".into()))
}

/// Encrypts Encrypt0 plaintexts with a direct AES-GCM key.
pub struct AesGcmEncryptor {
    key: Zeroizing<Vec<u8>>,
    algorithm: Algorithm,
    kid: Option<Vec<u8>>,
}

impl AesGcmEncryptor {
    /// Build from a 16-byte (A128GCM) or 32-byte (A256GCM) key.
    pub fn from_key(key: &[u8]) -> Result<Self> {
        Ok(Self {
            algorithm: algorithm_for_key(key)?,
            key: Zeroizing::new(key.to_vec()),
            kid: None,
        })
    }

    /// Attach a key identifier to be carried in the unprotected header.
    pub fn with_key_id(mut self, kid: impl Into<Vec<u8>>) -> Self {
        self.kid = Some(kid.into());
        self
    }
}

impl Encryptor for AesGcmEncryptor {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn key_id(&self) -> Option<Vec<u8>> {
        self.kid.clone()
    }

    fn encrypt(&self, iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        seal(&self.key, self.algorithm, iv, aad, plaintext)
    }
}

/// Decrypts Encrypt0 ciphertexts with a direct AES-GCM key.
pub struct AesGcmDecryptor {
    key: Zeroizing<Vec<u8>>,
    algorithm: Algorithm,
}

impl AesGcmDecryptor {
    /// Build from a 16-byte (A128GCM) or 32-byte (A256GCM) key.
    pub fn from_key(key: &[u8]) -> Result<Self> {
        Ok(Self {
            algorithm: algorithm_for_key(key)?,
            key: Zeroizing::new(key.to_vec()),
        })
    }
}

impl Decryptor for AesGcmDecryptor {
    fn decrypt(
        &self,
        algorithm: Algorithm,
        _key_id: Option<&[u8]>,
        iv: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        if algorithm != self.algorithm {
            return Err(CryptoError::UnsupportedAlgorithm(algorithm));
        }
        open(&self.key, algorithm, iv, aad, ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip_256() {
        let key = [0x01u8; 32];
        let iv = [0x02u8; IV_LEN];
        let aad = b"Enc_structure";

        let encryptor = AesGcmEncryptor::from_key(&key).unwrap();
        assert_eq!(encryptor.algorithm(), Algorithm::A256Gcm);

        let ciphertext = encryptor.encrypt(&iv, aad, b"inner sign1").unwrap();
        // plaintext + 16-byte tag
        assert_eq!(ciphertext.len(), b"inner sign1".len() + 16);

        let decryptor = AesGcmDecryptor::from_key(&key).unwrap();
        let plaintext = decryptor
            .decrypt(Algorithm::A256Gcm, None, &iv, aad, &ciphertext)
            .unwrap();
        assert_eq!(&plaintext[..], b"inner sign1");
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip_128() {
        let key = [0x0au8; 16];
        let iv = [0x0bu8; IV_LEN];

        let encryptor = AesGcmEncryptor::from_key(&key).unwrap();
        assert_eq!(encryptor.algorithm(), Algorithm::A128Gcm);

        let ciphertext = encryptor.encrypt(&iv, b"aad", b"payload").unwrap();
        let decryptor = AesGcmDecryptor::from_key(&key).unwrap();
        let plaintext = decryptor
            .decrypt(Algorithm::A128Gcm, None, &iv, b"aad", &ciphertext)
            .unwrap();
        assert_eq!(&plaintext[..], b"payload");
    }

    #[test]
    fn test_wrong_key_fails() {
        let encryptor = AesGcmEncryptor::from_key(&[0x01u8; 32]).unwrap();
        let ciphertext = encryptor.encrypt(&[0u8; IV_LEN], b"", b"secret").unwrap();

        let decryptor = AesGcmDecryptor::from_key(&[0u8; 32]).unwrap();
        assert!(matches!(
            decryptor.decrypt(Algorithm::A256Gcm, None, &[0u8; IV_LEN], b"", &ciphertext),
            Err(CryptoError::Decryption(_))
        ));
    }

    #[test]
    fn test_wrong_aad_fails() {
        let key = [0x01u8; 32];
        let iv = [0u8; IV_LEN];
        let encryptor = AesGcmEncryptor::from_key(&key).unwrap();
        let ciphertext = encryptor.encrypt(&iv, b"aad-one", b"secret").unwrap();

        let decryptor = AesGcmDecryptor::from_key(&key).unwrap();
        assert!(decryptor
            .decrypt(Algorithm::A256Gcm, None, &iv, b"aad-two", &ciphertext)
            .is_err());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = [0x01u8; 32];
        let iv = [0u8; IV_LEN];
        let encryptor = AesGcmEncryptor::from_key(&key).unwrap();
        let mut ciphertext = encryptor.encrypt(&iv, b"", b"secret").unwrap();
        ciphertext[0] ^= 0x01;

        let decryptor = AesGcmDecryptor::from_key(&key).unwrap();
        assert!(decryptor
            .decrypt(Algorithm::A256Gcm, None, &iv, b"", &ciphertext)
            .is_err());
    }

    #[test]
    fn test_rejects_bad_key_and_iv_lengths() {
        assert!(AesGcmEncryptor::from_key(&[0u8; 24]).is_err());
        assert!(AesGcmDecryptor::from_key(&[0u8; 8]).is_err());

        let encryptor = AesGcmEncryptor::from_key(&[0u8; 32]).unwrap();
        assert!(encryptor.encrypt(&[0u8; 8], b"", b"p").is_err());
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let decryptor = AesGcmDecryptor::from_key(&[0u8; 16]).unwrap();
        assert!(matches!(
            decryptor.decrypt(Algorithm::A256Gcm, None, &[0u8; IV_LEN], b"", &[0u8; 32]),
            Err(CryptoError::UnsupportedAlgorithm(_))
        ));
    }
}
