//! # Claim 169 Crypto
//!
//! The crypto capability surface for Claim 169 credentials.
//!
//! Four one-method traits sit at the seam between the codec pipeline and
//! the key material:
//!
//! - [`Signer`] / [`SignatureVerifier`] for COSE Sign1
//! - [`Encryptor`] / [`Decryptor`] for COSE Encrypt0
//!
//! Built-in providers cover EdDSA over Ed25519, ES256 over P-256, and
//! AES-GCM with 128- or 256-bit direct keys. Integrations with HSMs or key
//! management services implement the same traits; the decode side hands
//! them the `(algorithm, key_id)` pair from the COSE headers for routing.
//! Private key material never crosses the trait boundary.

pub mod aes;
pub mod ed25519;
pub mod error;
pub mod es256;
pub mod nonce;
pub mod traits;

pub use aes::{AesGcmDecryptor, AesGcmEncryptor};
pub use ed25519::{Ed25519Signer, Ed25519Verifier};
pub use error::{CryptoError, Result};
pub use es256::{EcdsaP256Signer, EcdsaP256Verifier};
pub use nonce::{generate_nonce, IV_LEN};
pub use traits::{Decryptor, Encryptor, SignatureVerifier, Signer};
