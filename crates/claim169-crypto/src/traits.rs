//! Capability traits at the crypto seam.
//!
//! The orchestrator talks to these four one-method abstractions and never
//! sees key material. Built-ins live in this crate; HSM/KMS integrations
//! implement the same traits and route on the `(algorithm, key_id)` pair the
//! decode side hands them from the COSE headers.

use claim169_core::Algorithm;
use zeroize::Zeroizing;

use crate::error::Result;

/// Produces COSE signatures over a `Sig_structure`.
pub trait Signer {
    /// The signature algorithm, recorded in the protected header.
    fn algorithm(&self) -> Algorithm;

    /// Key identifier for the unprotected header, if any.
    fn key_id(&self) -> Option<Vec<u8>> {
        None
    }

    /// Sign the given `Sig_structure` bytes.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Verifies COSE signatures over a `Sig_structure`.
pub trait SignatureVerifier {
    /// Verify `signature` over `data`.
    ///
    /// `algorithm` and `key_id` come from the envelope headers so multi-key
    /// backends can route the request.
    fn verify(
        &self,
        algorithm: Algorithm,
        key_id: Option<&[u8]>,
        data: &[u8],
        signature: &[u8],
    ) -> Result<()>;
}

/// AEAD-encrypts an Encrypt0 plaintext.
pub trait Encryptor {
    /// The AEAD algorithm, recorded in the protected header.
    fn algorithm(&self) -> Algorithm;

    /// Key identifier for the unprotected header, if any.
    fn key_id(&self) -> Option<Vec<u8>> {
        None
    }

    /// Encrypt `plaintext` under the caller-supplied 12-byte IV with the
    /// `Enc_structure` as associated data. Returns ciphertext with the
    /// authentication tag appended. Providers never invent their own IV.
    fn encrypt(&self, iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>;
}

/// AEAD-decrypts an Encrypt0 ciphertext.
pub trait Decryptor {
    /// Decrypt `ciphertext` (tag appended) under the IV and associated data
    /// from the envelope. The plaintext comes back in a wipe-on-drop buffer.
    fn decrypt(
        &self,
        algorithm: Algorithm,
        key_id: Option<&[u8]>,
        iv: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>>;
}
