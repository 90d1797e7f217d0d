//! Fixtures for setting up credential test scenarios quickly.

use claim169::{
    encode_signed_encrypted, encode_with_ed25519, CwtMeta, EncodeOptions, IdentityRecord,
};

use crate::vectors::{aes256_key, ed25519_public_key, ed25519_seed};

/// A ready-made signing/encryption context with the fixed test keys.
pub struct TestFixture {
    pub ed25519_seed: Vec<u8>,
    pub ed25519_public_key: Vec<u8>,
    pub aes256_key: Vec<u8>,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            ed25519_seed: ed25519_seed(),
            ed25519_public_key: ed25519_public_key(),
            aes256_key: aes256_key(),
        }
    }

    /// A small identity record with the given id.
    pub fn make_claim(&self, id: &str) -> IdentityRecord {
        IdentityRecord {
            id: Some(id.to_string()),
            full_name: Some(format!("{} Person", id)),
            ..Default::default()
        }
    }

    /// Metadata with a far-future expiry.
    pub fn make_meta(&self, issuer: &str) -> CwtMeta {
        CwtMeta {
            issuer: Some(issuer.to_string()),
            issued_at: Some(1_700_000_000),
            expires_at: Some(1_900_000_000),
            ..Default::default()
        }
    }

    /// An Ed25519-signed credential for the given record.
    pub fn make_signed(&self, claim: &IdentityRecord, meta: &CwtMeta) -> String {
        encode_with_ed25519(claim, meta, &self.ed25519_seed, &EncodeOptions::default())
            .expect("fixture encodes")
    }

    /// A signed-then-encrypted credential for the given record.
    pub fn make_signed_encrypted(&self, claim: &IdentityRecord, meta: &CwtMeta) -> String {
        encode_signed_encrypted(
            claim,
            meta,
            &self.ed25519_seed,
            &self.aes256_key,
            &EncodeOptions::default(),
        )
        .expect("fixture encodes")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim169::{decode_encrypted_aes256, decode_with_ed25519, DecodeOptions, Ed25519Verifier};

    #[test]
    fn test_fixture_signed_roundtrip() {
        let fixture = TestFixture::new();
        let claim = fixture.make_claim("FIXTURE-001");
        let meta = fixture.make_meta("https://fixture.example.org");
        let qr = fixture.make_signed(&claim, &meta);

        let result =
            decode_with_ed25519(&qr, &fixture.ed25519_public_key, &DecodeOptions::default())
                .unwrap();
        assert_eq!(result.claim169, claim);
    }

    #[test]
    fn test_fixture_encrypted_roundtrip() {
        let fixture = TestFixture::new();
        let claim = fixture.make_claim("FIXTURE-002");
        let meta = fixture.make_meta("https://fixture.example.org");
        let qr = fixture.make_signed_encrypted(&claim, &meta);

        let verifier = Ed25519Verifier::from_bytes(&fixture.ed25519_public_key).unwrap();
        let result = decode_encrypted_aes256(
            &qr,
            &fixture.aes256_key,
            Some(&verifier),
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(result.claim169, claim);
    }
}
