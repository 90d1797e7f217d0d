//! # Claim 169 Testkit
//!
//! Testing utilities for the Claim 169 credential format.
//!
//! - **Golden vectors**: credentials built from fixed keys so every
//!   implementation can cross-check its output ([`vectors`])
//! - **Fixtures**: ready-made signing/encryption contexts ([`fixtures`])
//! - **Generators**: proptest strategies over identity records
//!   ([`generators`])
//!
//! ```
//! use claim169_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let claim = fixture.make_claim("DEMO-001");
//! let meta = fixture.make_meta("https://issuer.example.org");
//! let qr = fixture.make_signed(&claim, &meta);
//! assert!(!qr.is_empty());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use generators::{cwt_meta, identity_record};
pub use vectors::{all_vectors, GoldenVector};
