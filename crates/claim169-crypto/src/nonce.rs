//! IV generation for Encrypt0.

use rand::rngs::OsRng;
use rand::RngCore;

/// AES-GCM IV length in bytes (96 bits).
pub const IV_LEN: usize = 12;

/// Generate a fresh 12-byte IV from the operating system CSPRNG.
///
/// One IV per credential; 96 bits of entropy keeps collisions out of reach
/// within a key's lifetime.
pub fn generate_nonce() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    iv
}
