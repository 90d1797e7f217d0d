//! Base45 encoding for QR payloads (RFC 9285).
//!
//! Two input bytes become a 16-bit big-endian value emitted as three
//! alphabet symbols, least significant first; a trailing single byte
//! becomes two symbols. The 45-character alphabet is QR-alphanumeric.

use crate::error::{CoreError, Result};

/// The Base45 alphabet, indexed 0-44.
const ALPHABET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Reverse lookup: ASCII byte -> alphabet index, or 0xff for non-members.
fn reverse_lookup(c: u8) -> Option<u16> {
    ALPHABET.iter().position(|&a| a == c).map(|i| i as u16)
}

/// Encode bytes to Base45 text.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() / 2) * 3 + 2);
    let mut chunks = data.chunks_exact(2);
    for pair in &mut chunks {
        let v = u16::from_be_bytes([pair[0], pair[1]]) as u32;
        out.push(ALPHABET[(v % 45) as usize] as char);
        out.push(ALPHABET[(v / 45 % 45) as usize] as char);
        out.push(ALPHABET[(v / 2025) as usize] as char);
    }
    if let [last] = chunks.remainder() {
        let v = *last as u32;
        out.push(ALPHABET[(v % 45) as usize] as char);
        out.push(ALPHABET[(v / 45) as usize] as char);
    }
    out
}

/// Decode Base45 text to bytes.
///
/// Rejects non-alphabet characters, a trailing group of length 1, and
/// three-symbol groups whose value exceeds 65535.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    if bytes.len() % 3 == 1 {
        return Err(CoreError::Base45Decode(format!(
            "invalid length {} (mod 3 == 1)",
            bytes.len()
        )));
    }

    let mut out = Vec::with_capacity((bytes.len() / 3) * 2 + 1);
    for (group_idx, group) in bytes.chunks(3).enumerate() {
        let mut digits = [0u32; 3];
        for (i, &c) in group.iter().enumerate() {
            digits[i] = reverse_lookup(c).ok_or_else(|| {
                CoreError::Base45Decode(format!(
                    "invalid character {:?} at position {}",
                    c as char,
                    group_idx * 3 + i
                ))
            })? as u32;
        }
        if group.len() == 3 {
            let v = digits[0] + digits[1] * 45 + digits[2] * 2025;
            if v > 0xffff {
                return Err(CoreError::Base45Decode(format!(
                    "group at position {} decodes to {} (> 65535)",
                    group_idx * 3,
                    v
                )));
            }
            out.push((v >> 8) as u8);
            out.push((v & 0xff) as u8);
        } else {
            let v = digits[0] + digits[1] * 45;
            if v > 0xff {
                return Err(CoreError::Base45Decode(format!(
                    "trailing group decodes to {} (> 255)",
                    v
                )));
            }
            out.push(v as u8);
        }
    }
    Ok(out)
}
