//! zlib framing (RFC 1950) for the compressed layer under Base45.
//!
//! Decompression streams through a fixed-size chunk buffer and enforces an
//! output cap, so a crafted stream claiming to inflate to gigabytes fails
//! with [`CoreError::Decompress`] before the memory is ever allocated.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::{CoreError, Result};

/// Default decompression cap, matching the decode option default.
pub const DEFAULT_MAX_DECOMPRESSED_BYTES: usize = 65536;

const CHUNK: usize = 8192;

/// Compress bytes into a zlib stream.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .expect("zlib compression into a Vec cannot fail")
}

/// Decompress a zlib stream, refusing to produce more than `max_out` bytes.
pub fn decompress(data: &[u8], max_out: usize) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(CoreError::Decompress("empty input".into()));
    }

    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(max_out.min(CHUNK));
    let mut buf = [0u8; CHUNK];

    loop {
        let consumed = inflater.total_in() as usize;
        let before_out = inflater.total_out();
        let status = inflater
            .decompress(&data[consumed..], &mut buf, FlushDecompress::Finish)
            .map_err(|e| CoreError::Decompress(format!("malformed zlib stream: {}", e)))?;

        let produced = (inflater.total_out() - before_out) as usize;
        if out.len() + produced > max_out {
            return Err(CoreError::Decompress(format!(
                "output exceeds cap of {} bytes",
                max_out
            )));
        }
        out.extend_from_slice(&buf[..produced]);

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                // No forward progress on either side means a truncated stream.
                if produced == 0 && inflater.total_in() as usize == consumed {
                    return Err(CoreError::Decompress("truncated zlib stream".into()));
                }
            }
        }
    }

    if (inflater.total_in() as usize) < data.len() {
        return Err(CoreError::Decompress(format!(
            "{} trailing bytes after zlib stream",
            data.len() - inflater.total_in() as usize
        )));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let data = b"claim 169 payload bytes";
        let compressed = compress(data);
        let decompressed = decompress(&compressed, DEFAULT_MAX_DECOMPRESSED_BYTES).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_roundtrip_empty() {
        let compressed = compress(b"");
        assert_eq!(
            decompress(&compressed, DEFAULT_MAX_DECOMPRESSED_BYTES).unwrap(),
            b""
        );
    }

    #[test]
    fn test_cap_enforced_without_full_allocation() {
        // Highly compressible: 1 MiB of zeros fits in ~1 KiB of zlib.
        let bomb = compress(&vec![0u8; 1024 * 1024]);
        assert!(bomb.len() < 4096);
        let err = decompress(&bomb, 65536).unwrap_err();
        assert!(matches!(err, CoreError::Decompress(_)));
    }

    #[test]
    fn test_cap_boundary() {
        let data = vec![0x42u8; 1000];
        let compressed = compress(&data);
        assert!(decompress(&compressed, 1000).is_ok());
        assert!(decompress(&compressed, 999).is_err());
    }

    #[test]
    fn test_reject_garbage() {
        assert!(decompress(b"not a zlib stream", 65536).is_err());
        assert!(decompress(b"", 65536).is_err());
    }

    #[test]
    fn test_reject_truncated() {
        let compressed = compress(b"some payload data that compresses");
        assert!(decompress(&compressed[..compressed.len() / 2], 65536).is_err());
    }

    #[test]
    fn test_reject_trailing_bytes() {
        let mut compressed = compress(b"payload");
        compressed.extend_from_slice(b"junk");
        assert!(decompress(&compressed, 65536).is_err());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
                let out = decompress(&compress(&data), data.len().max(1)).unwrap();
                prop_assert_eq!(out, data);
            }
        }
    }
}
