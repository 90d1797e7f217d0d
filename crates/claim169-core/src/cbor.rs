//! Bounded CBOR reader and deterministic writer (RFC 8949 subset).
//!
//! Supports major types 0-7 minus floats and indefinite lengths, which the
//! credential wire format never uses. The writer produces RFC 8949 §4.2.1
//! deterministic encoding:
//! - Shortest-form argument encoding (no leading zero bytes)
//! - Map keys sorted by bytewise comparison of their encoded form
//! - Definite lengths only
//!
//! The reader is permissive about map key order but enforces a nesting
//! depth bound and an input size bound, and never allocates more than the
//! input could actually contain.
//!
//! Deterministic encoding is load-bearing: COSE signatures cover the
//! serialized protected header verbatim, so a given map must have exactly
//! one byte representation.

use crate::error::{CoreError, Result};

/// Maximum nesting depth accepted by the reader.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Default maximum input size accepted by [`decode`].
pub const DEFAULT_MAX_INPUT_LEN: usize = 10 * 1024 * 1024;

/// A CBOR data item.
///
/// Negative integers store the CBOR argument: `Nint(n)` denotes `-1 - n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Uint(u64),
    Nint(u64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Tag(u64, Box<Value>),
    Bool(bool),
    Null,
}

impl Value {
    /// Build an integer value from a signed number.
    pub fn from_i64(n: i64) -> Self {
        if n >= 0 {
            Value::Uint(n as u64)
        } else {
            Value::Nint((-1 - n) as u64)
        }
    }

    /// Read the value as a signed integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Uint(n) => i64::try_from(*n).ok(),
            Value::Nint(n) => i64::try_from(*n).ok().map(|n| -1 - n),
            _ => None,
        }
    }

    /// Read the value as an unsigned integer, if it is one.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the value as a byte string, if it is one.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Borrow the value as a text string, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the value as an array, if it is one.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Borrow the value as a map, if it is one.
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Encode a value to deterministic CBOR bytes.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value);
    buf
}

fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Uint(n) => encode_head(buf, 0, *n),
        Value::Nint(n) => encode_head(buf, 1, *n),
        Value::Bytes(b) => {
            encode_head(buf, 2, b.len() as u64);
            buf.extend_from_slice(b);
        }
        Value::Text(s) => {
            encode_head(buf, 3, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
        Value::Array(arr) => {
            encode_head(buf, 4, arr.len() as u64);
            for item in arr {
                encode_value_to(buf, item);
            }
        }
        Value::Map(entries) => encode_map_deterministic(buf, entries),
        Value::Tag(tag, inner) => {
            encode_head(buf, 6, *tag);
            encode_value_to(buf, inner);
        }
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
    }
}

/// Encode a head: major type plus shortest-form argument.
fn encode_head(buf: &mut Vec<u8>, major: u8, arg: u64) {
    let mt = major << 5;
    if arg < 24 {
        buf.push(mt | (arg as u8));
    } else if arg <= 0xff {
        buf.push(mt | 24);
        buf.push(arg as u8);
    } else if arg <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(arg as u16).to_be_bytes());
    } else if arg <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(arg as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&arg.to_be_bytes());
    }
}

/// Encode a map with entries sorted by encoded key bytes.
fn encode_map_deterministic(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_head(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Decode one CBOR item, requiring the input to be fully consumed.
///
/// Uses [`DEFAULT_MAX_INPUT_LEN`]; credential pipelines that have already
/// capped the input at decompression can use [`decode_with_limit`].
pub fn decode(data: &[u8]) -> Result<Value> {
    decode_with_limit(data, DEFAULT_MAX_INPUT_LEN)
}

/// Decode one CBOR item from input no larger than `max_len` bytes.
pub fn decode_with_limit(data: &[u8], max_len: usize) -> Result<Value> {
    if data.len() > max_len {
        return Err(CoreError::CoseParse(format!(
            "CBOR input of {} bytes exceeds limit of {}",
            data.len(),
            max_len
        )));
    }
    let mut reader = Reader { data, pos: 0 };
    let value = reader.read_value(0)?;
    if reader.pos != data.len() {
        return Err(CoreError::CoseParse(format!(
            "{} trailing bytes after CBOR item",
            data.len() - reader.pos
        )));
    }
    Ok(value)
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(count).filter(|&e| e <= self.data.len());
        match end {
            Some(end) => {
                let chunk = &self.data[self.pos..end];
                self.pos = end;
                Ok(chunk)
            }
            None => Err(CoreError::CoseParse(format!(
                "unexpected end of CBOR input at offset {}",
                self.pos
            ))),
        }
    }

    /// Read a head byte and its argument.
    fn read_head(&mut self) -> Result<(u8, u64)> {
        let initial = self.take(1)?[0];
        let major = initial >> 5;
        let additional = initial & 0x1f;
        let arg = match additional {
            0..=23 => additional as u64,
            24 => self.take(1)?[0] as u64,
            25 => u16::from_be_bytes(self.take(2)?.try_into().unwrap()) as u64,
            26 => u32::from_be_bytes(self.take(4)?.try_into().unwrap()) as u64,
            27 => u64::from_be_bytes(self.take(8)?.try_into().unwrap()),
            31 => {
                return Err(CoreError::CoseParse(format!(
                    "indefinite-length item at offset {}",
                    self.pos - 1
                )))
            }
            _ => {
                return Err(CoreError::CoseParse(format!(
                    "reserved additional info {} at offset {}",
                    additional,
                    self.pos - 1
                )))
            }
        };
        Ok((major, arg))
    }

    /// Bound a claimed element count by what the remaining input can hold.
    fn check_count(&self, claimed: u64, min_bytes_each: usize) -> Result<usize> {
        let remaining = self.data.len() - self.pos;
        let count = usize::try_from(claimed).unwrap_or(usize::MAX);
        if count.checked_mul(min_bytes_each).map_or(true, |need| need > remaining) {
            return Err(CoreError::CoseParse(format!(
                "claimed count {} exceeds remaining {} bytes",
                claimed, remaining
            )));
        }
        Ok(count)
    }

    fn read_value(&mut self, depth: usize) -> Result<Value> {
        if depth > MAX_NESTING_DEPTH {
            return Err(CoreError::CoseParse(format!(
                "nesting depth exceeds {}",
                MAX_NESTING_DEPTH
            )));
        }
        let (major, arg) = self.read_head()?;
        match major {
            0 => Ok(Value::Uint(arg)),
            1 => Ok(Value::Nint(arg)),
            2 => {
                let len = self.check_count(arg, 1)?;
                Ok(Value::Bytes(self.take(len)?.to_vec()))
            }
            3 => {
                let len = self.check_count(arg, 1)?;
                let bytes = self.take(len)?;
                let text = std::str::from_utf8(bytes).map_err(|e| {
                    CoreError::CoseParse(format!("invalid UTF-8 in text string: {}", e))
                })?;
                Ok(Value::Text(text.to_string()))
            }
            4 => {
                let count = self.check_count(arg, 1)?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.read_value(depth + 1)?);
                }
                Ok(Value::Array(items))
            }
            5 => {
                let count = self.check_count(arg, 2)?;
                let mut entries = Vec::with_capacity(count);
                for _ in 0..count {
                    let key = self.read_value(depth + 1)?;
                    let value = self.read_value(depth + 1)?;
                    entries.push((key, value));
                }
                Ok(Value::Map(entries))
            }
            6 => Ok(Value::Tag(arg, Box::new(self.read_value(depth + 1)?))),
            7 => match arg {
                20 => Ok(Value::Bool(false)),
                21 => Ok(Value::Bool(true)),
                22 => Ok(Value::Null),
                other => Err(CoreError::CoseParse(format!(
                    "unsupported simple/float value {}",
                    other
                ))),
            },
            _ => unreachable!("major type is 3 bits"),
        }
    }
}

/// Look up an integer key in a decoded map.
pub fn map_get<'a>(entries: &'a [(Value, Value)], key: i64) -> Option<&'a Value> {
    entries
        .iter()
        .find(|(k, _)| k.as_i64() == Some(key))
        .map(|(_, v)| v)
}
