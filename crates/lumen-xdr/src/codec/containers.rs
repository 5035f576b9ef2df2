//! Container codecs: fixed/variable opaque bytes, bounded strings, arrays,
//! and optional values.
//!
//! Size bounds are const generic parameters, so a container's limit is part
//! of its type and checked on both encode and decode.

use serde_json::Value;

use crate::codec::json::{escape_bytes, hex_decode, hex_encode, unescape_bytes};
use crate::codec::primitives::{Reader, Writer};
use crate::codec::XdrCodec;
use crate::error::{DecodeError, EncodeError, JsonError};

// =============================================================================
// OPAQUE BYTES
// =============================================================================

/// Fixed-length opaque bytes, zero-padded to a 4-byte boundary on the wire.
///
/// The length is part of the type, so a length mismatch is only reachable
/// through the fallible [`TryFrom`] slice conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opaque<const N: usize>(pub [u8; N]);

impl<const N: usize> XdrCodec for Opaque<N> {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_bytes(&self.0);
        w.write_padding(N);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let bytes = r.read_bytes(N, "opaque")?;
        let mut data = [0u8; N];
        data.copy_from_slice(bytes);
        r.read_padding(N, "opaque padding")?;
        Ok(Self(data))
    }

    fn to_json(&self) -> Value {
        Value::String(hex_encode(&self.0))
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        let s = v.as_str().ok_or(JsonError::ExpectedString { ty: "opaque" })?;
        let bytes = hex_decode(s, "opaque")?;
        if bytes.len() != N {
            return Err(JsonError::LengthMismatch {
                ty: "opaque",
                expected: N,
                found: bytes.len(),
            });
        }
        let mut data = [0u8; N];
        data.copy_from_slice(&bytes);
        Ok(Self(data))
    }
}

impl<const N: usize> From<[u8; N]> for Opaque<N> {
    fn from(data: [u8; N]) -> Self {
        Self(data)
    }
}

impl<const N: usize> TryFrom<&[u8]> for Opaque<N> {
    type Error = EncodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, EncodeError> {
        let data: [u8; N] = bytes.try_into().map_err(|_| EncodeError::LengthMismatch {
            field: "opaque",
            expected: N,
            found: bytes.len(),
        })?;
        Ok(Self(data))
    }
}

impl<const N: usize> AsRef<[u8]> for Opaque<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Variable-length opaque bytes: a 4-byte length prefix, the bytes, then
/// zero padding to a 4-byte boundary. `MAX` bounds the byte length on both
/// encode and decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VarOpaque<const MAX: u32 = { u32::MAX }>(pub Vec<u8>);

impl<const MAX: u32> XdrCodec for VarOpaque<MAX> {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        let len = self.0.len();
        if len > MAX as usize {
            return Err(EncodeError::LengthExceedsLimit {
                field: "opaque",
                len,
                max: MAX as usize,
            });
        }
        w.write_u32(len as u32);
        w.write_bytes(&self.0);
        w.write_padding(len);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let len = r.read_u32("opaque length")? as usize;
        if len > MAX as usize {
            return Err(DecodeError::LengthExceedsLimit {
                field: "opaque",
                len,
                max: MAX as usize,
            });
        }
        let bytes = r.read_bytes(len, "opaque")?.to_vec();
        r.read_padding(len, "opaque padding")?;
        Ok(Self(bytes))
    }

    fn to_json(&self) -> Value {
        Value::String(hex_encode(&self.0))
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        let s = v.as_str().ok_or(JsonError::ExpectedString { ty: "opaque" })?;
        let bytes = hex_decode(s, "opaque")?;
        if bytes.len() > MAX as usize {
            return Err(JsonError::LengthExceedsLimit {
                ty: "opaque",
                len: bytes.len(),
                max: MAX as usize,
            });
        }
        Ok(Self(bytes))
    }
}

impl<const MAX: u32> AsRef<[u8]> for VarOpaque<MAX> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// =============================================================================
// STRINGS
// =============================================================================

/// Length-bounded UTF-8 string. Encoded like [`VarOpaque`] over the UTF-8
/// bytes; `MAX` bounds the byte length of the encoding, not the character
/// count. The JSON projection is the escaped byte form, not raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct XdrString<const MAX: u32 = { u32::MAX }>(pub String);

impl<const MAX: u32> XdrCodec for XdrString<MAX> {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        let len = self.0.len();
        if len > MAX as usize {
            return Err(EncodeError::LengthExceedsLimit {
                field: "string",
                len,
                max: MAX as usize,
            });
        }
        w.write_u32(len as u32);
        w.write_bytes(self.0.as_bytes());
        w.write_padding(len);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let len = r.read_u32("string length")? as usize;
        if len > MAX as usize {
            return Err(DecodeError::LengthExceedsLimit {
                field: "string",
                len,
                max: MAX as usize,
            });
        }
        let bytes = r.read_bytes(len, "string")?;
        let text = std::str::from_utf8(bytes)
            .map_err(|_| DecodeError::InvalidUtf8 { field: "string" })?
            .to_string();
        r.read_padding(len, "string padding")?;
        Ok(Self(text))
    }

    fn to_json(&self) -> Value {
        Value::String(escape_bytes(self.0.as_bytes()))
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        let s = v.as_str().ok_or(JsonError::ExpectedString { ty: "string" })?;
        let bytes = unescape_bytes(s)?;
        if bytes.len() > MAX as usize {
            return Err(JsonError::LengthExceedsLimit {
                ty: "string",
                len: bytes.len(),
                max: MAX as usize,
            });
        }
        let text = String::from_utf8(bytes).map_err(|_| JsonError::InvalidUtf8 { ty: "string" })?;
        Ok(Self(text))
    }
}

impl<const MAX: u32> From<&str> for XdrString<MAX> {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// ARRAYS
// =============================================================================

/// Fixed-length arrays encode their elements back to back, with no count
/// prefix. The length is part of the type.
impl<T: XdrCodec, const N: usize> XdrCodec for [T; N] {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        for item in self {
            item.encode(w)?;
        }
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode(r)?);
        }
        // SAFETY: the loop pushes exactly N items
        Ok(items.try_into().unwrap_or_else(|_| unreachable!()))
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(T::to_json).collect())
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        let arr = v.as_array().ok_or(JsonError::ExpectedArray { ty: "array" })?;
        if arr.len() != N {
            return Err(JsonError::LengthMismatch {
                ty: "array",
                expected: N,
                found: arr.len(),
            });
        }
        let items = arr
            .iter()
            .map(T::from_json)
            .collect::<Result<Vec<T>, JsonError>>()?;
        // SAFETY: the length was checked against N above
        Ok(items.try_into().unwrap_or_else(|_| unreachable!()))
    }
}

/// Variable-length array: a 4-byte element count followed by the elements.
/// `MAX` bounds the count on both encode and decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VarArray<T, const MAX: u32 = { u32::MAX }>(pub Vec<T>);

impl<T: XdrCodec, const MAX: u32> XdrCodec for VarArray<T, MAX> {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        let len = self.0.len();
        if len > MAX as usize {
            return Err(EncodeError::LengthExceedsLimit {
                field: "array",
                len,
                max: MAX as usize,
            });
        }
        w.write_u32(len as u32);
        for item in &self.0 {
            item.encode(w)?;
        }
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let len = r.read_u32("array count")? as usize;
        if len > MAX as usize {
            return Err(DecodeError::LengthExceedsLimit {
                field: "array",
                len,
                max: MAX as usize,
            });
        }
        let mut items = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            items.push(T::decode(r)?);
        }
        Ok(Self(items))
    }

    fn to_json(&self) -> Value {
        Value::Array(self.0.iter().map(T::to_json).collect())
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        let arr = v.as_array().ok_or(JsonError::ExpectedArray { ty: "array" })?;
        if arr.len() > MAX as usize {
            return Err(JsonError::LengthExceedsLimit {
                ty: "array",
                len: arr.len(),
                max: MAX as usize,
            });
        }
        let items = arr
            .iter()
            .map(T::from_json)
            .collect::<Result<Vec<T>, JsonError>>()?;
        Ok(Self(items))
    }
}

impl<T, const MAX: u32> AsRef<[T]> for VarArray<T, MAX> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

// =============================================================================
// OPTION
// =============================================================================

/// Optional value: a 4-byte presence boolean (strictly 0 or 1) followed by
/// the value when present. `None` encodes to exactly `00 00 00 00`.
impl<T: XdrCodec> XdrCodec for Option<T> {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        match self {
            Some(value) => {
                w.write_bool(true);
                value.encode(w)
            }
            None => {
                w.write_bool(false);
                Ok(())
            }
        }
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        if r.read_bool("option")? {
            Ok(Some(T::decode(r)?))
        } else {
            Ok(None)
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Some(value) => value.to_json(),
            None => Value::Null,
        }
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        if v.is_null() {
            Ok(None)
        } else {
            Ok(Some(T::from_json(v)?))
        }
    }
}
