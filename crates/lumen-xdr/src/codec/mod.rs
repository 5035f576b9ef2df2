//! Binary encoding/decoding and JSON projection for XDR values.
//!
//! [`XdrCodec`] is the central abstraction: a type implementing it can move
//! between four representations — typed value, XDR bytes, base64 text, and a
//! canonical JSON value. Codecs are stateless and compose by type: containers
//! are generic wrappers ([`containers`]) and composites are built from
//! declarative descriptions ([`xdr_struct!`](crate::xdr_struct),
//! [`xdr_enum!`](crate::xdr_enum), [`xdr_union!`](crate::xdr_union)).

pub mod compose;
pub mod containers;
pub mod json;
pub mod primitives;

pub use containers::{Opaque, VarArray, VarOpaque, XdrString};
pub use primitives::{Reader, Writer, pad_len};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

use crate::error::{DecodeError, EncodeError, JsonError};

/// A codec between a typed value, XDR bytes, and a canonical JSON value.
///
/// The binary round-trip law holds for every implementation: decoding the
/// output of `encode` yields an equal value, and re-encoding a decoded buffer
/// reproduces it byte for byte. Every complete encoding is a multiple of
/// 4 bytes long.
pub trait XdrCodec: Sized {
    /// Appends the XDR encoding of `self` to the writer.
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError>;

    /// Reads a value from the reader, advancing its cursor.
    ///
    /// The reader is not required to be fully consumed afterwards; outer
    /// callers decide completeness.
    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError>;

    /// Projects `self` into its canonical JSON value.
    fn to_json(&self) -> Value;

    /// Rebuilds a value from its canonical JSON projection.
    fn from_json(v: &Value) -> Result<Self, JsonError>;

    /// Encodes `self` to a fresh XDR byte buffer.
    fn to_xdr(&self) -> Result<Vec<u8>, EncodeError> {
        let mut w = Writer::new();
        self.encode(&mut w)?;
        Ok(w.into_bytes())
    }

    /// Decodes a value from an XDR byte buffer.
    fn from_xdr(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::decode(&mut Reader::new(bytes))
    }

    /// Encodes `self` to base64-encoded XDR.
    fn to_base64(&self) -> Result<String, EncodeError> {
        Ok(BASE64.encode(self.to_xdr()?))
    }

    /// Decodes a value from base64-encoded XDR.
    fn from_base64(s: &str) -> Result<Self, DecodeError> {
        let bytes = BASE64
            .decode(s)
            .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;
        Self::from_xdr(&bytes)
    }
}

// =============================================================================
// SCALAR CODECS
// =============================================================================

impl XdrCodec for bool {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_bool(*self);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.read_bool("bool")
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        v.as_bool().ok_or(JsonError::ExpectedBool { ty: "bool" })
    }
}

impl XdrCodec for i32 {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_i32(*self);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.read_i32("i32")
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        let n = v.as_i64().ok_or(JsonError::ExpectedNumber { ty: "i32" })?;
        i32::try_from(n).map_err(|_| JsonError::OutOfRange {
            ty: "i32",
            value: n.to_string(),
        })
    }
}

impl XdrCodec for u32 {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_u32(*self);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.read_u32("u32")
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        let n = v.as_i64().ok_or(JsonError::ExpectedNumber { ty: "u32" })?;
        u32::try_from(n).map_err(|_| JsonError::OutOfRange {
            ty: "u32",
            value: n.to_string(),
        })
    }
}

// 64-bit integers project to base-10 strings: JSON consumers that route
// numbers through IEEE doubles would silently lose precision above 2^53.
impl XdrCodec for i64 {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_i64(*self);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.read_i64("i64")
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        match v {
            Value::String(s) => s.parse().map_err(|_| JsonError::OutOfRange {
                ty: "i64",
                value: s.clone(),
            }),
            Value::Number(n) => n.as_i64().ok_or(JsonError::OutOfRange {
                ty: "i64",
                value: n.to_string(),
            }),
            _ => Err(JsonError::ExpectedString { ty: "i64" }),
        }
    }
}

impl XdrCodec for u64 {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_u64(*self);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.read_u64("u64")
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        match v {
            Value::String(s) => s.parse().map_err(|_| JsonError::OutOfRange {
                ty: "u64",
                value: s.clone(),
            }),
            Value::Number(n) => n.as_u64().ok_or(JsonError::OutOfRange {
                ty: "u64",
                value: n.to_string(),
            }),
            _ => Err(JsonError::ExpectedString { ty: "u64" }),
        }
    }
}

impl XdrCodec for f32 {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_f32(*self);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.read_f32("f32")
    }

    fn to_json(&self) -> Value {
        match serde_json::Number::from_f64(f64::from(*self)) {
            Some(n) => Value::Number(n),
            // JSON has no representation for non-finite floats.
            None => Value::Null,
        }
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        match v {
            Value::Number(n) => Ok(n.as_f64().unwrap_or(f64::NAN) as f32),
            Value::Null => Ok(f32::NAN),
            _ => Err(JsonError::ExpectedNumber { ty: "f32" }),
        }
    }
}

impl XdrCodec for f64 {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_f64(*self);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        r.read_f64("f64")
    }

    fn to_json(&self) -> Value {
        match serde_json::Number::from_f64(*self) {
            Some(n) => Value::Number(n),
            // JSON has no representation for non-finite floats.
            None => Value::Null,
        }
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        match v {
            Value::Number(n) => Ok(n.as_f64().unwrap_or(f64::NAN)),
            Value::Null => Ok(f64::NAN),
            _ => Err(JsonError::ExpectedNumber { ty: "f64" }),
        }
    }
}

/// Boxed values encode identically to their contents. Recursive message
/// shapes break their cycles through this indirection.
impl<T: XdrCodec> XdrCodec for Box<T> {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        self.as_ref().encode(w)
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Box::new(T::decode(r)?))
    }

    fn to_json(&self) -> Value {
        self.as_ref().to_json()
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        Ok(Box::new(T::from_json(v)?))
    }
}
