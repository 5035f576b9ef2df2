//! Error types for XDR encoding/decoding, JSON projection, and strkey parsing.

use thiserror::Error;

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("unknown {ty} discriminant: {value}")]
    UnknownDiscriminant { ty: &'static str, value: i32 },

    #[error("invalid bool value: {value} (expected 0 or 1)")]
    InvalidBool { value: u32 },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} expected exactly {expected} bytes, found {found}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Error while converting between typed values and their JSON projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    #[error("{ty}: expected a JSON object")]
    ExpectedObject { ty: &'static str },

    #[error("{ty}: expected a JSON string")]
    ExpectedString { ty: &'static str },

    #[error("{ty}: expected a JSON array")]
    ExpectedArray { ty: &'static str },

    #[error("{ty}: expected a JSON number")]
    ExpectedNumber { ty: &'static str },

    #[error("{ty}: expected a JSON boolean")]
    ExpectedBool { ty: &'static str },

    #[error("{ty}: missing field {field:?}")]
    MissingField {
        ty: &'static str,
        field: &'static str,
    },

    #[error("unknown {ty} name: {name:?}")]
    UnknownEnumName { ty: &'static str, name: String },

    #[error("unknown {ty} arm: {arm:?}")]
    UnknownUnionArm { ty: &'static str, arm: String },

    #[error("{ty}: expected an arm name string or a single-key object")]
    ExpectedUnion { ty: &'static str },

    #[error("{ty} arm {arm:?} does not take this payload shape")]
    UnionPayloadMismatch { ty: &'static str, arm: String },

    #[error("{value:?} is out of range for {ty}")]
    OutOfRange { ty: &'static str, value: String },

    #[error("invalid hex string for {ty}")]
    InvalidHex { ty: &'static str },

    #[error("invalid escape sequence: {context}")]
    InvalidEscape { context: &'static str },

    #[error("{ty}: escaped bytes are not valid UTF-8")]
    InvalidUtf8 { ty: &'static str },

    #[error("{ty} expected exactly {expected} elements, found {found}")]
    LengthMismatch {
        ty: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{ty} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        ty: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{ty}: address string is of the wrong address type")]
    UnexpectedAddressType { ty: &'static str },

    #[error(transparent)]
    Strkey(#[from] StrkeyError),
}

/// Error while decoding a strkey address string.
///
/// Checksum mismatch is kept distinct from general malformed input so callers
/// can give better diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrkeyError {
    #[error("invalid encoded string")]
    InvalidEncodedString,

    #[error("invalid checksum")]
    InvalidChecksum,
}
