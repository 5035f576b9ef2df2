//! Assets and fixed-width asset codes.
//!
//! Asset codes are fixed opaque bytes on the wire. The JSON projection trims
//! trailing zero bytes and escapes the rest like text, so a backslash byte
//! inside a code is escaped even though codes are conventionally ASCII.
//! Decoding reverses the escaping and zero-pads back to the fixed width.

use serde_json::Value;

use crate::codec::json::{escape_bytes, unescape_bytes};
use crate::codec::primitives::{Reader, Writer};
use crate::codec::XdrCodec;
use crate::error::{DecodeError, EncodeError, JsonError};
use crate::model::account::AccountId;
use crate::{xdr_enum, xdr_struct, xdr_union};

/// A 4-byte asset code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AssetCode4(pub [u8; 4]);

/// A 12-byte asset code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AssetCode12(pub [u8; 12]);

fn code_to_json(code: &[u8]) -> Value {
    let end = code.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    Value::String(escape_bytes(&code[..end]))
}

fn code_from_json<const N: usize>(v: &Value, ty: &'static str) -> Result<[u8; N], JsonError> {
    let s = v.as_str().ok_or(JsonError::ExpectedString { ty })?;
    let bytes = unescape_bytes(s)?;
    if bytes.len() > N {
        return Err(JsonError::LengthExceedsLimit {
            ty,
            len: bytes.len(),
            max: N,
        });
    }
    let mut code = [0u8; N];
    code[..bytes.len()].copy_from_slice(&bytes);
    Ok(code)
}

impl XdrCodec for AssetCode4 {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_bytes(&self.0);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let bytes = r.read_bytes(4, "asset code")?;
        let mut code = [0u8; 4];
        code.copy_from_slice(bytes);
        Ok(Self(code))
    }

    fn to_json(&self) -> Value {
        code_to_json(&self.0)
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        Ok(Self(code_from_json::<4>(v, "AssetCode4")?))
    }
}

impl XdrCodec for AssetCode12 {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_bytes(&self.0);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let bytes = r.read_bytes(12, "asset code")?;
        let mut code = [0u8; 12];
        code.copy_from_slice(bytes);
        Ok(Self(code))
    }

    fn to_json(&self) -> Value {
        code_to_json(&self.0)
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        Ok(Self(code_from_json::<12>(v, "AssetCode12")?))
    }
}

impl From<&str> for AssetCode4 {
    /// Builds a code from up to 4 ASCII bytes, zero-padded.
    fn from(s: &str) -> Self {
        let mut code = [0u8; 4];
        let bytes = s.as_bytes();
        code[..bytes.len()].copy_from_slice(bytes);
        Self(code)
    }
}

impl From<&str> for AssetCode12 {
    /// Builds a code from up to 12 ASCII bytes, zero-padded.
    fn from(s: &str) -> Self {
        let mut code = [0u8; 12];
        let bytes = s.as_bytes();
        code[..bytes.len()].copy_from_slice(bytes);
        Self(code)
    }
}

xdr_enum! {
    pub enum AssetType {
        AssetTypeNative = 0 => "native",
        AssetTypeCreditAlphanum4 = 1 => "credit_alphanum4",
        AssetTypeCreditAlphanum12 = 2 => "credit_alphanum12",
    }
}

xdr_struct! {
    pub struct AlphaNum4 {
        asset_code: AssetCode4 => "asset_code",
        issuer: AccountId => "issuer",
    }
}

xdr_struct! {
    pub struct AlphaNum12 {
        asset_code: AssetCode12 => "asset_code",
        issuer: AccountId => "issuer",
    }
}

xdr_union! {
    pub enum Asset: AssetType {
        AssetTypeNative,
        AssetTypeCreditAlphanum4(AlphaNum4),
        AssetTypeCreditAlphanum12(AlphaNum12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_json_trims_trailing_zeros() {
        let code = AssetCode4::from("USD");
        assert_eq!(code.0, [b'U', b'S', b'D', 0]);
        assert_eq!(code.to_json(), json!("USD"));
        assert_eq!(AssetCode4::from_json(&json!("USD")).unwrap(), code);
    }

    #[test]
    fn test_code_json_keeps_interior_zeros() {
        let code = AssetCode4([b'A', 0, b'B', 0]);
        assert_eq!(code.to_json(), json!("A\\0B"));
        assert_eq!(AssetCode4::from_json(&json!("A\\0B")).unwrap(), code);
    }

    #[test]
    fn test_code_json_escapes_backslash_and_high_bytes() {
        let code = AssetCode4([b'\\', 0xfe, b'z', 0]);
        assert_eq!(code.to_json(), json!("\\\\\\xfez"));
        assert_eq!(AssetCode4::from_json(&json!("\\\\\\xfez")).unwrap(), code);
    }

    #[test]
    fn test_code_json_stringifies_with_double_escaping() {
        // A backslash byte escapes to two characters, and ordinary JSON
        // string escaping then doubles each of them.
        let code = AssetCode4([b'\\', b'A', 0, 0]);
        assert_eq!(
            serde_json::to_string(&code.to_json()).unwrap(),
            r#""\\\\A""#
        );
    }

    #[test]
    fn test_code_from_json_over_width() {
        assert!(matches!(
            AssetCode4::from_json(&json!("TOOLONG")),
            Err(JsonError::LengthExceedsLimit { max: 4, .. })
        ));
    }

    #[test]
    fn test_code12_roundtrip() {
        let code = AssetCode12::from("DEADBEEF");
        assert_eq!(code.to_json(), json!("DEADBEEF"));
        assert_eq!(AssetCode12::from_json(&json!("DEADBEEF")).unwrap(), code);
        let bytes = code.to_xdr().unwrap();
        assert_eq!(bytes.len(), 12);
        assert_eq!(AssetCode12::from_xdr(&bytes).unwrap(), code);
    }

    #[test]
    fn test_all_zero_code_renders_empty() {
        assert_eq!(AssetCode4::default().to_json(), json!(""));
        assert_eq!(
            AssetCode4::from_json(&json!("")).unwrap(),
            AssetCode4::default()
        );
    }

    #[test]
    fn test_native_asset() {
        assert_eq!(Asset::AssetTypeNative.to_xdr().unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(Asset::AssetTypeNative.to_json(), json!("native"));
    }

    #[test]
    fn test_credit_asset_roundtrip() {
        let asset = Asset::AssetTypeCreditAlphanum4(AlphaNum4 {
            asset_code: AssetCode4::from("EUR"),
            issuer: AccountId::from_ed25519([0; 32]),
        });
        let bytes = asset.to_xdr().unwrap();
        // discriminant + 4-byte code + (discriminant + key) of the issuer
        assert_eq!(bytes.len(), 4 + 4 + 36);
        assert_eq!(Asset::from_xdr(&bytes).unwrap(), asset);

        let j = asset.to_json();
        assert_eq!(
            j,
            json!({
                "credit_alphanum4": {
                    "asset_code": "EUR",
                    "issuer": "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF",
                }
            })
        );
        assert_eq!(Asset::from_json(&j).unwrap(), asset);
    }
}
