//! Account identifiers and multiplexed accounts.
//!
//! On the wire these are ordinary unions over key-type discriminants. Their
//! JSON projection is the checksummed address string instead: `G...` for a
//! plain ed25519 key, `M...` for a key multiplexed with a 64-bit ID.

use serde_json::Value;

use crate::codec::primitives::{Reader, Writer};
use crate::codec::XdrCodec;
use crate::error::{DecodeError, EncodeError, JsonError};
use crate::model::Uint256;
use crate::strkey::Strkey;
use crate::{xdr_enum, xdr_struct, xdr_union};

xdr_enum! {
    pub enum PublicKeyType {
        PublicKeyTypeEd25519 = 0 => "ed25519",
    }
}

xdr_union! {
    pub enum PublicKey: PublicKeyType {
        PublicKeyTypeEd25519(Uint256),
    }
}

/// An account identifier: a [`PublicKey`] whose JSON projection is the
/// `G...` address string rather than the union object.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountId(pub PublicKey);

impl AccountId {
    /// Builds an account identifier from a raw ed25519 key.
    pub fn from_ed25519(key: [u8; 32]) -> Self {
        Self(PublicKey::PublicKeyTypeEd25519(Uint256::from(key)))
    }

    /// Returns the raw ed25519 key bytes.
    pub fn ed25519(&self) -> &[u8; 32] {
        let PublicKey::PublicKeyTypeEd25519(key) = &self.0;
        &key.0
    }

    /// Returns the `G...` address string.
    pub fn to_address(&self) -> String {
        Strkey::Ed25519PublicKey(*self.ed25519()).to_string()
    }
}

impl XdrCodec for AccountId {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        self.0.encode(w)
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self(PublicKey::decode(r)?))
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_address())
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        let s = v.as_str().ok_or(JsonError::ExpectedString { ty: "AccountId" })?;
        match Strkey::from_string(s)? {
            Strkey::Ed25519PublicKey(key) => Ok(Self::from_ed25519(key)),
            _ => Err(JsonError::UnexpectedAddressType { ty: "AccountId" }),
        }
    }
}

xdr_enum! {
    pub enum CryptoKeyType {
        KeyTypeEd25519 = 0 => "ed25519",
        KeyTypeMuxedEd25519 = 256 => "muxed_ed25519",
    }
}

xdr_struct! {
    /// The multiplexed arm: a 64-bit ID ahead of the key, in wire order.
    pub struct MuxedAccountMed25519 {
        id: u64 => "id",
        ed25519: Uint256 => "ed25519",
    }
}

/// An account that is either a plain ed25519 key or a key multiplexed with a
/// 64-bit ID. Binary behavior is the plain union; the JSON projection is the
/// `G...` or `M...` address form depending on the active arm.
#[derive(Debug, Clone, PartialEq)]
pub enum MuxedAccount {
    KeyTypeEd25519(Uint256),
    KeyTypeMuxedEd25519(MuxedAccountMed25519),
}

impl MuxedAccount {
    /// Returns the underlying account identifier, dropping any multiplexing
    /// ID.
    pub fn account_id(&self) -> AccountId {
        match self {
            MuxedAccount::KeyTypeEd25519(key) => AccountId::from_ed25519(key.0),
            MuxedAccount::KeyTypeMuxedEd25519(m) => AccountId::from_ed25519(m.ed25519.0),
        }
    }

    /// Returns the address string for the active arm.
    pub fn to_address(&self) -> String {
        match self {
            MuxedAccount::KeyTypeEd25519(key) => Strkey::Ed25519PublicKey(key.0).to_string(),
            MuxedAccount::KeyTypeMuxedEd25519(m) => Strkey::Med25519PublicKey {
                ed25519: m.ed25519.0,
                id: m.id,
            }
            .to_string(),
        }
    }
}

impl XdrCodec for MuxedAccount {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        match self {
            MuxedAccount::KeyTypeEd25519(key) => {
                CryptoKeyType::KeyTypeEd25519.encode(w)?;
                key.encode(w)
            }
            MuxedAccount::KeyTypeMuxedEd25519(m) => {
                CryptoKeyType::KeyTypeMuxedEd25519.encode(w)?;
                m.encode(w)
            }
        }
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        match CryptoKeyType::decode(r)? {
            CryptoKeyType::KeyTypeEd25519 => {
                Ok(MuxedAccount::KeyTypeEd25519(Uint256::decode(r)?))
            }
            CryptoKeyType::KeyTypeMuxedEd25519 => Ok(MuxedAccount::KeyTypeMuxedEd25519(
                MuxedAccountMed25519::decode(r)?,
            )),
        }
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_address())
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        let s = v
            .as_str()
            .ok_or(JsonError::ExpectedString { ty: "MuxedAccount" })?;
        match Strkey::from_string(s)? {
            Strkey::Ed25519PublicKey(key) => {
                Ok(MuxedAccount::KeyTypeEd25519(Uint256::from(key)))
            }
            Strkey::Med25519PublicKey { ed25519, id } => {
                Ok(MuxedAccount::KeyTypeMuxedEd25519(MuxedAccountMed25519 {
                    id,
                    ed25519: Uint256::from(ed25519),
                }))
            }
            _ => Err(JsonError::UnexpectedAddressType { ty: "MuxedAccount" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrkeyError;
    use serde_json::json;

    const ZERO_G: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    fn seq32() -> [u8; 32] {
        let mut key = [0u8; 32];
        for (i, byte) in key.iter_mut().enumerate() {
            *byte = (i + 1) as u8;
        }
        key
    }

    #[test]
    fn test_account_id_json_is_address_string() {
        let account = AccountId::from_ed25519([0; 32]);
        assert_eq!(account.to_json(), json!(ZERO_G));
        assert_eq!(AccountId::from_json(&json!(ZERO_G)).unwrap(), account);
    }

    #[test]
    fn test_account_id_wire_format() {
        let account = AccountId::from_ed25519([7; 32]);
        let bytes = account.to_xdr().unwrap();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..], &[7; 32]);
        assert_eq!(AccountId::from_xdr(&bytes).unwrap(), account);
    }

    #[test]
    fn test_account_id_rejects_other_address_types() {
        let seed = Strkey::Ed25519SecretSeed([0; 32]).to_string();
        assert_eq!(
            AccountId::from_json(&json!(seed)),
            Err(JsonError::UnexpectedAddressType { ty: "AccountId" })
        );

        let muxed = Strkey::Med25519PublicKey {
            ed25519: [0; 32],
            id: 0,
        }
        .to_string();
        assert_eq!(
            AccountId::from_json(&json!(muxed)),
            Err(JsonError::UnexpectedAddressType { ty: "AccountId" })
        );
    }

    #[test]
    fn test_account_id_propagates_strkey_errors() {
        let mut corrupted = ZERO_G.to_string().into_bytes();
        corrupted[20] = b'B';
        let corrupted = String::from_utf8(corrupted).unwrap();
        assert_eq!(
            AccountId::from_json(&json!(corrupted)),
            Err(JsonError::Strkey(StrkeyError::InvalidChecksum))
        );
    }

    #[test]
    fn test_muxed_account_plain_arm_json() {
        let account = MuxedAccount::KeyTypeEd25519(Uint256::from([0; 32]));
        assert_eq!(account.to_json(), json!(ZERO_G));
        assert_eq!(MuxedAccount::from_json(&json!(ZERO_G)).unwrap(), account);
    }

    #[test]
    fn test_muxed_account_muxed_arm_json() {
        let account = MuxedAccount::KeyTypeMuxedEd25519(MuxedAccountMed25519 {
            id: 1,
            ed25519: Uint256::from(seq32()),
        });
        let expected = "MAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYPSAAAAAAAAAAAAAENNK";
        assert_eq!(account.to_json(), json!(expected));
        assert_eq!(MuxedAccount::from_json(&json!(expected)).unwrap(), account);
    }

    #[test]
    fn test_muxed_account_wire_format() {
        let account = MuxedAccount::KeyTypeMuxedEd25519(MuxedAccountMed25519 {
            id: 1,
            ed25519: Uint256::from(seq32()),
        });
        let bytes = account.to_xdr().unwrap();
        // discriminant 256, then the 8-byte ID, then the key
        assert_eq!(&bytes[..4], &[0, 0, 1, 0]);
        assert_eq!(&bytes[4..12], &[0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(&bytes[12..], &seq32());
        assert_eq!(MuxedAccount::from_xdr(&bytes).unwrap(), account);
    }

    #[test]
    fn test_muxed_account_account_id_drops_id() {
        let account = MuxedAccount::KeyTypeMuxedEd25519(MuxedAccountMed25519 {
            id: 77,
            ed25519: Uint256::from(seq32()),
        });
        assert_eq!(account.account_id(), AccountId::from_ed25519(seq32()));
    }

    #[test]
    fn test_muxed_account_rejects_other_address_types() {
        let contract = Strkey::Contract([0; 32]).to_string();
        assert_eq!(
            MuxedAccount::from_json(&json!(contract)),
            Err(JsonError::UnexpectedAddressType { ty: "MuxedAccount" })
        );
    }

    #[test]
    fn test_public_key_generic_union_json() {
        // The raw union keeps the generic projection; only the wrappers
        // render address strings.
        let key = PublicKey::PublicKeyTypeEd25519(Uint256::from([0xab; 32]));
        assert_eq!(key.to_json(), json!({"ed25519": "ab".repeat(32)}));
    }
}
