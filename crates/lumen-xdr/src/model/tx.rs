//! Transaction building blocks: memos, time bounds, prices, signatures, and
//! signer keys.

use crate::codec::containers::{Opaque, VarOpaque, XdrString};
use crate::model::{Hash, Uint256};
use crate::{xdr_enum, xdr_struct, xdr_union};

/// First 4 bytes of the public key, attached to a signature for lookup.
pub type SignatureHint = Opaque<4>;

/// A raw signature, at most 64 bytes.
pub type Signature = VarOpaque<64>;

/// Maximum byte length of a text memo.
pub const MAX_MEMO_TEXT: u32 = 28;

xdr_enum! {
    pub enum MemoType {
        MemoNone = 0 => "none",
        MemoText = 1 => "text",
        MemoId = 2 => "id",
        MemoHash = 3 => "hash",
        MemoReturn = 4 => "return",
    }
}

xdr_union! {
    pub enum Memo: MemoType {
        MemoNone,
        MemoText(XdrString<MAX_MEMO_TEXT>),
        MemoId(u64),
        MemoHash(Hash),
        MemoReturn(Hash),
    }
}

xdr_struct! {
    /// Validity window in seconds since the Unix epoch; a zero `max_time`
    /// means no upper bound.
    pub struct TimeBounds {
        min_time: u64 => "min_time",
        max_time: u64 => "max_time",
    }
}

xdr_struct! {
    /// A price as the fraction `n / d`.
    pub struct Price {
        n: i32 => "n",
        d: i32 => "d",
    }
}

xdr_struct! {
    pub struct DecoratedSignature {
        hint: SignatureHint => "hint",
        signature: Signature => "signature",
    }
}

xdr_enum! {
    pub enum SignerKeyType {
        SignerKeyTypeEd25519 = 0 => "ed25519",
        SignerKeyTypePreAuthTx = 1 => "pre_auth_tx",
        SignerKeyTypeHashX = 2 => "hash_x",
        SignerKeyTypeEd25519SignedPayload = 3 => "ed25519_signed_payload",
    }
}

xdr_struct! {
    pub struct SignerKeyEd25519SignedPayload {
        ed25519: Uint256 => "ed25519",
        payload: VarOpaque<64> => "payload",
    }
}

xdr_union! {
    pub enum SignerKey: SignerKeyType {
        SignerKeyTypeEd25519(Uint256),
        SignerKeyTypePreAuthTx(Uint256),
        SignerKeyTypeHashX(Uint256),
        SignerKeyTypeEd25519SignedPayload(SignerKeyEd25519SignedPayload),
    }
}

xdr_enum! {
    pub enum ClaimableBalanceIdType {
        ClaimableBalanceIdTypeV0 = 0 => "v0",
    }
}

xdr_union! {
    pub enum ClaimableBalanceId: ClaimableBalanceIdType {
        ClaimableBalanceIdTypeV0(Hash),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::XdrCodec;
    use crate::error::{DecodeError, EncodeError};
    use serde_json::json;

    #[test]
    fn test_memo_none_wire_format() {
        assert_eq!(Memo::MemoNone.to_xdr().unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(Memo::from_xdr(&[0, 0, 0, 0]).unwrap(), Memo::MemoNone);
    }

    #[test]
    fn test_memo_text_roundtrip() {
        let memo = Memo::MemoText(XdrString::from("hello"));
        let bytes = memo.to_xdr().unwrap();
        assert_eq!(bytes[..8], [0, 0, 0, 1, 0, 0, 0, 5]);
        assert_eq!(bytes.len(), 16);
        assert_eq!(Memo::from_xdr(&bytes).unwrap(), memo);
    }

    #[test]
    fn test_memo_text_over_limit() {
        let memo = Memo::MemoText(XdrString::from("a ridiculously long memo text"));
        assert!(matches!(
            memo.to_xdr(),
            Err(EncodeError::LengthExceedsLimit { len: 29, max: 28, .. })
        ));
    }

    #[test]
    fn test_memo_json_forms() {
        assert_eq!(Memo::MemoNone.to_json(), json!("none"));
        assert_eq!(
            Memo::MemoId(18_446_744_073_709_551_615).to_json(),
            json!({"id": "18446744073709551615"})
        );
        assert_eq!(
            Memo::from_json(&json!({"id": "18446744073709551615"})).unwrap(),
            Memo::MemoId(u64::MAX)
        );
        assert_eq!(
            Memo::MemoHash(Opaque([0xab; 32])).to_json(),
            json!({"hash": "ab".repeat(32)})
        );
    }

    #[test]
    fn test_memo_unknown_discriminant() {
        assert!(matches!(
            Memo::from_xdr(&[0, 0, 0, 5]),
            Err(DecodeError::UnknownDiscriminant { ty: "MemoType", .. })
        ));
    }

    #[test]
    fn test_time_bounds_roundtrip() {
        let bounds = TimeBounds {
            min_time: 0,
            max_time: 1_700_000_000,
        };
        let bytes = bounds.to_xdr().unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(TimeBounds::from_xdr(&bytes).unwrap(), bounds);
        assert_eq!(
            bounds.to_json(),
            json!({"min_time": "0", "max_time": "1700000000"})
        );
    }

    #[test]
    fn test_price_json_uses_numbers() {
        let price = Price { n: 1, d: 10 };
        assert_eq!(price.to_json(), json!({"n": 1, "d": 10}));
        assert_eq!(Price::from_json(&json!({"n": 1, "d": 10})).unwrap(), price);
    }

    #[test]
    fn test_decorated_signature_roundtrip() {
        let sig = DecoratedSignature {
            hint: Opaque([1, 2, 3, 4]),
            signature: VarOpaque(vec![9; 64]),
        };
        let bytes = sig.to_xdr().unwrap();
        assert_eq!(bytes.len(), 4 + 4 + 64);
        assert_eq!(DecoratedSignature::from_xdr(&bytes).unwrap(), sig);
    }

    #[test]
    fn test_signature_over_64_bytes() {
        let sig = Signature(vec![0; 65]);
        assert!(matches!(
            sig.to_xdr(),
            Err(EncodeError::LengthExceedsLimit { len: 65, max: 64, .. })
        ));
    }

    #[test]
    fn test_signer_key_signed_payload_roundtrip() {
        let key = SignerKey::SignerKeyTypeEd25519SignedPayload(SignerKeyEd25519SignedPayload {
            ed25519: Opaque([5; 32]),
            payload: VarOpaque(vec![1, 2, 3]),
        });
        let bytes = key.to_xdr().unwrap();
        // discriminant + key + payload length + 3 bytes + 1 pad byte
        assert_eq!(bytes.len(), 4 + 32 + 4 + 4);
        assert_eq!(SignerKey::from_xdr(&bytes).unwrap(), key);

        let j = key.to_json();
        assert_eq!(
            j,
            json!({"ed25519_signed_payload": {"ed25519": "05".repeat(32), "payload": "010203"}})
        );
        assert_eq!(SignerKey::from_json(&j).unwrap(), key);
    }

    #[test]
    fn test_claimable_balance_id_roundtrip() {
        let id = ClaimableBalanceId::ClaimableBalanceIdTypeV0(Opaque([0xcd; 32]));
        let bytes = id.to_xdr().unwrap();
        assert_eq!(bytes.len(), 36);
        assert_eq!(ClaimableBalanceId::from_xdr(&bytes).unwrap(), id);
        assert_eq!(id.to_json(), json!({"v0": "cd".repeat(32)}));
    }
}
