//! Protocol message shapes built on the codec layer.
//!
//! Composite types are declared with the [`xdr_struct!`](crate::xdr_struct),
//! [`xdr_enum!`](crate::xdr_enum), and [`xdr_union!`](crate::xdr_union)
//! builders; the semantic wrappers in [`account`], [`asset`], and [`num`]
//! keep the same binary behavior but project to address strings, trimmed
//! codes, and decimal strings in JSON.

pub mod account;
pub mod asset;
pub mod num;
pub mod tx;

pub use account::{
    AccountId, CryptoKeyType, MuxedAccount, MuxedAccountMed25519, PublicKey, PublicKeyType,
};
pub use asset::{AlphaNum4, AlphaNum12, Asset, AssetCode4, AssetCode12, AssetType};
pub use num::{Int128Parts, Int256Parts, UInt128Parts, UInt256Parts};
pub use tx::{
    ClaimableBalanceId, ClaimableBalanceIdType, DecoratedSignature, Memo, MemoType, Price,
    Signature, SignatureHint, SignerKey, SignerKeyEd25519SignedPayload, SignerKeyType, TimeBounds,
    MAX_MEMO_TEXT,
};

use crate::codec::containers::Opaque;

/// A 32-byte hash.
pub type Hash = Opaque<32>;

/// A 256-bit value, such as a raw ed25519 key.
pub type Uint256 = Opaque<32>;
