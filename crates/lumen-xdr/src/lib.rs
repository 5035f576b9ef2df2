//! XDR serialization and strkey address encoding for the Lumen ledger
//! protocol.
//!
//! This crate is the codec layer the rest of the SDK builds on: transaction
//! builders, query clients, and compatibility shims all construct typed
//! values here and ask them for bytes, base64, or canonical JSON.
//!
//! # Overview
//!
//! - **Binary wire format**: RFC 4506-style XDR — big-endian scalars, 4-byte
//!   length prefixes, zero padding to 4-byte boundaries, unions as
//!   discriminant-then-payload. Byte-exact with the protocol's reference
//!   implementation.
//! - **JSON projection**: every codec also maps to a canonical JSON value —
//!   64-bit and wider integers as decimal strings, opaque bytes as lowercase
//!   hex, text through a byte-oriented escape scheme, accounts as checksummed
//!   address strings.
//! - **Strkey**: the checksummed base-32 address format, independent of XDR.
//!
//! # Quick Start
//!
//! ```rust
//! use lumen_xdr::{Memo, XdrCodec, XdrString};
//!
//! let memo = Memo::MemoText(XdrString::from("hello"));
//!
//! // Encode to XDR bytes and back.
//! let bytes = memo.to_xdr().unwrap();
//! assert_eq!(Memo::from_xdr(&bytes).unwrap(), memo);
//!
//! // The canonical JSON projection.
//! assert_eq!(memo.to_json(), serde_json::json!({"text": "hello"}));
//! ```
//!
//! New composite shapes are declared with [`xdr_struct!`], [`xdr_enum!`],
//! and [`xdr_union!`]:
//!
//! ```rust
//! use lumen_xdr::{xdr_struct, XdrCodec};
//!
//! xdr_struct! {
//!     pub struct LedgerRange {
//!         first: u32 => "first",
//!         last: u32 => "last",
//!     }
//! }
//!
//! let range = LedgerRange { first: 1, last: 9 };
//! assert_eq!(range.to_xdr().unwrap(), vec![0, 0, 0, 1, 0, 0, 0, 9]);
//! ```
//!
//! # Modules
//!
//! - [`codec`]: the [`XdrCodec`] trait, byte cursors, containers, builders
//! - [`model`]: the protocol's message shapes and semantic wrappers
//! - [`strkey`]: checksummed base-32 address encoding
//! - [`error`]: error types
//!
//! # Errors
//!
//! Every failure is structured and raised at the point of detection: decode
//! errors distinguish truncated input from out-of-range values from unknown
//! union arms, and strkey decoding keeps checksum mismatches distinct from
//! generally malformed input. Nothing is logged or swallowed, and no
//! operation substitutes a default value for invalid input.

pub mod codec;
pub mod error;
pub mod model;
pub mod strkey;

// Re-export commonly used types at crate root
pub use codec::{Opaque, Reader, VarArray, VarOpaque, Writer, XdrCodec, XdrString};
pub use error::{DecodeError, EncodeError, JsonError, StrkeyError};
pub use model::{
    AccountId, AlphaNum4, AlphaNum12, Asset, AssetCode4, AssetCode12, AssetType,
    ClaimableBalanceId, ClaimableBalanceIdType, CryptoKeyType, DecoratedSignature, Hash,
    Int128Parts, Int256Parts, Memo, MemoType, MuxedAccount, MuxedAccountMed25519, Price,
    PublicKey, PublicKeyType, Signature, SignatureHint, SignerKey, SignerKeyEd25519SignedPayload,
    SignerKeyType, TimeBounds, UInt128Parts, UInt256Parts, Uint256,
};
pub use strkey::Strkey;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
