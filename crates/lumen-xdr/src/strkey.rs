//! Strkey: the checksummed, human-readable address encoding.
//!
//! An address is a version byte plus a payload, rendered as base 32 with a
//! trailing CRC16 checksum. The version byte occupies the top five bits of
//! the first character, which is why every address of a given type starts
//! with the same letter. Independent of the XDR layer.

use std::fmt;
use std::str::FromStr;

use crate::error::StrkeyError;

// Version bytes. The value's top 5 bits select the leading character.
pub const VERSION_ED25519_PUBLIC_KEY: u8 = 6 << 3; // 'G'
pub const VERSION_ED25519_SECRET_SEED: u8 = 18 << 3; // 'S'
pub const VERSION_MED25519_PUBLIC_KEY: u8 = 12 << 3; // 'M'
pub const VERSION_PRE_AUTH_TX: u8 = 19 << 3; // 'T'
pub const VERSION_SHA256_HASH: u8 = 23 << 3; // 'X'
pub const VERSION_SIGNED_PAYLOAD: u8 = 15 << 3; // 'P'
pub const VERSION_CONTRACT: u8 = 2 << 3; // 'C'
pub const VERSION_LIQUIDITY_POOL: u8 = 11 << 3; // 'L'
pub const VERSION_CLAIMABLE_BALANCE: u8 = 1 << 3; // 'B'

/// Subtype marker leading a claimable-balance payload.
const CLAIMABLE_BALANCE_V0: u8 = 0x00;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// A decoded address: one variant per known version byte.
///
/// Decoding enforces the round-trip law itself: every accepted string
/// re-encodes to exactly the original input, so non-canonical encodings are
/// rejected rather than silently normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Strkey {
    /// `G...`: a 32-byte ed25519 public key.
    Ed25519PublicKey([u8; 32]),
    /// `S...`: a 32-byte ed25519 secret seed.
    Ed25519SecretSeed([u8; 32]),
    /// `M...`: an ed25519 public key multiplexed with a 64-bit ID.
    Med25519PublicKey { ed25519: [u8; 32], id: u64 },
    /// `T...`: a pre-authorized transaction hash.
    PreAuthTx([u8; 32]),
    /// `X...`: a SHA-256 hash preimage commitment.
    Sha256Hash([u8; 32]),
    /// `P...`: an ed25519 key plus an attached payload of 1..=64 bytes.
    SignedPayloadEd25519 { ed25519: [u8; 32], payload: Vec<u8> },
    /// `C...`: a 32-byte contract identifier.
    Contract([u8; 32]),
    /// `L...`: a 32-byte liquidity pool identifier.
    LiquidityPool([u8; 32]),
    /// `B...`: a claimable balance identifier (v0 subtype).
    ClaimableBalanceV0([u8; 32]),
}

impl Strkey {
    /// Returns the version byte for this address type.
    pub fn version_byte(&self) -> u8 {
        match self {
            Strkey::Ed25519PublicKey(_) => VERSION_ED25519_PUBLIC_KEY,
            Strkey::Ed25519SecretSeed(_) => VERSION_ED25519_SECRET_SEED,
            Strkey::Med25519PublicKey { .. } => VERSION_MED25519_PUBLIC_KEY,
            Strkey::PreAuthTx(_) => VERSION_PRE_AUTH_TX,
            Strkey::Sha256Hash(_) => VERSION_SHA256_HASH,
            Strkey::SignedPayloadEd25519 { .. } => VERSION_SIGNED_PAYLOAD,
            Strkey::Contract(_) => VERSION_CONTRACT,
            Strkey::LiquidityPool(_) => VERSION_LIQUIDITY_POOL,
            Strkey::ClaimableBalanceV0(_) => VERSION_CLAIMABLE_BALANCE,
        }
    }

    fn payload(&self) -> Vec<u8> {
        match self {
            Strkey::Ed25519PublicKey(k)
            | Strkey::Ed25519SecretSeed(k)
            | Strkey::PreAuthTx(k)
            | Strkey::Sha256Hash(k)
            | Strkey::Contract(k)
            | Strkey::LiquidityPool(k) => k.to_vec(),
            Strkey::Med25519PublicKey { ed25519, id } => {
                let mut p = Vec::with_capacity(40);
                p.extend_from_slice(ed25519);
                p.extend_from_slice(&id.to_be_bytes());
                p
            }
            Strkey::SignedPayloadEd25519 { ed25519, payload } => {
                let pad = (4 - payload.len() % 4) % 4;
                let mut p = Vec::with_capacity(36 + payload.len() + pad);
                p.extend_from_slice(ed25519);
                p.extend_from_slice(&(payload.len() as u32).to_be_bytes());
                p.extend_from_slice(payload);
                p.resize(p.len() + pad, 0);
                p
            }
            Strkey::ClaimableBalanceV0(h) => {
                let mut p = Vec::with_capacity(33);
                p.push(CLAIMABLE_BALANCE_V0);
                p.extend_from_slice(h);
                p
            }
        }
    }

    /// Decodes and validates an address string.
    pub fn from_string(s: &str) -> Result<Self, StrkeyError> {
        let data = base32_decode(s)?;
        if data.len() < 3 {
            return Err(StrkeyError::InvalidEncodedString);
        }

        let (body, checksum) = data.split_at(data.len() - 2);
        if checksum != crc16(body).to_le_bytes() {
            return Err(StrkeyError::InvalidChecksum);
        }

        let payload = &body[1..];
        let decoded = match body[0] {
            VERSION_ED25519_PUBLIC_KEY => Strkey::Ed25519PublicKey(fixed32(payload)?),
            VERSION_ED25519_SECRET_SEED => Strkey::Ed25519SecretSeed(fixed32(payload)?),
            VERSION_PRE_AUTH_TX => Strkey::PreAuthTx(fixed32(payload)?),
            VERSION_SHA256_HASH => Strkey::Sha256Hash(fixed32(payload)?),
            VERSION_CONTRACT => Strkey::Contract(fixed32(payload)?),
            VERSION_LIQUIDITY_POOL => Strkey::LiquidityPool(fixed32(payload)?),
            VERSION_MED25519_PUBLIC_KEY => {
                if payload.len() != 40 {
                    return Err(StrkeyError::InvalidEncodedString);
                }
                Strkey::Med25519PublicKey {
                    ed25519: fixed32(&payload[..32])?,
                    // SAFETY: the slice is exactly 8 bytes
                    id: u64::from_be_bytes(payload[32..40].try_into().unwrap()),
                }
            }
            VERSION_SIGNED_PAYLOAD => {
                if payload.len() < 36 {
                    return Err(StrkeyError::InvalidEncodedString);
                }
                // SAFETY: the slice is exactly 4 bytes
                let inner_len =
                    u32::from_be_bytes(payload[32..36].try_into().unwrap()) as usize;
                if !(1..=64).contains(&inner_len) {
                    return Err(StrkeyError::InvalidEncodedString);
                }
                let pad = (4 - inner_len % 4) % 4;
                if payload.len() != 36 + inner_len + pad {
                    return Err(StrkeyError::InvalidEncodedString);
                }
                Strkey::SignedPayloadEd25519 {
                    ed25519: fixed32(&payload[..32])?,
                    payload: payload[36..36 + inner_len].to_vec(),
                }
            }
            VERSION_CLAIMABLE_BALANCE => {
                if payload.len() != 33 || payload[0] != CLAIMABLE_BALANCE_V0 {
                    return Err(StrkeyError::InvalidEncodedString);
                }
                Strkey::ClaimableBalanceV0(fixed32(&payload[1..])?)
            }
            _ => return Err(StrkeyError::InvalidEncodedString),
        };

        // Re-encode and require exact equality. This rejects non-canonical
        // inputs the earlier steps cannot see: nonzero base-32 trailing bits
        // and nonzero signed-payload padding bytes.
        if decoded.to_string() != s {
            return Err(StrkeyError::InvalidEncodedString);
        }
        Ok(decoded)
    }

    /// Extracts the version byte from the first two characters, without
    /// checksum or structure validation. For cheap address-type dispatch
    /// before committing to a full decode.
    pub fn version_of(s: &str) -> Result<u8, StrkeyError> {
        let bytes = s.as_bytes();
        if bytes.len() < 2 {
            return Err(StrkeyError::InvalidEncodedString);
        }
        let hi = decode_char(bytes[0])?;
        let lo = decode_char(bytes[1])?;
        Ok(hi << 3 | lo >> 2)
    }
}

impl fmt::Display for Strkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_parts(self.version_byte(), &self.payload()))
    }
}

impl FromStr for Strkey {
    type Err = StrkeyError;

    fn from_str(s: &str) -> Result<Self, StrkeyError> {
        Self::from_string(s)
    }
}

fn fixed32(bytes: &[u8]) -> Result<[u8; 32], StrkeyError> {
    bytes
        .try_into()
        .map_err(|_| StrkeyError::InvalidEncodedString)
}

fn encode_parts(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 3);
    data.push(version);
    data.extend_from_slice(payload);
    let checksum = crc16(&data);
    data.extend_from_slice(&checksum.to_le_bytes());
    base32_encode(&data)
}

/// CRC16-XMODEM: polynomial 0x1021, initial value 0.
fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Encodes bytes as base 32 with no padding characters.
fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(5) * 8);
    for chunk in data.chunks(5) {
        let mut buf = [0u8; 5];
        buf[..chunk.len()].copy_from_slice(chunk);
        let bits = (u64::from(buf[0]) << 32)
            | (u64::from(buf[1]) << 24)
            | (u64::from(buf[2]) << 16)
            | (u64::from(buf[3]) << 8)
            | u64::from(buf[4]);
        let chars = (chunk.len() * 8).div_ceil(5);
        for i in 0..chars {
            let index = (bits >> (35 - 5 * i)) & 0x1F;
            out.push(ALPHABET[index as usize] as char);
        }
    }
    out
}

/// Decodes no-padding base 32. Rejects `=`, characters outside the alphabet,
/// and structurally impossible lengths. Trailing bits are not validated here;
/// the caller's re-encode pass rejects non-canonical values.
fn base32_decode(s: &str) -> Result<Vec<u8>, StrkeyError> {
    let bytes = s.as_bytes();
    if matches!(bytes.len() % 8, 1 | 3 | 6) {
        return Err(StrkeyError::InvalidEncodedString);
    }
    let mut out = Vec::with_capacity(bytes.len() * 5 / 8);
    let mut acc: u32 = 0;
    let mut nbits = 0;
    for &b in bytes {
        acc = acc << 5 | u32::from(decode_char(b)?);
        nbits += 5;
        if nbits >= 8 {
            nbits -= 8;
            out.push((acc >> nbits) as u8);
        }
    }
    Ok(out)
}

fn decode_char(c: u8) -> Result<u8, StrkeyError> {
    match c {
        b'A'..=b'Z' => Ok(c - b'A'),
        b'2'..=b'7' => Ok(c - b'2' + 26),
        _ => Err(StrkeyError::InvalidEncodedString),
    }
}
