//! Wide integer parts: 128-bit and 256-bit integers carried as 64-bit limbs.
//!
//! On the wire these are plain structs of big-endian limbs, most significant
//! first. The JSON projection is a single base-10 string assembled from the
//! limbs; decoding also accepts an object of per-limb values for
//! interoperability with producers that emit limbs directly. JSON numbers are
//! rejected outright.

use serde_json::Value;

use crate::codec::primitives::{Reader, Writer};
use crate::codec::XdrCodec;
use crate::error::{DecodeError, EncodeError, JsonError};

// =============================================================================
// 128-BIT
// =============================================================================

/// Unsigned 128-bit integer as two 64-bit limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UInt128Parts {
    pub hi: u64,
    pub lo: u64,
}

impl UInt128Parts {
    /// Reassembles the limbs: `(hi << 64) | lo`.
    pub fn to_u128(self) -> u128 {
        (u128::from(self.hi) << 64) | u128::from(self.lo)
    }
}

impl From<u128> for UInt128Parts {
    fn from(v: u128) -> Self {
        Self {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

impl XdrCodec for UInt128Parts {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_u64(self.hi);
        w.write_u64(self.lo);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            hi: r.read_u64("UInt128Parts.hi")?,
            lo: r.read_u64("UInt128Parts.lo")?,
        })
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_u128().to_string())
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        match v {
            Value::String(s) => {
                let value = s.parse::<u128>().map_err(|_| JsonError::OutOfRange {
                    ty: "UInt128Parts",
                    value: s.clone(),
                })?;
                Ok(Self::from(value))
            }
            Value::Object(map) => Ok(Self {
                hi: limb_field::<u64>(map, "UInt128Parts", "hi")?,
                lo: limb_field::<u64>(map, "UInt128Parts", "lo")?,
            }),
            _ => Err(JsonError::ExpectedString { ty: "UInt128Parts" }),
        }
    }
}

/// Signed 128-bit integer as two 64-bit limbs; the high limb carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int128Parts {
    pub hi: i64,
    pub lo: u64,
}

impl Int128Parts {
    /// Reassembles the limbs: `(hi << 64) | lo` in two's complement.
    pub fn to_i128(self) -> i128 {
        (i128::from(self.hi) << 64) | i128::from(self.lo)
    }
}

impl From<i128> for Int128Parts {
    fn from(v: i128) -> Self {
        Self {
            hi: (v >> 64) as i64,
            lo: v as u64,
        }
    }
}

impl XdrCodec for Int128Parts {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_i64(self.hi);
        w.write_u64(self.lo);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            hi: r.read_i64("Int128Parts.hi")?,
            lo: r.read_u64("Int128Parts.lo")?,
        })
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_i128().to_string())
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        match v {
            Value::String(s) => {
                let value = s.parse::<i128>().map_err(|_| JsonError::OutOfRange {
                    ty: "Int128Parts",
                    value: s.clone(),
                })?;
                Ok(Self::from(value))
            }
            Value::Object(map) => Ok(Self {
                hi: limb_field::<i64>(map, "Int128Parts", "hi")?,
                lo: limb_field::<u64>(map, "Int128Parts", "lo")?,
            }),
            _ => Err(JsonError::ExpectedString { ty: "Int128Parts" }),
        }
    }
}

// =============================================================================
// 256-BIT
// =============================================================================

/// Unsigned 256-bit integer as four 64-bit limbs, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UInt256Parts {
    pub hi_hi: u64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

impl UInt256Parts {
    fn limbs(self) -> [u64; 4] {
        [self.hi_hi, self.hi_lo, self.lo_hi, self.lo_lo]
    }

    fn from_limbs(limbs: [u64; 4]) -> Self {
        Self {
            hi_hi: limbs[0],
            hi_lo: limbs[1],
            lo_hi: limbs[2],
            lo_lo: limbs[3],
        }
    }
}

impl XdrCodec for UInt256Parts {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_u64(self.hi_hi);
        w.write_u64(self.hi_lo);
        w.write_u64(self.lo_hi);
        w.write_u64(self.lo_lo);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            hi_hi: r.read_u64("UInt256Parts.hi_hi")?,
            hi_lo: r.read_u64("UInt256Parts.hi_lo")?,
            lo_hi: r.read_u64("UInt256Parts.lo_hi")?,
            lo_lo: r.read_u64("UInt256Parts.lo_lo")?,
        })
    }

    fn to_json(&self) -> Value {
        Value::String(u256_to_decimal(self.limbs()))
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        match v {
            Value::String(s) => {
                let limbs = u256_from_decimal(s).ok_or_else(|| JsonError::OutOfRange {
                    ty: "UInt256Parts",
                    value: s.clone(),
                })?;
                Ok(Self::from_limbs(limbs))
            }
            Value::Object(map) => Ok(Self {
                hi_hi: limb_field::<u64>(map, "UInt256Parts", "hi_hi")?,
                hi_lo: limb_field::<u64>(map, "UInt256Parts", "hi_lo")?,
                lo_hi: limb_field::<u64>(map, "UInt256Parts", "lo_hi")?,
                lo_lo: limb_field::<u64>(map, "UInt256Parts", "lo_lo")?,
            }),
            _ => Err(JsonError::ExpectedString { ty: "UInt256Parts" }),
        }
    }
}

/// Signed 256-bit integer as four 64-bit limbs; the most significant limb
/// carries the sign, two's complement at the 256-bit boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int256Parts {
    pub hi_hi: i64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

impl Int256Parts {
    fn limbs(self) -> [u64; 4] {
        [self.hi_hi as u64, self.hi_lo, self.lo_hi, self.lo_lo]
    }

    fn from_limbs(limbs: [u64; 4]) -> Self {
        Self {
            hi_hi: limbs[0] as i64,
            hi_lo: limbs[1],
            lo_hi: limbs[2],
            lo_lo: limbs[3],
        }
    }
}

impl XdrCodec for Int256Parts {
    fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        w.write_i64(self.hi_hi);
        w.write_u64(self.hi_lo);
        w.write_u64(self.lo_hi);
        w.write_u64(self.lo_lo);
        Ok(())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            hi_hi: r.read_i64("Int256Parts.hi_hi")?,
            hi_lo: r.read_u64("Int256Parts.hi_lo")?,
            lo_hi: r.read_u64("Int256Parts.lo_hi")?,
            lo_lo: r.read_u64("Int256Parts.lo_lo")?,
        })
    }

    fn to_json(&self) -> Value {
        let limbs = self.limbs();
        if self.hi_hi < 0 {
            // The magnitude of the most negative value is 2^255, which the
            // unsigned interpretation of its own negation represents exactly.
            let mut s = String::from("-");
            s.push_str(&u256_to_decimal(neg256(limbs)));
            Value::String(s)
        } else {
            Value::String(u256_to_decimal(limbs))
        }
    }

    fn from_json(v: &Value) -> Result<Self, JsonError> {
        match v {
            Value::String(s) => {
                let limbs = i256_from_decimal(s).ok_or_else(|| JsonError::OutOfRange {
                    ty: "Int256Parts",
                    value: s.clone(),
                })?;
                Ok(Self::from_limbs(limbs))
            }
            Value::Object(map) => Ok(Self {
                hi_hi: limb_field::<i64>(map, "Int256Parts", "hi_hi")?,
                hi_lo: limb_field::<u64>(map, "Int256Parts", "hi_lo")?,
                lo_hi: limb_field::<u64>(map, "Int256Parts", "lo_hi")?,
                lo_lo: limb_field::<u64>(map, "Int256Parts", "lo_lo")?,
            }),
            _ => Err(JsonError::ExpectedString { ty: "Int256Parts" }),
        }
    }
}

// =============================================================================
// LIMB ARITHMETIC
// =============================================================================

fn limb_field<T: XdrCodec>(
    map: &serde_json::Map<String, Value>,
    ty: &'static str,
    field: &'static str,
) -> Result<T, JsonError> {
    T::from_json(map.get(field).ok_or(JsonError::MissingField { ty, field })?)
}

/// Formats a 256-bit unsigned integer (most significant limb first) as
/// base 10.
fn u256_to_decimal(mut limbs: [u64; 4]) -> String {
    if limbs == [0; 4] {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(78);
    while limbs != [0; 4] {
        digits.push(b'0' + div_rem_10(&mut limbs));
    }
    digits.reverse();
    // SAFETY: the buffer holds only ASCII digits
    String::from_utf8(digits).unwrap()
}

/// Divides the 256-bit value in place by 10, returning the remainder.
fn div_rem_10(limbs: &mut [u64; 4]) -> u8 {
    let mut rem: u128 = 0;
    for limb in limbs.iter_mut() {
        let acc = (rem << 64) | u128::from(*limb);
        *limb = (acc / 10) as u64;
        rem = acc % 10;
    }
    rem as u8
}

/// Parses a base-10 string into a 256-bit unsigned integer. Returns `None`
/// on empty input, non-digit characters, or overflow past 2^256.
fn u256_from_decimal(s: &str) -> Option<[u64; 4]> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut limbs = [0u64; 4];
    for b in s.bytes() {
        mul10_add(&mut limbs, u64::from(b - b'0'))?;
    }
    Some(limbs)
}

/// Computes `limbs * 10 + digit` in place; `None` on 256-bit overflow.
fn mul10_add(limbs: &mut [u64; 4], digit: u64) -> Option<()> {
    let mut carry = u128::from(digit);
    for limb in limbs.iter_mut().rev() {
        let acc = u128::from(*limb) * 10 + carry;
        *limb = acc as u64;
        carry = acc >> 64;
    }
    if carry != 0 { None } else { Some(()) }
}

/// Two's-complement negation at the 256-bit boundary.
fn neg256(limbs: [u64; 4]) -> [u64; 4] {
    let mut out = [0u64; 4];
    let mut carry = 1u64;
    for i in (0..4).rev() {
        let (v, c) = (!limbs[i]).overflowing_add(carry);
        out[i] = v;
        carry = u64::from(c);
    }
    out
}

/// Parses a base-10 string (optional leading `-`) into the two's-complement
/// limbs of a signed 256-bit integer, rejecting values outside
/// `[-2^255, 2^255 - 1]`.
fn i256_from_decimal(s: &str) -> Option<[u64; 4]> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let magnitude = u256_from_decimal(digits)?;
    let sign_bit = magnitude[0] & (1 << 63) != 0;
    if negative {
        // Magnitude up to 2^255 inclusive.
        if sign_bit && magnitude != [1 << 63, 0, 0, 0] {
            return None;
        }
        Some(neg256(magnitude))
    } else {
        if sign_bit { None } else { Some(magnitude) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int128_negative_one() {
        let v = Int128Parts::from(-1i128);
        assert_eq!(v.hi, -1);
        assert_eq!(v.lo, u64::MAX);
        assert_eq!(v.to_json(), json!("-1"));
        assert_eq!(Int128Parts::from_json(&json!("-1")).unwrap(), v);
    }

    #[test]
    fn test_int128_wire_format() {
        let v = Int128Parts::from(-1i128);
        assert_eq!(v.to_xdr().unwrap(), vec![0xFF; 16]);
        assert_eq!(Int128Parts::from_xdr(&[0xFF; 16]).unwrap(), v);
    }

    #[test]
    fn test_uint128_max_roundtrip() {
        let v = UInt128Parts::from(u128::MAX);
        let j = v.to_json();
        assert_eq!(j, json!("340282366920938463463374607431768211455"));
        assert_eq!(UInt128Parts::from_json(&j).unwrap(), v);
    }

    #[test]
    fn test_uint128_range_errors() {
        assert!(matches!(
            UInt128Parts::from_json(&json!("-1")),
            Err(JsonError::OutOfRange { .. })
        ));
        // 2^128
        assert!(matches!(
            UInt128Parts::from_json(&json!("340282366920938463463374607431768211456")),
            Err(JsonError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_wide_int_rejects_json_numbers() {
        assert!(matches!(
            UInt128Parts::from_json(&json!(7)),
            Err(JsonError::ExpectedString { .. })
        ));
        assert!(matches!(
            Int256Parts::from_json(&json!(7)),
            Err(JsonError::ExpectedString { .. })
        ));
    }

    #[test]
    fn test_dual_limb_object_form() {
        let v = UInt128Parts::from_json(&json!({"hi": "1", "lo": "5"})).unwrap();
        assert_eq!(v, UInt128Parts { hi: 1, lo: 5 });
        assert_eq!(v.to_json(), json!("18446744073709551621"));

        let v = Int128Parts::from_json(&json!({"hi": "-1", "lo": "18446744073709551615"})).unwrap();
        assert_eq!(v.to_i128(), -1);

        let v = UInt256Parts::from_json(
            &json!({"hi_hi": "0", "hi_lo": "0", "lo_hi": "1", "lo_lo": "5"}),
        )
        .unwrap();
        assert_eq!(v.to_json(), json!("18446744073709551621"));
    }

    #[test]
    fn test_dual_limb_object_missing_field() {
        assert!(matches!(
            UInt128Parts::from_json(&json!({"hi": "1"})),
            Err(JsonError::MissingField { field: "lo", .. })
        ));
    }

    #[test]
    fn test_uint256_zero_and_max() {
        let zero = UInt256Parts::default();
        assert_eq!(zero.to_json(), json!("0"));
        assert_eq!(UInt256Parts::from_json(&json!("0")).unwrap(), zero);

        let max = UInt256Parts {
            hi_hi: u64::MAX,
            hi_lo: u64::MAX,
            lo_hi: u64::MAX,
            lo_lo: u64::MAX,
        };
        let j = max.to_json();
        assert_eq!(
            j,
            json!(
                "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            )
        );
        assert_eq!(UInt256Parts::from_json(&j).unwrap(), max);
    }

    #[test]
    fn test_uint256_overflow_rejected() {
        // 2^256
        assert!(matches!(
            UInt256Parts::from_json(&json!(
                "115792089237316195423570985008687907853269984665640564039457584007913129639936"
            )),
            Err(JsonError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_int256_bounds() {
        let min = Int256Parts {
            hi_hi: i64::MIN,
            hi_lo: 0,
            lo_hi: 0,
            lo_lo: 0,
        };
        let j = min.to_json();
        assert_eq!(
            j,
            json!(
                "-57896044618658097711785492504343953926634992332820282019728792003956564819968"
            )
        );
        assert_eq!(Int256Parts::from_json(&j).unwrap(), min);

        let max = Int256Parts {
            hi_hi: i64::MAX,
            hi_lo: u64::MAX,
            lo_hi: u64::MAX,
            lo_lo: u64::MAX,
        };
        let j = max.to_json();
        assert_eq!(
            j,
            json!(
                "57896044618658097711785492504343953926634992332820282019728792003956564819967"
            )
        );
        assert_eq!(Int256Parts::from_json(&j).unwrap(), max);
    }

    #[test]
    fn test_int256_out_of_range() {
        // 2^255, one past the signed maximum
        assert!(matches!(
            Int256Parts::from_json(&json!(
                "57896044618658097711785492504343953926634992332820282019728792003956564819968"
            )),
            Err(JsonError::OutOfRange { .. })
        ));
        // -(2^255 + 1), one past the signed minimum
        assert!(matches!(
            Int256Parts::from_json(&json!(
                "-57896044618658097711785492504343953926634992332820282019728792003956564819969"
            )),
            Err(JsonError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_int256_negative_roundtrip() {
        let v = Int256Parts::from_json(&json!("-2")).unwrap();
        assert_eq!(v.hi_hi, -1);
        assert_eq!(v.lo_lo, u64::MAX - 1);
        assert_eq!(v.to_json(), json!("-2"));
    }

    #[test]
    fn test_wide_int_binary_roundtrip() {
        let v = UInt256Parts {
            hi_hi: 1,
            hi_lo: 2,
            lo_hi: 3,
            lo_lo: 4,
        };
        let bytes = v.to_xdr().unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(UInt256Parts::from_xdr(&bytes).unwrap(), v);
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        for s in ["", "12a", "+5", " 7", "0x10"] {
            assert!(
                matches!(
                    UInt256Parts::from_json(&json!(s)),
                    Err(JsonError::OutOfRange { .. })
                ),
                "accepted {s:?}"
            );
        }
    }
}
