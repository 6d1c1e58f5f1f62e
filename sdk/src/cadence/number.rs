//! Numeric values.
//!
//! All twenty numeric kinds travel as decimal text so that 128/256-bit and
//! fixed-point values survive intact. [`Number`] stores each kind in the
//! narrowest native type that holds it exactly and range-checks on parse.
//!
//! Fix64/UFix64 are stored scaled by 10^8; `Fix64(150_000_000)` is `1.5`.

use num_bigint::{BigInt, BigUint};
use std::fmt;
use std::str::FromStr;

use super::error::CodecError;
use super::tag::TypeTag;
use crate::config::{FIX64_FACTOR, FIX64_SCALE};

/// A signed integer in `[-2^255, 2^255)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct I256(BigInt);

impl I256 {
    /// Returns `None` when `value` does not fit in 256 signed bits.
    pub fn new(value: BigInt) -> Option<Self> {
        let bound = BigInt::from(1u8) << 255usize;
        if value >= -&bound && value < bound {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> &BigInt {
        &self.0
    }
}

/// An unsigned integer in `[0, 2^256)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct U256(BigUint);

impl U256 {
    pub fn new(value: BigUint) -> Option<Self> {
        if value.bits() <= 256 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

/// One of the twenty numeric kinds, tag included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Number {
    Int(BigInt),
    UInt(BigUint),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int128(i128),
    Int256(I256),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UInt128(u128),
    UInt256(U256),
    Word8(u8),
    Word16(u16),
    Word32(u32),
    Word64(u64),
    Fix64(i64),
    UFix64(u64),
}

impl Number {
    /// Parses the decimal text carried on the wire for the given tag.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidNumber`] when the text is malformed, out of range
    /// for the declared width, or `tag` is not numeric.
    pub fn parse(tag: TypeTag, text: &str) -> Result<Number, CodecError> {
        let invalid = |reason: &'static str| CodecError::InvalidNumber {
            tag: tag.as_str(),
            text: text.to_string(),
            reason,
        };
        const RANGE: &str = "not an integer in range";

        let number = match tag {
            TypeTag::Int => Number::Int(BigInt::from_str(text).map_err(|_| invalid(RANGE))?),
            TypeTag::UInt => Number::UInt(BigUint::from_str(text).map_err(|_| invalid(RANGE))?),
            TypeTag::Int8 => Number::Int8(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::Int16 => Number::Int16(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::Int32 => Number::Int32(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::Int64 => Number::Int64(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::Int128 => Number::Int128(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::Int256 => {
                let big = BigInt::from_str(text).map_err(|_| invalid(RANGE))?;
                Number::Int256(I256::new(big).ok_or_else(|| invalid(RANGE))?)
            }
            TypeTag::UInt8 => Number::UInt8(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::UInt16 => Number::UInt16(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::UInt32 => Number::UInt32(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::UInt64 => Number::UInt64(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::UInt128 => Number::UInt128(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::UInt256 => {
                let big = BigUint::from_str(text).map_err(|_| invalid(RANGE))?;
                Number::UInt256(U256::new(big).ok_or_else(|| invalid(RANGE))?)
            }
            TypeTag::Word8 => Number::Word8(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::Word16 => Number::Word16(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::Word32 => Number::Word32(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::Word64 => Number::Word64(text.parse().map_err(|_| invalid(RANGE))?),
            TypeTag::Fix64 => {
                let scaled = parse_fixed(text, true).ok_or_else(|| invalid("not a Fix64 literal"))?;
                Number::Fix64(i64::try_from(scaled).map_err(|_| invalid("out of range"))?)
            }
            TypeTag::UFix64 => {
                let scaled =
                    parse_fixed(text, false).ok_or_else(|| invalid("not a UFix64 literal"))?;
                Number::UFix64(u64::try_from(scaled).map_err(|_| invalid("out of range"))?)
            }
            _ => return Err(invalid("not a numeric type")),
        };
        Ok(number)
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            Number::Int(_) => TypeTag::Int,
            Number::UInt(_) => TypeTag::UInt,
            Number::Int8(_) => TypeTag::Int8,
            Number::Int16(_) => TypeTag::Int16,
            Number::Int32(_) => TypeTag::Int32,
            Number::Int64(_) => TypeTag::Int64,
            Number::Int128(_) => TypeTag::Int128,
            Number::Int256(_) => TypeTag::Int256,
            Number::UInt8(_) => TypeTag::UInt8,
            Number::UInt16(_) => TypeTag::UInt16,
            Number::UInt32(_) => TypeTag::UInt32,
            Number::UInt64(_) => TypeTag::UInt64,
            Number::UInt128(_) => TypeTag::UInt128,
            Number::UInt256(_) => TypeTag::UInt256,
            Number::Word8(_) => TypeTag::Word8,
            Number::Word16(_) => TypeTag::Word16,
            Number::Word32(_) => TypeTag::Word32,
            Number::Word64(_) => TypeTag::Word64,
            Number::Fix64(_) => TypeTag::Fix64,
            Number::UFix64(_) => TypeTag::UFix64,
        }
    }

    /// Exact value for the integer kinds; `None` for fixed-point.
    pub fn to_big_int(&self) -> Option<BigInt> {
        let big = match self {
            Number::Int(v) => v.clone(),
            Number::Int256(v) => v.0.clone(),
            Number::UInt(v) => BigInt::from(v.clone()),
            Number::UInt256(v) => BigInt::from(v.0.clone()),
            Number::Int8(v) => BigInt::from(*v),
            Number::Int16(v) => BigInt::from(*v),
            Number::Int32(v) => BigInt::from(*v),
            Number::Int64(v) => BigInt::from(*v),
            Number::Int128(v) => BigInt::from(*v),
            Number::UInt8(v) | Number::Word8(v) => BigInt::from(*v),
            Number::UInt16(v) | Number::Word16(v) => BigInt::from(*v),
            Number::UInt32(v) | Number::Word32(v) => BigInt::from(*v),
            Number::UInt64(v) | Number::Word64(v) => BigInt::from(*v),
            Number::UInt128(v) => BigInt::from(*v),
            Number::Fix64(_) | Number::UFix64(_) => return None,
        };
        Some(big)
    }

    /// Lossy conversion to `i64`. Fixed-point values lose their fraction
    /// (truncated toward zero); `None` if the integer part does not fit.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Number::Fix64(v) => Some(v / FIX64_FACTOR as i64),
            Number::UFix64(v) => i64::try_from(v / FIX64_FACTOR).ok(),
            _ => self.to_big_int().and_then(|b| i64::try_from(&b).ok()),
        }
    }

    /// Lossy conversion to `u64`, same rules as [`Number::to_i64`].
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Number::Fix64(v) => u64::try_from(v / FIX64_FACTOR as i64).ok(),
            Number::UFix64(v) => Some(v / FIX64_FACTOR),
            _ => self.to_big_int().and_then(|b| u64::try_from(&b).ok()),
        }
    }

    /// Nearest `f64`. Precision is lost beyond 53 significant bits.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = FIX64_SCALE as usize;
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::UInt(v) => write!(f, "{v}"),
            Number::Int8(v) => write!(f, "{v}"),
            Number::Int16(v) => write!(f, "{v}"),
            Number::Int32(v) => write!(f, "{v}"),
            Number::Int64(v) => write!(f, "{v}"),
            Number::Int128(v) => write!(f, "{v}"),
            Number::Int256(v) => write!(f, "{}", v.0),
            Number::UInt8(v) | Number::Word8(v) => write!(f, "{v}"),
            Number::UInt16(v) | Number::Word16(v) => write!(f, "{v}"),
            Number::UInt32(v) | Number::Word32(v) => write!(f, "{v}"),
            Number::UInt64(v) | Number::Word64(v) => write!(f, "{v}"),
            Number::UInt128(v) => write!(f, "{v}"),
            Number::UInt256(v) => write!(f, "{}", v.0),
            Number::Fix64(v) => {
                let sign = if *v < 0 { "-" } else { "" };
                let abs = v.unsigned_abs();
                write!(
                    f,
                    "{sign}{}.{:0width$}",
                    abs / FIX64_FACTOR,
                    abs % FIX64_FACTOR
                )
            }
            Number::UFix64(v) => write!(f, "{}.{:0width$}", v / FIX64_FACTOR, v % FIX64_FACTOR),
        }
    }
}

/// Parses `[-]digits[.digits]` with at most eight fractional digits into
/// the value scaled by 10^8.
fn parse_fixed(text: &str, signed: bool) -> Option<i128> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) if signed => (true, rest),
        Some(_) => return None,
        None => (false, text),
    };
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(frac) {
        return None;
    }
    if frac.len() > FIX64_SCALE as usize {
        return None;
    }

    let whole: i128 = whole.parse().ok()?;
    let frac: i128 = format!("{:0<width$}", frac, width = FIX64_SCALE as usize)
        .parse()
        .ok()?;
    let scaled = whole.checked_mul(FIX64_FACTOR as i128)?.checked_add(frac)?;
    Some(if negative { -scaled } else { scaled })
}
