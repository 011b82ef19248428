//! The closed set of wire type tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Sentinel wire string for "no value". Distinct from the empty string.
pub const ABSENT: &str = "⟪undefined⟫";

/// Every type tag that may appear in a wire pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WireType {
    /// `true` / `false`.
    Boolean,
    /// 1-byte signed integer.
    Int1,
    /// 2-byte signed integer.
    Int2,
    /// 4-byte signed integer.
    Int4,
    /// 8-byte signed integer.
    Int8,
    /// 16-byte signed integer.
    Int16,
    /// 1-byte unsigned integer.
    Uint1,
    /// 2-byte unsigned integer.
    Uint2,
    /// 4-byte unsigned integer.
    Uint4,
    /// 8-byte unsigned integer.
    Uint8,
    /// 16-byte unsigned integer.
    Uint16,
    /// IEEE-754 binary32.
    Float4,
    /// IEEE-754 binary64.
    Float8,
    /// UTF-8 text.
    Utf8,
    /// Binary large object, `0x`-prefixed hex on the wire.
    Blob,
    /// Calendar date.
    Date,
    /// Instant in UTC with nanosecond precision.
    DateTime,
    /// Time of day with nanosecond precision.
    Time,
    /// Months, days and nanoseconds.
    Interval,
    /// UUID version 4.
    Uuid4,
    /// UUID version 7.
    Uuid7,
    /// UUID version 7 or the nil UUID.
    IdentityId,
    /// Engine-assigned row number.
    RowNumber,
    /// Arbitrary-precision decimal literal.
    Decimal,
    /// No type, no value.
    Undefined,
}

impl WireType {
    pub const ALL: [WireType; 25] = [
        WireType::Boolean,
        WireType::Int1,
        WireType::Int2,
        WireType::Int4,
        WireType::Int8,
        WireType::Int16,
        WireType::Uint1,
        WireType::Uint2,
        WireType::Uint4,
        WireType::Uint8,
        WireType::Uint16,
        WireType::Float4,
        WireType::Float8,
        WireType::Utf8,
        WireType::Blob,
        WireType::Date,
        WireType::DateTime,
        WireType::Time,
        WireType::Interval,
        WireType::Uuid4,
        WireType::Uuid7,
        WireType::IdentityId,
        WireType::RowNumber,
        WireType::Decimal,
        WireType::Undefined,
    ];

    /// The exact tag string used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            WireType::Boolean => "Boolean",
            WireType::Int1 => "Int1",
            WireType::Int2 => "Int2",
            WireType::Int4 => "Int4",
            WireType::Int8 => "Int8",
            WireType::Int16 => "Int16",
            WireType::Uint1 => "Uint1",
            WireType::Uint2 => "Uint2",
            WireType::Uint4 => "Uint4",
            WireType::Uint8 => "Uint8",
            WireType::Uint16 => "Uint16",
            WireType::Float4 => "Float4",
            WireType::Float8 => "Float8",
            WireType::Utf8 => "Utf8",
            WireType::Blob => "Blob",
            WireType::Date => "Date",
            WireType::DateTime => "DateTime",
            WireType::Time => "Time",
            WireType::Interval => "Interval",
            WireType::Uuid4 => "Uuid4",
            WireType::Uuid7 => "Uuid7",
            WireType::IdentityId => "IdentityId",
            WireType::RowNumber => "RowNumber",
            WireType::Decimal => "Decimal",
            WireType::Undefined => "Undefined",
        }
    }

    /// Inclusive bounds of a signed integer type.
    pub fn signed_bounds(&self) -> Option<(i128, i128)> {
        match self {
            WireType::Int1 => Some((i8::MIN as i128, i8::MAX as i128)),
            WireType::Int2 => Some((i16::MIN as i128, i16::MAX as i128)),
            WireType::Int4 => Some((i32::MIN as i128, i32::MAX as i128)),
            WireType::Int8 => Some((i64::MIN as i128, i64::MAX as i128)),
            WireType::Int16 => Some((i128::MIN, i128::MAX)),
            _ => None,
        }
    }

    /// Inclusive upper bound of an unsigned integer type. The lower bound is zero.
    pub fn unsigned_max(&self) -> Option<u128> {
        match self {
            WireType::Uint1 => Some(u8::MAX as u128),
            WireType::Uint2 => Some(u16::MAX as u128),
            WireType::Uint4 => Some(u32::MAX as u128),
            WireType::Uint8 | WireType::RowNumber => Some(u64::MAX as u128),
            WireType::Uint16 => Some(u128::MAX),
            _ => None,
        }
    }

    pub fn is_signed_integer(&self) -> bool {
        self.signed_bounds().is_some()
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self,
            WireType::Uint1 | WireType::Uint2 | WireType::Uint4 | WireType::Uint8 | WireType::Uint16
        )
    }

    pub fn is_integer(&self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    pub fn is_float(&self) -> bool {
        matches!(self, WireType::Float4 | WireType::Float8)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            WireType::Date | WireType::DateTime | WireType::Time | WireType::Interval
        )
    }

    pub fn is_uuid(&self) -> bool {
        matches!(self, WireType::Uuid4 | WireType::Uuid7 | WireType::IdentityId)
    }

    /// Whether values of this type decode to a 128-bit carrier rather than
    /// a narrow native number.
    pub fn is_wide(&self) -> bool {
        matches!(
            self,
            WireType::Int8
                | WireType::Int16
                | WireType::Uint8
                | WireType::Uint16
                | WireType::RowNumber
        )
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WireType::ALL
            .iter()
            .find(|ty| ty.as_str() == s)
            .copied()
            .ok_or_else(|| CodecError::Decode(format!("unrecognized wire type tag '{}'", s)))
    }
}
