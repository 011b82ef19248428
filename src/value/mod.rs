//! Typed values for every wire type.
//!
//! A [`Value`] is one variant per [`WireType`], each holding either a present
//! payload or an explicit absent state (`None`). Construction validates
//! eagerly, so a `Value` in hand always satisfies its variant's domain.

pub mod blob;
pub mod interval;

pub use blob::Blob;
pub use interval::Interval;

use std::fmt;
use std::num::IntErrorKind;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec::{Native, WirePair};
use crate::error::{CodecError, CodecResult};
use crate::parser::parse_decimal;
use crate::types::{ABSENT, WireType};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// A validated, variant-tagged value. `None` payloads are absent values.
///
/// Equality is variant-sensitive: `Int4(None) != Int8(None)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WirePair", try_from = "WirePair")]
pub enum Value {
    Boolean(Option<bool>),
    Int1(Option<i8>),
    Int2(Option<i16>),
    Int4(Option<i32>),
    Int8(Option<i64>),
    Int16(Option<i128>),
    Uint1(Option<u8>),
    Uint2(Option<u16>),
    Uint4(Option<u32>),
    Uint8(Option<u64>),
    Uint16(Option<u128>),
    Float4(Option<f32>),
    Float8(Option<f64>),
    Utf8(Option<String>),
    Blob(Option<Blob>),
    Date(Option<NaiveDate>),
    DateTime(Option<DateTime<Utc>>),
    Time(Option<NaiveTime>),
    Interval(Option<Interval>),
    Uuid4(Option<Uuid>),
    Uuid7(Option<Uuid>),
    IdentityId(Option<Uuid>),
    RowNumber(Option<u64>),
    Decimal(Option<String>),
    Undefined,
}

/// An integer literal before it is narrowed to a variant's width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Integer {
    Signed(i128),
    Unsigned(u128),
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Signed(v) => write!(f, "{}", v),
            Integer::Unsigned(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! fallible_constructors {
    ($($(#[$meta:meta])* $name:ident => $ty:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(value: impl Into<Native>) -> CodecResult<Value> {
                Value::new(WireType::$ty, value.into())
            }
        )*
    };
}

impl Value {
    /// Construct a value of the given type from a native value, validating
    /// range and kind.
    pub fn new(ty: WireType, native: Native) -> CodecResult<Value> {
        let native = match native {
            Native::Undefined => return Ok(Value::absent(ty)),
            Native::Value(value) if value.wire_type() == ty => return Ok(value),
            Native::Value(value) => {
                return Err(CodecError::mismatch(ty, format!("a {} value", value.wire_type())));
            }
            other => other,
        };

        let value = match ty {
            WireType::Boolean => match native {
                Native::Bool(b) => Value::Boolean(Some(b)),
                other => return Err(CodecError::mismatch(ty, other.kind())),
            },
            WireType::Int1 => Value::Int1(Some(signed_in(ty, integer_of(ty, &native)?)? as i8)),
            WireType::Int2 => Value::Int2(Some(signed_in(ty, integer_of(ty, &native)?)? as i16)),
            WireType::Int4 => Value::Int4(Some(signed_in(ty, integer_of(ty, &native)?)? as i32)),
            WireType::Int8 => Value::Int8(Some(signed_in(ty, integer_of(ty, &native)?)? as i64)),
            WireType::Int16 => Value::Int16(Some(signed_in(ty, integer_of(ty, &native)?)?)),
            WireType::Uint1 => Value::Uint1(Some(unsigned_in(ty, integer_of(ty, &native)?)? as u8)),
            WireType::Uint2 => Value::Uint2(Some(unsigned_in(ty, integer_of(ty, &native)?)? as u16)),
            WireType::Uint4 => Value::Uint4(Some(unsigned_in(ty, integer_of(ty, &native)?)? as u32)),
            WireType::Uint8 => Value::Uint8(Some(unsigned_in(ty, integer_of(ty, &native)?)? as u64)),
            WireType::Uint16 => Value::Uint16(Some(unsigned_in(ty, integer_of(ty, &native)?)?)),
            WireType::RowNumber => {
                Value::RowNumber(Some(unsigned_in(ty, integer_of(ty, &native)?)? as u64))
            }
            WireType::Float4 => Value::Float4(narrow_f32(float_of(ty, &native)?)?),
            WireType::Float8 => {
                let v = float_of(ty, &native)?;
                Value::Float8(v.is_finite().then_some(v))
            }
            WireType::Utf8 => match native {
                Native::Str(s) => Value::Utf8(Some(s)),
                other => return Err(CodecError::mismatch(ty, other.kind())),
            },
            WireType::Blob => match native {
                Native::Bytes(bytes) => Value::Blob(Some(Blob::new(bytes))),
                other => return Err(CodecError::mismatch(ty, other.kind())),
            },
            WireType::Date => match native {
                Native::Date(d) => Value::Date(Some(d)),
                Native::DateTime(dt) => Value::Date(Some(dt.date_naive())),
                Native::Str(s) => Value::parse(ty, &s)?,
                other => return Err(CodecError::mismatch(ty, other.kind())),
            },
            WireType::DateTime => match native {
                Native::DateTime(dt) => Value::DateTime(Some(dt)),
                Native::Date(d) => {
                    Value::DateTime(Some(Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN))))
                }
                Native::Str(s) => Value::parse(ty, &s)?,
                other => return Err(CodecError::mismatch(ty, other.kind())),
            },
            WireType::Time => match native {
                Native::Time(t) => Value::Time(Some(t)),
                Native::DateTime(dt) => Value::Time(Some(dt.time())),
                Native::Str(s) => Value::parse(ty, &s)?,
                other => return Err(CodecError::mismatch(ty, other.kind())),
            },
            WireType::Interval => match native {
                Native::Duration(i) => Value::Interval(Some(i)),
                Native::Str(s) => Value::parse(ty, &s)?,
                other => return Err(CodecError::mismatch(ty, other.kind())),
            },
            WireType::Uuid4 | WireType::Uuid7 | WireType::IdentityId => match native {
                Native::Uuid(uuid) => Value::with_uuid(ty, check_uuid(ty, uuid)?),
                Native::Str(s) => Value::parse(ty, &s)?,
                other => return Err(CodecError::mismatch(ty, other.kind())),
            },
            WireType::Decimal => match native {
                Native::Str(s) => Value::Decimal(Some(parse_decimal(&s)?.to_string())),
                Native::Int(v) => Value::Decimal(Some(v.to_string())),
                Native::BigInt(v) => Value::Decimal(Some(v.to_string())),
                Native::BigUint(v) => Value::Decimal(Some(v.to_string())),
                Native::Float(v) => Value::Decimal(v.is_finite().then(|| v.to_string())),
                other => return Err(CodecError::mismatch(ty, other.kind())),
            },
            WireType::Undefined => return Err(CodecError::mismatch(ty, native.kind())),
        };

        Ok(value)
    }

    /// Parse a wire string as the given type.
    ///
    /// The absent marker and empty or whitespace-only text both produce the
    /// absent state.
    pub fn parse(ty: WireType, text: &str) -> CodecResult<Value> {
        if text == ABSENT || text.trim().is_empty() {
            return Ok(Value::absent(ty));
        }
        let trimmed = text.trim();

        let value = match ty {
            WireType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" => Value::Boolean(Some(true)),
                "false" => Value::Boolean(Some(false)),
                _ => return Err(CodecError::parse(ty, text, "expected 'true' or 'false'")),
            },
            WireType::Int1
            | WireType::Int2
            | WireType::Int4
            | WireType::Int8
            | WireType::Int16
            | WireType::Uint1
            | WireType::Uint2
            | WireType::Uint4
            | WireType::Uint8
            | WireType::Uint16
            | WireType::RowNumber => {
                let integer = parse_integer(ty, trimmed)?;
                Value::new(ty, integer.into())?
            }
            WireType::Float4 => {
                let wide = parse_float(ty, text, trimmed, -f32::MAX, f32::MAX)?;
                match narrow_f32(wide)? {
                    // Parse again at single precision to round exactly once.
                    Some(_) => Value::Float4(trimmed.parse::<f32>().ok()),
                    None => Value::Float4(None),
                }
            }
            WireType::Float8 => {
                let v = parse_float(ty, text, trimmed, -f64::MAX, f64::MAX)?;
                Value::Float8(v.is_finite().then_some(v))
            }
            WireType::Utf8 => Value::Utf8(Some(text.to_string())),
            WireType::Blob => Value::Blob(Some(Blob::from_hex(trimmed)?)),
            WireType::Date => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .map(|d| Value::Date(Some(d)))
                .map_err(|e| CodecError::parse(ty, text, e.to_string()))?,
            WireType::DateTime => Value::DateTime(Some(parse_datetime(trimmed)?)),
            WireType::Time => NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
                .map(|t| Value::Time(Some(t)))
                .map_err(|e| CodecError::parse(ty, text, e.to_string()))?,
            WireType::Interval => Value::Interval(Some(trimmed.parse()?)),
            WireType::Uuid4 | WireType::Uuid7 | WireType::IdentityId => {
                let uuid = Uuid::parse_str(trimmed)
                    .map_err(|e| CodecError::parse(ty, text, e.to_string()))?;
                Value::with_uuid(ty, check_uuid(ty, uuid)?)
            }
            WireType::Decimal => Value::Decimal(Some(parse_decimal(trimmed)?.to_string())),
            WireType::Undefined => Value::Undefined,
        };

        Ok(value)
    }

    /// The absent value of the given type.
    pub fn absent(ty: WireType) -> Value {
        match ty {
            WireType::Boolean => Value::Boolean(None),
            WireType::Int1 => Value::Int1(None),
            WireType::Int2 => Value::Int2(None),
            WireType::Int4 => Value::Int4(None),
            WireType::Int8 => Value::Int8(None),
            WireType::Int16 => Value::Int16(None),
            WireType::Uint1 => Value::Uint1(None),
            WireType::Uint2 => Value::Uint2(None),
            WireType::Uint4 => Value::Uint4(None),
            WireType::Uint8 => Value::Uint8(None),
            WireType::Uint16 => Value::Uint16(None),
            WireType::Float4 => Value::Float4(None),
            WireType::Float8 => Value::Float8(None),
            WireType::Utf8 => Value::Utf8(None),
            WireType::Blob => Value::Blob(None),
            WireType::Date => Value::Date(None),
            WireType::DateTime => Value::DateTime(None),
            WireType::Time => Value::Time(None),
            WireType::Interval => Value::Interval(None),
            WireType::Uuid4 => Value::Uuid4(None),
            WireType::Uuid7 => Value::Uuid7(None),
            WireType::IdentityId => Value::IdentityId(None),
            WireType::RowNumber => Value::RowNumber(None),
            WireType::Decimal => Value::Decimal(None),
            WireType::Undefined => Value::Undefined,
        }
    }

    pub fn wire_type(&self) -> WireType {
        match self {
            Value::Boolean(_) => WireType::Boolean,
            Value::Int1(_) => WireType::Int1,
            Value::Int2(_) => WireType::Int2,
            Value::Int4(_) => WireType::Int4,
            Value::Int8(_) => WireType::Int8,
            Value::Int16(_) => WireType::Int16,
            Value::Uint1(_) => WireType::Uint1,
            Value::Uint2(_) => WireType::Uint2,
            Value::Uint4(_) => WireType::Uint4,
            Value::Uint8(_) => WireType::Uint8,
            Value::Uint16(_) => WireType::Uint16,
            Value::Float4(_) => WireType::Float4,
            Value::Float8(_) => WireType::Float8,
            Value::Utf8(_) => WireType::Utf8,
            Value::Blob(_) => WireType::Blob,
            Value::Date(_) => WireType::Date,
            Value::DateTime(_) => WireType::DateTime,
            Value::Time(_) => WireType::Time,
            Value::Interval(_) => WireType::Interval,
            Value::Uuid4(_) => WireType::Uuid4,
            Value::Uuid7(_) => WireType::Uuid7,
            Value::IdentityId(_) => WireType::IdentityId,
            Value::RowNumber(_) => WireType::RowNumber,
            Value::Decimal(_) => WireType::Decimal,
            Value::Undefined => WireType::Undefined,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self.to_native(), Native::Undefined)
    }

    /// The wire string for this value; the absent marker when absent.
    pub fn to_wire_string(&self) -> String {
        fn text<T: ToString>(v: &Option<T>) -> String {
            v.as_ref().map_or_else(|| ABSENT.to_string(), ToString::to_string)
        }

        match self {
            Value::Boolean(v) => text(v),
            Value::Int1(v) => text(v),
            Value::Int2(v) => text(v),
            Value::Int4(v) => text(v),
            Value::Int8(v) => text(v),
            Value::Int16(v) => text(v),
            Value::Uint1(v) => text(v),
            Value::Uint2(v) => text(v),
            Value::Uint4(v) => text(v),
            Value::Uint8(v) => text(v),
            Value::Uint16(v) => text(v),
            Value::Float4(v) => text(v),
            Value::Float8(v) => text(v),
            Value::Utf8(v) => text(v),
            Value::Blob(v) => text(v),
            Value::Date(v) => text(&v.map(|d| d.format(DATE_FORMAT))),
            Value::DateTime(v) => text(&v.map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))),
            Value::Time(v) => text(&v.map(|t| t.format(TIME_FORMAT))),
            Value::Interval(v) => text(v),
            Value::Uuid4(v) | Value::Uuid7(v) | Value::IdentityId(v) => text(v),
            Value::RowNumber(v) => text(v),
            Value::Decimal(v) => text(v),
            Value::Undefined => ABSENT.to_string(),
        }
    }

    /// The wire pair for this value.
    pub fn encode(&self) -> WirePair {
        WirePair::new(self.wire_type(), self.to_wire_string())
    }

    /// The native representation: narrow numbers as `Int`/`Float`, 64-bit
    /// and wider integers as `BigInt`/`BigUint`, absent as `Undefined`.
    pub fn to_native(&self) -> Native {
        fn or_undefined<T>(v: &Option<T>, f: impl FnOnce(&T) -> Native) -> Native {
            v.as_ref().map_or(Native::Undefined, f)
        }

        match self {
            Value::Boolean(v) => or_undefined(v, |b| Native::Bool(*b)),
            Value::Int1(v) => or_undefined(v, |n| Native::Int(*n as i64)),
            Value::Int2(v) => or_undefined(v, |n| Native::Int(*n as i64)),
            Value::Int4(v) => or_undefined(v, |n| Native::Int(*n as i64)),
            Value::Int8(v) => or_undefined(v, |n| Native::BigInt(*n as i128)),
            Value::Int16(v) => or_undefined(v, |n| Native::BigInt(*n)),
            Value::Uint1(v) => or_undefined(v, |n| Native::Int(*n as i64)),
            Value::Uint2(v) => or_undefined(v, |n| Native::Int(*n as i64)),
            Value::Uint4(v) => or_undefined(v, |n| Native::Int(*n as i64)),
            Value::Uint8(v) => or_undefined(v, |n| Native::BigUint(*n as u128)),
            Value::Uint16(v) => or_undefined(v, |n| Native::BigUint(*n)),
            Value::Float4(v) => or_undefined(v, |n| Native::Float(*n as f64)),
            Value::Float8(v) => or_undefined(v, |n| Native::Float(*n)),
            Value::Utf8(v) | Value::Decimal(v) => or_undefined(v, |s| Native::Str(s.clone())),
            Value::Blob(v) => or_undefined(v, |b| Native::Bytes(b.as_bytes().to_vec())),
            Value::Date(v) => or_undefined(v, |d| Native::Date(*d)),
            Value::DateTime(v) => or_undefined(v, |dt| Native::DateTime(*dt)),
            Value::Time(v) => or_undefined(v, |t| Native::Time(*t)),
            Value::Interval(v) => or_undefined(v, |i| Native::Duration(*i)),
            Value::Uuid4(v) | Value::Uuid7(v) | Value::IdentityId(v) => {
                or_undefined(v, |u| Native::Uuid(*u))
            }
            Value::RowNumber(v) => or_undefined(v, |n| Native::BigUint(*n as u128)),
            Value::Undefined => Native::Undefined,
        }
    }

    pub fn boolean(value: bool) -> Value {
        Value::Boolean(Some(value))
    }

    fallible_constructors! {
        int1 => Int1,
        int2 => Int2,
        int4 => Int4,
        int8 => Int8,
        int16 => Int16,
        uint1 => Uint1,
        uint2 => Uint2,
        uint4 => Uint4,
        uint8 => Uint8,
        uint16 => Uint16,
        /// Narrow to binary32; fails when the magnitude exceeds `f32::MAX`.
        float4 => Float4,
        float8 => Float8,
        /// Requires a version 4 UUID.
        uuid4 => Uuid4,
        /// Requires a version 7 UUID.
        uuid7 => Uuid7,
        /// Requires a version 7 UUID or the nil UUID.
        identity_id => IdentityId,
        decimal => Decimal,
    }

    pub fn utf8(value: impl Into<String>) -> Value {
        Value::Utf8(Some(value.into()))
    }

    pub fn blob(value: impl Into<Vec<u8>>) -> Value {
        Value::Blob(Some(Blob::new(value)))
    }

    pub fn date(value: NaiveDate) -> Value {
        Value::Date(Some(value))
    }

    pub fn datetime(value: DateTime<Utc>) -> Value {
        Value::DateTime(Some(value))
    }

    pub fn time(value: NaiveTime) -> Value {
        Value::Time(Some(value))
    }

    pub fn interval(value: Interval) -> Value {
        Value::Interval(Some(value))
    }

    pub fn row_number(value: u64) -> Value {
        Value::RowNumber(Some(value))
    }

    fn with_uuid(ty: WireType, uuid: Uuid) -> Value {
        match ty {
            WireType::Uuid4 => Value::Uuid4(Some(uuid)),
            WireType::Uuid7 => Value::Uuid7(Some(uuid)),
            _ => Value::IdentityId(Some(uuid)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire_string())
    }
}

impl From<Value> for WirePair {
    fn from(value: Value) -> Self {
        value.encode()
    }
}

impl TryFrom<WirePair> for Value {
    type Error = CodecError;

    fn try_from(pair: WirePair) -> Result<Self, Self::Error> {
        Value::parse(pair.ty, &pair.value)
    }
}

impl From<Integer> for Native {
    fn from(integer: Integer) -> Self {
        match integer {
            Integer::Signed(v) => Native::BigInt(v),
            Integer::Unsigned(v) => Native::BigUint(v),
        }
    }
}

/// Render the inclusive bounds of an integer type for error messages.
fn bounds(ty: WireType) -> (String, String) {
    match (ty.signed_bounds(), ty.unsigned_max()) {
        (Some((min, max)), _) => (min.to_string(), max.to_string()),
        (_, Some(max)) => ("0".to_string(), max.to_string()),
        _ => (String::new(), String::new()),
    }
}

fn out_of_range(ty: WireType, value: impl ToString) -> CodecError {
    let (min, max) = bounds(ty);
    CodecError::range(ty, value, min, max)
}

/// Parse integer text; malformed text is a parse error, numeric text beyond
/// the 128-bit carriers is a range error.
fn parse_integer(ty: WireType, text: &str) -> CodecResult<Integer> {
    let digits = text.strip_prefix('+').unwrap_or(text);
    match digits.parse::<i128>() {
        Ok(v) => Ok(Integer::Signed(v)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => digits
                .parse::<u128>()
                .map(Integer::Unsigned)
                .map_err(|_| out_of_range(ty, text)),
            IntErrorKind::NegOverflow => Err(out_of_range(ty, text)),
            _ => Err(CodecError::parse(ty, text, e.to_string())),
        },
    }
}

/// Extract an integral number from a native value.
fn integer_of(ty: WireType, native: &Native) -> CodecResult<Integer> {
    // 2^127, the first magnitude no 128-bit carrier can hold exactly
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

    match native {
        Native::Int(v) => Ok(Integer::Signed(*v as i128)),
        Native::BigInt(v) => Ok(Integer::Signed(*v)),
        Native::BigUint(v) => Ok(Integer::Unsigned(*v)),
        Native::Float(v) if !v.is_finite() || v.fract() != 0.0 => {
            Err(CodecError::mismatch(ty, format!("non-integral number {}", v)))
        }
        Native::Float(v) if *v >= 0.0 && *v < LIMIT * 2.0 => Ok(Integer::Unsigned(*v as u128)),
        Native::Float(v) if *v < 0.0 && *v >= -LIMIT => Ok(Integer::Signed(*v as i128)),
        Native::Float(v) => Err(out_of_range(ty, v)),
        other => Err(CodecError::mismatch(ty, other.kind())),
    }
}

fn signed_in(ty: WireType, integer: Integer) -> CodecResult<i128> {
    let (min, max) = ty.signed_bounds().ok_or_else(|| CodecError::mismatch(ty, "an integer"))?;
    match integer {
        Integer::Signed(v) if v >= min && v <= max => Ok(v),
        Integer::Unsigned(v) if v <= max as u128 => Ok(v as i128),
        other => Err(out_of_range(ty, other)),
    }
}

fn unsigned_in(ty: WireType, integer: Integer) -> CodecResult<u128> {
    let max = ty.unsigned_max().ok_or_else(|| CodecError::mismatch(ty, "an integer"))?;
    match integer {
        Integer::Signed(v) if v >= 0 && v as u128 <= max => Ok(v as u128),
        Integer::Unsigned(v) if v <= max => Ok(v),
        other => Err(out_of_range(ty, other)),
    }
}

fn float_of(ty: WireType, native: &Native) -> CodecResult<f64> {
    match native {
        Native::Float(v) => Ok(*v),
        Native::Int(v) => Ok(*v as f64),
        Native::BigInt(v) => Ok(*v as f64),
        Native::BigUint(v) => Ok(*v as f64),
        other => Err(CodecError::mismatch(ty, other.kind())),
    }
}

/// Parse float text. Only the NaN and infinity spellings may come back
/// non-finite; a literal too large for binary64 is a range error.
fn parse_float(
    ty: WireType,
    text: &str,
    trimmed: &str,
    min: impl ToString,
    max: impl ToString,
) -> CodecResult<f64> {
    let value: f64 = trimmed
        .parse()
        .map_err(|_| CodecError::parse(ty, text, "expected a number"))?;
    if value.is_infinite() && !names_non_finite(trimmed) {
        return Err(CodecError::range(ty, trimmed, min, max));
    }
    Ok(value)
}

fn names_non_finite(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']).to_ascii_lowercase();
    matches!(unsigned.as_str(), "inf" | "infinity" | "nan")
}

/// Narrow to binary32. Non-finite input is absent, underflow becomes zero,
/// overflow is a range error.
fn narrow_f32(value: f64) -> CodecResult<Option<f32>> {
    if !value.is_finite() {
        return Ok(None);
    }
    let narrowed = value as f32;
    if narrowed.is_infinite() {
        return Err(CodecError::range(WireType::Float4, value, -f32::MAX, f32::MAX));
    }
    Ok(Some(narrowed))
}

fn parse_datetime(text: &str) -> CodecResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| CodecError::parse(WireType::DateTime, text, e.to_string()))
}

fn check_uuid(ty: WireType, uuid: Uuid) -> CodecResult<Uuid> {
    let version = uuid.get_version_num();
    let accepted = match ty {
        WireType::Uuid4 => version == 4,
        WireType::Uuid7 => version == 7,
        _ => version == 7 || uuid.is_nil(),
    };
    if accepted {
        Ok(uuid)
    } else {
        Err(CodecError::mismatch(ty, format!("UUID version {} ({})", version, uuid)))
    }
}
