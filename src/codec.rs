//! Wire pair codec.
//!
//! Outbound, a [`Native`] value is mapped to the narrowest fitting wire type
//! and rendered as a [`WirePair`]. Inbound, a tag and wire string are parsed
//! back into a `Native`.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{CodecError, CodecResult};
use crate::parser::is_canonical_uuid;
use crate::types::{ABSENT, WireType};
use crate::value::{Blob, Interval, Value};

/// Integral numbers try these in order.
const SIGNED_LADDER: [WireType; 4] = [WireType::Int1, WireType::Int2, WireType::Int4, WireType::Int8];

/// Non-negative big integers try these in order.
const UNSIGNED_LADDER: [WireType; 5] = [
    WireType::Uint1,
    WireType::Uint2,
    WireType::Uint4,
    WireType::Uint8,
    WireType::Uint16,
];

/// Negative big integers try these in order.
const NEGATIVE_LADDER: [WireType; 2] = [WireType::Int8, WireType::Int16];

/// An application-side value before it is assigned a wire type.
#[derive(Debug, Clone, PartialEq)]
pub enum Native {
    Undefined,
    Bool(bool),
    Int(i64),
    Float(f64),
    BigInt(i128),
    BigUint(u128),
    Str(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Time(NaiveTime),
    Duration(Interval),
    Uuid(Uuid),
    /// An explicitly typed value, encoded as-is.
    Value(Value),
}

/// A `{type, value}` pair as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
pub struct WirePair {
    #[serde(rename = "type")]
    pub ty: WireType,
    pub value: String,
}

impl WirePair {
    pub fn new(ty: WireType, value: impl Into<String>) -> Self {
        Self {
            ty,
            value: value.into(),
        }
    }

    pub fn absent(ty: WireType) -> Self {
        Self::new(ty, ABSENT)
    }

    pub fn is_absent(&self) -> bool {
        self.value == ABSENT
    }

    pub fn to_value(&self) -> CodecResult<Value> {
        Value::parse(self.ty, &self.value)
    }

    pub fn decode(&self) -> CodecResult<Native> {
        decode_typed(self.ty, &self.value)
    }
}

impl fmt::Display for WirePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.ty, self.value)
    }
}

impl Native {
    /// Human-readable name of the native kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Native::Undefined => "undefined",
            Native::Bool(_) => "boolean",
            Native::Int(_) => "integer",
            Native::Float(_) => "number",
            Native::BigInt(_) => "big integer",
            Native::BigUint(_) => "big unsigned integer",
            Native::Str(_) => "string",
            Native::Bytes(_) => "bytes",
            Native::Date(_) => "date",
            Native::DateTime(_) => "datetime",
            Native::Time(_) => "time",
            Native::Duration(_) => "duration",
            Native::Uuid(_) => "uuid",
            Native::Value(_) => "typed value",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Native::Undefined)
    }

    /// Convert dynamic JSON input.
    ///
    /// Objects shaped `{"type": T, "value": V}` become typed values; any
    /// other object or array has no wire representation.
    pub fn from_json(json: serde_json::Value) -> CodecResult<Native> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Native::Undefined),
            Json::Bool(b) => Ok(Native::Bool(b)),
            Json::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Ok(Native::Int(v))
                } else if let Some(v) = n.as_u64() {
                    Ok(Native::BigUint(v as u128))
                } else {
                    Ok(Native::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Json::String(s) => Ok(Native::Str(s)),
            Json::Object(map) if is_typed_object(&map) => {
                let pair: WirePair = serde_json::from_value(Json::Object(map))
                    .map_err(|e| CodecError::Encode(format!("invalid typed value: {}", e)))?;
                Ok(Native::Value(pair.to_value()?))
            }
            Json::Object(_) => Err(CodecError::Encode(
                "cannot encode a JSON object; expected a scalar or {\"type\", \"value\"}".to_string(),
            )),
            Json::Array(_) => Err(CodecError::Encode("cannot encode a JSON array".to_string())),
        }
    }
}

fn is_typed_object(map: &serde_json::Map<String, serde_json::Value>) -> bool {
    map.len() == 2
        && map.get("type").is_some_and(serde_json::Value::is_string)
        && map.get("value").is_some_and(serde_json::Value::is_string)
}

impl fmt::Display for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Native::Undefined => write!(f, "undefined"),
            Native::Bool(b) => write!(f, "{}", b),
            Native::Int(v) => write!(f, "{}", v),
            Native::Float(v) => write!(f, "{}", v),
            Native::BigInt(v) => write!(f, "{}", v),
            Native::BigUint(v) => write!(f, "{}", v),
            Native::Str(s) => write!(f, "{}", s),
            Native::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Native::Date(d) => write!(f, "{}", d),
            Native::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Native::Time(t) => write!(f, "{}", t),
            Native::Duration(i) => write!(f, "{}", i),
            Native::Uuid(u) => write!(f, "{}", u),
            Native::Value(v) => write!(f, "{}", v),
        }
    }
}

/// JSON projection: numbers stay numbers, temporal values and ids become
/// their wire strings, absent becomes `null`.
impl Serialize for Native {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Native::Undefined => serializer.serialize_none(),
            Native::Bool(b) => serializer.serialize_bool(*b),
            Native::Int(v) => serializer.serialize_i64(*v),
            Native::Float(v) => serializer.serialize_f64(*v),
            Native::BigInt(v) => serializer.serialize_i128(*v),
            Native::BigUint(v) => serializer.serialize_u128(*v),
            Native::Str(s) => serializer.serialize_str(s),
            Native::Bytes(b) => serializer.serialize_str(&Blob::from(b.as_slice()).to_hex()),
            Native::Value(v) => v.encode().serialize(serializer),
            other => {
                let value = infer(other).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&value.to_wire_string())
            }
        }
    }
}

macro_rules! native_from {
    ($($from:ty => $variant:ident as $carrier:ty),* $(,)?) => {
        $(
            impl From<$from> for Native {
                fn from(v: $from) -> Self {
                    Native::$variant(v as $carrier)
                }
            }
        )*
    };
}

native_from! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    u64 => BigUint as u128,
    i128 => BigInt as i128,
    u128 => BigUint as u128,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl From<bool> for Native {
    fn from(v: bool) -> Self {
        Native::Bool(v)
    }
}

impl From<&str> for Native {
    fn from(v: &str) -> Self {
        Native::Str(v.to_string())
    }
}

impl From<String> for Native {
    fn from(v: String) -> Self {
        Native::Str(v)
    }
}

impl From<Vec<u8>> for Native {
    fn from(v: Vec<u8>) -> Self {
        Native::Bytes(v)
    }
}

impl From<&[u8]> for Native {
    fn from(v: &[u8]) -> Self {
        Native::Bytes(v.to_vec())
    }
}

impl From<NaiveDate> for Native {
    fn from(v: NaiveDate) -> Self {
        Native::Date(v)
    }
}

impl From<DateTime<Utc>> for Native {
    fn from(v: DateTime<Utc>) -> Self {
        Native::DateTime(v)
    }
}

impl From<NaiveTime> for Native {
    fn from(v: NaiveTime) -> Self {
        Native::Time(v)
    }
}

impl From<Interval> for Native {
    fn from(v: Interval) -> Self {
        Native::Duration(v)
    }
}

impl From<Uuid> for Native {
    fn from(v: Uuid) -> Self {
        Native::Uuid(v)
    }
}

impl From<Value> for Native {
    fn from(v: Value) -> Self {
        Native::Value(v)
    }
}

impl<T: Into<Native>> From<Option<T>> for Native {
    fn from(v: Option<T>) -> Self {
        v.map_or(Native::Undefined, Into::into)
    }
}

/// Pick the wire type for a native value and construct it.
pub fn infer(native: &Native) -> CodecResult<Value> {
    let value = match native {
        Native::Undefined => Value::Undefined,
        Native::Value(v) => v.clone(),
        Native::Bool(b) => Value::boolean(*b),
        Native::Int(_) => first_fit(&SIGNED_LADDER, native)
            .ok_or_else(|| CodecError::Encode(format!("no integer type holds {}", native)))?,
        Native::Float(v) if v.is_finite() && v.fract() == 0.0 => {
            match first_fit(&SIGNED_LADDER, native) {
                Some(value) => value,
                None => Value::float8(*v)?,
            }
        }
        Native::Float(v) => Value::float8(*v)?,
        Native::BigInt(v) if *v >= 0 => first_fit(&UNSIGNED_LADDER, native)
            .ok_or_else(|| CodecError::Encode(format!("no integer type holds {}", v)))?,
        Native::BigInt(v) => first_fit(&NEGATIVE_LADDER, native)
            .ok_or_else(|| CodecError::Encode(format!("no integer type holds {}", v)))?,
        Native::BigUint(v) => first_fit(&UNSIGNED_LADDER, native)
            .ok_or_else(|| CodecError::Encode(format!("no integer type holds {}", v)))?,
        Native::Str(s) if is_canonical_uuid(s) => match Uuid::parse_str(s) {
            Ok(uuid) => uuid_value(uuid).unwrap_or_else(|| Value::utf8(s.as_str())),
            Err(_) => Value::utf8(s.as_str()),
        },
        Native::Str(s) => Value::utf8(s.as_str()),
        Native::Bytes(b) => Value::blob(b.as_slice()),
        Native::Date(d) => Value::date(*d),
        Native::DateTime(dt) => Value::datetime(*dt),
        Native::Time(t) => Value::time(*t),
        Native::Duration(i) => Value::interval(*i),
        Native::Uuid(uuid) => uuid_value(*uuid).unwrap_or_else(|| Value::utf8(uuid.to_string())),
    };
    Ok(value)
}

/// Encode a native value into a wire pair.
pub fn encode(native: &Native) -> CodecResult<WirePair> {
    Ok(infer(native)?.encode())
}

/// Encode dynamic JSON input into a wire pair.
pub fn encode_json(json: serde_json::Value) -> CodecResult<WirePair> {
    encode(&Native::from_json(json)?)
}

/// Decode a wire pair given its textual tag.
pub fn decode(tag: &str, value: &str) -> CodecResult<Native> {
    let ty: WireType = tag.parse()?;
    decode_typed(ty, value)
}

/// Decode a wire string of a known type.
pub fn decode_typed(ty: WireType, value: &str) -> CodecResult<Native> {
    Ok(Value::parse(ty, value)?.to_native())
}

fn first_fit(ladder: &[WireType], native: &Native) -> Option<Value> {
    ladder
        .iter()
        .find_map(|ty| Value::new(*ty, native.clone()).ok())
}

fn uuid_value(uuid: Uuid) -> Option<Value> {
    match uuid.get_version_num() {
        4 => Some(Value::Uuid4(Some(uuid))),
        7 => Some(Value::Uuid7(Some(uuid))),
        _ => None,
    }
}
