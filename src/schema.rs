//! Schema description
//!
//! A [`Schema`] is a tree that tells the decoder what shape a wire row has
//! and which wire type every leaf carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::Native;
use crate::decoder::Data;
use crate::types::WireType;
use crate::value::Value;

/// A node of the schema tree.
///
/// Schemas are immutable once built and may be shared freely between
/// decode calls and threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    /// A leaf decoded to its native value.
    Primitive(WireType),
    /// A leaf kept as a typed [`Value`].
    Value(WireType),
    /// Named fields in declaration order.
    Object(Vec<(String, Schema)>),
    /// A homogeneous sequence.
    Array(Box<Schema>),
    /// May be absent; failures below this node decode to `Undefined`.
    Optional(Box<Schema>),
    /// May be null; failures below this node decode to `Undefined`.
    Nullable(Box<Schema>),
}

impl Schema {
    pub fn primitive(ty: WireType) -> Self {
        Schema::Primitive(ty)
    }

    pub fn value(ty: WireType) -> Self {
        Schema::Value(ty)
    }

    /// Build an object node from `(name, schema)` pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use tagwire::{Schema, WireType};
    ///
    /// let schema = Schema::object([
    ///     ("id", Schema::primitive(WireType::Int4)),
    ///     ("tags", Schema::array(Schema::primitive(WireType::Utf8))),
    /// ]);
    /// assert_eq!(schema.to_string(), "{id: Int4, tags: [Utf8]}");
    /// ```
    pub fn object<N, I>(fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Schema)>,
    {
        Schema::Object(
            fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        )
    }

    pub fn array(element: Schema) -> Self {
        Schema::Array(Box::new(element))
    }

    pub fn optional(inner: Schema) -> Self {
        Schema::Optional(Box::new(inner))
    }

    pub fn nullable(inner: Schema) -> Self {
        Schema::Nullable(Box::new(inner))
    }

    /// Append a field to an object node. Other nodes are returned unchanged.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        if let Schema::Object(fields) = &mut self {
            fields.push((name.into(), schema));
        }
        self
    }

    /// Whether this node tolerates absent or undecodable input.
    pub fn is_optional(&self) -> bool {
        matches!(self, Schema::Optional(_) | Schema::Nullable(_))
    }

    /// Check that decoded data has the shape and native kinds this schema
    /// describes. Never fails; mismatches simply return `false`.
    pub fn validate(&self, data: &Data) -> bool {
        match (self, data) {
            (Schema::Optional(_) | Schema::Nullable(_), Data::Scalar(Native::Undefined)) => true,
            (Schema::Optional(inner) | Schema::Nullable(inner), data) => inner.validate(data),
            (Schema::Primitive(ty), Data::Scalar(native)) => native_fits(*ty, native),
            (Schema::Value(ty), Data::Wrapped(value)) => value.wire_type() == *ty,
            (Schema::Object(fields), Data::Object(entries)) => fields.iter().all(|(name, schema)| {
                match entries.iter().find(|(key, _)| key == name) {
                    Some((_, data)) => schema.validate(data),
                    None => schema.is_optional(),
                }
            }),
            (Schema::Array(element), Data::Array(items)) => {
                items.iter().all(|item| element.validate(item))
            }
            _ => false,
        }
    }
}

/// Whether a native value is what decoding a pair of `ty` would produce.
fn native_fits(ty: WireType, native: &Native) -> bool {
    let kind_ok = match native {
        Native::Undefined => return true,
        Native::Bool(_) => ty == WireType::Boolean,
        Native::Int(_) => ty.is_integer() && !ty.is_wide(),
        Native::BigInt(_) => matches!(ty, WireType::Int8 | WireType::Int16),
        Native::BigUint(_) => {
            matches!(ty, WireType::Uint8 | WireType::Uint16 | WireType::RowNumber)
        }
        Native::Float(_) => ty.is_float(),
        Native::Str(_) => matches!(ty, WireType::Utf8 | WireType::Decimal),
        Native::Bytes(_) => ty == WireType::Blob,
        Native::Date(_) => ty == WireType::Date,
        Native::DateTime(_) => ty == WireType::DateTime,
        Native::Time(_) => ty == WireType::Time,
        Native::Duration(_) => ty == WireType::Interval,
        Native::Uuid(_) => ty.is_uuid(),
        Native::Value(_) => false,
    };
    kind_ok && Value::new(ty, native.clone()).is_ok()
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Primitive(ty) => write!(f, "{}", ty),
            Schema::Value(ty) => write!(f, "Value<{}>", ty),
            Schema::Object(fields) => {
                write!(f, "{{")?;
                for (i, (name, schema)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, schema)?;
                }
                write!(f, "}}")
            }
            Schema::Array(element) => write!(f, "[{}]", element),
            Schema::Optional(inner) => write!(f, "{}?", inner),
            Schema::Nullable(inner) => write!(f, "{} | null", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_schema() -> Schema {
        Schema::object([
            ("id", Schema::primitive(WireType::Int4)),
            ("name", Schema::optional(Schema::primitive(WireType::Utf8))),
            ("score", Schema::value(WireType::Float8)),
        ])
    }

    #[test]
    fn test_builders() {
        let schema = Schema::object(Vec::<(String, Schema)>::new())
            .field("a", Schema::primitive(WireType::Boolean))
            .field("b", Schema::nullable(Schema::primitive(WireType::Date)));
        assert_eq!(schema.to_string(), "{a: Boolean, b: Date | null}");
        assert_eq!(user_schema().to_string(), "{id: Int4, name: Utf8?, score: Value<Float8>}");
    }

    #[test]
    fn test_validate_accepts_matching_data() {
        let data = Data::Object(vec![
            ("id".into(), Data::Scalar(Native::Int(7))),
            ("name".into(), Data::Scalar(Native::Undefined)),
            ("score".into(), Data::Wrapped(Value::Float8(Some(1.5)))),
        ]);
        assert!(user_schema().validate(&data));
    }

    #[test]
    fn test_validate_rejects_wrong_kinds() {
        let data = Data::Object(vec![
            ("id".into(), Data::Scalar(Native::Str("7".into()))),
            ("score".into(), Data::Wrapped(Value::Float8(None))),
        ]);
        assert!(!user_schema().validate(&data));

        assert!(!Schema::primitive(WireType::Int1).validate(&Data::Scalar(Native::Int(300))));
        assert!(!Schema::primitive(WireType::Int8).validate(&Data::Scalar(Native::Int(3))));
        assert!(Schema::primitive(WireType::Int8).validate(&Data::Scalar(Native::BigInt(3))));
    }

    #[test]
    fn test_validate_missing_required_field() {
        let data = Data::Object(vec![("score".into(), Data::Wrapped(Value::Float8(None)))]);
        assert!(!user_schema().validate(&data));
    }

    #[test]
    fn test_validate_arrays() {
        let schema = Schema::array(Schema::primitive(WireType::Utf8));
        let good = Data::Array(vec![
            Data::Scalar(Native::Str("a".into())),
            Data::Scalar(Native::Undefined),
        ]);
        let bad = Data::Array(vec![Data::Scalar(Native::Bool(true))]);
        assert!(schema.validate(&good));
        assert!(!schema.validate(&bad));
        assert!(!schema.validate(&Data::Scalar(Native::Str("a".into()))));
    }

    #[test]
    fn test_serde_shape() {
        let schema = Schema::object([("result", Schema::primitive(WireType::Int4))]);
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"{"object":[["result",{"primitive":"Int4"}]]}"#);
        let back: Schema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schema);
    }
}
