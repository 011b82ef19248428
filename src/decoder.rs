//! Schema-driven decoder.
//!
//! Walks a [`Schema`] and the wire data side by side, producing [`Data`]
//! shaped like the schema. Errors propagate except beneath `Optional` and
//! `Nullable` nodes, which recover to `Undefined`.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::codec::{Native, WirePair, decode_typed};
use crate::config::{DecodeOptions, MissingFields};
use crate::error::{CodecError, CodecResult};
use crate::schema::Schema;
use crate::types::WireType;
use crate::value::Value;

/// Wire data as delivered by a transport.
///
/// Pairs keep their tag as raw text so that an unrecognized tag surfaces as
/// a decode error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireData {
    Pair {
        #[serde(rename = "type")]
        tag: String,
        value: String,
    },
    List(Vec<WireData>),
    Row(BTreeMap<String, WireData>),
}

/// A row: named columns, or a positional list matched to fields by index.
pub type WireRow = WireData;

impl WireData {
    pub fn pair(ty: WireType, value: impl Into<String>) -> Self {
        WireData::Pair {
            tag: ty.as_str().to_string(),
            value: value.into(),
        }
    }

    /// Build a named row from `(column, data)` pairs.
    pub fn row<N, I>(columns: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, WireData)>,
    {
        WireData::Row(
            columns
                .into_iter()
                .map(|(name, data)| (name.into(), data))
                .collect(),
        )
    }

    fn is_undefined_pair(&self) -> bool {
        matches!(self, WireData::Pair { tag, .. } if tag == WireType::Undefined.as_str())
    }

    fn shape(&self) -> &'static str {
        match self {
            WireData::Pair { .. } => "a wire pair",
            WireData::List(_) => "a list",
            WireData::Row(_) => "a row",
        }
    }
}

impl From<WirePair> for WireData {
    fn from(pair: WirePair) -> Self {
        WireData::Pair {
            tag: pair.ty.as_str().to_string(),
            value: pair.value,
        }
    }
}

/// Decoded output, shaped like the schema that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Scalar(Native),
    Wrapped(Value),
    /// Fields in schema declaration order.
    Object(Vec<(String, Data)>),
    Array(Vec<Data>),
}

impl Data {
    pub fn undefined() -> Self {
        Data::Scalar(Native::Undefined)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Data::Scalar(Native::Undefined))
    }

    /// Look up an object field by name.
    pub fn get(&self, name: &str) -> Option<&Data> {
        match self {
            Data::Object(fields) => fields.iter().find(|(key, _)| key == name).map(|(_, d)| d),
            _ => None,
        }
    }

    pub fn as_native(&self) -> Option<&Native> {
        match self {
            Data::Scalar(native) => Some(native),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Data::Wrapped(value) => Some(value),
            _ => None,
        }
    }
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Data::Scalar(native) => native.serialize(serializer),
            Data::Wrapped(value) => value.serialize(serializer),
            Data::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, data) in fields {
                    map.serialize_entry(name, data)?;
                }
                map.end()
            }
            Data::Array(items) => items.serialize(serializer),
        }
    }
}

/// Decoder bound to a set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decode wire data against a schema.
    pub fn decode(&self, schema: &Schema, data: &WireData) -> CodecResult<Data> {
        self.node(schema, Some(data), "$")
    }

    /// Decode a single row.
    pub fn decode_row(&self, schema: &Schema, row: &WireRow) -> CodecResult<Data> {
        self.decode(schema, row)
    }

    /// Decode every row of a result set, stopping at the first error.
    pub fn decode_rows(&self, schema: &Schema, rows: &[WireRow]) -> CodecResult<Vec<Data>> {
        rows.iter().map(|row| self.decode_row(schema, row)).collect()
    }

    fn node(&self, schema: &Schema, data: Option<&WireData>, path: &str) -> CodecResult<Data> {
        if let Schema::Optional(inner) | Schema::Nullable(inner) = schema {
            let Some(data) = data else {
                return Ok(Data::undefined());
            };
            return match self.node(inner, Some(data), path) {
                Ok(Data::Wrapped(value)) if value.is_absent() => Ok(Data::undefined()),
                Ok(decoded) => Ok(decoded),
                Err(e) => {
                    tracing::debug!("Recovered {} as undefined: {}", path, e);
                    Ok(Data::undefined())
                }
            };
        }

        let Some(data) = data else {
            return match self.options.missing_fields {
                MissingFields::Undefined => Ok(Data::undefined()),
                MissingFields::Error => Err(CodecError::MissingField(path.to_string())),
            };
        };

        if data.is_undefined_pair() {
            return Ok(match schema {
                Schema::Value(ty) => Data::Wrapped(Value::absent(*ty)),
                _ => Data::undefined(),
            });
        }

        match (schema, data) {
            // The tag must be known; the schema type drives the decode.
            (Schema::Primitive(ty), WireData::Pair { tag, value }) => {
                tag.parse::<WireType>()?;
                Ok(Data::Scalar(decode_typed(*ty, value)?))
            }
            (Schema::Value(ty), WireData::Pair { tag, value }) => {
                tag.parse::<WireType>()?;
                Ok(Data::Wrapped(Value::parse(*ty, value)?))
            }
            (Schema::Object(fields), WireData::Row(columns)) => fields
                .iter()
                .map(|(name, field)| {
                    let decoded = self.node(field, columns.get(name), &format!("{}.{}", path, name))?;
                    Ok((name.clone(), decoded))
                })
                .collect::<CodecResult<Vec<_>>>()
                .map(Data::Object),
            (Schema::Object(fields), WireData::List(columns)) => fields
                .iter()
                .enumerate()
                .map(|(i, (name, field))| {
                    let decoded = self.node(field, columns.get(i), &format!("{}.{}", path, name))?;
                    Ok((name.clone(), decoded))
                })
                .collect::<CodecResult<Vec<_>>>()
                .map(Data::Object),
            (Schema::Array(element), WireData::List(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.node(element, Some(item), &format!("{}[{}]", path, i)))
                .collect::<CodecResult<Vec<_>>>()
                .map(Data::Array),
            (schema, data) => Err(CodecError::Decode(format!(
                "expected {} at {}, found {}",
                expected_shape(schema),
                path,
                data.shape()
            ))),
        }
    }
}

fn expected_shape(schema: &Schema) -> &'static str {
    match schema {
        Schema::Primitive(_) | Schema::Value(_) => "a wire pair",
        Schema::Object(_) => "a row or positional list",
        Schema::Array(_) => "a list",
        Schema::Optional(inner) | Schema::Nullable(inner) => expected_shape(inner),
    }
}

/// Decode wire data with default options.
pub fn decode(schema: &Schema, data: &WireData) -> CodecResult<Data> {
    Decoder::default().decode(schema, data)
}

/// Decode a single row with default options.
pub fn decode_row(schema: &Schema, row: &WireRow) -> CodecResult<Data> {
    Decoder::default().decode_row(schema, row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ABSENT;

    fn int4(value: &str) -> WireData {
        WireData::pair(WireType::Int4, value)
    }

    #[test]
    fn test_primitive_row() {
        let schema = Schema::object([("result", Schema::primitive(WireType::Int4))]);
        let row = WireData::row([("result", int4("42"))]);
        let data = decode_row(&schema, &row).unwrap();
        assert_eq!(data.get("result"), Some(&Data::Scalar(Native::Int(42))));
    }

    #[test]
    fn test_value_leaf_keeps_wrapper() {
        let schema = Schema::value(WireType::Int4);
        let data = decode(&schema, &int4("42")).unwrap();
        assert_eq!(data, Data::Wrapped(Value::Int4(Some(42))));

        let data = decode(&schema, &int4(ABSENT)).unwrap();
        assert_eq!(data, Data::Wrapped(Value::Int4(None)));
    }

    #[test]
    fn test_absent_propagates() {
        let schema = Schema::primitive(WireType::Int4);
        assert!(decode(&schema, &int4(ABSENT)).unwrap().is_undefined());
        let undefined = WireData::pair(WireType::Undefined, ABSENT);
        assert!(decode(&Schema::array(schema), &undefined).unwrap().is_undefined());
    }

    #[test]
    fn test_unknown_columns_ignored_and_order_kept() {
        let schema = Schema::object([
            ("b", Schema::primitive(WireType::Utf8)),
            ("a", Schema::primitive(WireType::Boolean)),
        ]);
        let row = WireData::row([
            ("a", WireData::pair(WireType::Boolean, "true")),
            ("b", WireData::pair(WireType::Utf8, "x")),
            ("extra", int4("1")),
        ]);
        let Data::Object(fields) = decode_row(&schema, &row).unwrap() else {
            panic!("expected an object");
        };
        let names: Vec<_> = fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_positional_row() {
        let schema = Schema::object([
            ("id", Schema::primitive(WireType::Int4)),
            ("name", Schema::primitive(WireType::Utf8)),
        ]);
        let row = WireData::List(vec![int4("1"), WireData::pair(WireType::Utf8, "ann")]);
        let data = decode_row(&schema, &row).unwrap();
        assert_eq!(data.get("id"), Some(&Data::Scalar(Native::Int(1))));
        assert_eq!(data.get("name"), Some(&Data::Scalar(Native::Str("ann".into()))));
    }

    #[test]
    fn test_missing_field_policy() {
        let schema = Schema::object([("id", Schema::primitive(WireType::Int4))]);
        let row = WireData::row(Vec::<(String, WireData)>::new());

        assert!(decode_row(&schema, &row).unwrap().get("id").unwrap().is_undefined());

        let strict = Decoder::new(DecodeOptions {
            missing_fields: MissingFields::Error,
        });
        let err = strict.decode_row(&schema, &row).unwrap_err();
        assert!(matches!(err, CodecError::MissingField(path) if path == "$.id"));
    }

    #[test]
    fn test_errors_propagate_outside_optional() {
        let schema = Schema::object([("n", Schema::primitive(WireType::Int1))]);
        let row = WireData::row([("n", WireData::pair(WireType::Int1, "abc"))]);
        assert!(decode_row(&schema, &row).unwrap_err().is_parse());
    }

    #[test]
    fn test_optional_recovers() {
        let schema = Schema::object([
            ("n", Schema::optional(Schema::primitive(WireType::Int1))),
            ("m", Schema::nullable(Schema::value(WireType::Int1))),
            ("tags", Schema::optional(Schema::array(Schema::primitive(WireType::Utf8)))),
        ]);
        let row = WireData::row([
            ("n", WireData::pair(WireType::Int1, "999")),
            ("m", WireData::pair(WireType::Int1, ABSENT)),
            ("tags", WireData::pair(WireType::Utf8, "not a list")),
        ]);
        let data = decode_row(&schema, &row).unwrap();
        assert!(data.get("n").unwrap().is_undefined());
        assert!(data.get("m").unwrap().is_undefined());
        assert!(data.get("tags").unwrap().is_undefined());
        assert!(schema.validate(&data));
    }

    #[test]
    fn test_unknown_tag_is_decode_error() {
        let schema = Schema::primitive(WireType::Int4);
        let pair = WireData::Pair {
            tag: "Int3".into(),
            value: "1".into(),
        };
        assert!(matches!(decode(&schema, &pair).unwrap_err(), CodecError::Decode(_)));
    }

    #[test]
    fn test_shape_mismatch() {
        let schema = Schema::array(Schema::primitive(WireType::Int4));
        let err = decode(&schema, &int4("1")).unwrap_err();
        assert_eq!(err.to_string(), "Decode error: expected a list at $, found a wire pair");
    }

    #[test]
    fn test_nested_arrays() {
        let schema = Schema::object([(
            "points",
            Schema::array(Schema::object([
                ("x", Schema::primitive(WireType::Float8)),
                ("y", Schema::primitive(WireType::Float8)),
            ])),
        )]);
        let row = WireData::row([(
            "points",
            WireData::List(vec![WireData::List(vec![
                WireData::pair(WireType::Float8, "1.5"),
                WireData::pair(WireType::Float8, "-2"),
            ])]),
        )]);
        let data = decode_row(&schema, &row).unwrap();
        assert!(schema.validate(&data));
        let Some(Data::Array(points)) = data.get("points") else {
            panic!("expected an array");
        };
        assert_eq!(points[0].get("y"), Some(&Data::Scalar(Native::Float(-2.0))));
    }

    #[test]
    fn test_wire_data_json() {
        let json = r#"{"result": {"type": "Int4", "value": "42"}, "list": [{"type": "Utf8", "value": "a"}]}"#;
        let row: WireData = serde_json::from_str(json).unwrap();
        let WireData::Row(columns) = &row else {
            panic!("expected a row");
        };
        assert_eq!(columns["result"], int4("42"));
        assert!(matches!(columns["list"], WireData::List(_)));
    }

    #[test]
    fn test_data_serializes_as_json() {
        let data = Data::Object(vec![
            ("id".into(), Data::Scalar(Native::Int(1))),
            ("name".into(), Data::undefined()),
            ("raw".into(), Data::Wrapped(Value::Int4(Some(2)))),
        ]);
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({"id": 1, "name": null, "raw": {"type": "Int4", "value": "2"}})
        );
    }
}
