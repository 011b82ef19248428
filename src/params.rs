//! Parameter encoding
//!
//! Statement parameters arrive as nothing, a positional list or a named map,
//! and leave as the same shape with every element turned into a wire pair.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codec::{Native, WirePair, encode};
use crate::error::{CodecError, CodecResult};

/// Parameters supplied with a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Params {
    #[default]
    None,
    Positional(Vec<Native>),
    Named(BTreeMap<String, Native>),
}

/// Encoded parameters, ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncodedParams {
    Positional(Vec<WirePair>),
    Named(BTreeMap<String, WirePair>),
}

impl Default for EncodedParams {
    fn default() -> Self {
        EncodedParams::Positional(Vec::new())
    }
}

impl EncodedParams {
    pub fn len(&self) -> usize {
        match self {
            EncodedParams::Positional(pairs) => pairs.len(),
            EncodedParams::Named(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Params {
    /// Build from dynamic JSON: `null`, an array or an object.
    pub fn from_json(json: serde_json::Value) -> CodecResult<Params> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Params::None),
            Json::Array(items) => items
                .into_iter()
                .map(Native::from_json)
                .collect::<CodecResult<Vec<_>>>()
                .map(Params::Positional),
            Json::Object(map) => map
                .into_iter()
                .map(|(name, item)| Ok((name, Native::from_json(item)?)))
                .collect::<CodecResult<BTreeMap<_, _>>>()
                .map(Params::Named),
            other => Err(CodecError::Encode(format!(
                "parameters must be null, an array or an object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Append a positional parameter. Converts `None` into a positional list.
    pub fn push(&mut self, native: impl Into<Native>) -> CodecResult<()> {
        match self {
            Params::None => *self = Params::Positional(vec![native.into()]),
            Params::Positional(items) => items.push(native.into()),
            Params::Named(_) => {
                return Err(CodecError::Encode(
                    "cannot mix positional and named parameters".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Set a named parameter. Converts `None` into a named map.
    pub fn insert(&mut self, name: impl Into<String>, native: impl Into<Native>) -> CodecResult<()> {
        match self {
            Params::None => {
                *self = Params::Named(BTreeMap::from([(name.into(), native.into())]));
            }
            Params::Named(items) => {
                items.insert(name.into(), native.into());
            }
            Params::Positional(_) => {
                return Err(CodecError::Encode(
                    "cannot mix positional and named parameters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl From<Vec<Native>> for Params {
    fn from(items: Vec<Native>) -> Self {
        Params::Positional(items)
    }
}

impl From<BTreeMap<String, Native>> for Params {
    fn from(items: BTreeMap<String, Native>) -> Self {
        Params::Named(items)
    }
}

/// Encode every parameter, preserving order or keys.
pub fn encode_params(params: &Params) -> CodecResult<EncodedParams> {
    match params {
        Params::None => Ok(EncodedParams::default()),
        Params::Positional(items) => items
            .iter()
            .map(encode)
            .collect::<CodecResult<Vec<_>>>()
            .map(EncodedParams::Positional),
        Params::Named(items) => items
            .iter()
            .map(|(name, native)| Ok((name.clone(), encode(native)?)))
            .collect::<CodecResult<BTreeMap<_, _>>>()
            .map(EncodedParams::Named),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ABSENT, WireType};
    use crate::value::Value;
    use serde_json::json;

    #[test]
    fn test_none_is_empty_positional() {
        assert_eq!(encode_params(&Params::None).unwrap(), EncodedParams::Positional(vec![]));
    }

    #[test]
    fn test_positional_keeps_order() {
        let params = Params::Positional(vec![Native::Int(1), Native::Str("a".into()), Native::Undefined]);
        let EncodedParams::Positional(pairs) = encode_params(&params).unwrap() else {
            panic!("expected positional params");
        };
        assert_eq!(
            pairs,
            vec![
                WirePair::new(WireType::Int1, "1"),
                WirePair::new(WireType::Utf8, "a"),
                WirePair::new(WireType::Undefined, ABSENT),
            ]
        );
    }

    #[test]
    fn test_named() {
        let params = Params::from_json(json!({"id": 100000, "when": {"type": "Date", "value": "2024-01-02"}})).unwrap();
        let EncodedParams::Named(pairs) = encode_params(&params).unwrap() else {
            panic!("expected named params");
        };
        assert_eq!(pairs["id"], WirePair::new(WireType::Int4, "100000"));
        assert_eq!(pairs["when"], WirePair::new(WireType::Date, "2024-01-02"));
    }

    #[test]
    fn test_from_json_shapes() {
        assert_eq!(Params::from_json(json!(null)).unwrap(), Params::None);
        assert!(matches!(Params::from_json(json!([1, 2])).unwrap(), Params::Positional(v) if v.len() == 2));

        let err = Params::from_json(json!(5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Encode error: parameters must be null, an array or an object, found a number"
        );
        assert!(Params::from_json(json!([[1]])).is_err());
    }

    #[test]
    fn test_typed_element() {
        let params = Params::from_json(json!([{"type": "Int8", "value": "3"}])).unwrap();
        assert_eq!(params, Params::Positional(vec![Native::Value(Value::Int8(Some(3)))]));
    }

    #[test]
    fn test_push_and_insert() {
        let mut params = Params::default();
        params.push(1).unwrap();
        params.push("x").unwrap();
        assert!(params.insert("a", 1).is_err());
        assert_eq!(encode_params(&params).unwrap().len(), 2);

        let mut named = Params::None;
        named.insert("a", true).unwrap();
        assert!(named.push(1).is_err());
    }

    #[test]
    fn test_encoded_json_shape() {
        let encoded = encode_params(&Params::Positional(vec![Native::Bool(true)])).unwrap();
        assert_eq!(
            serde_json::to_value(&encoded).unwrap(),
            json!([{"type": "Boolean", "value": "true"}])
        );
    }
}
