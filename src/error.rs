//! Error types for tagwire.

use thiserror::Error;

use crate::types::WireType;

/// The main error type for codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A native value (or parameter container) has no wire representation.
    #[error("Encode error: {0}")]
    Encode(String),

    /// A numeric or temporal value lies outside the variant's domain.
    #[error("Range error: {value} is out of range for {ty}, expected [{min}, {max}]")]
    Range {
        ty: WireType,
        value: String,
        min: String,
        max: String,
    },

    /// A wire string is malformed for the target type.
    #[error("Parse error: '{literal}' is not a valid {ty} ({reason})")]
    Parse {
        ty: WireType,
        literal: String,
        reason: String,
    },

    /// Unrecognized wire type tag, or a wire shape the schema cannot address.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The native value is of the wrong kind for the variant.
    #[error("Type error: cannot construct {ty} from {found}")]
    Type { ty: WireType, found: String },

    /// A schema field had no column in the wire row.
    #[error("Missing field: '{0}'")]
    MissingField(String),

    /// The transport failed to deliver a request or response.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Create a range error carrying the offending value and both bounds.
    pub fn range(
        ty: WireType,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::Range {
            ty,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create a parse error for the given literal.
    pub fn parse(ty: WireType, literal: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            ty,
            literal: literal.into(),
            reason: reason.into(),
        }
    }

    /// Create a type error naming the native kind that was supplied.
    pub fn mismatch(ty: WireType, found: impl Into<String>) -> Self {
        Self::Type {
            ty,
            found: found.into(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_display() {
        let err = CodecError::range(WireType::Int2, 32768, -32768, 32767);
        assert_eq!(
            err.to_string(),
            "Range error: 32768 is out of range for Int2, expected [-32768, 32767]"
        );
        assert!(err.is_range());
    }

    #[test]
    fn test_parse_error_display() {
        let err = CodecError::parse(WireType::Int4, "abc", "invalid digit");
        assert_eq!(
            err.to_string(),
            "Parse error: 'abc' is not a valid Int4 (invalid digit)"
        );
        assert!(err.is_parse());
    }
}
