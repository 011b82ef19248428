//! Binary payloads and their `0x` hex wire form.

use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::types::WireType;

const HEX_PREFIX: &str = "0x";

/// An owned byte sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blob(Vec<u8>);

impl Blob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse `0x`-prefixed hex. The prefix is optional and digits may be
    /// either case.
    pub fn from_hex(text: &str) -> CodecResult<Self> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix(HEX_PREFIX)
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        hex::decode(digits)
            .map(Self)
            .map_err(|e| CodecError::parse(WireType::Blob, text, e.to_string()))
    }

    /// Lowercase hex with the `0x` prefix and no separators.
    pub fn to_hex(&self) -> String {
        format!("{}{}", HEX_PREFIX, hex::encode(&self.0))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Blob {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Display for Blob {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(Blob::new(vec![0xde, 0xad, 0xbe, 0xef]).to_hex(), "0xdeadbeef");
        assert_eq!(Blob::new(vec![0x00, 0x0f]).to_hex(), "0x000f");
        assert_eq!(Blob::default().to_hex(), "0x");
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Blob::from_hex("0xDEADbeef").unwrap().as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(Blob::from_hex("cafe").unwrap().as_bytes(), &[0xca, 0xfe]);
        assert!(Blob::from_hex("0x").unwrap().is_empty());
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Blob::from_hex("0xabc").unwrap_err().is_parse());
        assert!(Blob::from_hex("0xzz").unwrap_err().is_parse());
    }
}
