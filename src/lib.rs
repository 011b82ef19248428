//! # tagwire: Tagged Wire Value Codec
//!
//! Converts application values to and from the `{type, value}` pairs a
//! database speaks on the wire, and decodes whole rows against a schema.
//!
//! ## Quick Example
//!
//! ```
//! use tagwire::prelude::*;
//!
//! // Outbound: the narrowest fitting type is picked
//! let pair = tagwire::encode(&Native::Int(42)).unwrap();
//! assert_eq!(pair, WirePair::new(WireType::Int1, "42"));
//!
//! // Inbound: rows decode against a schema
//! let schema = Schema::object([("result", Schema::primitive(WireType::Int4))]);
//! let row = WireData::row([("result", WireData::pair(WireType::Int4, "42"))]);
//! let data = tagwire::decode_row(&schema, &row).unwrap();
//! assert_eq!(data.get("result"), Some(&Data::Scalar(Native::Int(42))));
//! ```
//!
//! ## Wire Forms
//!
//! | Type       | Example                               |
//! |------------|---------------------------------------|
//! | `Boolean`  | `true`                                |
//! | `Int4`     | `-42`                                 |
//! | `Blob`     | `0xdeadbeef`                          |
//! | `Date`     | `2024-03-15`                          |
//! | `DateTime` | `2024-03-15T14:30:00.5Z`              |
//! | `Time`     | `14:30:00.123456789`                  |
//! | `Interval` | `P1Y2M3DT4H5M6.7S`                    |
//! | absent     | `⟪undefined⟫`                         |

pub mod client;
pub mod codec;
pub mod config;
pub mod decoder;
pub mod error;
pub mod params;
pub mod parser;
pub mod schema;
pub mod types;
pub mod value;

pub use codec::{Native, WirePair, decode, decode_typed, encode, infer};
pub use decoder::{Data, Decoder, WireData, WireRow, decode_row};
pub use error::{CodecError, CodecResult};
pub use params::{EncodedParams, Params, encode_params};
pub use schema::Schema;
pub use types::{ABSENT, WireType};
pub use value::{Blob, Interval, Value};

pub mod prelude {
    pub use crate::client::{Client, Frame, Query, Request, Response, Transport};
    pub use crate::codec::{Native, WirePair};
    pub use crate::config::{CodecConfig, DecodeOptions, MissingFields};
    pub use crate::decoder::{Data, Decoder, WireData, WireRow};
    pub use crate::error::*;
    pub use crate::params::{EncodedParams, Params};
    pub use crate::schema::Schema;
    pub use crate::types::{ABSENT, WireType};
    pub use crate::value::{Blob, Interval, Value};
}

/// Parse a duration literal such as `P1DT2H` or `-PT0.5S`.
///
/// # Example
///
/// ```
/// let interval = tagwire::parse_duration("P1Y2M3DT4H").unwrap();
/// assert_eq!(interval.months(), 14);
/// assert_eq!(interval.to_string(), "P1Y2M3DT4H");
/// ```
pub fn parse_duration(input: &str) -> CodecResult<Interval> {
    parser::parse_interval(input)
}
