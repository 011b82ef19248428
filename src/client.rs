//! Client over an external transport.
//!
//! The client owns no connection. It encodes parameters, hands a
//! [`Request`] to a [`Transport`] and decodes the rows that come back
//! against a caller-supplied [`Schema`].

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::codec::Native;
use crate::config::CodecConfig;
use crate::decoder::{Data, Decoder, WireRow};
use crate::error::{CodecError, CodecResult};
use crate::params::{EncodedParams, Params, encode_params};
use crate::schema::Schema;

/// A request as handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub statements: Vec<String>,
    pub params: EncodedParams,
}

/// One result set per statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub rows: Vec<WireRow>,
}

/// Everything the server sent back for a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Response {
    /// Rows of the last frame, which answers the last statement.
    pub fn rows(&self) -> &[WireRow] {
        self.frames.last().map(|f| f.rows.as_slice()).unwrap_or_default()
    }
}

/// Sends a request and returns the tagged response.
///
/// Errors raised here reach the caller unchanged.
pub trait Transport {
    fn send(&self, request: Request) -> impl Future<Output = CodecResult<Response>> + Send;
}

/// Statement runner bound to a transport.
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
    decoder: Decoder,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            decoder: Decoder::default(),
        }
    }

    pub fn with_config(transport: T, config: &CodecConfig) -> Self {
        Self {
            transport,
            decoder: Decoder::new(config.decode),
        }
    }

    /// Start a query.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let rows = client
    ///     .query("SELECT id, name FROM users WHERE id = $1")
    ///     .bind(42)
    ///     .fetch_all(&schema)
    ///     .await?;
    /// ```
    pub fn query(&self, statement: impl Into<String>) -> Query<'_, T> {
        Query {
            client: self,
            statements: vec![statement.into()],
            params: Params::None,
            error: None,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// A query builder with parameter bindings.
#[derive(Debug)]
pub struct Query<'a, T> {
    client: &'a Client<T>,
    statements: Vec<String>,
    params: Params,
    /// First binding error, reported when the request is built.
    error: Option<String>,
}

impl<T: Transport> Query<'_, T> {
    /// Append another statement to the same request.
    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        self.statements.push(statement.into());
        self
    }

    /// Bind the next positional parameter.
    pub fn bind(mut self, value: impl Into<Native>) -> Self {
        if let Err(CodecError::Encode(reason)) = self.params.push(value) {
            self.error.get_or_insert(reason);
        }
        self
    }

    /// Bind a named parameter.
    pub fn bind_named(mut self, name: impl Into<String>, value: impl Into<Native>) -> Self {
        if let Err(CodecError::Encode(reason)) = self.params.insert(name, value) {
            self.error.get_or_insert(reason);
        }
        self
    }

    /// Replace all parameters at once.
    pub fn params(mut self, params: impl Into<Params>) -> Self {
        self.params = params.into();
        self
    }

    /// Build the request without sending it.
    pub fn request(&self) -> CodecResult<Request> {
        if let Some(reason) = &self.error {
            return Err(CodecError::Encode(reason.clone()));
        }
        Ok(Request {
            statements: self.statements.clone(),
            params: encode_params(&self.params)?,
        })
    }

    /// Send the request and return the raw response.
    pub async fn execute(&self) -> CodecResult<Response> {
        let request = self.request()?;
        tracing::debug!(
            "Sending {} statement(s) with {} parameter(s)",
            request.statements.len(),
            request.params.len()
        );
        let response = self.client.transport.send(request).await?;
        tracing::trace!("Received {} frame(s)", response.frames.len());
        Ok(response)
    }

    /// Fetch every row of the last statement, decoded against `schema`.
    pub async fn fetch_all(&self, schema: &Schema) -> CodecResult<Vec<Data>> {
        let response = self.execute().await?;
        self.client.decoder.decode_rows(schema, response.rows())
    }

    /// Fetch the first row of the last statement.
    pub async fn fetch_one(&self, schema: &Schema) -> CodecResult<Data> {
        let response = self.execute().await?;
        let row = response
            .rows()
            .first()
            .ok_or_else(|| CodecError::Decode("query returned no rows".to_string()))?;
        self.client.decoder.decode_row(schema, row)
    }
}
