use std::sync::Mutex;

use pretty_assertions::assert_eq;
use tagwire::prelude::*;

/// Records every request and answers with a canned response.
struct MockTransport {
    response: Response,
    sent: Mutex<Vec<Request>>,
}

impl MockTransport {
    fn new(rows: Vec<WireRow>) -> Self {
        Self {
            response: Response {
                frames: vec![Frame { rows }],
            },
            sent: Mutex::new(Vec::new()),
        }
    }

    fn last_request(&self) -> Request {
        self.sent.lock().unwrap().last().cloned().expect("no request sent")
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: Request) -> CodecResult<Response> {
        self.sent.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

struct FailingTransport;

impl Transport for FailingTransport {
    async fn send(&self, _request: Request) -> CodecResult<Response> {
        Err(CodecError::Transport("connection reset".to_string()))
    }
}

fn user_row(id: &str, name: &str) -> WireRow {
    WireData::row([
        ("id", WireData::pair(WireType::Int4, id)),
        ("name", WireData::pair(WireType::Utf8, name)),
    ])
}

fn user_schema() -> Schema {
    Schema::object([
        ("id", Schema::primitive(WireType::Int4)),
        ("name", Schema::optional(Schema::primitive(WireType::Utf8))),
    ])
}

#[tokio::test]
async fn test_fetch_all_encodes_params_and_decodes_rows() {
    let client = Client::new(MockTransport::new(vec![user_row("1", "ann"), user_row("2", ABSENT)]));

    let rows = client
        .query("SELECT id, name FROM users WHERE id > $1 AND active = $2")
        .bind(0)
        .bind(true)
        .fetch_all(&user_schema())
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("name"), Some(&Data::Scalar(Native::Str("ann".into()))));
    assert!(rows[1].get("name").unwrap().is_undefined());

    let request = client.transport().last_request();
    assert_eq!(
        request.params,
        EncodedParams::Positional(vec![
            WirePair::new(WireType::Int1, "0"),
            WirePair::new(WireType::Boolean, "true"),
        ])
    );
}

#[tokio::test]
async fn test_named_params() {
    let client = Client::new(MockTransport::new(vec![]));
    let rows = client
        .query("SELECT * FROM users WHERE id = $id")
        .bind_named("id", 100_000)
        .fetch_all(&user_schema())
        .await
        .unwrap();
    assert!(rows.is_empty());

    let EncodedParams::Named(params) = client.transport().last_request().params else {
        panic!("expected named params");
    };
    assert_eq!(params["id"], WirePair::new(WireType::Int4, "100000"));
}

#[tokio::test]
async fn test_no_params_sends_empty_list() {
    let client = Client::new(MockTransport::new(vec![user_row("7", "x")]));
    let row = client.query("SELECT 1").fetch_one(&user_schema()).await.unwrap();
    assert_eq!(row.get("id"), Some(&Data::Scalar(Native::Int(7))));
    assert_eq!(client.transport().last_request().params, EncodedParams::Positional(vec![]));
}

#[tokio::test]
async fn test_mixed_bindings_fail_before_sending() {
    let client = Client::new(MockTransport::new(vec![]));
    let err = client
        .query("SELECT $1")
        .bind(1)
        .bind_named("x", 2)
        .execute()
        .await
        .unwrap_err();
    assert!(matches!(err, CodecError::Encode(_)));
    assert!(client.transport().sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_one_without_rows() {
    let client = Client::new(MockTransport::new(vec![]));
    let err = client.query("SELECT 1").fetch_one(&user_schema()).await.unwrap_err();
    assert_eq!(err.to_string(), "Decode error: query returned no rows");
}

#[tokio::test]
async fn test_transport_errors_propagate() {
    let client = Client::new(FailingTransport);
    let err = client.query("SELECT 1").execute().await.unwrap_err();
    assert_eq!(err.to_string(), "Transport error: connection reset");
}

#[tokio::test]
async fn test_strict_config_applies_to_client() {
    let config = CodecConfig::builder().missing_fields(MissingFields::Error).build();
    let row = WireData::row([("name", WireData::pair(WireType::Utf8, "ann"))]);
    let client = Client::with_config(MockTransport::new(vec![row]), &config);

    let err = client.query("SELECT id").fetch_all(&user_schema()).await.unwrap_err();
    assert!(matches!(err, CodecError::MissingField(_)));
}

#[tokio::test]
async fn test_last_frame_answers_multi_statement_request() {
    let transport = MockTransport {
        response: Response {
            frames: vec![Frame { rows: vec![] }, Frame { rows: vec![user_row("3", "c")] }],
        },
        sent: Mutex::new(Vec::new()),
    };
    let client = Client::new(transport);
    let rows = client
        .query("BEGIN")
        .statement("SELECT id, name FROM users")
        .fetch_all(&user_schema())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(client.transport().last_request().statements.len(), 2);
}
