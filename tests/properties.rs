//! Body helpers hold for arbitrary payloads, checked through the full router.

use bytes::Bytes;
use http::StatusCode;
use http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use proptest::prelude::*;
use serde_json::{Map, Value};
use tsu_view::view::{self, Options, View};
use tsu_view::{Request, Response, Router};

// Each handler echoes the request body through one render method.

async fn binary(mut req: Request) -> Result<Response, view::Error> {
    let v = View::extract(&mut req)?;
    Ok(v.binary(req.body().to_vec()))
}

async fn text(mut req: Request) -> Result<Response, view::Error> {
    let v = View::extract(&mut req)?;
    Ok(v.text(String::from_utf8_lossy(req.body())))
}

async fn json(mut req: Request) -> Result<Response, view::Error> {
    let v = View::extract(&mut req)?;
    let m: Map<String, Value> = serde_json::from_slice(req.body())?;
    v.json(&m)
}

async fn data_as_json(mut req: Request) -> Result<Response, view::Error> {
    let mut v = View::extract(&mut req)?;
    v.data = serde_json::from_slice(req.body())?;
    v.data_as_json()
}

fn app() -> Router {
    Router::new()
        .with(view::middleware(Options::new("tests/testdata")))
        .post("/binary", binary)
        .post("/text", text)
        .post("/json", json)
        .post("/data_json", data_as_json)
}

struct Reply {
    status: StatusCode,
    content_types: Vec<String>,
    body: Bytes,
}

fn post(app: &Router, uri: &str, body: Vec<u8>) -> Reply {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(async {
        let req = http::Request::post(uri).body(Bytes::from(body)).unwrap();
        let res = app.dispatch(req).await;
        let status = res.status();
        let content_types = res
            .headers()
            .get_all(CONTENT_TYPE)
            .iter()
            .map(|v| v.to_str().unwrap().to_owned())
            .collect();
        let body = res.into_body().collect().await.unwrap().to_bytes();
        Reply { status, content_types, body }
    })
}

// No floats: they do not survive a text round trip bit for bit.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        ".*".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(".*", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn json_map() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(".*", json_value(), 0..8).prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn binary_returns_bytes_verbatim(b in prop::collection::vec(any::<u8>(), 0..512)) {
        let reply = post(&app(), "/binary", b.clone());
        prop_assert_eq!(reply.status, StatusCode::OK);
        prop_assert_eq!(reply.content_types, vec!["application/octet-stream".to_owned()]);
        prop_assert_eq!(&reply.body[..], &b[..]);
    }

    #[test]
    fn text_returns_string_verbatim(s in ".*") {
        let reply = post(&app(), "/text", s.clone().into_bytes());
        prop_assert_eq!(reply.status, StatusCode::OK);
        prop_assert_eq!(reply.content_types, vec!["text/plain".to_owned()]);
        prop_assert_eq!(&reply.body[..], s.as_bytes());
    }

    #[test]
    fn json_and_data_as_json_are_identical(m in json_map()) {
        let encoded = serde_json::to_vec(&m).unwrap();
        let app = app();
        let direct = post(&app, "/json", encoded.clone());
        let from_data = post(&app, "/data_json", encoded.clone());

        for reply in [&direct, &from_data] {
            prop_assert_eq!(reply.status, StatusCode::OK);
            prop_assert_eq!(&reply.content_types, &vec!["application/json".to_owned()]);
            prop_assert_eq!(&reply.body[..], &encoded[..]);
        }
        prop_assert_eq!(&direct.body, &from_data.body);
    }
}
