use bytes::Bytes;
use http::StatusCode;
use http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use tsu_view::Router;

/// What a client would see after one request.
pub struct Reply {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Reply {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body with surrounding whitespace and line breaks removed.
    pub fn html(&self) -> String {
        self.text().trim().lines().map(str::trim).collect()
    }
}

pub async fn get(app: &Router, uri: &str) -> Reply {
    let req = http::Request::get(uri).body(Bytes::new()).unwrap();
    let res = app.dispatch(req).await;
    let status = res.status();
    let content_type = res
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let body = res.into_body().collect().await.unwrap().to_bytes();
    Reply { status, content_type, body }
}
