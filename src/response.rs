//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers normally never build a [`Response`] by hand: the
//! [`View`](crate::view::View) render methods do it, setting exactly one
//! `content-type` per call. The constructors here are what they build on.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;

// ── ContentType ───────────────────────────────────────────────────────────────

/// The content types a rendered response can carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Html,         // text/html
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Text,         // text/plain
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html        => "text/html",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use http::StatusCode;
/// use tsu_view::{ContentType, Response};
///
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::text("hello");
/// Response::status(StatusCode::NO_CONTENT);
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .body(ContentType::Html, "<p>created</p>");
/// ```
#[derive(Debug)]
pub struct Response(http::Response<Full<Bytes>>);

impl Response {
    /// `200 OK` — `application/json`.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::builder().body(ContentType::Json, body)
    }

    /// `200 OK` — `text/plain`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().body(ContentType::Text, body.into())
    }

    /// `200 OK` — `text/html`.
    pub fn html(body: impl Into<String>) -> Self {
        Self::builder().body(ContentType::Html, body.into())
    }

    /// `200 OK` — `application/octet-stream`.
    pub fn binary(body: impl Into<Bytes>) -> Self {
        Self::builder().body(ContentType::OctetStream, body)
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self::builder().status(code).no_body()
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: HeaderMap::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode { self.0.status() }
    pub fn headers(&self) -> &HeaderMap { self.0.headers() }

    pub fn content_type(&self) -> Option<&str> {
        self.0.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Hands the response to hyper.
    pub fn into_inner(self) -> http::Response<Full<Bytes>> { self.0 }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`. Terminated by
/// [`body`](ResponseBuilder::body) or [`no_body`](ResponseBuilder::no_body).
pub struct ResponseBuilder {
    headers: HeaderMap,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Terminate with a typed body. Replaces any `content-type` set through
    /// [`header`](ResponseBuilder::header).
    pub fn body(mut self, content_type: ContentType, body: impl Into<Bytes>) -> Response {
        self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type.as_str()));
        self.finish(body.into())
    }

    /// Terminate with no body (e.g. `204 No Content`, `301 Moved Permanently`).
    pub fn no_body(self) -> Response {
        self.finish(Bytes::new())
    }

    fn finish(self, body: Bytes) -> Response {
        let mut res = http::Response::new(Full::new(body));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        Response(res)
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// `Result<T, E>` converts when both sides do, so a handler can return
/// `Result<Response, view::Error>` and use `?` on render calls: the error
/// side becomes a `500`.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a status directly from a handler: `return StatusCode::NOT_FOUND`
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(ok) => ok.into_response(),
            Err(err) => err.into_response(),
        }
    }
}
