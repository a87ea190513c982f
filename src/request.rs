//! Incoming HTTP request type.
//!
//! Besides the usual accessors, a [`Request`] carries request-scoped values:
//! typed entries in its [`Extensions`] map. Middleware stores state there
//! (the [`View`](crate::view::View) render context, an
//! [`I18n`](crate::view::I18n) translator) and downstream handlers take it
//! back out. The type of the value is the lookup key.

use std::collections::HashMap;

use bytes::Bytes;
use http::request::Parts;
use http::{Extensions, HeaderMap, Method, Uri};

/// An incoming HTTP request with its body fully collected.
pub struct Request {
    parts: Parts,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(parts: Parts, body: Bytes, params: HashMap<String, String>) -> Self {
        Self { parts, body, params }
    }

    pub fn method(&self) -> &Method { &self.parts.method }
    pub fn uri(&self) -> &Uri { &self.parts.uri }
    pub fn path(&self) -> &str { self.parts.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.parts.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Values that are not visible ASCII are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn extensions(&self) -> &Extensions { &self.parts.extensions }
    pub fn extensions_mut(&mut self) -> &mut Extensions { &mut self.parts.extensions }

    /// Stores a request-scoped value, returning the previous one of the same type.
    pub fn insert<T: Clone + Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.parts.extensions.insert(value)
    }

    /// Borrows the request-scoped value of type `T`, if one was stored.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.parts.extensions.get::<T>()
    }

    /// Takes the request-scoped value of type `T` out of the request.
    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.parts.extensions.remove::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request {
        let (parts, ()) = http::Request::get(uri)
            .header("X-Request-Id", "abc")
            .body(())
            .unwrap()
            .into_parts();
        Request::new(parts, Bytes::from_static(b"payload"), HashMap::new())
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Locale(&'static str);

    #[test]
    fn accessors_read_from_parts() {
        let req = request("/users/42?full=1");
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.path(), "/users/42");
        assert_eq!(req.header("x-request-id"), Some("abc"));
        assert_eq!(req.body(), b"payload");
        assert_eq!(req.param("id"), None);
    }

    #[test]
    fn extensions_are_keyed_by_type() {
        let mut req = request("/");
        assert!(req.insert(Locale("en")).is_none());
        assert_eq!(req.insert(Locale("fr")), Some(Locale("en")));
        assert_eq!(req.get::<Locale>(), Some(&Locale("fr")));
        assert_eq!(req.remove::<Locale>(), Some(Locale("fr")));
        assert!(req.get::<Locale>().is_none());
    }
}
