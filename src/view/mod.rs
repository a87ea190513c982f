//! Response rendering: HTML from a directory of templates, plus JSON, text
//! and binary bodies.
//!
//! [`middleware`] installs a fresh [`View`] in every request. A handler takes
//! it out with [`View::extract`], fills [`View::data`], and finishes with one
//! render method. Render methods consume the view, so a request can only
//! produce one response through it.
//!
//! ```rust,no_run
//! use tsu_view::view::{self, Options, View};
//! use tsu_view::{Request, Response, Router};
//!
//! async fn profile(mut req: Request) -> Result<Response, view::Error> {
//!     let mut view = View::extract(&mut req)?;
//!     view.data.insert("name".into(), "alice".into());
//!     view.html("users/profile")
//! }
//!
//! let app = Router::new()
//!     .with(view::middleware(Options::new("views")))
//!     .get("/profile", profile);
//! ```
//!
//! `users/profile` renders `views/users.html` (if present) followed by
//! `views/users/profile.html`; see [`resolve`] for the layout rules.

mod engine;
mod error;
mod i18n;
mod options;
pub mod resolve;

use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use minijinja::Value;
use serde::Serialize;

use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::{ContentType, Response};

use engine::Engine;

pub use error::Error;
pub use i18n::{I18n, Translator};
pub use options::{AssetSource, Assets, Options};

/// Request-scoped template data. Every entry is a top-level template variable.
pub type Data = serde_json::Map<String, serde_json::Value>;

/// Per-request render context.
#[derive(Clone)]
pub struct View {
    /// Values available to templates and to [`View::data_as_json`]. Empty
    /// when the view is created.
    pub data: Data,
    engine: Arc<Engine>,
    i18n: Option<I18n>,
    status: StatusCode,
}

impl View {
    fn new(engine: Arc<Engine>) -> Self {
        Self { data: Data::new(), engine, i18n: None, status: StatusCode::OK }
    }

    /// Takes the view installed by [`middleware`] out of `req`.
    ///
    /// Binds the request's [`I18n`] translator, if any, unless one was set
    /// with [`View::set_i18n`] already.
    pub fn extract(req: &mut Request) -> Result<View, Error> {
        let mut view = req.remove::<View>().ok_or(Error::MissingView)?;
        if view.i18n.is_none() {
            view.i18n = req.get::<I18n>().cloned();
        }
        Ok(view)
    }

    /// Serializes `value` into [`View::data`] under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<(), Error> {
        self.data.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn set_i18n(&mut self, i18n: I18n) {
        self.i18n = Some(i18n);
    }

    /// Status of the rendered response, `200 OK` unless changed.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// `application/octet-stream`, body verbatim.
    pub fn binary(self, body: impl Into<Bytes>) -> Response {
        self.respond(ContentType::OctetStream, body.into())
    }

    /// `text/plain`.
    pub fn text(self, body: impl Into<String>) -> Response {
        self.respond(ContentType::Text, body.into())
    }

    /// `application/json`, `value` serialized with serde_json.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Response, Error> {
        let body = serde_json::to_vec(value)?;
        Ok(self.respond(ContentType::Json, body))
    }

    /// Same as `json(&view.data)`.
    pub fn data_as_json(self) -> Result<Response, Error> {
        let body = serde_json::to_vec(&self.data)?;
        Ok(self.respond(ContentType::Json, body))
    }

    /// `text/html`, rendered from the template `name` and its layouts.
    ///
    /// Templates see every [`View::data`] entry as a variable and, when a
    /// translator is bound, `T(key, args...)`. `T` shadows a data entry of the
    /// same name.
    pub fn html(self, name: &str) -> Result<Response, Error> {
        let mut ctx: BTreeMap<String, Value> = self.data.iter()
            .map(|(k, v)| (k.clone(), Value::from_serialize(v)))
            .collect();
        if let Some(i18n) = &self.i18n {
            ctx.insert("T".to_owned(), i18n.helper());
        }

        let body = self.engine.render(name, Value::from_serialize(&ctx))?;
        Ok(self.respond(ContentType::Html, body))
    }

    fn respond(self, content_type: ContentType, body: impl Into<Bytes>) -> Response {
        Response::builder().status(self.status).body(content_type, body)
    }
}

/// Middleware that installs a fresh [`View`] in every request.
pub fn middleware(options: Options) -> ViewLayer {
    ViewLayer { engine: Arc::new(Engine::new(options)) }
}

/// Middleware built by [`view::middleware`](middleware). Cheap to clone;
/// clones share the template cache.
#[derive(Clone)]
pub struct ViewLayer {
    engine: Arc<Engine>,
}

impl Middleware for ViewLayer {
    fn call(&self, mut req: Request, next: Next) -> BoxFuture {
        req.insert(View::new(Arc::clone(&self.engine)));
        next.run(req)
    }
}
