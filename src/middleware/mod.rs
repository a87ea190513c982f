//! Middleware layer.
//!
//! Middleware intercepts a request before its handler runs and sees the
//! response on the way back. It is the place for cross-cutting concerns:
//! installing the [`View`](crate::view::View) render context, binding a
//! translator, per-request tracing.
//!
//! Middleware runs in registration order for every request, matched or not;
//! the route handler (or the `404` fallback) sits at the end of the chain.
//!
//! ```rust,no_run
//! use tsu_view::middleware::{self, Next};
//! use tsu_view::view::{self, I18n, Options};
//! use tsu_view::{Request, Router};
//!
//! let app = Router::new()
//!     .with(middleware::trace())
//!     .with(middleware::from_fn(|mut req: Request, next: Next| async move {
//!         req.insert(I18n::new(|key: &str, _: &[String]| key.to_uppercase()));
//!         next.run(req).await
//!     }))
//!     .with(view::middleware(Options::new("views")));
//! ```

mod trace;

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler};
use crate::request::Request;
use crate::response::IntoResponse;

pub use trace::{Trace, trace};

/// A link in the request chain.
pub trait Middleware: Send + Sync + 'static {
    /// Handles `req`, usually by calling [`Next::run`] and returning (or
    /// inspecting) its response.
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

pub(crate) type Chain = Arc<Vec<Arc<dyn Middleware>>>;

/// The remainder of the chain after the current middleware.
pub struct Next {
    chain: Chain,
    index: usize,
    endpoint: BoxedHandler,
}

impl Next {
    pub(crate) fn new(chain: Chain, endpoint: BoxedHandler) -> Self {
        Self { chain, index: 0, endpoint }
    }

    /// Runs the next middleware, or the handler once the chain is exhausted.
    pub fn run(mut self, req: Request) -> BoxFuture {
        match self.chain.get(self.index).cloned() {
            Some(middleware) => {
                self.index += 1;
                middleware.call(req, self)
            }
            None => self.endpoint.call(req),
        }
    }
}

/// Turns an async closure into [`Middleware`].
pub fn from_fn<F, Fut, R>(f: F) -> FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    FromFn(f)
}

/// Middleware built by [`from_fn`].
pub struct FromFn<F>(F);

impl<F, Fut, R> Middleware for FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let fut = (self.0)(req, next);
        Box::pin(async move { fut.await.into_response() })
    }
}
