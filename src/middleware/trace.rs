//! Per-request span with method, path, status and latency.

use std::time::Instant;

use tracing::{Instrument, info, info_span};

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;

/// Middleware that wraps each request in a `request` span and logs its outcome.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

pub fn trace() -> Trace {
    Trace
}

impl Middleware for Trace {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let span = info_span!("request", method = %req.method(), path = %req.path());
        let started = Instant::now();

        Box::pin(
            async move {
                let res = next.run(req).await;
                info!(
                    status = res.status_code().as_u16(),
                    latency = ?started.elapsed(),
                    "request completed"
                );
                res
            }
            .instrument(span),
        )
    }
}
