//! # tsu-view
//!
//! Response rendering for the tsu HTTP framework: HTML composed from a
//! directory of templates, JSON, plain text and binary bodies, each with
//! exactly one matching `content-type`.
//!
//! - Router, middleware chain and hyper server with graceful shutdown
//! - [`view::middleware`] puts a per-request [`view::View`] in every request
//! - Templates resolved by directory layout: `a/b/c` renders the layouts
//!   `a` and `a/b` (when present) before the leaf `a/b/c`
//! - Templates from the filesystem or from a `rust-embed` bundle
//! - Optional per-request translator exposed to templates as `T`
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use tsu_view::view::{self, Options, View};
//! use tsu_view::{Request, Response, Router, Server, middleware};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .with(middleware::trace())
//!         .with(view::middleware(Options::new("views")))
//!         .get("/users/{id}",     show_user)
//!         .get("/api/users/{id}", user_json);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn show_user(mut req: Request) -> Result<Response, view::Error> {
//!     let mut view = View::extract(&mut req)?;
//!     view.set("id", req.param("id"))?;
//!     view.html("users/show")
//! }
//!
//! async fn user_json(mut req: Request) -> Result<Response, view::Error> {
//!     let mut view = View::extract(&mut req)?;
//!     view.set("id", req.param("id"))?;
//!     view.data_as_json()
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod middleware;
pub mod view;

pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
