//! View rendering demo — HTML with layouts, JSON, and a translator.
//!
//! Run from the crate root with:
//!   RUST_LOG=info cargo run --example render
//!
//! Try:
//!   curl http://localhost:3000/users/42
//!   curl http://localhost:3000/api/users/42
//!   curl http://localhost:3000/robots.txt

use std::collections::HashMap;
use std::sync::Arc;

use tsu_view::middleware::{self, Next};
use tsu_view::view::{self, I18n, Options, View};
use tsu_view::{Request, Response, Router, Server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let messages = Arc::new(HashMap::from([
        ("title", "Users"),
        ("greeting", "Hello, "),
    ]));
    let translator = move |key: &str, args: &[String]| -> String {
        let base = messages.get(key).copied().unwrap_or(key);
        format!("{base}{}", args.concat())
    };

    let app = Router::new()
        .with(middleware::trace())
        .with(middleware::from_fn(move |mut req: Request, next: Next| {
            req.insert(I18n::new(translator.clone()));
            next.run(req)
        }))
        .with(view::middleware(Options::new("demos/views")))
        .get("/users/{id}",     show_user)
        .get("/api/users/{id}", user_json)
        .get("/robots.txt",     robots);

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// GET /users/:id → demos/views/users.html + demos/views/users/show.html
async fn show_user(mut req: Request) -> Result<Response, view::Error> {
    let mut view = View::extract(&mut req)?;
    view.set("id", req.param("id"))?;
    view.set("name", "alice")?;
    view.html("users/show")
}

// GET /api/users/:id
async fn user_json(mut req: Request) -> Result<Response, view::Error> {
    let mut view = View::extract(&mut req)?;
    view.set("id", req.param("id"))?;
    view.set("name", "alice")?;
    view.data_as_json()
}

async fn robots(mut req: Request) -> Result<Response, view::Error> {
    Ok(View::extract(&mut req)?.text("User-agent: *\nDisallow:\n"))
}
