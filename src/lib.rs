//! # newsdesk
//!
//! A small server-rendered news site. Readers list and open articles;
//! anyone can submit a new one through an HTML form.
//!
//! The crate carries its own thin HTTP layer on top of hyper:
//!
//! - Radix-tree routing via [`matchit`], one tree per method
//! - Handlers are plain `async fn(Request, S)`, where `S` is shared state
//! - Graceful shutdown on SIGTERM / Ctrl-C, draining in-flight requests
//!
//! and the news feature on top of it:
//!
//! - [`news::NewsService`] validates submissions, derives slugs, and talks
//!   to a [`news::NewsStore`]
//! - [`views::Views`] renders embedded minijinja templates
//! - [`session::Session`] carries flash messages and the CSRF token in
//!   cookies, one request at a time
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use newsdesk::{Server, app, news::MemoryNewsStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), newsdesk::Error> {
//!     let state = Arc::new(app::AppState::new(Arc::new(MemoryNewsStore::new())));
//!     Server::bind("127.0.0.1:8080".parse().unwrap())
//!         .serve(app::router(state))
//!         .await
//! }
//! ```

mod error;
mod form;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod config;
pub mod health;
pub mod news;
pub mod pages;
pub mod session;
pub mod slug;
pub mod validation;
pub mod views;

pub use error::Error;
pub use form::Form;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
