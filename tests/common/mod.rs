//! Shared helpers for driving the full router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use newsdesk::app::{self, AppState};
use newsdesk::news::{MemoryNewsStore, NewsStore};
use newsdesk::{Method, Request, Response, Router};
use url::form_urlencoded;

pub type App = Router<Arc<AppState>>;

/// Router over an empty in-memory store with CSRF checks on.
pub fn app() -> App {
    app_with(AppState::new(Arc::new(MemoryNewsStore::new())))
}

pub fn app_without_csrf() -> App {
    app_with(AppState::new(Arc::new(MemoryNewsStore::new())).with_csrf(false))
}

pub fn app_over(store: Arc<dyn NewsStore>) -> App {
    app_with(AppState::new(store))
}

pub fn app_with(state: AppState) -> App {
    app::router(Arc::new(state))
}

pub async fn get(app: &App, path: &str) -> Response {
    app.dispatch(Request::new(Method::Get, path)).await
}

pub async fn get_with_cookie(app: &App, path: &str, cookie: &str) -> Response {
    app.dispatch(Request::new(Method::Get, path).with_header("cookie", cookie)).await
}

/// POSTs `fields` URL-encoded, optionally with a `cookie` header.
pub async fn post_form(app: &App, path: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> Response {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    let mut req = Request::new(Method::Post, path)
        .with_header("content-type", "application/x-www-form-urlencoded")
        .with_body(body);
    if let Some(cookie) = cookie {
        req = req.with_header("cookie", cookie);
    }
    app.dispatch(req).await
}

pub fn body(res: &Response) -> String {
    String::from_utf8_lossy(res.body()).into_owned()
}

/// `name=value` pairs from every `set-cookie` header, attributes dropped.
pub fn cookies(res: &Response) -> Vec<String> {
    res.headers()
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("set-cookie"))
        .filter_map(|(_, v)| v.split(';').next())
        .map(str::to_owned)
        .collect()
}

/// Opens the form to obtain a CSRF token; returns `(token, cookie header)`.
pub async fn csrf_session(app: &App) -> (String, String) {
    let res = get(app, "/news/new").await;
    let cookie = cookies(&res)
        .into_iter()
        .find(|c| c.starts_with("csrf_token="))
        .expect("form response sets a CSRF cookie");
    let token = cookie.trim_start_matches("csrf_token=").to_owned();
    (token, cookie)
}

/// Submits a news item through a CSRF-valid session.
pub async fn submit(app: &App, title: &str, body_text: &str) -> Response {
    let (token, cookie) = csrf_session(app).await;
    post_form(
        app,
        "/news",
        &[("csrf_token", token.as_str()), ("title", title), ("body", body_text)],
        Some(&cookie),
    )
    .await
}
