//! Static pages: `/`, `/pages`, and `/{page}`.

use std::sync::Arc;

use minijinja::context;
use percent_encoding::percent_decode_str;

use crate::app::AppState;
use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

/// Pages with a template under `pages/`, in menu order.
pub const PAGES: [&str; 2] = ["home", "about"];

/// `GET /`
pub async fn home(_req: Request, state: Arc<AppState>) -> Result<Response, Error> {
    view_page(&state, "home")
}

/// `GET /pages`
pub async fn index(_req: Request, state: Arc<AppState>) -> Result<Response, Error> {
    let html = state.views.page("pages/index.html", context! { title => "Pages", pages => PAGES })?;
    Ok(Response::html(html))
}

/// `GET /{page}`
pub async fn view(req: Request, state: Arc<AppState>) -> Result<Response, Error> {
    view_page(&state, req.param("page").unwrap_or_default())
}

/// Fallback for paths no route matches. Names the page the way `/{page}`
/// does: decoded and without the leading slash.
pub async fn missing(req: Request, state: Arc<AppState>) -> Response {
    let page = percent_decode_str(req.path().trim_start_matches('/')).decode_utf8_lossy();
    state.views.not_found(&format!("Cannot find the page: {page}"))
}

fn view_page(state: &AppState, page: &str) -> Result<Response, Error> {
    if !PAGES.contains(&page) {
        return Ok(state.views.not_found(&format!("Cannot find the page: {page}")));
    }
    let html = state.views.page(&format!("pages/{page}.html"), context! { title => capitalize(page) })?;
    Ok(Response::html(html))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
