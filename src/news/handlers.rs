//! HTTP handlers for the news pages.

use std::sync::Arc;

use minijinja::context;
use tracing::{info, warn};

use super::CreateOutcome;
use crate::app::AppState;
use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::session::{CSRF_FIELD, Session};
use crate::validation::ValidationErrors;

const FORM_TITLE: &str = "Create a news item";

/// Flash message left for the form when a submission fails CSRF verification.
pub const CSRF_REJECTED: &str = "The action you requested is not allowed.";

/// `GET /news`
pub async fn index(_req: Request, state: Arc<AppState>) -> Result<Response, Error> {
    let news = state.news.list_all().await?;
    let html = state.views.page(
        "news/index.html",
        context! { title => "News archive", news => news },
    )?;
    Ok(Response::html(html))
}

/// `GET /news/{slug}`
pub async fn show(req: Request, state: Arc<AppState>) -> Result<Response, Error> {
    let slug = req.param("slug").unwrap_or_default();
    let Some(item) = state.news.get_by_slug(slug).await? else {
        return Ok(state.views.not_found(&format!("Cannot find the news item: {slug}")));
    };
    let html = state.views.page(
        "news/view.html",
        context! { title => &item.title, news => item },
    )?;
    Ok(Response::html(html))
}

/// `GET /news/new`
pub async fn new_form(req: Request, state: Arc<AppState>) -> Result<Response, Error> {
    render_form(&state, Session::from_request(&req), None)
}

/// `POST /news`
///
/// A failed CSRF check bounces back to the form with a flash message. A
/// submission that fails validation re-renders the form in this same
/// response, with one message per rejected field and the fields left blank.
pub async fn create(req: Request, state: Arc<AppState>) -> Result<Response, Error> {
    let mut session = Session::from_request(&req);
    let form = req.form();

    if state.csrf && !session.verify_csrf(form.get(CSRF_FIELD)) {
        warn!("news submission rejected: missing or mismatched CSRF token");
        session.set_flash("error", CSRF_REJECTED);
        return Ok(session.apply(Response::redirect("/news/new")));
    }

    match state.news.create_from_input(&form.only(&["title", "body"])).await? {
        CreateOutcome::Invalid(errors) => render_form(&state, session, Some(&errors)),
        CreateOutcome::Created(item) => {
            info!(slug = %item.slug, "news item created");
            let html = state.views.page(
                "news/success.html",
                context! { title => FORM_TITLE, news => item },
            )?;
            Ok(session.apply(Response::html(html)))
        }
    }
}

fn render_form(
    state: &AppState,
    mut session: Session,
    errors: Option<&ValidationErrors>,
) -> Result<Response, Error> {
    let error = session.take_flash("error");
    let csrf_token = state.csrf.then(|| session.csrf_token());
    let messages = errors.map(ValidationErrors::messages).unwrap_or_default();

    let html = state.views.page(
        "news/create.html",
        context! {
            title => FORM_TITLE,
            error => error,
            errors => messages,
            csrf_field => CSRF_FIELD,
            csrf_token => csrf_token,
        },
    )?;
    Ok(session.apply(Response::html(html)))
}
