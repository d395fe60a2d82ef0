//! Application state and the route table.

use std::sync::Arc;

use tracing::info;

use crate::config::SeedItem;
use crate::error::Error;
use crate::form::Form;
use crate::news::{self, CreateOutcome, NewsService, NewsStore};
use crate::router::Router;
use crate::views::Views;
use crate::{health, pages};

/// Everything a handler needs, shared by all requests through an `Arc`.
pub struct AppState {
    pub news: NewsService,
    pub views: Views,
    /// Whether form posts must echo the session's CSRF token.
    pub csrf: bool,
}

impl AppState {
    /// State over `store` with the embedded templates and CSRF checks on.
    pub fn new(store: Arc<dyn NewsStore>) -> Self {
        Self {
            news: NewsService::new(store),
            views: Views::default(),
            csrf: true,
        }
    }

    pub fn with_csrf(mut self, enabled: bool) -> Self {
        self.csrf = enabled;
        self
    }

    pub fn with_views(mut self, views: Views) -> Self {
        self.views = views;
        self
    }

    /// Feeds seed items through the normal create path, so they are
    /// validated and slugged like any submission. Stops at the first
    /// rejected item.
    pub async fn seed(&self, items: Vec<SeedItem>) -> Result<usize, Error> {
        let count = items.len();
        for item in items {
            let input: Form = [("title", item.title.as_str()), ("body", item.body.as_str())]
                .into_iter()
                .collect();
            if let CreateOutcome::Invalid(errors) = self.news.create_from_input(&input).await? {
                return Err(Error::InvalidSeed { title: item.title, errors });
            }
        }
        info!(count, "seeded news items");
        Ok(count)
    }
}

/// The full route table.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::with_state(state)
        .get("/", pages::home)
        .get("/pages", pages::index)
        .get("/news", news::handlers::index)
        .get("/news/new", news::handlers::new_form)
        .post("/news", news::handlers::create)
        .get("/news/{slug}", news::handlers::show)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
        .get("/{page}", pages::view)
        .fallback(pages::missing)
}
