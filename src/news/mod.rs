//! The news feature: list, read, and submit articles.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/news` | [`handlers::index`] |
//! | GET | `/news/new` | [`handlers::new_form`] |
//! | POST | `/news` | [`handlers::create`] |
//! | GET | `/news/{slug}` | [`handlers::show`] |

use serde::{Deserialize, Serialize};

pub mod handlers;
mod service;
mod store;

pub use service::{CreateOutcome, NewsService};
pub use store::{MemoryNewsStore, NewsStore, StoreError};

/// A published news article.
///
/// `slug` is derived from `title` once, when the item is created, and is the
/// key it is looked up by afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub slug: String,
    pub body: String,
}
