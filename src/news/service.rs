//! News use cases on top of a [`NewsStore`].

use std::sync::Arc;

use tracing::debug;

use super::{NewsItem, NewsStore, StoreError};
use crate::form::Form;
use crate::slug::slugify;
use crate::validation::{Rule, RuleSet, ValidationErrors};

const TITLE_TAKEN: &str = "A news item with this title already exists.";
const TITLE_UNSLUGGABLE: &str = "The title field must contain at least one letter or number.";

/// Result of a submission: stored, or sent back with field messages.
///
/// Validation failures are an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(NewsItem),
    Invalid(ValidationErrors),
}

/// Lists, looks up, and creates news items.
///
/// Cheap to share: hold it behind the application state and hand the same
/// instance to every request.
pub struct NewsService {
    store: Arc<dyn NewsStore>,
    rules: RuleSet,
}

impl NewsService {
    pub fn new(store: Arc<dyn NewsStore>) -> Self {
        let rules = RuleSet::new()
            .field("title", [Rule::Required, Rule::MaxLength(255), Rule::MinLength(3)])
            .field("body", [Rule::Required, Rule::MaxLength(5000), Rule::MinLength(10)]);
        Self { store, rules }
    }

    /// Every item, in the store's order. An empty store is an empty list.
    pub async fn list_all(&self) -> Result<Vec<NewsItem>, StoreError> {
        self.store.find_all().await
    }

    /// The item stored under `slug`, or `None`.
    ///
    /// An empty slug is simply not found; it is not an argument error.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<NewsItem>, StoreError> {
        if slug.is_empty() {
            return Ok(None);
        }
        self.store.find_by_slug(slug).await
    }

    /// Validates `input`, derives the slug from its `title`, and stores the
    /// item.
    ///
    /// Besides the field rules, a title is rejected when it yields an empty
    /// slug or the slug of an item that already exists. Only store failures
    /// are errors.
    pub async fn create_from_input(&self, input: &Form) -> Result<CreateOutcome, StoreError> {
        if let Err(errors) = self.rules.validate(input) {
            debug!(fields = errors.len(), "news submission failed validation");
            return Ok(CreateOutcome::Invalid(errors));
        }

        let title = input.value("title");
        let slug = slugify(title);
        if slug.is_empty() {
            return Ok(CreateOutcome::Invalid(ValidationErrors::single("title", TITLE_UNSLUGGABLE)));
        }

        let item = NewsItem {
            title: title.to_owned(),
            slug,
            body: input.value("body").to_owned(),
        };

        match self.store.insert(item.clone()).await {
            Ok(()) => Ok(CreateOutcome::Created(item)),
            Err(StoreError::DuplicateSlug { slug }) => {
                debug!(%slug, "news submission collides with an existing slug");
                Ok(CreateOutcome::Invalid(ValidationErrors::single("title", TITLE_TAKEN)))
            }
            Err(e) => Err(e),
        }
    }
}
