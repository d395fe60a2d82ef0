//! Persistence seam for news items.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::NewsItem;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Another item already uses this slug.
    #[error("slug `{slug}` is already taken")]
    DuplicateSlug { slug: String },

    /// The backing store could not complete the operation.
    #[error("backend unavailable: {0}")]
    Backend(String),
}

/// Where news items live.
///
/// Slugs are unique: `insert` refuses an item whose slug is already stored,
/// so `find_by_slug` has at most one answer.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Every item, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<NewsItem>, StoreError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<NewsItem>, StoreError>;

    async fn insert(&self, item: NewsItem) -> Result<(), StoreError>;
}

/// In-process store. Items are listed in insertion order.
#[derive(Debug, Default)]
pub struct MemoryNewsStore {
    items: RwLock<Vec<NewsItem>>,
}

impl MemoryNewsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsStore for MemoryNewsStore {
    async fn find_all(&self) -> Result<Vec<NewsItem>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<NewsItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.slug == slug).cloned())
    }

    async fn insert(&self, item: NewsItem) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.slug == item.slug) {
            return Err(StoreError::DuplicateSlug { slug: item.slug });
        }
        items.push(item);
        Ok(())
    }
}
