//! Persistence collaborator trait definitions

use crate::article::{Article, ArticleId, Topic};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur at the persistence boundary
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("article not found: {0}")]
    ArticleNotFound(ArticleId),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Partial record for article creation; the store assigns the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<ArticleId>,
    #[serde(default)]
    pub parts: Vec<ArticleId>,
}

impl NewArticle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, parent: ArticleId) -> Self {
        self.tags.push(parent);
        self
    }
}

/// The persistence collaborator for articles and topics.
///
/// All writes are full-record replacements; the resolver and workspace
/// never issue partial in-place mutations. Implementations must be
/// thread-safe (Send + Sync). Callers are responsible for sequencing:
/// a mutation derived from stale state silently drops concurrent edits
/// (last-writer-wins, whole record).
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Fetch the full article collection.
    async fn list_articles(&self) -> StoreResult<Vec<Article>>;

    /// Create an article; the store assigns the id.
    async fn create_article(&self, new: NewArticle) -> StoreResult<Article>;

    /// Replace a full record by id. Fails if the id is absent.
    async fn replace_article(&self, id: &ArticleId, record: Article) -> StoreResult<Article>;

    /// Delete an article by id.
    async fn delete_article(&self, id: &ArticleId) -> StoreResult<()>;

    /// Fetch the auxiliary topic taxonomy.
    async fn list_topics(&self) -> StoreResult<Vec<Topic>>;
}
