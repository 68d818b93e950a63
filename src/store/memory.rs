//! In-memory article store with JSON snapshot load/save

use super::traits::{ArticleStore, NewArticle, StoreError, StoreResult};
use crate::article::{Article, ArticleId, Topic};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::RwLock;
use uuid::Uuid;

/// On-disk snapshot of a store's contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub articles: Vec<Article>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// Thread-safe in-memory store.
///
/// Records live in a `DashMap`; a separate order list preserves collection
/// order, which the resolver's selection fallback depends on.
#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: DashMap<ArticleId, Article>,
    order: RwLock<Vec<ArticleId>>,
    topics: RwLock<Vec<Topic>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an existing collection, preserving the given ids
    /// and their order.
    pub fn with_articles(articles: Vec<Article>) -> Self {
        let store = Self::new();
        {
            let mut order = store.order.write().expect("order lock");
            for article in articles {
                order.push(article.id.clone());
                store.articles.insert(article.id.clone(), article);
            }
        }
        store
    }

    /// Load a store from a JSON snapshot file.
    pub fn from_snapshot_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let data = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;
        let store = Self::with_articles(snapshot.articles);
        *store.topics.write().expect("topics lock") = snapshot.topics;
        Ok(store)
    }

    /// Snapshot the current contents in collection order.
    pub fn snapshot(&self) -> Snapshot {
        let order = self.order.read().expect("order lock");
        let articles = order
            .iter()
            .filter_map(|id| self.articles.get(id).map(|r| r.clone()))
            .collect();
        Snapshot {
            articles,
            topics: self.topics.read().expect("topics lock").clone(),
        }
    }

    /// Write the current contents to a JSON snapshot file.
    pub fn save_snapshot_file(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let data = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn list_articles(&self) -> StoreResult<Vec<Article>> {
        Ok(self.snapshot().articles)
    }

    async fn create_article(&self, new: NewArticle) -> StoreResult<Article> {
        let id = ArticleId::new(Uuid::new_v4().to_string());
        let mut article = Article::new(id.clone(), new.title);
        article.summary = new.summary;
        article.description = new.description;
        article.tags = new.tags;
        article.parts = new.parts;

        self.order.write().expect("order lock").push(id.clone());
        self.articles.insert(id, article.clone());
        Ok(article)
    }

    async fn replace_article(&self, id: &ArticleId, mut record: Article) -> StoreResult<Article> {
        if !self.articles.contains_key(id) {
            return Err(StoreError::ArticleNotFound(id.clone()));
        }
        record.updated_at = Some(chrono::Utc::now());
        self.articles.insert(id.clone(), record.clone());
        Ok(record)
    }

    async fn delete_article(&self, id: &ArticleId) -> StoreResult<()> {
        if self.articles.remove(id).is_none() {
            return Err(StoreError::ArticleNotFound(id.clone()));
        }
        self.order.write().expect("order lock").retain(|o| o != id);
        Ok(())
    }

    async fn list_topics(&self) -> StoreResult<Vec<Topic>> {
        Ok(self.topics.read().expect("topics lock").clone())
    }
}
