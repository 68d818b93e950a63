//! Shared fixture builders for the integration suite
#![allow(dead_code)]

use async_trait::async_trait;
use lattice::article::{Article, ArticleId, Topic, MAIN_SENTINEL, UNASSIGNED_SENTINEL};
use lattice::store::{ArticleStore, MemoryStore, NewArticle, StoreError, StoreResult};
use lattice::workspace::Workspace;
use std::sync::Arc;

/// The canonical small collection: a main article, a child of main, an
/// orphan, and the unassigned bucket.
pub fn seeded_collection() -> Vec<Article> {
    vec![
        Article::new("main", "Main").with_summary(MAIN_SENTINEL),
        Article::new("a", "A").with_tag("main"),
        Article::new("b", "B"),
        Article::new("u", "Unassigned").with_summary(UNASSIGNED_SENTINEL),
    ]
}

/// Workspace backed by an in-memory store holding the given collection.
pub fn workspace_with(articles: Vec<Article>) -> (Workspace, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_articles(articles));
    (Workspace::new(store.clone()), store)
}

pub fn id(s: &str) -> ArticleId {
    ArticleId::from(s)
}

/// Store whose every operation fails with a transport error, for exercising
/// the workspace's failure branches.
pub struct UnreachableStore;

impl UnreachableStore {
    fn refused<T>() -> StoreResult<T> {
        Err(StoreError::Transport("connection refused".to_string()))
    }
}

#[async_trait]
impl ArticleStore for UnreachableStore {
    async fn list_articles(&self) -> StoreResult<Vec<Article>> {
        Self::refused()
    }

    async fn create_article(&self, _new: NewArticle) -> StoreResult<Article> {
        Self::refused()
    }

    async fn replace_article(&self, _id: &ArticleId, _record: Article) -> StoreResult<Article> {
        Self::refused()
    }

    async fn delete_article(&self, _id: &ArticleId) -> StoreResult<()> {
        Self::refused()
    }

    async fn list_topics(&self) -> StoreResult<Vec<Topic>> {
        Self::refused()
    }
}
