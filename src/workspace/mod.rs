//! Workspace: the consumer-facing facade over the article collection
//!
//! Owns the reducer-style state and the persistence collaborator. Every
//! write is a full-record replacement applied optimistically to local state
//! first; store failures are surfaced in `WorkspaceState::error` and never
//! rolled back. Mutations are strictly sequential: every operation takes
//! `&mut self`, so a second mutation cannot start before the prior one's
//! acknowledgment.

mod orphan;
mod state;

pub use orphan::orphan_candidates;
pub use state::{Action, WorkspaceState};

use crate::article::{Article, ArticleId};
use crate::store::{ArticleStore, NewArticle, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no article with id {0}")]
    UnknownArticle(ArticleId),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// The single entry point for article operations.
pub struct Workspace {
    store: Arc<dyn ArticleStore>,
    state: WorkspaceState,
}

impl Workspace {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self {
            store,
            state: WorkspaceState::new(),
        }
    }

    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    /// Dispatch a state-only action (no persistence involved).
    pub fn dispatch(&mut self, action: Action) {
        self.state.apply(action);
    }

    // --- Collection lifecycle ---

    /// Fetch the full collection and rebuild the resolved view.
    ///
    /// A fetch failure is terminal for this load: the error is recorded and
    /// no partial collection is installed.
    pub async fn fetch_articles(&mut self) -> WorkspaceResult<()> {
        self.state.apply(Action::SetLoading(true));
        match self.store.list_articles().await {
            Ok(articles) => {
                self.state.apply(Action::InitApplication(articles));
                Ok(())
            }
            Err(e) => {
                self.state.apply(Action::SetError(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Select an article. Navigating to the `#unassigned` bucket triggers
    /// the orphan assignment sweep.
    pub async fn select_article(&mut self, id: &ArticleId) -> WorkspaceResult<()> {
        let article = self
            .state
            .article(id)
            .ok_or_else(|| WorkspaceError::UnknownArticle(id.clone()))?;
        let activate_bucket = article.is_unassigned();
        self.state
            .apply(Action::SetCurrentArticle(Some(id.clone())));
        if activate_bucket {
            self.assign_orphans().await;
        }
        Ok(())
    }

    /// Create a new article, pre-tagged to the currently viewed article as
    /// parent, and switch to it in edit mode.
    pub async fn create_article(&mut self) -> WorkspaceResult<Article> {
        let mut new = NewArticle::new("New Article");
        new.description = "<p>Edit me...</p>".to_string();
        if let Some(parent) = self.state.current_article.clone() {
            new = new.with_tag(parent);
        }
        match self.store.create_article(new).await {
            Ok(article) => {
                let mut articles = self.state.articles.clone();
                articles.push(article.clone());
                self.state.apply(Action::SetArticles(articles));
                self.state
                    .apply(Action::SetCurrentArticle(Some(article.id.clone())));
                self.state.apply(Action::SetViewMode(false));
                Ok(article)
            }
            Err(e) => {
                self.state.apply(Action::SetError(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Optimistically update a record, then persist. The local state is not
    /// rolled back when the store rejects the write.
    pub async fn update_article(&mut self, article: Article) -> WorkspaceResult<()> {
        self.persist(article).await
    }

    pub async fn delete_article(&mut self, id: &ArticleId) -> WorkspaceResult<()> {
        match self.store.delete_article(id).await {
            Ok(()) => {
                self.state.apply(Action::RemoveArticleLocal(id.clone()));
                Ok(())
            }
            Err(e) => {
                self.state.apply(Action::SetError(e.to_string()));
                Err(e.into())
            }
        }
    }

    // --- Tag and part mutations ---

    /// Append a parent tag; a no-op if the tag is already present.
    pub async fn add_tag_to_article(
        &mut self,
        article_id: &ArticleId,
        parent_id: ArticleId,
    ) -> WorkspaceResult<()> {
        let mut article = self.read_article(article_id)?;
        if article.tags.contains(&parent_id) {
            return Ok(());
        }
        article.tags.push(parent_id);
        self.persist(article).await
    }

    /// Remove a parent tag. If the tag set becomes empty and the article is
    /// not the bucket itself, the bucket id is appended so the article does
    /// not fall out of the hierarchy silently.
    pub async fn remove_tag_from_article(
        &mut self,
        article_id: &ArticleId,
        tag: &ArticleId,
    ) -> WorkspaceResult<()> {
        let mut article = self.read_article(article_id)?;
        article.tags.retain(|t| t != tag);
        if article.tags.is_empty() && !article.is_unassigned() {
            if let Some(bucket) = self.state.unassigned.clone() {
                if bucket != article.id {
                    tracing::debug!(article = %article.id, "last tag removed, reassigning to bucket");
                    article.tags.push(bucket);
                }
            }
        }
        self.persist(article).await
    }

    /// Append an embedded part; a no-op if already present.
    pub async fn add_part_to_article(
        &mut self,
        article_id: &ArticleId,
        part_id: ArticleId,
    ) -> WorkspaceResult<()> {
        let mut article = self.read_article(article_id)?;
        if article.parts.contains(&part_id) {
            return Ok(());
        }
        article.parts.push(part_id);
        self.persist(article).await
    }

    pub async fn remove_part_from_article(
        &mut self,
        article_id: &ArticleId,
        part_id: &ArticleId,
    ) -> WorkspaceResult<()> {
        let mut article = self.read_article(article_id)?;
        article.parts.retain(|p| p != part_id);
        self.persist(article).await
    }

    // --- Orphan assignment ---

    /// Tag every orphan into the `#unassigned` bucket.
    ///
    /// Mutations are applied one at a time: each starts from the latest
    /// local state and awaits the store's acknowledgment before the next is
    /// computed. A failed mutation is recorded and does not stop the sweep.
    pub async fn assign_orphans(&mut self) {
        let Some(bucket) = self.state.unassigned.clone() else {
            return;
        };
        let candidates = orphan_candidates(&self.state.articles, &bucket);
        if candidates.is_empty() {
            return;
        }
        tracing::info!(count = candidates.len(), "assigning orphans to bucket");
        for id in candidates {
            let Some(article) = self.state.article(&id).cloned() else {
                continue;
            };
            if article.tags.contains(&bucket) {
                continue;
            }
            let mut updated = article;
            updated.tags.push(bucket.clone());
            if let Err(e) = self.persist(updated).await {
                tracing::warn!(article = %id, error = %e, "orphan assignment failed");
            }
        }
    }

    // --- Stored shelf and view mode (state-only) ---

    pub fn add_to_stored(&mut self, id: ArticleId) {
        self.state.apply(Action::AddStored(id));
    }

    pub fn remove_from_stored(&mut self, id: ArticleId) {
        self.state.apply(Action::RemoveStored(id));
    }

    pub fn toggle_view_mode(&mut self) {
        self.state.apply(Action::ToggleViewMode);
    }

    pub fn set_view_mode(&mut self, mode: bool) {
        self.state.apply(Action::SetViewMode(mode));
    }

    // --- Internals ---

    fn read_article(&self, id: &ArticleId) -> WorkspaceResult<Article> {
        self.state
            .article(id)
            .cloned()
            .ok_or_else(|| WorkspaceError::UnknownArticle(id.clone()))
    }

    async fn persist(&mut self, article: Article) -> WorkspaceResult<()> {
        let id = article.id.clone();
        self.state
            .apply(Action::UpdateArticleLocal(article.clone()));
        match self.store.replace_article(&id, article).await {
            Ok(_) => Ok(()),
            Err(e) => {
                self.state.apply(Action::SetError(e.to_string()));
                Err(e.into())
            }
        }
    }
}
