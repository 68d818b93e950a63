//! Reducer-style workspace state

use crate::article::{normalize_collection, resolve, select_current, Article, ArticleId};

/// Commands applied to the workspace state by the pure transition function.
#[derive(Debug, Clone)]
pub enum Action {
    /// Full collection arrived: normalize legacy shapes, resolve
    /// relationships, and re-select the current article.
    InitApplication(Vec<Article>),
    /// Replace the collection without re-resolving.
    SetArticles(Vec<Article>),
    SetCurrentArticle(Option<ArticleId>),
    SetLoading(bool),
    SetError(String),
    ToggleViewMode,
    SetViewMode(bool),
    /// Add an article to the stored shelf (front of the list, deduplicated).
    AddStored(ArticleId),
    RemoveStored(ArticleId),
    /// Optimistic local replacement of a single record.
    UpdateArticleLocal(Article),
    RemoveArticleLocal(ArticleId),
}

/// The shared, single-writer state behind the article UI.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    pub articles: Vec<Article>,
    pub current_article: Option<ArticleId>,
    /// Shelf of article ids set aside by the user
    pub stored_articles: Vec<ArticleId>,
    /// true = view, false = edit
    pub view_mode: bool,
    pub loading: bool,
    pub error: Option<String>,
    /// Resolved `#main` sentinel, if any
    pub main: Option<ArticleId>,
    /// Resolved `#unassigned` bucket, if any
    pub unassigned: Option<ArticleId>,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self {
            view_mode: true,
            ..Default::default()
        }
    }

    /// The single state transition. Every mutation of the workspace goes
    /// through here; callers sequence actions, never interleave them.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::InitApplication(mut articles) => {
                normalize_collection(&mut articles);
                let resolved = resolve(&mut articles);
                self.current_article = select_current(
                    self.current_article.as_ref(),
                    &articles,
                    resolved.main.as_ref(),
                );
                self.main = resolved.main;
                self.unassigned = resolved.unassigned;
                self.articles = articles;
                self.loading = false;
                self.error = None;
            }
            Action::SetArticles(articles) => {
                self.articles = articles;
                self.loading = false;
            }
            Action::SetCurrentArticle(id) => {
                self.current_article = id;
            }
            Action::SetLoading(loading) => {
                self.loading = loading;
            }
            Action::SetError(message) => {
                self.error = Some(message);
                self.loading = false;
            }
            Action::ToggleViewMode => {
                self.view_mode = !self.view_mode;
            }
            Action::SetViewMode(mode) => {
                self.view_mode = mode;
            }
            Action::AddStored(id) => {
                if !self.stored_articles.contains(&id) {
                    self.stored_articles.insert(0, id);
                }
            }
            Action::RemoveStored(id) => {
                self.stored_articles.retain(|s| s != &id);
            }
            Action::UpdateArticleLocal(article) => {
                if let Some(slot) = self.articles.iter_mut().find(|a| a.id == article.id) {
                    *slot = article;
                }
            }
            Action::RemoveArticleLocal(id) => {
                self.articles.retain(|a| a.id != id);
                if self.current_article.as_ref() == Some(&id) {
                    self.current_article = self.articles.first().map(|a| a.id.clone());
                }
            }
        }
    }

    /// Look up an article by id.
    pub fn article(&self, id: &ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| &a.id == id)
    }

    /// The currently selected article record, if any.
    pub fn current(&self) -> Option<&Article> {
        self.current_article.as_ref().and_then(|id| self.article(id))
    }
}
