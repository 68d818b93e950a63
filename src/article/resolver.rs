//! Relationship Resolver: derives a consistent parent/child/orphan view
//! from the flat article collection.

use super::record::{Article, ArticleId, ChildRef};

/// The resolved relationship view of a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedCollection {
    /// The `#main` entry point, if present (first match wins)
    pub main: Option<ArticleId>,
    /// The `#unassigned` bucket, if present (first match wins)
    pub unassigned: Option<ArticleId>,
    /// Non-sentinel articles with no parent, in collection order
    pub orphans: Vec<ArticleId>,
}

/// Resolve sentinels and orphan-bucket membership.
///
/// Materializes a `childs` list on the unassigned bucket (one LINK ref per
/// orphan, excluding the sentinels themselves) for legacy consumers. The
/// pass is pure over its input and idempotent: re-running with unchanged
/// input yields the same bucket membership.
///
/// Expects a collection already passed through
/// [`normalize_collection`](super::normalize_collection).
pub fn resolve(articles: &mut [Article]) -> ResolvedCollection {
    let main = first_sentinel(articles, Article::is_main, "#main");
    let unassigned = first_sentinel(articles, Article::is_unassigned, "#unassigned");

    let orphans: Vec<ArticleId> = articles
        .iter()
        .filter(|a| !a.is_sentinel() && !has_parent(a, articles, unassigned.as_ref()))
        .map(|a| a.id.clone())
        .collect();

    if let Some(bucket_id) = &unassigned {
        let childs: Vec<ChildRef> = orphans.iter().cloned().map(ChildRef::link).collect();
        if let Some(bucket) = articles.iter_mut().find(|a| &a.id == bucket_id) {
            bucket.childs = childs;
        }
    }

    tracing::debug!(
        articles = articles.len(),
        orphans = orphans.len(),
        has_main = main.is_some(),
        has_unassigned = unassigned.is_some(),
        "resolved article collection"
    );

    ResolvedCollection {
        main,
        unassigned,
        orphans,
    }
}

fn first_sentinel(
    articles: &[Article],
    pred: impl Fn(&Article) -> bool,
    marker: &str,
) -> Option<ArticleId> {
    let mut matches = articles.iter().filter(|a| pred(a));
    let first = matches.next().map(|a| a.id.clone());
    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(marker, extra, "duplicate sentinel articles; using first match");
    }
    first
}

/// Whether some relation gives this article a parent: its own tags, or a
/// legacy child reference from another article. Child refs held by the
/// unassigned bucket don't count; the bucket's `childs` list is this pass's
/// own output, so treating it as a parent relation would flip the orphan
/// set on every other run.
fn has_parent(article: &Article, articles: &[Article], bucket: Option<&ArticleId>) -> bool {
    if !article.tags.is_empty() {
        return true;
    }
    articles.iter().any(|other| {
        Some(&other.id) != bucket && other.childs.iter().any(|c| c.id == article.id)
    })
}

/// Pick the current article on (re)load: the previous selection if still
/// present, else the main sentinel, else the first article, else none.
pub fn select_current(
    previous: Option<&ArticleId>,
    articles: &[Article],
    main: Option<&ArticleId>,
) -> Option<ArticleId> {
    if let Some(prev) = previous {
        if articles.iter().any(|a| &a.id == prev) {
            return Some(prev.clone());
        }
    }
    main.cloned()
        .or_else(|| articles.first().map(|a| a.id.clone()))
}

/// The parent articles of `article`: every article whose id appears in
/// `article.tags`. Tag orientation (child -> parent) is preserved exactly.
pub fn parents_of<'a>(article: &Article, articles: &'a [Article]) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|p| article.tags.contains(&p.id))
        .collect()
}
