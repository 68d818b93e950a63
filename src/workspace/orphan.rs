//! Orphan candidate scan for the `#unassigned` bucket

use crate::article::{Article, ArticleId};

/// Articles eligible for automatic assignment to the bucket: not the bucket
/// itself, no tags at all, and not a sentinel.
///
/// Running the scan after an assignment pass yields an empty set, since
/// every previously matched article now carries the bucket tag.
pub fn orphan_candidates(articles: &[Article], bucket: &ArticleId) -> Vec<ArticleId> {
    articles
        .iter()
        .filter(|a| {
            &a.id != bucket && a.tags.is_empty() && !a.is_sentinel()
        })
        .map(|a| a.id.clone())
        .collect()
}
