//! Article and Topic records, plus legacy-shape normalization

use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary marker for the graph's entry-point article.
pub const MAIN_SENTINEL: &str = "#main";

/// Summary marker for the orphan bucket article.
pub const UNASSIGNED_SENTINEL: &str = "#unassigned";

/// Unique identifier for an article.
///
/// Ids are assigned by the persistence collaborator and treated as opaque
/// strings on this side of the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a legacy child reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChildKind {
    /// Navigable child article
    Link,
    /// Article embedded inline within the owner's content
    Part,
}

/// Legacy dual representation of an outgoing relation.
///
/// Superseded by `tags` (parent links, stored on the child) and `parts`
/// (embedded articles, stored on the owner). Still present on existing
/// records and tolerated on read; folded into the new shape at load time
/// by [`normalize_collection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRef {
    pub id: ArticleId,
    #[serde(rename = "type", default = "default_child_kind")]
    pub kind: ChildKind,
}

impl ChildRef {
    pub fn link(id: impl Into<ArticleId>) -> Self {
        Self {
            id: id.into(),
            kind: ChildKind::Link,
        }
    }

    pub fn part(id: impl Into<ArticleId>) -> Self {
        Self {
            id: id.into(),
            kind: ChildKind::Part,
        }
    }
}

fn default_child_kind() -> ChildKind {
    ChildKind::Link
}

fn default_read_list() -> Vec<String> {
    vec!["all".to_string()]
}

/// The sole persisted content entity.
///
/// `tags` point from child to parent, the opposite direction of a
/// containment tree. `parts` list articles rendered inline within this
/// article's content. Both normalize to empty collections when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(alias = "_id")]
    pub id: ArticleId,
    pub title: String,
    /// Ids of parent articles (child -> parent references)
    #[serde(default)]
    pub tags: Vec<ArticleId>,
    /// Ordered ids of articles embedded inline in this article's content
    #[serde(default)]
    pub parts: Vec<ArticleId>,
    /// Legacy relation list; read, never required to be written
    #[serde(default)]
    pub childs: Vec<ChildRef>,
    /// Free text; carries the `#main` / `#unassigned` sentinels
    #[serde(default)]
    pub summary: String,
    /// Article body (opaque markup, rendered externally)
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub art_no: i64,
    #[serde(default)]
    pub shortname: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub write_list: Vec<String>,
    #[serde(default = "default_read_list")]
    pub read_list: Vec<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Article {
    /// Create an article with the given id and title.
    pub fn new(id: impl Into<ArticleId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags: Vec::new(),
            parts: Vec::new(),
            childs: Vec::new(),
            summary: String::new(),
            description: String::new(),
            art_no: 0,
            shortname: String::new(),
            name: String::new(),
            write_list: Vec::new(),
            read_list: default_read_list(),
            created_at: Some(chrono::Utc::now()),
            updated_at: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_tag(mut self, parent: impl Into<ArticleId>) -> Self {
        self.tags.push(parent.into());
        self
    }

    pub fn with_part(mut self, part: impl Into<ArticleId>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn with_child(mut self, child: ChildRef) -> Self {
        self.childs.push(child);
        self
    }

    /// Whether this is the graph entry-point sentinel.
    pub fn is_main(&self) -> bool {
        self.summary == MAIN_SENTINEL
    }

    /// Whether this is the orphan bucket sentinel.
    pub fn is_unassigned(&self) -> bool {
        self.summary == UNASSIGNED_SENTINEL
    }

    pub fn is_sentinel(&self) -> bool {
        self.is_main() || self.is_unassigned()
    }

    /// A non-sentinel article with no parent tag.
    pub fn is_orphan(&self) -> bool {
        !self.is_sentinel() && self.tags.is_empty()
    }
}

/// Auxiliary taxonomy record; not required by the resolver's invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_tags: Vec<String>,
}

/// Fold legacy `childs` entries into the authoritative `tags`/`parts` shape.
///
/// A LINK child of parent P means the child gains `P.id` in its `tags`;
/// a PART child means P gains the child's id in its `parts`. Entries are
/// deduplicated and references to absent articles are skipped. Runs once
/// at load time so all downstream components see one shape.
pub fn normalize_collection(articles: &mut [Article]) {
    let mut pending_tags: Vec<(ArticleId, ArticleId)> = Vec::new(); // (child, parent)
    let mut pending_parts: Vec<(ArticleId, ArticleId)> = Vec::new(); // (owner, part)

    for article in articles.iter() {
        for child in &article.childs {
            match child.kind {
                ChildKind::Link => {
                    pending_tags.push((child.id.clone(), article.id.clone()));
                }
                ChildKind::Part => {
                    pending_parts.push((article.id.clone(), child.id.clone()));
                }
            }
        }
    }

    let mut folded = 0usize;
    let mut skipped = 0usize;

    for (child_id, parent_id) in pending_tags {
        match articles.iter_mut().find(|a| a.id == child_id) {
            Some(child) => {
                if !child.tags.contains(&parent_id) {
                    child.tags.push(parent_id);
                    folded += 1;
                }
            }
            None => skipped += 1,
        }
    }

    for (owner_id, part_id) in pending_parts {
        if !articles.iter().any(|a| a.id == part_id) {
            skipped += 1;
            continue;
        }
        if let Some(owner) = articles.iter_mut().find(|a| a.id == owner_id) {
            if !owner.parts.contains(&part_id) {
                owner.parts.push(part_id);
                folded += 1;
            }
        }
    }

    if folded > 0 || skipped > 0 {
        tracing::debug!(folded, skipped, "normalized legacy child references");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_childs_fold_into_child_tags() {
        let mut articles = vec![
            Article::new("p", "Parent").with_child(ChildRef::link("c")),
            Article::new("c", "Child"),
        ];
        normalize_collection(&mut articles);
        assert_eq!(articles[1].tags, vec![ArticleId::from("p")]);
    }

    #[test]
    fn part_childs_fold_into_owner_parts() {
        let mut articles = vec![
            Article::new("p", "Owner").with_child(ChildRef::part("c")),
            Article::new("c", "Embedded"),
        ];
        normalize_collection(&mut articles);
        assert_eq!(articles[0].parts, vec![ArticleId::from("c")]);
    }

    #[test]
    fn normalization_is_idempotent() {
        let mut articles = vec![
            Article::new("p", "Parent")
                .with_child(ChildRef::link("c"))
                .with_child(ChildRef::part("e")),
            Article::new("c", "Child").with_tag("p"),
            Article::new("e", "Embedded"),
        ];
        normalize_collection(&mut articles);
        let once = articles.clone();
        normalize_collection(&mut articles);
        assert_eq!(articles, once);
    }

    #[test]
    fn dangling_child_references_are_skipped() {
        let mut articles = vec![Article::new("p", "Parent")
            .with_child(ChildRef::link("ghost"))
            .with_child(ChildRef::part("ghost"))];
        normalize_collection(&mut articles);
        assert!(articles[0].parts.is_empty());
    }

    #[test]
    fn orphan_requires_empty_tags_and_no_sentinel() {
        assert!(Article::new("a", "A").is_orphan());
        assert!(!Article::new("a", "A").with_tag("p").is_orphan());
        assert!(!Article::new("a", "A").with_summary(MAIN_SENTINEL).is_orphan());
        assert!(!Article::new("a", "A")
            .with_summary(UNASSIGNED_SENTINEL)
            .is_orphan());
    }
}
