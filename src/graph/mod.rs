//! Graph Builder: projects the article collection into nodes and edges

use crate::article::{Article, ArticleId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Visual kind of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Tag reference, child -> parent
    Parent,
    /// Embedded content, owner -> embedded article
    Part,
}

/// One node per article, regardless of connectivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: ArticleId,
    pub title: String,
    pub is_main: bool,
    pub is_unassigned: bool,
}

/// A directed edge. Parent edges follow the tag reference literally:
/// source is the tagged (child) article, target is the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: ArticleId,
    pub target: ArticleId,
    pub kind: EdgeKind,
}

/// Build the visual graph. Pure: no filtering of disconnected nodes, no
/// deduplication of parallel edges. Edges whose target id resolves to no
/// article are silently skipped.
pub fn build(articles: &[Article]) -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let nodes: Vec<GraphNode> = articles
        .iter()
        .map(|a| GraphNode {
            id: a.id.clone(),
            title: a.title.clone(),
            is_main: a.is_main(),
            is_unassigned: a.is_unassigned(),
        })
        .collect();

    let known: HashSet<&ArticleId> = nodes.iter().map(|n| &n.id).collect();
    let mut skipped = 0usize;
    let mut edges: Vec<GraphEdge> = Vec::new();

    for article in articles {
        for parent in &article.tags {
            if known.contains(parent) {
                edges.push(GraphEdge {
                    source: article.id.clone(),
                    target: parent.clone(),
                    kind: EdgeKind::Parent,
                });
            } else {
                skipped += 1;
            }
        }
    }
    for article in articles {
        for part in &article.parts {
            if known.contains(part) {
                edges.push(GraphEdge {
                    source: article.id.clone(),
                    target: part.clone(),
                    kind: EdgeKind::Part,
                });
            } else {
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "dropped edges with unresolved endpoints");
    }

    (nodes, edges)
}
