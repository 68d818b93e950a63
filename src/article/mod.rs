//! Core article data model and relationship resolution

mod record;
mod resolver;

#[cfg(test)]
mod tests;

pub use record::{
    normalize_collection, Article, ArticleId, ChildKind, ChildRef, Topic, MAIN_SENTINEL,
    UNASSIGNED_SENTINEL,
};
pub use resolver::{parents_of, resolve, select_current, ResolvedCollection};
