//! Lattice: a personal knowledge graph of interlinked articles
//!
//! Articles reference each other through parent tags and embedded parts;
//! Lattice resolves that flat, denormalized collection into a consistent
//! hierarchy and lays it out as an explorable node-link graph.
//!
//! # Core Concepts
//!
//! - **Articles**: atomic content units; `tags` point child → parent,
//!   `parts` embed other articles inline
//! - **Sentinels**: one `#main` article marks the graph entry point, one
//!   `#unassigned` bucket collects articles with no parent
//! - **Graph view**: a force-directed layout with curved, boundary-trimmed
//!   edges, emitted as renderer-agnostic draw instructions
//!
//! # Example
//!
//! ```
//! use lattice::article::Article;
//! use lattice::view::GraphController;
//!
//! let articles = vec![
//!     Article::new("main", "Home").with_summary("#main"),
//!     Article::new("note", "A note").with_tag("main"),
//! ];
//! let mut view = GraphController::new(&articles, 800.0, 600.0);
//! while view.tick() {}
//! let scene = view.scene();
//! assert_eq!(scene.nodes.len(), 2);
//! ```

pub mod article;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod store;
pub mod view;
pub mod workspace;

pub use article::{Article, ArticleId, ResolvedCollection, Topic};
pub use graph::{EdgeKind, GraphEdge, GraphNode};
pub use layout::Simulation;
pub use store::{ArticleStore, MemoryStore, NewArticle, StoreError, StoreResult};
pub use view::{GraphController, Scene, ViewEvent};
pub use workspace::{Workspace, WorkspaceError, WorkspaceState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
