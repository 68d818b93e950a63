//! Interaction layer: selection, pan/zoom, drag, and the pointer contract

use super::scene::{self, node_radius, Scene};
use crate::article::{Article, ArticleId};
use crate::geometry::Vec2;
use crate::graph::{self, GraphEdge, GraphNode};
use crate::layout::Simulation;
use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 4.0;

/// The affine view transform applied to the whole drawn scene, independent
/// of the physics coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub translate: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::default(),
        }
    }
}

impl Viewport {
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.translate
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.translate) * (1.0 / self.scale)
    }

    /// Scale about a fixed pointer position so the point under the cursor
    /// stays put. The resulting scale is clamped to [MIN_SCALE, MAX_SCALE].
    pub fn zoom_about(&mut self, pointer: Vec2, factor: f64) {
        let clamped = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let applied = clamped / self.scale;
        self.translate = pointer + (self.translate - pointer) * applied;
        self.scale = clamped;
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.translate = self.translate + delta;
    }
}

/// Command emitted back to the host when an interaction leaves the graph
/// view's own scope.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Double-click: open the article in the document view
    OpenArticle(ArticleId),
}

/// Owns the graph projection, the physics solver, and the interaction
/// state for one graph view instance.
pub struct GraphController {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    simulation: Simulation,
    selection: Option<ArticleId>,
    viewport: Viewport,
    width: f64,
    height: f64,
}

impl GraphController {
    pub fn new(articles: &[Article], width: f64, height: f64) -> Self {
        let (nodes, edges) = graph::build(articles);
        let simulation = Simulation::new(&nodes, &edges, width, height);
        Self {
            nodes,
            edges,
            simulation,
            selection: None,
            viewport: Viewport::default(),
            width,
            height,
        }
    }

    /// Replace the node/edge set. The old solver is discarded with all its
    /// pending motion; the selection survives if the article still exists.
    pub fn rebuild(&mut self, articles: &[Article]) {
        let (nodes, edges) = graph::build(articles);
        self.simulation = Simulation::new(&nodes, &edges, self.width, self.height);
        self.nodes = nodes;
        self.edges = edges;
        if let Some(sel) = &self.selection {
            if !self.nodes.iter().any(|n| &n.id == sel) {
                self.selection = None;
            }
        }
    }

    /// Resize the viewport; positions restart from scratch, as with any
    /// change of input dimensions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.simulation = Simulation::new(&self.nodes, &self.edges, width, height);
    }

    /// Advance the physics one step. Returns false once settled.
    pub fn tick(&mut self) -> bool {
        self.simulation.tick()
    }

    /// Current frame as draw instructions.
    pub fn scene(&self) -> Scene {
        scene::render(
            &self.nodes,
            &self.edges,
            &self.simulation.positions(),
            self.selection.as_ref(),
        )
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn selection(&self) -> Option<&ArticleId> {
        self.selection.as_ref()
    }

    pub fn is_settled(&self) -> bool {
        self.simulation.is_idle()
    }

    // --- Pointer contract ---

    pub fn on_node_click(&mut self, id: &ArticleId) {
        if self.nodes.iter().any(|n| &n.id == id) {
            self.selection = Some(id.clone());
        }
    }

    pub fn on_node_double_click(&mut self, id: &ArticleId) -> Option<ViewEvent> {
        if self.nodes.iter().any(|n| &n.id == id) {
            self.selection = Some(id.clone());
            Some(ViewEvent::OpenArticle(id.clone()))
        } else {
            None
        }
    }

    pub fn on_drag_start(&mut self, id: &ArticleId) {
        self.simulation.drag_start(id);
    }

    pub fn on_drag_move(&mut self, id: &ArticleId, x: f64, y: f64) {
        self.simulation.drag_move(id, x, y);
    }

    pub fn on_drag_end(&mut self, id: &ArticleId) {
        self.simulation.drag_end(id);
    }

    pub fn on_zoom(&mut self, factor: f64, pointer: Vec2) {
        self.viewport.zoom_about(pointer, factor);
    }

    pub fn on_pan(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
    }

    /// Find the topmost node under a screen position, if any.
    pub fn hit_test(&self, screen: Vec2) -> Option<ArticleId> {
        let world = self.viewport.screen_to_world(screen);
        self.nodes.iter().rev().find_map(|node| {
            let pos = self.simulation.position(&node.id)?;
            (pos.distance(world) <= node_radius(node)).then(|| node.id.clone())
        })
    }
}
