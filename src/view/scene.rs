//! Draw-instruction mapping: pure (nodes, positions, selection) → scene
//!
//! The physics step and the draw step are deliberately separate; this
//! module knows nothing about how instructions are rasterized.

use crate::article::ArticleId;
use crate::geometry::{self, CubicBezier, Vec2, ARROW_LENGTH};
use crate::graph::{EdgeKind, GraphEdge, GraphNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAIN_RADIUS: f64 = 25.0;
pub const UNASSIGNED_RADIUS: f64 = 20.0;
pub const NODE_RADIUS: f64 = 15.0;

const MAIN_FILL: &str = "#ff5555";
const UNASSIGNED_FILL: &str = "#ffb86c";
const SELECTED_FILL: &str = "#8be9fd";
const NODE_FILL: &str = "#50fa7b";
const NODE_STROKE: &str = "#282a36";
const SELECTED_STROKE: &str = "#fff";
const LABEL_FILL: &str = "#f8f8f2";
const PARENT_STROKE: &str = "#6272a4";
const PART_STROKE: &str = "#C792EA";
const PART_DASH: &str = "5,5";

/// Circle radius for a node, by kind.
pub fn node_radius(node: &GraphNode) -> f64 {
    if node.is_main {
        MAIN_RADIUS
    } else if node.is_unassigned {
        UNASSIGNED_RADIUS
    } else {
        NODE_RADIUS
    }
}

/// A node circle plus its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawNode {
    pub id: ArticleId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub label: String,
    /// Label offset below the circle center
    pub label_dy: f64,
}

/// Arrowhead placement: tip position plus rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawArrow {
    pub x: f64,
    pub y: f64,
    /// Rotation in radians
    pub angle: f64,
    pub length: f64,
}

/// A shortened curved edge plus its arrowhead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawEdge {
    pub kind: EdgeKind,
    pub path: CubicBezier,
    pub stroke: String,
    pub stroke_width: f64,
    pub dash: Option<String>,
    pub arrow: DrawArrow,
}

/// Everything an external renderer needs for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: Vec<DrawNode>,
    pub edges: Vec<DrawEdge>,
}

/// Map the graph and its current positions to draw instructions.
///
/// Edges whose endpoints have no position (an inconsistency between graph
/// and solver) are skipped rather than drawn at the origin.
pub fn render(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    positions: &HashMap<ArticleId, Vec2>,
    selection: Option<&ArticleId>,
) -> Scene {
    let radii: HashMap<&ArticleId, f64> = nodes.iter().map(|n| (&n.id, node_radius(n))).collect();

    let draw_edges = edges
        .iter()
        .filter_map(|edge| {
            let source = positions.get(&edge.source)?;
            let target = positions.get(&edge.target)?;
            let radius = *radii.get(&edge.target)?;
            let trimmed = geometry::shorten(*source, *target, radius);
            let (stroke, stroke_width, dash) = match edge.kind {
                EdgeKind::Parent => (PARENT_STROKE, 1.5, None),
                EdgeKind::Part => (PART_STROKE, 2.0, Some(PART_DASH.to_string())),
            };
            Some(DrawEdge {
                kind: edge.kind,
                path: trimmed.path,
                stroke: stroke.to_string(),
                stroke_width,
                dash,
                arrow: DrawArrow {
                    x: trimmed.arrow_tip.x,
                    y: trimmed.arrow_tip.y,
                    angle: trimmed.arrow_angle,
                    length: ARROW_LENGTH,
                },
            })
        })
        .collect();

    let draw_nodes = nodes
        .iter()
        .filter_map(|node| {
            let pos = positions.get(&node.id)?;
            let selected = selection == Some(&node.id);
            let fill = if node.is_main {
                MAIN_FILL
            } else if node.is_unassigned {
                UNASSIGNED_FILL
            } else if selected {
                SELECTED_FILL
            } else {
                NODE_FILL
            };
            Some(DrawNode {
                id: node.id.clone(),
                x: pos.x,
                y: pos.y,
                radius: node_radius(node),
                fill: fill.to_string(),
                stroke: if selected { SELECTED_STROKE } else { NODE_STROKE }.to_string(),
                stroke_width: if selected { 3.0 } else { 2.0 },
                label: node.title.clone(),
                label_dy: node_radius(node) + 10.0,
            })
        })
        .collect();

    Scene {
        nodes: draw_nodes,
        edges: draw_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use crate::graph;

    fn positions() -> HashMap<ArticleId, Vec2> {
        [
            (ArticleId::from("a"), Vec2::new(0.0, 0.0)),
            (ArticleId::from("p"), Vec2::new(200.0, 0.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn selection_changes_fill_and_stroke() {
        let articles = vec![Article::new("a", "A"), Article::new("p", "P")];
        let (nodes, edges) = graph::build(&articles);
        let selected = ArticleId::from("a");
        let scene = render(&nodes, &edges, &positions(), Some(&selected));
        let a = scene.nodes.iter().find(|n| n.id == selected).unwrap();
        assert_eq!(a.fill, SELECTED_FILL);
        assert_eq!(a.stroke_width, 3.0);
        let p = &scene.nodes[1];
        assert_eq!(p.fill, NODE_FILL);
    }

    #[test]
    fn sentinel_fill_wins_over_selection() {
        let articles = vec![Article::new("a", "Main").with_summary("#main")];
        let (nodes, _) = graph::build(&articles);
        let pos = [(ArticleId::from("a"), Vec2::new(0.0, 0.0))]
            .into_iter()
            .collect();
        let selected = ArticleId::from("a");
        let scene = render(&nodes, &[], &pos, Some(&selected));
        assert_eq!(scene.nodes[0].fill, MAIN_FILL);
        assert_eq!(scene.nodes[0].radius, MAIN_RADIUS);
    }

    #[test]
    fn part_edges_are_dashed_and_parent_edges_solid() {
        let articles = vec![
            Article::new("a", "A").with_tag("p").with_part("p"),
            Article::new("p", "P"),
        ];
        let (nodes, edges) = graph::build(&articles);
        let scene = render(&nodes, &edges, &positions(), None);
        let parent = scene.edges.iter().find(|e| e.kind == EdgeKind::Parent).unwrap();
        let part = scene.edges.iter().find(|e| e.kind == EdgeKind::Part).unwrap();
        assert!(parent.dash.is_none());
        assert_eq!(part.dash.as_deref(), Some(PART_DASH));
    }

    #[test]
    fn edge_terminates_near_target_boundary() {
        let articles = vec![Article::new("a", "A").with_tag("p"), Article::new("p", "P")];
        let (nodes, edges) = graph::build(&articles);
        let scene = render(&nodes, &edges, &positions(), None);
        let edge = &scene.edges[0];
        let end = Vec2::new(edge.path.p3.x, edge.path.p3.y);
        let dist = end.distance(Vec2::new(200.0, 0.0));
        assert!((dist - NODE_RADIUS).abs() < 1.0);
    }

    #[test]
    fn edges_without_positions_are_skipped() {
        let articles = vec![Article::new("a", "A").with_tag("p"), Article::new("p", "P")];
        let (nodes, edges) = graph::build(&articles);
        let only_a: HashMap<ArticleId, Vec2> = [(ArticleId::from("a"), Vec2::default())]
            .into_iter()
            .collect();
        let scene = render(&nodes, &edges, &only_a, None);
        assert!(scene.edges.is_empty());
        assert_eq!(scene.nodes.len(), 1);
    }
}
