//! Force Simulation Controller
//!
//! Tick-driven position solver over the graph's node set. The alpha
//! ("temperature") schedule drives the idle/active state machine: alpha
//! decays toward `alpha_target` each tick and the simulation idles once it
//! falls below `alpha_min` with no elevated target. Dragging pins a node's
//! position exactly at the pointer, bypassing physics for that node only.

use super::forces::{self, Link};
use crate::article::ArticleId;
use crate::geometry::Vec2;
use crate::graph::{EdgeKind, GraphEdge, GraphNode};
use std::collections::HashMap;

/// Rest distance for parent-tag links.
pub const PARENT_LINK_DISTANCE: f64 = 100.0;
/// Rest distance for part links; shorter so embedded content clusters
/// close to its owner.
pub const PART_LINK_DISTANCE: f64 = 50.0;
/// Many-body charge applied to every node.
pub const CHARGE_STRENGTH: f64 = -300.0;
/// Minimum separation radius; larger than the largest node radius so
/// labels do not overlap.
pub const COLLIDE_RADIUS: f64 = 60.0;

const ALPHA_MIN: f64 = 0.001;
const ALPHA_DECAY: f64 = 0.0228; // 1 - ALPHA_MIN^(1/300)
const VELOCITY_DECAY: f64 = 0.4;
const DRAG_ALPHA_TARGET: f64 = 0.3;

const INITIAL_RADIUS: f64 = 10.0;
const INITIAL_ANGLE: f64 = std::f64::consts::PI * (3.0 - 2.23606797749979); // π(3 − √5)

/// Physics state of a single node.
#[derive(Debug, Clone)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Pinned position while dragging; overrides physics exactly
    pub fx: Option<f64>,
    pub fy: Option<f64>,
}

/// The iterative layout solver.
///
/// An instance is bound to one node/edge set; a rebuilt graph requires a
/// fresh instance (positions do not persist across rebuilds).
pub struct Simulation {
    bodies: Vec<Body>,
    index: HashMap<ArticleId, usize>,
    ids: Vec<ArticleId>,
    links: Vec<Link>,
    center: Vec2,
    alpha: f64,
    alpha_target: f64,
}

impl Simulation {
    /// Create a solver over the given graph, centered on the viewport
    /// midpoint. Nodes start on a phyllotaxis spiral around the center.
    pub fn new(nodes: &[GraphNode], edges: &[GraphEdge], width: f64, height: f64) -> Self {
        let center = Vec2::new(width / 2.0, height / 2.0);
        let mut index = HashMap::with_capacity(nodes.len());
        let mut ids = Vec::with_capacity(nodes.len());
        let bodies = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                index.insert(node.id.clone(), i);
                ids.push(node.id.clone());
                let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
                let angle = i as f64 * INITIAL_ANGLE;
                Body {
                    x: center.x + radius * angle.cos(),
                    y: center.y + radius * angle.sin(),
                    vx: 0.0,
                    vy: 0.0,
                    fx: None,
                    fy: None,
                }
            })
            .collect();

        let mut sim = Self {
            bodies,
            index,
            ids,
            links: Vec::new(),
            center,
            alpha: 1.0,
            alpha_target: 0.0,
        };
        sim.links = sim.build_links(edges);
        sim
    }

    fn build_links(&self, edges: &[GraphEdge]) -> Vec<Link> {
        let mut degree = vec![0usize; self.bodies.len()];
        let mut endpoints = Vec::with_capacity(edges.len());
        for edge in edges {
            let (Some(&s), Some(&t)) = (self.index.get(&edge.source), self.index.get(&edge.target))
            else {
                continue;
            };
            degree[s] += 1;
            degree[t] += 1;
            endpoints.push((s, t, edge.kind));
        }
        endpoints
            .into_iter()
            .map(|(s, t, kind)| Link {
                source: s,
                target: t,
                distance: match kind {
                    EdgeKind::Part => PART_LINK_DISTANCE,
                    EdgeKind::Parent => PARENT_LINK_DISTANCE,
                },
                strength: 1.0 / degree[s].min(degree[t]) as f64,
                bias: degree[s] as f64 / (degree[s] + degree[t]) as f64,
            })
            .collect()
    }

    /// Whether the solver has cooled below the motion threshold.
    pub fn is_idle(&self) -> bool {
        self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha_target(&mut self, target: f64) {
        self.alpha_target = target;
    }

    /// Advance one discrete step. Returns false (and does nothing) when
    /// idle. Never runs concurrently with another tick or a drag mutation;
    /// the caller interleaves both on one thread.
    pub fn tick(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }
        self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;

        forces::link(&mut self.bodies, &self.links, self.alpha);
        forces::many_body(&mut self.bodies, CHARGE_STRENGTH, self.alpha);
        forces::center(&mut self.bodies, self.center.x, self.center.y, 1.0);
        forces::collide(&mut self.bodies, COLLIDE_RADIUS, 1.0);

        for body in &mut self.bodies {
            match (body.fx, body.fy) {
                (Some(fx), Some(fy)) => {
                    body.x = fx;
                    body.y = fy;
                    body.vx = 0.0;
                    body.vy = 0.0;
                }
                _ => {
                    body.vx *= 1.0 - VELOCITY_DECAY;
                    body.vy *= 1.0 - VELOCITY_DECAY;
                    body.x += body.vx;
                    body.y += body.vy;
                }
            }
        }
        true
    }

    /// Pin a node and re-heat toward the drag temperature.
    pub fn drag_start(&mut self, id: &ArticleId) {
        let Some(&i) = self.index.get(id) else { return };
        self.alpha_target = DRAG_ALPHA_TARGET;
        let body = &mut self.bodies[i];
        body.fx = Some(body.x);
        body.fy = Some(body.y);
    }

    /// Move the pin to the pointer position.
    pub fn drag_move(&mut self, id: &ArticleId, x: f64, y: f64) {
        let Some(&i) = self.index.get(id) else { return };
        self.bodies[i].fx = Some(x);
        self.bodies[i].fy = Some(y);
        self.bodies[i].x = x;
        self.bodies[i].y = y;
    }

    /// Release the pin and let the temperature decay back to zero.
    pub fn drag_end(&mut self, id: &ArticleId) {
        let Some(&i) = self.index.get(id) else { return };
        self.alpha_target = 0.0;
        self.bodies[i].fx = None;
        self.bodies[i].fy = None;
    }

    pub fn position(&self, id: &ArticleId) -> Option<Vec2> {
        self.index
            .get(id)
            .map(|&i| Vec2::new(self.bodies[i].x, self.bodies[i].y))
    }

    /// Current positions keyed by article id.
    pub fn positions(&self) -> HashMap<ArticleId, Vec2> {
        self.ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), Vec2::new(self.bodies[i].x, self.bodies[i].y)))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.bodies.len()
    }
}
