//! Graph view boundary: draw instructions and the interaction layer

mod controller;
mod scene;

pub use controller::{GraphController, ViewEvent, Viewport, MAX_SCALE, MIN_SCALE};
pub use scene::{
    node_radius, render, DrawArrow, DrawEdge, DrawNode, Scene, MAIN_RADIUS, NODE_RADIUS,
    UNASSIGNED_RADIUS,
};
