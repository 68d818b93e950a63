//! Force-directed layout for the article graph
//!
//! A `Simulation` owns the physics state for one node/edge set and advances
//! one discrete step per animation tick. The four composed forces live in
//! `forces`; their constants mirror the graph view's visual tuning.

mod forces;
mod simulation;

pub use simulation::{
    Body, Simulation, CHARGE_STRENGTH, COLLIDE_RADIUS, PARENT_LINK_DISTANCE, PART_LINK_DISTANCE,
};
