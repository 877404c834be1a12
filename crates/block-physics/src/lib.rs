//! # Block Physics
//!
//! Thin wrapper around `rapier2d` exposing the handful of operations the block
//! stacks demo needs: rectangle bodies, per-body materials, world gravity,
//! solver iteration counts, stepping in milliseconds, and a mouse-drag constraint.

pub mod constants;
pub mod drag;
pub mod material;
pub mod world;

pub use constants::*;
pub use drag::*;
pub use material::*;
pub use world::*;
