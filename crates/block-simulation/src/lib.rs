//! # Block Simulation
//!
//! Block stacks scene, live-tweakable settings, and the per-frame loop that
//! keeps the physics world in sync with them.

pub mod body;
pub mod controls;
pub mod scene;
pub mod settings;
pub mod simulation;

pub use body::*;
pub use controls::*;
pub use scene::*;
pub use settings::*;
pub use simulation::*;
