//! # Block Renderer
//!
//! A 2D canvas with scoped paint state, and the wgpu pipeline that draws what
//! it records.

pub mod canvas;
pub mod color;
pub mod renderer;
pub mod viewport;

pub use canvas::*;
pub use color::*;
pub use renderer::*;
pub use viewport::*;
