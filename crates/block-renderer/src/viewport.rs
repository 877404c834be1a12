//! Pixel-space viewport for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Viewport uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct ViewportUniform {
    pub size: [f32; 2],
    pub _padding: [f32; 2],
}

/// Maps canvas pixels (origin top-left, y down) onto the render target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    /// Normalized device coordinates of a pixel position (same math as the shader)
    #[cfg(test)]
    pub fn to_ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.width * 2.0 - 1.0,
            1.0 - pixel.y / self.height * 2.0,
        )
    }

    pub fn to_uniform(&self) -> ViewportUniform {
        ViewportUniform {
            size: [self.width, self.height],
            _padding: [0.0; 2],
        }
    }
}
