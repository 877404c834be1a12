//! CPU-side 2D canvas
//!
//! Mirrors the immediate-mode canvas model: a current transform plus fill and
//! shadow styles, with `save`/`restore` pushing and popping that state. Filled
//! rectangles are recorded as [`RectInstance`]s which the [`crate::BlockRenderer`]
//! uploads once per frame.

use crate::color::Color;
use glam::{Affine2, Vec2};
use std::ops::{Deref, DerefMut};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanvasError {
    #[error("canvas has zero area ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },
}

/// Transform and style applied to subsequent fills
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintState {
    pub transform: Affine2,
    pub fill: Color,
    pub shadow_color: Color,
    /// Glow radius in pixels (0 = no glow)
    pub shadow_blur: f32,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            fill: Color::new(0.0, 0.0, 0.0, 1.0),
            shadow_color: Color::transparent(),
            shadow_blur: 0.0,
        }
    }
}

/// Instance data for one filled, possibly rotated rectangle.
///
/// The fragment shader evaluates a box SDF in the rectangle's local frame, so
/// the glow halo follows rotation for free.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RectInstance {
    /// Center in canvas pixels
    pub center: [f32; 2],
    /// Half-size in local units
    pub half_size: [f32; 2],
    /// Local x and y axes in canvas pixels (columns of the linear transform)
    pub axes: [f32; 4],
    /// Fill color (linear RGBA)
    pub fill: [f32; 4],
    /// Glow color (linear RGBA)
    pub glow_color: [f32; 4],
    /// Glow radius in pixels
    pub glow_radius: f32,
    /// Padding for 16-byte alignment
    pub _padding: [f32; 3],
}

impl RectInstance {
    /// Vertex buffer layout for instance attributes
    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        const F32X2: wgpu::BufferAddress = std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress;
        const F32X4: wgpu::BufferAddress = std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress;
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
            // center: vec2<f32> at location 1
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
            // half_size: vec2<f32> at location 2
            wgpu::VertexAttribute {
                offset: F32X2,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
            // axes: vec4<f32> at location 3
            wgpu::VertexAttribute {
                offset: F32X2 * 2,
                shader_location: 3,
                format: wgpu::VertexFormat::Float32x4,
            },
            // fill: vec4<f32> at location 4
            wgpu::VertexAttribute {
                offset: F32X2 * 2 + F32X4,
                shader_location: 4,
                format: wgpu::VertexFormat::Float32x4,
            },
            // glow_color: vec4<f32> at location 5
            wgpu::VertexAttribute {
                offset: F32X2 * 2 + F32X4 * 2,
                shader_location: 5,
                format: wgpu::VertexFormat::Float32x4,
            },
            // glow_radius: f32 at location 6
            wgpu::VertexAttribute {
                offset: F32X2 * 2 + F32X4 * 3,
                shader_location: 6,
                format: wgpu::VertexFormat::Float32,
            },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: ATTRIBUTES,
        }
    }
}

/// A fixed-size drawing surface that records rectangle fills
pub struct Canvas {
    clear_color: Color,
    state: PaintState,
    saved: Vec<PaintState>,
    instances: Vec<RectInstance>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::ZeroSize { width, height });
        }

        Ok(Self {
            clear_color: Color::transparent(),
            state: PaintState::default(),
            saved: Vec::new(),
            instances: Vec::new(),
        })
    }

    /// Wipe everything recorded so far and fill the whole canvas with `color`
    pub fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.instances.clear();
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn state(&self) -> &PaintState {
        &self.state
    }

    pub fn instances(&self) -> &[RectInstance] {
        &self.instances
    }

    pub fn set_fill(&mut self, color: Color) {
        self.state.fill = color;
    }

    pub fn set_shadow(&mut self, color: Color, blur: f32) {
        self.state.shadow_color = color;
        self.state.shadow_blur = blur.max(0.0);
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform * Affine2::from_translation(offset);
    }

    pub fn rotate(&mut self, angle: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(angle);
    }

    /// Push the current paint state; it is restored when the returned scope drops
    pub fn save(&mut self) -> CanvasScope<'_> {
        self.saved.push(self.state);
        CanvasScope { canvas: self }
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    /// Fill an axis-aligned rectangle in the current local frame
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if self.state.fill.is_transparent() && self.state.shadow_color.is_transparent() {
            return;
        }

        let half = Vec2::new(width, height) * 0.5;
        let center = self
            .state
            .transform
            .transform_point2(Vec2::new(x, y) + half);
        let axes = self.state.transform.matrix2;
        let glow_radius = if self.state.shadow_color.is_transparent() {
            0.0
        } else {
            self.state.shadow_blur
        };

        self.instances.push(RectInstance {
            center: center.to_array(),
            half_size: half.abs().to_array(),
            axes: [axes.x_axis.x, axes.x_axis.y, axes.y_axis.x, axes.y_axis.y],
            fill: self.state.fill.to_array(),
            glow_color: self.state.shadow_color.to_array(),
            glow_radius,
            _padding: [0.0; 3],
        });
    }
}

/// Saved canvas state; restores the canvas when dropped
pub struct CanvasScope<'a> {
    canvas: &'a mut Canvas,
}

impl Deref for CanvasScope<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for CanvasScope<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for CanvasScope<'_> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}
