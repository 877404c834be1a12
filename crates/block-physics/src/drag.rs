//! Mouse-drag constraint
//!
//! A soft spring between the pointer and the point of a body that was under the
//! pointer when it was pressed. The spring is applied as an impulse before each
//! step, so it goes through the regular solver like any other force.

use crate::constants::DRAG_STIFFNESS;
use glam::Vec2;
use rapier2d::prelude::RigidBodyHandle;

/// A body currently held by the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grab {
    pub body: RigidBodyHandle,
    /// Grabbed point in the body's local frame
    pub local_anchor: Vec2,
}

/// Pointer state and the body it holds
#[derive(Clone, Debug)]
pub struct MouseDrag {
    pub stiffness: f32,
    pointer: Vec2,
    grab: Option<Grab>,
}

impl Default for MouseDrag {
    fn default() -> Self {
        Self {
            stiffness: DRAG_STIFFNESS,
            pointer: Vec2::ZERO,
            grab: None,
        }
    }
}

impl MouseDrag {
    pub fn move_to(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    pub fn hold(&mut self, grab: Grab) {
        self.grab = Some(grab);
    }

    pub fn release(&mut self) -> Option<Grab> {
        self.grab.take()
    }

    pub fn grab(&self) -> Option<Grab> {
        self.grab
    }

    /// Velocity change pulling `anchor` toward the pointer over one step of `dt` seconds
    pub fn correction(&self, anchor: Vec2, constraint_iterations: u32, dt: f32) -> Vec2 {
        if dt <= 0.0 {
            return Vec2::ZERO;
        }
        (self.pointer - anchor) * self.stiffness * constraint_iterations as f32 / dt
    }
}
