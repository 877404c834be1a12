//! Per-body materials, world gravity, and solver iteration counts

use crate::constants::*;
use glam::Vec2;

/// Surface and air properties written onto a rigid body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyMaterial {
    /// Sliding friction against other bodies
    pub friction: f32,
    /// Velocity lost per nominal step while in flight (0 = none, 1 = all)
    pub friction_air: f32,
    /// Extra friction applied while a body is at rest, as a multiplier on `friction`
    pub friction_static: f32,
    /// Bounciness
    pub restitution: f32,
}

impl Default for BodyMaterial {
    fn default() -> Self {
        Self {
            friction: 0.1,
            friction_air: 0.01,
            friction_static: 0.5,
            restitution: 0.0,
        }
    }
}

impl BodyMaterial {
    /// Linear/angular damping coefficient equivalent to `friction_air`.
    ///
    /// Rapier scales velocity by `1 / (1 + dt * damping)` each step; this picks
    /// the damping that keeps `1 - friction_air` of the velocity over one
    /// nominal 16 ms step.
    pub fn air_damping(&self) -> f32 {
        let air = self.friction_air.clamp(0.0, 1.0);
        if air >= 1.0 {
            return MAX_AIR_DAMPING;
        }
        (AIR_FRICTION_RATE * air / (1.0 - air)).min(MAX_AIR_DAMPING)
    }

    /// Collider friction for a body moving at `speed` px/s
    pub fn effective_friction(&self, speed: f32) -> f32 {
        if speed < RESTING_SPEED {
            self.friction * (1.0 + self.friction_static.max(0.0))
        } else {
            self.friction
        }
    }
}

/// World gravity: a direction scaled by a strength, in px/ms²
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 1.0,
            scale: 0.001,
        }
    }
}

impl Gravity {
    /// Acceleration in px/s²
    pub fn acceleration(&self) -> Vec2 {
        Vec2::new(self.x, self.y) * self.scale * GRAVITY_UNIT
    }
}

/// Solver passes per step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverIterations {
    pub constraint: u32,
    pub position: u32,
    pub velocity: u32,
}

impl Default for SolverIterations {
    fn default() -> Self {
        Self::for_time_scale(1.0)
    }
}

impl SolverIterations {
    /// Iteration counts for a given time scale.
    ///
    /// Slowing time down makes each step cover a smaller displacement, so the
    /// base counts are divided by the scale and rounded (never below 1).
    pub fn for_time_scale(time_scale: f32) -> Self {
        let scaled = |base: f32| -> u32 {
            if time_scale > 0.0 {
                ((base / time_scale).round() as u32).max(1)
            } else {
                1
            }
        };

        Self {
            constraint: scaled(BASE_CONSTRAINT_ITERATIONS),
            position: scaled(BASE_POSITION_ITERATIONS),
            velocity: scaled(BASE_VELOCITY_ITERATIONS),
        }
    }
}
