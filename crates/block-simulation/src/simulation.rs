//! Per-frame orchestration
//!
//! Each tick pushes the current [`Settings`] into every body and into the world,
//! draws the bodies, and then steps physics. Drawing happens before the step, so
//! a frame shows the state produced by the previous tick.

use crate::body::Body;
use crate::scene::{build_scene, Scene};
use crate::settings::Settings;
use block_physics::{PhysicsWorld, SolverIterations, NOMINAL_STEP_MS};
use block_renderer::{Canvas, BACKGROUND};
use glam::Vec2;
use rand::Rng;

/// Owns the physics world, the drawable bodies, and the live settings
pub struct BlockSimulation {
    world: PhysicsWorld,
    bodies: Vec<Body>,
    settings: Settings,
}

impl BlockSimulation {
    /// Build the default scene for a `width` x `height` canvas
    pub fn new(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let mut world = PhysicsWorld::new();
        let scene = build_scene(&mut world, width, height, rng);
        Self::from_scene(world, scene)
    }

    /// Run an already populated world
    pub fn from_scene(world: PhysicsWorld, scene: Scene) -> Self {
        Self {
            world,
            bodies: scene.bodies,
            settings: Settings::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advance one frame: sync settings, draw, then step by `16 * time_scale` ms
    pub fn tick(&mut self, canvas: &mut Canvas) {
        canvas.clear(BACKGROUND);

        let material = self.settings.material.body_material();
        let glow = self.settings.material.glow_intensity;
        for body in &self.bodies {
            self.world.set_material(body.handle, material);
            body.draw(&self.world, canvas, glow);
        }

        let time_scale = self.settings.simulation.time_scale;
        self.world.set_gravity(self.settings.simulation.gravity);
        self.world
            .set_iterations(SolverIterations::for_time_scale(time_scale));
        self.world.step(NOMINAL_STEP_MS * time_scale);
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.world.pointer_moved(position);
    }

    pub fn pointer_pressed(&mut self, position: Vec2) {
        self.world.pointer_pressed(position);
    }

    pub fn pointer_released(&mut self) {
        self.world.pointer_released();
    }
}
