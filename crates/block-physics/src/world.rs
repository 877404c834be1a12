//! Rapier-backed physics world
//!
//! Everything outside this module talks in `glam` vectors, canvas pixels, and
//! milliseconds; conversion to nalgebra and seconds happens here.

use crate::constants::*;
use crate::drag::{Grab, MouseDrag};
use crate::material::{BodyMaterial, Gravity, SolverIterations};
use glam::Vec2;
use rapier2d::prelude::*;
use std::collections::HashMap;
use std::num::NonZeroUsize;

fn to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn from_na(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Non-owning reference to a body stored in a [`PhysicsWorld`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(RigidBodyHandle);

/// Options forwarded to the rectangle factory
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyOptions {
    pub is_static: bool,
    /// Initial rotation in radians
    pub angle: f32,
    /// Initial material; defaults to [`BodyMaterial::default`]
    pub material: Option<BodyMaterial>,
}

impl BodyOptions {
    pub fn fixed() -> Self {
        Self {
            is_static: true,
            ..Default::default()
        }
    }
}

/// A rectangle body that has not been added to a world yet
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangleDesc {
    pub center: Vec2,
    pub size: Vec2,
    pub options: BodyOptions,
}

impl RectangleDesc {
    pub fn new(x: f32, y: f32, width: f32, height: f32, options: BodyOptions) -> Self {
        Self {
            center: Vec2::new(x, y),
            size: Vec2::new(width, height),
            options,
        }
    }
}

/// Material values as currently written on a body's rapier collider and damping
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppliedMaterial {
    pub friction: f32,
    pub restitution: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

/// Position and rotation of a body after the last step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    pub angle: f32,
}

/// Physics world holding every body, gravity, and the drag constraint
pub struct PhysicsWorld {
    gravity: Gravity,
    iterations: SolverIterations,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    materials: HashMap<BodyHandle, BodyMaterial>,
    drag: MouseDrag,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.length_unit = LENGTH_UNIT;
        integration_parameters.dt = NOMINAL_STEP_MS / 1000.0;

        let mut world = Self {
            gravity: Gravity::default(),
            iterations: SolverIterations::default(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            materials: HashMap::new(),
            drag: MouseDrag::default(),
        };
        world.set_iterations(SolverIterations::default());
        world
    }

    /// Insert a batch of rectangles, returning their handles in order
    pub fn add_rectangles(
        &mut self,
        rectangles: impl IntoIterator<Item = RectangleDesc>,
    ) -> Vec<BodyHandle> {
        let handles: Vec<BodyHandle> = rectangles
            .into_iter()
            .map(|desc| self.insert_rectangle(&desc))
            .collect();

        log::debug!(
            "added {} bodies ({} total)",
            handles.len(),
            self.bodies.len()
        );
        handles
    }

    fn insert_rectangle(&mut self, desc: &RectangleDesc) -> BodyHandle {
        let material = desc.options.material.unwrap_or_default();
        let damping = material.air_damping();

        let builder = if desc.options.is_static {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let rigid_body = builder
            .translation(to_na(desc.center))
            .rotation(desc.options.angle)
            .linear_damping(damping)
            .angular_damping(damping)
            .build();
        let body_handle = self.bodies.insert(rigid_body);

        let collider = ColliderBuilder::cuboid(desc.size.x * 0.5, desc.size.y * 0.5)
            .density(BLOCK_DENSITY)
            .friction(material.friction)
            .restitution(material.restitution)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .build();
        self.colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies);

        let handle = BodyHandle(body_handle);
        self.materials.insert(handle, material);
        handle
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    pub fn is_static(&self, handle: BodyHandle) -> Option<bool> {
        self.bodies.get(handle.0).map(|rb| rb.is_fixed())
    }

    pub fn body_state(&self, handle: BodyHandle) -> Option<BodyState> {
        self.bodies.get(handle.0).map(|rb| BodyState {
            position: from_na(rb.translation()),
            angle: rb.rotation().angle(),
        })
    }

    pub fn material(&self, handle: BodyHandle) -> Option<BodyMaterial> {
        self.materials.get(&handle).copied()
    }

    /// What rapier actually holds for the body, read back from the engine
    pub fn applied_material(&self, handle: BodyHandle) -> Option<AppliedMaterial> {
        let rigid_body = self.bodies.get(handle.0)?;
        let collider = self.colliders.get(*rigid_body.colliders().first()?)?;

        Some(AppliedMaterial {
            friction: collider.friction(),
            restitution: collider.restitution(),
            linear_damping: rigid_body.linear_damping(),
            angular_damping: rigid_body.angular_damping(),
        })
    }

    /// Write a material onto a body's collider and damping
    pub fn set_material(&mut self, handle: BodyHandle, material: BodyMaterial) {
        let Some(rigid_body) = self.bodies.get_mut(handle.0) else {
            log::warn!("set_material on missing body {:?}", handle);
            return;
        };

        let damping = material.air_damping();
        rigid_body.set_linear_damping(damping);
        rigid_body.set_angular_damping(damping);

        let friction = material.effective_friction(rigid_body.linvel().norm());
        for collider_handle in rigid_body.colliders() {
            if let Some(collider) = self.colliders.get_mut(*collider_handle) {
                collider.set_friction(friction);
                collider.set_restitution(material.restitution);
            }
        }

        self.materials.insert(handle, material);
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Gravity) {
        self.gravity = gravity;
    }

    pub fn iterations(&self) -> SolverIterations {
        self.iterations
    }

    pub fn set_iterations(&mut self, iterations: SolverIterations) {
        self.iterations = iterations;

        // Stabilization passes stay at rapier's default; position passes become substeps
        let substeps = iterations.velocity.max(iterations.position) as usize;
        let params = &mut self.integration_parameters;
        params.num_solver_iterations = NonZeroUsize::new(substeps).unwrap_or(NonZeroUsize::MIN);
        params.num_internal_pgs_iterations = iterations.constraint.max(1) as usize;
    }

    /// Advance the simulation by `delta_ms` milliseconds
    pub fn step(&mut self, delta_ms: f32) {
        let dt = delta_ms / 1000.0;
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;

        self.apply_drag(dt);

        let gravity = to_na(self.gravity.acceleration());
        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Topmost dynamic body containing `point`, if any
    pub fn body_at(&self, point: Vec2) -> Option<BodyHandle> {
        let point = point![point.x, point.y];

        // Later insertions are drawn on top
        self.colliders
            .iter()
            .filter(|(_, collider)| {
                collider
                    .shape()
                    .contains_point(collider.position(), &point)
            })
            .filter_map(|(_, collider)| collider.parent())
            .filter(|body| self.bodies.get(*body).is_some_and(|rb| rb.is_dynamic()))
            .max_by_key(|body| body.into_raw_parts().0)
            .map(BodyHandle)
    }

    pub fn pointer_moved(&mut self, pointer: Vec2) {
        self.drag.move_to(pointer);
    }

    /// Grab the body under the pointer; returns it when something was picked
    pub fn pointer_pressed(&mut self, pointer: Vec2) -> Option<BodyHandle> {
        self.drag.move_to(pointer);

        let handle = self.body_at(pointer)?;
        let rigid_body = self.bodies.get_mut(handle.0)?;
        let local = rigid_body
            .position()
            .inverse_transform_point(&point![pointer.x, pointer.y]);
        rigid_body.wake_up(true);

        self.drag.hold(Grab {
            body: handle.0,
            local_anchor: Vec2::new(local.x, local.y),
        });
        log::debug!("grabbed body {:?}", handle);
        Some(handle)
    }

    pub fn pointer_released(&mut self) {
        if let Some(grab) = self.drag.release() {
            log::debug!("released body {:?}", BodyHandle(grab.body));
        }
    }

    #[cfg(test)]
    pub fn dragged(&self) -> Option<BodyHandle> {
        self.drag.grab().map(|grab| BodyHandle(grab.body))
    }

    fn apply_drag(&mut self, dt: f32) {
        let Some(grab) = self.drag.grab() else {
            return;
        };
        let Some(rigid_body) = self.bodies.get_mut(grab.body) else {
            self.drag.release();
            return;
        };

        let anchor = rigid_body.position() * point![grab.local_anchor.x, grab.local_anchor.y];
        let correction = self.drag.correction(
            Vec2::new(anchor.x, anchor.y),
            self.iterations.constraint,
            dt,
        );
        let impulse = to_na(correction * rigid_body.mass());
        rigid_body.apply_impulse_at_point(impulse, anchor, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_floor() -> (PhysicsWorld, BodyHandle) {
        let mut world = PhysicsWorld::new();
        let floor = world.add_rectangles([RectangleDesc::new(
            400.0,
            1100.0,
            2000.0,
            200.0,
            BodyOptions::fixed(),
        )]);
        (world, floor[0])
    }

    #[test]
    fn test_batch_insert_preserves_order() {
        let mut world = PhysicsWorld::new();
        let handles = world.add_rectangles([
            RectangleDesc::new(10.0, 20.0, 30.0, 30.0, BodyOptions::default()),
            RectangleDesc::new(50.0, 60.0, 30.0, 30.0, BodyOptions::fixed()),
        ]);

        assert_eq!(world.body_count(), 2);
        assert_eq!(handles.len(), 2);
        assert_eq!(
            world.body_state(handles[0]).map(|s| s.position),
            Some(Vec2::new(10.0, 20.0))
        );
        assert_eq!(world.is_static(handles[0]), Some(false));
        assert_eq!(world.is_static(handles[1]), Some(true));
    }

    #[test]
    fn test_gravity_pulls_dynamic_body_down() {
        let (mut world, _) = world_with_floor();
        let block = world.add_rectangles([RectangleDesc::new(
            400.0,
            100.0,
            30.0,
            30.0,
            BodyOptions::default(),
        )])[0];

        let start = world.body_state(block).unwrap().position;
        for _ in 0..10 {
            world.step(NOMINAL_STEP_MS);
        }
        let end = world.body_state(block).unwrap().position;

        assert!(
            end.y > start.y,
            "block should fall: {} -> {}",
            start.y,
            end.y
        );
        assert!((end.x - start.x).abs() < 1e-3);
    }

    #[test]
    fn test_static_body_does_not_move() {
        let (mut world, floor) = world_with_floor();
        let start = world.body_state(floor).unwrap();
        for _ in 0..10 {
            world.step(NOMINAL_STEP_MS);
        }
        assert_eq!(world.body_state(floor).unwrap(), start);
    }

    #[test]
    fn test_sideways_gravity() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Gravity {
            x: -1.0,
            y: 0.0,
            scale: 0.001,
        });
        let block = world.add_rectangles([RectangleDesc::new(
            400.0,
            100.0,
            30.0,
            30.0,
            BodyOptions::default(),
        )])[0];

        world.step(NOMINAL_STEP_MS);
        let state = world.body_state(block).unwrap();
        assert!(state.position.x < 400.0);
        assert!((state.position.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_set_material_is_recorded() {
        let mut world = PhysicsWorld::new();
        let block = world.add_rectangles([RectangleDesc::new(
            0.0,
            0.0,
            30.0,
            30.0,
            BodyOptions::default(),
        )])[0];
        assert_eq!(world.material(block), Some(BodyMaterial::default()));

        let material = BodyMaterial {
            friction: 0.7,
            friction_air: 0.2,
            friction_static: 3.0,
            restitution: 0.9,
        };
        world.set_material(block, material);
        assert_eq!(world.material(block), Some(material));
    }

    #[test]
    fn test_zero_delta_is_a_no_op() {
        let mut world = PhysicsWorld::new();
        let block = world.add_rectangles([RectangleDesc::new(
            0.0,
            0.0,
            30.0,
            30.0,
            BodyOptions::default(),
        )])[0];
        world.step(0.0);
        assert_eq!(world.body_state(block).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn test_iterations_are_stored() {
        let mut world = PhysicsWorld::new();
        let iterations = SolverIterations::for_time_scale(0.5);
        world.set_iterations(iterations);
        assert_eq!(world.iterations(), iterations);
    }

    #[test]
    fn test_position_passes_leave_stabilization_alone() {
        let mut world = PhysicsWorld::new();
        let default_stabilization =
            IntegrationParameters::default().num_internal_stabilization_iterations;

        world.set_iterations(SolverIterations::for_time_scale(0.1));

        let params = &world.integration_parameters;
        assert_eq!(
            params.num_internal_stabilization_iterations,
            default_stabilization
        );
        assert_eq!(params.num_solver_iterations.get(), 60);
        assert_eq!(params.num_internal_pgs_iterations, 20);
    }

    #[test]
    fn test_set_material_reaches_rapier() {
        let mut world = PhysicsWorld::new();
        let block = world.add_rectangles([RectangleDesc::new(
            0.0,
            0.0,
            30.0,
            30.0,
            BodyOptions::default(),
        )])[0];
        let material = BodyMaterial {
            friction: 0.4,
            friction_air: 0.2,
            friction_static: 2.0,
            restitution: 0.6,
        };

        world.set_material(block, material);

        let applied = world.applied_material(block).unwrap();
        assert_eq!(applied.restitution, 0.6);
        assert_eq!(applied.linear_damping, material.air_damping());
        assert_eq!(applied.angular_damping, material.air_damping());
        // At rest, so static friction applies
        assert_eq!(applied.friction, material.effective_friction(0.0));
    }

    #[test]
    fn test_moving_body_gets_plain_friction() {
        let mut world = PhysicsWorld::new();
        let block = world.add_rectangles([RectangleDesc::new(
            400.0,
            100.0,
            30.0,
            30.0,
            BodyOptions::default(),
        )])[0];
        for _ in 0..10 {
            world.step(NOMINAL_STEP_MS);
        }
        let material = BodyMaterial::default();

        world.set_material(block, material);

        let applied = world.applied_material(block).unwrap();
        assert_eq!(applied.friction, material.friction);
        assert!(applied.friction < material.effective_friction(0.0));
    }

    #[test]
    fn test_pointer_grabs_only_dynamic_bodies() {
        let (mut world, _) = world_with_floor();
        let block = world.add_rectangles([RectangleDesc::new(
            400.0,
            100.0,
            30.0,
            30.0,
            BodyOptions::default(),
        )])[0];

        // Floor is static
        assert_eq!(world.pointer_pressed(Vec2::new(400.0, 1100.0)), None);
        // Empty space
        assert_eq!(world.pointer_pressed(Vec2::new(10.0, 10.0)), None);

        assert_eq!(world.pointer_pressed(Vec2::new(405.0, 95.0)), Some(block));
        assert_eq!(world.dragged(), Some(block));

        world.pointer_released();
        assert_eq!(world.dragged(), None);
    }

    #[test]
    fn test_drag_pulls_body_toward_pointer() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Gravity {
            scale: 0.0,
            ..Default::default()
        });
        let block = world.add_rectangles([RectangleDesc::new(
            100.0,
            100.0,
            30.0,
            30.0,
            BodyOptions::default(),
        )])[0];

        world.pointer_pressed(Vec2::new(100.0, 100.0));
        world.pointer_moved(Vec2::new(300.0, 100.0));
        for _ in 0..5 {
            world.step(NOMINAL_STEP_MS);
        }

        let state = world.body_state(block).unwrap();
        assert!(state.position.x > 100.0);
    }
}
