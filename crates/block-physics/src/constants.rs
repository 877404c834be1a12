//! Physical constants for the block world
//!
//! The world is measured in canvas pixels with y pointing down. Gravity and
//! time are expressed the way the settings panel presents them (px/ms² and
//! milliseconds) and converted when handed to rapier.

/// Nominal duration of one simulation step, in milliseconds
pub const NOMINAL_STEP_MS: f32 = 16.0;

/// Converts a gravity vector in px/ms² into px/s²
pub const GRAVITY_UNIT: f32 = 1_000_000.0;

/// Base constraint passes per step at time scale 1
pub const BASE_CONSTRAINT_ITERATIONS: f32 = 2.0;

/// Base position passes per step at time scale 1
pub const BASE_POSITION_ITERATIONS: f32 = 6.0;

/// Base velocity passes per step at time scale 1
pub const BASE_VELOCITY_ITERATIONS: f32 = 4.0;

/// Reference step rate air friction is defined against (one 16 ms frame)
pub const AIR_FRICTION_RATE: f32 = 60.0;

/// Upper bound for the damping derived from air friction.
/// Air friction of 1 would otherwise map to infinite damping.
pub const MAX_AIR_DAMPING: f32 = 1_000.0;

/// Bodies slower than this (px/s) count as resting and use static friction
pub const RESTING_SPEED: f32 = 5.0;

/// Mass per square pixel
pub const BLOCK_DENSITY: f32 = 1.0;

/// Characteristic length of the scene (one block edge), used to scale
/// rapier's internal tolerances to pixel units
pub const LENGTH_UNIT: f32 = 30.0;

/// Stiffness of the mouse-drag spring (fraction of the error corrected per pass)
pub const DRAG_STIFFNESS: f32 = 0.01;
