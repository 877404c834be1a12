//! Runtime-tunable simulation settings

use block_physics::{BodyMaterial, Gravity};

/// Air friction forced onto every body while frozen (fully damped)
pub const FROZEN_FRICTION_AIR: f32 = 1.0;

/// Time scale while frozen. Kept above zero so iteration counts stay finite.
pub const FROZEN_TIME_SCALE: f32 = 0.1;

/// Material stamped onto every block each frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialSettings {
    pub friction_normal: f32,
    pub friction_air: f32,
    pub friction_static: f32,
    pub restitution: f32,
    /// Glow radius in pixels
    pub glow_intensity: f32,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            friction_normal: 0.1,
            friction_air: 0.01,
            friction_static: 0.5,
            restitution: 0.0,
            glow_intensity: 0.0,
        }
    }
}

impl MaterialSettings {
    pub fn body_material(&self) -> BodyMaterial {
        BodyMaterial {
            friction: self.friction_normal,
            friction_air: self.friction_air,
            friction_static: self.friction_static,
            restitution: self.restitution,
        }
    }
}

/// Whether time is frozen. `Frozen` holds the values to restore.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FreezeState {
    Running,
    Frozen { friction_air: f32, time_scale: f32 },
}

/// World-wide gravity and time settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationSettings {
    pub gravity: Gravity,
    pub time_scale: f32,
    pub freeze: FreezeState,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            gravity: Gravity::default(),
            time_scale: 1.0,
            freeze: FreezeState::Running,
        }
    }
}

/// Everything the settings panel can change
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Settings {
    pub material: MaterialSettings,
    pub simulation: SimulationSettings,
}

impl Settings {
    pub fn is_frozen(&self) -> bool {
        matches!(self.simulation.freeze, FreezeState::Frozen { .. })
    }

    /// Freeze or unfreeze time.
    ///
    /// Freezing snapshots air friction and time scale before overwriting them;
    /// unfreezing puts the snapshot back.
    pub fn toggle_freeze(&mut self) {
        match self.simulation.freeze {
            FreezeState::Running => {
                self.simulation.freeze = FreezeState::Frozen {
                    friction_air: self.material.friction_air,
                    time_scale: self.simulation.time_scale,
                };
                self.material.friction_air = FROZEN_FRICTION_AIR;
                self.simulation.time_scale = FROZEN_TIME_SCALE;
                log::debug!("time frozen");
            }
            FreezeState::Frozen {
                friction_air,
                time_scale,
            } => {
                self.simulation.freeze = FreezeState::Running;
                self.material.friction_air = friction_air;
                self.simulation.time_scale = time_scale;
                log::debug!(
                    "time resumed (air friction {:.2}, time scale {:.2})",
                    friction_air,
                    time_scale
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.material.friction_normal, 0.1);
        assert_eq!(settings.material.friction_air, 0.01);
        assert_eq!(settings.material.friction_static, 0.5);
        assert_eq!(settings.material.restitution, 0.0);
        assert_eq!(settings.simulation.time_scale, 1.0);
        assert_eq!(settings.simulation.gravity.y, 1.0);
        assert!(!settings.is_frozen());
    }

    #[test]
    fn test_freeze_damps_and_slows() {
        let mut settings = Settings::default();
        settings.toggle_freeze();

        assert!(settings.is_frozen());
        assert_eq!(settings.material.friction_air, FROZEN_FRICTION_AIR);
        assert_eq!(settings.simulation.time_scale, FROZEN_TIME_SCALE);
    }

    #[test]
    fn test_double_toggle_restores_exact_values() {
        for (air, time) in [(0.0, 0.1), (0.01, 1.0), (0.37, 0.42), (1.0, 0.73)] {
            let mut settings = Settings::default();
            settings.material.friction_air = air;
            settings.simulation.time_scale = time;

            settings.toggle_freeze();
            settings.toggle_freeze();

            assert!(!settings.is_frozen());
            assert_eq!(settings.material.friction_air, air);
            assert_eq!(settings.simulation.time_scale, time);
        }
    }

    #[test]
    fn test_edits_while_frozen_are_discarded_on_resume() {
        let mut settings = Settings::default();
        settings.toggle_freeze();
        settings.simulation.time_scale = 0.5;
        settings.toggle_freeze();

        assert_eq!(settings.simulation.time_scale, 1.0);
    }

    #[test]
    fn test_repeated_cycles_keep_snapshot() {
        let mut settings = Settings::default();
        settings.material.friction_air = 0.25;

        for _ in 0..5 {
            settings.toggle_freeze();
            settings.toggle_freeze();
        }

        assert_eq!(settings.material.friction_air, 0.25);
        assert_eq!(settings.simulation.time_scale, 1.0);
    }

    #[test]
    fn test_body_material_mapping() {
        let material = MaterialSettings {
            friction_normal: 0.3,
            friction_air: 0.2,
            friction_static: 4.0,
            restitution: 0.8,
            glow_intensity: 10.0,
        };
        let body = material.body_material();
        assert_eq!(body.friction, 0.3);
        assert_eq!(body.friction_air, 0.2);
        assert_eq!(body.friction_static, 4.0);
        assert_eq!(body.restitution, 0.8);
    }
}
