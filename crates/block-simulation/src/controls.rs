//! Settings panel layout, independent of any widget toolkit
//!
//! Each control binds a label and bounds to a getter/setter pair on
//! [`Settings`]. The UI layer only has to turn these into widgets.

use crate::settings::Settings;

/// A bounded slider over one numeric setting
#[derive(Clone, Copy)]
pub struct NumericControl {
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub get: fn(&Settings) -> f32,
    pub set: fn(&mut Settings, f32),
}

impl NumericControl {
    pub fn read(&self, settings: &Settings) -> f32 {
        (self.get)(settings)
    }

    /// Clamp `value` to the bounds, snap it to the step grid, and store it
    pub fn write(&self, settings: &mut Settings, value: f32) {
        (self.set)(settings, self.constrain(value));
    }

    pub fn constrain(&self, value: f32) -> f32 {
        let value = if value.is_nan() { self.min } else { value };
        let snapped = if self.step > 0.0 {
            let steps = ((value - self.min) / self.step).round();
            self.min + steps * self.step
        } else {
            value
        };
        snapped.clamp(self.min, self.max)
    }
}

/// A button that runs an action on the settings
#[derive(Clone, Copy)]
pub struct ActionControl {
    pub label: &'static str,
    pub action: fn(&mut Settings),
}

impl ActionControl {
    pub fn trigger(&self, settings: &mut Settings) {
        (self.action)(settings);
    }
}

#[derive(Clone, Copy)]
pub enum Control {
    Numeric(NumericControl),
    Action(ActionControl),
}

impl Control {
    pub fn label(&self) -> &'static str {
        match self {
            Control::Numeric(control) => control.label,
            Control::Action(control) => control.label,
        }
    }
}

/// A collapsible group of controls
#[derive(Clone)]
pub struct Section {
    pub title: &'static str,
    /// Whether the group starts expanded
    pub open: bool,
    pub controls: Vec<Control>,
}

fn numeric(
    label: &'static str,
    min: f32,
    max: f32,
    step: f32,
    get: fn(&Settings) -> f32,
    set: fn(&mut Settings, f32),
) -> Control {
    Control::Numeric(NumericControl {
        label,
        min,
        max,
        step,
        get,
        set,
    })
}

/// The three panel sections: body properties, gravity, and time
pub fn settings_panel() -> Vec<Section> {
    vec![
        Section {
            title: "Body Properties",
            open: true,
            controls: vec![
                numeric(
                    "Friction: How much does it slow down during collisions?",
                    0.0,
                    1.0,
                    0.01,
                    |s| s.material.friction_normal,
                    |s, v| s.material.friction_normal = v,
                ),
                numeric(
                    "Air Friction: How much does it slow down during flight?",
                    0.0,
                    1.0,
                    0.01,
                    |s| s.material.friction_air,
                    |s, v| s.material.friction_air = v,
                ),
                numeric(
                    "Static Friction: How much does it slow down over time?",
                    0.0,
                    10.0,
                    0.01,
                    |s| s.material.friction_static,
                    |s, v| s.material.friction_static = v,
                ),
                numeric(
                    "Restitution: How many times & how high can it bounce?",
                    0.0,
                    1.0,
                    0.01,
                    |s| s.material.restitution,
                    |s, v| s.material.restitution = v,
                ),
                numeric(
                    "Intensity: How bright does it glow? ( Warning: Laggy! )",
                    0.0,
                    30.0,
                    1.0,
                    |s| s.material.glow_intensity,
                    |s, v| s.material.glow_intensity = v,
                ),
            ],
        },
        Section {
            title: "Gravity",
            open: true,
            controls: vec![
                numeric(
                    "Strength: How strong is the gravity in this simulation?",
                    0.0,
                    0.01,
                    0.0001,
                    |s| s.simulation.gravity.scale,
                    |s, v| s.simulation.gravity.scale = v,
                ),
                numeric(
                    "X: Which direction, if any, should horizontal gravity pull?",
                    -1.0,
                    1.0,
                    0.01,
                    |s| s.simulation.gravity.x,
                    |s, v| s.simulation.gravity.x = v,
                ),
                numeric(
                    "Y: Which direction, if any, should vertical gravity pull?",
                    -1.0,
                    1.0,
                    0.01,
                    |s| s.simulation.gravity.y,
                    |s, v| s.simulation.gravity.y = v,
                ),
            ],
        },
        Section {
            title: "Time",
            open: true,
            controls: vec![
                numeric(
                    "Scale: How slowly does time move in this simulation?",
                    0.1,
                    1.0,
                    0.01,
                    |s| s.simulation.time_scale,
                    |s, v| s.simulation.time_scale = v,
                ),
                Control::Action(ActionControl {
                    label: "Freeze: Should time move at all in this simulation?",
                    action: Settings::toggle_freeze,
                }),
            ],
        },
    ]
}
