//! Simulation configuration
//!
//! [`SimulationConfig`] is the single source of truth for every input the
//! learner can change. It is replaced wholesale on each update: controls send
//! a [`ConfigPatch`] naming only the fields they touch, and the patch is merged
//! field by field over the current snapshot.

use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::error::ConfigError;

/// Incline angle in degrees
pub const ANGLE_RANGE: RangeInclusive<u32> = 0..=90;
/// Block mass in kg
pub const MASS_RANGE: RangeInclusive<f32> = 5.0..=50.0;
/// Coefficient of friction
pub const MU_RANGE: RangeInclusive<f32> = 0.0..=1.0;
/// Manually set tension and push in N
pub const FORCE_RANGE: RangeInclusive<f32> = 0.0..=200.0;
/// Angle between the external force and the incline surface, in degrees
pub const EXTERNAL_ANGLE_RANGE: RangeInclusive<f32> = 0.0..=90.0;
/// Hanging mass in the pulley scenario, in kg
pub const PULLEY_MASS_RANGE: RangeInclusive<f32> = 0.0..=50.0;

/// Direction the block is on the verge of moving along the slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionDirection {
    /// No impending motion, friction is not computed
    #[default]
    None,
    /// Impending motion up the slope, friction acts down-slope
    Up,
    /// Impending motion down the slope, friction acts up-slope
    Down,
}

impl MotionDirection {
    pub fn label(self) -> &'static str {
        match self {
            MotionDirection::None => "No Friction",
            MotionDirection::Up => "Impending Motion Up-Slope",
            MotionDirection::Down => "Impending Motion Down-Slope",
        }
    }
}

/// Force configuration mode. Selects which auxiliary force is computed
/// rather than taken from the manual controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Manual tension and push
    #[default]
    Basic,
    /// Push replaced by an angled external force
    ExternalForce,
    /// Tension replaced by the weight of a hanging mass
    Pulley,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Basic, Scenario::ExternalForce, Scenario::Pulley];

    pub fn label(self) -> &'static str {
        match self {
            Scenario::Basic => "Basic",
            Scenario::ExternalForce => "External Force",
            Scenario::Pulley => "Pulley",
        }
    }
}

/// Immutable snapshot of every simulation input
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Incline angle in whole degrees
    pub angle: u32,
    pub mass: f32,
    pub mu: f32,
    pub tension: f32,
    pub push: f32,
    pub show_mass: bool,
    pub show_tension: bool,
    pub show_push: bool,
    pub motion_direction: MotionDirection,
    pub show_equations: bool,
    pub scenario: Scenario,
    pub external_force_magnitude: f32,
    /// Degrees between the external force and the slope; the normal
    /// component presses into the surface
    pub external_force_angle: f32,
    pub pulley_mass: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            angle: 0,
            mass: 10.0,
            mu: 0.3,
            tension: 0.0,
            push: 0.0,
            show_mass: false,
            show_tension: false,
            show_push: false,
            motion_direction: MotionDirection::None,
            show_equations: false,
            scenario: Scenario::Basic,
            external_force_magnitude: 20.0,
            external_force_angle: 30.0,
            pulley_mass: 5.0,
        }
    }
}

impl SimulationConfig {
    /// Return a new snapshot with `patch` merged over this one
    pub fn with_patch(&self, patch: &ConfigPatch) -> Self {
        let mut next = self.clone();
        patch.merge_into(&mut next);
        next
    }

    /// Whether a tension acts: the pulley always pulls, the manual rope only
    /// counts while shown and is unavailable under an external force.
    pub fn tension_in_play(&self) -> bool {
        match self.scenario {
            Scenario::Basic => self.show_tension,
            Scenario::ExternalForce => false,
            Scenario::Pulley => true,
        }
    }
}

/// A partial update naming only the recognised simulation fields.
///
/// Field names follow the control layer's camelCase keys; unknown keys are
/// rejected when a patch is deserialised.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ConfigPatch {
    pub angle: Option<u32>,
    pub mass: Option<f32>,
    pub mu: Option<f32>,
    pub tension: Option<f32>,
    pub push: Option<f32>,
    pub show_mass: Option<bool>,
    pub show_tension: Option<bool>,
    pub show_push: Option<bool>,
    pub motion_direction: Option<MotionDirection>,
    pub show_equations: Option<bool>,
    pub scenario: Option<Scenario>,
    pub external_force_magnitude: Option<f32>,
    pub external_force_angle: Option<f32>,
    pub pulley_mass: Option<f32>,
}

impl ConfigPatch {
    /// Parse a patch from TOML, rejecting unknown keys
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let patch: ConfigPatch = toml::from_str(source).map_err(|err| {
            match unknown_field_name(err.message()) {
                Some(field) => ConfigError::UnknownField(field),
                None => ConfigError::Parse(err),
            }
        })?;
        patch.validate()?;
        Ok(patch)
    }

    pub fn angle(angle: u32) -> Self {
        Self {
            angle: Some(angle),
            ..Self::default()
        }
    }

    pub fn motion(direction: MotionDirection) -> Self {
        Self {
            motion_direction: Some(direction),
            ..Self::default()
        }
    }

    pub fn scenario(scenario: Scenario) -> Self {
        Self {
            scenario: Some(scenario),
            ..Self::default()
        }
    }

    /// True when the patch names no field at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check every present value against its control's domain
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(angle) = self.angle {
            if !ANGLE_RANGE.contains(&angle) {
                return Err(ConfigError::OutOfRange {
                    field: "angle",
                    value: angle as f32,
                    min: *ANGLE_RANGE.start() as f32,
                    max: *ANGLE_RANGE.end() as f32,
                });
            }
        }
        check("mass", self.mass, &MASS_RANGE)?;
        check("mu", self.mu, &MU_RANGE)?;
        check("tension", self.tension, &FORCE_RANGE)?;
        check("push", self.push, &FORCE_RANGE)?;
        check("externalForceMagnitude", self.external_force_magnitude, &FORCE_RANGE)?;
        check("externalForceAngle", self.external_force_angle, &EXTERNAL_ANGLE_RANGE)?;
        check("pulleyMass", self.pulley_mass, &PULLEY_MASS_RANGE)?;
        Ok(())
    }

    /// Overwrite the fields of `config` this patch names
    pub fn merge_into(&self, config: &mut SimulationConfig) {
        if let Some(v) = self.angle {
            config.angle = v;
        }
        if let Some(v) = self.mass {
            config.mass = v;
        }
        if let Some(v) = self.mu {
            config.mu = v;
        }
        if let Some(v) = self.tension {
            config.tension = v;
        }
        if let Some(v) = self.push {
            config.push = v;
        }
        if let Some(v) = self.show_mass {
            config.show_mass = v;
        }
        if let Some(v) = self.show_tension {
            config.show_tension = v;
        }
        if let Some(v) = self.show_push {
            config.show_push = v;
        }
        if let Some(v) = self.motion_direction {
            config.motion_direction = v;
        }
        if let Some(v) = self.show_equations {
            config.show_equations = v;
        }
        if let Some(v) = self.scenario {
            config.scenario = v;
        }
        if let Some(v) = self.external_force_magnitude {
            config.external_force_magnitude = v;
        }
        if let Some(v) = self.external_force_angle {
            config.external_force_angle = v;
        }
        if let Some(v) = self.pulley_mass {
            config.pulley_mass = v;
        }
    }
}

fn check(
    field: &'static str,
    value: Option<f32>,
    range: &RangeInclusive<f32>,
) -> Result<(), ConfigError> {
    match value {
        Some(v) if !range.contains(&v) => Err(ConfigError::OutOfRange {
            field,
            value: v,
            min: *range.start(),
            max: *range.end(),
        }),
        _ => Ok(()),
    }
}

// serde reports unknown keys as "unknown field `name`, expected one of ..."
fn unknown_field_name(message: &str) -> Option<String> {
    let rest = message.strip_prefix("unknown field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}
