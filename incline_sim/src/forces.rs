//! Force resolution for a block resting on an incline
//!
//! A static model: every force is resolved into the incline-local frame
//! (x' along the slope, y' perpendicular to it) from the current
//! [`SimulationConfig`]. Nothing is cached; callers recompute on every read.

use crate::constants::G;
use crate::simulation::{MotionDirection, Scenario, SimulationConfig};

/// Force magnitudes derived from a configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedForces {
    /// Mg
    pub weight: f32,
    /// R_N, never negative
    pub normal_force: f32,
    /// Mg·sin(θ), acting down the slope
    pub weight_parallel: f32,
    /// Mg·cos(θ), acting into the slope
    pub weight_perpendicular: f32,
    /// μ·R_N magnitude, zero without impending motion
    pub friction: f32,
    /// Effective tension after scenario overrides and visibility gating
    pub tension: f32,
    /// Effective push after scenario overrides and visibility gating
    pub push: f32,
    /// Push component along the slope (up-slope positive)
    pub push_parallel: f32,
    /// Push component into the slope
    pub push_perpendicular: f32,
    pub angle_rad: f32,
    /// Angle between the push and the slope
    pub push_angle_rad: f32,
}

impl DerivedForces {
    /// Largest magnitude among the forces a diagram may draw
    pub fn max_magnitude(&self) -> f32 {
        [
            self.weight,
            self.normal_force,
            self.friction,
            self.tension,
            self.push,
        ]
        .into_iter()
        .fold(0.0, f32::max)
    }

    /// Net force along the slope, up-slope positive, with friction opposing
    /// the impending motion.
    pub fn net_parallel(&self, motion: MotionDirection) -> f32 {
        let friction = match motion {
            MotionDirection::None => 0.0,
            MotionDirection::Up => -self.friction,
            MotionDirection::Down => self.friction,
        };
        self.tension + self.push_parallel - self.weight_parallel + friction
    }
}

/// Resolve every force for `config`.
///
/// The scenario is the single dispatch point for the auxiliary forces:
/// - `Basic`: tension and push come from the manual controls, each only while
///   shown; a plain push is horizontal, so it meets the slope at θ
/// - `ExternalForce`: push is the external force at α above the slope; the
///   manual tension control is unavailable, so no tension acts
/// - `Pulley`: tension is the hanging mass's weight; the manual push control
///   is unavailable, so no push acts
pub fn resolve_forces(config: &SimulationConfig) -> DerivedForces {
    let angle_rad = (config.angle as f32).to_radians();
    let weight = config.mass * G;

    let gated = |shown: bool, value: f32| if shown { value } else { 0.0 };

    let (tension, push, push_angle_rad) = match config.scenario {
        Scenario::Basic => (
            gated(config.show_tension, config.tension),
            gated(config.show_push, config.push),
            angle_rad,
        ),
        Scenario::ExternalForce => (
            0.0,
            config.external_force_magnitude,
            config.external_force_angle.to_radians(),
        ),
        Scenario::Pulley => (config.pulley_mass * G, 0.0, angle_rad),
    };

    let push_perpendicular = push * push_angle_rad.sin();
    let push_parallel = push * push_angle_rad.cos();

    let weight_parallel = weight * angle_rad.sin();
    let weight_perpendicular = weight * angle_rad.cos();

    // A block cannot be pulled through the surface
    let normal_force = (weight_perpendicular + push_perpendicular).max(0.0);

    let friction = match config.motion_direction {
        MotionDirection::None => 0.0,
        MotionDirection::Up | MotionDirection::Down => config.mu * normal_force,
    };

    DerivedForces {
        weight,
        normal_force,
        weight_parallel,
        weight_perpendicular,
        friction,
        tension,
        push,
        push_parallel,
        push_perpendicular,
        angle_rad,
        push_angle_rad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn incline_30() -> SimulationConfig {
        SimulationConfig {
            angle: 30,
            mass: 10.0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn flat_surface_normal_equals_weight() {
        let forces = resolve_forces(&SimulationConfig::default());
        assert!(approx(forces.weight, 98.0));
        assert!(approx(forces.normal_force, 98.0));
        assert!(approx(forces.weight_parallel, 0.0));
        assert_eq!(forces.friction, 0.0);
    }

    #[test]
    fn thirty_degree_incline() {
        let forces = resolve_forces(&incline_30());
        assert!(approx(forces.weight, 98.0));
        assert!(approx(forces.weight_perpendicular, 84.870_49));
        assert!(approx(forces.weight_parallel, 49.0));
        assert!(approx(forces.normal_force, 84.870_49));
        assert_eq!(forces.friction, 0.0);
    }

    #[test]
    fn friction_with_impending_motion() {
        let config = SimulationConfig {
            motion_direction: MotionDirection::Up,
            mu: 0.3,
            ..incline_30()
        };
        let forces = resolve_forces(&config);
        assert!(approx(forces.friction, 25.461_15));

        let down = SimulationConfig {
            motion_direction: MotionDirection::Down,
            ..config
        };
        assert!(approx(resolve_forces(&down).friction, forces.friction));
    }

    #[test]
    fn hidden_manual_forces_do_not_contribute() {
        let config = SimulationConfig {
            tension: 50.0,
            push: 40.0,
            ..incline_30()
        };
        let forces = resolve_forces(&config);
        assert_eq!(forces.tension, 0.0);
        assert_eq!(forces.push, 0.0);

        let shown = SimulationConfig {
            show_tension: true,
            show_push: true,
            ..config
        };
        let forces = resolve_forces(&shown);
        assert_eq!(forces.tension, 50.0);
        assert_eq!(forces.push, 40.0);
    }

    #[test]
    fn basic_push_is_horizontal() {
        let config = SimulationConfig {
            show_push: true,
            push: 20.0,
            ..incline_30()
        };
        let forces = resolve_forces(&config);
        assert!(approx(forces.push_angle_rad, forces.angle_rad));
        assert!(approx(forces.push_parallel, 20.0 * 30f32.to_radians().cos()));
        assert!(approx(forces.push_perpendicular, 10.0));
        assert!(approx(forces.normal_force, 84.870_49 + 10.0));
    }

    #[test]
    fn pulley_overrides_manual_tension() {
        let config = SimulationConfig {
            scenario: Scenario::Pulley,
            show_tension: true,
            tension: 150.0,
            pulley_mass: 5.0,
            ..incline_30()
        };
        assert_eq!(resolve_forces(&config).tension, 5.0 * G);
    }

    #[test]
    fn external_force_overrides_manual_push() {
        let config = SimulationConfig {
            scenario: Scenario::ExternalForce,
            show_push: true,
            push: 150.0,
            external_force_magnitude: 20.0,
            external_force_angle: 30.0,
            ..incline_30()
        };
        let forces = resolve_forces(&config);
        assert_eq!(forces.push, 20.0);
        assert!(approx(forces.push_perpendicular, 10.0));
        assert!(approx(forces.push_parallel, 17.320_51));
    }

    #[test]
    fn unavailable_manual_forces_do_not_act() {
        let external = SimulationConfig {
            scenario: Scenario::ExternalForce,
            show_tension: true,
            tension: 80.0,
            ..incline_30()
        };
        assert_eq!(resolve_forces(&external).tension, 0.0);

        let pulley = SimulationConfig {
            scenario: Scenario::Pulley,
            show_push: true,
            push: 80.0,
            ..incline_30()
        };
        let forces = resolve_forces(&pulley);
        assert_eq!(forces.push, 0.0);
        assert_eq!(forces.push_parallel, 0.0);
        assert!(approx(forces.normal_force, 84.870_49));
    }

    #[test]
    fn net_parallel_signs_friction_against_motion() {
        let config = SimulationConfig {
            motion_direction: MotionDirection::Down,
            ..incline_30()
        };
        let forces = resolve_forces(&config);
        assert!(approx(
            forces.net_parallel(MotionDirection::Down),
            -49.0 + forces.friction
        ));
        assert!(approx(
            forces.net_parallel(MotionDirection::Up),
            -49.0 - forces.friction
        ));
    }

    #[test]
    fn max_magnitude_picks_largest() {
        let forces = resolve_forces(&incline_30());
        assert!(approx(forces.max_magnitude(), 98.0));
    }
}
