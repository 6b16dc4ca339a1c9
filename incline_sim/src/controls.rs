//! Which controls are enabled, visible and spotlighted

use crate::guided::Step;
use crate::simulation::{MotionDirection, Scenario, SimulationConfig};

/// A control group on the controls panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Angle,
    Mass,
    Tension,
    Push,
    Friction,
}

impl Control {
    /// Lesson step that highlights this control
    pub fn spotlight_step(self) -> Step {
        match self {
            Control::Mass => Step::One,
            Control::Tension | Control::Push | Control::Friction => Step::Two,
            Control::Angle => Step::Three,
        }
    }

    /// Whether the control is highlighted while the lesson is at `step`
    pub fn is_spotlit(self, step: Option<Step>) -> bool {
        step == Some(self.spotlight_step())
    }
}

/// Enabled and visible state of every control for one configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAvailability {
    pub mass_slider: bool,
    pub tension_toggle: bool,
    pub tension_slider: bool,
    pub push_toggle: bool,
    pub push_slider: bool,
    pub mu_slider: bool,
    pub external_force_controls: bool,
    pub pulley_controls: bool,
}

impl ControlAvailability {
    pub fn for_config(config: &SimulationConfig) -> Self {
        let tension_toggle = config.scenario != Scenario::ExternalForce;
        let push_toggle = config.scenario != Scenario::Pulley;
        Self {
            mass_slider: config.show_mass,
            tension_toggle,
            tension_slider: tension_toggle && config.show_tension,
            push_toggle,
            push_slider: push_toggle && config.show_push,
            mu_slider: config.motion_direction != MotionDirection::None,
            external_force_controls: config.scenario == Scenario::ExternalForce,
            pulley_controls: config.scenario == Scenario::Pulley,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_gated_sliders() {
        let available = ControlAvailability::for_config(&SimulationConfig::default());
        assert!(!available.mass_slider);
        assert!(!available.tension_slider);
        assert!(!available.push_slider);
        assert!(!available.mu_slider);
        assert!(available.tension_toggle && available.push_toggle);
        assert!(!available.external_force_controls && !available.pulley_controls);
    }

    #[test]
    fn scenarios_lock_overridden_controls() {
        let config = SimulationConfig {
            show_tension: true,
            show_push: true,
            scenario: Scenario::ExternalForce,
            ..SimulationConfig::default()
        };
        let available = ControlAvailability::for_config(&config);
        assert!(!available.tension_toggle && !available.tension_slider);
        assert!(available.push_slider);
        assert!(available.external_force_controls);

        let config = SimulationConfig {
            scenario: Scenario::Pulley,
            ..config
        };
        let available = ControlAvailability::for_config(&config);
        assert!(available.tension_slider);
        assert!(!available.push_toggle && !available.push_slider);
        assert!(available.pulley_controls);
    }

    #[test]
    fn locked_toggles_leave_no_manual_force_acting() {
        use crate::forces::resolve_forces;

        let config = SimulationConfig {
            angle: 30,
            show_tension: true,
            tension: 80.0,
            show_push: true,
            push: 80.0,
            scenario: Scenario::ExternalForce,
            external_force_magnitude: 20.0,
            ..SimulationConfig::default()
        };
        assert!(!ControlAvailability::for_config(&config).tension_toggle);
        assert_eq!(resolve_forces(&config).tension, 0.0);

        let config = SimulationConfig {
            scenario: Scenario::Pulley,
            pulley_mass: 0.0,
            ..config
        };
        assert!(!ControlAvailability::for_config(&config).push_toggle);
        let forces = resolve_forces(&config);
        assert_eq!(forces.push, 0.0);
        assert_eq!(forces.tension, 0.0);
    }

    #[test]
    fn mu_follows_motion_direction() {
        let config = SimulationConfig {
            motion_direction: MotionDirection::Up,
            ..SimulationConfig::default()
        };
        assert!(ControlAvailability::for_config(&config).mu_slider);
    }

    #[test]
    fn spotlight_matches_lesson_steps() {
        assert!(Control::Mass.is_spotlit(Some(Step::One)));
        assert!(Control::Friction.is_spotlit(Some(Step::Two)));
        assert!(Control::Angle.is_spotlit(Some(Step::Three)));
        assert!(!Control::Angle.is_spotlit(None));
        assert!(!Control::Push.is_spotlit(Some(Step::Five)));
    }
}
