//! Symbolic equilibrium equations
//!
//! Builds the ΣF = 0 equations along both incline-local axes, containing only
//! the terms that are active for the current configuration, plus the computed
//! value lines shown beneath them.

use crate::constants::G;
use crate::forces::DerivedForces;
use crate::simulation::{MotionDirection, Scenario, SimulationConfig};

/// Equation lines for the equations panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationText {
    /// Perpendicular (y') balance, e.g. `Mg cos(30°) - R_N = 0`
    pub perpendicular: String,
    /// `R_N = <value> N`
    pub normal_force: String,
    /// Parallel (x') balance, e.g. `+ T - Mg sin(30°) - F_f = 0`
    pub parallel: String,
    /// `F_f = μ·R_N = ...`, present whenever there is impending motion
    pub friction: Option<String>,
    /// Hanging-mass balance and tension value in the pulley scenario
    pub hanging_mass: Option<[String; 2]>,
    /// Weight components, present on a tilted incline
    pub weight_components: Option<[String; 2]>,
}

/// Round to two decimals and drop trailing zeros: `12.50` → `12.5`, `12.00` → `12`
pub fn format_value(value: f32) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Build the equation text for `config` using its resolved `forces`
pub fn derive_equation_strings(config: &SimulationConfig, forces: &DerivedForces) -> EquationText {
    let angle = config.angle;
    let theta = format!("{angle}°");
    let alpha = format!("{}°", format_value(config.external_force_angle));
    let push_active = forces.push > 0.0;

    // y': into the surface is positive
    let mut y_terms = Vec::new();
    if angle == 0 {
        y_terms.push("Mg".to_string());
    } else {
        y_terms.push(format!("Mg cos({theta})"));
    }
    match config.scenario {
        Scenario::ExternalForce if push_active => y_terms.push(format!("+ P sin({alpha})")),
        Scenario::Basic | Scenario::Pulley if push_active && angle > 0 => {
            y_terms.push(format!("+ P sin({theta})"))
        }
        _ => {}
    }
    y_terms.push("- R_N".to_string());

    // x': up the slope is positive
    let mut x_terms = Vec::new();
    if config.tension_in_play() {
        x_terms.push("+ T".to_string());
    }
    if push_active {
        match config.scenario {
            Scenario::ExternalForce => x_terms.push(format!("+ P cos({alpha})")),
            _ if angle == 0 => x_terms.push("+ P".to_string()),
            _ => x_terms.push(format!("+ P cos({theta})")),
        }
    }
    if angle > 0 {
        x_terms.push(format!("- Mg sin({theta})"));
    }
    // Friction opposes the impending motion
    match config.motion_direction {
        MotionDirection::Up => x_terms.push("- F_f".to_string()),
        MotionDirection::Down => x_terms.push("+ F_f".to_string()),
        MotionDirection::None => {}
    }
    if x_terms.is_empty() {
        x_terms.push("0".to_string());
    }

    let friction = (config.motion_direction != MotionDirection::None).then(|| {
        format!(
            "F_f = μ·R_N = {} × {} = {} N",
            format_value(config.mu),
            format_value(forces.normal_force),
            format_value(forces.friction),
        )
    });

    let hanging_mass = (config.scenario == Scenario::Pulley).then(|| {
        [
            "T - m_a·g = 0".to_string(),
            format!("T = {} N", format_value(config.pulley_mass * G)),
        ]
    });

    let weight_components = (angle > 0).then(|| {
        [
            format!("Weight_yy = {} N", format_value(forces.weight_perpendicular)),
            format!("Weight_xx = {} N", format_value(forces.weight_parallel)),
        ]
    });

    EquationText {
        perpendicular: format!("{} = 0", y_terms.join(" ")),
        normal_force: format!("R_N = {} N", format_value(forces.normal_force)),
        parallel: format!("{} = 0", x_terms.join(" ")),
        friction,
        hanging_mass,
        weight_components,
    }
}
