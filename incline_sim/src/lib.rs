//! Free Body Diagram: Block on an Incline
//!
//! An interactive teaching tool for static equilibrium on an inclined plane:
//!
//! - **Force model**: resolves weight, normal force, friction, tension and push
//!   into incline-local components for the current configuration
//! - **Equations**: the symbolic equilibrium equations for the active terms
//! - **Guided learning**: a six-step lesson gated by questions
//! - **Session**: the store owning both states, mutated only through actions
//!
//! The view layer (diagram renderer, control panels, equation sidebar) reads
//! these and never holds derived state of its own.

pub mod error;
pub mod simulation;
pub mod forces;
pub mod equations;
pub mod guided;
pub mod session;
pub mod controls;
pub mod diagram;
pub mod settings;
pub mod renderer;
pub mod equations_ui;
pub mod controls_ui;
pub mod guided_ui;

/// Physical constants for the incline model
pub mod constants {
    /// Gravitational acceleration in m/s²
    pub const G: f32 = 9.8;
}
