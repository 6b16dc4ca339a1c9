//! Error types for configuration and guided learning

use thiserror::Error;

use crate::guided::{QuestionId, Step};

/// Errors raised while building or patching a [`crate::simulation::SimulationConfig`]
/// or loading application settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A patch named a field the simulation does not have.
    #[error("unknown simulation field `{0}`")]
    UnknownField(String),

    /// A value fell outside the domain its control enforces.
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// The settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for the expected schema.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A guided-learning event that was rejected; the state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuidedError {
    #[error("guided learning has not been started")]
    NotStarted,

    #[error("guided learning is already running")]
    AlreadyStarted,

    #[error("step {step} is locked until `{missing}` is answered")]
    StepLocked { step: Step, missing: QuestionId },

    #[error("cannot move from step {from} to step {to}")]
    InvalidTarget { from: Step, to: Step },

    #[error("question `{question}` is not part of step {step}")]
    WrongStep { question: QuestionId, step: Step },

    #[error("question `{question}` is not revealed until `{requires}` is answered")]
    QuestionHidden {
        question: QuestionId,
        requires: QuestionId,
    },

    #[error("`{choice}` is not an option for question `{question}`")]
    UnknownChoice { question: QuestionId, choice: String },

    #[error("restart is only available once the module is complete")]
    NotComplete,
}

/// Any rejected [`crate::session::Action`]
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Guided(#[from] GuidedError),
}
