//! Session store
//!
//! Owns the [`SimulationConfig`] and [`GuidedLearningState`] for one learner.
//! All mutation goes through [`Session::reduce`], a pure function of the
//! current state and an [`Action`]. A guided transition that scripts the
//! simulation produces the patched config and the new step in the same
//! returned state, so the next render sees both at once.

use log::{debug, info, warn};

use crate::equations::{derive_equation_strings, EquationText};
use crate::error::SessionError;
use crate::forces::{resolve_forces, DerivedForces};
use crate::guided::{AnswerOutcome, GuidedLearningState, QuestionId, Step};
use crate::simulation::{ConfigPatch, SimulationConfig};

/// Every event the controls and the guided-learning panel can emit
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Merge a partial update over the simulation
    Patch(ConfigPatch),
    /// Leave the start gate
    Start,
    /// Advance to the given step
    Next(Step),
    /// Answer a bank question with one of its choice keys
    Answer { question: QuestionId, choice: String },
    /// Record a question as answered without checking
    MarkAnswered(QuestionId),
    /// Begin the lesson again from the completion step
    Restart,
    /// Restore default simulation and clear all progress
    ResetAll,
}

/// Simulation and lesson state for one learner
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    config: SimulationConfig,
    guided: GuidedLearningState,
    start_gated: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Session {
    pub fn new(start_gated: bool) -> Self {
        Self {
            config: SimulationConfig::default(),
            guided: GuidedLearningState::new(start_gated),
            start_gated,
        }
    }

    /// Start from defaults with `initial` merged over them
    pub fn with_initial(start_gated: bool, initial: &ConfigPatch) -> Result<Self, SessionError> {
        initial.validate()?;
        let mut session = Self::new(start_gated);
        session.config = session.config.with_patch(initial);
        Ok(session)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn guided(&self) -> &GuidedLearningState {
        &self.guided
    }

    pub fn start_gated(&self) -> bool {
        self.start_gated
    }

    /// Forces for the current configuration, recomputed on every call
    pub fn forces(&self) -> DerivedForces {
        resolve_forces(&self.config)
    }

    /// Equation text for the current configuration
    pub fn equations(&self) -> EquationText {
        derive_equation_strings(&self.config, &self.forces())
    }

    /// Compute the state that follows `action`. On error the current state
    /// is the state to keep.
    pub fn reduce(&self, action: &Action) -> Result<Session, SessionError> {
        let mut next = self.clone();
        match action {
            Action::Patch(patch) => {
                patch.validate()?;
                next.config = self.config.with_patch(patch);
            }
            Action::Start => next.guided.start()?,
            Action::Next(to) => {
                if let Some(patch) = next.guided.next(*to)? {
                    next.config = self.config.with_patch(&patch);
                }
            }
            Action::Answer { question, choice } => {
                let (outcome, patch) = next.guided.answer(*question, choice)?;
                if let Some(patch) = patch {
                    next.config = self.config.with_patch(&patch);
                }
                if outcome == AnswerOutcome::Incorrect {
                    debug!("incorrect answer `{choice}` to {question}");
                }
            }
            Action::MarkAnswered(question) => next.guided.mark_answered(*question)?,
            Action::Restart => {
                next.guided.restart(self.start_gated)?;
                next.config = SimulationConfig::default();
            }
            Action::ResetAll => {
                next.guided.reset(self.start_gated);
                next.config = SimulationConfig::default();
            }
        }
        Ok(next)
    }

    /// Apply `action` in place, keeping the current state if it is rejected
    pub fn dispatch(&mut self, action: Action) -> Result<(), SessionError> {
        match self.reduce(&action) {
            Ok(next) => {
                if next.guided.current_step != self.guided.current_step
                    || next.guided.has_started != self.guided.has_started
                {
                    info!(
                        "guided learning: step {} (started: {})",
                        next.guided.current_step, next.guided.has_started
                    );
                }
                if next.config != self.config {
                    debug!("simulation updated by {action:?}: {:?}", next.config);
                }
                *self = next;
                Ok(())
            }
            Err(err) => {
                warn!("rejected {action:?}: {err}");
                Err(err)
            }
        }
    }
}
