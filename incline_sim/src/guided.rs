//! Guided learning
//!
//! A six-step lesson. Each forward transition is gated by a question: the
//! learner answers (retrying as often as needed) and only then may advance.
//! Two transitions also script the simulation so the following step shows
//! the intended situation; those patches are returned to the caller, which
//! applies them together with the step change.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::GuidedError;
use crate::simulation::{ConfigPatch, MotionDirection, SimulationConfig};

/// A lesson step. `Six` is the completion screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    One = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl Step {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::One => Some(Step::Two),
            Step::Two => Some(Step::Three),
            Step::Three => Some(Step::Four),
            Step::Four => Some(Step::Five),
            Step::Five => Some(Step::Six),
            Step::Six => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::One => "Flat Surface",
            Step::Two => "Friction Basics",
            Step::Three => "Inclined Plane",
            Step::Four => "Components",
            Step::Five => "Equilibrium",
            Step::Six => "Module Complete",
        }
    }

    pub fn instructions(self) -> &'static str {
        match self {
            Step::One => "Start with a flat surface and show the weight and normal force.",
            Step::Two => "Add tension and try to move the block up the slope.",
            Step::Three => "Tilt the surface and look at the weight again.",
            Step::Four => "Weight is no longer perpendicular to the surface, so split it.",
            Step::Five => "Mg sin(θ) pulls the block down the slope. Friction must stop it.",
            Step::Six => "You've mastered the basics of free body diagrams.",
        }
    }

    /// Question that must be answered before leaving this step
    pub fn gate(self) -> Option<QuestionId> {
        match self {
            Step::One => Some(QuestionId::Step1Q1),
            Step::Two => Some(QuestionId::Step2),
            Step::Three => Some(QuestionId::Step3Q2),
            Step::Four => Some(QuestionId::Step4Q2),
            Step::Five => Some(QuestionId::Step5),
            Step::Six => None,
        }
    }

    /// Questions shown on this step, in order
    pub fn questions(self) -> impl Iterator<Item = &'static Question> {
        QUESTIONS.iter().filter(move |q| q.id.step() == self)
    }

    /// Simulation changes scripted when leaving this step
    fn exit_patch(self) -> Option<ConfigPatch> {
        match self {
            Step::Two => Some(ConfigPatch {
                show_tension: Some(true),
                motion_direction: Some(MotionDirection::Up),
                ..ConfigPatch::default()
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Identifier of a lesson question
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionId {
    Step1Q1,
    Step2,
    Step3Q1,
    Step3Q2,
    Step4Q2,
    Step5,
}

impl QuestionId {
    pub const ALL: [QuestionId; 6] = [
        QuestionId::Step1Q1,
        QuestionId::Step2,
        QuestionId::Step3Q1,
        QuestionId::Step3Q2,
        QuestionId::Step4Q2,
        QuestionId::Step5,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionId::Step1Q1 => "step1-q1",
            QuestionId::Step2 => "step2",
            QuestionId::Step3Q1 => "step3-q1",
            QuestionId::Step3Q2 => "step3-q2",
            QuestionId::Step4Q2 => "step4-q2",
            QuestionId::Step5 => "step5",
        }
    }

    pub fn step(self) -> Step {
        match self {
            QuestionId::Step1Q1 => Step::One,
            QuestionId::Step2 => Step::Two,
            QuestionId::Step3Q1 | QuestionId::Step3Q2 => Step::Three,
            QuestionId::Step4Q2 => Step::Four,
            QuestionId::Step5 => Step::Five,
        }
    }

    /// Entry in [`QUESTIONS`], which is ordered like [`QuestionId::ALL`]
    pub fn question(self) -> &'static Question {
        &QUESTIONS[self as usize]
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown question id `{s}`"))
    }
}

/// One selectable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub key: &'static str,
    pub label: &'static str,
}

/// A lesson question and its feedback texts
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub choices: [Choice; 2],
    pub correct: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
    /// Question that must be answered before this one is revealed
    pub requires: Option<QuestionId>,
}

pub static QUESTIONS: [Question; 6] = [
    Question {
        id: QuestionId::Step1Q1,
        prompt: "Direction of Normal Force (R_N) on flat surface?",
        choices: [
            Choice { key: "up", label: "Vertically Up" },
            Choice { key: "horizontal", label: "Horizontal" },
        ],
        correct: "up",
        success: "Correct! R_N is vertical (perpendicular to surface).",
        failure: "Incorrect. Normal means perpendicular.",
        requires: None,
    },
    Question {
        id: QuestionId::Step2,
        prompt: "Block moves right. Which way does Friction point?",
        choices: [
            Choice { key: "left", label: "Left (Opposite)" },
            Choice { key: "right", label: "Right (Same)" },
        ],
        correct: "left",
        success: "Correct! Friction opposes motion.",
        failure: "Incorrect. Friction opposes motion.",
        requires: None,
    },
    Question {
        id: QuestionId::Step3Q1,
        prompt: "Direction of Weight (Mg)?",
        choices: [
            Choice { key: "down", label: "Vertically Down" },
            Choice { key: "perp", label: "Perpendicular" },
        ],
        correct: "down",
        success: "Correct! Gravity always points straight down.",
        failure: "No. Weight is always vertical.",
        requires: None,
    },
    Question {
        id: QuestionId::Step3Q2,
        prompt: "Direction of Normal Force (R_N)?",
        choices: [
            Choice { key: "perp", label: "Perpendicular to Surface" },
            Choice { key: "up", label: "Vertically Up" },
        ],
        correct: "perp",
        success: "Correct!",
        failure: "Incorrect. Normal means perpendicular.",
        requires: Some(QuestionId::Step3Q1),
    },
    Question {
        id: QuestionId::Step4Q2,
        prompt: "Which component does Normal Force (R_N) balance?",
        choices: [
            Choice { key: "cos", label: "Mg cos(θ) (Perp)" },
            Choice { key: "sin", label: "Mg sin(θ) (Parallel)" },
        ],
        correct: "cos",
        success: "Correct! R_N = Mg cos(θ).",
        failure: "Incorrect. Sin is parallel.",
        requires: None,
    },
    Question {
        id: QuestionId::Step5,
        prompt: "To stop sliding DOWN, where does Friction point?",
        choices: [
            Choice { key: "up", label: "Up the Incline" },
            Choice { key: "down", label: "Down the Incline" },
        ],
        correct: "up",
        success: "Correct! Friction points UP to stop DOWN motion.",
        failure: "Incorrect. The block is sliding down, so friction opposes (up).",
        requires: None,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Transient per-question message, cleared on every step change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

/// Result of checking a submitted answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

/// Advisory checklist item for the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub text: &'static str,
    pub satisfied: bool,
}

/// Checklist for `step` evaluated against the current simulation.
/// Hints never gate progression.
pub fn step_hints(step: Step, config: &SimulationConfig) -> Vec<Hint> {
    let hint = |text: &'static str, satisfied: bool| Hint { text, satisfied };
    match step {
        Step::One => vec![
            hint("Set Angle to 0°", config.angle == 0),
            hint("Check \"Mass (Mg) & R_N\"", config.show_mass),
        ],
        Step::Two => vec![
            hint("Add \"Tension (T)\"", config.show_tension),
            hint(
                "Select \"Motion Up-Slope\"",
                config.motion_direction == MotionDirection::Up,
            ),
        ],
        Step::Three => vec![
            hint("Set Angle to 30°", config.angle == 30),
            hint("Check \"Mass (Mg) & R_N\"", config.show_mass),
        ],
        Step::Five => vec![hint(
            "Select \"Motion Down-Slope\"",
            config.motion_direction == MotionDirection::Down,
        )],
        Step::Four | Step::Six => Vec::new(),
    }
}

/// Progress through the lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidedLearningState {
    pub current_step: Step,
    pub has_started: bool,
    answered: BTreeSet<QuestionId>,
    feedback: BTreeMap<QuestionId, Feedback>,
}

impl Default for GuidedLearningState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl GuidedLearningState {
    /// With `start_gated` the lesson waits for an explicit start
    pub fn new(start_gated: bool) -> Self {
        Self {
            current_step: Step::One,
            has_started: !start_gated,
            answered: BTreeSet::new(),
            feedback: BTreeMap::new(),
        }
    }

    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.answered.contains(&id)
    }

    pub fn answered(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.answered.iter().copied()
    }

    pub fn feedback(&self, id: QuestionId) -> Option<&Feedback> {
        self.feedback.get(&id)
    }

    /// Whether the second part of a two-part question may be shown
    pub fn is_revealed(&self, id: QuestionId) -> bool {
        id.question()
            .requires
            .map_or(true, |required| self.is_answered(required))
    }

    /// Whether the gate question of the current step is answered
    pub fn can_advance(&self) -> bool {
        self.has_started
            && self
                .current_step
                .gate()
                .is_some_and(|gate| self.is_answered(gate))
    }

    pub fn start(&mut self) -> Result<(), GuidedError> {
        if self.has_started {
            return Err(GuidedError::AlreadyStarted);
        }
        self.has_started = true;
        self.current_step = Step::One;
        self.feedback.clear();
        Ok(())
    }

    /// Move to `to`, which must directly follow the current step.
    ///
    /// Returns the simulation patch scripted for this transition, if any.
    pub fn next(&mut self, to: Step) -> Result<Option<ConfigPatch>, GuidedError> {
        if !self.has_started {
            return Err(GuidedError::NotStarted);
        }
        let from = self.current_step;
        if from.next() != Some(to) {
            return Err(GuidedError::InvalidTarget { from, to });
        }
        if let Some(gate) = from.gate() {
            if !self.is_answered(gate) {
                return Err(GuidedError::StepLocked {
                    step: from,
                    missing: gate,
                });
            }
        }

        self.current_step = to;
        self.feedback.clear();
        Ok(from.exit_patch())
    }

    /// Compare `submitted` against `correct`, recording feedback and marking
    /// the question answered on success. Wrong answers may be retried.
    pub fn check_answer(
        &mut self,
        id: QuestionId,
        submitted: &str,
        correct: &str,
        success: &str,
        failure: &str,
    ) -> AnswerOutcome {
        if submitted == correct {
            self.feedback.insert(
                id,
                Feedback {
                    kind: FeedbackKind::Success,
                    text: success.to_string(),
                },
            );
            self.record_answered(id);
            AnswerOutcome::Correct
        } else {
            self.feedback.insert(
                id,
                Feedback {
                    kind: FeedbackKind::Error,
                    text: failure.to_string(),
                },
            );
            AnswerOutcome::Incorrect
        }
    }

    /// Answer a question from the bank with one of its choice keys.
    ///
    /// Returns the outcome and the simulation patch scripted for a correct
    /// answer, if any.
    pub fn answer(
        &mut self,
        id: QuestionId,
        choice: &str,
    ) -> Result<(AnswerOutcome, Option<ConfigPatch>), GuidedError> {
        let question = self.open_question(id)?;
        if !question.choices.iter().any(|c| c.key == choice) {
            return Err(GuidedError::UnknownChoice {
                question: id,
                choice: choice.to_string(),
            });
        }

        let outcome = self.check_answer(
            id,
            choice,
            question.correct,
            question.success,
            question.failure,
        );
        let patch = match (id, outcome) {
            (QuestionId::Step5, AnswerOutcome::Correct) => {
                Some(ConfigPatch::motion(MotionDirection::Down))
            }
            _ => None,
        };
        Ok((outcome, patch))
    }

    /// Record `id` as answered without checking a choice. The same rules as
    /// [`answer`](Self::answer) apply: the lesson must be running, `id` must
    /// belong to the current step and be revealed.
    pub fn mark_answered(&mut self, id: QuestionId) -> Result<(), GuidedError> {
        self.open_question(id)?;
        self.record_answered(id);
        Ok(())
    }

    /// The answered set only grows until a reset.
    fn record_answered(&mut self, id: QuestionId) {
        self.answered.insert(id);
    }

    /// Look up `id` if it can be answered right now
    fn open_question(&self, id: QuestionId) -> Result<&'static Question, GuidedError> {
        if !self.has_started {
            return Err(GuidedError::NotStarted);
        }
        if id.step() != self.current_step {
            return Err(GuidedError::WrongStep {
                question: id,
                step: self.current_step,
            });
        }
        let question = id.question();
        if let Some(requires) = question.requires {
            if !self.is_answered(requires) {
                return Err(GuidedError::QuestionHidden {
                    question: id,
                    requires,
                });
            }
        }
        Ok(question)
    }

    /// Leave the completion step and begin the lesson again
    pub fn restart(&mut self, start_gated: bool) -> Result<(), GuidedError> {
        if self.current_step != Step::Six {
            return Err(GuidedError::NotComplete);
        }
        self.reset(start_gated);
        self.has_started = true;
        Ok(())
    }

    /// Clear all progress
    pub fn reset(&mut self, start_gated: bool) {
        *self = Self::new(start_gated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> GuidedLearningState {
        GuidedLearningState::new(false)
    }

    #[test]
    fn question_ids_round_trip_through_strings() {
        for id in QuestionId::ALL {
            assert_eq!(id.as_str().parse::<QuestionId>(), Ok(id));
            assert_eq!(id.question().id, id);
        }
        for (question, id) in QUESTIONS.iter().zip(QuestionId::ALL) {
            assert_eq!(question.id, id);
        }
        assert!("step7".parse::<QuestionId>().is_err());
    }

    #[test]
    fn every_gate_is_a_question_on_its_step() {
        let mut step = Step::One;
        while let Some(next) = step.next() {
            let gate = step.gate().unwrap();
            assert_eq!(gate.step(), step);
            step = next;
        }
        assert_eq!(Step::Six.gate(), None);
    }

    #[test]
    fn every_correct_key_is_a_choice() {
        for question in &QUESTIONS {
            assert!(question.choices.iter().any(|c| c.key == question.correct));
        }
    }

    #[test]
    fn start_gate() {
        let mut guided = GuidedLearningState::new(true);
        assert!(!guided.has_started);
        assert_eq!(guided.next(Step::Two), Err(GuidedError::NotStarted));
        guided.start().unwrap();
        assert!(guided.has_started);
        assert_eq!(guided.current_step, Step::One);
        assert_eq!(guided.start(), Err(GuidedError::AlreadyStarted));
    }

    #[test]
    fn next_is_locked_until_gate_answered() {
        let mut guided = started();
        assert_eq!(
            guided.next(Step::Two),
            Err(GuidedError::StepLocked {
                step: Step::One,
                missing: QuestionId::Step1Q1
            })
        );
        assert_eq!(guided.current_step, Step::One);

        guided.answer(QuestionId::Step1Q1, "up").unwrap();
        assert!(guided.can_advance());
        assert_eq!(guided.next(Step::Two), Ok(None));
        assert_eq!(guided.current_step, Step::Two);
    }

    #[test]
    fn next_rejects_skipping_steps() {
        let mut guided = started();
        guided.mark_answered(QuestionId::Step1Q1).unwrap();
        assert_eq!(
            guided.next(Step::Three),
            Err(GuidedError::InvalidTarget {
                from: Step::One,
                to: Step::Three
            })
        );
    }

    #[test]
    fn wrong_answers_can_be_retried() {
        let mut guided = started();
        let (outcome, _) = guided.answer(QuestionId::Step1Q1, "horizontal").unwrap();
        assert_eq!(outcome, AnswerOutcome::Incorrect);
        assert!(!guided.is_answered(QuestionId::Step1Q1));
        assert_eq!(
            guided.feedback(QuestionId::Step1Q1).map(|f| f.kind),
            Some(FeedbackKind::Error)
        );

        let (outcome, _) = guided.answer(QuestionId::Step1Q1, "up").unwrap();
        assert_eq!(outcome, AnswerOutcome::Correct);
        assert!(guided.is_answered(QuestionId::Step1Q1));
        assert_eq!(
            guided.feedback(QuestionId::Step1Q1).map(|f| f.kind),
            Some(FeedbackKind::Success)
        );
    }

    #[test]
    fn a_later_wrong_answer_does_not_unmark() {
        let mut guided = started();
        guided.answer(QuestionId::Step1Q1, "up").unwrap();
        guided.answer(QuestionId::Step1Q1, "horizontal").unwrap();
        assert!(guided.is_answered(QuestionId::Step1Q1));
    }

    #[test]
    fn check_answer_is_idempotent() {
        let mut guided = started();
        for _ in 0..3 {
            let outcome = guided.check_answer(QuestionId::Step2, "left", "left", "yes", "no");
            assert_eq!(outcome, AnswerOutcome::Correct);
        }
        assert_eq!(guided.answered().count(), 1);
    }

    #[test]
    fn feedback_is_cleared_on_step_change() {
        let mut guided = started();
        guided.answer(QuestionId::Step1Q1, "up").unwrap();
        assert!(guided.feedback(QuestionId::Step1Q1).is_some());
        guided.next(Step::Two).unwrap();
        assert!(guided.feedback(QuestionId::Step1Q1).is_none());
        assert!(guided.is_answered(QuestionId::Step1Q1));
    }

    #[test]
    fn mark_answered_follows_the_answering_rules() {
        let mut gated = GuidedLearningState::new(true);
        assert_eq!(
            gated.mark_answered(QuestionId::Step1Q1),
            Err(GuidedError::NotStarted)
        );

        let mut guided = started();
        assert_eq!(
            guided.mark_answered(QuestionId::Step3Q2),
            Err(GuidedError::WrongStep {
                question: QuestionId::Step3Q2,
                step: Step::One
            })
        );
        assert!(!guided.is_answered(QuestionId::Step3Q2));

        guided.current_step = Step::Three;
        assert_eq!(
            guided.mark_answered(QuestionId::Step3Q2),
            Err(GuidedError::QuestionHidden {
                question: QuestionId::Step3Q2,
                requires: QuestionId::Step3Q1
            })
        );
        assert!(matches!(
            guided.next(Step::Four),
            Err(GuidedError::StepLocked { .. })
        ));

        guided.mark_answered(QuestionId::Step3Q1).unwrap();
        guided.mark_answered(QuestionId::Step3Q2).unwrap();
        assert_eq!(guided.next(Step::Four), Ok(None));
    }

    #[test]
    fn questions_only_answerable_on_their_step() {
        let mut guided = started();
        assert_eq!(
            guided.answer(QuestionId::Step5, "up"),
            Err(GuidedError::WrongStep {
                question: QuestionId::Step5,
                step: Step::One
            })
        );
    }

    #[test]
    fn two_part_question_reveals_in_order() {
        let mut guided = started();
        guided.current_step = Step::Three;
        assert!(!guided.is_revealed(QuestionId::Step3Q2));
        assert_eq!(
            guided.answer(QuestionId::Step3Q2, "perp"),
            Err(GuidedError::QuestionHidden {
                question: QuestionId::Step3Q2,
                requires: QuestionId::Step3Q1
            })
        );

        guided.answer(QuestionId::Step3Q1, "down").unwrap();
        assert!(guided.is_revealed(QuestionId::Step3Q2));
        assert!(!guided.can_advance());
        guided.answer(QuestionId::Step3Q2, "perp").unwrap();
        assert!(guided.can_advance());
    }

    #[test]
    fn unknown_choice_is_rejected() {
        let mut guided = started();
        assert!(matches!(
            guided.answer(QuestionId::Step1Q1, "sideways"),
            Err(GuidedError::UnknownChoice { .. })
        ));
    }

    #[test]
    fn leaving_step_two_scripts_tension_and_upward_motion() {
        let mut guided = started();
        guided.mark_answered(QuestionId::Step1Q1).unwrap();
        guided.next(Step::Two).unwrap();
        guided.answer(QuestionId::Step2, "left").unwrap();
        let patch = guided.next(Step::Three).unwrap().unwrap();
        assert_eq!(patch.show_tension, Some(true));
        assert_eq!(patch.motion_direction, Some(MotionDirection::Up));
    }

    #[test]
    fn correct_step_five_answer_scripts_downward_motion() {
        let mut guided = started();
        guided.current_step = Step::Five;
        let (_, patch) = guided.answer(QuestionId::Step5, "down").unwrap();
        assert!(patch.is_none());
        let (_, patch) = guided.answer(QuestionId::Step5, "up").unwrap();
        assert_eq!(patch, Some(ConfigPatch::motion(MotionDirection::Down)));
    }

    #[test]
    fn restart_only_from_completion() {
        let mut guided = started();
        assert_eq!(guided.restart(true), Err(GuidedError::NotComplete));

        guided.current_step = Step::Five;
        guided.mark_answered(QuestionId::Step5).unwrap();
        guided.current_step = Step::Six;
        guided.restart(true).unwrap();
        assert_eq!(guided.current_step, Step::One);
        assert!(guided.has_started);
        assert_eq!(guided.answered().count(), 0);
    }

    #[test]
    fn hints_follow_the_simulation() {
        let config = SimulationConfig::default();
        let hints = step_hints(Step::One, &config);
        assert_eq!(hints.len(), 2);
        assert!(hints[0].satisfied);
        assert!(!hints[1].satisfied);

        let config = config.with_patch(&ConfigPatch::motion(MotionDirection::Down));
        assert!(step_hints(Step::Five, &config)[0].satisfied);
        assert!(step_hints(Step::Four, &config).is_empty());
    }
}
