use incline_sim::error::{GuidedError, SessionError};
use incline_sim::guided::{FeedbackKind, QuestionId, Step};
use incline_sim::session::{Action, Session};
use incline_sim::simulation::{ConfigPatch, MotionDirection, SimulationConfig};
use proptest::prelude::*;

fn answer(question: QuestionId, choice: &str) -> Action {
    Action::Answer {
        question,
        choice: choice.to_string(),
    }
}

fn run(session: &mut Session, actions: impl IntoIterator<Item = Action>) {
    for action in actions {
        session.dispatch(action.clone()).unwrap_or_else(|err| {
            panic!("{action:?} rejected: {err}");
        });
    }
}

#[test]
fn full_lesson_walkthrough() {
    let mut session = Session::new(true);
    assert!(!session.guided().has_started);

    run(&mut session, [Action::Start]);
    assert_eq!(session.guided().current_step, Step::One);

    run(
        &mut session,
        [
            Action::Patch(ConfigPatch {
                show_mass: Some(true),
                ..ConfigPatch::default()
            }),
            answer(QuestionId::Step1Q1, "horizontal"),
        ],
    );
    let feedback = session.guided().feedback(QuestionId::Step1Q1).unwrap();
    assert_eq!(feedback.kind, FeedbackKind::Error);
    assert!(!session.guided().can_advance());

    run(
        &mut session,
        [
            answer(QuestionId::Step1Q1, "up"),
            Action::Next(Step::Two),
            answer(QuestionId::Step2, "left"),
            Action::Next(Step::Three),
        ],
    );
    assert_eq!(session.guided().current_step, Step::Three);
    assert!(session.config().show_tension);
    assert_eq!(session.config().motion_direction, MotionDirection::Up);

    run(
        &mut session,
        [
            Action::Patch(ConfigPatch::angle(30)),
            answer(QuestionId::Step3Q1, "down"),
            answer(QuestionId::Step3Q2, "perp"),
            Action::Next(Step::Four),
            answer(QuestionId::Step4Q2, "cos"),
            Action::Next(Step::Five),
            answer(QuestionId::Step5, "up"),
        ],
    );
    assert_eq!(session.config().motion_direction, MotionDirection::Down);

    let forces = session.forces();
    assert!((forces.normal_force - 84.87).abs() < 0.01);
    assert!((forces.weight_parallel - 49.0).abs() < 0.01);
    assert!((forces.friction - 25.46).abs() < 0.01);
    assert_eq!(
        session.equations().friction.as_deref(),
        Some("F_f = μ·R_N = 0.3 × 84.87 = 25.46 N")
    );

    run(&mut session, [Action::Next(Step::Six)]);
    assert_eq!(session.guided().current_step, Step::Six);
    assert!(!session.guided().can_advance());

    run(&mut session, [Action::Restart]);
    assert_eq!(session.guided().current_step, Step::One);
    assert!(session.guided().has_started);
    assert_eq!(session.guided().answered().count(), 0);
    assert_eq!(*session.config(), SimulationConfig::default());
}

#[test]
fn skipping_ahead_is_rejected() {
    let mut session = Session::new(false);
    let err = session.dispatch(Action::Next(Step::Three)).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Guided(GuidedError::InvalidTarget { .. })
    ));
    let err = session.dispatch(Action::Next(Step::Two)).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Guided(GuidedError::StepLocked {
            missing: QuestionId::Step1Q1,
            ..
        })
    ));
    assert_eq!(session.guided().current_step, Step::One);
}

#[test]
fn reset_all_returns_to_the_start_gate() {
    let mut session = Session::new(true);
    run(
        &mut session,
        [
            Action::Start,
            Action::Patch(ConfigPatch::angle(45)),
            answer(QuestionId::Step1Q1, "up"),
            Action::ResetAll,
        ],
    );
    assert!(!session.guided().has_started);
    assert_eq!(session.guided().current_step, Step::One);
    assert!(!session.guided().is_answered(QuestionId::Step1Q1));
    assert_eq!(*session.config(), SimulationConfig::default());
}

fn lesson_action() -> impl Strategy<Value = Action> {
    let question = prop::sample::select(QuestionId::ALL.to_vec());
    let choice = prop::sample::select(vec!["up", "down", "left", "right", "perp", "cos", "sin"]);
    let step = prop::sample::select(vec![
        Step::One,
        Step::Two,
        Step::Three,
        Step::Four,
        Step::Five,
        Step::Six,
    ]);
    prop_oneof![
        Just(Action::Start),
        step.prop_map(Action::Next),
        (question, choice).prop_map(|(q, c)| answer(q, c)),
        (0u32..=90).prop_map(|a| Action::Patch(ConfigPatch::angle(a))),
    ]
}

proptest! {
    #[test]
    fn answered_questions_only_accumulate(actions in prop::collection::vec(lesson_action(), 0..40)) {
        let mut session = Session::new(true);
        for action in actions {
            let before: Vec<QuestionId> = session.guided().answered().collect();
            let step_before = session.guided().current_step;
            let accepted = session.dispatch(action.clone()).is_ok();
            let after: Vec<QuestionId> = session.guided().answered().collect();
            prop_assert!(before.iter().all(|q| after.contains(q)));

            if let Action::Next(to) = action {
                if accepted {
                    prop_assert_eq!(step_before.next(), Some(to));
                    let gate = step_before.gate();
                    prop_assert!(gate.map_or(true, |g| before.contains(&g)));
                } else {
                    prop_assert_eq!(session.guided().current_step, step_before);
                }
            }
        }
    }
}
