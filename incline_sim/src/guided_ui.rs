//! Guided learning panel UI

use egui::{Color32, RichText};

use crate::guided::{step_hints, FeedbackKind, Question, Step};
use crate::session::{Action, Session};

const SUCCESS: Color32 = Color32::from_rgb(90, 200, 110);
const ERROR: Color32 = Color32::from_rgb(235, 90, 80);

/// Draw the lesson panel: start gate, current step, hints and questions
pub fn draw_guided_panel(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<Action>) {
    let guided = session.guided();

    ui.horizontal(|ui| {
        ui.heading(RichText::new("📖 Guided Learning").color(Color32::LIGHT_BLUE));
        if ui.small_button("Reset All").clicked() {
            actions.push(Action::ResetAll);
        }
    });
    ui.separator();

    if !guided.has_started {
        ui.label("Explore the forces on a block resting on an incline, one step at a time.");
        ui.add_space(4.0);
        if ui.button("▶ Start Simulation").clicked() {
            actions.push(Action::Start);
        }
        return;
    }

    let step = guided.current_step;
    ui.label(
        RichText::new(format!("STEP {}: {}", step.number(), step.title()))
            .strong()
            .color(Color32::YELLOW),
    );
    ui.label(step.instructions());
    ui.add_space(4.0);

    for hint in step_hints(step, session.config()) {
        let (mark, color) = if hint.satisfied {
            ("✓", SUCCESS)
        } else {
            ("☐", Color32::GRAY)
        };
        ui.label(RichText::new(format!("{mark} {}", hint.text)).color(color));
    }

    for question in step.questions() {
        if guided.is_revealed(question.id) {
            ui.add_space(6.0);
            draw_question(ui, session, question, actions);
        }
    }

    ui.add_space(8.0);
    if step == Step::Six {
        ui.label(RichText::new("🎉 Module Complete!").strong().color(SUCCESS));
        if ui.button("Restart Lesson").clicked() {
            actions.push(Action::Restart);
        }
    } else if guided.can_advance() {
        if let Some(next) = step.next() {
            let label = if next == Step::Six { "Finish →" } else { "Next →" };
            if ui.button(label).clicked() {
                actions.push(Action::Next(next));
            }
        }
    }
}

fn draw_question(
    ui: &mut egui::Ui,
    session: &Session,
    question: &'static Question,
    actions: &mut Vec<Action>,
) {
    let guided = session.guided();
    ui.group(|ui| {
        ui.label(RichText::new(question.prompt).strong());
        if !guided.is_answered(question.id) {
            ui.horizontal_wrapped(|ui| {
                for choice in &question.choices {
                    if ui.button(choice.label).clicked() {
                        actions.push(Action::Answer {
                            question: question.id,
                            choice: choice.key.to_string(),
                        });
                    }
                }
            });
        }
        if let Some(feedback) = guided.feedback(question.id) {
            let color = match feedback.kind {
                FeedbackKind::Success => SUCCESS,
                FeedbackKind::Error => ERROR,
            };
            ui.label(RichText::new(&feedback.text).color(color));
        }
    });
}
