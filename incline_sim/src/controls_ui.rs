//! Controls panel UI
//!
//! Widgets edit a local copy of each value; a change is queued as a
//! config patch rather than written into the session directly.

use egui::{Checkbox, Color32, RichText, Slider, Stroke};

use crate::controls::{Control, ControlAvailability};
use crate::session::{Action, Session};
use crate::simulation::{
    ConfigPatch, MotionDirection, Scenario, ANGLE_RANGE, EXTERNAL_ANGLE_RANGE, FORCE_RANGE,
    MASS_RANGE, MU_RANGE, PULLEY_MASS_RANGE,
};

const SPOTLIGHT: Color32 = Color32::from_rgb(255, 200, 40);

/// Draw the controls for the current configuration
pub fn draw_controls(ui: &mut egui::Ui, session: &Session, actions: &mut Vec<Action>) {
    let config = session.config();
    let guided = session.guided();
    let available = ControlAvailability::for_config(config);
    let step = guided.has_started.then_some(guided.current_step);

    ui.heading(RichText::new("Controls").color(Color32::LIGHT_BLUE));
    ui.separator();

    ui.horizontal(|ui| {
        for scenario in Scenario::ALL {
            if ui
                .selectable_label(config.scenario == scenario, scenario.label())
                .clicked()
                && config.scenario != scenario
            {
                actions.push(Action::Patch(ConfigPatch::scenario(scenario)));
            }
        }
    });
    ui.add_space(4.0);

    spotlight(ui, Control::Angle.is_spotlit(step), |ui| {
        let mut angle = config.angle;
        if ui
            .add(Slider::new(&mut angle, ANGLE_RANGE).text("Angle θ").suffix("°"))
            .changed()
        {
            actions.push(Action::Patch(ConfigPatch::angle(angle)));
        }
    });

    spotlight(ui, Control::Mass.is_spotlit(step), |ui| {
        let mut show_mass = config.show_mass;
        if ui.checkbox(&mut show_mass, "Mass (Mg) & R_N").changed() {
            actions.push(Action::Patch(ConfigPatch {
                show_mass: Some(show_mass),
                ..ConfigPatch::default()
            }));
        }
        let mut mass = config.mass;
        if ui
            .add_enabled(
                available.mass_slider,
                Slider::new(&mut mass, MASS_RANGE).text("kg").step_by(1.0),
            )
            .changed()
        {
            actions.push(Action::Patch(ConfigPatch {
                mass: Some(mass),
                ..ConfigPatch::default()
            }));
        }
    });

    spotlight(ui, Control::Tension.is_spotlit(step), |ui| {
        let mut show_tension = config.show_tension;
        if ui
            .add_enabled(
                available.tension_toggle,
                Checkbox::new(&mut show_tension, "Tension (T)"),
            )
            .changed()
        {
            actions.push(Action::Patch(ConfigPatch {
                show_tension: Some(show_tension),
                ..ConfigPatch::default()
            }));
        }
        let mut tension = config.tension;
        if ui
            .add_enabled(
                available.tension_slider,
                Slider::new(&mut tension, FORCE_RANGE).text("N").step_by(1.0),
            )
            .changed()
        {
            actions.push(Action::Patch(ConfigPatch {
                tension: Some(tension),
                ..ConfigPatch::default()
            }));
        }
    });

    spotlight(ui, Control::Push.is_spotlit(step), |ui| {
        let mut show_push = config.show_push;
        if ui
            .add_enabled(available.push_toggle, Checkbox::new(&mut show_push, "Push (P)"))
            .changed()
        {
            actions.push(Action::Patch(ConfigPatch {
                show_push: Some(show_push),
                ..ConfigPatch::default()
            }));
        }
        let mut push = config.push;
        if ui
            .add_enabled(
                available.push_slider,
                Slider::new(&mut push, FORCE_RANGE).text("N").step_by(1.0),
            )
            .changed()
        {
            actions.push(Action::Patch(ConfigPatch {
                push: Some(push),
                ..ConfigPatch::default()
            }));
        }
    });

    if available.external_force_controls {
        ui.group(|ui| {
            ui.label(RichText::new("External force").strong());
            let mut magnitude = config.external_force_magnitude;
            if ui
                .add(Slider::new(&mut magnitude, FORCE_RANGE).text("P (N)").step_by(1.0))
                .changed()
            {
                actions.push(Action::Patch(ConfigPatch {
                    external_force_magnitude: Some(magnitude),
                    ..ConfigPatch::default()
                }));
            }
            let mut angle = config.external_force_angle;
            if ui
                .add(
                    Slider::new(&mut angle, EXTERNAL_ANGLE_RANGE)
                        .text("α")
                        .suffix("°")
                        .step_by(1.0),
                )
                .changed()
            {
                actions.push(Action::Patch(ConfigPatch {
                    external_force_angle: Some(angle),
                    ..ConfigPatch::default()
                }));
            }
        });
    }

    if available.pulley_controls {
        ui.group(|ui| {
            ui.label(RichText::new("Pulley").strong());
            let mut hanging = config.pulley_mass;
            if ui
                .add(
                    Slider::new(&mut hanging, PULLEY_MASS_RANGE)
                        .text("m_a (kg)")
                        .step_by(1.0),
                )
                .changed()
            {
                actions.push(Action::Patch(ConfigPatch {
                    pulley_mass: Some(hanging),
                    ..ConfigPatch::default()
                }));
            }
        });
    }

    spotlight(ui, Control::Friction.is_spotlit(step), |ui| {
        ui.label(RichText::new("Friction / motion").strong());
        ui.vertical(|ui| {
            for direction in [MotionDirection::None, MotionDirection::Up, MotionDirection::Down] {
                if ui
                    .radio(config.motion_direction == direction, direction.label())
                    .clicked()
                    && config.motion_direction != direction
                {
                    actions.push(Action::Patch(ConfigPatch::motion(direction)));
                }
            }
        });
        let mut mu = config.mu;
        if ui
            .add_enabled(
                available.mu_slider,
                Slider::new(&mut mu, MU_RANGE).text("μ").step_by(0.01),
            )
            .changed()
        {
            actions.push(Action::Patch(ConfigPatch {
                mu: Some(mu),
                ..ConfigPatch::default()
            }));
        }
    });

    ui.add_space(8.0);
    if ui.button("Reset Everything").clicked() {
        actions.push(Action::ResetAll);
    }
}

fn spotlight(ui: &mut egui::Ui, lit: bool, add_contents: impl FnOnce(&mut egui::Ui)) {
    let stroke = if lit {
        Stroke::new(2.0, SPOTLIGHT)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };
    egui::Frame::group(ui.style())
        .stroke(stroke)
        .show(ui, add_contents);
    ui.add_space(4.0);
}
