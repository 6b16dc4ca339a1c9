//! Equations sidebar UI for the incline diagram
//!
//! Shows the live equations of equilibrium for the current configuration
//! alongside a static reference of the relations used.

use egui::{Color32, Context, RichText};

use crate::equations::EquationText;
use crate::session::{Action, Session};
use crate::simulation::ConfigPatch;

/// An equation with its name and formula
pub struct Equation {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

/// Draw the equations sidebar, queueing any toggles the user makes
pub fn draw_equations_sidebar(ctx: &Context, session: &Session, actions: &mut Vec<Action>) {
    let show_equations = session.config().show_equations;

    egui::SidePanel::right("equations_panel")
        .resizable(true)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Equations").color(Color32::LIGHT_BLUE));
                let label = if show_equations { "Hide" } else { "Show" };
                if ui.button(label).clicked() {
                    actions.push(Action::Patch(ConfigPatch {
                        show_equations: Some(!show_equations),
                        ..ConfigPatch::default()
                    }));
                }
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                if !session.guided().has_started {
                    ui.label(RichText::new("Start the lesson to see the equations.").italics());
                } else if show_equations {
                    draw_live_equations(ui, &session.equations());
                } else {
                    ui.label(RichText::new("Equations hidden (press E)").italics());
                }

                ui.add_space(8.0);

                ui.collapsing(RichText::new("📐 Reference").strong(), |ui| {
                    for eq in INCLINE_EQUATIONS {
                        ui.group(|ui| {
                            ui.label(RichText::new(eq.name).strong().color(Color32::YELLOW));
                            ui.label(RichText::new(eq.formula).monospace());
                            ui.label(RichText::new(eq.description).small().italics());
                        });
                        ui.add_space(4.0);
                    }
                });

                ui.add_space(8.0);

                ui.collapsing(RichText::new("📖 Variables").strong(), |ui| {
                    egui::Grid::new("variables_grid")
                        .num_columns(2)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            for (symbol, meaning) in INCLINE_VARIABLES {
                                ui.label(
                                    RichText::new(*symbol).monospace().color(Color32::LIGHT_GREEN),
                                );
                                ui.label(*meaning);
                                ui.end_row();
                            }
                        });
                });
            });
        });
}

fn draw_live_equations(ui: &mut egui::Ui, text: &EquationText) {
    section(ui, "Perpendicular (y')", |ui| {
        equation_line(ui, &text.perpendicular);
        equation_line(ui, &text.normal_force);
    });

    section(ui, "Parallel (x')", |ui| {
        equation_line(ui, &text.parallel);
        if let Some(friction) = &text.friction {
            equation_line(ui, friction);
        }
    });

    if let Some(lines) = &text.hanging_mass {
        section(ui, "Hanging mass", |ui| {
            for line in lines {
                equation_line(ui, line);
            }
        });
    }

    if let Some(lines) = &text.weight_components {
        section(ui, "Weight components", |ui| {
            for line in lines {
                equation_line(ui, line);
            }
        });
    }
}

fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.label(RichText::new(title).strong().color(Color32::YELLOW));
        add_contents(ui);
    });
    ui.add_space(4.0);
}

fn equation_line(ui: &mut egui::Ui, line: &str) {
    ui.label(RichText::new(line).monospace().size(15.0));
}

// ============================================================================
// Block on an incline
// ============================================================================

pub const INCLINE_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Weight",
        formula: "W = M·g",
        description: "Gravity on the block, g = 9.8 m/s²",
    },
    Equation {
        name: "Weight along the slope",
        formula: "W_x = M·g·sin(θ)",
        description: "Component pulling the block down the incline",
    },
    Equation {
        name: "Weight into the slope",
        formula: "W_y = M·g·cos(θ)",
        description: "Component pressing the block into the surface",
    },
    Equation {
        name: "Normal reaction",
        formula: "R_N = M·g·cos(θ) + P_y",
        description: "Surface pushes back against everything pressing into it",
    },
    Equation {
        name: "Kinetic friction",
        formula: "F_f = μ·R_N",
        description: "Opposes the direction of motion",
    },
    Equation {
        name: "Equilibrium",
        formula: "ΣF_x' = 0,  ΣF_y' = 0",
        description: "Forces balance along both tilted axes",
    },
];

pub const INCLINE_VARIABLES: &[(&str, &str)] = &[
    ("M", "Mass of the block (kg)"),
    ("g", "Gravitational acceleration"),
    ("θ", "Incline angle"),
    ("R_N", "Normal reaction force"),
    ("T", "Rope tension"),
    ("P", "Applied push"),
    ("α", "Push angle from the slope"),
    ("μ", "Coefficient of friction"),
    ("F_f", "Friction force"),
    ("m_a", "Hanging mass"),
];
