//! Free body diagram geometry
//!
//! Lays out the ground, incline, block and force arrows in world units for
//! the renderer. Arrow lengths are proportional to force magnitude, scaled so
//! the largest drawn force fits [`MAX_ARROW_LENGTH`].

use glam::Vec2;

use crate::forces::DerivedForces;
use crate::simulation::{MotionDirection, Scenario, SimulationConfig};

pub const INCLINE_LENGTH: f32 = 8.0;
pub const BLOCK_SIZE: f32 = 1.2;
pub const MAX_ARROW_LENGTH: f32 = 3.5;
/// Bottom corner of the incline
pub const INCLINE_BASE: Vec2 = Vec2::new(-3.5, -2.5);

const ARROW_HEAD: f32 = 0.25;
const ARC_RADIUS: f32 = 1.2;
const ARC_SEGMENTS: usize = 24;

pub const GROUND_COLOR: [f32; 4] = [0.4, 0.4, 0.4, 1.0];
pub const INCLINE_COLOR: [f32; 4] = [0.22, 0.22, 0.22, 1.0];
pub const BLOCK_COLOR: [f32; 4] = [0.85, 0.65, 0.0, 1.0];
pub const ARC_COLOR: [f32; 4] = [0.0, 0.48, 1.0, 1.0];
pub const ROPE_COLOR: [f32; 4] = [0.45, 0.3, 0.2, 1.0];

/// Force drawn on the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceKind {
    Weight,
    WeightParallel,
    WeightPerpendicular,
    Normal,
    Tension,
    Push,
    Friction,
}

impl ForceKind {
    pub fn label(self) -> &'static str {
        match self {
            ForceKind::Weight => "Mg",
            ForceKind::WeightParallel => "Mg sinθ",
            ForceKind::WeightPerpendicular => "Mg cosθ",
            ForceKind::Normal => "R_N",
            ForceKind::Tension => "T",
            ForceKind::Push => "P",
            ForceKind::Friction => "F_f",
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            ForceKind::Weight
            | ForceKind::WeightParallel
            | ForceKind::WeightPerpendicular
            | ForceKind::Normal => [0.82, 0.0, 0.0, 1.0],
            ForceKind::Tension => [1.0, 0.43, 0.42, 1.0],
            ForceKind::Push => [0.61, 0.15, 0.69, 1.0],
            ForceKind::Friction => [0.9, 0.7, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceArrow {
    pub kind: ForceKind,
    pub tail: Vec2,
    pub tip: Vec2,
    pub magnitude: f32,
}

impl ForceArrow {
    pub fn direction(&self) -> Vec2 {
        (self.tip - self.tail).normalize_or_zero()
    }

    pub fn length(&self) -> f32 {
        self.tip.distance(self.tail)
    }

    /// The two strokes of the arrowhead
    pub fn head(&self) -> [Segment; 2] {
        let back = -self.direction() * ARROW_HEAD.min(self.length() * 0.5);
        let side = back.perp() * 0.5;
        [
            Segment::new(self.tip, self.tip + back + side),
            Segment::new(self.tip, self.tip + back - side),
        ]
    }

    /// Where the label sits, just past the tip
    pub fn label_anchor(&self) -> Vec2 {
        self.tip + self.direction() * 0.35
    }
}

/// Everything the renderer draws for one configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub ground: Segment,
    pub incline: Segment,
    pub block: [Vec2; 4],
    pub block_center: Vec2,
    pub angle_arc: Vec<Vec2>,
    pub arrows: Vec<ForceArrow>,
    pub rope: Vec<Segment>,
    pub pulley: Option<Vec2>,
    pub hanging_mass: Option<[Vec2; 4]>,
}

impl Scene {
    /// Flatten the scene into colored line segments
    pub fn line_segments(&self) -> Vec<(Segment, [f32; 4])> {
        let mut lines = vec![(self.ground, GROUND_COLOR), (self.incline, INCLINE_COLOR)];
        lines.extend(closed_outline(&self.block).map(|s| (s, BLOCK_COLOR)));
        lines.extend(
            self.angle_arc
                .windows(2)
                .map(|w| (Segment::new(w[0], w[1]), ARC_COLOR)),
        );
        lines.extend(self.rope.iter().map(|s| (*s, ROPE_COLOR)));
        if let Some(pulley) = self.pulley {
            let ring = circle(pulley, 0.2, 16);
            lines.extend(ring.windows(2).map(|w| (Segment::new(w[0], w[1]), ROPE_COLOR)));
        }
        if let Some(mass) = &self.hanging_mass {
            lines.extend(closed_outline(mass).map(|s| (s, BLOCK_COLOR)));
        }
        for arrow in &self.arrows {
            let color = arrow.kind.color();
            lines.push((Segment::new(arrow.tail, arrow.tip), color));
            lines.extend(arrow.head().map(|s| (s, color)));
        }
        lines
    }
}

/// Unit vector up the slope
pub fn up_slope(angle_rad: f32) -> Vec2 {
    Vec2::new(angle_rad.cos(), angle_rad.sin())
}

/// Unit vector perpendicular to the slope, pointing away from the surface
pub fn surface_normal(angle_rad: f32) -> Vec2 {
    Vec2::new(-angle_rad.sin(), angle_rad.cos())
}

/// Lay out the diagram for `config`
pub fn build_scene(config: &SimulationConfig, forces: &DerivedForces) -> Scene {
    let angle_rad = forces.angle_rad;
    let u = up_slope(angle_rad);
    let n = surface_normal(angle_rad);
    let half = BLOCK_SIZE / 2.0;

    let incline_top = INCLINE_BASE + u * INCLINE_LENGTH;
    let center = INCLINE_BASE + u * (INCLINE_LENGTH / 2.0) + n * half;
    let block = [
        center - u * half - n * half,
        center + u * half - n * half,
        center + u * half + n * half,
        center - u * half + n * half,
    ];

    let ground = Segment::new(
        INCLINE_BASE - Vec2::X * 1.5,
        Vec2::new(incline_top.x.max(INCLINE_BASE.x + INCLINE_LENGTH) + 1.0, INCLINE_BASE.y),
    );

    let angle_arc = if config.angle > 0 {
        (0..=ARC_SEGMENTS)
            .map(|i| {
                let a = angle_rad * i as f32 / ARC_SEGMENTS as f32;
                INCLINE_BASE + Vec2::new(a.cos(), a.sin()) * ARC_RADIUS
            })
            .collect()
    } else {
        Vec::new()
    };

    let scale = MAX_ARROW_LENGTH / forces.max_magnitude().max(1.0);
    let mut arrows = Vec::new();
    let mut push_arrow = |kind: ForceKind, tail: Vec2, direction: Vec2, magnitude: f32| {
        if magnitude > f32::EPSILON {
            arrows.push(ForceArrow {
                kind,
                tail,
                tip: tail + direction * magnitude * scale,
                magnitude,
            });
        }
    };

    if config.show_mass {
        if config.angle == 0 {
            push_arrow(ForceKind::Weight, center, Vec2::NEG_Y, forces.weight);
        } else {
            push_arrow(ForceKind::WeightParallel, center, -u, forces.weight_parallel);
            push_arrow(
                ForceKind::WeightPerpendicular,
                center,
                -n,
                forces.weight_perpendicular,
            );
        }
        push_arrow(ForceKind::Normal, center, n, forces.normal_force);
    }

    if config.tension_in_play() {
        push_arrow(ForceKind::Tension, center + u * half, u, forces.tension);
    }

    if forces.push > 0.0 {
        // Drawn pushing onto the lower face
        let direction = match config.scenario {
            Scenario::ExternalForce => {
                u * forces.push_angle_rad.cos() - n * forces.push_angle_rad.sin()
            }
            Scenario::Basic | Scenario::Pulley => Vec2::X,
        };
        let length = forces.push * scale;
        let contact = center - u * half;
        push_arrow(ForceKind::Push, contact - direction * length, direction, forces.push);
    }

    let friction_direction = match config.motion_direction {
        MotionDirection::None => None,
        MotionDirection::Up => Some(-u),
        MotionDirection::Down => Some(u),
    };
    if let Some(direction) = friction_direction {
        push_arrow(ForceKind::Friction, center - n * half, direction, forces.friction);
    }

    let (rope, pulley, hanging_mass) = if config.scenario == Scenario::Pulley {
        let pulley = incline_top + n * half;
        let mass_top = pulley + Vec2::new(0.2, -2.5);
        let mass_half = 0.4;
        let mass_center = mass_top - Vec2::Y * mass_half;
        let rope = vec![
            Segment::new(center + u * half, pulley),
            Segment::new(pulley + Vec2::X * 0.2, mass_top),
        ];
        let hanging = [
            mass_center + Vec2::new(-mass_half, -mass_half),
            mass_center + Vec2::new(mass_half, -mass_half),
            mass_center + Vec2::new(mass_half, mass_half),
            mass_center + Vec2::new(-mass_half, mass_half),
        ];
        (rope, Some(pulley), Some(hanging))
    } else {
        (Vec::new(), None, None)
    };

    Scene {
        ground,
        incline: Segment::new(INCLINE_BASE, incline_top),
        block,
        block_center: center,
        angle_arc,
        arrows,
        rope,
        pulley,
        hanging_mass,
    }
}

fn closed_outline(corners: &[Vec2; 4]) -> impl Iterator<Item = Segment> + '_ {
    (0..4).map(move |i| Segment::new(corners[i], corners[(i + 1) % 4]))
}

fn circle(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    (0..=segments)
        .map(|i| {
            let a = std::f32::consts::TAU * i as f32 / segments as f32;
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::resolve_forces;

    fn scene(config: &SimulationConfig) -> Scene {
        build_scene(config, &resolve_forces(config))
    }

    fn arrow(scene: &Scene, kind: ForceKind) -> Option<ForceArrow> {
        scene.arrows.iter().copied().find(|a| a.kind == kind)
    }

    #[test]
    fn nothing_shown_draws_no_arrows() {
        let scene = scene(&SimulationConfig::default());
        assert!(scene.arrows.is_empty());
        assert!(scene.angle_arc.is_empty());
    }

    #[test]
    fn flat_surface_shows_weight_and_normal() {
        let config = SimulationConfig {
            show_mass: true,
            ..SimulationConfig::default()
        };
        let scene = scene(&config);
        let weight = arrow(&scene, ForceKind::Weight).unwrap();
        let normal = arrow(&scene, ForceKind::Normal).unwrap();
        assert!((weight.direction() - Vec2::NEG_Y).length() < 1e-5);
        assert!((normal.direction() - Vec2::Y).length() < 1e-5);
        assert!(arrow(&scene, ForceKind::WeightParallel).is_none());
    }

    #[test]
    fn tilted_incline_splits_weight() {
        let config = SimulationConfig {
            angle: 30,
            show_mass: true,
            ..SimulationConfig::default()
        };
        let scene = scene(&config);
        let u = up_slope(30f32.to_radians());
        assert!(arrow(&scene, ForceKind::Weight).is_none());

        let normal = arrow(&scene, ForceKind::Normal).unwrap();
        assert!(normal.direction().dot(u).abs() < 1e-5);

        let parallel = arrow(&scene, ForceKind::WeightParallel).unwrap();
        assert!((parallel.direction() + u).length() < 1e-5);
        assert_eq!(scene.angle_arc.len(), ARC_SEGMENTS + 1);
    }

    #[test]
    fn friction_opposes_impending_motion() {
        let base = SimulationConfig {
            angle: 20,
            ..SimulationConfig::default()
        };
        let u = up_slope(20f32.to_radians());

        let up = scene(&SimulationConfig {
            motion_direction: MotionDirection::Up,
            ..base.clone()
        });
        assert!(arrow(&up, ForceKind::Friction).unwrap().direction().dot(u) < -0.99);

        let down = scene(&SimulationConfig {
            motion_direction: MotionDirection::Down,
            ..base
        });
        assert!(arrow(&down, ForceKind::Friction).unwrap().direction().dot(u) > 0.99);
    }

    #[test]
    fn arrows_fit_the_diagram() {
        let config = SimulationConfig {
            angle: 40,
            mass: 50.0,
            show_mass: true,
            show_tension: true,
            tension: 200.0,
            motion_direction: MotionDirection::Up,
            mu: 1.0,
            ..SimulationConfig::default()
        };
        let scene = scene(&config);
        assert!(scene
            .arrows
            .iter()
            .all(|a| a.length() <= MAX_ARROW_LENGTH + 1e-4));
    }

    #[test]
    fn external_force_presses_into_surface() {
        let config = SimulationConfig {
            angle: 30,
            scenario: Scenario::ExternalForce,
            external_force_angle: 30.0,
            ..SimulationConfig::default()
        };
        let scene = scene(&config);
        let push = arrow(&scene, ForceKind::Push).unwrap();
        let n = surface_normal(30f32.to_radians());
        assert!(push.direction().dot(n) < 0.0);
        // ends on the block's lower face
        let contact = scene.block_center - up_slope(30f32.to_radians()) * BLOCK_SIZE / 2.0;
        assert!(push.tip.distance(contact) < 1e-4);
    }

    #[test]
    fn pulley_adds_rope_and_hanging_mass() {
        let config = SimulationConfig {
            angle: 30,
            scenario: Scenario::Pulley,
            ..SimulationConfig::default()
        };
        let scene = scene(&config);
        assert_eq!(scene.rope.len(), 2);
        assert!(scene.pulley.is_some());
        assert!(scene.hanging_mass.is_some());
        assert!(arrow(&scene, ForceKind::Tension).is_some());
    }

    #[test]
    fn line_segments_include_arrowheads() {
        let config = SimulationConfig {
            show_mass: true,
            ..SimulationConfig::default()
        };
        let scene = scene(&config);
        // ground, incline, 4 block edges, and 3 strokes per arrow
        assert_eq!(scene.line_segments().len(), 2 + 4 + 3 * scene.arrows.len());
    }
}
