//! Free Body Diagram - Block on an Incline
//!
//! Interactive diagram of the forces on a block resting on an incline,
//! with a six-step guided lesson and live equations of equilibrium.
//!
//! Usage: incline_sim [settings.toml]
//!
//! Controls:
//! - Space: Start the lesson
//! - Left/Right: Decrease/increase the incline angle by 1°
//! - +/- or scroll: Zoom the diagram
//! - E: Show/hide equations
//! - R: Reset everything

use std::path::PathBuf;

use common::{Camera2D, GraphicsContext, GraphicsError};
use glam::Vec2;
use incline_sim::controls_ui::draw_controls;
use incline_sim::diagram::{build_scene, Scene};
use incline_sim::equations_ui::draw_equations_sidebar;
use incline_sim::guided_ui::draw_guided_panel;
use incline_sim::renderer::{draw_diagram_labels, DiagramRenderer};
use incline_sim::session::{Action, Session};
use incline_sim::settings::AppSettings;
use incline_sim::simulation::{ConfigPatch, ANGLE_RANGE};
use log::{debug, info, warn};
use winit::{
    event::{ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

/// Visible half-height of the diagram in world units at zoom 1.0
const VIEW_HALF_HEIGHT: f32 = 5.5;

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: DiagramRenderer,
    camera: Camera2D,
    session: Session,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext, session: Session, zoom: f32) -> Self {
        let mut camera = Camera2D::new(ctx.aspect_ratio(), VIEW_HALF_HEIGHT);
        camera.position = Vec2::new(0.5, 0.5);
        camera.set_zoom(zoom);
        let renderer = DiagramRenderer::new(&ctx, &camera);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Self {
            ctx,
            renderer,
            camera,
            session,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.update_aspect_ratio(self.ctx.aspect_ratio());
    }

    /// Scene for the current session, or nothing before the lesson starts
    fn scene(&self) -> Option<Scene> {
        self.session
            .guided()
            .has_started
            .then(|| build_scene(self.session.config(), &self.session.forces()))
    }

    fn dispatch(&mut self, action: Action) {
        if let Err(err) = self.session.dispatch(action) {
            debug!("session unchanged: {err}");
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let scene = self.scene();
        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let vertex_count = self.renderer.update_scene(&self.ctx.queue, scene.as_ref());

        // Build egui UI
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let mut actions = Vec::new();
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            egui::SidePanel::left("lesson_panel")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        draw_guided_panel(ui, &self.session, &mut actions);
                        ui.add_space(12.0);
                        draw_controls(ui, &self.session, &mut actions);
                    });
                });

            draw_equations_sidebar(ctx, &self.session, &mut actions);

            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                let forces = self.session.forces();
                ui.horizontal(|ui| {
                    ui.label(format!("θ = {}°", self.session.config().angle));
                    ui.separator();
                    ui.label(format!("W = {:.2} N", forces.weight));
                    ui.separator();
                    ui.label(format!("R_N = {:.2} N", forces.normal_force));
                    ui.separator();
                    ui.label(format!("Zoom: {:.1}x", self.camera.zoom));
                });
            });

            draw_diagram_labels(ctx, scene.as_ref(), &self.camera);
        });

        self.egui
            .state
            .handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self
            .egui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui
                .renderer
                .update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view, vertex_count);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui
                .renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        let repaint = !actions.is_empty();
        for action in actions {
            self.dispatch(action);
        }
        if repaint {
            self.ctx.window.request_redraw();
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        let angle = self.session.config().angle;
        match key {
            KeyCode::KeyR => self.dispatch(Action::ResetAll),
            KeyCode::Space if !self.session.guided().has_started => self.dispatch(Action::Start),
            KeyCode::KeyE => {
                let show = !self.session.config().show_equations;
                self.dispatch(Action::Patch(ConfigPatch {
                    show_equations: Some(show),
                    ..ConfigPatch::default()
                }));
            }
            KeyCode::Equal | KeyCode::NumpadAdd => self.camera.zoom_in(),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.camera.zoom_out(),
            KeyCode::ArrowRight if angle < *ANGLE_RANGE.end() => {
                self.dispatch(Action::Patch(ConfigPatch::angle(angle + 1)))
            }
            KeyCode::ArrowLeft if angle > *ANGLE_RANGE.start() => {
                self.dispatch(Action::Patch(ConfigPatch::angle(angle - 1)))
            }
            _ => {}
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        if delta > 0.0 {
            self.camera.zoom_in();
        } else if delta < 0.0 {
            self.camera.zoom_out();
        }
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.state.on_window_event(&self.ctx.window, event).consumed
    }
}

fn main() -> Result<(), GraphicsError> {
    common::init_logging();

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = AppSettings::load_or_default(settings_path.as_deref());

    let session = match Session::with_initial(settings.guided.start_gated, &settings.initial) {
        Ok(session) => session,
        Err(err) => {
            warn!("ignoring initial configuration: {err}");
            Session::new(settings.guided.start_gated)
        }
    };

    let (ctx, event_loop) = match pollster::block_on(GraphicsContext::new(
        &settings.window.title,
        settings.window.width,
        settings.window.height,
    )) {
        Ok(created) => created,
        Err(err) => {
            log::error!("failed to initialise graphics: {err}");
            return Err(err);
        }
    };

    let mut app = App::new(ctx, session, settings.diagram.zoom);
    info!("ready (start gated: {})", settings.guided.start_gated);

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);

        if let Event::WindowEvent { ref event, .. } = event {
            let consumed = app.handle_window_event(event);

            match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => app.resize(*size),
                WindowEvent::RedrawRequested => match app.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(e) => warn!("render error: {e:?}"),
                },
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(key),
                            state,
                            ..
                        },
                    ..
                } if !consumed => app.handle_key(*key, *state),
                WindowEvent::MouseWheel { delta, .. } if !consumed => {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => *y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                    };
                    app.handle_scroll(scroll);
                }
                _ => {}
            }

            if !matches!(event, WindowEvent::RedrawRequested) {
                app.ctx.window.request_redraw();
            }
        }
    })?;

    Ok(())
}
