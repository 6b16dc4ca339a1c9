//! Rendering for the free body diagram
//!
//! Geometry goes through a single line-list pipeline; force labels and the
//! start placeholder are painted by egui on top, projected with the same
//! camera.

use common::{create_uniform_buffer, Camera2D, CameraUniform, GraphicsContext, LineVertex};
use egui::{Align2, Color32, FontId};
use glam::Vec2;

use crate::diagram::Scene;

/// Upper bound on diagram vertices
pub const MAX_VERTICES: usize = 4096;

const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.97,
    g: 0.97,
    b: 0.96,
    a: 1.0,
};

/// Line vertices for every segment of `scene`, two per segment
pub fn scene_vertices(scene: &Scene) -> Vec<LineVertex> {
    let mut vertices: Vec<LineVertex> = scene
        .line_segments()
        .into_iter()
        .flat_map(|(segment, color)| {
            [
                LineVertex::new(segment.start.to_array(), color),
                LineVertex::new(segment.end.to_array(), color),
            ]
        })
        .collect();
    if vertices.len() > MAX_VERTICES {
        log::warn!("diagram has {} vertices, truncating", vertices.len());
        vertices.truncate(MAX_VERTICES);
    }
    vertices
}

pub struct DiagramRenderer {
    pipeline: wgpu::RenderPipeline,
    line_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
}

impl DiagramRenderer {
    pub fn new(ctx: &GraphicsContext, camera: &Camera2D) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Diagram Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/diagram.wgsl").into()),
        });

        let camera_buffer = create_uniform_buffer(device, &CameraUniform::from_camera_2d(camera));

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Diagram Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Diagram Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_line",
                buffers: &[LineVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_line",
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Diagram Line Buffer"),
            size: (std::mem::size_of::<LineVertex>() * MAX_VERTICES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            line_buffer,
            camera_buffer,
            camera_bind_group,
        }
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &Camera2D) {
        let uniform = CameraUniform::from_camera_2d(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload the scene, returning the number of vertices to draw
    pub fn update_scene(&self, queue: &wgpu::Queue, scene: Option<&Scene>) -> u32 {
        let Some(scene) = scene else {
            return 0;
        };
        let vertices = scene_vertices(scene);
        queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&vertices));
        vertices.len() as u32
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        vertex_count: u32,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Diagram Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(BACKGROUND),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if vertex_count > 0 {
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
            render_pass.draw(0..vertex_count, 0..1);
        }
    }
}

pub fn to_color32(color: [f32; 4]) -> Color32 {
    let [r, g, b, a] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Paint force labels over the diagram, or the start placeholder when no
/// scene is loaded yet.
pub fn draw_diagram_labels(ctx: &egui::Context, scene: Option<&Scene>, camera: &Camera2D) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    let screen = ctx.screen_rect();
    let screen_size = Vec2::new(screen.width(), screen.height());
    let to_pos = |world: Vec2| {
        let p = camera.world_to_screen(world, screen_size);
        egui::pos2(p.x, p.y)
    };

    let Some(scene) = scene else {
        painter.text(
            screen.center(),
            Align2::CENTER_BOTTOM,
            "No diagram loaded yet",
            FontId::proportional(26.0),
            Color32::DARK_GRAY,
        );
        painter.text(
            screen.center() + egui::vec2(0.0, 12.0),
            Align2::CENTER_TOP,
            "Press \"Start Simulation\" to begin",
            FontId::proportional(18.0),
            Color32::GRAY,
        );
        return;
    };

    for arrow in &scene.arrows {
        painter.text(
            to_pos(arrow.label_anchor()),
            Align2::CENTER_CENTER,
            arrow.kind.label(),
            FontId::proportional(16.0),
            to_color32(arrow.kind.color()),
        );
    }

    if let Some(anchor) = scene.angle_arc.get(scene.angle_arc.len() / 2) {
        let offset = (*anchor - scene.incline.start) * 0.3;
        painter.text(
            to_pos(*anchor + offset),
            Align2::CENTER_CENTER,
            "θ",
            FontId::proportional(18.0),
            to_color32(crate::diagram::ARC_COLOR),
        );
    }
}
