//! Orthographic camera for 2D diagrams

use glam::{Mat4, Vec2, Vec3};

/// Smallest zoom factor the camera accepts
pub const MIN_ZOOM: f32 = 0.6;
/// Largest zoom factor the camera accepts
pub const MAX_ZOOM: f32 = 2.0;
/// Increment applied by [`Camera2D::zoom_in`] and [`Camera2D::zoom_out`]
pub const ZOOM_STEP: f32 = 0.1;

/// 2D orthographic camera
///
/// `half_height` is the visible half-height in world units at zoom 1.0;
/// larger zoom magnifies the scene.
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub position: Vec2,
    pub half_height: f32,
    pub zoom: f32,
    pub aspect_ratio: f32,
}

impl Camera2D {
    pub fn new(aspect_ratio: f32, half_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            half_height,
            zoom: 1.0,
            aspect_ratio,
        }
    }

    /// Visible half extents in world units
    pub fn half_extents(&self) -> Vec2 {
        let half_height = self.half_height / self.zoom;
        Vec2::new(half_height * self.aspect_ratio, half_height)
    }

    /// Get the view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        let half = self.half_extents();

        let projection = Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, -1.0, 1.0);
        let view = Mat4::from_translation(-self.position.extend(0.0));

        projection * view
    }

    /// Map a world point to screen coordinates (origin top-left, y down)
    pub fn world_to_screen(&self, world: Vec2, screen_size: Vec2) -> Vec2 {
        let ndc = self.view_projection() * world.extend(0.0).extend(1.0);
        Vec2::new(
            (ndc.x * 0.5 + 0.5) * screen_size.x,
            (0.5 - ndc.y * 0.5) * screen_size.y,
        )
    }

    /// Set the zoom factor, clamped and snapped to the zoom step.
    /// Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if !zoom.is_finite() {
            return;
        }
        let snapped = (zoom / ZOOM_STEP).round() * ZOOM_STEP;
        self.zoom = snapped.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera_2d(camera: &Camera2D) -> Self {
        let position = Vec3::new(camera.position.x, camera.position.y, 0.0);
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: [position.x, position.y, position.z, 1.0],
        }
    }
}
