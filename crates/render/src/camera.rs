//! Orbit camera circling the floorplan.

use glam::{Mat4, Vec3, Vec4};

/// Target-orbit camera: yaw/pitch/distance around a fixed look-at point.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    /// Horizontal angle in radians.
    pub yaw: f32,
    /// Elevation angle in radians, clamped shy of the poles.
    pub pitch: f32,
    /// Distance from the target.
    pub distance: f32,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width/height).
    pub aspect: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
}

const MIN_PITCH: f32 = 0.05;
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.05;
const MIN_DISTANCE: f32 = 3.0;
const MAX_DISTANCE: f32 = 60.0;

impl OrbitCamera {
    /// Create a camera matching the demo's default vantage: slightly above
    /// the floor, looking at the center.
    pub fn new(aspect: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: std::f32::consts::FRAC_PI_2,
            pitch: 0.42,
            distance: 12.0,
            fov: std::f32::consts::FRAC_PI_3,
            aspect,
            near: 0.1,
            far: 200.0,
        }
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();
        self.target
            + self.distance * Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos)
    }

    /// Orbit by yaw/pitch deltas.
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Zoom by scroll steps; positive steps move closer.
    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance * (1.0 - steps * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Update aspect ratio (call when the window resizes).
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Build the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Build the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point into pixel coordinates.
    ///
    /// Returns `None` for points behind the camera. Used to anchor room
    /// labels drawn by the 2D overlay.
    pub fn project(&self, world: Vec3, viewport: (u32, u32)) -> Option<(f32, f32)> {
        let clip: Vec4 = self.view_projection_matrix() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip / clip.w;
        let x = (ndc.x * 0.5 + 0.5) * viewport.0 as f32;
        let y = (1.0 - (ndc.y * 0.5 + 0.5)) * viewport.1 as f32;
        Some((x, y))
    }
}

/// Uniform data sent to the GPU for camera transforms.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// View-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera position in world space.
    pub camera_pos: [f32; 4],
}

impl CameraUniform {
    /// Build the uniform from a camera.
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        let pos = camera.position();
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: [pos.x, pos.y, pos.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_stays_clamped() {
        let mut camera = OrbitCamera::new(16.0 / 9.0);
        camera.orbit(0.0, std::f32::consts::PI);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        camera.orbit(0.0, -std::f32::consts::PI * 2.0);
        assert!(camera.pitch > 0.0);
    }

    #[test]
    fn zoom_stays_within_limits() {
        let mut camera = OrbitCamera::new(16.0 / 9.0);
        for _ in 0..100 {
            camera.zoom(1.0);
        }
        assert!(camera.distance >= MIN_DISTANCE);
        for _ in 0..100 {
            camera.zoom(-1.0);
        }
        assert!(camera.distance <= MAX_DISTANCE);
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let camera = OrbitCamera::new(1.0);
        let (x, y) = camera.project(camera.target, (800, 800)).unwrap();
        assert!((x - 400.0).abs() < 1.0);
        assert!((y - 400.0).abs() < 1.0);
    }

    #[test]
    fn points_behind_the_camera_do_not_project() {
        let camera = OrbitCamera::new(1.0);
        let behind = camera.position() + (camera.position() - camera.target);
        assert!(camera.project(behind, (800, 800)).is_none());
    }

    #[test]
    fn view_projection_is_invertible() {
        let camera = OrbitCamera::new(16.0 / 9.0);
        assert!(camera.view_projection_matrix().determinant().abs() > 0.0);
    }
}
