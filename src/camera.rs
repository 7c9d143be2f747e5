use glam::{Mat4, Vec3};

use crate::core::{Controller, Key};

/// Pitch never leaves `[-PITCH_LIMIT, PITCH_LIMIT]` degrees; at ±90 the view
/// flips over the pole.
pub const PITCH_LIMIT: f32 = 89.0;
pub const DEFAULT_SPEED: f32 = 5.0;
pub const DEFAULT_SENSITIVITY: f32 = 0.05;
pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 3.0, 3.0);

/// Tunables for the fly controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// World units per second
    pub speed: f32,
    /// Degrees per pixel of cursor travel
    pub sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

/// Fixed perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Unit view direction for yaw/pitch given in degrees
pub fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

/// Euler-angle free-look camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
}

impl CameraState {
    /// Camera at `position` looking along yaw/pitch (degrees).
    /// Pitch is clamped on the way in.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        Self {
            position,
            front: front_from_angles(yaw, pitch),
            up: Vec3::Y,
            yaw,
            pitch,
        }
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Strafe axis
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize()
    }

    /// Add already-scaled angle offsets in degrees. Yaw is left unbounded so
    /// turning is continuous.
    pub fn rotate(&mut self, yaw_offset: f32, pitch_offset: f32) {
        self.yaw += yaw_offset;
        self.pitch = (self.pitch + pitch_offset).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.front = front_from_angles(self.yaw, self.pitch);
    }

    /// Translate for one frame of held movement keys. Each held key contributes
    /// independently, so diagonals move faster than a single axis.
    pub fn advance(&mut self, controller: &dyn Controller, speed: f32, delta: f32) {
        let step = speed * delta;

        if controller.is_down(Key::Forward) {
            self.position += step * self.front;
        }
        if controller.is_down(Key::Backward) {
            self.position -= step * self.front;
        }
        if controller.is_down(Key::StrafeLeft) {
            self.position -= self.right() * step;
        }
        if controller.is_down(Key::StrafeRight) {
            self.position += self.right() * step;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION, DEFAULT_YAW, 0.0)
    }
}
