//! Viewer configuration.
//!
//! Defaults reproduce the fixed constants of the scene. A JSON file can
//! override any subset of fields, and command-line flags override the file.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{
    CameraSettings, CameraState, Projection, DEFAULT_POSITION, DEFAULT_SENSITIVITY, DEFAULT_SPEED,
    DEFAULT_YAW, PITCH_LIMIT,
};
use crate::cli::Cli;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Hide and grab the cursor for mouse-look
    pub capture_cursor: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 640,
            title: "Watchtower Viewer".to_string(),
            capture_cursor: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Degrees
    pub yaw: f32,
    /// Degrees
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let projection = Projection::default();
        Self {
            position: DEFAULT_POSITION,
            yaw: DEFAULT_YAW,
            pitch: 0.0,
            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            fov_y: projection.fov_y_degrees,
            near: projection.near,
            far: projection.far,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub position: Vec3,
    pub color: Vec3,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: Vec3::splat(15.0),
            color: Vec3::ONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding `objects/` and `textures/`
    pub root: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub assets: AssetConfig,
}

impl ViewerConfig {
    /// Parse a JSON config file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the effective config: defaults, then the `--config` file, then flags
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(root) = &cli.assets {
            self.assets.root = root.clone();
        }
        if let Some(speed) = cli.speed {
            self.camera.speed = speed;
        }
        if let Some(sensitivity) = cli.sensitivity {
            self.camera.sensitivity = sensitivity;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        };

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(
                "window",
                format!("size must be non-zero, got {}x{}", self.window.width, self.window.height),
            );
        }

        let camera = &self.camera;
        if !camera.speed.is_finite() || camera.speed < 0.0 {
            return invalid("camera.speed", format!("must be finite and >= 0, got {}", camera.speed));
        }
        if !camera.sensitivity.is_finite() {
            return invalid("camera.sensitivity", format!("must be finite, got {}", camera.sensitivity));
        }
        if !camera.yaw.is_finite() {
            return invalid("camera.yaw", format!("must be finite, got {}", camera.yaw));
        }
        if !(-PITCH_LIMIT..=PITCH_LIMIT).contains(&camera.pitch) {
            return invalid(
                "camera.pitch",
                format!("must lie in [-{PITCH_LIMIT}, {PITCH_LIMIT}], got {}", camera.pitch),
            );
        }
        if !camera.position.is_finite() {
            return invalid("camera.position", format!("must be finite, got {}", camera.position));
        }
        if !(camera.fov_y > 0.0 && camera.fov_y < 180.0) {
            return invalid("camera.fov_y", format!("must lie in (0, 180), got {}", camera.fov_y));
        }
        if !(camera.near > 0.0 && camera.near < camera.far) {
            return invalid(
                "camera.near",
                format!("need 0 < near < far, got near={} far={}", camera.near, camera.far),
            );
        }

        Ok(())
    }

    pub fn camera_state(&self) -> CameraState {
        CameraState::new(self.camera.position, self.camera.yaw, self.camera.pitch)
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            speed: self.camera.speed,
            sensitivity: self.camera.sensitivity,
        }
    }

    /// Aspect follows the configured window shape and stays fixed afterwards
    pub fn projection(&self) -> Projection {
        Projection {
            fov_y_degrees: self.camera.fov_y,
            aspect: self.window.width as f32 / self.window.height as f32,
            near: self.camera.near,
            far: self.camera.far,
        }
    }
}
