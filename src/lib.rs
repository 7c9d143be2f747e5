pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod hud;
pub mod loaders;
pub mod renderer;
pub mod scene;
pub mod types;
pub mod viewer;
pub mod window;

pub use camera::{CameraSettings, CameraState, Projection};
pub use config::ViewerConfig;
pub use error::{AssetError, ConfigError};
pub use viewer::{Viewer, ViewerControl};
