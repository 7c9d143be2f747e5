// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "watchtower-viewer")]
#[command(about = "Fly-through viewer for the watchtower scene", long_about = None)]
pub struct Cli {
    /// Disable the on-screen overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON config file; flags below override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory containing objects/ and textures/
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Movement speed in units per second
    #[arg(long)]
    pub speed: Option<f32>,

    /// Mouse-look sensitivity in degrees per pixel
    #[arg(long)]
    pub sensitivity: Option<f32>,
}
