use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use tempfile::NamedTempFile;
use watchtower_viewer::cli::Cli;
use watchtower_viewer::config::ViewerConfig;
use watchtower_viewer::error::ConfigError;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "watchtower-viewer",
            "--no-ui",
            "--config",
            "viewer.json",
            "--assets",
            "data",
            "--speed",
            "2.5",
            "--sensitivity",
            "0.1",
        ])
        .expect("valid flags");

        assert!(cli.no_ui);
        assert_eq!(cli.config, Some(PathBuf::from("viewer.json")));
        assert_eq!(cli.assets, Some(PathBuf::from("data")));
        assert_eq!(cli.speed, Some(2.5));
        assert_eq!(cli.sensitivity, Some(0.1));
    }

    #[test]
    fn test_no_flags_means_defaults() {
        let cli = Cli::try_parse_from(["watchtower-viewer"]).expect("no flags");
        assert!(!cli.no_ui);
        let config = ViewerConfig::resolve(&cli).expect("defaults resolve");
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_rejects_non_numeric_speed() {
        assert!(Cli::try_parse_from(["watchtower-viewer", "--speed", "fast"]).is_err());
    }
}

#[cfg(test)]
mod resolve_tests {
    use super::*;

    #[test]
    fn test_file_values_apply() {
        let file = config_file(
            r#"{
                "window": { "width": 1024, "height": 512 },
                "camera": { "position": [1.0, 2.0, 3.0], "yaw": 0.0 },
                "light": { "color": [1.0, 0.5, 0.25] }
            }"#,
        );
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let config = ViewerConfig::resolve(&cli).expect("valid file");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.title, "Watchtower Viewer");
        assert_eq!(config.projection().aspect, 2.0);

        let camera = config.camera_state();
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(camera.front().abs_diff_eq(Vec3::X, 1e-6));
        assert_eq!(config.light.position, Vec3::splat(15.0));
        assert_eq!(config.light.color, Vec3::new(1.0, 0.5, 0.25));
    }

    #[test]
    fn test_flags_override_file() {
        let file = config_file(r#"{ "camera": { "speed": 1.0, "sensitivity": 0.2 } }"#);
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            speed: Some(8.0),
            assets: Some(PathBuf::from("elsewhere")),
            ..Default::default()
        };

        let config = ViewerConfig::resolve(&cli).expect("valid");
        assert_eq!(config.camera.speed, 8.0);
        assert_eq!(config.camera.sensitivity, 0.2);
        assert_eq!(config.assets.root, PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/definitely/not/here.json")),
            ..Default::default()
        };
        assert!(matches!(
            ViewerConfig::resolve(&cli),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = config_file("{ camera: ");
        assert!(matches!(
            ViewerConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            (r#"{ "camera": { "pitch": 95.0 } }"#, "camera.pitch"),
            (r#"{ "camera": { "fov_y": 0.0 } }"#, "camera.fov_y"),
            (r#"{ "window": { "width": 0 } }"#, "window"),
        ];
        for (json, expected_field) in cases {
            let file = config_file(json);
            let cli = Cli {
                config: Some(file.path().to_path_buf()),
                ..Default::default()
            };
            match ViewerConfig::resolve(&cli) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("{} should be invalid, got {:?}", json, other),
            }
        }
    }

    #[test]
    fn test_negative_speed_flag_rejected() {
        let cli = Cli {
            speed: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            ViewerConfig::resolve(&cli),
            Err(ConfigError::Invalid { field: "camera.speed", .. })
        ));
    }
}
