use std::path::PathBuf;

use thiserror::Error;

/// Configuration failures, reported before any window exists
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Mesh and texture loading failures
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse mesh {path}: {reason}")]
    MeshParse { path: PathBuf, reason: String },

    #[error("mesh {0} contains no triangles")]
    EmptyMesh(PathBuf),

    #[error("unsupported mesh format `{extension}` for {path}")]
    UnsupportedMesh { path: PathBuf, extension: String },

    #[error("failed to decode texture {path}: {reason}")]
    TextureDecode { path: PathBuf, reason: String },

    #[error("unsupported texture {path}: {reason}")]
    UnsupportedTexture { path: PathBuf, reason: String },
}

pub type AssetResult<T> = std::result::Result<T, AssetError>;
