pub mod gltf;
pub mod obj;
pub mod texture;

use std::path::Path;

use crate::error::{AssetError, AssetResult};
use crate::types::MeshData;

pub use gltf::load_gltf_mesh;
pub use obj::{load_obj_mesh, parse_obj};
pub use texture::{decode_dds, decode_image, load_texture};

/// Load a mesh, picking the parser from the file extension
pub fn load_mesh(path: impl AsRef<Path>) -> AssetResult<MeshData> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "obj" => load_obj_mesh(path),
        "gltf" | "glb" => load_gltf_mesh(path),
        _ => Err(AssetError::UnsupportedMesh {
            path: path.to_path_buf(),
            extension,
        }),
    }
}
