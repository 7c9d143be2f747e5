//! Wavefront OBJ meshes (positions, normals, texture coordinates). Materials
//! are ignored; textures are bound by the scene.

use std::path::Path;

use log::debug;

use crate::error::{AssetError, AssetResult};
use crate::types::{MeshData, Vertex};

/// Loads an OBJ file and merges all of its models into one mesh
pub fn load_obj_mesh(path: impl AsRef<Path>) -> AssetResult<MeshData> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_obj(&input, path)
}

/// Parses OBJ text. `path` is used for error messages only.
pub fn parse_obj(input: &str, path: &Path) -> AssetResult<MeshData> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj_buf(&mut input.as_bytes(), &options, |_| {
        Ok((Vec::new(), Default::default()))
    })
    .map_err(|e| AssetError::MeshParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut mesh = MeshData::default();
    for model in models {
        debug!(
            "  OBJ model {:?}: {} positions, {} indices",
            model.name,
            model.mesh.positions.len() / 3,
            model.mesh.indices.len()
        );
        mesh.append(convert_mesh(&model.mesh));
    }

    if mesh.is_empty() {
        return Err(AssetError::EmptyMesh(path.to_path_buf()));
    }
    Ok(mesh)
}

fn convert_mesh(mesh: &tobj::Mesh) -> MeshData {
    let vertex_count = mesh.positions.len() / 3;

    let vertices = (0..vertex_count)
        .map(|i| {
            let position = [
                mesh.positions[3 * i],
                mesh.positions[3 * i + 1],
                mesh.positions[3 * i + 2],
            ];
            let normal = mesh
                .normals
                .get(3 * i..3 * i + 3)
                .map(|n| [n[0], n[1], n[2]])
                .unwrap_or([0.0, 1.0, 0.0]);
            // OBJ puts v=0 at the bottom of the image
            let uv = mesh
                .texcoords
                .get(2 * i..2 * i + 2)
                .map(|t| [t[0], 1.0 - t[1]])
                .unwrap_or([0.0, 0.0]);
            Vertex::new(position, normal, uv)
        })
        .collect();

    let indices = if mesh.indices.is_empty() {
        (0..vertex_count as u32).collect()
    } else {
        mesh.indices.clone()
    };

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
o quad
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 0.0 1.0
v 0.0 0.0 1.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 1.0 0.0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quad_is_triangulated() {
        let mesh = parse_obj(QUAD, Path::new("quad.obj")).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn texture_v_is_flipped() {
        let mesh = parse_obj(QUAD, Path::new("quad.obj")).unwrap();
        let first = mesh
            .vertices
            .iter()
            .find(|v| v.position == [0.0, 0.0, 0.0])
            .unwrap();
        assert_eq!(first.uv, [0.0, 1.0]);
    }

    #[test]
    fn missing_normals_default_up() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = parse_obj(obj, Path::new("tri.obj")).unwrap();
        assert_eq!(mesh.vertices[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(mesh.vertices[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn empty_obj_is_an_error() {
        let err = parse_obj("# nothing here\n", Path::new("empty.obj")).unwrap_err();
        assert!(matches!(err, AssetError::EmptyMesh(_)));
    }
}
