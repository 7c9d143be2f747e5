use glam::{Mat3, Mat4, Vec3};
use log::debug;
use std::path::Path;

use crate::error::{AssetError, AssetResult};
use crate::types::{MeshData, Vertex};

/// Loads a glTF/GLB file and flattens every triangle primitive of the default
/// scene (or all scenes) into one mesh with node transforms baked in
pub fn load_gltf_mesh(path: impl AsRef<Path>) -> AssetResult<MeshData> {
    let path = path.as_ref();

    let (gltf, buffers, _images) = gltf::import(path).map_err(|e| AssetError::MeshParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(
        "glTF {:?}: {} scenes, {} nodes, {} meshes",
        path,
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count()
    );

    let mut mesh = MeshData::default();
    let scenes: Vec<gltf::Scene> = match gltf.default_scene() {
        Some(scene) => vec![scene],
        None => gltf.scenes().collect(),
    };

    for scene in scenes {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut mesh, path)?;
        }
    }

    if mesh.is_empty() {
        return Err(AssetError::EmptyMesh(path.to_path_buf()));
    }
    Ok(mesh)
}

/// Recursively processes glTF nodes
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    mesh: &mut MeshData,
    path: &Path,
) -> AssetResult<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(node_mesh) = node.mesh() {
        process_mesh(&node_mesh, buffers, &global_transform, mesh, path)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, mesh, path)?;
    }

    Ok(())
}

/// Processes a glTF mesh
fn process_mesh(
    gltf_mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    mesh: &mut MeshData,
    path: &Path,
) -> AssetResult<()> {
    let normal_matrix = Mat3::from_mat4(*transform).inverse().transpose();

    for primitive in gltf_mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            debug!("  skipping {:?} primitive in {:?}", primitive.mode(), gltf_mesh.name());
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .ok_or_else(|| AssetError::MeshParse {
                path: path.to_path_buf(),
                reason: format!("primitive in mesh {:?} has no positions", gltf_mesh.name()),
            })?
            .map(|p| transform.transform_point3(Vec3::from_array(p)))
            .collect();

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals
                .map(|n| (normal_matrix * Vec3::from_array(n)).try_normalize().unwrap_or(Vec3::Y))
                .collect(),
            None => vec![Vec3::Y; positions.len()],
        };

        let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
            Some(uvs) => uvs.into_f32().collect(),
            None => vec![[0.0, 0.0]; positions.len()],
        };

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        if indices.iter().any(|&i| i as usize >= positions.len()) {
            return Err(AssetError::MeshParse {
                path: path.to_path_buf(),
                reason: format!("index out of range in mesh {:?}", gltf_mesh.name()),
            });
        }

        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let normal = normals.get(i).copied().unwrap_or(Vec3::Y);
                let uv = uvs.get(i).copied().unwrap_or([0.0, 0.0]);
                Vertex::new(p.to_array(), normal.to_array(), uv)
            })
            .collect();

        mesh.append(MeshData { vertices, indices });
    }

    Ok(())
}
