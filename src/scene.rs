//! The fixed scene: which meshes and textures are drawn, and where.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::path::Path;

use anyhow::Context;
use glam::{Mat4, Vec3};
use log::{debug, info};

use crate::loaders::{load_mesh, load_texture};
use crate::types::{MeshData, TextureData, Vertex};

/// Where an object's geometry comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshSource {
    /// Path relative to the asset root
    File(&'static str),
    /// Built in code by [`ground_plane_mesh`]
    GroundPlane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneObject {
    pub name: &'static str,
    pub mesh: MeshSource,
    /// Path relative to the asset root
    pub texture: &'static str,
}

/// Objects in draw order. The order matters: each model matrix is built on
/// top of the previous one (see [`model_matrices`]).
pub const SCENE_OBJECTS: [SceneObject; 4] = [
    SceneObject {
        name: "watchtower",
        mesh: MeshSource::File("objects/watchtower.obj"),
        texture: "textures/watchtower.dds",
    },
    SceneObject {
        name: "fir",
        mesh: MeshSource::File("objects/fir.obj"),
        texture: "textures/fir.dds",
    },
    SceneObject {
        name: "ground",
        mesh: MeshSource::GroundPlane,
        texture: "textures/floor1.dds",
    },
    SceneObject {
        name: "raven",
        mesh: MeshSource::File("objects/raven.obj"),
        texture: "textures/raven.dds",
    },
];

pub const GROUND_MIN_X: f32 = -0.131034;
pub const GROUND_MAX_X: f32 = 6.722751;
pub const GROUND_MIN_Z: f32 = -8.664917;
pub const GROUND_MAX_Z: f32 = -1.811131;
pub const GROUND_Y: f32 = -0.003671;

/// Flat textured quad under the scene, facing +Y
pub fn ground_plane_mesh() -> MeshData {
    let up = [0.0, 1.0, 0.0];
    let vertices = vec![
        Vertex::new([GROUND_MIN_X, GROUND_Y, GROUND_MAX_Z], up, [0.0, 0.0]),
        Vertex::new([GROUND_MAX_X, GROUND_Y, GROUND_MAX_Z], up, [1.0, 0.0]),
        Vertex::new([GROUND_MIN_X, GROUND_Y, GROUND_MIN_Z], up, [0.0, 1.0]),
        Vertex::new([GROUND_MAX_X, GROUND_Y, GROUND_MIN_Z], up, [1.0, 1.0]),
    ];
    MeshData {
        vertices,
        indices: vec![0, 1, 2, 1, 3, 2],
    }
}

/// Model matrices for [`SCENE_OBJECTS`] at `time` seconds. The raven circles
/// its perch once every 2π seconds.
pub fn model_matrices(time: f32) -> [Mat4; 4] {
    let watchtower = Mat4::IDENTITY;

    let fir = watchtower
        * Mat4::from_translation(Vec3::new(2.0, 0.0, -7.0))
        * Mat4::from_scale(Vec3::splat(1.5));

    let ground = fir
        * Mat4::from_translation(Vec3::new(-10.0, 0.46, 40.0))
        * Mat4::from_scale(Vec3::splat(10.0));

    let raven = ground
        * Mat4::from_translation(Vec3::new(0.85, 0.35, -3.55))
        * Mat4::from_rotation_y(time)
        * Mat4::from_translation(Vec3::new(0.15, 0.0, -0.45))
        * Mat4::from_rotation_x(FRAC_PI_4)
        * Mat4::from_axis_angle(Vec3::NEG_Y, FRAC_PI_2)
        * Mat4::from_scale(Vec3::splat(0.02));

    [watchtower, fir, ground, raven]
}

/// CPU-side object ready for upload
#[derive(Debug, Clone)]
pub struct LoadedObject {
    pub name: &'static str,
    pub mesh: MeshData,
    pub texture: TextureData,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub objects: Vec<LoadedObject>,
}

impl Scene {
    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangle_count()).sum()
    }
}

/// Load every mesh and texture of the scene from `root`
pub fn load_scene(root: impl AsRef<Path>) -> anyhow::Result<Scene> {
    let root = root.as_ref();
    info!("Loading scene from {:?}", root);

    let mut objects = Vec::with_capacity(SCENE_OBJECTS.len());
    for object in &SCENE_OBJECTS {
        let mesh = match object.mesh {
            MeshSource::File(relative) => load_mesh(root.join(relative))
                .with_context(|| format!("failed to load mesh for {}", object.name))?,
            MeshSource::GroundPlane => ground_plane_mesh(),
        };
        let texture = load_texture(root.join(object.texture))
            .with_context(|| format!("failed to load texture for {}", object.name))?;

        debug!(
            "  {}: {} vertices, {} triangles, texture {}x{} {:?}",
            object.name,
            mesh.vertices.len(),
            mesh.triangle_count(),
            texture.width,
            texture.height,
            texture.format
        );
        objects.push(LoadedObject {
            name: object.name,
            mesh,
            texture,
        });
    }

    let scene = Scene { objects };
    info!(
        "Scene loaded: {} objects, {} triangles",
        scene.objects.len(),
        scene.triangle_count()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_plane_faces_up() {
        let mesh = ground_plane_mesh();
        assert_eq!(mesh.triangle_count(), 2);

        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let n = (b - a).cross(c - a).normalize();
            assert!(n.abs_diff_eq(Vec3::Y, 1e-6));
        }
    }

    #[test]
    fn ground_plane_uses_each_corner() {
        let mesh = ground_plane_mesh();
        let mut used: Vec<u32> = mesh.indices.clone();
        used.sort_unstable();
        used.dedup();
        assert_eq!(used, vec![0, 1, 2, 3]);
    }

    #[test]
    fn watchtower_sits_at_origin() {
        assert_eq!(model_matrices(0.0)[0], Mat4::IDENTITY);
    }

    #[test]
    fn fir_is_offset_and_scaled() {
        let fir = model_matrices(0.0)[1];
        assert!(fir
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(2.0, 0.0, -7.0), 1e-5));
        assert!(fir
            .transform_vector3(Vec3::X)
            .abs_diff_eq(Vec3::new(1.5, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn static_objects_ignore_time() {
        let a = model_matrices(0.0);
        let b = model_matrices(12.5);
        assert_eq!(a[..3], b[..3]);
        assert_ne!(a[3], b[3]);
    }
}
