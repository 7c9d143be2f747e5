use glam::{Mat4, Vec3};

/// Interleaved mesh vertex: position, normal, texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle mesh in CPU memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis-aligned bounds of the vertex positions, `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Append another mesh, rebasing its indices
    pub fn append(&mut self, other: MeshData) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }
}

/// Pixel layout of a decoded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexelFormat {
    Rgba8,
    /// DXT1
    Bc1,
    /// DXT3
    Bc2,
    /// DXT5
    Bc3,
}

impl TexelFormat {
    pub fn is_compressed(self) -> bool {
        !matches!(self, TexelFormat::Rgba8)
    }

    /// Bytes per 4x4 block for compressed formats, per pixel for RGBA8
    pub fn block_size(self) -> u32 {
        match self {
            TexelFormat::Rgba8 => 4,
            TexelFormat::Bc1 => 8,
            TexelFormat::Bc2 | TexelFormat::Bc3 => 16,
        }
    }

    pub fn wgpu_format(self) -> wgpu::TextureFormat {
        match self {
            TexelFormat::Rgba8 => wgpu::TextureFormat::Rgba8UnormSrgb,
            TexelFormat::Bc1 => wgpu::TextureFormat::Bc1RgbaUnormSrgb,
            TexelFormat::Bc2 => wgpu::TextureFormat::Bc2RgbaUnormSrgb,
            TexelFormat::Bc3 => wgpu::TextureFormat::Bc3RgbaUnormSrgb,
        }
    }

    /// `(bytes_per_row, rows)` of one image of the given size
    pub fn row_layout(self, width: u32, height: u32) -> (u32, u32) {
        if self.is_compressed() {
            (width.div_ceil(4) * self.block_size(), height.div_ceil(4))
        } else {
            (width * 4, height)
        }
    }
}

/// Decoded top-level mip of a texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub format: TexelFormat,
    pub data: Vec<u8>,
}

impl TextureData {
    /// 1x1 opaque RGBA texture
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            format: TexelFormat::Rgba8,
            data: rgba.to_vec(),
        }
    }

    /// Stand-in for textures the device cannot sample
    pub fn placeholder() -> Self {
        Self::solid([255, 0, 255, 255])
    }
}

/// Per-frame uniform: camera and light
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_position: [f32; 3],
    pub _pad1: f32,
    pub light_position: [f32; 3],
    pub _pad2: f32,
    pub light_color: [f32; 3],
    pub _pad3: f32,
}

impl FrameUniform {
    pub fn new(view: Mat4, projection: Mat4, view_position: Vec3, light_position: Vec3, light_color: Vec3) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            view_position: view_position.to_array(),
            _pad1: 0.0,
            light_position: light_position.to_array(),
            _pad2: 0.0,
            light_color: light_color.to_array(),
            _pad3: 0.0,
        }
    }
}

/// Per-object uniform: model matrix and its normal matrix
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<FrameUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 128);
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn bc_row_layout_rounds_up_to_blocks() {
        assert_eq!(TexelFormat::Bc1.row_layout(256, 128), (64 * 8, 32));
        assert_eq!(TexelFormat::Bc3.row_layout(6, 6), (2 * 16, 2));
        assert_eq!(TexelFormat::Rgba8.row_layout(3, 2), (12, 2));
    }

    #[test]
    fn append_rebases_indices() {
        let tri = MeshData {
            vertices: vec![Vertex::new([0.0; 3], [0.0, 1.0, 0.0], [0.0; 2]); 3],
            indices: vec![0, 1, 2],
        };
        let mut mesh = tri.clone();
        mesh.append(tri);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mesh = MeshData {
            vertices: vec![
                Vertex::new([-1.0, 0.0, 2.0], [0.0; 3], [0.0; 2]),
                Vertex::new([3.0, -4.0, 0.5], [0.0; 3], [0.0; 2]),
            ],
            indices: vec![],
        };
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, -4.0, 0.5));
        assert_eq!(max, Vec3::new(3.0, 0.0, 2.0));
        assert!(MeshData::default().bounds().is_none());
    }
}
