use std::io::Cursor;
use std::path::Path;

use log::debug;

use crate::error::{AssetError, AssetResult};
use crate::types::{TexelFormat, TextureData};

/// Loads a texture file. `.dds` keeps its BC blocks; everything else is
/// decoded to RGBA8.
pub fn load_texture(path: impl AsRef<Path>) -> AssetResult<TextureData> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_dds = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("dds"));

    let texture = if is_dds {
        decode_dds(&bytes, path)?
    } else {
        decode_image(&bytes, path)?
    };

    debug!(
        "Texture {:?}: {}x{} {:?} ({} bytes)",
        path,
        texture.width,
        texture.height,
        texture.format,
        texture.data.len()
    );
    Ok(texture)
}

/// Decodes PNG/JPEG bytes to RGBA8
pub fn decode_image(bytes: &[u8], path: &Path) -> AssetResult<TextureData> {
    let image = image::load_from_memory(bytes).map_err(|e| AssetError::TextureDecode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(TextureData {
        width,
        height,
        format: TexelFormat::Rgba8,
        data: rgba.into_raw(),
    })
}

/// Decodes a DDS container holding DXT1/DXT3/DXT5 (or DX10 BC1-3 / RGBA8)
/// data. Only the top mip is kept.
pub fn decode_dds(bytes: &[u8], path: &Path) -> AssetResult<TextureData> {
    let unsupported = |reason: String| AssetError::UnsupportedTexture {
        path: path.to_path_buf(),
        reason,
    };

    let mut cursor = Cursor::new(bytes);
    let dds = ddsfile::Dds::read(&mut cursor).map_err(|e| AssetError::TextureDecode {
        path: path.to_path_buf(),
        reason: format!("{e:?}"),
    })?;

    let width = dds.get_width();
    let height = dds.get_height();
    if width == 0 || height == 0 {
        return Err(unsupported("DDS has zero size".to_string()));
    }

    let format = dds_format(&dds).ok_or_else(|| {
        unsupported(format!(
            "pixel format {:?} / {:?} is not DXT1, DXT3, DXT5 or RGBA8",
            dds.get_d3d_format(),
            dds.get_dxgi_format()
        ))
    })?;

    if format.is_compressed() && (width % 4 != 0 || height % 4 != 0) {
        return Err(unsupported(format!(
            "block-compressed size {width}x{height} is not a multiple of 4"
        )));
    }

    let (bytes_per_row, rows) = format.row_layout(width, height);
    let expected_len = bytes_per_row as usize * rows as usize;
    let data: &[u8] = dds.data.as_ref();
    if data.len() < expected_len {
        return Err(AssetError::TextureDecode {
            path: path.to_path_buf(),
            reason: format!(
                "data too small for level 0: got={}, need={}",
                data.len(),
                expected_len
            ),
        });
    }

    Ok(TextureData {
        width,
        height,
        format,
        data: data[..expected_len].to_vec(),
    })
}

fn dds_format(dds: &ddsfile::Dds) -> Option<TexelFormat> {
    use ddsfile::{D3DFormat, DxgiFormat};

    if let Some(dxgi) = dds.get_dxgi_format() {
        return match dxgi {
            DxgiFormat::BC1_UNorm | DxgiFormat::BC1_UNorm_sRGB => Some(TexelFormat::Bc1),
            DxgiFormat::BC2_UNorm | DxgiFormat::BC2_UNorm_sRGB => Some(TexelFormat::Bc2),
            DxgiFormat::BC3_UNorm | DxgiFormat::BC3_UNorm_sRGB => Some(TexelFormat::Bc3),
            DxgiFormat::R8G8B8A8_UNorm | DxgiFormat::R8G8B8A8_UNorm_sRGB => {
                Some(TexelFormat::Rgba8)
            }
            _ => None,
        };
    }

    match dds.get_d3d_format()? {
        D3DFormat::DXT1 => Some(TexelFormat::Bc1),
        D3DFormat::DXT2 | D3DFormat::DXT3 => Some(TexelFormat::Bc2),
        D3DFormat::DXT4 | D3DFormat::DXT5 => Some(TexelFormat::Bc3),
        D3DFormat::A8B8G8R8 => Some(TexelFormat::Rgba8),
        _ => None,
    }
}
