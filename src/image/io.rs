//! Codec helpers for panoramas, tiles and JSON.
//!
//! - `load_image`: decode a JPEG/PNG/etc. into an owned 8-bit buffer, keeping
//!   gray, RGB or RGBA layout.
//! - `save_png`: encode a buffer as PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageView, PixelBuffer};
use crate::error::ImageError;
use image::{ColorType, DynamicImage, ImageFormat};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode an image from disk into an interleaved 8-bit buffer.
///
/// Sources with an alpha channel become RGBA, other color sources RGB, and
/// grayscale sources stay single-channel. Higher bit depths are reduced to 8.
pub fn load_image(path: &Path) -> Result<PixelBuffer, ImageError> {
    let img = image::open(path).map_err(|source| ImageError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    from_dynamic(img)
}

pub fn from_dynamic(img: DynamicImage) -> Result<PixelBuffer, ImageError> {
    let color = img.color();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (channels, data) = if color.has_alpha() {
        (4, img.into_rgba8().into_raw())
    } else if color.has_color() {
        (3, img.into_rgb8().into_raw())
    } else {
        (1, img.into_luma8().into_raw())
    };
    PixelBuffer::from_raw(width, height, channels, data)
}

/// Encode a buffer as PNG at `path`, creating parent directories.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<(), ImageError> {
    ensure_parent_dir(path)?;
    let color = match buffer.channels() {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        n => return Err(ImageError::Channels(n)),
    };
    image::save_buffer_with_format(
        path,
        buffer.data(),
        buffer.width() as u32,
        buffer.height() as u32,
        color,
        ImageFormat::Png,
    )
    .map_err(|source| ImageError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), ImageError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| ImageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), ImageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ImageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
