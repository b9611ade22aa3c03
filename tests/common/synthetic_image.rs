use std::path::{Path, PathBuf};

/// Generates an RGB equirectangular test panorama.
///
/// Red follows longitude, green follows latitude and blue marks a band of
/// columns around the back seam so the wrap is visible in tiles.
pub fn equirect_rgb(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 1 && height > 1, "image dimensions must exceed one pixel");

    let mut img = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / (width - 1)) as u8;
            let g = (y * 255 / (height - 1)) as u8;
            let b = if x < width / 16 || x >= width - width / 16 {
                255
            } else {
                0
            };
            img.extend_from_slice(&[r, g, b]);
        }
    }
    img
}

/// Writes [`equirect_rgb`] to `dir/name`; the format follows the extension.
pub fn write_panorama(dir: &Path, name: &str, width: usize, height: usize) -> PathBuf {
    let path = dir.join(name);
    let data = equirect_rgb(width, height);
    image::save_buffer(
        &path,
        &data,
        width as u32,
        height as u32,
        image::ExtendedColorType::Rgb8,
    )
    .expect("write synthetic panorama");
    path
}
