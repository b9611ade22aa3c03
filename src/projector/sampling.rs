use crate::image::ImageU8;

/// Bilinear sample of `src` at continuous pixel coordinates `(x, y)`.
///
/// Columns wrap around (the panorama is periodic in longitude); rows clamp
/// to the first and last row. Writes `src.channels` samples into `out`.
#[inline]
pub fn sample_bilinear(src: &ImageU8<'_>, x: f64, y: f64, out: &mut [u8]) {
    let w = src.w as i64;
    let max_y = (src.h - 1) as f64;

    let y = y.clamp(0.0, max_y);
    let y0 = y.floor();
    let fy = y - y0;
    let y0 = y0 as usize;
    let y1 = (y0 + 1).min(src.h - 1);

    let x_floor = x.floor();
    let fx = x - x_floor;
    let x0 = (x_floor as i64).rem_euclid(w) as usize;
    let x1 = (x0 + 1) % src.w;

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);
    for (c, dst) in out.iter_mut().enumerate().take(src.channels) {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        let v = top * (1.0 - fy) + bottom * fy;
        *dst = v.round().clamp(0.0, 255.0) as u8;
    }
}
