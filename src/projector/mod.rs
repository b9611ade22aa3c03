//! Equirectangular → perspective projection.
//!
//! [`Projector`] is the seam between the tiling pipeline and the pixel
//! remapping. [`EquirectProjector`] is the bundled implementation: a pinhole
//! camera on the unit sphere.
//!
//! # Coordinate conventions
//!
//! - **Tangent plane**: `z = 1`, `x ∈ [-tan(fov_h/2), tan(fov_h/2)]` to the
//!   right, `y ∈ [-tan(fov_v/2), tan(fov_v/2)]` up. Pixel centres are spread
//!   evenly with the first and last column on the plane edges.
//! - **Orientation**: a ray is pitched by `v` about +x and then turned by `u`
//!   about +y, so `u` grows towards the right of the panorama and `v = 90`
//!   looks straight up.
//! - **Panorama**: longitude `atan2(x, z)` maps linearly onto the full image
//!   width with 0 at the centre column, latitude `atan2(y, hypot(x, z))` onto
//!   the height with +90 at the top row.
//!
//! # Pipeline
//!
//! ```text
//! pixel → tangent plane → rotate (pitch, then yaw) → lon/lat → source pixel → bilinear sample
//! ```

mod sampling;

pub use sampling::sample_bilinear;

use crate::error::ProjectionError;
use crate::image::{ImageU8, ImageViewMut, PixelBuffer};
use crate::types::{FieldOfView, Resolution, ViewingAngle};
use nalgebra::{Matrix3, Rotation3, Vector3};
use std::f64::consts::{PI, TAU};

/// Renders one perspective view out of a panorama.
pub trait Projector: Send + Sync {
    /// Reject a field of view this projector can never render. Called once
    /// per run, before any tile is produced.
    fn check_fov(&self, _fov: FieldOfView) -> Result<(), ProjectionError> {
        Ok(())
    }

    fn project(
        &self,
        source: &ImageU8<'_>,
        fov: FieldOfView,
        angle: ViewingAngle,
        resolution: Resolution,
    ) -> Result<PixelBuffer, ProjectionError>;
}

/// A pinhole view must stay strictly narrower than this on both axes.
pub const MAX_PINHOLE_FOV_DEG: f64 = 180.0;

/// Gnomonic projection with bilinear sampling, longitude wrap and latitude
/// clamping.
#[derive(Clone, Copy, Debug, Default)]
pub struct EquirectProjector;

impl EquirectProjector {
    pub fn new() -> Self {
        Self
    }
}

impl Projector for EquirectProjector {
    fn check_fov(&self, fov: FieldOfView) -> Result<(), ProjectionError> {
        let pinhole = |deg: f64| deg > 0.0 && deg < MAX_PINHOLE_FOV_DEG;
        if pinhole(fov.h) && pinhole(fov.v) {
            Ok(())
        } else {
            Err(ProjectionError::FieldOfView { h: fov.h, v: fov.v })
        }
    }

    fn project(
        &self,
        source: &ImageU8<'_>,
        fov: FieldOfView,
        angle: ViewingAngle,
        resolution: Resolution,
    ) -> Result<PixelBuffer, ProjectionError> {
        if source.w == 0 || source.h == 0 || source.channels == 0 {
            return Err(ProjectionError::EmptySource);
        }
        let (out_w, out_h) = (resolution.width as usize, resolution.height as usize);
        if out_w == 0 || out_h == 0 {
            return Err(ProjectionError::EmptyOutput {
                height: resolution.height,
                width: resolution.width,
            });
        }
        self.check_fov(fov)?;
        let (half_h, half_v) = (fov.h.to_radians() / 2.0, fov.v.to_radians() / 2.0);

        let xs = linspace(-half_h.tan(), half_h.tan(), out_w);
        let ys = linspace(half_v.tan(), -half_v.tan(), out_h);
        let rot = view_rotation(angle);
        let (src_w, src_h) = (source.w as f64, source.h as f64);
        let channels = source.channels;

        let mut out = PixelBuffer::new(out_w, out_h, channels);
        for (row, &y) in ys.iter().enumerate() {
            let dst = out.row_mut(row);
            for (col, &x) in xs.iter().enumerate() {
                let ray = rot * Vector3::new(x, y, 1.0);
                let lon = ray.x.atan2(ray.z);
                let lat = ray.y.atan2(ray.x.hypot(ray.z));
                let sx = (lon / TAU + 0.5) * src_w - 0.5;
                let sy = (-lat / PI + 0.5) * src_h - 0.5;
                let px = &mut dst[col * channels..(col + 1) * channels];
                sample_bilinear(source, sx, sy, px);
            }
        }
        Ok(out)
    }
}

/// Rotation taking camera rays to panorama rays for a viewing angle.
pub fn view_rotation(angle: ViewingAngle) -> Matrix3<f64> {
    let pitch = Rotation3::from_axis_angle(&Vector3::x_axis(), -angle.v.to_radians());
    let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), angle.h.to_radians());
    (yaw * pitch).into_inner()
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.5 * (start + end)],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}
