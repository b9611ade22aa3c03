use crate::angle::{FULL_TURN_DEG, NADIR_DEG, ZENITH_DEG};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Maximum vertical field of view a pinhole tile can span.
pub const MAX_VERTICAL_FOV_DEG: f64 = 180.0;

/// Horizontal and vertical field of view in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldOfView {
    pub h: f64,
    pub v: f64,
}

impl FieldOfView {
    pub fn new(h: f64, v: f64) -> Result<Self, ConfigError> {
        check_fov("horizontal", h, FULL_TURN_DEG)?;
        check_fov("vertical", v, MAX_VERTICAL_FOV_DEG)?;
        Ok(Self { h, v })
    }
}

impl Default for FieldOfView {
    fn default() -> Self {
        Self { h: 100.0, v: 100.0 }
    }
}

fn check_fov(axis: &'static str, value: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= max {
        Ok(())
    } else {
        Err(ConfigError::FieldOfView { axis, value, max })
    }
}

/// Percentage of the field of view shared by neighbouring tiles, in [0, 100).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Overlap(f64);

impl Overlap {
    pub fn new(pct: f64) -> Result<Self, ConfigError> {
        if pct.is_finite() && (0.0..100.0).contains(&pct) {
            Ok(Self(pct))
        } else {
            Err(ConfigError::Overlap(pct))
        }
    }

    #[inline]
    pub fn percent(self) -> f64 {
        self.0
    }
}

impl Default for Overlap {
    fn default() -> Self {
        Self(5.0)
    }
}

/// Starting orientation (yaw `u`, pitch `v`) in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseAngle {
    pub u: f64,
    pub v: f64,
}

impl BaseAngle {
    pub fn new(u: f64, v: f64) -> Result<Self, ConfigError> {
        let u_ok = u.is_finite() && (0.0..FULL_TURN_DEG).contains(&u);
        let v_ok = v.is_finite() && (NADIR_DEG..=ZENITH_DEG).contains(&v);
        if u_ok && v_ok {
            Ok(Self { u, v })
        } else {
            Err(ConfigError::BaseAngle { u, v })
        }
    }
}

/// Output tile size (height, width) in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub height: u32,
    pub width: u32,
}

impl Resolution {
    pub fn new(height: u32, width: u32) -> Result<Self, ConfigError> {
        if height == 0 || width == 0 {
            return Err(ConfigError::Resolution { height, width });
        }
        Ok(Self { height, width })
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            height: 800,
            width: 800,
        }
    }
}

/// Horizontal and vertical angles left out of the grid.
///
/// Membership is exact float equality against the wrapped/clamped grid
/// coordinates. No tolerance is applied.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExclusionSets {
    pub h: Vec<f64>,
    pub v: Vec<f64>,
}

impl ExclusionSets {
    pub fn new(h: Vec<f64>, v: Vec<f64>) -> Self {
        Self { h, v }
    }

    #[inline]
    pub fn excludes_h(&self, h: f64) -> bool {
        self.h.iter().any(|&x| x == h)
    }

    #[inline]
    pub fn excludes_v(&self, v: f64) -> bool {
        self.v.iter().any(|&x| x == v)
    }
}

/// One camera orientation: heading `h` in [0, 360), pitch `v` in [-90, 90].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ViewingAngle {
    pub h: f64,
    pub v: f64,
}

impl ViewingAngle {
    pub const fn new(h: f64, v: f64) -> Self {
        Self { h, v }
    }
}
