//! Viewing-angle grid generator.
//!
//! For one panorama the generator decides which camera orientations are
//! sampled. The algorithm performs:
//!
//! - Step sizes: `step = fov * (1 - overlap / 100)` per axis. Both are strictly
//!   positive because [`Overlap`] is bounded below 100 and [`FieldOfView`] is
//!   bounded above 0.
//! - Horizontal candidates: the half-open progression from `base.u` to 360,
//!   each value wrapped into [0, 360).
//! - Vertical candidates: the half-open progression from
//!   `max(-90, base.v - fov.v / 2)` to `90 + 1`, each value clamped into
//!   [-90, 90]. The extra degree above the pole lets a progression whose last
//!   step lands on 90 (or a fraction of a degree past it) keep that row.
//! - Base set: vertical-major cross product of the candidates, skipping any
//!   excluded heading or pitch.
//! - Zenith cap: one extra `(h, 90)` view per surviving heading unless 90
//!   itself is excluded. When the vertical progression already produced a
//!   v = 90 row, the cap repeats it; the repeat is kept so tile counts and
//!   numbering stay stable.
//!
//! Exclusions compare with exact float equality after wrap and clamp.
//!
//! The result is neither sorted nor deduplicated; see
//! [`crate::ordering`] for the emission order.

mod candidates;

pub use candidates::{horizontal_candidates, vertical_candidates, VERTICAL_STOP_PAD_DEG};

use crate::angle::{tile_step, ZENITH_DEG};
use crate::types::{BaseAngle, ExclusionSets, FieldOfView, Overlap, ViewingAngle};
use log::debug;
use serde::Serialize;

/// Inputs of the grid generator.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GridParams {
    pub base: BaseAngle,
    pub fov: FieldOfView,
    pub overlap: Overlap,
    pub exclude: ExclusionSets,
}

impl GridParams {
    /// Distance between neighbouring tile centres, `(horizontal, vertical)`.
    pub fn steps(&self) -> (f64, f64) {
        let pct = self.overlap.percent();
        (tile_step(self.fov.h, pct), tile_step(self.fov.v, pct))
    }
}

/// Unordered viewing angles of one panorama.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AngleGrid {
    pub angles: Vec<ViewingAngle>,
    /// How many trailing entries came from the zenith cap.
    pub zenith_count: usize,
}

impl AngleGrid {
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn into_angles(self) -> Vec<ViewingAngle> {
        self.angles
    }
}

/// Generate the viewing angles for one panorama.
pub fn generate_viewing_angles(params: &GridParams) -> AngleGrid {
    let (h_step, v_step) = params.steps();
    let horizontal = horizontal_candidates(params.base.u, h_step);
    let vertical = vertical_candidates(params.base.v, params.fov.v, v_step);
    let exclude = &params.exclude;

    let headings: Vec<f64> = horizontal
        .iter()
        .copied()
        .filter(|&h| !exclude.excludes_h(h))
        .collect();

    let mut angles = Vec::with_capacity(vertical.len() * headings.len() + headings.len());
    for &v in vertical.iter().filter(|&&v| !exclude.excludes_v(v)) {
        angles.extend(headings.iter().map(|&h| ViewingAngle::new(h, v)));
    }

    let base_len = angles.len();
    if !exclude.excludes_v(ZENITH_DEG) {
        angles.extend(headings.iter().map(|&h| ViewingAngle::new(h, ZENITH_DEG)));
    }
    let zenith_count = angles.len() - base_len;

    debug!(
        "grid: h_step={h_step:.3} v_step={v_step:.3} h_candidates={} v_candidates={} base={} zenith={}",
        horizontal.len(),
        vertical.len(),
        base_len,
        zenith_count
    );

    AngleGrid {
        angles,
        zenith_count,
    }
}
