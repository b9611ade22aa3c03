#![doc = include_str!("../README.md")]

// Public modules
pub mod angle;
pub mod batch;
pub mod config;
pub mod error;
pub mod grid;
pub mod image;
pub mod ordering;
pub mod projector;
pub mod render;
pub mod types;

// --- High-level re-exports -------------------------------------------------

pub use crate::batch::{run, BatchOptions, BatchReport, RunMode};
pub use crate::error::{BatchError, ConfigError, Result};
pub use crate::grid::{generate_viewing_angles, GridParams};
pub use crate::ordering::{order_angles, OrderedAngles, SortAxis};
pub use crate::projector::{EquirectProjector, Projector};
pub use crate::types::{BaseAngle, ExclusionSets, FieldOfView, Overlap, Resolution, ViewingAngle};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use pano_tiler::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = BatchOptions {
///     grid: GridParams {
///         fov: FieldOfView::new(90.0, 90.0)?,
///         overlap: Overlap::new(10.0)?,
///         ..Default::default()
///     },
///     ..Default::default()
/// };
///
/// let plan = pano_tiler::batch::plan_tiles(&options.grid, options.sort);
/// for line in plan.listing() {
///     println!("{line}");
/// }
///
/// let report = pano_tiler::run(
///     "panos".as_ref(),
///     "tiles".as_ref(),
///     &options,
///     &EquirectProjector::new(),
/// )?;
/// println!("tiles={} clean={}", report.tiles_written(), report.is_clean());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageU8, PixelBuffer};
    pub use crate::{
        BatchOptions, BatchReport, EquirectProjector, FieldOfView, GridParams, Overlap,
        Projector, Resolution, RunMode, SortAxis, ViewingAngle,
    };
}
