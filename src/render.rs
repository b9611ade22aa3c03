//! Tile renderer: one viewing angle in, one PNG out.

use crate::error::TileError;
use crate::image::io::save_png;
use crate::image::ImageU8;
use crate::projector::Projector;
use crate::types::{FieldOfView, Resolution, ViewingAngle};
use log::debug;
use std::path::{Path, PathBuf};

/// Output name for tile `index` (1-based) of `source_name`:
/// `{stem}_perspective_{index:02}.png`.
pub fn tile_filename(source_name: &str, index: usize) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| source_name.into());
    format!("{stem}_perspective_{index:02}.png")
}

/// Settings shared by every tile of a run.
#[derive(Clone, Copy)]
pub struct TileRenderer<'a> {
    projector: &'a dyn Projector,
    fov: FieldOfView,
    resolution: Resolution,
    output_dir: &'a Path,
}

impl<'a> TileRenderer<'a> {
    pub fn new(
        projector: &'a dyn Projector,
        fov: FieldOfView,
        resolution: Resolution,
        output_dir: &'a Path,
    ) -> Self {
        Self {
            projector,
            fov,
            resolution,
            output_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir
    }

    /// Project `angle` out of `source` and write it as tile `index`.
    ///
    /// Returns the written path. An existing file is overwritten. Failures are
    /// returned as-is; nothing is retried.
    pub fn render(
        &self,
        source: &ImageU8<'_>,
        source_name: &str,
        index: usize,
        angle: ViewingAngle,
    ) -> Result<PathBuf, TileError> {
        let tile = self
            .projector
            .project(source, self.fov, angle, self.resolution)
            .map_err(|source| TileError::Projection { index, source })?;
        let path = self.output_dir.join(tile_filename(source_name, index));
        save_png(&tile, &path).map_err(|source| TileError::Write { index, source })?;
        debug!(
            "tile {index} h={:.3} v={:.3} -> {}",
            angle.h,
            angle.v,
            path.display()
        );
        Ok(path)
    }
}
