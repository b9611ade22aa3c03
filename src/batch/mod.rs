//! Batch driver.
//!
//! For every source image in a directory the driver runs
//! grid generation → ordering → tile rendering. The run mode picks the axis
//! the worker pool covers:
//!
//! - normal mode: all images, one pool task per image, tiles in sequence;
//! - test mode: the first `count` images in sequence, one pool task per tile,
//!   with the numbered angle listing printed before rendering.
//!
//! Failures are scoped: a source that fails to decode is recorded and skipped,
//! a tile that fails is recorded and its siblings still render. Only a field
//! of view the projector rejects, output directory creation, input listing and
//! pool construction abort the run.

mod pool;
mod report;

pub use pool::{Parallelism, Scheduler};
pub use report::{BatchReport, ImageFailure, ImageReport, TileFailure};

use crate::error::{BatchError, ImageError, Result};
use crate::grid::{generate_viewing_angles, GridParams};
use crate::image::io::load_image;
use crate::ordering::{order_angles, OrderedAngles, SortAxis};
use crate::projector::Projector;
use crate::render::TileRenderer;
use crate::types::{Resolution, ViewingAngle};
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default source file suffix.
pub const DEFAULT_EXTENSION: &str = "jpg";
/// Default worker count.
pub const DEFAULT_THREADS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Normal,
    /// Only the first `count` images, with the angle listing printed.
    Test { count: usize },
}

impl RunMode {
    pub fn parallelism(self) -> Parallelism {
        match self {
            RunMode::Normal => Parallelism::AcrossImages,
            RunMode::Test { .. } => Parallelism::AcrossTiles,
        }
    }

    pub fn is_test(self) -> bool {
        matches!(self, RunMode::Test { .. })
    }
}

/// Validated settings for one batch run.
#[derive(Clone, Debug, Serialize)]
pub struct BatchOptions {
    pub grid: GridParams,
    pub sort: SortAxis,
    pub resolution: Resolution,
    pub threads: usize,
    pub mode: RunMode,
    /// File name suffix selecting source images, without the leading dot.
    pub extension: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            grid: GridParams::default(),
            sort: SortAxis::default(),
            resolution: Resolution::default(),
            threads: DEFAULT_THREADS,
            mode: RunMode::Normal,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Generate and order the viewing angles for one image.
pub fn plan_tiles(grid: &GridParams, sort: SortAxis) -> OrderedAngles {
    let angles = generate_viewing_angles(grid).into_angles();
    order_angles(angles, &grid.exclude.h, sort)
}

/// File names directly under `dir` ending in `.{extension}`, sorted by name.
pub fn list_source_images(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let entries = fs::read_dir(dir).map_err(|source| BatchError::InputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BatchError::InputDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(&suffix) => names.push(name),
            Ok(_) => {}
            Err(name) => warn!("skipping non UTF-8 file name {name:?}"),
        }
    }
    names.sort();
    Ok(names)
}

/// Run the whole batch and return what happened.
pub fn run(
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    projector: &dyn Projector,
) -> Result<BatchReport> {
    projector.check_fov(options.grid.fov)?;
    fs::create_dir_all(output_dir).map_err(|source| BatchError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let t0 = Instant::now();

    let mut images = list_source_images(input_dir, &options.extension)?;
    if let RunMode::Test { count } = options.mode {
        images.truncate(count);
    }
    info!(
        "{} source image(s) in {} (mode={:?})",
        images.len(),
        input_dir.display(),
        options.mode
    );
    if images.is_empty() {
        return Ok(BatchReport {
            elapsed_secs: t0.elapsed().as_secs_f64(),
            ..Default::default()
        });
    }

    let scheduler = Scheduler::new(options.threads, options.mode.parallelism())?;
    info!(
        "{} worker(s), parallel {:?}",
        scheduler.threads(),
        scheduler.parallelism()
    );
    let renderer = TileRenderer::new(
        projector,
        options.grid.fov,
        options.resolution,
        output_dir,
    );
    let job = ImageJob {
        input_dir,
        options,
        renderer,
        scheduler: &scheduler,
    };

    let outcomes = scheduler.for_images(&images, |name| job.process(name));

    let mut report = BatchReport::default();
    for (name, outcome) in images.into_iter().zip(outcomes) {
        match outcome {
            Ok(image_report) => report.images.push(image_report),
            Err(err) => {
                warn!("{name}: {err}");
                report.failures.push(ImageFailure {
                    source: name,
                    error: err.to_string(),
                });
            }
        }
    }
    report.elapsed_secs = t0.elapsed().as_secs_f64();
    info!(
        "batch done: {} tile(s) written, {} tile failure(s), {} image failure(s)",
        report.tiles_written(),
        report.tile_failures(),
        report.failures.len()
    );
    Ok(report)
}

/// Per-image pipeline; shared read-only by every image task.
struct ImageJob<'a> {
    input_dir: &'a Path,
    options: &'a BatchOptions,
    renderer: TileRenderer<'a>,
    scheduler: &'a Scheduler,
}

impl ImageJob<'_> {
    fn process(&self, name: &str) -> std::result::Result<ImageReport, ImageError> {
        let t0 = Instant::now();
        let source = load_image(&self.input_dir.join(name))?;
        let view = source.as_view();

        let ordered = plan_tiles(&self.options.grid, self.options.sort);
        let listing = if self.options.mode.is_test() {
            ordered.listing()
        } else {
            Vec::new()
        };
        for line in &listing {
            println!("{line}");
        }
        debug!("{name}: {} tile(s)", ordered.len());

        let numbered: Vec<(usize, ViewingAngle)> = ordered.numbered().collect();
        let results = self.scheduler.for_tiles(&numbered, |&(index, angle)| {
            self.renderer
                .render(&view, name, index, angle)
                .map_err(|err| TileFailure::new(angle, &err))
        });

        let mut written: Vec<PathBuf> = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(path) => written.push(path),
                Err(failure) => {
                    warn!("{name}: {}", failure.error);
                    failures.push(failure);
                }
            }
        }

        println!("Processed {name}");
        Ok(ImageReport {
            source: name.to_string(),
            tiles: ordered.len(),
            listing,
            written,
            failures,
            elapsed_secs: t0.elapsed().as_secs_f64(),
        })
    }
}
