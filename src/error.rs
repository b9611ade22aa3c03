//! Error types for the tiling pipeline.
//!
//! Configuration problems are reported before any file is touched. Image and
//! tile failures are scoped to the unit that produced them; the batch driver
//! records them in the run report and keeps going. Only [`BatchError`] aborts
//! a whole run.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = BatchError> = std::result::Result<T, E>;

/// Invalid or unreadable settings. Always fatal, raised before any work.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("overlap must lie in [0, 100), got {0}")]
    Overlap(f64),
    #[error("{axis} field of view must lie in (0, {max}], got {value}")]
    FieldOfView {
        axis: &'static str,
        value: f64,
        max: f64,
    },
    #[error("base angle ({u}, {v}) is outside u in [0, 360), v in [-90, 90]")]
    BaseAngle { u: f64, v: f64 },
    #[error("output resolution must be positive, got {height}x{width}")]
    Resolution { height: u32, width: u32 },
    #[error("thread count must be at least 1")]
    Threads,
    #[error("invalid angle '{token}' in list '{list}'")]
    AngleList { list: String, token: String },
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("failed to read config {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Decoding or encoding a single image failed.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("unsupported channel count {0}")]
    Channels(usize),
    #[error("buffer of {len} bytes does not match {width}x{height}x{channels}")]
    BufferSize {
        width: usize,
        height: usize,
        channels: usize,
        len: usize,
    },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The projector could not produce a tile.
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("source panorama is empty")]
    EmptySource,
    #[error("field of view ({h}, {v}) cannot be rendered as a perspective view")]
    FieldOfView { h: f64, v: f64 },
    #[error("output resolution {height}x{width} is empty")]
    EmptyOutput { height: u32, width: u32 },
}

/// Rendering one tile failed.
#[derive(Error, Debug)]
pub enum TileError {
    #[error("tile {index}: projection failed: {source}")]
    Projection {
        index: usize,
        source: ProjectionError,
    },
    #[error("tile {index}: {source}")]
    Write { index: usize, source: ImageError },
}

impl TileError {
    /// 1-based tile number the failure belongs to.
    pub fn index(&self) -> usize {
        match self {
            TileError::Projection { index, .. } | TileError::Write { index, .. } => *index,
        }
    }
}

/// Failures that abort the whole batch.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to list input directory {}: {source}", path.display())]
    InputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("tiles cannot be rendered: {0}")]
    Projection(#[from] ProjectionError),
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Report(#[from] ImageError),
}
