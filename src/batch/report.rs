use crate::error::TileError;
use crate::types::ViewingAngle;
use serde::Serialize;
use std::path::PathBuf;

/// A tile that could not be rendered or written.
#[derive(Clone, Debug, Serialize)]
pub struct TileFailure {
    pub index: usize,
    pub angle: ViewingAngle,
    pub error: String,
}

impl TileFailure {
    pub fn new(angle: ViewingAngle, err: &TileError) -> Self {
        Self {
            index: err.index(),
            angle,
            error: err.to_string(),
        }
    }
}

/// Outcome for one source image that decoded successfully.
#[derive(Clone, Debug, Serialize)]
pub struct ImageReport {
    pub source: String,
    /// Size of the generated angle set, duplicates included.
    pub tiles: usize,
    /// Numbered angle lines printed before rendering; test mode only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub listing: Vec<String>,
    pub written: Vec<PathBuf>,
    pub failures: Vec<TileFailure>,
    pub elapsed_secs: f64,
}

/// A source image that could not be processed at all.
#[derive(Clone, Debug, Serialize)]
pub struct ImageFailure {
    pub source: String,
    pub error: String,
}

/// Everything a batch run produced.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    pub images: Vec<ImageReport>,
    pub failures: Vec<ImageFailure>,
    pub elapsed_secs: f64,
}

impl BatchReport {
    pub fn tiles_written(&self) -> usize {
        self.images.iter().map(|r| r.written.len()).sum()
    }

    pub fn tile_failures(&self) -> usize {
        self.images.iter().map(|r| r.failures.len()).sum()
    }

    /// True when every image decoded and every tile was written.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.tile_failures() == 0
    }
}
