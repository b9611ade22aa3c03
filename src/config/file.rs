use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings read from a JSON config file. Field names match the long flags.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub input_directory: Option<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub base_angle: Option<[f64; 2]>,
    pub res: Option<[u32; 2]>,
    pub fov: Option<[f64; 2]>,
    pub threads: Option<usize>,
    pub overlap: Option<f64>,
    pub exclude_h_angles: Option<Vec<f64>>,
    pub exclude_v_angles: Option<Vec<f64>>,
    pub sort_v: Option<bool>,
    pub test: Option<bool>,
    pub test_count: Option<usize>,
    pub extension: Option<String>,
    pub report: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}
