use clap::Parser;
use std::path::PathBuf;

/// Command-line flags. Every setting is optional here so a config file can
/// fill the gaps; defaults are applied when the layers are merged.
#[derive(Parser, Debug, Default)]
#[command(name = "pano-tiler", version)]
#[command(about = "Cut equirectangular 360 images into overlapping perspective tiles")]
pub struct Args {
    /// Directory holding the source panoramas
    #[arg(short = 'i', long = "input_directory", required_unless_present = "config")]
    pub input_directory: Option<PathBuf>,

    /// Directory the tiles are written to (created when missing)
    #[arg(short = 'o', long = "output_directory", required_unless_present = "config")]
    pub output_directory: Option<PathBuf>,

    /// Starting yaw and pitch in degrees [default: 0 0]
    #[arg(
        long = "base_angle",
        visible_alias = "start_angle",
        num_args = 2,
        value_names = ["U", "V"],
        allow_negative_numbers = true
    )]
    pub base_angle: Option<Vec<i32>>,

    /// Tile height and width in pixels [default: 800 800]
    #[arg(long = "res", num_args = 2, value_names = ["HEIGHT", "WIDTH"])]
    pub res: Option<Vec<u32>>,

    /// Horizontal and vertical field of view in degrees [default: 100 100]
    #[arg(
        long = "fov",
        num_args = 2,
        value_names = ["H", "V"],
        allow_negative_numbers = true
    )]
    pub fov: Option<Vec<f64>>,

    /// Worker pool size [default: 10]
    #[arg(long)]
    pub threads: Option<usize>,

    /// Overlap between neighbouring tiles, percent [default: 5]
    #[arg(long, allow_negative_numbers = true)]
    pub overlap: Option<f64>,

    /// Comma-separated headings to skip
    #[arg(long = "exclude_h_angles", value_name = "LIST", allow_hyphen_values = true)]
    pub exclude_h_angles: Option<String>,

    /// Comma-separated pitches to skip
    #[arg(long = "exclude_v_angles", value_name = "LIST", allow_hyphen_values = true)]
    pub exclude_v_angles: Option<String>,

    /// Group the output by pitch instead of heading
    #[arg(long = "sort_v")]
    pub sort_v: bool,

    /// Only process the first few images and print the angle listing
    #[arg(long)]
    pub test: bool,

    /// Number of images processed in test mode [default: 1]
    #[arg(long = "test_count")]
    pub test_count: Option<usize>,

    /// Source file suffix [default: jpg]
    #[arg(long)]
    pub extension: Option<String>,

    /// Write the run report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// JSON file with default settings; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,
}
