//! Run configuration.
//!
//! Settings come from three layers, highest priority first: command-line
//! flags ([`Args`]), an optional JSON file ([`FileConfig`]) and the built-in
//! defaults. [`RunConfig::resolve`] merges and validates them once, so every
//! configuration error surfaces before the batch touches the filesystem.

mod cli;
mod file;

pub use cli::Args;
pub use file::{load_config, FileConfig};

use crate::batch::{BatchOptions, RunMode, DEFAULT_EXTENSION, DEFAULT_THREADS};
use crate::error::ConfigError;
use crate::grid::GridParams;
use crate::ordering::SortAxis;
use crate::types::{BaseAngle, ExclusionSets, FieldOfView, Overlap, Resolution};
use std::path::PathBuf;

/// Images processed in test mode when no count is given.
pub const DEFAULT_TEST_COUNT: usize = 1;

/// Fully validated settings for one invocation.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub options: BatchOptions,
    pub report: Option<PathBuf>,
}

impl RunConfig {
    /// Load the file named by `--config`, if any, and merge it under `args`.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => load_config(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file)
    }

    pub fn resolve(args: &Args, file: FileConfig) -> Result<Self, ConfigError> {
        let input_dir = args
            .input_directory
            .clone()
            .or(file.input_directory)
            .ok_or(ConfigError::Missing("input_directory"))?;
        let output_dir = args
            .output_directory
            .clone()
            .or(file.output_directory)
            .ok_or(ConfigError::Missing("output_directory"))?;

        let [u, v] = match &args.base_angle {
            Some(pair) => [f64::from(pair[0]), f64::from(pair[1])],
            None => file.base_angle.unwrap_or([0.0, 0.0]),
        };
        let base = BaseAngle::new(u, v)?;

        let fov = match pair(&args.fov).or(file.fov) {
            Some([h, v]) => FieldOfView::new(h, v)?,
            None => FieldOfView::default(),
        };
        let resolution = match pair(&args.res).or(file.res) {
            Some([height, width]) => Resolution::new(height, width)?,
            None => Resolution::default(),
        };
        let overlap = match args.overlap.or(file.overlap) {
            Some(pct) => Overlap::new(pct)?,
            None => Overlap::default(),
        };

        let exclude_h = exclusion_list(args.exclude_h_angles.as_deref(), file.exclude_h_angles)?;
        let exclude_v = exclusion_list(args.exclude_v_angles.as_deref(), file.exclude_v_angles)?;

        let threads = args.threads.or(file.threads).unwrap_or(DEFAULT_THREADS);
        if threads == 0 {
            return Err(ConfigError::Threads);
        }

        let sort = if args.sort_v || file.sort_v.unwrap_or(false) {
            SortAxis::VerticalFirst
        } else {
            SortAxis::HorizontalFirst
        };
        let mode = if args.test || file.test.unwrap_or(false) {
            RunMode::Test {
                count: args
                    .test_count
                    .or(file.test_count)
                    .unwrap_or(DEFAULT_TEST_COUNT),
            }
        } else {
            RunMode::Normal
        };

        let extension = args
            .extension
            .clone()
            .or(file.extension)
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
            .trim_start_matches('.')
            .to_string();
        if extension.is_empty() {
            return Err(ConfigError::Missing("extension"));
        }

        Ok(Self {
            input_dir,
            output_dir,
            options: BatchOptions {
                grid: GridParams {
                    base,
                    fov,
                    overlap,
                    exclude: ExclusionSets::new(exclude_h, exclude_v),
                },
                sort,
                resolution,
                threads,
                mode,
                extension,
            },
            report: args.report.clone().or(file.report),
        })
    }
}

/// Parse a comma-separated list of degrees. Blank entries are skipped, so
/// `""` and `"10,,20,"` are accepted.
pub fn parse_angle_list(list: &str) -> Result<Vec<f64>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|deg| deg.is_finite())
                .ok_or_else(|| ConfigError::AngleList {
                    list: list.to_string(),
                    token: token.to_string(),
                })
        })
        .collect()
}

fn exclusion_list(flag: Option<&str>, file: Option<Vec<f64>>) -> Result<Vec<f64>, ConfigError> {
    match (flag, file) {
        (Some(list), _) => parse_angle_list(list),
        (None, Some(values)) => match values.iter().find(|deg| !deg.is_finite()) {
            Some(bad) => Err(ConfigError::AngleList {
                list: format!("{values:?}"),
                token: bad.to_string(),
            }),
            None => Ok(values),
        },
        (None, None) => Ok(Vec::new()),
    }
}

fn pair<T: Copy>(values: &Option<Vec<T>>) -> Option<[T; 2]> {
    match values.as_deref() {
        Some(&[a, b]) => Some([a, b]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["pano-tiler"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = RunConfig::resolve(&parse(&["-i", "in", "-o", "out"]), FileConfig::default())
            .unwrap();
        assert_eq!(cfg.input_dir, PathBuf::from("in"));
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        let opts = &cfg.options;
        assert_eq!(opts.grid.fov, FieldOfView::new(100.0, 100.0).unwrap());
        assert_eq!(opts.grid.overlap.percent(), 5.0);
        assert_eq!(opts.grid.base, BaseAngle::default());
        assert_eq!(opts.resolution, Resolution::new(800, 800).unwrap());
        assert_eq!(opts.threads, 10);
        assert_eq!(opts.sort, SortAxis::HorizontalFirst);
        assert_eq!(opts.mode, RunMode::Normal);
        assert_eq!(opts.extension, "jpg");
        assert!(cfg.report.is_none());
    }

    #[test]
    fn flags_are_parsed() {
        let args = parse(&[
            "--input_directory",
            "in",
            "--output_directory",
            "out",
            "--start_angle",
            "30",
            "-20",
            "--res",
            "400",
            "600",
            "--fov",
            "90",
            "60",
            "--threads",
            "3",
            "--overlap",
            "20",
            "--exclude_h_angles",
            "0, 180",
            "--exclude_v_angles",
            "-45",
            "--sort_v",
            "--test",
            "--test_count",
            "2",
            "--extension",
            ".png",
        ]);
        let opts = RunConfig::resolve(&args, FileConfig::default())
            .unwrap()
            .options;
        assert_eq!(opts.grid.base, BaseAngle::new(30.0, -20.0).unwrap());
        assert_eq!(opts.resolution, Resolution::new(400, 600).unwrap());
        assert_eq!(opts.grid.fov, FieldOfView::new(90.0, 60.0).unwrap());
        assert_eq!(opts.threads, 3);
        assert_eq!(opts.grid.overlap.percent(), 20.0);
        assert_eq!(opts.grid.exclude.h, vec![0.0, 180.0]);
        assert_eq!(opts.grid.exclude.v, vec![-45.0]);
        assert_eq!(opts.sort, SortAxis::VerticalFirst);
        assert_eq!(opts.mode, RunMode::Test { count: 2 });
        assert_eq!(opts.extension, "png");
    }

    #[test]
    fn test_count_defaults_to_one() {
        let args = parse(&["-i", "a", "-o", "b", "--test"]);
        let opts = RunConfig::resolve(&args, FileConfig::default())
            .unwrap()
            .options;
        assert_eq!(opts.mode, RunMode::Test { count: 1 });
    }

    #[test]
    fn input_and_output_are_required_without_config() {
        assert!(Args::try_parse_from(["pano-tiler", "-i", "in"]).is_err());
        assert!(Args::try_parse_from(["pano-tiler", "--config", "c.json"]).is_ok());
    }

    #[test]
    fn flags_override_file_and_file_overrides_defaults() {
        let file: FileConfig = serde_json::from_str(
            r#"{
                "input_directory": "from_file",
                "output_directory": "tiles",
                "fov": [80.0, 70.0],
                "overlap": 10.0,
                "exclude_h_angles": [90.0],
                "sort_v": true
            }"#,
        )
        .unwrap();
        let args = parse(&["--config", "c.json", "-i", "from_flag", "--overlap", "0"]);
        let cfg = RunConfig::resolve(&args, file).unwrap();
        assert_eq!(cfg.input_dir, PathBuf::from("from_flag"));
        assert_eq!(cfg.output_dir, PathBuf::from("tiles"));
        assert_eq!(cfg.options.grid.overlap.percent(), 0.0);
        assert_eq!(cfg.options.grid.fov, FieldOfView::new(80.0, 70.0).unwrap());
        assert_eq!(cfg.options.grid.exclude.h, vec![90.0]);
        assert_eq!(cfg.options.sort, SortAxis::VerticalFirst);
    }

    #[test]
    fn missing_directories_are_reported() {
        let args = parse(&["--config", "c.json"]);
        let err = RunConfig::resolve(&args, FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("input_directory")));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases: &[&[&str]] = &[
            &["--overlap", "100"],
            &["--overlap", "-1"],
            &["--fov", "0", "90"],
            &["--fov", "90", "-10"],
            &["--res", "0", "10"],
            &["--threads", "0"],
            &["--exclude_h_angles", "10,abc"],
            &["--exclude_v_angles", "nan"],
            &["--base_angle", "360", "0"],
            &["--base_angle", "0", "91"],
        ];
        for extra in cases {
            let mut argv = vec!["-i", "in", "-o", "out"];
            argv.extend_from_slice(extra);
            let result = RunConfig::resolve(&parse(&argv), FileConfig::default());
            assert!(result.is_err(), "accepted {extra:?}");
        }
    }

    #[test]
    fn angle_lists() {
        assert_eq!(parse_angle_list("").unwrap(), Vec::<f64>::new());
        assert_eq!(parse_angle_list("10,,20,").unwrap(), vec![10.0, 20.0]);
        assert_eq!(parse_angle_list(" -30 , 45.5").unwrap(), vec![-30.0, 45.5]);
        let err = parse_angle_list("10;20").unwrap_err();
        assert!(matches!(err, ConfigError::AngleList { ref token, .. } if token == "10;20"));
        assert!(parse_angle_list("inf").is_err());
    }

    #[test]
    fn load_config_reports_read_and_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = load_config(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::ReadFile { .. }));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "ovrlap": 3 }"#).unwrap();
        let bad = load_config(&path).unwrap_err();
        assert!(matches!(bad, ConfigError::ParseFile { .. }));

        std::fs::write(&path, r#"{ "threads": 4, "test": true }"#).unwrap();
        let ok = load_config(&path).unwrap();
        assert_eq!(ok.threads, Some(4));
        assert_eq!(ok.test, Some(true));
    }
}
