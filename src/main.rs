use clap::Parser;
use log::error;
use pano_tiler::config::{Args, RunConfig};
use pano_tiler::image::io::write_json_file;
use pano_tiler::{BatchError, EquirectProjector};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(&Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every image and tile succeeded.
fn run(args: &Args) -> Result<bool, BatchError> {
    let config = RunConfig::from_args(args)?;

    let projector = EquirectProjector::new();
    let report = pano_tiler::run(
        &config.input_dir,
        &config.output_dir,
        &config.options,
        &projector,
    )?;
    println!("{} seconds.", report.elapsed_secs);

    if let Some(path) = &config.report {
        write_json_file(path, &report)?;
        println!("Report written to {}", path.display());
    }

    if !report.is_clean() {
        eprintln!(
            "{} image(s) and {} tile(s) failed",
            report.failures.len(),
            report.tile_failures()
        );
    }
    Ok(report.is_clean())
}
