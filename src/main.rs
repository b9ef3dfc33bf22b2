//! Pixeltone - render a still image as sound
//!
//! Usage: pixeltone <IMAGE> [OPTIONS]
//! Writes <IMAGE stem>.wav next to the input unless --output is given.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use pixeltone::audio::SonificationSystem;
use pixeltone::cli::Args;
use pixeltone::grid::load_grid;
use pixeltone::{Error, Result};

fn run(args: &Args) -> Result<()> {
    let output = args.output_config()?;
    let config = args.render_config()?;
    let system = SonificationSystem::new(config)?;

    let start = Instant::now();

    println!("Processing image..");
    let grid = load_grid(&args.input, &args.image_options())?;
    println!(
        "Image processed successfully ({} rows x {} columns{}).",
        grid.rows(),
        grid.cols(),
        if grid.has_opacity() { ", with alpha" } else { "" }
    );

    println!("Generating WAV file...");
    let rendering = system.render_to_file(&grid, &output.wav_path)?;

    println!("WAV file generated: {}", output.wav_path.display());
    println!("  Duration: {:.2}s", rendering.duration_secs());
    println!(
        "  Trimmed: {} leading / {} trailing samples",
        rendering.leading_trimmed(),
        rendering.trailing_trimmed()
    );
    println!("  Time: {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version land here too
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_env("RUST_LOG")
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Error::Usage(_) = e {
                eprintln!("Usage: pixeltone <IMAGE> [OPTIONS] (see --help)");
            }
            ExitCode::FAILURE
        }
    }
}
