use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use whitebox_raster::tools::{self, FilterConfig, StretchConfig};
use whitebox_raster::Raster;

#[derive(Parser, Debug)]
#[command(name = "whitebox-raster")]
#[command(about = "Inspect and process Whitebox .dep/.tas rasters")]
struct Args {
    /// Log level
    #[arg(long, env = "WHITEBOX_RASTER_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the header of a raster as JSON
    Info {
        input: PathBuf,
    },
    /// Clamp valid cells into a window of the value range
    Clip {
        input: PathBuf,
        output: PathBuf,
        /// Lower bound as a fraction of (max - min) above min
        #[arg(long, default_value = "0.0")]
        lower: f64,
        /// Upper bound as a fraction of (max - min) above min
        #[arg(long, default_value = "0.9")]
        upper: f64,
        /// Multiply every output cell by this factor
        #[arg(long, default_value = "1.0")]
        scale: f64,
    },
    /// Sum all valid cells
    Sum {
        input: PathBuf,
    },
    /// Edge-preserving smoothing
    Filter {
        input: PathBuf,
        output: PathBuf,
        /// Window side length in cells
        #[arg(long, default_value = "7")]
        size: usize,
        /// Value difference at which neighbours stop contributing
        #[arg(long, default_value = "10.0")]
        threshold: f64,
    },
    /// Sample raster values at x,y points read from a CSV file
    Sample {
        input: PathBuf,
        points: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Info { input } => {
            let raster = Raster::open(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            println!("{}", serde_json::to_string_pretty(raster.header())?);
        }
        Command::Clip { input, output, lower, upper, scale } => {
            let raster = Raster::open(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let config = StretchConfig {
                lower_fraction: lower,
                upper_fraction: upper,
            };
            let mut clipped = tools::clip_to_range(&raster, &output, config)?;
            if scale != 1.0 {
                clipped *= scale;
            }

            clipped.recompute_extrema();
            let (min, max) = (clipped.minimum(), clipped.maximum());
            clipped.set_display_range(min + 0.1 * (max - min), min + 0.8 * (max - min));
            clipped.add_metadata(format!(
                "Created by clip from {} (lower {}, upper {}, scale {})",
                input.display(),
                lower,
                upper,
                scale
            ));
            clipped.save()?;
            info!(output = %output.display(), "Clip complete");
        }
        Command::Sum { input } => {
            let raster = Raster::open(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            println!("{}", tools::sum_valid(&raster));
        }
        Command::Filter { input, output, size, threshold } => {
            let raster = Raster::open(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let mut smoothed = tools::smooth(&raster, &output, FilterConfig { size, threshold })?;
            smoothed.add_metadata(format!(
                "Created by filter from {} (size {}, threshold {})",
                input.display(),
                size,
                threshold
            ));
            smoothed.save()?;
            info!(output = %output.display(), "Filter complete");
        }
        Command::Sample { input, points } => {
            let raster = Raster::open(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let file = File::open(&points)
                .with_context(|| format!("Failed to open {}", points.display()))?;
            let hits = tools::sample_points(&raster, file, io::stdout().lock())?;
            info!(hits, "Sampling complete");
        }
    }

    Ok(())
}
