// Command-line runner: loads a thresholded or edge-detected image, takes its bright
// pixels as points, and accumulates them into a Hough field.

use anyhow::Context;
use clap::Parser;
use hough_vision::core_modules::utils::image_helper::image_helper;
use hough_vision::{HoughConfig, HoughPipeline, ParallelPipeline, load_config};
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input image; pixels at the bright level become points
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file (family, tolerance, workers, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the accumulator as a grayscale PNG
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Search for circles of this radius instead of lines
    #[arg(long)]
    radius: Option<f64>,

    /// Brightness a pixel must have to count as a point
    #[arg(long)]
    level: Option<u8>,

    /// Vote tolerance in grid units
    #[arg(long)]
    tolerance: Option<f64>,

    /// Worker threads (0 = one per CPU)
    #[arg(long)]
    workers: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => HoughConfig::default(),
    };
    if let Some(radius) = args.radius {
        config.family = hough_vision::CurveFamily::circle(radius);
    }
    if let Some(level) = args.level {
        config.bright_level = level;
    }
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let set = image_helper::load_bright_points(&args.input, config.bright_level)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let configured = (config.image_width, config.image_height);
    if config.image_width != 0 && configured != (set.width, set.height) {
        warn!(
            "config says {}x{} but {} is {}x{}; using the image size",
            config.image_width,
            config.image_height,
            args.input.display(),
            set.width,
            set.height
        );
    }
    config.image_width = set.width;
    config.image_height = set.height;

    let pipeline = ParallelPipeline::new(HoughPipeline::new(config)?);
    info!(
        "{} points from {}, {} workers",
        set.points.len(),
        args.input.display(),
        pipeline.workers()
    );
    let report = pipeline.run(&set.points).await?;

    let (rows, cols) = report.field.shape();
    let (name_a, name_b) = report.family.axis_names();
    match report.strongest_cell() {
        Some(best) => println!(
            "{} field {}x{}: max {:.3} at {}={} {}={}",
            report.family.name(),
            rows,
            cols,
            best.value,
            name_a,
            best.params.0,
            name_b,
            best.params.1
        ),
        None => println!("{} field {}x{} is empty", report.family.name(), rows, cols),
    }

    if let Some(output) = &args.output {
        image_helper::save_field(output, &report.field)
            .with_context(|| format!("writing {}", output.display()))?;
        info!("accumulator saved to {}", output.display());
    }
    Ok(())
}
