use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use phantom_silhouette_core::pipeline::convert_features_use_case::ConvertFeaturesUseCase;
use phantom_silhouette_core::shared::constants::FEATURE_FILE_EXTENSION;
use phantom_silhouette_core::vocoder::infrastructure::json_feature_store::JsonFeatureStore;
use phantom_silhouette_core::whisper::domain::scale::FrequencyScale;
use phantom_silhouette_core::whisper::domain::warp_config::{
    FrequencySampling, TimeMesh, WarpConfig, DEFAULT_BIN_DIVISOR,
};
use phantom_silhouette_core::whisper::infrastructure::phantom_silhouette_transformer::PhantomSilhouetteTransformer;

/// Whisper conversion of WORLD vocoder features (f0, sp, ap as JSON).
#[derive(Parser)]
#[command(name = "phantom-silhouette")]
struct Cli {
    /// Input feature file (.json).
    input: PathBuf,

    /// Output feature file (.json).
    output: PathBuf,

    /// Frequency scale the warp is interpolated on: erb or linear.
    #[arg(long, default_value = "erb")]
    scale: String,

    /// One frequency control point per this many envelope bins.
    #[arg(long, default_value_t = DEFAULT_BIN_DIVISOR)]
    sampling: usize,

    /// Warp with the fixed anchor frequencies only (ignores --sampling).
    #[arg(long)]
    anchors_only: bool,

    /// Repeat control points every N frames instead of only at the edges.
    #[arg(long)]
    time_stride: Option<usize>,

    /// Repeat control points on every frame.
    #[arg(long, conflicts_with = "time_stride")]
    every_frame: bool,

    /// Seed for the replacement noise (random when omitted).
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = build_config(&cli)?;
    log::info!("Warp configuration: {config:?}");

    let mut rng = match cli.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_entropy(),
    };

    let use_case = ConvertFeaturesUseCase::new(
        Box::new(JsonFeatureStore),
        Box::new(PhantomSilhouetteTransformer::new(config)),
    );
    use_case.run(&cli.input, &cli.output, &mut rng)?;
    log::info!("Output written to {}", cli.output.display());
    Ok(())
}

fn build_config(cli: &Cli) -> Result<WarpConfig, Box<dyn std::error::Error>> {
    let sampling = if cli.anchors_only {
        FrequencySampling::Anchors
    } else {
        FrequencySampling::BinFraction {
            divisor: cli.sampling,
        }
    };
    let time_mesh = match (cli.time_stride, cli.every_frame) {
        (_, true) => TimeMesh::EveryFrame,
        (Some(step), false) => TimeMesh::Stride { step },
        (None, false) => TimeMesh::Boundaries,
    };
    Ok(WarpConfig::default()
        .with_scale(parse_scale(&cli.scale)?)
        .with_sampling(sampling)
        .with_time_mesh(time_mesh))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    for path in [&cli.input, &cli.output] {
        if !is_feature_file(path) {
            return Err(format!(
                "Feature files must have a .{FEATURE_FILE_EXTENSION} extension, got '{}'",
                path.display()
            )
            .into());
        }
    }
    parse_scale(&cli.scale)?;
    if cli.sampling == 0 {
        return Err("Sampling divisor must be a positive integer, got 0".into());
    }
    if cli.time_stride == Some(0) {
        return Err("Time stride must be a positive integer, got 0".into());
    }
    Ok(())
}

fn parse_scale(scale: &str) -> Result<FrequencyScale, Box<dyn std::error::Error>> {
    match scale {
        "erb" => Ok(FrequencyScale::Erb),
        "linear" => Ok(FrequencyScale::Linear),
        other => Err(format!("Scale must be 'erb' or 'linear', got '{other}'").into()),
    }
}

fn is_feature_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(FEATURE_FILE_EXTENSION))
        .unwrap_or(false)
}
