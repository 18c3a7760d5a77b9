use std::path::PathBuf;

use anyhow::{Context, Result};
use cave_core::{Cave, CaveConfig, CaveGenerator};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::debug;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Generate a cellular-automaton cave", long_about = None)]
struct Args {
    /// Seed for the generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// TOML file with generation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in tiles
    #[arg(long)]
    width: Option<i64>,

    /// Grid height in tiles
    #[arg(long)]
    height: Option<i64>,

    /// Number of smoothing steps
    #[arg(long)]
    steps: Option<u32>,

    /// Probability that an interior cell starts as a wall
    #[arg(long)]
    wall_probability: Option<f64>,

    /// Minimum entrance-to-exit path length in tiles
    #[arg(long)]
    min_distance: Option<u32>,

    /// Keep disconnected floor pockets instead of filling them in
    #[arg(long, default_value_t = false)]
    disconnected: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn build_config(args: &Args) -> Result<CaveConfig> {
    let mut config = match &args.config {
        Some(path) => CaveConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => CaveConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(steps) = args.steps {
        config.number_of_steps = steps;
    }
    if let Some(probability) = args.wall_probability {
        config.wall_birth_probability = probability;
    }
    if let Some(distance) = args.min_distance {
        config.min_distance_between_entry_and_exit = distance;
    }
    if args.disconnected {
        config.connected_cave = false;
    }
    Ok(config)
}

fn print_ascii(cave: &Cave) {
    print!("{}", cave.to_ascii());
    println!("Seed: {} (attempt seed {})", cave.initial_seed, cave.attempt_seed);
    println!("Attempts: {}", cave.attempts);
    println!("Entrance: ({}, {})", cave.entrance.x, cave.entrance.y);
    println!("Exit: ({}, {})", cave.exit.x, cave.exit.y);
    println!("Path length: {}", cave.path_length());
    println!("Fingerprint: {:016x}", cave.fingerprint());
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = build_config(&args)?;
    debug!("generating with {config:?}");

    let cave = CaveGenerator::new(config)
        .generate(args.seed)
        .with_context(|| format!("Cave generation failed for seed {}", args.seed))?;

    match args.format {
        OutputFormat::Ascii => print_ascii(&cave),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&cave).context("Failed to serialize cave as JSON")?;
            println!("{json}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_defaults() {
        let args = Args::parse_from([
            "cavegen",
            "--width",
            "20",
            "--steps",
            "2",
            "--min-distance",
            "9",
            "--disconnected",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.width, 20);
        assert_eq!(config.height, CaveConfig::default().height);
        assert_eq!(config.number_of_steps, 2);
        assert_eq!(config.min_distance_between_entry_and_exit, 9);
        assert!(!config.connected_cave);
    }

    #[test]
    fn missing_config_file_is_reported_with_context() {
        let args = Args::parse_from(["cavegen", "--config", "/nonexistent/cave.toml"]);
        let error = build_config(&args).unwrap_err();
        assert!(error.to_string().contains("Failed to load config file"));
    }
}
