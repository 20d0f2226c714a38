use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use ppgpeak::simulation::{NoiseConfig, PpgSignalConfig, generate_noisy_ppg};

#[derive(Parser, Debug)]
#[command(name = "generate_ppg")]
#[command(about = "Generate synthetic PPG recordings as CSV for detector testing")]
struct Args {
    /// Output CSV file
    #[arg(short, long, default_value = "synthetic_ppg.csv")]
    output: PathBuf,

    /// TOML noise configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible noise
    #[arg(short, long)]
    seed: Option<u64>,

    /// Signal duration in seconds
    #[arg(short, long, default_value_t = 10.0)]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 1000.0)]
    sample_rate: f64,

    /// Heart rate in beats per minute
    #[arg(long, default_value_t = 75.0)]
    heart_rate: f64,

    /// Gaussian noise standard deviation (CLI override)
    #[arg(long)]
    noise_std: Option<f64>,

    /// Baseline wander amplitude (CLI override)
    #[arg(long)]
    wander: Option<f64>,

    /// Baseline wander frequency in Hz
    #[arg(long, default_value_t = 0.25)]
    wander_hz: f64,

    /// Also write the true apex indices to this file, one per line
    #[arg(long)]
    apexes: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    noise: Option<NoiseConfig>,
}

fn load_toml_config(path: &PathBuf) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_noise_config(toml: TomlConfig, args: &Args) -> NoiseConfig {
    let mut config = toml.noise.unwrap_or_default();

    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(std_dev) = args.noise_std {
        config = config.with_gaussian(std_dev);
    }
    if let Some(amplitude) = args.wander {
        config = config.with_baseline_wander(amplitude, args.wander_hz);
    }

    config
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let toml_config = match args.config {
        Some(ref path) => load_toml_config(path)?,
        None => TomlConfig::default(),
    };
    let noise = build_noise_config(toml_config, &args);

    let signal = PpgSignalConfig {
        sampling_rate_hz: args.sample_rate,
        duration_secs: args.duration,
        heart_rate_bpm: args.heart_rate,
        ..PpgSignalConfig::default()
    };
    log::debug!("Signal: {:?}, noise: {:?}", signal, noise);

    let ppg = generate_noisy_ppg(&signal, &noise);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    writer.write_record(["ppg"])?;
    for sample in &ppg.samples {
        writer.write_record([sample.to_string()])?;
    }
    writer.flush()?;

    if let Some(ref path) = args.apexes {
        let lines: Vec<String> = ppg.apexes.iter().map(|a| a.to_string()).collect();
        fs::write(path, lines.join("\n") + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    eprintln!(
        "Wrote {} samples ({} beats) to {}",
        ppg.samples.len(),
        ppg.apexes.len(),
        args.output.display()
    );
    Ok(())
}
