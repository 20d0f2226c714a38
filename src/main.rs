use anyhow::Context;
use clap::Parser;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use ppgpeak::config::{AmplitudeThreshold, DetectorConfig};
use ppgpeak::input::{ColumnSelector, load_csv_column};
use ppgpeak::output::{OutputFormat, PeakReport, create_formatter, write_filtered_csv};
use ppgpeak::pipeline::detect_systolic_peaks;

#[derive(Parser, Debug)]
#[command(name = "ppgpeak")]
#[command(about = "Detect systolic peaks in PPG recordings stored as CSV", long_about = None)]
struct Args {
    /// CSV files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Sampling rate in Hz (default: 1000, or the value in --config)
    #[arg(long = "fs")]
    sampling_rate: Option<f64>,

    /// Column holding the waveform: index from 0 or header name
    #[arg(short = 'c', long, default_value = "0")]
    column: ColumnSelector,

    /// Input files have no header row
    #[arg(long)]
    no_header: bool,

    /// Smoothing window as a fraction of the sampling rate
    #[arg(long)]
    window_fraction: Option<f64>,

    /// Maximum expected heart rate in bpm (sets the minimum peak distance)
    #[arg(long)]
    max_bpm: Option<f64>,

    /// Amplitude threshold: a level (0.5), "mean", or "range:0.6" / "60%"
    #[arg(short = 't', long)]
    threshold: Option<AmplitudeThreshold>,

    /// TOML detector configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write raw and filtered signals with peak markers to this directory
    #[arg(long)]
    export_filtered: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    log::info!(
        "Detector: {} Hz, window {} samples, min distance {} samples, threshold {}",
        config.sampling_rate_hz,
        config.window_size()?,
        config.min_distance()?,
        config.amplitude_threshold
    );

    if let Some(ref dir) = args.export_filtered {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    }

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let mut failures = 0;
    for path in &args.files {
        let report = analyze_file(path, &config, &args);
        if !report.is_ok() {
            failures += 1;
        }
        let line = formatter.format(&report);
        if !line.is_empty() {
            println!("{}", line);
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files failed", failures, args.files.len());
    }
    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<DetectorConfig> {
    let mut config = match args.config {
        Some(ref path) => DetectorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DetectorConfig::default(),
    };

    if let Some(fs) = args.sampling_rate {
        config.sampling_rate_hz = fs;
    }
    if let Some(fraction) = args.window_fraction {
        config.window_fraction = fraction;
    }
    if let Some(bpm) = args.max_bpm {
        config.max_expected_bpm = bpm;
    }
    if let Some(threshold) = args.threshold {
        config.amplitude_threshold = threshold;
    }

    config.validate().context("Invalid detector configuration")?;
    Ok(config)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn analyze_file(path: &Path, config: &DetectorConfig, args: &Args) -> PeakReport {
    let name = display_name(path);

    match analyze_file_impl(path, config, args) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{}: {:#}", name, e);
            PeakReport::failed(name, config.sampling_rate_hz, format!("{:#}", e))
        }
    }
}

fn analyze_file_impl(
    path: &Path,
    config: &DetectorConfig,
    args: &Args,
) -> anyhow::Result<PeakReport> {
    let samples = load_csv_column(path, &args.column, !args.no_header)?;
    let detection = detect_systolic_peaks(&samples, config)?;
    log::info!(
        "{}: {} samples, {} candidates, {} peaks",
        path.display(),
        samples.len(),
        detection.candidate_count,
        detection.peaks.len()
    );

    if let Some(ref dir) = args.export_filtered {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        let export_path = dir.join(format!("{}_filtered.csv", stem));
        let file = File::create(&export_path)
            .with_context(|| format!("Failed to create {}", export_path.display()))?;
        write_filtered_csv(BufWriter::new(file), &samples, &detection)?;
        log::info!("Wrote filtered signal to {}", export_path.display());
    }

    Ok(PeakReport::from_detection(display_name(path), &detection))
}
