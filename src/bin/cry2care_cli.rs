use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cry2care_core::analysis::VitalsExtractor;
use cry2care_core::audio::decode_file;
use cry2care_core::dataset::DatasetBuilder;
use cry2care_core::{AppConfig, ClassificationService, ModelRegistry};

#[derive(Parser, Debug)]
#[command(
    name = "cry2care_cli",
    about = "Offline infant-cry classification and dataset tooling"
)]
struct Cli {
    /// Override path to the JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a recording and print the prediction as JSON
    Predict {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the vitals snapshot for a recording
    Vitals {
        #[arg(long)]
        file: PathBuf,
    },
    /// Extract features for every file under <dir>/<label>/ into a JSON dataset
    BuildDataset {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Predict { file, output } => run_predict(config, &file, output),
        Commands::Vitals { file } => run_vitals(config, &file),
        Commands::BuildDataset { dir, output } => run_build_dataset(config, &dir, &output),
    }
}

fn run_predict(config: AppConfig, file: &PathBuf, output: Option<PathBuf>) -> Result<ExitCode> {
    let registry = Arc::new(ModelRegistry::new(config.model.clone()));
    let service = ClassificationService::new(config, registry);

    let result = service.predict_file(file);
    let json = serde_json::to_string_pretty(&result)?;

    if let Some(path) = output {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    // A failed prediction is still a well-formed report; exit 2 flags it
    if result.is_success() {
        Ok(ExitCode::from(0))
    } else {
        Ok(ExitCode::from(2))
    }
}

fn run_vitals(config: AppConfig, file: &PathBuf) -> Result<ExitCode> {
    let signal = decode_file(file, config.audio.max_duration_secs)
        .with_context(|| format!("decoding {}", file.display()))?;

    let vitals = VitalsExtractor::new(&config.features).extract(&signal);
    println!("{}", serde_json::to_string_pretty(&vitals)?);

    if vitals.distress_advisory() {
        eprintln!("Advisory: elevated zero-crossing rate, possible distress");
    }

    Ok(ExitCode::from(0))
}

fn run_build_dataset(config: AppConfig, dir: &PathBuf, output: &PathBuf) -> Result<ExitCode> {
    let builder = DatasetBuilder::new(config);
    let summary = builder
        .build(dir)
        .with_context(|| format!("reading dataset tree {}", dir.display()))?;

    println!(
        "Processed {} files, skipped {} ({} labels)",
        summary.processed,
        summary.skipped,
        summary.label_encoding().n_classes()
    );

    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(output, json).with_context(|| format!("writing {}", output.display()))?;

    Ok(ExitCode::from(0))
}
