mod analysis;
mod common;
mod errors;

use analysis::run_analyses;
use argh::FromArgs;
use errors::{Result, ToolError};
use intellicage_performance::prelude::*;
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Plots performance curves and intervisit interval histograms of an IntelliCage experiment
#[derive(FromArgs, Debug)]
pub struct Args {
    /// analysis configuration file (JSON)
    #[argh(option, short = 'c')]
    config: PathBuf,

    /// directory the plots and reports are written to (default: current directory)
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if !args.config.is_file() {
        return Err(ToolError::InvalidArguments(format!(
            "Configuration file {} does not exist",
            args.config.display()
        )));
    }

    fs::create_dir_all(&args.output)?;

    let config = AnalysisConfig::load(&args.config)?;
    info!("Using configuration {}", args.config.display());

    println!("📂 Loading dataset and timeline...");
    let dataset = load_dataset(&config.dataset_path)?;
    let timeline = IniTimeline::load(&config.timeline_path)?;
    println!(
        "✅ {} visits of {} subjects, {} phases",
        dataset.visits().len(),
        dataset.subjects().len(),
        timeline.all_phases().len()
    );

    run_analyses(&config, &dataset, &timeline, &args.output)?;

    println!("\n🎉 Done, output written to {}", args.output.display());
    Ok(())
}
