//! bulkops - bounded batch jobs over tables and text trees

#![allow(missing_docs)]

use anyhow::Context;
use bulkops::config::Config;
use bulkops::server;
use bulkops::utils::init_logging;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "bulkops", version, about = "Batch purge and word frequency service")]
struct Args {
    /// Configuration file; defaults plus environment overrides when omitted
    #[arg(short, long, env = "BULKOPS_CONFIG")]
    config: Option<PathBuf>,

    /// Load and validate the configuration, then exit
    #[arg(long)]
    validate_only: bool,
}

async fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?
            .with_env_overrides()?,
        None => Config::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args.config.as_ref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.validate_only {
        println!("Configuration is valid");
        return ExitCode::SUCCESS;
    }

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::builder::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
