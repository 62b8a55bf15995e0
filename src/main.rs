//! # Free Models
//!
//! Batch job that collects the zero-cost models listed by OpenRouter, SiliconFlow
//! and Zhipu AI and writes them to a single JSON file.
//!
//! ## Features
//! - One sequential pass over the providers, each with its own free-model rule
//! - Missing tokens or failing providers only shrink the result
//! - Atomic replacement of the output file
//! - `show` subcommand to inspect the last run

mod cli;
mod core;
mod run;

use clap::Parser;
use dotenv::dotenv;

use crate::cli::{Args, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    match &args.command {
        None | Some(Commands::Fetch) => {
            let config =
                core::config::load(&args.overrides()).unwrap_or_else(|e| exit_on_config_error(e));
            run::run_fetch(&config).await?;
        }
        Some(Commands::Show { query, provider }) => {
            let output = core::config::output_path(&args.overrides())
                .unwrap_or_else(|e| exit_on_config_error(e));
            run::run_show(&output, query.as_deref(), provider.as_deref());
        }
    }
    Ok(())
}

/// Print a configuration error (Display, not Debug) and exit.
fn exit_on_config_error(e: core::config::ConfigError) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}
