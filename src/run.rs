//! Application run modes: logger init, fetch run, show listing.

use std::error::Error;
use std::path::Path;

use crate::cli::Args;
use crate::core;
use crate::core::config::Config;
use crate::core::pipeline::ProviderStatus;
use crate::core::provider::Provider;

/// Initialize env_logger. Logs go to stdout so scheduled runs capture progress with the job output.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .target(env_logger::Target::Stdout)
        .try_init();
}

/// Fetch every provider, merge, and write the output file.
/// Provider faults are logged and tolerated; a failed write is returned as an error.
pub async fn run_fetch(config: &Config) -> Result<(), Box<dyn Error>> {
    log::info!("Starting to fetch free models...");

    let client = core::models::build_client(config.timeout)?;
    let report = core::pipeline::run(&client, config).await;

    for p in &report.providers {
        match &p.reason {
            Some(reason) => log::debug!("{}: {:?} ({})", p.provider, p.status, reason),
            None => log::debug!("{}: {:?} ({} models)", p.provider, p.status, p.count),
        }
    }
    if report
        .providers
        .iter()
        .all(|p| p.status != ProviderStatus::Fetched)
    {
        log::warn!("No provider returned a catalog; writing an empty model list");
    }

    let saved = core::persistence::save_result_set(&config.output_path, report.models)?;
    log::info!(
        "Saved {} free models to {}",
        saved.total_count,
        config.output_path.display()
    );
    log::info!("Completed! Total free models: {}", saved.total_count);
    Ok(())
}

/// List models from the output file, optionally narrowed by query and provider name.
pub fn run_show(output: &Path, query: Option<&str>, provider: Option<&str>) {
    let provider = match provider {
        Some(name) => match Provider::from_name(name) {
            Some(p) => Some(p),
            None => {
                let known: Vec<_> = Provider::ALL.iter().map(|p| p.name()).collect();
                eprintln!(
                    "Error: unknown provider '{}' (expected one of: {})",
                    name,
                    known.join(", ")
                );
                std::process::exit(1);
            }
        },
        None => None,
    };
    core::cli::run_show(output, query, provider);
}
