//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::core::config::{DEFAULT_TIMEOUT_SECS, Overrides};

const AFTER_HELP: &str = "\
EXAMPLES:
  free-models                          Fetch all providers, write data/free_models.json
  free-models -o site/models.json      Write to another file
  free-models show                     List models from the last run
  free-models show --provider zhipu    List one provider's models

ENVIRONMENT:
  OPENROUTER_API_KEY, SILICONFLOW_API_KEY, ZHIPU_API_KEY
                                       Provider tokens (a missing token skips that provider)
  OPENROUTER_BASE_URL, SILICONFLOW_BASE_URL, ZHIPU_BASE_URL
                                       Override a provider's models endpoint
  FREE_MODELS_OUTPUT                   Output file (same as --output)
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Collect free LLM models from OpenRouter, SiliconFlow and Zhipu AI into one JSON file",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output file (default: data/free_models.json, or FREE_MODELS_OUTPUT)
    #[arg(short = 'o', long, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Increase log verbosity (use multiple times for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch free models from every provider and write the output file (default)
    Fetch,
    /// List models from a previously written output file
    Show {
        /// Filter models by id or name
        #[arg(long)]
        query: Option<String>,
        /// Only list this provider (openrouter, siliconflow, zhipu, or the display name)
        #[arg(long)]
        provider: Option<String>,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, info, debug, or trace.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "trace"
        } else if self.verbose >= 1 {
            "debug"
        } else {
            "info"
        }
    }

    /// Command-line values that take precedence over the environment.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            output: self.output.clone(),
            timeout_secs: Some(self.timeout),
        }
    }
}
