//! CLI argument parsing for slowbar

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slowbar")]
#[command(author, version, about = "Run a slow synthetic workload behind a progress bar", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Units of work to perform (default: 100)
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Multiply-accumulates per unit (default: 1000)
    #[arg(short, long)]
    pub steps: Option<usize>,

    /// Seed for the random number generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Label drawn beside the bar
    #[arg(short, long)]
    pub label: Option<String>,

    /// Don't draw a progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Let command-line flags take precedence over the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(n) = self.iterations {
            config.workload.iterations = n;
        }
        if let Some(s) = self.steps {
            config.workload.steps = s;
        }
        if let Some(label) = &self.label {
            config.label = label.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = Some(level.clone());
        }
    }
}
