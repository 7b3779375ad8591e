//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the evaluation demo
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Promotion configuration (YAML); defaults to the built-in production values
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Cart snapshot in the host's JSON input format
    #[clap(long, conflicts_with = "fixture")]
    pub cart: Option<PathBuf>,

    /// Fixture set to load the configuration and cart from
    #[clap(short, long)]
    pub fixture: Option<String>,

    /// Print the per-promotion breakdown as well as the result
    #[clap(short, long)]
    pub breakdown: bool,
}
