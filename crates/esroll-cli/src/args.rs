use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the esroll binary.
#[derive(Parser, Debug, Default)]
#[command(
    name = "esroll",
    version,
    about = "Tree-shaking bundler for ECMAScript modules"
)]
pub struct CliArgs {
    /// Entry module. Overrides `entry` from the config file.
    pub entry: Option<PathBuf>,

    /// Write the bundle to this file instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Path to a JSON config file (default: ./esroll.config.json if present).
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Print the entry module's statement analysis as JSON instead of bundling.
    #[arg(long)]
    pub analyze: bool,

    /// Enable color in error output (default: when stderr is a terminal).
    #[arg(long)]
    pub pretty: Option<bool>,
}
