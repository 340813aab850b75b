use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// OMI: the OLR-based MJO index calculator.
#[derive(Parser)]
#[command(name = "omi", version, about = "OLR MJO index (OMI) calculator")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute the DOY-resolved EOF collection from OLR data.
    Eofs(EofsArgs),
    /// Project OLR data onto an EOF collection to obtain the OMI PCs.
    Pcs(PcsArgs),
    /// Compare a computed PC file against a reference PC file.
    Evaluate(EvaluateArgs),
}

/// Arguments for the `eofs` subcommand.
#[derive(clap::Args)]
pub struct EofsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "omi.toml")]
    pub config: PathBuf,

    /// Override the OLR input path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override the EOF archive output path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `pcs` subcommand.
#[derive(clap::Args)]
pub struct PcsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "omi.toml")]
    pub config: PathBuf,

    /// Override the OLR input path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override the EOF archive path from config.
    #[arg(short, long)]
    pub eofs: Option<PathBuf>,

    /// Override the PC output path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `evaluate` subcommand.
#[derive(clap::Args)]
pub struct EvaluateArgs {
    /// Path to the reference PC file.
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Reference file uses the legacy whitespace column layout.
    #[arg(long)]
    pub reference_original_format: bool,

    /// Path to the computed PC file (CSV format).
    #[arg(short, long)]
    pub computed: PathBuf,
}
