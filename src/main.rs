mod cli;
mod config;
mod eofs_cmd;
mod evaluate_cmd;
mod logging;
mod pcs_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Eofs(args) => eofs_cmd::run(args),
        Command::Pcs(args) => pcs_cmd::run(args),
        Command::Evaluate(args) => evaluate_cmd::run(args),
    }
}
