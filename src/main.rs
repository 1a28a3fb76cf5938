mod cli;
mod config;
mod convert;
mod convert_cmd;
mod fetch_cmd;
mod logging;
mod output;

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
        Command::Fetch(args) => fetch_cmd::run(args),
        Command::Convert(args) => convert_cmd::run(args),
    }
}
