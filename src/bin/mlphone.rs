//! mlphone - phonetic keys for Malayalam words
//!
//! Computes, compares and explains phonetic keys from the command line.

use clap::Parser;
use colored::Colorize;
use std::process;

use mlphone::cli::{commands, init_tracing, Cli};

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = commands::execute(cli.command, cli.config) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}
