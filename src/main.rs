//! casquery CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, dispatch to the selected
//! subcommand, and exit non-zero on usage errors. Lookups that find nothing
//! are not errors. For programmatic use, prefer the library API (`casquery::api`).

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", console::style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
