//! Command Line Interface (CLI) layer for casquery.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! the lookup progress bar (`progress`) and the per-command orchestration
//! (`runner`). It wires user-provided options to the library exposed via
//! `casquery::api`.
//!
//! If you are embedding casquery into another application, prefer the
//! `casquery::api` module over calling the CLI code.
pub mod args;
pub mod errors;
pub mod progress;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
