use clap::{Parser, Subcommand};
use std::path::PathBuf;

use casquery::types::OutputFormat;
use casquery::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "casquery",
    version,
    about = "CAS RN utility for EPA SRS",
    arg_required_else_help = true
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    /// Registry endpoint to query
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize raw CAS strings into the standard CAS format (X...X-XX-X).
    ///
    /// Removes all non-digit characters, requires 3-10 digits and formats
    /// them as [all but the last 3]-[next 2]-[last digit]. This does NOT
    /// validate that the CAS RN is real.
    Normalize {
        /// One or more CAS RN strings to normalize
        #[arg(required = true)]
        cas_rn: Vec<String>,
    },

    /// Search the EPA Substance Registry Service (SRS) by CAS RN
    Search {
        /// CAS RN or list of CAS RN to search
        #[arg(required = true)]
        cas_rn: Vec<String>,

        /// Include chemical synonyms in the output
        #[arg(short, long, default_value_t = false)]
        synonyms: bool,

        /// Output format
        #[arg(short = 'F', long, value_enum, ignore_case = true, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write results as CSV to --output instead of printing to stdout
        #[arg(short, long, default_value_t = false)]
        file: bool,

        /// CSV path used with --file
        #[arg(short, long, default_value = "casquery.csv")]
        output: PathBuf,
    },

    /// Resolve a CAS RN to its currentCasNumber using EPA SRS
    Resolve {
        /// CAS RN to resolve
        cas_rn: String,
    },

    /// Batch-process a CSV of CAS RN: normalize, resolve, and attach EPA SRS metadata
    Batch {
        /// Input CSV file containing a column of CAS RN values
        input_csv: PathBuf,

        /// Name of the column that contains CAS RN values
        #[arg(short, long, default_value = "cas_rn")]
        column: String,

        /// Output CSV file path
        #[arg(short, long, default_value = "casquery_batch.csv")]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_defaults() {
        let args = CliArgs::try_parse_from(["casquery", "batch", "in.csv"]).unwrap();
        match args.command {
            Command::Batch {
                input_csv,
                column,
                output,
            } => {
                assert_eq!(input_csv, PathBuf::from("in.csv"));
                assert_eq!(column, "cas_rn");
                assert_eq!(output, PathBuf::from("casquery_batch.csv"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(args.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(args.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn search_accepts_format_case_insensitively() {
        let args = CliArgs::try_parse_from([
            "casquery", "search", "375-73-5", "50-00-0", "-F", "JSON", "-s", "--log",
        ])
        .unwrap();
        match args.command {
            Command::Search {
                cas_rn,
                synonyms,
                format,
                file,
                ..
            } => {
                assert_eq!(cas_rn, ["375-73-5", "50-00-0"]);
                assert!(synonyms);
                assert_eq!(format, OutputFormat::Json);
                assert!(!file);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(args.log);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = CliArgs::try_parse_from(["casquery", "search", "375-73-5", "--format", "yaml"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn search_requires_an_identifier() {
        assert!(CliArgs::try_parse_from(["casquery", "search"]).is_err());
    }
}
