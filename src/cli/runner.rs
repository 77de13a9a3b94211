use std::io::Write;
use std::path::Path;

use console::style;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use casquery::types::OutputFormat;
use casquery::{
    HttpRegistryClient, RegistryParams, Resolution, Resolver, http_resolver, normalize,
    process_batch_file, write_csv_file,
};

use super::args::{CliArgs, Command};
use super::errors::AppError;
use super::progress::LookupProgress;

const PROGRESS_MESSAGE: &str = "Querying EPA SRS";

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "casquery=debug,warn" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_resolver(
    params: RegistryParams,
    show_progress: bool,
) -> Result<Resolver<HttpRegistryClient>, AppError> {
    if params.timeout_secs == 0 {
        return Err(AppError::ZeroTimeout {
            timeout: params.timeout_secs,
        });
    }
    debug!("Registry parameters: {:?}", params);

    let resolver = http_resolver(params)?;
    Ok(if show_progress {
        resolver.with_observer(Box::new(LookupProgress::new(PROGRESS_MESSAGE)))
    } else {
        resolver
    })
}

fn run_normalize(cas_rn: &[String]) {
    for raw in cas_rn {
        match normalize(raw) {
            Some(norm) => println!("{} -> {}", style(raw).cyan(), style(norm).green()),
            None => println!(
                "{} -> {}",
                style(raw).cyan(),
                style("invalid / cannot normalize").red()
            ),
        }
    }
}

fn run_search(
    params: RegistryParams,
    cas_rn: &[String],
    synonyms: bool,
    format: OutputFormat,
    file: bool,
    output: &Path,
) -> Result<(), AppError> {
    let resolver = build_resolver(params, format == OutputFormat::Table)?;
    let records = resolver.resolve(cas_rn, synonyms);

    if file {
        write_csv_file(&records, synonyms, output)?;
        println!(
            "{}",
            style(format!("Results written to {}", output.display()))
                .green()
                .bold()
        );
        return Ok(());
    }

    let bytes = format.renderer(synonyms).render(&records)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.flush()?;
    Ok(())
}

fn run_resolve(params: RegistryParams, cas_rn: &str) -> Result<(), AppError> {
    let resolver = build_resolver(params, false)?;

    match resolver.resolve_current(cas_rn)? {
        Resolution::NotFound(_) => println!(
            "{}",
            style("No resolution information found for this CAS RN.").yellow()
        ),
        Resolution::Current(cas) => println!(
            "{} is already the current CAS RN (no supersession).",
            style(cas).green()
        ),
        Resolution::Superseded { queried, current } => println!(
            "{} -> current CAS RN: {}",
            style(queried).cyan(),
            style(current).green().bold()
        ),
    }
    Ok(())
}

fn run_batch(
    params: RegistryParams,
    input_csv: &Path,
    column: &str,
    output: &Path,
) -> Result<(), AppError> {
    if !input_csv.is_file() {
        return Err(AppError::InputNotFound {
            path: input_csv.to_path_buf(),
        });
    }

    println!(
        "{}\n",
        style(format!(
            "CASRN Batch Processing v{}",
            env!("CARGO_PKG_VERSION")
        ))
        .cyan()
        .bold()
    );

    let resolver = build_resolver(params, true)?;
    let report = process_batch_file(&resolver, input_csv, column, output)?;

    info!(
        "Rows: {}, distinct CAS RN: {}, resolved rows: {}",
        report.rows, report.distinct, report.resolved
    );
    println!(
        "{}",
        style(format!("Batch results written to {}", output.display()))
            .green()
            .bold()
    );
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    init_logging(args.log);

    let params = RegistryParams {
        base_url: args.base_url,
        timeout_secs: args.timeout,
    };

    match args.command {
        Command::Normalize { cas_rn } => {
            run_normalize(&cas_rn);
            Ok(())
        }
        Command::Search {
            cas_rn,
            synonyms,
            format,
            file,
            output,
        } => run_search(params, &cas_rn, synonyms, format, file, &output),
        Command::Resolve { cas_rn } => run_resolve(params, &cas_rn),
        Command::Batch {
            input_csv,
            column,
            output,
        } => run_batch(params, &input_csv, &column, &output),
    }
}
