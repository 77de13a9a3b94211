//! High-level library API: build an HTTP-backed resolver, run a search to
//! rendered bytes, and batch-process CSV files. Prefer these entrypoints over
//! the lower-level `core` and `io` modules when embedding casquery.
use std::collections::BTreeSet;
use std::path::Path;

use tracing::info;

use crate::core::params::RegistryParams;
use crate::core::pipeline::Resolver;
use crate::error::Result;
use crate::io::batch_table::BatchTable;
use crate::io::registry::{HttpRegistryClient, RegistryClient};
use crate::types::{NORMALIZED_COLUMN, OutputFormat, RESOLVED_COLUMN};

/// Counts reported after a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub rows: usize,
    /// Distinct canonical CAS RN sent to the registry
    pub distinct: usize,
    /// Rows that ended up with a current CAS RN
    pub resolved: usize,
}

/// Resolver backed by the EPA SRS HTTP client.
pub fn http_resolver(params: RegistryParams) -> Result<Resolver<HttpRegistryClient>> {
    Ok(Resolver::new(HttpRegistryClient::new(params)?))
}

/// Resolve identifiers and render the sorted result set in `format`.
pub fn search_to_bytes<C: RegistryClient, S: AsRef<str>>(
    resolver: &Resolver<C>,
    identifiers: &[S],
    include_synonyms: bool,
    format: OutputFormat,
) -> Result<Vec<u8>> {
    let records = resolver.resolve(identifiers, include_synonyms);
    format.renderer(include_synonyms).render(&records)
}

/// Read `input`, resolve the distinct CAS RN found under `column`, and write
/// the enriched table to `output`.
///
/// On any error nothing is written to `output`.
pub fn process_batch_file<C: RegistryClient>(
    resolver: &Resolver<C>,
    input: &Path,
    column: &str,
    output: &Path,
) -> Result<BatchReport> {
    let table = BatchTable::read(input)?;
    info!("Read {} rows from {:?}", table.rows.len(), input);

    let BatchTable { headers, rows } = table;
    let rows = resolver.process_batch(rows, column)?;

    let report = BatchReport {
        rows: rows.len(),
        distinct: rows
            .iter()
            .filter_map(|r| r.get(NORMALIZED_COLUMN))
            .filter(|n| !n.is_empty())
            .collect::<BTreeSet<_>>()
            .len(),
        resolved: rows
            .iter()
            .filter(|r| r.get(RESOLVED_COLUMN).is_some_and(|v| !v.is_empty()))
            .count(),
    };

    BatchTable { headers, rows }.write(output)?;
    info!("Batch results written to {:?}", output);

    Ok(report)
}
