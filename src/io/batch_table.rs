//! Batch CSV tables: header-keyed rows in, annotated rows out.
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{BatchRow, DERIVED_COLUMNS};

const UTF8_BOM: char = '\u{feff}';

/// An in-memory CSV table: header order plus one map per data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchTable {
    pub headers: Vec<String>,
    pub rows: Vec<BatchRow>,
}

impl BatchTable {
    /// Parse a CSV with a header row. Short rows are padded with empty cells;
    /// fields past the last header are dropped with a warning.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, h)| {
                if idx == 0 {
                    h.trim_start_matches(UTF8_BOM).to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() > headers.len() {
                warn!(
                    "Row {} has {} fields but the header has {}; extra fields are dropped",
                    idx + 1,
                    record.len(),
                    headers.len()
                );
            }
            let row: BatchRow = headers
                .iter()
                .enumerate()
                .map(|(idx, header)| (header.clone(), record.get(idx).unwrap_or("").to_string()))
                .collect();
            rows.push(row);
        }

        debug!("Read {} rows with columns {:?}", rows.len(), headers);
        Ok(Self { headers, rows })
    }

    pub fn read(path: &Path) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Input headers followed by every derived column not already present.
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        for derived in DERIVED_COLUMNS {
            if !headers.iter().any(|h| h == derived) {
                headers.push(derived.to_string());
            }
        }
        headers
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let headers = self.output_headers();
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&headers)?;
        for row in &self.rows {
            writer.write_record(
                headers
                    .iter()
                    .map(|h| row.get(h).map(String::as_str).unwrap_or("")),
            )?;
        }
        writer.into_inner().map_err(|e| Error::Io(e.into_error()))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let bytes = self.to_csv_bytes()?;
        write_atomic(path, &bytes)
    }
}

/// Write `bytes` to `path` through a temporary file in the same directory,
/// so `path` only ever appears fully written.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
