use std::path::Path;

use tracing::info;

use super::Render;
use crate::error::{Error, Result};
use crate::io::batch_table::write_atomic;
use crate::types::{Column, SubstanceRecord};

/// Header row plus one row per record; absent fields are empty cells.
/// An empty result set renders to nothing, not even a header.
pub struct CsvRenderer {
    columns: &'static [Column],
}

impl CsvRenderer {
    pub fn new(columns: &'static [Column]) -> Self {
        Self { columns }
    }
}

impl Render for CsvRenderer {
    fn render(&self, records: &[SubstanceRecord]) -> Result<Vec<u8>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.columns.iter().map(|c| c.name()))?;
        for record in records {
            writer.write_record(
                self.columns
                    .iter()
                    .map(|c| c.value(record).unwrap_or_default()),
            )?;
        }

        writer.into_inner().map_err(|e| Error::Io(e.into_error()))
    }
}

/// Write search results to a CSV file. Refuses to create the file when there
/// is nothing to write.
pub fn write_csv_file(
    records: &[SubstanceRecord],
    include_synonyms: bool,
    path: &Path,
) -> Result<()> {
    if records.is_empty() {
        return Err(Error::NoRows);
    }

    let bytes = CsvRenderer::new(Column::for_output(include_synonyms)).render(records)?;
    write_atomic(path, &bytes)?;
    info!("Results written to {:?}", path);
    Ok(())
}
