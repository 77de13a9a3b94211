//! Result-set renderers. Every output format implements [`Render`] over the
//! same `SubstanceRecord` slice; [`OutputFormat::renderer`] picks one.
pub mod csv_file;
pub mod json;
pub mod table;
pub mod xml;

pub use csv_file::{CsvRenderer, write_csv_file};
pub use json::JsonRenderer;
pub use table::TableRenderer;
pub use xml::XmlRenderer;

use crate::error::Result;
use crate::types::{Column, OutputFormat, SubstanceRecord};

/// Turns a sorted result set into bytes ready for stdout or a file.
pub trait Render {
    fn render(&self, records: &[SubstanceRecord]) -> Result<Vec<u8>>;
}

impl OutputFormat {
    pub fn renderer(self, include_synonyms: bool) -> Box<dyn Render> {
        let columns = Column::for_output(include_synonyms);
        match self {
            OutputFormat::Table => Box::new(TableRenderer::new(columns)),
            OutputFormat::Json => Box::new(JsonRenderer::new(columns)),
            OutputFormat::Xml => Box::new(XmlRenderer::new(columns)),
            OutputFormat::Csv => Box::new(CsvRenderer::new(columns)),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_records() -> Vec<SubstanceRecord> {
    vec![
        SubstanceRecord {
            cas_rn: "29420-43-3".to_string(),
            systematic_name: Some("Perfluorobutanesulfonic acid, potassium salt".to_string()),
            epa_name: Some("PFBS potassium salt".to_string()),
            current_cas_number: Some("375-73-5".to_string()),
            synonyms: None,
        },
        SubstanceRecord {
            cas_rn: "64-17-5".to_string(),
            ..Default::default()
        },
    ]
}
