use console::{Alignment, measure_text_width, pad_str, style};

use super::Render;
use crate::error::Result;
use crate::types::{Column, SubstanceRecord};

const TITLE: &str = "EPA SRS CASRN Search Results";
const GAP: &str = "  ";

/// Aligned plain-text table for terminals. Header styling follows
/// `console`'s color detection, so piped output stays plain.
pub struct TableRenderer {
    columns: &'static [Column],
}

impl TableRenderer {
    pub fn new(columns: &'static [Column]) -> Self {
        Self { columns }
    }

    fn widths(&self, records: &[SubstanceRecord]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|column| {
                records
                    .iter()
                    .map(|r| measure_text_width(column.value(r).unwrap_or_default()))
                    .chain(std::iter::once(column.name().len()))
                    .max()
                    .unwrap_or_default()
            })
            .collect()
    }
}

fn join_line(cells: impl Iterator<Item = String>) -> String {
    let line = cells.collect::<Vec<_>>().join(GAP);
    format!("{}\n", line.trim_end())
}

impl Render for TableRenderer {
    fn render(&self, records: &[SubstanceRecord]) -> Result<Vec<u8>> {
        if records.is_empty() {
            return Ok(format!("{}\n", style("No results returned.").yellow()).into_bytes());
        }

        let widths = self.widths(records);
        let mut out = String::new();

        out.push('\n');
        out.push_str(&format!("{}\n\n", style(TITLE).bold()));

        // Pad before styling so escape codes do not skew the widths.
        out.push_str(&join_line(self.columns.iter().zip(&widths).map(
            |(column, &width)| {
                let cell = pad_str(column.name(), width, Alignment::Left, None);
                style(cell).bold().cyan().to_string()
            },
        )));
        out.push_str(&join_line(widths.iter().map(|&width| "─".repeat(width))));

        for record in records {
            out.push_str(&join_line(self.columns.iter().zip(&widths).map(
                |(column, &width)| {
                    pad_str(column.value(record).unwrap_or_default(), width, Alignment::Left, None)
                        .into_owned()
                },
            )));
        }
        out.push('\n');

        Ok(out.into_bytes())
    }
}
