use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Render;
use crate::error::Result;
use crate::types::{Column, SubstanceRecord};

/// Pretty-printed JSON array; absent fields are `null`.
pub struct JsonRenderer {
    columns: &'static [Column],
}

impl JsonRenderer {
    pub fn new(columns: &'static [Column]) -> Self {
        Self { columns }
    }
}

/// A record serialized as an object whose keys follow the column order.
struct RecordView<'a> {
    record: &'a SubstanceRecord,
    columns: &'static [Column],
}

impl Serialize for RecordView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in self.columns {
            map.serialize_entry(column.name(), &column.value(self.record))?;
        }
        map.end()
    }
}

impl Render for JsonRenderer {
    fn render(&self, records: &[SubstanceRecord]) -> Result<Vec<u8>> {
        let views: Vec<RecordView<'_>> = records
            .iter()
            .map(|record| RecordView {
                record,
                columns: self.columns,
            })
            .collect();

        let mut out = serde_json::to_vec_pretty(&views)?;
        out.push(b'\n');
        Ok(out)
    }
}
