//! Shared types used across casquery.
//! Includes `OutputFormat`, the `SubstanceRecord` produced by the resolution
//! pipeline, the `Column` set that every renderer walks, and the `BatchRow`
//! shape consumed by the batch aggregator.
use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Xml,
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Xml => write!(f, "xml"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// One resolved (or unresolved) identifier.
///
/// `cas_rn` is the key that was actually sent to the registry: the canonical
/// form when normalization succeeded, otherwise the sanitized raw input.
/// Every other field is `None` when the registry had nothing for the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstanceRecord {
    pub cas_rn: String,
    pub systematic_name: Option<String>,
    pub epa_name: Option<String>,
    pub current_cas_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<String>,
}

/// Output columns, in the order renderers emit them.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Column {
    CasRn,
    SystematicName,
    EpaName,
    CurrentCasNumber,
    Synonyms,
}

const BASE_COLUMNS: &[Column] = &[
    Column::CasRn,
    Column::SystematicName,
    Column::EpaName,
    Column::CurrentCasNumber,
];

const SYNONYM_COLUMNS: &[Column] = &[
    Column::CasRn,
    Column::SystematicName,
    Column::EpaName,
    Column::CurrentCasNumber,
    Column::Synonyms,
];

impl Column {
    /// Column set for a result set; `synonyms` only appears when it was requested.
    pub fn for_output(include_synonyms: bool) -> &'static [Column] {
        if include_synonyms {
            SYNONYM_COLUMNS
        } else {
            BASE_COLUMNS
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Column::CasRn => "casRn",
            Column::SystematicName => "systematicName",
            Column::EpaName => "epaName",
            Column::CurrentCasNumber => "currentCasNumber",
            Column::Synonyms => "synonyms",
        }
    }

    pub fn value(self, record: &SubstanceRecord) -> Option<&str> {
        match self {
            Column::CasRn => Some(record.cas_rn.as_str()),
            Column::SystematicName => record.systematic_name.as_deref(),
            Column::EpaName => record.epa_name.as_deref(),
            Column::CurrentCasNumber => record.current_cas_number.as_deref(),
            Column::Synonyms => record.synonyms.as_deref(),
        }
    }
}

/// One line of a batch input table, keyed by column name.
pub type BatchRow = HashMap<String, String>;

pub const NORMALIZED_COLUMN: &str = "normalized";
pub const RESOLVED_COLUMN: &str = "resolved";
pub const SYSTEMATIC_NAME_COLUMN: &str = "systematicName";
pub const EPA_NAME_COLUMN: &str = "epaName";

/// Columns the batch aggregator appends to every row.
pub const DERIVED_COLUMNS: [&str; 4] = [
    NORMALIZED_COLUMN,
    RESOLVED_COLUMN,
    SYSTEMATIC_NAME_COLUMN,
    EPA_NAME_COLUMN,
];
