//! Batch aggregation: one registry lookup per distinct CAS RN in a table column.
use std::collections::{BTreeSet, HashMap};

use tracing::info;

use crate::core::normalize::{CasRn, normalize};
use crate::core::pipeline::Resolver;
use crate::error::{Error, Result};
use crate::io::registry::RegistryClient;
use crate::types::{
    BatchRow, Column, EPA_NAME_COLUMN, NORMALIZED_COLUMN, RESOLVED_COLUMN,
    SYSTEMATIC_NAME_COLUMN, SubstanceRecord,
};

impl<C: RegistryClient> Resolver<C> {
    /// Normalize `column` in every row, resolve each distinct CAS RN once, and
    /// append `normalized`, `resolved`, `systematicName` and `epaName` to
    /// every row.
    ///
    /// Fails before any lookup when `rows` is empty or the first row has no
    /// `column`.
    pub fn process_batch(&self, mut rows: Vec<BatchRow>, column: &str) -> Result<Vec<BatchRow>> {
        let first = rows.first().ok_or(Error::EmptyInput)?;
        if !first.contains_key(column) {
            return Err(Error::MissingColumn {
                column: column.to_string(),
            });
        }

        let mut unique: BTreeSet<String> = BTreeSet::new();
        for row in rows.iter_mut() {
            let normalized = row
                .get(column)
                .and_then(|raw| normalize(raw))
                .map(CasRn::into_string)
                .unwrap_or_default();
            if !normalized.is_empty() {
                unique.insert(normalized.clone());
            }
            row.insert(NORMALIZED_COLUMN.to_string(), normalized);
        }

        info!(
            "Resolving {} distinct CAS RN across {} rows",
            unique.len(),
            rows.len()
        );

        let keys: Vec<String> = unique.into_iter().collect();
        let by_key: HashMap<String, SubstanceRecord> = if keys.is_empty() {
            HashMap::new()
        } else {
            self.resolve(&keys, false)
                .into_iter()
                .map(|record| (record.cas_rn.clone(), record))
                .collect()
        };

        for row in rows.iter_mut() {
            let record = row
                .get(NORMALIZED_COLUMN)
                .filter(|n| !n.is_empty())
                .and_then(|n| by_key.get(n.as_str()));
            let field = |source: Column| {
                record
                    .and_then(|r| source.value(r))
                    .unwrap_or_default()
                    .to_string()
            };

            let resolved = field(Column::CurrentCasNumber);
            let systematic_name = field(Column::SystematicName);
            let epa_name = field(Column::EpaName);
            row.insert(RESOLVED_COLUMN.to_string(), resolved);
            row.insert(SYSTEMATIC_NAME_COLUMN.to_string(), systematic_name);
            row.insert(EPA_NAME_COLUMN.to_string(), epa_name);
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::tests::pfbs_registry;

    fn row(pairs: &[(&str, &str)]) -> BatchRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn annotates_rows_with_resolution() {
        let resolver = Resolver::new(pfbs_registry());
        let rows = vec![
            row(&[("sample_id", "S1"), ("cas_rn", "375735")]),
            row(&[("sample_id", "S2"), ("cas_rn", "29420433")]),
        ];

        let out = resolver.process_batch(rows, "cas_rn").unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["sample_id"], "S1");
        assert_eq!(out[0]["normalized"], "375-73-5");
        assert_eq!(out[0]["epaName"], "PFBS");
        assert_eq!(out[1]["normalized"], "29420-43-3");
        assert!(out[1]["systematicName"].contains("potassium"));
        assert!(out.iter().all(|r| r["resolved"] == "375-73-5"));
        assert_eq!(resolver.client().calls.borrow().len(), 2);
    }

    #[test]
    fn one_lookup_per_distinct_identifier() {
        let resolver = Resolver::new(pfbs_registry());
        let rows = ["375735", "375-73-5", " 375 73 5", "29420433", "29420-43-3"]
            .iter()
            .map(|cas| row(&[("cas_rn", *cas)]))
            .collect();

        let out = resolver.process_batch(rows, "cas_rn").unwrap();

        assert_eq!(out.len(), 5);
        // Sorted unique set drives query order.
        assert_eq!(
            *resolver.client().calls.borrow(),
            ["29420-43-3", "375-73-5"]
        );
        assert!(out.iter().all(|r| r["resolved"] == "375-73-5"));
    }

    #[test]
    fn invalid_and_unknown_rows_get_empty_fields() {
        let resolver = Resolver::new(pfbs_registry());
        let rows = vec![
            row(&[("cas_rn", "n/a")]),
            row(&[("cas_rn", "50-00-0")]),
            row(&[("other", "x")]),
        ];

        let out = resolver.process_batch(rows, "cas_rn").unwrap();

        assert_eq!(out[0]["normalized"], "");
        assert_eq!(out[1]["normalized"], "50-00-0");
        assert_eq!(out[2]["normalized"], "");
        for r in &out {
            assert_eq!(r["resolved"], "");
            assert_eq!(r["systematicName"], "");
            assert_eq!(r["epaName"], "");
        }
        assert_eq!(*resolver.client().calls.borrow(), ["50-00-0"]);
    }

    #[test]
    fn no_lookups_when_nothing_normalizes() {
        let resolver = Resolver::new(pfbs_registry());
        let rows = vec![row(&[("cas_rn", "")]), row(&[("cas_rn", "12")])];

        let out = resolver.process_batch(rows, "cas_rn").unwrap();

        assert_eq!(out.len(), 2);
        assert!(resolver.client().calls.borrow().is_empty());
    }

    #[test]
    fn missing_column_fails_without_lookups() {
        let resolver = Resolver::new(pfbs_registry());
        let rows = vec![row(&[("casrn", "375735")])];

        let err = resolver.process_batch(rows, "cas_rn").unwrap_err();

        assert!(matches!(err, Error::MissingColumn { ref column } if column == "cas_rn"));
        assert!(resolver.client().calls.borrow().is_empty());
    }

    #[test]
    fn empty_input_fails_without_lookups() {
        let resolver = Resolver::new(pfbs_registry());

        let err = resolver.process_batch(Vec::new(), "cas_rn").unwrap_err();

        assert!(matches!(err, Error::EmptyInput));
        assert!(resolver.client().calls.borrow().is_empty());
    }
}
