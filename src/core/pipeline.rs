//! Resolution pipeline: normalize each identifier, look it up once, shape the
//! result into a `SubstanceRecord`, and sort the result set.
use std::cmp::Ordering;

use tracing::debug;

use crate::core::normalize::{CasRn, normalize, sanitize_identifier};
use crate::error::Result;
use crate::io::registry::{RegistryClient, SubstanceData};
use crate::types::SubstanceRecord;

/// Progress notification for one finished lookup.
#[derive(Debug, Clone, Copy)]
pub struct LookupEvent<'a> {
    /// Zero-based position of the identifier in the request
    pub index: usize,
    pub total: usize,
    /// Key that was sent to the registry
    pub key: &'a str,
    pub found: bool,
}

/// Observer for lookup progress. Purely observational: it cannot change
/// what the pipeline returns.
pub trait LookupObserver {
    fn on_lookup(&self, event: &LookupEvent<'_>);

    fn on_complete(&self, _total: usize) {}
}

/// Outcome of resolving a single CAS RN to its current registry identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The registry lists the queried CAS RN as current.
    Current(CasRn),
    /// The registry points the queried CAS RN at a different current one.
    Superseded { queried: CasRn, current: String },
    /// The registry has no current CAS RN for the input.
    NotFound(CasRn),
}

/// Per-invocation query context: the registry client plus an optional
/// progress observer. One `Resolver` serves one command run.
pub struct Resolver<C> {
    client: C,
    observer: Option<Box<dyn LookupObserver>>,
}

impl<C: RegistryClient> Resolver<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn LookupObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolve every identifier, one registry call each, and return one record
    /// per input sorted by `(currentCasNumber, casRn)`.
    ///
    /// Failed lookups still produce a record with only `cas_rn` set.
    pub fn resolve<S: AsRef<str>>(
        &self,
        identifiers: &[S],
        include_synonyms: bool,
    ) -> Vec<SubstanceRecord> {
        let total = identifiers.len();
        let mut records: Vec<SubstanceRecord> = identifiers
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let key = query_key(raw.as_ref());
                let data = if key.is_empty() {
                    debug!("Nothing to query for {:?}", raw.as_ref());
                    None
                } else {
                    self.client.lookup(&key)
                };

                if let Some(observer) = &self.observer {
                    observer.on_lookup(&LookupEvent {
                        index,
                        total,
                        key: &key,
                        found: data.is_some(),
                    });
                }

                build_record(key, data, include_synonyms)
            })
            .collect();

        if let Some(observer) = &self.observer {
            observer.on_complete(total);
        }

        sort_records(&mut records);
        records
    }

    /// Resolve one raw CAS RN to the identifier the registry considers current.
    pub fn resolve_current(&self, raw: &str) -> Result<Resolution> {
        let queried: CasRn = raw.parse()?;
        let current = self
            .resolve(&[queried.as_str()], false)
            .into_iter()
            .next()
            .and_then(|record| record.current_cas_number);

        Ok(match current {
            None => Resolution::NotFound(queried),
            Some(current) if current == queried.as_str() => Resolution::Current(queried),
            Some(current) => Resolution::Superseded { queried, current },
        })
    }
}

/// Canonical form when the input normalizes, else the sanitized raw input.
fn query_key(raw: &str) -> String {
    match normalize(raw) {
        Some(cas) => cas.into_string(),
        None => {
            let cleaned = sanitize_identifier(raw);
            debug!("{:?} does not normalize, querying as {:?}", raw, cleaned);
            cleaned
        }
    }
}

fn build_record(
    key: String,
    data: Option<SubstanceData>,
    include_synonyms: bool,
) -> SubstanceRecord {
    let mut record = SubstanceRecord {
        cas_rn: key,
        ..Default::default()
    };

    if let Some(data) = data {
        if include_synonyms {
            record.synonyms = data.joined_synonyms();
        }
        record.systematic_name = data.systematic_name;
        record.epa_name = data.epa_name;
        record.current_cas_number = data.current_cas_number;
    }

    record
}

fn compare_records(a: &SubstanceRecord, b: &SubstanceRecord) -> Ordering {
    let current_a = a.current_cas_number.as_deref().unwrap_or("");
    let current_b = b.current_cas_number.as_deref().unwrap_or("");
    current_a
        .cmp(current_b)
        .then_with(|| a.cas_rn.cmp(&b.cas_rn))
}

/// Sort by authoritative CAS RN, then by the queried key; absent values sort
/// as the empty string. Records for the same substance end up adjacent.
pub fn sort_records(records: &mut [SubstanceRecord]) {
    records.sort_by(compare_records);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use crate::error::Error;
    use crate::io::registry::Synonym;

    /// Registry stand-in that serves canned data and records every key it is asked for.
    #[derive(Default)]
    pub(crate) struct StubRegistry {
        pub data: HashMap<String, SubstanceData>,
        pub calls: RefCell<Vec<String>>,
    }

    impl StubRegistry {
        pub(crate) fn with(mut self, key: &str, data: SubstanceData) -> Self {
            self.data.insert(key.to_string(), data);
            self
        }
    }

    impl RegistryClient for StubRegistry {
        fn lookup(&self, identifier: &str) -> Option<SubstanceData> {
            self.calls.borrow_mut().push(identifier.to_string());
            self.data.get(identifier).cloned()
        }
    }

    pub(crate) fn substance(systematic: &str, epa: &str, current: &str) -> SubstanceData {
        SubstanceData {
            systematic_name: Some(systematic.to_string()),
            epa_name: Some(epa.to_string()),
            current_cas_number: Some(current.to_string()),
            synonyms: None,
        }
    }

    pub(crate) fn pfbs_registry() -> StubRegistry {
        StubRegistry::default()
            .with(
                "375-73-5",
                substance("Perfluorobutane sulfonic acid", "PFBS", "375-73-5"),
            )
            .with(
                "29420-43-3",
                substance(
                    "Perfluorobutanesulfonic acid, potassium salt",
                    "PFBS potassium salt",
                    "375-73-5",
                ),
            )
    }

    #[test]
    fn sorts_by_current_then_queried_cas() {
        let resolver = Resolver::new(pfbs_registry());
        let records = resolver.resolve(&["375-73-5", "29420-43-3"], false);

        assert_eq!(records.len(), 2);
        let keys: Vec<&str> = records.iter().map(|r| r.cas_rn.as_str()).collect();
        assert_eq!(keys, ["29420-43-3", "375-73-5"]);
        assert!(
            records
                .iter()
                .all(|r| r.current_cas_number.as_deref() == Some("375-73-5"))
        );
        assert_eq!(records[1].epa_name.as_deref(), Some("PFBS"));
        assert_eq!(records[0].synonyms, None);
    }

    #[test]
    fn queries_with_canonical_form() {
        let resolver = Resolver::new(pfbs_registry());
        let records = resolver.resolve(&["375735", " 29420 43 3 "], false);

        assert_eq!(
            *resolver.client().calls.borrow(),
            ["375-73-5", "29420-43-3"]
        );
        assert!(records.iter().all(|r| r.systematic_name.is_some()));
    }

    #[test]
    fn joins_synonyms_when_requested() {
        let mut data = substance("Perfluorobutane sulfonic acid", "PFBS", "375-73-5");
        data.synonyms = Some(vec![
            Synonym {
                synonym_name: Some("PFBS".to_string()),
            },
            Synonym { synonym_name: None },
            Synonym {
                synonym_name: Some("Perfluorobutane sulfonate".to_string()),
            },
        ]);
        let resolver = Resolver::new(StubRegistry::default().with("375-73-5", data));

        let with = resolver.resolve(&["375-73-5"], true);
        assert_eq!(
            with[0].synonyms.as_deref(),
            Some("PFBS;Perfluorobutane sulfonate")
        );

        let without = resolver.resolve(&["375-73-5"], false);
        assert_eq!(without[0].synonyms, None);
    }

    #[test]
    fn empty_synonym_list_is_absent() {
        let mut data = substance("Formaldehyde", "Formaldehyde", "50-00-0");
        data.synonyms = Some(vec![Synonym { synonym_name: None }]);
        let resolver = Resolver::new(StubRegistry::default().with("50-00-0", data));

        assert_eq!(resolver.resolve(&["50-00-0"], true)[0].synonyms, None);
    }

    #[test]
    fn failed_lookups_keep_their_row() {
        let resolver = Resolver::new(pfbs_registry());
        let records = resolver.resolve(&["375-73-5", "64-17-5", "64-17-5"], false);

        // Unresolved records sort first (empty current CAS RN), duplicates are kept.
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].cas_rn, "64-17-5");
        assert_eq!(records[1].cas_rn, "64-17-5");
        assert_eq!(records[0].current_cas_number, None);
        assert_eq!(records[0].systematic_name, None);
        assert_eq!(records[2].cas_rn, "375-73-5");
        assert_eq!(resolver.client().calls.borrow().len(), 3);
    }

    #[test]
    fn falls_back_to_sanitized_key() {
        let resolver = Resolver::new(StubRegistry::default());
        let records = resolver.resolve(&["12 (bad)", "%%"], false);

        // "%%" sanitizes to nothing and is never sent.
        assert_eq!(*resolver.client().calls.borrow(), ["12bad"]);
        let keys: Vec<&str> = records.iter().map(|r| r.cas_rn.as_str()).collect();
        assert_eq!(keys, ["", "12bad"]);
    }

    #[test]
    fn result_order_ignores_input_order() {
        let resolver = Resolver::new(pfbs_registry());
        let forward = resolver.resolve(&["29420-43-3", "375-73-5", "50-00-0"], false);
        let backward = resolver.resolve(&["50-00-0", "375-73-5", "29420-43-3"], false);
        assert_eq!(forward, backward);
    }

    struct Recorder(Rc<RefCell<Vec<(usize, usize, String, bool)>>>);

    impl LookupObserver for Recorder {
        fn on_lookup(&self, event: &LookupEvent<'_>) {
            self.0.borrow_mut().push((
                event.index,
                event.total,
                event.key.to_string(),
                event.found,
            ));
        }
    }

    #[test]
    fn observer_sees_every_lookup_in_input_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let resolver =
            Resolver::new(pfbs_registry()).with_observer(Box::new(Recorder(seen.clone())));

        let records = resolver.resolve(&["375735", "nope-1"], false);

        assert_eq!(records.len(), 2);
        assert_eq!(
            *seen.borrow(),
            [
                (0, 2, "375-73-5".to_string(), true),
                (1, 2, "nope-1".to_string(), false),
            ]
        );
    }

    #[test]
    fn resolve_current_reports_supersession() {
        let resolver = Resolver::new(pfbs_registry());

        assert_eq!(
            resolver.resolve_current("29420433").unwrap(),
            Resolution::Superseded {
                queried: "29420-43-3".parse().unwrap(),
                current: "375-73-5".to_string(),
            }
        );
        assert_eq!(
            resolver.resolve_current("375-73-5").unwrap(),
            Resolution::Current("375-73-5".parse().unwrap())
        );
        assert_eq!(
            resolver.resolve_current("50-00-0").unwrap(),
            Resolution::NotFound("50-00-0".parse().unwrap())
        );
    }

    #[test]
    fn resolve_current_rejects_before_querying() {
        let resolver = Resolver::new(pfbs_registry());
        let err = resolver.resolve_current("12").unwrap_err();

        assert!(matches!(err, Error::InvalidCasRn { .. }));
        assert!(resolver.client().calls.borrow().is_empty());
    }
}
