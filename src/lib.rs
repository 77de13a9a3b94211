#![doc = r#"
casquery — normalize CAS Registry Numbers and resolve them against the EPA
Substance Registry Services (SRS).

The crate turns messy, user-supplied CAS RN strings into canonical `A-BB-C`
form, looks each one up in the registry, and returns a sorted result set that
can be rendered as a table, JSON, XML or CSV. It powers the `casquery` CLI and
can be embedded in your own Rust applications.

Normalization
-------------
Normalization is purely syntactic: non-digits are dropped and the digits are
regrouped. It does not check that the number denotes a real substance.

```rust
use casquery::normalize;

assert_eq!(normalize("12 34 56 7").unwrap().as_str(), "1234-56-7");
assert!(normalize("123").is_none());
```

Resolving against the registry
------------------------------
```rust,no_run
use casquery::{api, OutputFormat, RegistryParams};

fn main() -> casquery::Result<()> {
    let resolver = api::http_resolver(RegistryParams::default())?;
    let json = api::search_to_bytes(&resolver, &["29420-43-3", "375-73-5"], false, OutputFormat::Json)?;
    println!("{}", String::from_utf8_lossy(&json));
    Ok(())
}
```

Custom registry clients
-----------------------
Any [`RegistryClient`] can back a [`Resolver`], which is handy for tests and
offline fixtures. Failed lookups still yield one record per identifier.

```rust
use casquery::{RegistryClient, Resolver, SubstanceData};

struct Fixture;

impl RegistryClient for Fixture {
    fn lookup(&self, identifier: &str) -> Option<SubstanceData> {
        (identifier == "375-73-5").then(|| SubstanceData {
            epa_name: Some("PFBS".to_string()),
            current_cas_number: Some("375-73-5".to_string()),
            ..Default::default()
        })
    }
}

let resolver = Resolver::new(Fixture);
let records = resolver.resolve(&["375735", "not a cas"], false);
assert_eq!(records.len(), 2);
assert_eq!(records[1].epa_name.as_deref(), Some("PFBS"));
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use casquery::{api, RegistryParams};

fn main() -> casquery::Result<()> {
    let resolver = api::http_resolver(RegistryParams::default())?;
    let report = api::process_batch_file(
        &resolver,
        Path::new("samples.csv"),
        "cas_rn",
        Path::new("samples_resolved.csv"),
    )?;
    println!("rows={} distinct={} resolved={}", report.rows, report.distinct, report.resolved);
    Ok(())
}
```

Error handling
--------------
Per-identifier failures (bad input, HTTP errors, timeouts) never surface as
errors; they produce incomplete records. Operation-level problems such as a
missing batch column return `casquery::Error`.

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`](crate::core) — normalization, resolution pipeline and batch aggregation.
- [`io`] — registry client, CSV tables and output writers.
- [`types`] — shared record and format types.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::normalize::{CasRn, normalize, sanitize_identifier};
pub use crate::core::params::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, RegistryParams};
pub use crate::core::pipeline::{LookupEvent, LookupObserver, Resolution, Resolver, sort_records};
pub use crate::error::{Error, Result};
pub use crate::types::{BatchRow, Column, OutputFormat, SubstanceRecord};

pub use crate::io::batch_table::BatchTable;
pub use crate::io::registry::{HttpRegistryClient, RegistryClient, RegistryError, SubstanceData, Synonym};
pub use crate::io::writers::{Render, write_csv_file};

pub use crate::api::{BatchReport, http_resolver, process_batch_file, search_to_bytes};
