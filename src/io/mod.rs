//! I/O layer: the registry HTTP client, CSV batch tables, and the
//! result-set `writers` for table/JSON/XML/CSV output.
pub mod registry;
pub use registry::{HttpRegistryClient, RegistryClient, RegistryError, SubstanceData, Synonym};

pub mod batch_table;
pub use batch_table::BatchTable;

pub mod writers;
