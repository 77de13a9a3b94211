//! Core building blocks: CAS RN normalization, registry parameters, the
//! resolution pipeline and the batch aggregator. The high-level `api` module
//! wires these to files and HTTP.
pub mod batch;
pub mod normalize;
pub mod params;
pub mod pipeline;
