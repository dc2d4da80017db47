//! Employee table input and normalization.

mod normalizer;
mod table;

pub use normalizer::{NormalizedBatch, Normalizer};
pub use table::RawTable;
