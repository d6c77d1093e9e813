//! Benchmark support crate for fanprim.
//!
//! Provides seeded random graphs and parameter types used by the Criterion
//! benchmarks of the single-source traversal and the parallel fan-out.

pub mod error;
pub mod params;
pub mod source;
