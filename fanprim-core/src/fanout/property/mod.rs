//! Property-based tests for the parallel fan-out.
//!
//! Validates that fan-out output is independent of scheduling and that the
//! merged set obeys the last-write-wins contract over generated graphs.

mod runners;
