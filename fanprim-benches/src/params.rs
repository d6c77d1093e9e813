//! Benchmark parameter types.

use std::fmt;

/// Parameters for a fan-out benchmark run.
#[derive(Clone, Debug)]
pub struct FanoutBenchParams {
    /// Number of vertices in the generated graph.
    pub vertex_count: usize,
    /// Dedicated pool size, or `None` for the global pool.
    pub workers: Option<usize>,
}

impl fmt::Display for FanoutBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.workers {
            Some(workers) => write!(f, "n={},workers={workers}", self.vertex_count),
            None => write!(f, "n={},workers=global", self.vertex_count),
        }
    }
}
