//! Seeded random graph generation for benchmarks.

use fanprim_core::WeightedGraph;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Shape of a generated benchmark graph.
#[derive(Clone, Copy, Debug)]
pub struct RandomGraphConfig {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Edges added per vertex, each to a uniformly chosen other vertex.
    pub edges_per_vertex: usize,
    /// Seed for the deterministic RNG.
    pub seed: u64,
}

/// Generates a connected graph with random extra edges.
///
/// A path `0 - 1 - ... - n-1` guarantees connectivity so every traversal
/// finalizes all vertices; `edges_per_vertex` random edges per vertex are
/// layered on top with weights in `[1, 100)`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `vertex_count` is zero, and
/// propagates graph insertion failures.
///
/// # Examples
/// ```
/// use fanprim_benches::source::{RandomGraphConfig, generate_graph};
///
/// let graph = generate_graph(&RandomGraphConfig {
///     vertex_count: 10,
///     edges_per_vertex: 2,
///     seed: 7,
/// })?;
/// assert_eq!(graph.vertex_count(), 10);
/// assert_eq!(graph.edge_count(), 9 + 20);
/// # Ok::<(), fanprim_benches::error::BenchSetupError>(())
/// ```
pub fn generate_graph(config: &RandomGraphConfig) -> Result<WeightedGraph, BenchSetupError> {
    if config.vertex_count == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "vertex_count",
        });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut graph = WeightedGraph::new(config.vertex_count);
    for u in 1..config.vertex_count {
        graph.add_edge(u - 1, u, random_weight(&mut rng))?;
    }
    for u in 0..config.vertex_count {
        for _ in 0..config.edges_per_vertex {
            let v = rng.gen_range(0..config.vertex_count);
            graph.add_edge(u, v, random_weight(&mut rng))?;
        }
    }
    Ok(graph)
}

fn random_weight(rng: &mut SmallRng) -> f64 {
    rng.gen_range(1.0..100.0)
}
