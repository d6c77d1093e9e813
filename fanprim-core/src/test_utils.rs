//! Shared test utilities for `fanprim-core`.
//!
//! Hosts the proptest configuration used by every property suite and the
//! seeded graph generators those suites draw fixtures from.

use fanprim_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::WeightedGraph;

/// Minimum vertex count for generated graphs.
const MIN_VERTICES: usize = 1;
/// Maximum vertex count for generated graphs.
const MAX_VERTICES: usize = 24;

/// Builds a standard proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Topology family used when generating a fixture graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GraphShape {
    /// Random edges with distinct-ish continuous weights.
    Unique,
    /// Random edges drawn from a tiny weight alphabet, stressing tie-breaks.
    ManyIdentical,
    /// Near-complete graph.
    Dense,
    /// Several components with no cross-component edges.
    Disconnected,
    /// Parallel edges and self-loops mixed into a random graph.
    Multigraph,
}

/// A generated graph together with the parameters that produced it.
#[derive(Clone, Debug)]
pub(crate) struct GraphFixture {
    /// The generated graph.
    pub graph: WeightedGraph,
    /// Topology family used during generation.
    pub shape: GraphShape,
}

/// Generates fixtures across every [`GraphShape`].
pub(crate) fn graph_fixture_strategy() -> impl Strategy<Value = GraphFixture> {
    (
        prop_oneof![
            Just(GraphShape::Unique),
            Just(GraphShape::ManyIdentical),
            Just(GraphShape::Dense),
            Just(GraphShape::Disconnected),
            Just(GraphShape::Multigraph),
        ],
        any::<u64>(),
    )
        .prop_map(|(shape, seed)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            generate_fixture(shape, &mut rng)
        })
}

/// Generates a fixture for an explicitly chosen shape.
pub(crate) fn generate_fixture(shape: GraphShape, rng: &mut SmallRng) -> GraphFixture {
    let vertex_count = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
    let mut graph = WeightedGraph::new(vertex_count);

    match shape {
        GraphShape::Unique => {
            random_pairs(&mut graph, rng, 0.3, |r| r.gen_range(0.1..100.0));
        }
        GraphShape::ManyIdentical => {
            random_pairs(&mut graph, rng, 0.4, |r| f64::from(r.gen_range(1_u8..=3)));
        }
        GraphShape::Dense => {
            random_pairs(&mut graph, rng, 0.9, |r| r.gen_range(0.1..10.0));
        }
        GraphShape::Disconnected => {
            let split = rng.gen_range(0..=vertex_count);
            add_component(&mut graph, rng, 0, split);
            add_component(&mut graph, rng, split, vertex_count);
        }
        GraphShape::Multigraph => {
            random_pairs(&mut graph, rng, 0.3, |r| f64::from(r.gen_range(1_u8..=5)));
            for _ in 0..vertex_count {
                let u = rng.gen_range(0..vertex_count);
                let v = rng.gen_range(0..vertex_count);
                let weight = f64::from(rng.gen_range(1_u8..=5));
                insert(&mut graph, u, v, weight);
            }
        }
    }

    GraphFixture { graph, shape }
}

fn random_pairs(
    graph: &mut WeightedGraph,
    rng: &mut SmallRng,
    probability: f64,
    mut weight: impl FnMut(&mut SmallRng) -> f64,
) {
    let vertex_count = graph.vertex_count();
    for u in 0..vertex_count {
        for v in (u + 1)..vertex_count {
            if rng.gen_bool(probability) {
                let w = weight(rng);
                // Randomise orientation so adjacency order varies.
                if rng.gen_bool(0.5) {
                    insert(graph, u, v, w);
                } else {
                    insert(graph, v, u, w);
                }
            }
        }
    }
}

fn add_component(graph: &mut WeightedGraph, rng: &mut SmallRng, begin: usize, end: usize) {
    for u in begin..end {
        for v in (u + 1)..end {
            if rng.gen_bool(0.5) {
                let weight = rng.gen_range(0.5..20.0);
                insert(graph, u, v, weight);
            }
        }
    }
}

fn insert(graph: &mut WeightedGraph, u: usize, v: usize, weight: f64) {
    graph
        .add_edge(u, v, weight)
        .expect("generated endpoints and weights are valid");
}
