//! Property runners for the parallel fan-out.
//!
//! For a generated graph, verifies:
//!
//! - **Scheduling independence**: with random per-task delays on a
//!   multi-threaded pool, the flat list equals the sequential concatenation
//!   of every single-source traversal in vertex order.
//! - **Merge contract**: the merged set holds at most one entry per
//!   distinct input pair, each entry carries the weight of the pair's last
//!   occurrence in the flat list, and occurrence counts sum to the flat
//!   list length.
//! - **Repeatability**: two runs over the same graph agree exactly.

use std::{collections::HashSet, thread, time::Duration};

use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    EdgeKey, FanoutBuilder, FanoutResult, GraphError, SourceTraversal, TraversalResult,
    WeightedGraph, build_from, compute_all, test_utils::GraphFixture,
};

/// Sleeps for a seeded random interval before delegating to [`build_from`].
///
/// Each start vertex derives its own RNG from `seed`, so the traversal needs
/// no shared mutable state across workers.
#[derive(Clone, Copy, Debug)]
pub(super) struct JitteredTraversal {
    pub(super) seed: u64,
    pub(super) max_delay_micros: u64,
}

impl SourceTraversal for JitteredTraversal {
    fn traverse(
        &self,
        graph: &WeightedGraph,
        start: usize,
    ) -> Result<TraversalResult, GraphError> {
        let mut rng = SmallRng::seed_from_u64(self.seed ^ start as u64);
        let delay = rng.gen_range(0..=self.max_delay_micros);
        thread::sleep(Duration::from_micros(delay));
        build_from(graph, start)
    }
}

fn fanout_failed(fixture: &GraphFixture, error: impl std::fmt::Display) -> TestCaseError {
    TestCaseError::fail(format!(
        "fan-out failed: {error} (shape={:?}, vertices={})",
        fixture.shape,
        fixture.graph.vertex_count(),
    ))
}

/// Runs a jittered fan-out and compares it with the sequential result.
pub(super) fn run_scheduling_independence_property(
    fixture: &GraphFixture,
    seed: u64,
    workers: usize,
) -> TestCaseResult {
    let fanout = FanoutBuilder::new()
        .with_worker_count(workers)
        .build()
        .map_err(|e| fanout_failed(fixture, e))?;
    let traversal = JitteredTraversal {
        seed,
        max_delay_micros: 200,
    };
    let result = fanout
        .compute_all_with(&fixture.graph, &traversal)
        .map_err(|e| fanout_failed(fixture, e))?;

    let mut expected = Vec::new();
    for start in 0..fixture.graph.vertex_count() {
        let single = build_from(&fixture.graph, start).map_err(|e| fanout_failed(fixture, e))?;
        expected.extend_from_slice(single.edges());
    }
    if result.flat_edges() != expected.as_slice() {
        return Err(TestCaseError::fail(format!(
            "flat list depends on scheduling (shape={:?}, seed={seed}, workers={workers})",
            fixture.shape,
        )));
    }

    let out_of_order = result
        .traversals()
        .iter()
        .enumerate()
        .find(|(index, traversal)| traversal.start() != *index);
    if let Some((index, traversal)) = out_of_order {
        return Err(TestCaseError::fail(format!(
            "traversal slot {index} holds start {}",
            traversal.start(),
        )));
    }
    Ok(())
}

/// Checks the merged set against the flat list and the input graph.
pub(super) fn run_merge_contract_property(fixture: &GraphFixture) -> TestCaseResult {
    let result = compute_all(&fixture.graph).map_err(|e| fanout_failed(fixture, e))?;
    validate_merge_bounds(fixture, &result)?;
    validate_last_write_wins(&result)?;
    Ok(())
}

fn validate_merge_bounds(fixture: &GraphFixture, result: &FanoutResult) -> TestCaseResult {
    let input_pairs: HashSet<EdgeKey> = fixture
        .graph
        .edges()
        .map(|edge| EdgeKey::new(edge.left, edge.right))
        .collect();
    if result.merged().len() > input_pairs.len() {
        return Err(TestCaseError::fail(format!(
            "merged set has {} entries but the graph has {} distinct pairs",
            result.merged().len(),
            input_pairs.len(),
        )));
    }
    if let Some(entry) = result
        .merged()
        .iter()
        .find(|entry| !input_pairs.contains(&entry.key()))
    {
        return Err(TestCaseError::fail(format!(
            "merged pair {:?} is not an input edge",
            entry.key(),
        )));
    }

    let total: usize = result.merged().iter().map(|entry| entry.occurrences()).sum();
    if total != result.flat_edges().len() {
        return Err(TestCaseError::fail(format!(
            "occurrences sum to {total} but the flat list has {} edges",
            result.flat_edges().len(),
        )));
    }
    Ok(())
}

fn validate_last_write_wins(result: &FanoutResult) -> TestCaseResult {
    for entry in result.merged() {
        let last = result
            .flat_edges()
            .iter()
            .rev()
            .find(|edge| EdgeKey::new(edge.from(), edge.to()) == entry.key());
        match last {
            Some(edge) if edge.weight() == entry.weight() => {}
            Some(edge) => {
                return Err(TestCaseError::fail(format!(
                    "pair {:?} stores {} but its last occurrence carries {}",
                    entry.key(),
                    entry.weight(),
                    edge.weight(),
                )));
            }
            None => {
                return Err(TestCaseError::fail(format!(
                    "pair {:?} never occurs in the flat list",
                    entry.key(),
                )));
            }
        }
    }
    Ok(())
}

/// Runs the default fan-out twice and requires identical output.
pub(super) fn run_repeatability_property(fixture: &GraphFixture) -> TestCaseResult {
    let first = compute_all(&fixture.graph).map_err(|e| fanout_failed(fixture, e))?;
    let second = compute_all(&fixture.graph).map_err(|e| fanout_failed(fixture, e))?;
    if first != second {
        return Err(TestCaseError::fail(format!(
            "repeated fan-out differs (shape={:?})",
            fixture.shape,
        )));
    }
    Ok(())
}
