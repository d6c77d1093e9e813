//! Property runners for the single-source traversal.
//!
//! For every start vertex of a generated graph, verifies:
//!
//! - **Oracle equivalence**: edges and finalize order match the linear-scan
//!   oracle exactly.
//! - **No fabricated edges**: every appended edge is an adjacency entry of
//!   its `from` vertex with the exact stored weight.
//! - **Finalize once**: each vertex is finalized at most once, and exactly
//!   the vertices reachable from the start are finalized.
//! - **Push discipline**: an edge's `from` vertex is already finalized and
//!   its `to` vertex is finalized later.

use std::collections::VecDeque;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::test_utils::GraphFixture;
use crate::{TraversalResult, WeightedGraph, build_from};

use super::oracle::linear_scan_traversal;

fn traverse(fixture: &GraphFixture, start: usize) -> Result<TraversalResult, TestCaseError> {
    build_from(&fixture.graph, start).map_err(|e| {
        TestCaseError::fail(format!(
            "build_from({start}) failed: {e} (shape={:?}, vertices={})",
            fixture.shape,
            fixture.graph.vertex_count(),
        ))
    })
}

/// Compares every traversal against the oracle.
pub(super) fn run_oracle_equivalence_property(fixture: &GraphFixture) -> TestCaseResult {
    for start in 0..fixture.graph.vertex_count() {
        let result = traverse(fixture, start)?;
        let oracle = linear_scan_traversal(&fixture.graph, start);

        let edges: Vec<_> = result
            .edges()
            .iter()
            .map(|edge| (edge.from(), edge.to(), edge.weight()))
            .collect();
        if edges != oracle.edges {
            return Err(TestCaseError::fail(format!(
                "start {start}: edge sequence differs from oracle \
                 (shape={:?}, got={edges:?}, oracle={:?})",
                fixture.shape, oracle.edges,
            )));
        }
        if result.finalized() != oracle.finalized.as_slice() {
            return Err(TestCaseError::fail(format!(
                "start {start}: finalize order differs from oracle \
                 (got={:?}, oracle={:?})",
                result.finalized(),
                oracle.finalized,
            )));
        }
    }
    Ok(())
}

/// Validates structural invariants of every traversal.
pub(super) fn run_structural_invariants_property(fixture: &GraphFixture) -> TestCaseResult {
    for start in 0..fixture.graph.vertex_count() {
        let result = traverse(fixture, start)?;
        validate_edges_exist(&fixture.graph, &result)?;
        validate_finalized_once(&fixture.graph, &result)?;
        validate_push_discipline(&result)?;
    }
    Ok(())
}

fn validate_edges_exist(graph: &WeightedGraph, result: &TraversalResult) -> TestCaseResult {
    for (i, edge) in result.edges().iter().enumerate() {
        let neighbors = graph
            .neighbors(edge.from())
            .map_err(|e| TestCaseError::fail(format!("edge {i}: {e}")))?;
        let present = neighbors
            .iter()
            .any(|n| n.vertex() == edge.to() && n.weight() == edge.weight());
        if !present {
            return Err(TestCaseError::fail(format!(
                "start {}: edge {i} ({}, {}, {}) is not stored in the graph",
                result.start(),
                edge.from(),
                edge.to(),
                edge.weight(),
            )));
        }
    }
    Ok(())
}

fn validate_finalized_once(graph: &WeightedGraph, result: &TraversalResult) -> TestCaseResult {
    let mut seen = vec![false; graph.vertex_count()];
    for &vertex in result.finalized() {
        if seen[vertex] {
            return Err(TestCaseError::fail(format!(
                "start {}: vertex {vertex} finalized twice",
                result.start(),
            )));
        }
        seen[vertex] = true;
    }

    let reachable = reachable_from(graph, result.start());
    if seen != reachable {
        return Err(TestCaseError::fail(format!(
            "start {}: finalized set differs from reachable set",
            result.start(),
        )));
    }
    if result.finalized().first() != Some(&result.start()) {
        return Err(TestCaseError::fail(format!(
            "start {}: traversal did not finalize its start first",
            result.start(),
        )));
    }
    Ok(())
}

fn validate_push_discipline(result: &TraversalResult) -> TestCaseResult {
    let position = |vertex: usize| result.finalized().iter().position(|&v| v == vertex);
    for (i, edge) in result.edges().iter().enumerate() {
        let (Some(from), Some(to)) = (position(edge.from()), position(edge.to())) else {
            return Err(TestCaseError::fail(format!(
                "start {}: edge {i} touches a vertex that was never finalized",
                result.start(),
            )));
        };
        if from >= to {
            return Err(TestCaseError::fail(format!(
                "start {}: edge {i} pushes vertex {} which was finalized first",
                result.start(),
                edge.to(),
            )));
        }
    }
    Ok(())
}

fn reachable_from(graph: &WeightedGraph, start: usize) -> Vec<bool> {
    let mut reachable = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::from([start]);
    reachable[start] = true;
    while let Some(u) = queue.pop_front() {
        for neighbor in graph.neighbors(u).expect("queued vertex exists") {
            if !reachable[neighbor.vertex()] {
                reachable[neighbor.vertex()] = true;
                queue.push_back(neighbor.vertex());
            }
        }
    }
    reachable
}
