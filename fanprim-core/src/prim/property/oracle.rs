//! Linear-scan oracle for the single-source traversal.
//!
//! Keeps pending candidates in an unsorted vector and selects the minimum
//! `(weight, vertex)` pair by scanning, which makes the selection rule easy
//! to audit. Edges are recorded at push time, matching the traversal under
//! test.

use crate::WeightedGraph;

/// Oracle output: appended edges and the finalize order.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct OracleTraversal {
    /// Appended `(from, to, weight)` triples in append order.
    pub edges: Vec<(usize, usize, f64)>,
    /// Vertices in finalize order.
    pub finalized: Vec<usize>,
}

/// Runs the oracle traversal from `start`.
///
/// `start` must be a vertex of `graph`.
pub(super) fn linear_scan_traversal(graph: &WeightedGraph, start: usize) -> OracleTraversal {
    let mut visited = vec![false; graph.vertex_count()];
    let mut pending: Vec<(f64, usize)> = vec![(0.0, start)];
    let mut edges = Vec::new();
    let mut finalized = Vec::new();

    while let Some(position) = min_position(&pending) {
        let (_, u) = pending.swap_remove(position);
        if visited[u] {
            continue;
        }
        visited[u] = true;
        finalized.push(u);

        for neighbor in graph.neighbors(u).expect("finalized vertex exists") {
            if !visited[neighbor.vertex()] {
                pending.push((neighbor.weight(), neighbor.vertex()));
                edges.push((u, neighbor.vertex(), neighbor.weight()));
            }
        }
    }

    OracleTraversal { edges, finalized }
}

fn min_position(pending: &[(f64, usize)]) -> Option<usize> {
    pending
        .iter()
        .enumerate()
        .min_by(|(_, left), (_, right)| {
            (left.0 + 0.0)
                .total_cmp(&(right.0 + 0.0))
                .then_with(|| left.1.cmp(&right.1))
        })
        .map(|(position, _)| position)
}
