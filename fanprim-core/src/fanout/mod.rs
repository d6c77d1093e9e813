//! Parallel fan-out of single-source traversals.
//!
//! One traversal task is dispatched per vertex onto a Rayon pool. Rayon's
//! indexed collection returns results in vertex order no matter which task
//! finishes first, so the flat edge list and the merged set never depend on
//! scheduling. Any failed task aborts the whole batch.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use rayon::{ThreadPool, prelude::*};
use tracing::{info, instrument, warn};

use crate::{
    error::{FanoutError, TraversalError},
    graph::WeightedGraph,
    merge::MergedEdgeSet,
    prim::{PrimTraversal, SourceTraversal, TraversalResult, TreeEdge},
};

/// Pool on which traversal tasks run.
#[derive(Clone, Debug, Default)]
pub(crate) enum WorkerPool {
    /// Rayon's process-wide pool.
    #[default]
    Global,
    /// A pool owned by this fan-out.
    Dedicated {
        pool: Arc<ThreadPool>,
        workers: usize,
    },
}

/// Runs a traversal from every vertex and merges the results.
///
/// Construct with [`crate::FanoutBuilder`] or use [`Fanout::default`] for the
/// global pool.
///
/// # Examples
/// ```
/// use fanprim_core::{EdgeKey, Fanout, WeightedGraph};
///
/// let mut graph = WeightedGraph::new(3);
/// graph.add_edge(0, 1, 1.0)?;
/// graph.add_edge(1, 2, 2.0)?;
///
/// let result = Fanout::default().compute_all(&graph)?;
/// assert_eq!(result.traversals().len(), 3);
/// assert_eq!(result.flat_edges().len(), 6);
/// assert_eq!(result.merged().len(), 2);
/// assert_eq!(result.merged().weight(EdgeKey::new(2, 1)), Some(2.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Fanout {
    pool: WorkerPool,
}

impl Fanout {
    pub(crate) fn new(pool: WorkerPool) -> Self {
        Self { pool }
    }

    /// Returns the size of the dedicated pool, or `None` for the global pool.
    #[must_use]
    pub fn worker_count(&self) -> Option<usize> {
        match &self.pool {
            WorkerPool::Global => None,
            WorkerPool::Dedicated { workers, .. } => Some(*workers),
        }
    }

    /// Runs [`PrimTraversal`] from every vertex of `graph`.
    ///
    /// # Errors
    /// Returns [`FanoutError::AggregateFailure`] when any task fails.
    pub fn compute_all(&self, graph: &WeightedGraph) -> Result<FanoutResult, FanoutError> {
        self.compute_all_with(graph, &PrimTraversal)
    }

    /// Runs `traversal` from every vertex of `graph`.
    ///
    /// Tasks that return an error or panic are reported together, in vertex
    /// order, and no partial result is produced.
    ///
    /// # Errors
    /// Returns [`FanoutError::AggregateFailure`] when any task fails.
    #[instrument(
        name = "core.compute_all",
        err,
        skip(self, graph, traversal),
        fields(vertices = graph.vertex_count(), workers = ?self.worker_count()),
    )]
    pub fn compute_all_with<T: SourceTraversal>(
        &self,
        graph: &WeightedGraph,
        traversal: &T,
    ) -> Result<FanoutResult, FanoutError> {
        let outcomes = match &self.pool {
            WorkerPool::Global => dispatch(graph, traversal),
            WorkerPool::Dedicated { pool, .. } => pool.install(|| dispatch(graph, traversal)),
        };
        let result = collect_outcomes(graph.vertex_count(), outcomes)?;
        info!(
            flat_edges = result.flat_edges().len(),
            merged_edges = result.merged().len(),
            "fan-out completed"
        );
        Ok(result)
    }
}

/// Runs [`PrimTraversal`] from every vertex on the global pool.
///
/// # Errors
/// Returns [`FanoutError::AggregateFailure`] when any task fails.
///
/// # Examples
/// ```
/// use fanprim_core::{WeightedGraph, compute_all};
///
/// let result = compute_all(&WeightedGraph::new(0))?;
/// assert!(result.flat_edges().is_empty());
/// assert!(result.merged().is_empty());
/// # Ok::<(), fanprim_core::FanoutError>(())
/// ```
pub fn compute_all(graph: &WeightedGraph) -> Result<FanoutResult, FanoutError> {
    Fanout::default().compute_all(graph)
}

/// Combined output of a fan-out.
#[derive(Clone, Debug, PartialEq)]
pub struct FanoutResult {
    vertex_count: usize,
    traversals: Vec<TraversalResult>,
    flat_edges: Vec<TreeEdge>,
    merged: MergedEdgeSet,
}

impl FanoutResult {
    fn from_traversals(vertex_count: usize, traversals: Vec<TraversalResult>) -> Self {
        let flat_edges: Vec<TreeEdge> = traversals
            .iter()
            .flat_map(|traversal| traversal.edges().iter().copied())
            .collect();
        let merged = MergedEdgeSet::from_edges(&flat_edges);
        Self {
            vertex_count,
            traversals,
            flat_edges,
            merged,
        }
    }

    /// Returns the vertex count of the input graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns every traversal, ordered by start vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn traversals(&self) -> &[TraversalResult] { &self.traversals }

    /// Returns the concatenation of all traversal edges in vertex order.
    #[must_use]
    #[rustfmt::skip]
    pub fn flat_edges(&self) -> &[TreeEdge] { &self.flat_edges }

    /// Returns the merged edge set.
    #[must_use]
    #[rustfmt::skip]
    pub fn merged(&self) -> &MergedEdgeSet { &self.merged }

    /// Consumes the result, returning the flat edge list and merged set.
    #[must_use]
    pub fn into_parts(self) -> (Vec<TreeEdge>, MergedEdgeSet) {
        (self.flat_edges, self.merged)
    }
}

fn dispatch<T: SourceTraversal>(
    graph: &WeightedGraph,
    traversal: &T,
) -> Vec<Result<TraversalResult, TraversalError>> {
    (0..graph.vertex_count())
        .into_par_iter()
        .map(|start| run_task(graph, traversal, start))
        .collect()
}

fn run_task<T: SourceTraversal>(
    graph: &WeightedGraph,
    traversal: &T,
    start: usize,
) -> Result<TraversalResult, TraversalError> {
    // The graph is only read, so a panicking task cannot leave it torn.
    match panic::catch_unwind(AssertUnwindSafe(|| traversal.traverse(graph, start))) {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(error)) => Err(TraversalError::Graph { start, error }),
        Err(payload) => Err(TraversalError::Panicked {
            start,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> Arc<str> {
    if let Some(message) = payload.downcast_ref::<&str>() {
        Arc::from(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        Arc::from(message.as_str())
    } else {
        Arc::from("non-string panic payload")
    }
}

fn collect_outcomes(
    vertex_count: usize,
    outcomes: Vec<Result<TraversalResult, TraversalError>>,
) -> Result<FanoutResult, FanoutError> {
    let total = outcomes.len();
    let mut traversals = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(traversal) => traversals.push(traversal),
            Err(error) => {
                warn!(
                    start = error.start(),
                    code = %error.code(),
                    error = %error,
                    "traversal task failed"
                );
                failures.push(error);
            }
        }
    }

    if !failures.is_empty() {
        return Err(FanoutError::AggregateFailure {
            failed: failures.len(),
            total,
            failures,
        });
    }
    Ok(FanoutResult::from_traversals(vertex_count, traversals))
}

#[cfg(test)]
mod property;
