//! Single-source greedy tree growing (Prim's algorithm).
//!
//! The traversal records every edge at the moment its far endpoint is pushed
//! onto the candidate queue, not when that endpoint is finalized. A vertex
//! can therefore contribute several edges before it is finalized through
//! only one of them, and all of them are kept in the output. Callers that
//! fan this traversal out over every start vertex rely on that exact edge
//! sequence.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use tracing::instrument;

use crate::{
    error::GraphError,
    graph::{Weight, WeightedGraph},
};

/// A pending `(weight, vertex)` pair awaiting finalization.
///
/// Candidates order by weight, then by vertex index. `-0.0` and `0.0` are
/// the same weight and tie on vertex index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Candidate {
    weight: Weight,
    vertex: usize,
}

impl Candidate {
    pub(crate) fn new(weight: Weight, vertex: usize) -> Self {
        // `total_cmp` orders `-0.0` before `0.0`; fold the sign away.
        Self {
            weight: weight + 0.0,
            vertex,
        }
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An edge appended by a traversal, oriented from the finalized vertex to
/// the pushed neighbor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeEdge {
    from: usize,
    to: usize,
    weight: Weight,
}

impl TreeEdge {
    /// Creates an oriented edge.
    #[must_use]
    pub const fn new(from: usize, to: usize, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    /// Returns the finalized endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn from(&self) -> usize { self.from }

    /// Returns the pushed endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn to(&self) -> usize { self.to }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> Weight { self.weight }
}

/// Output of one single-source traversal.
#[derive(Clone, Debug, PartialEq)]
pub struct TraversalResult {
    start: usize,
    edges: Vec<TreeEdge>,
    finalized: Vec<usize>,
}

impl TraversalResult {
    /// Assembles a result from its parts.
    ///
    /// Useful for [`SourceTraversal`] implementations that do not run
    /// [`build_from`].
    #[must_use]
    pub const fn new(start: usize, edges: Vec<TreeEdge>, finalized: Vec<usize>) -> Self {
        Self {
            start,
            edges,
            finalized,
        }
    }

    /// Returns the start vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn start(&self) -> usize { self.start }

    /// Returns the appended edges in append order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[TreeEdge] { &self.edges }

    /// Returns vertices in the order they were finalized.
    #[must_use]
    #[rustfmt::skip]
    pub fn finalized(&self) -> &[usize] { &self.finalized }

    /// Consumes the result, returning its edges.
    #[must_use]
    pub fn into_edges(self) -> Vec<TreeEdge> {
        self.edges
    }
}

/// A traversal that can be fanned out over every start vertex.
///
/// Implementations must be deterministic for a given graph and start and
/// must not mutate shared state; the fan-out runs them concurrently.
pub trait SourceTraversal: Sync {
    /// Runs the traversal from `start`.
    ///
    /// # Errors
    /// Returns [`GraphError`] when the traversal cannot read the graph, for
    /// example when `start` is not a vertex.
    fn traverse(
        &self,
        graph: &WeightedGraph,
        start: usize,
    ) -> Result<TraversalResult, GraphError>;
}

/// [`SourceTraversal`] backed by [`build_from`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimTraversal;

impl SourceTraversal for PrimTraversal {
    fn traverse(
        &self,
        graph: &WeightedGraph,
        start: usize,
    ) -> Result<TraversalResult, GraphError> {
        build_from(graph, start)
    }
}

/// Grows a greedy tree from `start`, recording every pushed edge.
///
/// The queue starts with a zero-weight candidate for `start`. Each popped,
/// not-yet-visited vertex is finalized and every unvisited neighbor is
/// pushed, in adjacency order, while the edge to it is appended to the
/// output.
///
/// # Errors
/// Returns [`GraphError::VertexOutOfRange`] when `start` is not a vertex.
///
/// # Examples
/// ```
/// use fanprim_core::{TreeEdge, WeightedGraph, build_from};
///
/// let mut graph = WeightedGraph::new(3);
/// graph.add_edge(0, 1, 1.0)?;
/// graph.add_edge(0, 2, 4.0)?;
/// graph.add_edge(1, 2, 2.0)?;
///
/// let result = build_from(&graph, 0)?;
/// assert_eq!(
///     result.edges(),
///     &[
///         TreeEdge::new(0, 1, 1.0),
///         TreeEdge::new(0, 2, 4.0),
///         TreeEdge::new(1, 2, 2.0),
///     ]
/// );
/// assert_eq!(result.finalized(), &[0, 1, 2]);
/// # Ok::<(), fanprim_core::GraphError>(())
/// ```
#[instrument(
    name = "core.build_from",
    level = "debug",
    err(level = "debug"),
    skip(graph),
    fields(vertices = graph.vertex_count()),
)]
pub fn build_from(graph: &WeightedGraph, start: usize) -> Result<TraversalResult, GraphError> {
    graph.check_vertex(start)?;

    let mut visited = vec![false; graph.vertex_count()];
    let mut finalized = Vec::new();
    let mut edges = Vec::new();
    let mut queue = BinaryHeap::new();
    queue.push(Reverse(Candidate::new(0.0, start)));

    while let Some(Reverse(Candidate { vertex: u, .. })) = queue.pop() {
        if is_visited(&visited, u) {
            continue;
        }
        mark_visited(&mut visited, u)?;
        finalized.push(u);

        for neighbor in graph.neighbors(u)? {
            if is_visited(&visited, neighbor.vertex()) {
                continue;
            }
            queue.push(Reverse(Candidate::new(neighbor.weight(), neighbor.vertex())));
            edges.push(TreeEdge::new(u, neighbor.vertex(), neighbor.weight()));
        }
    }

    Ok(TraversalResult {
        start,
        edges,
        finalized,
    })
}

fn is_visited(visited: &[bool], vertex: usize) -> bool {
    visited.get(vertex).copied().unwrap_or(false)
}

fn mark_visited(visited: &mut [bool], vertex: usize) -> Result<(), GraphError> {
    let vertex_count = visited.len();
    let slot = visited
        .get_mut(vertex)
        .ok_or(GraphError::VertexOutOfRange {
            vertex,
            vertex_count,
        })?;
    *slot = true;
    Ok(())
}
