//! Adjacency-list storage for undirected weighted graphs.
//!
//! Edges are stored symmetrically: inserting `(u, v, w)` appends `(v, w)` to
//! the adjacency list of `u` and `(u, w)` to the adjacency list of `v`.
//! Insertion order is preserved per vertex because traversals break ties in
//! adjacency order.

use crate::error::GraphError;

/// Edge weight type shared by every component of the crate.
///
/// Weights are finite and compared with [`f64::total_cmp`].
pub type Weight = f64;

/// One entry in a vertex's adjacency list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    vertex: usize,
    weight: Weight,
}

impl Neighbor {
    /// Returns the adjacent vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex(&self) -> usize { self.vertex }

    /// Returns the weight of the connecting edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> Weight { self.weight }
}

/// An undirected edge as supplied to [`WeightedGraph::add_edge`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphEdge {
    /// First endpoint.
    pub left: usize,
    /// Second endpoint.
    pub right: usize,
    /// Edge weight.
    pub weight: Weight,
}

impl GraphEdge {
    /// Creates an edge description.
    #[must_use]
    pub const fn new(left: usize, right: usize, weight: Weight) -> Self {
        Self {
            left,
            right,
            weight,
        }
    }
}

/// Undirected weighted graph with a fixed vertex count.
///
/// The graph is mutated only through [`Self::add_edge`]. Traversals borrow it
/// immutably, so it cannot change while any traversal is running.
///
/// # Examples
/// ```
/// use fanprim_core::WeightedGraph;
///
/// let mut graph = WeightedGraph::new(3);
/// graph.add_edge(0, 1, 2.0)?;
/// graph.add_edge(1, 2, 4.5)?;
///
/// let around_one: Vec<_> = graph.neighbors(1)?.iter().map(|n| n.vertex()).collect();
/// assert_eq!(around_one, vec![0, 2]);
/// # Ok::<(), fanprim_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightedGraph {
    adjacency: Vec<Vec<Neighbor>>,
    edges: Vec<GraphEdge>,
}

impl WeightedGraph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edges: Vec::new(),
        }
    }

    /// Creates a graph from a signed vertex count.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidVertexCount`] when `vertex_count` is
    /// negative or does not fit in `usize`.
    ///
    /// # Examples
    /// ```
    /// use fanprim_core::{GraphError, WeightedGraph};
    ///
    /// assert_eq!(WeightedGraph::create(0)?.vertex_count(), 0);
    /// assert_eq!(
    ///     WeightedGraph::create(-1),
    ///     Err(GraphError::InvalidVertexCount { got: -1 })
    /// );
    /// # Ok::<(), GraphError>(())
    /// ```
    pub fn create(vertex_count: i64) -> Result<Self, GraphError> {
        let count = usize::try_from(vertex_count)
            .map_err(|_| GraphError::InvalidVertexCount { got: vertex_count })?;
        Ok(Self::new(count))
    }

    /// Builds a graph by inserting `edges` in order.
    ///
    /// # Errors
    /// Returns the first error reported by [`Self::add_edge`].
    pub fn from_edges(
        vertex_count: usize,
        edges: impl IntoIterator<Item = GraphEdge>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new(vertex_count);
        for edge in edges {
            graph.add_edge(edge.left, edge.right, edge.weight)?;
        }
        Ok(graph)
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of successful [`Self::add_edge`] calls.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterates over inserted edges in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &GraphEdge> + '_ {
        self.edges.iter()
    }

    /// Inserts the undirected edge `(u, v)` with `weight`.
    ///
    /// Self-loops and parallel edges are accepted and stored verbatim. A
    /// failed call leaves the graph unchanged.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] when either endpoint is not a
    /// vertex of the graph and [`GraphError::NonFiniteWeight`] when `weight`
    /// is NaN or infinite.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: Weight) -> Result<(), GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if !weight.is_finite() {
            return Err(GraphError::NonFiniteWeight { left: u, right: v });
        }

        self.list_mut(u)?.push(Neighbor { vertex: v, weight });
        self.list_mut(v)?.push(Neighbor { vertex: u, weight });
        self.edges.push(GraphEdge::new(u, v, weight));
        Ok(())
    }

    /// Returns the adjacency list of `u` in insertion order.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] when `u` is not a vertex.
    pub fn neighbors(&self, u: usize) -> Result<&[Neighbor], GraphError> {
        self.adjacency
            .get(u)
            .map(Vec::as_slice)
            .ok_or(GraphError::VertexOutOfRange {
                vertex: u,
                vertex_count: self.vertex_count(),
            })
    }

    /// Checks that `vertex` lies in `[0, vertex_count)`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] otherwise.
    pub fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    fn list_mut(&mut self, u: usize) -> Result<&mut Vec<Neighbor>, GraphError> {
        let vertex_count = self.vertex_count();
        self.adjacency
            .get_mut(u)
            .ok_or(GraphError::VertexOutOfRange {
                vertex: u,
                vertex_count,
            })
    }
}
