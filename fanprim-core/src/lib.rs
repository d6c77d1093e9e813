//! fanprim core library.
//!
//! Grows a Prim-style greedy tree from every vertex of a weighted undirected
//! graph in parallel and merges every explored edge into one edge set.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod fanout;
mod graph;
mod merge;
mod prim;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::FanoutBuilder,
    error::{
        FanoutError, FanoutErrorCode, GraphError, GraphErrorCode, TraversalError,
        TraversalErrorCode,
    },
    fanout::{Fanout, FanoutResult, compute_all},
    graph::{GraphEdge, Neighbor, Weight, WeightedGraph},
    merge::{EdgeKey, MergedEdge, MergedEdgeSet},
    prim::{PrimTraversal, SourceTraversal, TraversalResult, TreeEdge, build_from},
};
