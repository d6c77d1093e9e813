//! Error types for the fanprim core library.
//!
//! Every public error enum carries a stable machine-readable code so callers
//! can log or match failures without depending on display strings.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while constructing or reading a [`crate::WeightedGraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The requested vertex count was negative.
    #[error("vertex count must be non-negative (got {got})")]
    InvalidVertexCount {
        /// The rejected vertex count.
        got: i64,
    },
    /// A vertex index fell outside `[0, vertex_count)`.
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending vertex index.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge weight was NaN or infinite.
    #[error("edge ({left}, {right}) has non-finite weight")]
    NonFiniteWeight {
        /// First endpoint as supplied by the caller.
        left: usize,
        /// Second endpoint as supplied by the caller.
        right: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The requested vertex count was negative.
        InvalidVertexCount => InvalidVertexCount { .. } => "GRAPH_INVALID_VERTEX_COUNT",
        /// A vertex index fell outside the graph.
        VertexOutOfRange => VertexOutOfRange { .. } => "GRAPH_VERTEX_OUT_OF_RANGE",
        /// An edge weight was NaN or infinite.
        NonFiniteWeight => NonFiniteWeight { .. } => "GRAPH_NON_FINITE_WEIGHT",
    }
}

/// Failure of a single traversal task dispatched by the fan-out.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TraversalError {
    /// The traversal returned a graph error.
    #[error("traversal from vertex {start} failed: {error}")]
    Graph {
        /// Start vertex of the failed traversal.
        start: usize,
        #[source]
        /// Error reported by the traversal.
        error: GraphError,
    },
    /// The worker running the traversal panicked.
    #[error("traversal from vertex {start} panicked: {message}")]
    Panicked {
        /// Start vertex of the failed traversal.
        start: usize,
        /// Panic payload rendered as text.
        message: Arc<str>,
    },
}

impl TraversalError {
    /// Returns the start vertex of the failed traversal.
    #[must_use]
    pub const fn start(&self) -> usize {
        match self {
            Self::Graph { start, .. } | Self::Panicked { start, .. } => *start,
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`TraversalError`] variants.
    enum TraversalErrorCode for TraversalError {
        /// The traversal returned a graph error.
        Graph => Graph { .. } => "TRAVERSAL_GRAPH",
        /// The worker running the traversal panicked.
        Panicked => Panicked { .. } => "TRAVERSAL_PANICKED",
    }
}

/// Error type produced when configuring or running [`crate::Fanout`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FanoutError {
    /// A dedicated worker pool must have at least one thread.
    #[error("worker_count must be at least 1 (got {got})")]
    InvalidWorkerCount {
        /// The rejected worker count.
        got: usize,
    },
    /// The dedicated worker pool could not be created.
    #[error("failed to build worker pool with {workers} threads: {message}")]
    PoolBuild {
        /// Requested number of worker threads.
        workers: usize,
        /// Error reported by the thread pool builder.
        message: Arc<str>,
    },
    /// One or more traversal tasks failed; no partial result is returned.
    #[error("{failed} of {total} traversals failed; first failure: {first}", first = first_failure(.failures))]
    AggregateFailure {
        /// Number of failed tasks.
        failed: usize,
        /// Number of dispatched tasks.
        total: usize,
        /// Every failure, ordered by start vertex.
        failures: Vec<TraversalError>,
    },
}

define_error_codes! {
    /// Stable codes describing [`FanoutError`] variants.
    enum FanoutErrorCode for FanoutError {
        /// A dedicated worker pool must have at least one thread.
        InvalidWorkerCount => InvalidWorkerCount { .. } => "FANOUT_INVALID_WORKER_COUNT",
        /// The dedicated worker pool could not be created.
        PoolBuild => PoolBuild { .. } => "FANOUT_POOL_BUILD",
        /// One or more traversal tasks failed.
        AggregateFailure => AggregateFailure { .. } => "FANOUT_AGGREGATE_FAILURE",
    }
}

fn first_failure(failures: &[TraversalError]) -> String {
    failures
        .first()
        .map_or_else(|| "none recorded".to_owned(), ToString::to_string)
}

impl FanoutError {
    /// Returns the per-task failures when the error is an aggregate failure.
    #[must_use]
    pub fn failures(&self) -> &[TraversalError] {
        match self {
            Self::AggregateFailure { failures, .. } => failures,
            _ => &[],
        }
    }
}
