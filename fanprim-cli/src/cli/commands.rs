//! Command implementations and argument parsing for the fanprim CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use fanprim_core::{
    FanoutBuilder, FanoutError, FanoutResult, GraphEdge, GraphError, WeightedGraph,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEMO_VERTICES: usize = 5;
const DEMO_EDGES: [(usize, usize, f64); 7] = [
    (0, 1, 2.0),
    (0, 3, 6.0),
    (1, 2, 3.0),
    (1, 3, 8.0),
    (1, 4, 5.0),
    (2, 4, 7.0),
    (3, 4, 9.0),
];

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "fanprim",
    about = "Grow a Prim tree from every vertex in parallel and merge the edges."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the fan-out over the built-in five-vertex graph.
    Demo(DemoCommand),
    /// Run the fan-out over a graph given on the command line.
    Run(RunCommand),
}

/// Options accepted by the `demo` command.
#[derive(Debug, Args, Clone, Default)]
pub struct DemoCommand {
    /// Size of a dedicated worker pool; the global pool is used when absent.
    #[arg(long)]
    pub workers: Option<usize>,
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Number of vertices, labelled `0..N`.
    #[arg(long, allow_negative_numbers = true)]
    pub vertices: i64,

    /// Undirected edge as `U:V:W`; repeat for more edges.
    #[arg(long = "edge", value_name = "U:V:W", value_parser = parse_edge_spec)]
    pub edges: Vec<GraphEdge>,

    /// Size of a dedicated worker pool; the global pool is used when absent.
    #[arg(long)]
    pub workers: Option<usize>,
}

/// Rejection of a malformed `--edge` argument.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EdgeSpecError {
    /// The argument did not have exactly three `:`-separated parts.
    #[error("expected `U:V:W`, got `{raw}`")]
    Shape {
        /// The rejected argument.
        raw: String,
    },
    /// An endpoint was not a non-negative integer.
    #[error("invalid vertex `{raw}`")]
    Vertex {
        /// The rejected endpoint.
        raw: String,
    },
    /// The weight was not a number.
    #[error("invalid weight `{raw}`")]
    Weight {
        /// The rejected weight.
        raw: String,
    },
}

/// Parses an edge argument of the form `U:V:W`.
///
/// Only the syntax is checked here; vertex ranges and weight finiteness are
/// validated when the edge is added to the graph.
///
/// # Errors
/// Returns [`EdgeSpecError`] when the argument is malformed.
///
/// # Examples
/// ```
/// use fanprim_cli::cli::parse_edge_spec;
///
/// let edge = parse_edge_spec("0:3:6.5")?;
/// assert_eq!((edge.left, edge.right, edge.weight), (0, 3, 6.5));
/// assert!(parse_edge_spec("0-3-6").is_err());
/// # Ok::<(), fanprim_cli::cli::EdgeSpecError>(())
/// ```
pub fn parse_edge_spec(raw: &str) -> Result<GraphEdge, EdgeSpecError> {
    let mut parts = raw.split(':');
    let (Some(u), Some(v), Some(w), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(EdgeSpecError::Shape {
            raw: raw.to_owned(),
        });
    };
    let vertex = |part: &str| {
        part.trim().parse::<usize>().map_err(|_| EdgeSpecError::Vertex {
            raw: part.to_owned(),
        })
    };
    let weight = w.trim().parse::<f64>().map_err(|_| EdgeSpecError::Weight {
        raw: w.to_owned(),
    })?;
    Ok(GraphEdge::new(vertex(u)?, vertex(v)?, weight))
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The graph could not be built from the supplied arguments.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The fan-out could not be configured or failed.
    #[error(transparent)]
    Fanout(#[from] FanoutError),
}

impl CliError {
    /// Returns the stable code of the wrapped library error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Graph(error) => error.code().as_str(),
            Self::Fanout(error) => error.code().as_str(),
        }
    }
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Fan-out output for the command's graph.
    pub result: FanoutResult,
}

/// Returns the built-in five-vertex graph used by `demo`.
///
/// # Errors
/// Never fails for the built-in edges; the `Result` mirrors
/// [`WeightedGraph::from_edges`].
pub fn demo_graph() -> Result<WeightedGraph, GraphError> {
    WeightedGraph::from_edges(
        DEMO_VERTICES,
        DEMO_EDGES.map(|(u, v, w)| GraphEdge::new(u, v, w)),
    )
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the graph is invalid or the fan-out fails.
///
/// # Examples
/// ```
/// use fanprim_cli::cli::{Cli, Command, DemoCommand, run_cli};
///
/// let summary = run_cli(Cli {
///     command: Command::Demo(DemoCommand { workers: Some(2) }),
/// })?;
/// assert_eq!(summary.result.flat_edges().len(), 35);
/// assert_eq!(summary.result.merged().len(), 7);
/// # Ok::<(), fanprim_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Demo(demo) => {
            span.record("command", field::display("demo"));
            execute(&demo_graph()?, demo.workers)
        }
        Command::Run(run) => {
            span.record("command", field::display("run"));
            let graph = build_graph(run.vertices, run.edges)?;
            execute(&graph, run.workers)
        }
    }
}

#[instrument(name = "cli.build_graph", err, skip(edges), fields(edges = edges.len()))]
pub(super) fn build_graph(vertices: i64, edges: Vec<GraphEdge>) -> Result<WeightedGraph, CliError> {
    let mut graph = WeightedGraph::create(vertices)?;
    for edge in edges {
        graph.add_edge(edge.left, edge.right, edge.weight)?;
    }
    Ok(graph)
}

#[instrument(
    name = "cli.execute",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub(super) fn execute(
    graph: &WeightedGraph,
    workers: Option<usize>,
) -> Result<ExecutionSummary, CliError> {
    let builder = match workers {
        Some(count) => FanoutBuilder::new().with_worker_count(count),
        None => FanoutBuilder::new(),
    };
    let result = builder.build()?.compute_all(graph)?;
    info!(
        flat_edges = result.flat_edges().len(),
        merged_edges = result.merged().len(),
        "command completed"
    );
    Ok(ExecutionSummary { result })
}

/// Renders `summary` to `writer` as tab-separated text.
///
/// Writes the vertex count, the flat edge list as `from\tto\tweight`, and the
/// merged set as `low\thigh\tweight\toccurrences` in first-insertion order.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use fanprim_cli::cli::{ExecutionSummary, render_summary};
/// use fanprim_core::{WeightedGraph, compute_all};
///
/// let mut graph = WeightedGraph::new(2);
/// graph.add_edge(0, 1, 1.5)?;
/// let summary = ExecutionSummary { result: compute_all(&graph)? };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "vertices: 2\nflat edges: 2\n0\t1\t1.5\n1\t0\t1.5\nmerged edges: 1\n0\t1\t1.5\t2\n"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let result = &summary.result;
    writeln!(writer, "vertices: {}", result.vertex_count())?;
    writeln!(writer, "flat edges: {}", result.flat_edges().len())?;
    for edge in result.flat_edges() {
        writeln!(writer, "{}\t{}\t{}", edge.from(), edge.to(), edge.weight())?;
    }
    writeln!(writer, "merged edges: {}", result.merged().len())?;
    for entry in result.merged() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            entry.key().low(),
            entry.key().high(),
            entry.weight(),
            entry.occurrences()
        )?;
    }
    Ok(())
}
