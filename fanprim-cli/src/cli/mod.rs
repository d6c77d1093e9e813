//! Command-line interface orchestration for the fanprim fan-out.
//!
//! `demo` runs the fan-out over a fixed five-vertex graph; `run` builds a
//! graph from `--edge U:V:W` arguments.

mod commands;

pub use commands::{
    Cli, CliError, Command, DemoCommand, EdgeSpecError, ExecutionSummary, RunCommand,
    demo_graph, parse_edge_spec, render_summary, run_cli,
};
