// SPDX-License-Identifier: MIT OR Apache-2.0
//! One-shot compile of a graph snapshot.

use super::{load_snapshot, write_output};
use crate::config::CliConfig;
use crate::error::CliError;
use clap::Args;
use prism_graph::{CompiledResult, NodeRegistry};
use std::path::PathBuf;

#[derive(Args)]
pub struct CompileArgs {
    /// Graph snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Write the shader to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the full compile result as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CompileArgs, config: &CliConfig) -> Result<(), CliError> {
    let snapshot = load_snapshot(&args.snapshot)?;
    tracing::debug!(
        "Loaded {} nodes and {} edges from {}",
        snapshot.nodes.len(),
        snapshot.edges.len(),
        args.snapshot.display()
    );

    let result = snapshot.compile(&NodeRegistry::builtin());
    let output = args.output.or_else(|| config.output.clone());

    if args.json {
        let json = serde_json::to_string_pretty(&result)?;
        println!("{json}");
        if let (Some(path), Some(code)) = (output.as_deref(), result.code.as_deref()) {
            write_output(Some(path), code)?;
        }
        return into_outcome(result).map(drop);
    }

    let code = into_outcome(result)?;
    write_output(output.as_deref(), &code)
}

/// Shader text on success, the compile error otherwise
fn into_outcome(result: CompiledResult) -> Result<String, CliError> {
    match result.code {
        Some(code) if result.success => Ok(code),
        _ => Err(CliError::Compile {
            message: result.error.unwrap_or_default(),
            node: result.error_node_id,
        }),
    }
}
