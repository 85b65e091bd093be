// SPDX-License-Identifier: MIT OR Apache-2.0
//! Prism CLI - compile shader node graphs into GLSL fragment shaders.

mod commands;
mod config;
mod error;

use clap::{Parser, Subcommand};
use config::CliConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "prism")]
#[command(author, version, about = "Prism shader graph compiler", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./prism.ron when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a graph snapshot to a fragment shader
    Compile(commands::compile::CompileArgs),

    /// Recompile a graph snapshot whenever the file changes
    Watch(commands::watch::WatchArgs),

    /// List available node types
    Nodes(commands::nodes::NodesArgs),
}

fn init_tracing(config: &CliConfig) {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["prism_cli=info", "prism_graph=info"]
        .into_iter()
        .chain(config.log_directives())
    {
        match directive.parse() {
            Ok(directive) => env_filter = env_filter.add_directive(directive),
            Err(err) => eprintln!("Ignoring log directive '{directive}': {err}"),
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);
    tracing::debug!("Starting prism v{}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Compile(args) => commands::compile::run(args, &config),
        Commands::Watch(args) => commands::watch::run(args, &config),
        Commands::Nodes(args) => commands::nodes::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
