// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recompile a snapshot file whenever it changes.
//!
//! File system events are debounced by the watcher, then each reload goes
//! through a [`CompileSession`] so bursts of saves coalesce into one compile.

use super::{load_snapshot, write_output};
use crate::config::CliConfig;
use crate::error::CliError;
use clap::Args;
use notify_debouncer_full::{
    new_debouncer,
    notify::{EventKind, RecursiveMode},
    DebounceEventResult,
};
use prism_graph::{CompileSession, NodeRegistry};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

#[derive(Args)]
pub struct WatchArgs {
    /// Graph snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Write the shader to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Quiet period before recompiling (milliseconds)
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,
}

/// Events forwarded from the watcher thread
#[derive(Debug)]
enum WatchEvent {
    /// The snapshot file was written or replaced
    Changed,
    /// The watcher reported an error
    Error(String),
}

pub fn run(args: WatchArgs, config: &CliConfig) -> Result<(), CliError> {
    let debounce = Duration::from_millis(args.debounce_ms.unwrap_or(config.debounce_ms));
    let output = args.output.or_else(|| config.output.clone());
    let target = args
        .snapshot
        .canonicalize()
        .map_err(|e| CliError::io(&args.snapshot, e))?;

    let mut session = CompileSession::with_debounce(NodeRegistry::builtin(), debounce);
    session.update(load_snapshot(&target)?, Instant::now());
    session.flush();
    report(&session, output.as_deref())?;

    let (event_tx, event_rx) = mpsc::channel();
    let file_name = target.file_name().map(ToOwned::to_owned);
    let mut watcher = new_debouncer(
        Duration::from_millis(config.watch_debounce_ms),
        None,
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                let touched = events.iter().any(|event| {
                    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
                        && event
                            .paths
                            .iter()
                            .any(|p| p.file_name() == file_name.as_deref())
                });
                if touched {
                    let _ = event_tx.send(WatchEvent::Changed);
                }
            }
            Err(errors) => {
                for error in errors {
                    let _ = event_tx.send(WatchEvent::Error(error.to_string()));
                }
            }
        },
    )?;

    // Watch the directory so editors that save by rename are still seen.
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    tracing::info!("Watching {} for changes", target.display());

    loop {
        let event = match session.deadline() {
            Some(deadline) => event_rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => event_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match event {
            Ok(WatchEvent::Changed) => match load_snapshot(&target) {
                Ok(snapshot) => session.update(snapshot, Instant::now()),
                Err(err) => tracing::warn!("Skipping reload: {err}"),
            },
            Ok(WatchEvent::Error(message)) => tracing::warn!("File watcher error: {message}"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("File watcher channel disconnected");
                break;
            }
        }

        if session.poll(Instant::now()) {
            report(&session, output.as_deref())?;
        }
    }

    Ok(())
}

/// Publish the outcome of the session's last compile
fn report(session: &CompileSession, output: Option<&Path>) -> Result<(), CliError> {
    if let Some(code) = session.code() {
        return write_output(output, code);
    }
    match (session.error(), session.error_node_id()) {
        (Some(error), Some(node)) => tracing::error!("Compile failed at node {node}: {error}"),
        (Some(error), None) => tracing::error!("Compile failed: {error}"),
        (None, _) => tracing::info!("Graph is empty, nothing to compile"),
    }
    Ok(())
}
