// SPDX-License-Identifier: MIT OR Apache-2.0
//! Debounced recompilation of a changing graph.
//!
//! The session never reads the clock itself. Callers pass `now` to
//! [`CompileSession::update`] and [`CompileSession::poll`], so an editor loop,
//! a file watcher and a test can all drive it the same way.

use crate::codegen::CodeGenerator;
use crate::graph::GraphSnapshot;
use crate::node::{NodeId, NodeRegistry};
use std::time::{Duration, Instant};

/// Default quiet period before a recompile
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Holds the latest snapshot and the outcome of its last compile
#[derive(Debug)]
pub struct CompileSession {
    registry: NodeRegistry,
    debounce: Duration,
    snapshot: GraphSnapshot,
    deadline: Option<Instant>,
    code: Option<String>,
    error: Option<String>,
    error_node_id: Option<NodeId>,
    compiles: usize,
}

impl CompileSession {
    /// Create a session with the default debounce
    pub fn new(registry: NodeRegistry) -> Self {
        Self::with_debounce(registry, DEFAULT_DEBOUNCE)
    }

    /// Create a session with a custom debounce
    pub fn with_debounce(registry: NodeRegistry, debounce: Duration) -> Self {
        Self {
            registry,
            debounce,
            snapshot: GraphSnapshot::default(),
            deadline: None,
            code: None,
            error: None,
            error_node_id: None,
            compiles: 0,
        }
    }

    /// Replace the snapshot and restart the quiet period.
    ///
    /// An empty snapshot clears the code and error immediately.
    pub fn update(&mut self, snapshot: GraphSnapshot, now: Instant) {
        self.snapshot = snapshot;
        if self.snapshot.is_empty() {
            self.deadline = None;
            self.code = None;
            self.error = None;
            self.error_node_id = None;
            return;
        }
        self.deadline = Some(now + self.debounce);
    }

    /// Schedule a recompile of the current snapshot
    pub fn request(&mut self, now: Instant) {
        if !self.snapshot.is_empty() {
            self.deadline = Some(now + self.debounce);
        }
    }

    /// Recompile if the quiet period has elapsed. Returns true when a compile ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.recompile();
                true
            }
            _ => false,
        }
    }

    /// Compile the current snapshot right away
    pub fn flush(&mut self) {
        self.deadline = None;
        if !self.snapshot.is_empty() {
            self.recompile();
        }
    }

    fn recompile(&mut self) {
        let result = CodeGenerator::new(&self.registry)
            .compile(&self.snapshot.nodes, &self.snapshot.edges);
        self.compiles += 1;
        self.code = result.code;
        self.error = result.error;
        self.error_node_id = result.error_node_id;
    }

    /// Whether a recompile is scheduled
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the scheduled recompile becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.snapshot
    }

    /// Shader source from the last successful compile
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Error message from the last failed compile
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Node the last error is attached to
    pub fn error_node_id(&self) -> Option<&NodeId> {
        self.error_node_id.as_ref()
    }

    /// Number of compiles run so far
    pub fn compile_count(&self) -> usize {
        self.compiles
    }
}
