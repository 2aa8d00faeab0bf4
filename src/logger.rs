//! Event log sinks consumed by the book and the matching engine.
//!
//! The core emits one plain text line per material event and never
//! inspects what the sink does with it. [`NullLogger`] is the default;
//! [`ConsoleLogger`] prints to stdout; [`TracingLogger`] forwards onto the
//! process's structured logging; [`MemoryLogger`] records lines for tests.

use std::sync::{Arc, Mutex};

/// One-line event sink.
pub trait Logger: Send + Sync {
    fn log(&self, line: &str);
}

/// Discards every line. Default sink when none is provided.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _line: &str) {}
}

/// Prints each line to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, line: &str) {
        println!("[LOG] {}", line);
    }
}

/// Forwards each line as a `tracing` info event under the `book` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, line: &str) {
        tracing::info!(target: "book", "{}", line);
    }
}

/// Stores lines in memory for tests. Clone shares the same backing buffer.
#[derive(Clone, Default)]
pub struct MemoryLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lock").clone()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, line: &str) {
        self.lines.lock().expect("lock").push(line.to_string());
    }
}
