//! Where resolution failures are reported.
//!
//! Failures never reach the caller of [`crate::invoke`]; they are handed to a
//! [`DiagnosticSink`] exactly once per failed call and swallowed.

use std::sync::{Arc, Mutex};

use crate::error::ResolveError;

/// Fixed line printed by [`StdoutSink`].
pub const NOT_FOUND_MESSAGE: &str = "symbol-invoker: method not found";

pub trait DiagnosticSink {
    fn symbol_not_found(&self, name: &str, error: &ResolveError);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn symbol_not_found(&self, name: &str, error: &ResolveError) {
        (**self).symbol_not_found(name, error)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn symbol_not_found(&self, name: &str, error: &ResolveError) {
        (**self).symbol_not_found(name, error)
    }
}

/// Prints [`NOT_FOUND_MESSAGE`] to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl DiagnosticSink for StdoutSink {
    fn symbol_not_found(&self, _name: &str, _error: &ResolveError) {
        println!("{NOT_FOUND_MESSAGE}");
    }
}

/// Forwards failures to the `log` facade at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn symbol_not_found(&self, name: &str, error: &ResolveError) {
        log::warn!("cannot invoke {name:?}: {error}");
    }
}

/// A single recorded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub name: String,
    pub error: ResolveError,
}

/// Keeps every failure in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for RecordingSink {
    fn symbol_not_found(&self, name: &str, error: &ResolveError) {
        self.lock().push(Diagnostic {
            name: name.to_string(),
            error: error.clone(),
        });
    }
}
