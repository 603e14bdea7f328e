//! Call a function by name.
//!
//! This crate resolves a symbol from the dynamic loader's process-wide scope
//! and calls it as `extern "C" fn(*mut c_void) -> *mut c_void`:
//! - [`SymbolResolver`] abstracts the lookup ([`DefaultScopeResolver`] for the
//!   loader, [`MapResolver`] for a fixed table)
//! - [`DiagnosticSink`] receives resolution failures, which are otherwise
//!   absorbed into a null return
//! - [`call_unary`] is the single place where an address becomes a function
//! - `symbol_invoker_perform` exposes the same operation over the C ABI

mod diagnostics;
mod error;
mod ffi;
mod invoke;
mod resolver;

pub use diagnostics::{
    Diagnostic, DiagnosticSink, LogSink, NOT_FOUND_MESSAGE, RecordingSink, StdoutSink,
};
pub use error::{ResolveError, Result};
pub use ffi::symbol_invoker_perform;
pub use invoke::{Invoker, Opaque, UnaryFn, call_unary, invoke};
pub use resolver::{DefaultScopeResolver, MapResolver, SymbolAddress, SymbolResolver};
