//! Resolve-then-call.

use std::ffi::c_void;

use crate::diagnostics::{DiagnosticSink, StdoutSink};
use crate::error::Result;
use crate::resolver::{DefaultScopeResolver, SymbolAddress, SymbolResolver};

/// Pointer-sized value whose pointee is unknown to this crate.
pub type Opaque = *mut c_void;

/// The only signature a resolved symbol is assumed to have.
pub type UnaryFn = unsafe extern "C" fn(Opaque) -> Opaque;

/// Reinterprets `address` as a [`UnaryFn`] and calls it with `arg`.
///
/// # Safety
///
/// `address` must be the entry point of a function whose real signature is
/// exactly `extern "C" fn(*mut c_void) -> *mut c_void`. Any other signature
/// or calling convention is undefined behavior. The caller is also
/// responsible for whatever contract the function places on `arg`.
pub unsafe fn call_unary(address: SymbolAddress, arg: Opaque) -> Opaque {
    let function: UnaryFn =
        unsafe { std::mem::transmute::<*mut c_void, UnaryFn>(address.as_ptr()) };
    unsafe { function(arg) }
}

/// Resolves symbols through `R` and reports failures to `S`.
#[derive(Debug, Clone, Default)]
pub struct Invoker<R, S> {
    resolver: R,
    sink: S,
}

impl Invoker<DefaultScopeResolver, StdoutSink> {
    /// Global loader scope, failures printed to stdout.
    pub fn default_scope() -> Self {
        Self::new(DefaultScopeResolver, StdoutSink)
    }
}

impl<R: SymbolResolver, S: DiagnosticSink> Invoker<R, S> {
    pub fn new(resolver: R, sink: S) -> Self {
        Self { resolver, sink }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Looks `name` up without calling it. The sink is not notified.
    pub fn resolve(&self, name: &str) -> Result<SymbolAddress> {
        self.resolver.resolve(name)
    }

    /// Resolves `name` and calls it with `arg`.
    ///
    /// Returns null when the symbol cannot be resolved, after notifying the
    /// sink once. A null return is also what a resolved function returning
    /// null looks like; callers needing to tell the two apart should use
    /// [`Invoker::resolve`] first.
    ///
    /// # Safety
    ///
    /// Whatever `name` resolves to must satisfy the preconditions of
    /// [`call_unary`].
    pub unsafe fn invoke(&self, name: &str, arg: Opaque) -> Opaque {
        match self.resolver.resolve(name) {
            Ok(address) => unsafe { call_unary(address, arg) },
            Err(err) => {
                self.sink.symbol_not_found(name, &err);
                std::ptr::null_mut()
            }
        }
    }
}

/// Resolves `name` in the loader's global scope and calls it with `arg`.
///
/// On failure prints [`crate::NOT_FOUND_MESSAGE`] to stdout and returns null.
///
/// # Safety
///
/// See [`call_unary`].
pub unsafe fn invoke(name: &str, arg: Opaque) -> Opaque {
    unsafe { Invoker::default_scope().invoke(name, arg) }
}
