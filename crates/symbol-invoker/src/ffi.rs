//! C ABI entry point.

use std::ffi::{CStr, c_char, c_void};

use crate::diagnostics::DiagnosticSink;
use crate::error::ResolveError;
use crate::invoke::Invoker;

/// Resolves the NUL-terminated `name` in the loader's global scope and calls
/// it with `arg`, returning its result or null.
///
/// A null `name`, or one that is not UTF-8, is reported as not found.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string. The resolved
/// symbol must satisfy the preconditions of [`crate::call_unary`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn symbol_invoker_perform(
    name: *const c_char,
    arg: *const c_void,
) -> *mut c_void {
    let invoker = Invoker::default_scope();

    if name.is_null() {
        invoker.sink().symbol_not_found("", &ResolveError::EmptyName);
        return std::ptr::null_mut();
    }

    let name = unsafe { CStr::from_ptr(name) };
    match name.to_str() {
        Ok(name) => unsafe { invoker.invoke(name, arg.cast_mut()) },
        Err(_) => {
            let lossy = name.to_string_lossy();
            invoker.sink().symbol_not_found(
                &lossy,
                &ResolveError::NotFound {
                    name: lossy.to_string(),
                    message: Some("symbol name is not valid UTF-8".to_string()),
                },
            );
            std::ptr::null_mut()
        }
    }
}
