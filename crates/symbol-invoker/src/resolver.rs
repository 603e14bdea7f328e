//! Symbol resolution capability.
//!
//! A [`SymbolResolver`] turns a symbol name into the address of a function.
//! [`DefaultScopeResolver`] asks the dynamic loader to search every module
//! loaded into the process; [`MapResolver`] serves a fixed in-memory table.

use std::collections::BTreeMap;
use std::ffi::{CString, c_void};
use std::ptr::NonNull;
use std::sync::Arc;

use crate::error::{ResolveError, Result};
use crate::invoke::UnaryFn;

/// Address of a resolved symbol. Never null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolAddress(NonNull<c_void>);

impl SymbolAddress {
    pub fn new(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(SymbolAddress)
    }

    pub fn from_fn(function: UnaryFn) -> Self {
        // SAFETY: function pointers are never null.
        SymbolAddress(unsafe { NonNull::new_unchecked(function as *mut c_void) })
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

pub trait SymbolResolver {
    fn resolve(&self, name: &str) -> Result<SymbolAddress>;
}

impl<R: SymbolResolver + ?Sized> SymbolResolver for &R {
    fn resolve(&self, name: &str) -> Result<SymbolAddress> {
        (**self).resolve(name)
    }
}

impl<R: SymbolResolver + ?Sized> SymbolResolver for Box<R> {
    fn resolve(&self, name: &str) -> Result<SymbolAddress> {
        (**self).resolve(name)
    }
}

impl<R: SymbolResolver + ?Sized> SymbolResolver for Arc<R> {
    fn resolve(&self, name: &str) -> Result<SymbolAddress> {
        (**self).resolve(name)
    }
}

/// Rejects names that can never identify a loader symbol.
pub(crate) fn symbol_cstring(name: &str) -> Result<CString> {
    if name.is_empty() {
        return Err(ResolveError::EmptyName);
    }
    CString::new(name).map_err(|_| ResolveError::InvalidName {
        name: name.to_string(),
    })
}

/// Looks symbols up in the loader's global scope (`RTLD_DEFAULT`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScopeResolver;

impl DefaultScopeResolver {
    pub fn new() -> Self {
        Self
    }
}

impl SymbolResolver for DefaultScopeResolver {
    #[cfg(unix)]
    fn resolve(&self, name: &str) -> Result<SymbolAddress> {
        use std::ffi::CStr;

        let cname = symbol_cstring(name)?;

        // dlerror state is per thread; drain it so the read below only sees
        // the outcome of this lookup.
        let (addr, loader_error) = unsafe {
            libc::dlerror();
            let addr = libc::dlsym(libc::RTLD_DEFAULT, cname.as_ptr());
            let err = libc::dlerror();
            let message = if err.is_null() {
                None
            } else {
                Some(CStr::from_ptr(err).to_string_lossy().into_owned())
            };
            (addr, message)
        };

        match (SymbolAddress::new(addr), loader_error) {
            (Some(address), None) => Ok(address),
            (_, message) => Err(ResolveError::NotFound {
                name: name.to_string(),
                message,
            }),
        }
    }

    #[cfg(not(unix))]
    fn resolve(&self, name: &str) -> Result<SymbolAddress> {
        symbol_cstring(name)?;
        Err(ResolveError::Unsupported {
            name: name.to_string(),
        })
    }
}

/// In-memory name table, for hosts that expose a fixed set of functions
/// without going through the loader.
#[derive(Debug, Default, Clone)]
pub struct MapResolver {
    functions: BTreeMap<String, UnaryFn>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, function: UnaryFn) -> &mut Self {
        self.functions.insert(name.to_string(), function);
        self
    }

    pub fn with(mut self, name: &str, function: UnaryFn) -> Self {
        self.register(name, function);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl SymbolResolver for MapResolver {
    fn resolve(&self, name: &str) -> Result<SymbolAddress> {
        symbol_cstring(name)?;
        self.functions
            .get(name)
            .map(|function| SymbolAddress::from_fn(*function))
            .ok_or_else(|| ResolveError::not_found(name))
    }
}
