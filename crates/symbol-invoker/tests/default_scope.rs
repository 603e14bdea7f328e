//! Resolution against the real dynamic loader.
//!
//! The build script links test executables with `-rdynamic` so the functions
//! defined here are visible to `dlsym(RTLD_DEFAULT, ..)`.
#![cfg(unix)]

use std::ffi::c_void;
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use symbol_invoker::{
    DefaultScopeResolver, Invoker, RecordingSink, ResolveError, SymbolResolver, invoke,
    symbol_invoker_perform,
};

#[unsafe(no_mangle)]
pub extern "C" fn test_identity(arg: *mut c_void) -> *mut c_void {
    arg
}

#[unsafe(no_mangle)]
pub extern "C" fn test_tag_low_bit(arg: *mut c_void) -> *mut c_void {
    (arg as usize | 1) as *mut c_void
}

#[used]
static EXPORTED: [extern "C" fn(*mut c_void) -> *mut c_void; 2] =
    [test_identity, test_tag_low_bit];

fn unique_missing_name() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!(
        "symbol_invoker_missing_{}_{}",
        process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

fn recording_invoker() -> Invoker<DefaultScopeResolver, RecordingSink> {
    Invoker::new(DefaultScopeResolver, RecordingSink::new())
}

#[test]
fn identity_symbol_returns_its_argument() {
    let mut value = 42u64;
    let ptr = (&mut value as *mut u64).cast::<c_void>();

    assert_eq!(unsafe { invoke("test_identity", ptr) }, ptr);
    assert_eq!(unsafe { invoke("test_identity", ptr) }, test_identity(ptr));
    assert!(unsafe { invoke("test_identity", std::ptr::null_mut()) }.is_null());
}

#[test]
fn resolved_call_matches_direct_call() {
    let invoker = recording_invoker();
    for raw in [0usize, 2, 0x1000, 0xdead_bee0] {
        let ptr = raw as *mut c_void;
        assert_eq!(
            unsafe { invoker.invoke("test_tag_low_bit", ptr) },
            test_tag_low_bit(ptr)
        );
    }
    assert!(invoker.sink().is_empty());
}

#[test]
fn resolved_address_is_the_exported_function() {
    let address = DefaultScopeResolver
        .resolve("test_identity")
        .expect("test_identity is exported");
    assert_eq!(address.as_ptr(), EXPORTED[0] as *mut c_void);
}

#[test]
fn missing_symbol_yields_null_and_one_diagnostic() {
    let invoker = recording_invoker();
    let mut value = 5u8;
    let ptr = (&mut value as *mut u8).cast::<c_void>();

    let out = unsafe { invoker.invoke("definitely_not_a_real_symbol_xyz123", ptr) };
    assert!(out.is_null());

    let entries = invoker.sink().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "definitely_not_a_real_symbol_xyz123");
    assert!(matches!(entries[0].error, ResolveError::NotFound { .. }));
}

#[test]
fn generated_missing_names_never_resolve() {
    let invoker = recording_invoker();
    let mut value = 0i32;
    let args = [std::ptr::null_mut(), (&mut value as *mut i32).cast::<c_void>()];

    for _ in 0..8 {
        let name = unique_missing_name();
        for arg in args {
            assert!(unsafe { invoker.invoke(&name, arg) }.is_null());
        }
    }
    assert_eq!(invoker.sink().len(), 16);
}

#[test]
fn empty_name_is_missing() {
    let invoker = recording_invoker();
    assert!(unsafe { invoker.invoke("", std::ptr::null_mut()) }.is_null());
    assert_eq!(invoker.sink().entries()[0].error, ResolveError::EmptyName);
}

#[test]
fn c_entry_point_forwards_to_resolved_symbol() {
    let mut value = 11u32;
    let ptr = (&mut value as *mut u32).cast::<c_void>();

    let out = unsafe { symbol_invoker_perform(c"test_identity".as_ptr(), ptr) };
    assert_eq!(out, ptr);

    let out = unsafe {
        symbol_invoker_perform(c"definitely_not_a_real_symbol_xyz123".as_ptr(), ptr)
    };
    assert!(out.is_null());
}
