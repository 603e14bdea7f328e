use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Integration tests resolve `#[unsafe(no_mangle)]` functions they define
    // themselves, which requires the test executable to export its symbols.
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "linux" || target_os == "android" {
        println!("cargo:rustc-link-arg-tests=-rdynamic");
    }
}
