//! Build script for the demo firmware
//!
//! Makes the memory.x linker script visible to cortex-m-rt when building
//! the embedded binary. Host builds run it too but link nothing from here.

fn main() {
    // Tell Cargo to re-run this if the linker script changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Link memory.x from project directory
    println!("cargo:rustc-link-search={}", std::env::var("CARGO_MANIFEST_DIR").unwrap());
}
