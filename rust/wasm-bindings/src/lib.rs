//! Mandelmesh WebAssembly Bindings
//!
//! JavaScript API for fractal mesh generation built with wasm-bindgen. The
//! renderer owns the device, camera and scene; this crate only turns
//! parameters into vertex buffers.

use wasm_bindgen::prelude::*;

#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

mod api;
mod utils;
mod zero_copy;

pub use api::MandelmeshAPI;
pub use utils::set_panic_hook as init_panic_hook;
pub use zero_copy::{get_memory, FractalMeshJs};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the version of Mandelmesh
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
