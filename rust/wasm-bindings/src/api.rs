// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JavaScript API for Mandelmesh
//!
//! The UI owns its parameter object and calls `generate` again whenever a
//! value changes; every call is a fresh run from the seed icosahedron.

use crate::utils;
use crate::zero_copy::FractalMeshJs;
use mandelmesh_processing::{generate_fractal_mesh, FractalParams, MeshParams};
use wasm_bindgen::prelude::*;

/// Main Mandelmesh API
#[wasm_bindgen]
pub struct MandelmeshAPI {
    initialized: bool,
}

#[wasm_bindgen]
impl MandelmeshAPI {
    /// Create and initialize the API
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        Self { initialized: true }
    }

    /// Check if API is initialized
    #[wasm_bindgen(getter, js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.initialized
    }

    /// Get WASM memory for zero-copy access
    #[wasm_bindgen(js_name = getMemory)]
    pub fn get_memory(&self) -> JsValue {
        crate::zero_copy::get_memory()
    }

    /// Get version string
    #[wasm_bindgen(getter)]
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Generate a fractal mesh from a parameter object.
    ///
    /// Missing fields take their defaults.
    ///
    /// Example:
    /// ```javascript
    /// const api = new MandelmeshAPI();
    /// const mesh = api.generate({ vertexBudget: 10242, power: 8, iterations: 2 });
    /// geometry.setAttribute('position', new BufferAttribute(mesh.positions, 3));
    /// geometry.setAttribute('normal', new BufferAttribute(mesh.normals, 3));
    /// ```
    #[wasm_bindgen]
    pub fn generate(&self, params: JsValue) -> Result<FractalMeshJs, JsValue> {
        let params: MeshParams = if params.is_undefined() || params.is_null() {
            MeshParams::default()
        } else {
            serde_wasm_bindgen::from_value(params)
                .map_err(|e| JsValue::from_str(&format!("Invalid parameters: {}", e)))?
        };
        self.run(&params)
    }

    /// Generate with positional arguments, for callers without an options object
    #[wasm_bindgen(js_name = generateWith)]
    pub fn generate_with(
        &self,
        vertex_budget: usize,
        power: u32,
        iterations: u32,
        boundary: f64,
        tolerance: f64,
        initial_step: f64,
    ) -> Result<FractalMeshJs, JsValue> {
        let fractal = FractalParams::default()
            .with_power(power)
            .with_iterations(iterations)
            .with_boundary(boundary)
            .with_tolerance(tolerance)
            .with_initial_step(initial_step);
        self.run(&MeshParams::new(vertex_budget, fractal))
    }

    /// Default parameters as a plain object, for seeding UI controls
    #[wasm_bindgen(js_name = defaultParams)]
    pub fn default_params(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&MeshParams::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl MandelmeshAPI {
    fn run(&self, params: &MeshParams) -> Result<FractalMeshJs, JsValue> {
        let start = utils::now_ms();
        let mesh = generate_fractal_mesh(params).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let elapsed = utils::now_ms() - start;

        utils::debug(&format!(
            "Generated {} vertices / {} faces in {:.1}ms (budget {}, power {}, iterations {})",
            mesh.vertex_count,
            mesh.face_count,
            elapsed,
            params.vertex_budget,
            params.fractal.power,
            params.fractal.iterations
        ));
        if mesh.stats.non_converged > 0 {
            utils::warn(&format!(
                "{} vertices did not converge within {} steps",
                mesh.stats.non_converged, params.fractal.max_steps
            ));
        }

        let mut js = FractalMeshJs::from(mesh);
        js.set_elapsed_ms(elapsed);
        Ok(js)
    }
}

impl Default for MandelmeshAPI {
    fn default() -> Self {
        Self::new()
    }
}
