// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zero-copy fractal mesh for WASM
//!
//! Enables direct access to WASM memory from JavaScript without copying.

use mandelmesh_processing::{FractalMesh, GenerationStats};
use wasm_bindgen::prelude::*;

/// Generated fractal mesh exposed to JavaScript.
///
/// Buffers are non-indexed: 9 floats per face, ready for
/// `gl.drawArrays(gl.TRIANGLES, 0, vertexCount)`-style pipelines.
#[wasm_bindgen]
pub struct FractalMeshJs {
    positions: Vec<f32>,
    normals: Vec<f32>,
    vertex_count: usize,
    face_count: usize,
    stats: GenerationStats,
}

#[wasm_bindgen]
impl FractalMeshJs {
    /// Get positions as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.positions[..])
    }

    /// Get normals as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.normals[..])
    }

    /// Get pointer to positions array
    /// JavaScript can create Float32Array view: new Float32Array(memory.buffer, ptr, length)
    #[wasm_bindgen(getter, js_name = positionsPtr)]
    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }

    /// Get pointer to normals array
    #[wasm_bindgen(getter, js_name = normalsPtr)]
    pub fn normals_ptr(&self) -> *const f32 {
        self.normals.as_ptr()
    }

    /// Length of each buffer in f32 elements (not bytes)
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.positions.len()
    }

    /// Unique vertices before flattening
    #[wasm_bindgen(getter, js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Triangle count
    #[wasm_bindgen(getter, js_name = faceCount)]
    pub fn face_count(&self) -> usize {
        self.face_count
    }

    /// Vertices whose boundary search ran out of steps
    #[wasm_bindgen(getter, js_name = nonConverged)]
    pub fn non_converged(&self) -> usize {
        self.stats.non_converged
    }

    /// Subdivision rounds applied to the seed icosahedron
    #[wasm_bindgen(getter, js_name = subdivisionRounds)]
    pub fn subdivision_rounds(&self) -> u32 {
        self.stats.subdivision_rounds
    }

    /// Generation time in milliseconds
    #[wasm_bindgen(getter, js_name = elapsedMs)]
    pub fn elapsed_ms(&self) -> f64 {
        self.stats.elapsed_ms
    }

    /// Check if mesh is empty
    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FractalMeshJs {
    pub(crate) fn set_elapsed_ms(&mut self, elapsed_ms: f64) {
        self.stats.elapsed_ms = elapsed_ms;
    }
}

impl From<FractalMesh> for FractalMeshJs {
    fn from(mesh: FractalMesh) -> Self {
        Self {
            positions: mesh.positions,
            normals: mesh.normals,
            vertex_count: mesh.vertex_count,
            face_count: mesh.face_count,
            stats: mesh.stats,
        }
    }
}

/// Get WASM memory to allow JavaScript to create TypedArray views
#[wasm_bindgen]
pub fn get_memory() -> JsValue {
    wasm_bindgen::memory()
}
