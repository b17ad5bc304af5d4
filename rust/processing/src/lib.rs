// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared fractal mesh pipeline used by the CLI and the wasm bindings.
//!
//! Each call is a full, independent run from the icosahedron seed. There is
//! no incremental re-tessellation; callers that change a parameter call
//! [`generate_fractal_mesh`] again, optionally cancelling the previous run.

pub mod cancel;
pub mod pipeline;
pub mod types;

pub use cancel::CancelToken;
pub use mandelmesh_geometry::{Error, FractalParams, MeshParams, NormalWeighting, Result};
pub use pipeline::{generate_fractal_mesh, generate_fractal_mesh_with_cancel, locate_all};
pub use types::{FractalMesh, GenerationStats};
