// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generation output types.

use mandelmesh_geometry::{FlatMesh, MeshParams};
use serde::{Deserialize, Serialize};

/// Counters collected during one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Subdivision rounds applied to the seed.
    pub subdivision_rounds: u32,
    /// Vertices whose boundary search hit the step cap.
    pub non_converged: usize,
    /// Radial moves summed over all vertices.
    pub total_steps: u64,
    /// Most moves any single vertex needed.
    pub max_steps_taken: u32,
    /// Wall-clock time of the run (0 where no clock is available).
    pub elapsed_ms: f64,
}

/// Flat, non-indexed fractal mesh ready for a vertex buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractalMesh {
    /// Corner positions, 9 floats per face.
    pub positions: Vec<f32>,
    /// Corner normals, 9 floats per face.
    pub normals: Vec<f32>,
    /// Unique vertices in the indexed mesh before flattening.
    pub vertex_count: usize,
    /// Triangles in the mesh.
    pub face_count: usize,
    /// Parameters the mesh was generated with.
    pub params: MeshParams,
    pub stats: GenerationStats,
}

impl FractalMesh {
    pub(crate) fn new(
        flat: FlatMesh,
        vertex_count: usize,
        face_count: usize,
        params: MeshParams,
        stats: GenerationStats,
    ) -> Self {
        Self {
            positions: flat.positions,
            normals: flat.normals,
            vertex_count,
            face_count,
            params,
            stats,
        }
    }

    /// Number of face corners in the flat buffers.
    pub fn corner_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// True when every vertex search met the tolerance.
    pub fn fully_converged(&self) -> bool {
        self.stats.non_converged == 0
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Serialize the mesh (buffers, counts, params and stats) as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
