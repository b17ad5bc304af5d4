// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Seed -> subdivide -> boundary search -> normals -> flatten.

use crate::cancel::CancelToken;
use crate::types::{FractalMesh, GenerationStats};
use mandelmesh_geometry::{
    flatten, icosphere_with_depth, locate_edge, sphere_normals, subdivision_depth,
    vertex_normals, EdgeSearch, Error, FractalParams, MeshParams, Result, Vector3,
};
use tracing::{debug, info, warn};

/// Generate a fractal mesh for `params`.
///
/// Budgets below the seed size return the bare icosahedron projected onto
/// the boundary; invalid fractal parameters are rejected before any search
/// starts.
pub fn generate_fractal_mesh(params: &MeshParams) -> Result<FractalMesh> {
    generate_fractal_mesh_with_cancel(params, &CancelToken::new())
}

/// [`generate_fractal_mesh`] that stops with [`Error::Cancelled`] once
/// `cancel` is set.
pub fn generate_fractal_mesh_with_cancel(
    params: &MeshParams,
    cancel: &CancelToken,
) -> Result<FractalMesh> {
    // No monotonic clock on wasm32-unknown-unknown
    #[cfg(not(target_arch = "wasm32"))]
    let start = std::time::Instant::now();

    params.validate()?;
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let fractal = &params.fractal;
    let rounds = subdivision_depth(params.vertex_budget)?;
    let mut mesh = icosphere_with_depth(rounds);
    debug!(
        budget = params.vertex_budget,
        rounds,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Subdivided icosphere"
    );

    let mut stats = GenerationStats {
        subdivision_rounds: rounds,
        ..GenerationStats::default()
    };

    let normals = if fractal.is_sphere() {
        debug!("Zero iterations, keeping the undeformed sphere");
        sphere_normals(&mesh.vertices)
    } else {
        let searches = locate_all(&mesh.vertices, fractal, cancel)?;
        for (vertex, search) in mesh.vertices.iter_mut().zip(&searches) {
            *vertex = search.position;
            stats.total_steps += u64::from(search.steps);
            stats.max_steps_taken = stats.max_steps_taken.max(search.steps);
            if !search.converged {
                stats.non_converged += 1;
            }
        }
        debug!(
            total_steps = stats.total_steps,
            max_steps = stats.max_steps_taken,
            "Boundary search finished"
        );
        if stats.non_converged > 0 {
            warn!(
                non_converged = stats.non_converged,
                vertices = mesh.vertex_count(),
                max_steps = fractal.max_steps,
                "Some vertices did not reach the boundary tolerance, using best positions"
            );
        }
        vertex_normals(&mesh, params.normal_weighting)
    };

    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    let flat = flatten(&mesh, &normals);

    #[cfg(not(target_arch = "wasm32"))]
    {
        stats.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    }

    info!(
        budget = params.vertex_budget,
        power = fractal.power,
        iterations = fractal.iterations,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        non_converged = stats.non_converged,
        elapsed_ms = stats.elapsed_ms,
        "Generated fractal mesh"
    );

    Ok(FractalMesh::new(
        flat,
        mesh.vertex_count(),
        mesh.face_count(),
        *params,
        stats,
    ))
}

/// Run the boundary search for every vertex.
///
/// Searches are independent, so native builds spread them over the rayon
/// pool. The token is checked before each vertex.
pub fn locate_all(
    vertices: &[Vector3<f64>],
    params: &FractalParams,
    cancel: &CancelToken,
) -> Result<Vec<EdgeSearch>> {
    #[cfg(not(target_arch = "wasm32"))]
    use rayon::prelude::*;

    let search = |vertex: &Vector3<f64>| -> Result<EdgeSearch> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(locate_edge(vertex, params))
    };

    // On WASM: sequential iteration (no threads available)
    #[cfg(not(target_arch = "wasm32"))]
    let searches = vertices.par_iter().map(search).collect();

    #[cfg(target_arch = "wasm32")]
    let searches = vertices.iter().map(search).collect();

    searches
}
