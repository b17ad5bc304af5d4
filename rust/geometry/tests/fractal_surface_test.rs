// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builds a fractal surface by hand from the geometry primitives:
//! subdivide, search every vertex, compute normals, flatten.

use approx::assert_relative_eq;
use mandelmesh_geometry::{
    flatten, icosphere, locate_edge, vertex_normals, FractalParams, IndexedMesh, NormalWeighting,
    Vector3,
};

fn fractal_surface(budget: usize, params: &FractalParams) -> IndexedMesh {
    let sphere = icosphere(budget).unwrap();
    let mut surface = IndexedMesh::with_capacity(sphere.vertex_count(), sphere.face_count());
    for v in &sphere.vertices {
        surface.add_vertex(locate_edge(v, params).position);
    }
    for &[a, b, c] in &sphere.faces {
        surface.add_face(a, b, c);
    }
    surface
}

#[test]
fn test_surface_keeps_topology_and_directions() {
    let params = FractalParams::default();
    let sphere = icosphere(162).unwrap();
    let surface = fractal_surface(162, &params);

    assert_eq!(surface.vertex_count(), sphere.vertex_count());
    assert_eq!(surface.faces, sphere.faces);

    for (moved, original) in surface.vertices.iter().zip(&sphere.vertices) {
        assert!(moved.norm() > 0.0);
        assert_relative_eq!(moved.normalize(), original.normalize(), epsilon = 1e-9);
    }
}

#[test]
fn test_surface_flattens_with_unit_normals() {
    let params = FractalParams::default();
    let surface = fractal_surface(162, &params);

    for weighting in [NormalWeighting::RunningAverage, NormalWeighting::AreaWeighted] {
        let normals = vertex_normals(&surface, weighting);
        let flat = flatten(&surface, &normals);

        assert_eq!(flat.triangle_count(), surface.face_count());
        assert_eq!(flat.positions.len(), flat.normals.len());
        for n in flat.normals.chunks_exact(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert_relative_eq!(len, 1.0, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_surface_is_symmetric_under_negation_of_y() {
    // The power map commutes with reflection through the xz-plane and the
    // seed is closed under it, so mirrored vertices land at equal radii.
    let params = FractalParams::default();
    let sphere = icosphere(42).unwrap();
    let surface = fractal_surface(42, &params);

    for (i, v) in sphere.vertices.iter().enumerate() {
        let mirror = Vector3::new(v.x, -v.y, v.z);
        if let Some(j) = sphere
            .vertices
            .iter()
            .position(|w| (w - mirror).norm() < 1e-12)
        {
            assert_relative_eq!(
                surface.vertices[i].norm(),
                surface.vertices[j].norm(),
                epsilon = 1e-9
            );
        }
    }
}
