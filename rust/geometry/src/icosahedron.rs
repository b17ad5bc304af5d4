// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Regular icosahedron used as the subdivision seed

use crate::mesh::IndexedMesh;
use nalgebra::Vector3;

/// Golden ratio
pub const PHI: f64 = 1.618_033_988_749_895;

pub const ICOSAHEDRON_VERTICES: usize = 12;
pub const ICOSAHEDRON_EDGES: usize = 30;
pub const ICOSAHEDRON_FACES: usize = 20;

/// Vertices at (0, ±1, ±φ) and its cyclic permutations
const VERTICES: [[f64; 3]; ICOSAHEDRON_VERTICES] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

/// Counter-clockwise when seen from outside
const FACES: [[u32; 3]; ICOSAHEDRON_FACES] = [
    // 5 faces around vertex 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    // 5 adjacent faces
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    // 5 faces around vertex 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    // 5 adjacent faces
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Distance of every seed vertex from the origin, sqrt(1 + φ²)
#[inline]
pub fn seed_radius() -> f64 {
    (1.0 + PHI * PHI).sqrt()
}

/// Build the seed mesh: 12 vertices, 20 outward-wound faces
pub fn icosahedron() -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(ICOSAHEDRON_VERTICES, ICOSAHEDRON_FACES);
    for [x, y, z] in VERTICES {
        mesh.add_vertex(Vector3::new(x, y, z));
    }
    mesh.faces.extend_from_slice(&FACES);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_seed_counts() {
        let mesh = icosahedron();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 20);

        let mut edges = FxHashSet::default();
        for face in &mesh.faces {
            for k in 0..3 {
                let (a, b) = (face[k], face[(k + 1) % 3]);
                edges.insert((a.min(b), a.max(b)));
            }
        }
        assert_eq!(edges.len(), ICOSAHEDRON_EDGES);
    }

    #[test]
    fn test_seed_vertices_share_radius() {
        let radius = seed_radius();
        for v in &icosahedron().vertices {
            assert_relative_eq!(v.norm(), radius, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_seed_winding_is_outward() {
        let mesh = icosahedron();
        for face in &mesh.faces {
            let [a, b, c] = mesh.face_vertices(face);
            let normal = (a - b).cross(&(a - c));
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(&centroid) > 0.0, "face {:?} winds inward", face);
        }
    }

    #[test]
    fn test_golden_ratio() {
        assert_relative_eq!(PHI, (1.0 + 5.0_f64.sqrt()) / 2.0, epsilon = 1e-15);
    }
}
