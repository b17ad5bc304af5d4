// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertex normal estimation

use crate::mesh::{normalize_or_zero, IndexedMesh};
use crate::params::NormalWeighting;
use nalgebra::Vector3;

/// Unit normal of the triangle (a, b, c) from `(a - b) x (a - c)`.
/// Degenerate triangles give the zero vector.
#[inline]
pub fn face_normal(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> Vector3<f64> {
    normalize_or_zero(&(a - b).cross(&(a - c)))
}

/// Per-vertex unit normals for a deformed mesh.
///
/// Vertices whose faces are all degenerate fall back to their radial
/// direction, so every non-origin vertex gets a unit normal.
pub fn vertex_normals(mesh: &IndexedMesh, weighting: NormalWeighting) -> Vec<Vector3<f64>> {
    let vertex_count = mesh.vertex_count();
    let mut normals = vec![Vector3::zeros(); vertex_count];

    match weighting {
        NormalWeighting::RunningAverage => {
            let mut seen = vec![false; vertex_count];
            for face in &mesh.faces {
                let [a, b, c] = mesh.face_vertices(face);
                let normal = face_normal(&a, &b, &c);
                if normal == Vector3::zeros() {
                    continue;
                }

                for &index in face {
                    let i = index as usize;
                    // Averages the new face with everything so far, so
                    // earlier faces fade with each later contribution
                    normals[i] = if seen[i] {
                        (normals[i] + normal) / 2.0
                    } else {
                        seen[i] = true;
                        normal
                    };
                }
            }
        }
        NormalWeighting::AreaWeighted => {
            for face in &mesh.faces {
                let [a, b, c] = mesh.face_vertices(face);
                // Length is twice the triangle area
                let normal = (a - b).cross(&(a - c));
                for &index in face {
                    normals[index as usize] += normal;
                }
            }
        }
    }

    normals
        .iter()
        .zip(&mesh.vertices)
        .map(|(normal, position)| match normal.try_normalize(0.0) {
            Some(unit) => unit,
            None => normalize_or_zero(position),
        })
        .collect()
}

/// Normals of an undeformed sphere: each vertex's own direction
pub fn sphere_normals(vertices: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
    vertices.iter().map(normalize_or_zero).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icosphere::icosphere_with_depth;
    use approx::assert_relative_eq;

    #[test]
    fn test_face_normal_follows_winding() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 0.0, 0.0);
        let c = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(face_normal(&a, &b, &c), Vector3::z());
        assert_eq!(face_normal(&a, &c, &b), -Vector3::z());
    }

    #[test]
    fn test_degenerate_face_has_zero_normal() {
        let a = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(face_normal(&a, &a, &a), Vector3::zeros());
    }

    #[test]
    fn test_normals_unit_length() {
        let mesh = icosphere_with_depth(2);
        for weighting in [NormalWeighting::RunningAverage, NormalWeighting::AreaWeighted] {
            let normals = vertex_normals(&mesh, weighting);
            assert_eq!(normals.len(), mesh.vertex_count());
            for n in &normals {
                assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_sphere_normals_point_outward() {
        let mesh = icosphere_with_depth(2);
        let estimated = vertex_normals(&mesh, NormalWeighting::RunningAverage);
        let exact = sphere_normals(&mesh.vertices);
        for (e, x) in estimated.iter().zip(&exact) {
            assert_relative_eq!(x.norm(), 1.0, epsilon = 1e-12);
            // Face-averaged normals of a fine icosphere stay close to radial
            assert!(e.dot(x) > 0.95);
        }
    }

    #[test]
    fn test_running_average_is_order_dependent() {
        // Two triangles sharing vertex 0 with different normals, plus a third
        let mut mesh = IndexedMesh::new();
        mesh.add_vertex(Vector3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vector3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vector3::new(0.0, 1.0, 0.0));
        mesh.add_vertex(Vector3::new(0.0, 0.0, 1.0));
        mesh.add_face(0, 1, 2); // +Z
        mesh.add_face(0, 3, 1); // +Y
        mesh.add_face(0, 2, 3); // +X

        let forward = vertex_normals(&mesh, NormalWeighting::RunningAverage)[0];

        mesh.faces.reverse();
        let backward = vertex_normals(&mesh, NormalWeighting::RunningAverage)[0];

        // ((z + y) / 2 + x) / 2 weighs x twice as much as the others
        let expected = Vector3::new(2.0, 1.0, 1.0).normalize();
        assert_relative_eq!((forward - expected).norm(), 0.0, epsilon = 1e-12);
        assert!((forward - backward).norm() > 1e-3);
    }

    #[test]
    fn test_isolated_vertex_falls_back_to_position() {
        let mut mesh = IndexedMesh::new();
        mesh.add_vertex(Vector3::new(0.0, 3.0, 0.0));
        let normals = vertex_normals(&mesh, NormalWeighting::AreaWeighted);
        assert_eq!(normals[0], Vector3::y());
    }
}
