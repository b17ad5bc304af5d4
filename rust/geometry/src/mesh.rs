// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::{Point3, Vector3};

/// Triangle face as three vertex indices; winding order is significant
pub type Face = [u32; 3];

/// Normalize a vector, mapping the zero vector to itself
#[inline]
pub fn normalize_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}

/// Indexed triangle mesh with shared vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Vertex positions, never duplicated once created
    pub vertices: Vec<Vector3<f64>>,
    /// Triangles referencing `vertices` by index
    pub faces: Vec<Face>,
}

impl IndexedMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Append a vertex and return its index
    #[inline]
    pub fn add_vertex(&mut self, position: Vector3<f64>) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Add a triangle
    #[inline]
    pub fn add_face(&mut self, i0: u32, i1: u32, i2: u32) {
        self.faces.push([i0, i1, i2]);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Corner positions of a face in winding order
    #[inline]
    pub fn face_vertices(&self, face: &Face) -> [Vector3<f64>; 3] {
        [
            self.vertices[face[0] as usize],
            self.vertices[face[1] as usize],
            self.vertices[face[2] as usize],
        ]
    }

    /// Indexed f32 buffers (positions, normals, indices) for renderers that
    /// draw with an index buffer instead of the flattened layout
    pub fn to_indexed_buffers(&self, normals: &[Vector3<f64>]) -> (Vec<f32>, Vec<f32>, Vec<u32>) {
        debug_assert_eq!(normals.len(), self.vertices.len());

        let mut positions = Vec::with_capacity(self.vertices.len() * 3);
        let mut out_normals = Vec::with_capacity(self.vertices.len() * 3);
        for (v, n) in self.vertices.iter().zip(normals) {
            positions.extend_from_slice(&[v.x as f32, v.y as f32, v.z as f32]);
            out_normals.extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        }
        let indices = self.faces.iter().flatten().copied().collect();

        (positions, out_normals, indices)
    }
}

/// Non-indexed triangle soup: one entry per face corner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMesh {
    /// Corner positions (x, y, z), 9 values per face
    pub positions: Vec<f32>,
    /// Corner normals (nx, ny, nz), 9 values per face
    pub normals: Vec<f32>,
}

impl FlatMesh {
    /// Create a mesh with room for `face_count` triangles
    pub fn with_capacity(face_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(face_count * 9),
            normals: Vec::with_capacity(face_count * 9),
        }
    }

    /// Add one face corner
    #[inline]
    pub fn push_corner(&mut self, position: &Vector3<f64>, normal: &Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);

        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0], chunk[1], chunk[2]);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }
}

/// Denormalize an indexed mesh into per-corner buffers.
///
/// Entry `i*9 + j*3 + k` holds component `k` of corner `j` of face `i`,
/// for both positions and normals.
pub fn flatten(mesh: &IndexedMesh, normals: &[Vector3<f64>]) -> FlatMesh {
    debug_assert_eq!(normals.len(), mesh.vertices.len());

    let mut flat = FlatMesh::with_capacity(mesh.faces.len());
    for face in &mesh.faces {
        for &index in face {
            let index = index as usize;
            flat.push_corner(&mesh.vertices[index], &normals[index]);
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icosahedron::icosahedron;

    #[test]
    fn test_mesh_creation() {
        let mesh = IndexedMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_add_vertex_returns_index() {
        let mut mesh = IndexedMesh::new();
        assert_eq!(mesh.add_vertex(Vector3::x()), 0);
        assert_eq!(mesh.add_vertex(Vector3::y()), 1);
        mesh.add_face(0, 1, 0);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_normalize_zero_vector_is_zero() {
        assert_eq!(normalize_or_zero(&Vector3::zeros()), Vector3::zeros());
        let n = normalize_or_zero(&Vector3::new(3.0, 0.0, 4.0));
        assert!((n.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flatten_seed_layout() {
        let mesh = icosahedron();
        // Negated positions as stand-in normals so both buffers are checkable
        let normals: Vec<_> = mesh.vertices.iter().map(|v| -*v).collect();
        let flat = flatten(&mesh, &normals);

        assert_eq!(flat.positions.len(), 20 * 9);
        assert_eq!(flat.normals.len(), 20 * 9);
        assert_eq!(flat.triangle_count(), 20);

        for (i, face) in mesh.faces.iter().enumerate() {
            for j in 0..3 {
                let v = mesh.vertices[face[j] as usize];
                for k in 0..3 {
                    assert_eq!(flat.positions[i * 9 + j * 3 + k], v[k] as f32);
                    assert_eq!(flat.normals[i * 9 + j * 3 + k], -v[k] as f32);
                }
            }
        }
    }

    #[test]
    fn test_indexed_buffers() {
        let mesh = icosahedron();
        let normals = mesh.vertices.clone();
        let (positions, out_normals, indices) = mesh.to_indexed_buffers(&normals);
        assert_eq!(positions.len(), 12 * 3);
        assert_eq!(out_normals.len(), 12 * 3);
        assert_eq!(indices.len(), 20 * 3);
        assert_eq!(indices[0..3], mesh.faces[0]);
    }

    #[test]
    fn test_bounds_of_seed() {
        let mesh = icosahedron();
        let flat = flatten(&mesh, &mesh.vertices);
        let (min, max) = flat.bounds();
        let phi = crate::icosahedron::PHI as f32;
        assert!((max.x - phi).abs() < 1e-6);
        assert!((min.z + phi).abs() < 1e-6);
    }
}
