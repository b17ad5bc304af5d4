// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Icosphere subdivision
//!
//! Every round splits each triangle into four. Midpoints are pushed back
//! onto the seed sphere and shared between the two faces of an edge through
//! a cache keyed by the (min, max) vertex index pair.

use crate::error::{Error, Result};
use crate::icosahedron::{
    icosahedron, seed_radius, ICOSAHEDRON_EDGES, ICOSAHEDRON_FACES, ICOSAHEDRON_VERTICES,
};
use crate::mesh::{normalize_or_zero, IndexedMesh};
use rustc_hash::FxHashMap;

/// Largest accepted budget: the vertex count after 14 rounds. It maps to
/// 13 rounds, and the count recurrence stays within a 32-bit `usize`.
pub const MAX_VERTEX_BUDGET: usize = 2_684_354_562;

/// Predicted (vertices, edges, faces) after each round, starting at the seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshCounts {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
}

impl MeshCounts {
    pub const SEED: MeshCounts = MeshCounts {
        vertices: ICOSAHEDRON_VERTICES,
        edges: ICOSAHEDRON_EDGES,
        faces: ICOSAHEDRON_FACES,
    };

    /// Counts after one more round: each edge gains a vertex and splits in
    /// two, each face gains three inner edges and splits in four.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            vertices: self.vertices + self.edges,
            edges: self.edges * 2 + self.faces * 3,
            faces: self.faces * 4,
        }
    }

    /// Counts after `rounds` rounds
    pub fn after(rounds: u32) -> Self {
        (0..rounds).fold(Self::SEED, |counts, _| counts.next())
    }
}

pub(crate) fn check_budget(vertex_budget: usize) -> Result<()> {
    if vertex_budget > MAX_VERTEX_BUDGET {
        return Err(Error::invalid(format!(
            "vertex budget {} exceeds the maximum of {}",
            vertex_budget, MAX_VERTEX_BUDGET
        )));
    }
    Ok(())
}

/// Number of rounds needed for `vertex_budget`, found by running the count
/// recurrence instead of subdividing.
///
/// Stops at the first round where `vertices + edges` (the vertex count the
/// next round would produce) reaches the budget. A budget at or below the
/// seed size gives zero rounds.
pub fn subdivision_depth(vertex_budget: usize) -> Result<u32> {
    check_budget(vertex_budget)?;

    let mut counts = MeshCounts::SEED;
    let mut depth = 0;
    while counts.vertices + counts.edges < vertex_budget {
        counts = counts.next();
        depth += 1;
    }
    Ok(depth)
}

/// Splits edges into shared midpoints for a single subdivision round
struct MidpointCache {
    cache: FxHashMap<(u32, u32), u32>,
    radius: f64,
}

impl MidpointCache {
    fn with_capacity(edges: usize, radius: f64) -> Self {
        let mut cache = FxHashMap::default();
        cache.reserve(edges);
        Self { cache, radius }
    }

    /// Index of the midpoint of (a, b), creating it on first request
    fn midpoint(&mut self, mesh: &mut IndexedMesh, a: u32, b: u32) -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&index) = self.cache.get(&key) {
            return index;
        }

        let mid = (mesh.vertices[a as usize] + mesh.vertices[b as usize]) * 0.5;
        let index = mesh.add_vertex(normalize_or_zero(&mid) * self.radius);
        self.cache.insert(key, index);
        index
    }
}

/// Run `rounds` rounds of four-way face splitting in place.
///
/// New vertices are appended after the existing ones; faces are replaced.
/// Winding order of every child face follows its parent.
pub fn subdivide(mesh: &mut IndexedMesh, rounds: u32) {
    let radius = seed_radius();

    for _ in 0..rounds {
        let face_count = mesh.faces.len();
        // Euler on a closed triangle mesh: E = 3F / 2
        let edge_count = face_count * 3 / 2;
        let mut midpoints = MidpointCache::with_capacity(edge_count, radius);

        mesh.vertices.reserve(edge_count);
        let old_faces = std::mem::replace(&mut mesh.faces, Vec::with_capacity(face_count * 4));

        for [a, b, c] in old_faces {
            let ab = midpoints.midpoint(mesh, a, b);
            let bc = midpoints.midpoint(mesh, b, c);
            let ca = midpoints.midpoint(mesh, c, a);

            mesh.add_face(a, ab, ca);
            mesh.add_face(b, bc, ab);
            mesh.add_face(c, ca, bc);
            mesh.add_face(ab, bc, ca);
        }
    }
}

/// Icosphere sized for `vertex_budget`
pub fn icosphere(vertex_budget: usize) -> Result<IndexedMesh> {
    let depth = subdivision_depth(vertex_budget)?;
    Ok(icosphere_with_depth(depth))
}

/// Icosphere after exactly `depth` rounds
pub fn icosphere_with_depth(depth: u32) -> IndexedMesh {
    let mut mesh = icosahedron();
    subdivide(&mut mesh, depth);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn closed_form_vertices(k: u32) -> usize {
        12 + 30 * (4usize.pow(k) - 1) / 3
    }

    #[test]
    fn test_counts_match_closed_form() {
        for k in 0..=4 {
            let mesh = icosphere_with_depth(k);
            assert_eq!(mesh.vertex_count(), closed_form_vertices(k), "round {}", k);
            assert_eq!(mesh.face_count(), 20 * 4usize.pow(k), "round {}", k);

            let predicted = MeshCounts::after(k);
            assert_eq!(predicted.vertices, mesh.vertex_count());
            assert_eq!(predicted.faces, mesh.face_count());
        }
    }

    #[test]
    fn test_depth_from_budget() {
        // 12 + 30 >= 20: no rounds needed
        assert_eq!(subdivision_depth(20).unwrap(), 0);
        assert_eq!(subdivision_depth(42).unwrap(), 0);
        assert_eq!(subdivision_depth(43).unwrap(), 1);
        assert_eq!(subdivision_depth(162).unwrap(), 1);
        assert_eq!(subdivision_depth(163).unwrap(), 2);
    }

    #[test]
    fn test_small_budget_returns_seed() {
        for budget in [0, 1, 11, 12] {
            let mesh = icosphere(budget).unwrap();
            assert_eq!(mesh, icosahedron());
        }
    }

    #[test]
    fn test_budget_overflow_rejected() {
        assert!(matches!(
            subdivision_depth(MAX_VERTEX_BUDGET + 1),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(subdivision_depth(MAX_VERTEX_BUDGET).unwrap(), 13);
    }

    #[test]
    fn test_midpoints_on_seed_sphere() {
        let radius = seed_radius();
        for v in &icosphere_with_depth(3).vertices {
            assert_relative_eq!(v.norm(), radius, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_shared_edges_produce_one_midpoint() {
        let mesh = icosphere_with_depth(3);
        let mut keys: Vec<(i64, i64, i64)> = mesh
            .vertices
            .iter()
            .map(|v| {
                (
                    (v.x * 1e6).round() as i64,
                    (v.y * 1e6).round() as i64,
                    (v.z * 1e6).round() as i64,
                )
            })
            .collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), mesh.vertex_count());
    }

    #[test]
    fn test_every_edge_shared_by_two_faces() {
        let mesh = icosphere_with_depth(2);
        let mut edge_uses: FxHashMap<(u32, u32), usize> = FxHashMap::default();
        for face in &mesh.faces {
            for k in 0..3 {
                let (a, b) = (face[k], face[(k + 1) % 3]);
                *edge_uses.entry((a.min(b), a.max(b))).or_default() += 1;
            }
        }
        assert_eq!(edge_uses.len(), MeshCounts::after(2).edges);
        assert!(edge_uses.values().all(|&n| n == 2));
    }

    #[test]
    fn test_winding_preserved() {
        let mesh = icosphere_with_depth(2);
        for face in &mesh.faces {
            let [a, b, c] = mesh.face_vertices(face);
            let normal = (a - b).cross(&(a - c));
            assert!(normal.dot(&(a + b + c)) > 0.0);
        }
    }
}
