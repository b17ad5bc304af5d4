//! Mandelmesh Geometry
//!
//! Fractal surface extraction on a fixed-topology sphere mesh: an
//! icosahedron is subdivided to a vertex budget, then every vertex is moved
//! along its radial ray onto the boundary of an iterated Mandelbulb power
//! map. Math uses nalgebra; flat f32 buffers come out for the renderer.

pub mod edge_locator;
pub mod error;
pub mod icosahedron;
pub mod icosphere;
pub mod mesh;
pub mod normals;
pub mod params;
pub mod power_map;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use edge_locator::{locate_edge, locate_edge_strict, EdgeSearch};
pub use error::{Error, Result};
pub use icosahedron::{icosahedron, seed_radius};
pub use icosphere::{icosphere, icosphere_with_depth, subdivide, subdivision_depth, MeshCounts};
pub use mesh::{flatten, normalize_or_zero, Face, FlatMesh, IndexedMesh};
pub use normals::{face_normal, sphere_normals, vertex_normals};
pub use params::{FractalParams, MeshParams, NormalWeighting};
pub use power_map::{escape_magnitude, iterate, power_map};
