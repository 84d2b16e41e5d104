//! Terrain Mesh
//!
//! Plain triangle-soup terrain geometry: a vertex list plus a flat triangle
//! index list, exactly the shape an asset loader produces. Also provides a
//! procedural generator that builds a rolling arena floor from value noise,
//! used by the skirmish binary and the test suites.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::game::types::noise_2d;

/// Terrain geometry as handed to the simulation by the asset loader.
///
/// `indices` is a flat list of vertex indices, three per triangle. The mesh
/// is not validated here — [`super::TerrainIndex::build`] skips malformed
/// triangles with a warning instead of rejecting the whole mesh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainMesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Create a mesh from raw geometry.
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Parse a mesh from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of complete triangles described by the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate a rolling arena floor centered on the origin.
///
/// The floor spans `[-half_extent, +half_extent]` on X and Z with
/// `quads_per_side` quads (two triangles each) per axis. Heights come from
/// value noise sampled at `noise_scale` cells across the arena and scaled to
/// `height_scale` meters.
pub fn generate_arena_mesh(
    half_extent: f32,
    quads_per_side: u32,
    height_scale: f32,
    noise_scale: f32,
) -> TerrainMesh {
    let verts_per_side = quads_per_side + 1;
    let step = (half_extent * 2.0) / quads_per_side as f32;

    let mut vertices = Vec::with_capacity((verts_per_side * verts_per_side) as usize);
    for iz in 0..verts_per_side {
        for ix in 0..verts_per_side {
            let x = -half_extent + ix as f32 * step;
            let z = -half_extent + iz as f32 * step;
            let nx = (x + half_extent) / (half_extent * 2.0) * noise_scale;
            let nz = (z + half_extent) / (half_extent * 2.0) * noise_scale;
            let y = noise_2d(nx, nz) * height_scale;
            vertices.push(Vec3::new(x, y, z));
        }
    }

    let mut indices = Vec::with_capacity((quads_per_side * quads_per_side * 6) as usize);
    for iz in 0..quads_per_side {
        for ix in 0..quads_per_side {
            let i0 = iz * verts_per_side + ix;
            let i1 = i0 + 1;
            let i2 = i0 + verts_per_side;
            let i3 = i2 + 1;

            indices.extend_from_slice(&[i0, i2, i1]);
            indices.extend_from_slice(&[i1, i2, i3]);
        }
    }

    TerrainMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_mesh_counts() {
        let mesh = generate_arena_mesh(50.0, 8, 10.0, 4.0);
        assert_eq!(mesh.vertices.len(), 81);
        assert_eq!(mesh.triangle_count(), 128);
    }

    #[test]
    fn test_generated_mesh_spans_arena() {
        let mesh = generate_arena_mesh(50.0, 8, 10.0, 4.0);
        let min_x = mesh.vertices.iter().map(|v| v.x).fold(f32::MAX, f32::min);
        let max_x = mesh.vertices.iter().map(|v| v.x).fold(f32::MIN, f32::max);
        assert_eq!(min_x, -50.0);
        assert_eq!(max_x, 50.0);
    }

    #[test]
    fn test_heights_within_scale() {
        let mesh = generate_arena_mesh(50.0, 8, 10.0, 4.0);
        for v in &mesh.vertices {
            assert!((0.0..=10.0).contains(&v.y), "height out of range: {}", v.y);
        }
    }

    #[test]
    fn test_json_round_trip() {
        let mesh = generate_arena_mesh(10.0, 2, 5.0, 2.0);
        let json = serde_json::to_string(&mesh).expect("serialize");
        let back = TerrainMesh::from_json(&json).expect("deserialize");
        assert_eq!(back.vertices.len(), mesh.vertices.len());
        assert_eq!(back.indices, mesh.indices);
    }
}
