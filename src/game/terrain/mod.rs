//! Terrain Module
//!
//! Terrain geometry and the spatial query index. The asset loader hands the
//! simulation a [`TerrainMesh`] (vertex list + triangle index list) once per
//! map; [`TerrainIndex::build`] buckets its triangles into a grid so the
//! per-frame height and normal queries stay cheap.

pub mod mesh;
pub mod spatial_index;

pub use mesh::{TerrainMesh, generate_arena_mesh};
pub use spatial_index::{
    BuildReport, HEIGHT_SENTINEL, TERRAIN_CELL_SIZE, TERRAIN_QUERY_RADIUS, TerrainIndex, Triangle,
};
