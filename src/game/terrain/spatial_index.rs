//! Spatial Terrain Index
//!
//! Grid-bucketed triangle set answering the per-frame height and normal
//! queries. Triangles are inserted into every grid cell their AABB overlaps,
//! so a query only has to visit the handful of cells around its window
//! instead of the whole mesh.
//!
//! The index is the one structure in the core that may be read from outside
//! the update thread (a renderer sampling heights for debug display), so the
//! grid sits behind a [`RwLock`]: queries take read locks and run
//! concurrently, a rebuild takes the write lock and excludes all readers.

use std::collections::HashMap;
use std::sync::RwLock;

use glam::{Vec2, Vec3};
use log::warn;

use crate::physics::collision::{point_in_triangle_xz, ray_triangle_intersect};

/// Grid cell edge length (meters).
pub const TERRAIN_CELL_SIZE: f32 = 0.8;

/// Half-width of the query window around a sample point (meters).
///
/// Queries examine every cell overlapping this window rather than the single
/// containing cell, which tolerates triangles spanning cell boundaries.
pub const TERRAIN_QUERY_RADIUS: f32 = 0.8;

/// Height returned when no triangle lies under the query point.
pub const HEIGHT_SENTINEL: f32 = -1000.0;

/// Altitude the downward height-query ray is cast from.
const RAY_ORIGIN_HEIGHT: f32 = 1000.0;

/// Edge tolerance for the XZ point-in-triangle test.
const NORMAL_QUERY_EPSILON: f32 = 0.001;

/// A terrain triangle with its precomputed face normal.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub normal: Vec3,
}

/// Statistics from a grid build, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Triangles inserted into the grid.
    pub accepted: usize,
    /// Triangles dropped for invalid vertex indices or degenerate geometry.
    pub skipped: usize,
    /// Trailing indices that did not form a complete triangle.
    pub dangling_indices: usize,
}

/// The grid itself; only ever touched through the index's lock.
struct Grid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<Triangle>>,
}

impl Grid {
    fn build(mesh: &super::TerrainMesh, cell_size: f32) -> (Self, BuildReport) {
        let mut grid = Self {
            cell_size,
            cells: HashMap::new(),
        };
        let mut report = BuildReport::default();

        let whole_triangles = mesh.indices.len() / 3;
        report.dangling_indices = mesh.indices.len() - whole_triangles * 3;
        if report.dangling_indices != 0 {
            warn!(
                "terrain mesh has incomplete triangle data ({} indices); dropping the remainder",
                mesh.indices.len()
            );
        }

        for tri_index in 0..whole_triangles {
            let i = tri_index * 3;
            let (i0, i1, i2) = (
                mesh.indices[i] as usize,
                mesh.indices[i + 1] as usize,
                mesh.indices[i + 2] as usize,
            );

            if i0 >= mesh.vertices.len() || i1 >= mesh.vertices.len() || i2 >= mesh.vertices.len()
            {
                warn!("invalid vertex index in triangle {}, skipping", tri_index);
                report.skipped += 1;
                continue;
            }

            let v0 = mesh.vertices[i0];
            let v1 = mesh.vertices[i1];
            let v2 = mesh.vertices[i2];

            let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
            if normal == Vec3::ZERO {
                warn!("degenerate triangle {}, skipping", tri_index);
                report.skipped += 1;
                continue;
            }

            let tri = Triangle { v0, v1, v2, normal };

            let min = v0.min(v1.min(v2));
            let max = v0.max(v1.max(v2));

            let start_x = (min.x / cell_size).floor() as i32;
            let end_x = (max.x / cell_size).ceil() as i32;
            let start_z = (min.z / cell_size).floor() as i32;
            let end_z = (max.z / cell_size).ceil() as i32;

            for x in start_x..=end_x {
                for z in start_z..=end_z {
                    grid.cells.entry((x, z)).or_default().push(tri);
                }
            }
            report.accepted += 1;
        }

        (grid, report)
    }

    /// Inclusive cell range covering the query window around (x, z).
    fn window(&self, x: f32, z: f32) -> (i32, i32, i32, i32) {
        let min_x = ((x - TERRAIN_QUERY_RADIUS) / self.cell_size).floor() as i32;
        let max_x = ((x + TERRAIN_QUERY_RADIUS) / self.cell_size).ceil() as i32;
        let min_z = ((z - TERRAIN_QUERY_RADIUS) / self.cell_size).floor() as i32;
        let max_z = ((z + TERRAIN_QUERY_RADIUS) / self.cell_size).ceil() as i32;
        (min_x, max_x, min_z, max_z)
    }

    fn height_at(&self, x: f32, z: f32) -> f32 {
        let origin = Vec3::new(x, RAY_ORIGIN_HEIGHT, z);
        let (min_x, max_x, min_z, max_z) = self.window(x, z);

        let mut best = f32::NEG_INFINITY;
        for gx in min_x..=max_x {
            for gz in min_z..=max_z {
                let Some(bucket) = self.cells.get(&(gx, gz)) else {
                    continue;
                };
                for tri in bucket {
                    if let Some(t) =
                        ray_triangle_intersect(origin, Vec3::NEG_Y, tri.v0, tri.v1, tri.v2)
                    {
                        best = best.max(origin.y - t);
                    }
                }
            }
        }

        if best > f32::NEG_INFINITY {
            best
        } else {
            HEIGHT_SENTINEL
        }
    }

    fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        let point = Vec2::new(x, z);
        let (min_x, max_x, min_z, max_z) = self.window(x, z);

        for gx in min_x..=max_x {
            for gz in min_z..=max_z {
                let Some(bucket) = self.cells.get(&(gx, gz)) else {
                    continue;
                };
                for tri in bucket {
                    if point_in_triangle_xz(point, tri.v0, tri.v1, tri.v2, NORMAL_QUERY_EPSILON) {
                        return tri.normal;
                    }
                }
            }
        }
        Vec3::Y
    }

    fn triangle_count(&self) -> usize {
        // Triangles spanning several cells are counted once per cell; callers
        // wanting the accepted count use the build report instead.
        self.cells.values().map(Vec::len).sum()
    }
}

/// Grid-bucketed terrain triangle index.
///
/// Built once per map load from a [`super::TerrainMesh`]; malformed
/// triangles are skipped with a warning rather than failing the load.
pub struct TerrainIndex {
    grid: RwLock<Grid>,
}

impl TerrainIndex {
    /// Build the index from a mesh.
    pub fn build(mesh: &super::TerrainMesh) -> (Self, BuildReport) {
        let (grid, report) = Grid::build(mesh, TERRAIN_CELL_SIZE);
        (
            Self {
                grid: RwLock::new(grid),
            },
            report,
        )
    }

    /// Replace the whole grid with one built from a new mesh.
    ///
    /// Takes the write lock, so in-flight queries finish first and no query
    /// ever observes a half-built grid.
    pub fn rebuild(&self, mesh: &super::TerrainMesh) -> BuildReport {
        let (grid, report) = Grid::build(mesh, TERRAIN_CELL_SIZE);
        *self.grid.write().expect("terrain index lock poisoned") = grid;
        report
    }

    /// Terrain height below (x, z): the highest intersection of a downward
    /// ray against every triangle in the query window, or
    /// [`HEIGHT_SENTINEL`] when nothing is hit.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.grid
            .read()
            .expect("terrain index lock poisoned")
            .height_at(x, z)
    }

    /// Face normal of the first triangle whose XZ projection contains
    /// (x, z), or `Vec3::Y` when none matches. An approximation: the
    /// matched triangle is not guaranteed to be the one `height_at` would
    /// report for the same point.
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        self.grid
            .read()
            .expect("terrain index lock poisoned")
            .normal_at(x, z)
    }

    /// Total triangle references held across all cells.
    pub fn triangle_count(&self) -> usize {
        self.grid
            .read()
            .expect("terrain index lock poisoned")
            .triangle_count()
    }

    /// Number of occupied grid cells.
    pub fn cell_count(&self) -> usize {
        self.grid
            .read()
            .expect("terrain index lock poisoned")
            .cells
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::terrain::TerrainMesh;

    /// One flat quad at y = 5 spanning [-10, 10]².
    fn flat_quad() -> TerrainMesh {
        TerrainMesh::new(
            vec![
                Vec3::new(-10.0, 5.0, -10.0),
                Vec3::new(10.0, 5.0, -10.0),
                Vec3::new(-10.0, 5.0, 10.0),
                Vec3::new(10.0, 5.0, 10.0),
            ],
            vec![0, 2, 1, 1, 2, 3],
        )
    }

    #[test]
    fn test_build_accepts_valid_triangles() {
        let (_, report) = TerrainIndex::build(&flat_quad());
        assert_eq!(report.accepted, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.dangling_indices, 0);
    }

    #[test]
    fn test_height_on_flat_quad() {
        let (index, _) = TerrainIndex::build(&flat_quad());
        let h = index.height_at(0.0, 0.0);
        assert!((h - 5.0).abs() < 1e-3, "expected 5.0, got {}", h);
    }

    #[test]
    fn test_sentinel_outside_geometry() {
        let (index, _) = TerrainIndex::build(&flat_quad());
        assert_eq!(index.height_at(500.0, 500.0), HEIGHT_SENTINEL);
    }

    #[test]
    fn test_normal_on_flat_quad() {
        let (index, _) = TerrainIndex::build(&flat_quad());
        let n = index.normal_at(0.0, 0.0);
        assert!((n - Vec3::Y).length() < 1e-3, "expected up, got {:?}", n);
    }

    #[test]
    fn test_normal_fallback_outside_geometry() {
        let (index, _) = TerrainIndex::build(&flat_quad());
        assert_eq!(index.normal_at(500.0, 500.0), Vec3::Y);
    }

    #[test]
    fn test_out_of_range_index_skipped() {
        let mut mesh = flat_quad();
        mesh.indices.extend_from_slice(&[0, 1, 99]);
        let (index, report) = TerrainIndex::build(&mesh);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.skipped, 1);
        // The valid geometry still answers queries
        assert!((index.height_at(0.0, 0.0) - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_dangling_indices_dropped() {
        let mut mesh = flat_quad();
        mesh.indices.extend_from_slice(&[0, 1]);
        let (_, report) = TerrainIndex::build(&mesh);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.dangling_indices, 2);
    }

    #[test]
    fn test_degenerate_triangle_skipped() {
        let mesh = TerrainMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
            ],
            vec![0, 1, 2],
        );
        let (_, report) = TerrainIndex::build(&mesh);
        assert_eq!(report.accepted, 0);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_rebuild_replaces_geometry() {
        let (index, _) = TerrainIndex::build(&flat_quad());
        assert!((index.height_at(0.0, 0.0) - 5.0).abs() < 1e-3);

        let mut raised = flat_quad();
        for v in &mut raised.vertices {
            v.y = 12.0;
        }
        index.rebuild(&raised);
        assert!((index.height_at(0.0, 0.0) - 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_query_idempotent() {
        let (index, _) = TerrainIndex::build(&flat_quad());
        let a = index.height_at(3.3, -4.4);
        let b = index.height_at(3.3, -4.4);
        assert_eq!(a, b);
        assert_eq!(index.normal_at(3.3, -4.4), index.normal_at(3.3, -4.4));
    }
}
