//! Terrain Index Tests - Build, Queries, Sentinels, and Concurrency
//!
//! Integration tests for the spatial terrain index: triangle retrievability,
//! height/normal query semantics, malformed-geometry tolerance, and the
//! reader/rebuild locking discipline.

use glam::Vec3;
use nova_arena_engine::game::terrain::{
    HEIGHT_SENTINEL, TerrainIndex, TerrainMesh, generate_arena_mesh,
};

/// One flat quad spanning [-half, +half]² at the given height.
fn flat_quad(half: f32, height: f32) -> TerrainMesh {
    TerrainMesh::new(
        vec![
            Vec3::new(-half, height, -half),
            Vec3::new(half, height, -half),
            Vec3::new(-half, height, half),
            Vec3::new(half, height, half),
        ],
        vec![0, 2, 1, 1, 2, 3],
    )
}

// ============================================================================
// Height Queries
// ============================================================================

#[test]
fn test_height_above_flat_quad() {
    let (index, report) = TerrainIndex::build(&flat_quad(10.0, 5.0));
    assert_eq!(report.accepted, 2);

    for (x, z) in [(0.0, 0.0), (3.3, -4.4), (-9.0, 9.0)] {
        let h = index.height_at(x, z);
        assert!((h - 5.0).abs() < 1e-3, "height at ({x}, {z}) was {h}");
    }
}

#[test]
fn test_sentinel_when_no_geometry_below() {
    let (index, _) = TerrainIndex::build(&flat_quad(10.0, 5.0));
    assert_eq!(index.height_at(100.0, 100.0), HEIGHT_SENTINEL);
}

#[test]
fn test_every_triangle_is_retrievable() {
    // Every accepted triangle must answer a height query directly above its
    // interior - no triangle may fall between grid cells.
    let mesh = generate_arena_mesh(50.0, 16, 8.0, 4.0);
    let (index, report) = TerrainIndex::build(&mesh);
    assert_eq!(report.accepted, mesh.triangle_count());
    assert_eq!(report.skipped, 0);

    for tri in 0..mesh.triangle_count() {
        let i = tri * 3;
        let v0 = mesh.vertices[mesh.indices[i] as usize];
        let v1 = mesh.vertices[mesh.indices[i + 1] as usize];
        let v2 = mesh.vertices[mesh.indices[i + 2] as usize];
        let centroid = (v0 + v1 + v2) / 3.0;

        let h = index.height_at(centroid.x, centroid.z);
        assert!(
            h != HEIGHT_SENTINEL,
            "triangle {tri} centroid ({}, {}) hit the sentinel",
            centroid.x,
            centroid.z
        );
        assert!(
            (-0.1..=8.1).contains(&h),
            "triangle {tri} height {h} outside the mesh's height range"
        );
    }
}

#[test]
fn test_max_height_wins_with_overlapping_geometry() {
    // Two stacked quads: the query must return the higher surface.
    let mut mesh = flat_quad(10.0, 5.0);
    let upper = flat_quad(10.0, 9.0);
    let base = mesh.vertices.len() as u32;
    mesh.vertices.extend(upper.vertices);
    mesh.indices.extend(upper.indices.iter().map(|i| i + base));

    let (index, _) = TerrainIndex::build(&mesh);
    let h = index.height_at(0.0, 0.0);
    assert!((h - 9.0).abs() < 1e-3, "expected the upper quad, got {h}");
}

// ============================================================================
// Normal Queries
// ============================================================================

#[test]
fn test_normal_on_flat_ground_points_up() {
    let (index, _) = TerrainIndex::build(&flat_quad(10.0, 5.0));
    let n = index.normal_at(1.0, 1.0);
    assert!((n - Vec3::Y).length() < 1e-3, "normal was {n:?}");
}

#[test]
fn test_normal_on_slope() {
    // 45-degree ramp rising toward +Z, wound for an upward-facing normal
    let mesh = TerrainMesh::new(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 10.0),
        ],
        vec![0, 2, 1],
    );
    let (index, _) = TerrainIndex::build(&mesh);

    let n = index.normal_at(2.0, 2.0);
    let expected = Vec3::new(0.0, 1.0, -1.0).normalize();
    assert!((n - expected).length() < 1e-3, "normal was {n:?}");

    // Height on the ramp follows y = z
    let h = index.height_at(2.0, 2.0);
    assert!((h - 2.0).abs() < 1e-3, "ramp height was {h}");
}

#[test]
fn test_normal_fallback_is_up() {
    let (index, _) = TerrainIndex::build(&flat_quad(10.0, 5.0));
    assert_eq!(index.normal_at(500.0, 500.0), Vec3::Y);
}

// ============================================================================
// Malformed Geometry
// ============================================================================

#[test]
fn test_bad_indices_skipped_not_fatal() {
    let mut mesh = flat_quad(10.0, 5.0);
    // One triangle with an out-of-range vertex, plus a dangling pair
    mesh.indices.extend_from_slice(&[0, 1, 999]);
    mesh.indices.extend_from_slice(&[2, 3]);

    let (index, report) = TerrainIndex::build(&mesh);
    assert_eq!(report.accepted, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.dangling_indices, 2);

    // Valid geometry still answers
    assert!((index.height_at(0.0, 0.0) - 5.0).abs() < 1e-3);
}

// ============================================================================
// Idempotence and Rebuild
// ============================================================================

#[test]
fn test_queries_idempotent_between_rebuilds() {
    let mesh = generate_arena_mesh(30.0, 8, 6.0, 3.0);
    let (index, _) = TerrainIndex::build(&mesh);

    for (x, z) in [(0.0, 0.0), (12.5, -7.25), (-29.0, 29.0)] {
        assert_eq!(index.height_at(x, z), index.height_at(x, z));
        assert_eq!(index.normal_at(x, z), index.normal_at(x, z));
    }
}

#[test]
fn test_rebuild_swaps_geometry_atomically() {
    let (index, _) = TerrainIndex::build(&flat_quad(10.0, 5.0));
    assert!((index.height_at(0.0, 0.0) - 5.0).abs() < 1e-3);

    index.rebuild(&flat_quad(10.0, 12.0));
    assert!((index.height_at(0.0, 0.0) - 12.0).abs() < 1e-3);
}

#[test]
fn test_concurrent_readers_during_rebuild() {
    // Readers may run while rebuilds swap between two known surfaces; every
    // observed height must belong to one of them, never a half-built grid.
    let (index, _) = TerrainIndex::build(&flat_quad(10.0, 5.0));

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..500 {
                    let h = index.height_at(0.0, 0.0);
                    assert!(
                        (h - 5.0).abs() < 1e-3 || (h - 12.0).abs() < 1e-3,
                        "reader observed height {h}"
                    );
                }
            });
        }

        for _ in 0..25 {
            index.rebuild(&flat_quad(10.0, 12.0));
            index.rebuild(&flat_quad(10.0, 5.0));
        }
    });
}
