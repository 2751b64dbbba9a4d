//! Tests for the base map projector.
//!
//! Covers corner placement, monotonicity across the map, and maps that
//! straddle a UTM zone boundary or lie in the southern hemisphere.

use projection::Projector;
use reception_common::{GeoCoordinate, PixelPoint};
use test_utils::{bounds, projected_bounds};

// ============================================================================
// Helper functions
// ============================================================================

/// Evenly spaced coordinates across the bounds, `steps` per axis.
fn sample_grid(nw: GeoCoordinate, se: GeoCoordinate, steps: usize) -> Vec<Vec<GeoCoordinate>> {
    (0..=steps)
        .map(|row| {
            let lat = nw.lat - (nw.lat - se.lat) * row as f64 / steps as f64;
            (0..=steps)
                .map(|col| {
                    let lon = nw.lon + (se.lon - nw.lon) * col as f64 / steps as f64;
                    GeoCoordinate::new(lat, lon)
                })
                .collect()
        })
        .collect()
}

// ============================================================================
// Corner tests
// ============================================================================

#[test]
fn test_corners_for_all_fixture_maps() {
    for corners in [bounds::PUGET_SOUND, bounds::ZONE_BOUNDARY, bounds::SYDNEY] {
        let map = projected_bounds(corners);
        let proj = Projector::new(&map, 640, 480).unwrap();

        assert_eq!(proj.project(map.nw()).unwrap(), PixelPoint::new(0, 0));

        let se = proj.project(map.se()).unwrap();
        assert!((se.x - 640).abs() <= 1, "{:?}: se.x = {}", corners, se.x);
        assert!((se.y - 480).abs() <= 1, "{:?}: se.y = {}", corners, se.y);
    }
}

#[test]
fn test_center_lands_near_image_center() {
    let map = projected_bounds(bounds::PUGET_SOUND);
    let proj = Projector::new(&map, 1000, 1000).unwrap();

    let center = proj.project(map.center()).unwrap();
    // UTM grid is slightly rotated against meridians, so allow a few pixels
    assert!((center.x - 500).abs() <= 10, "center.x = {}", center.x);
    assert!((center.y - 500).abs() <= 10, "center.y = {}", center.y);
}

// ============================================================================
// Monotonicity tests
// ============================================================================

#[test]
fn test_increasing_longitude_increases_x() {
    for corners in [bounds::PUGET_SOUND, bounds::ZONE_BOUNDARY, bounds::SYDNEY] {
        let map = projected_bounds(corners);
        let proj = Projector::new(&map, 800, 800).unwrap();

        for row in sample_grid(map.nw(), map.se(), 20) {
            let xs: Vec<i32> = row.iter().map(|c| proj.project(*c).unwrap().x).collect();
            for pair in xs.windows(2) {
                assert!(pair[1] > pair[0], "{:?}: x not increasing: {:?}", corners, xs);
            }
        }
    }
}

#[test]
fn test_increasing_latitude_decreases_y() {
    for corners in [bounds::PUGET_SOUND, bounds::ZONE_BOUNDARY, bounds::SYDNEY] {
        let map = projected_bounds(corners);
        let proj = Projector::new(&map, 800, 800).unwrap();
        let grid = sample_grid(map.nw(), map.se(), 20);

        // Rows run north to south, so y must increase down each column
        for col in 0..grid[0].len() {
            let ys: Vec<i32> = grid.iter().map(|row| proj.project(row[col]).unwrap().y).collect();
            for pair in ys.windows(2) {
                assert!(pair[1] > pair[0], "{:?}: y not increasing southward: {:?}", corners, ys);
            }
        }
    }
}

// ============================================================================
// Error handling tests
// ============================================================================

#[test]
fn test_out_of_domain_query_fails() {
    let map = projected_bounds(bounds::PUGET_SOUND);
    let proj = Projector::new(&map, 100, 100).unwrap();

    assert!(proj.project(GeoCoordinate::new(89.0, -122.3)).is_err());
    assert!(proj.project(GeoCoordinate::new(f64::NAN, -122.3)).is_err());
}

#[test]
fn test_points_outside_map_project_outside_image() {
    let map = projected_bounds(bounds::PUGET_SOUND);
    let proj = Projector::new(&map, 100, 100).unwrap();

    let north = proj.project(GeoCoordinate::new(48.2, -122.3)).unwrap();
    assert!(north.y < 0);

    let east = proj.project(GeoCoordinate::new(47.6, -121.5)).unwrap();
    assert!(east.x > 100);
}
