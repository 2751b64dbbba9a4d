//! Common test fixtures for reception map tests.
//!
//! This module provides pre-defined test data that represents common
//! scenarios: a small regional base map, a handful of operators, and
//! reception reports between them.

use reception_common::{GeoCoordinate, ProjectedBounds};

/// Common map extents for testing, as (northwest, southeast) `(lat, lon)` corners.
pub mod bounds {
    /// Puget Sound region, roughly 45 km square, inside UTM zone 10
    pub const PUGET_SOUND: ((f64, f64), (f64, f64)) = ((47.8, -122.6), (47.4, -122.0));

    /// A map straddling the UTM zone 10/11 boundary at 120°W
    pub const ZONE_BOUNDARY: ((f64, f64), (f64, f64)) = ((47.5, -120.5), (47.0, -119.5));

    /// Southern hemisphere map (Sydney)
    pub const SYDNEY: ((f64, f64), (f64, f64)) = ((-33.7, 151.0), (-34.0, 151.4));
}

/// Build `ProjectedBounds` from one of the `bounds` constants.
pub fn projected_bounds(corners: ((f64, f64), (f64, f64))) -> ProjectedBounds {
    let ((nw_lat, nw_lon), (se_lat, se_lon)) = corners;
    ProjectedBounds::new(
        GeoCoordinate::new(nw_lat, nw_lon),
        GeoCoordinate::new(se_lat, se_lon),
    )
    .expect("fixture bounds are valid")
}

/// Common CSV inputs for testing.
pub mod csv {
    /// Operators inside the `PUGET_SOUND` bounds.
    ///
    /// CHARLIE has every optional attribute unknown.
    pub const OPERATORS: &str = "\
ALFA,47.6,-122.3,50,Vertical,2.5,30
BRAVO,47.7,-122.5,5,,-100,-100
charlie ,47.5,-122.1,-100,,-100,-100
DELTA,47.45,-122.2,100,Yagi,9.5,45
";

    /// Reports in file order: receiver, transmitter, category.
    pub const REPORTS: &str = "\
BRAVO,ALFA,good
CHARLIE,ALFA,fair
ALFA,BRAVO,poor
DELTA,BRAVO,good
";
}

/// Common category names for testing.
pub mod categories {
    pub const GOOD: &str = "good";
    pub const FAIR: &str = "fair";
    pub const POOR: &str = "poor";
    pub const TRANSMITTER: &str = "transmitter";
    pub const NO_REPORT: &str = "noreport";
}
