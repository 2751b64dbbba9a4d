//! Geographic coordinates, map bounds, and pixel positions.

use serde::{Deserialize, Serialize};

use crate::error::{ReceptionError, ReceptionResult};

/// A latitude/longitude pair in decimal degrees.
///
/// Serialized as a two element `[lat, lon]` list, which is how map corners
/// are written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that both components are finite and within their geodetic ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Midpoint between two coordinates (component-wise).
    pub fn midpoint(&self, other: &GeoCoordinate) -> GeoCoordinate {
        GeoCoordinate {
            lat: (self.lat + other.lat) / 2.0,
            lon: (self.lon + other.lon) / 2.0,
        }
    }
}

impl From<[f64; 2]> for GeoCoordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoCoordinate> for [f64; 2] {
    fn from(coord: GeoCoordinate) -> Self {
        [coord.lat, coord.lon]
    }
}

/// The geographic extent of the base map image.
///
/// The northwest corner maps to the image's top-left pixel and the
/// southeast corner to its bottom-right pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedBounds {
    nw: GeoCoordinate,
    se: GeoCoordinate,
}

impl ProjectedBounds {
    /// Create bounds from the two map corners.
    ///
    /// The northwest corner must lie strictly north and west of the
    /// southeast corner.
    pub fn new(nw: GeoCoordinate, se: GeoCoordinate) -> ReceptionResult<Self> {
        if !nw.is_valid() {
            return Err(ReceptionError::InvalidBounds(format!(
                "northwest corner ({}, {}) is not a valid coordinate",
                nw.lat, nw.lon
            )));
        }
        if !se.is_valid() {
            return Err(ReceptionError::InvalidBounds(format!(
                "southeast corner ({}, {}) is not a valid coordinate",
                se.lat, se.lon
            )));
        }
        if nw.lat <= se.lat {
            return Err(ReceptionError::InvalidBounds(format!(
                "northwest latitude {} must be greater than southeast latitude {}",
                nw.lat, se.lat
            )));
        }
        if nw.lon >= se.lon {
            return Err(ReceptionError::InvalidBounds(format!(
                "northwest longitude {} must be less than southeast longitude {}",
                nw.lon, se.lon
            )));
        }

        Ok(Self { nw, se })
    }

    pub fn nw(&self) -> GeoCoordinate {
        self.nw
    }

    pub fn se(&self) -> GeoCoordinate {
        self.se
    }

    pub fn center(&self) -> GeoCoordinate {
        self.nw.midpoint(&self.se)
    }

    /// Check if a coordinate falls inside the bounds (edges inclusive).
    pub fn contains(&self, coord: &GeoCoordinate) -> bool {
        coord.lat <= self.nw.lat
            && coord.lat >= self.se.lat
            && coord.lon >= self.nw.lon
            && coord.lon <= self.se.lon
    }
}

/// An integer pixel position; y increases downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> PixelPoint {
        PixelPoint {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}
