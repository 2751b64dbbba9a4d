//! Geographic to image pixel mapping for a base map.
//!
//! The base map is treated as a flat, linear image of UTM space: its
//! northwest corner is pixel (0, 0) and its southeast corner is pixel
//! (width, height). Scale factors are derived once from the two corners and
//! reused for every operator, so all positions on a map share one scale.
//!
//! All projections use the zone covering the centre of the map. Zone
//! consistency of the inputs is not checked; coordinates are assumed to be
//! within a few hundred kilometres of each other.

use reception_common::{GeoCoordinate, PixelPoint, ProjectedBounds, ReceptionError, ReceptionResult};

use crate::utm::{Utm, UtmError};

impl From<UtmError> for ReceptionError {
    fn from(err: UtmError) -> Self {
        ReceptionError::Projection(err.to_string())
    }
}

/// Converts coordinates to pixel positions on one base map image.
#[derive(Debug, Clone)]
pub struct Projector {
    utm: Utm,
    zone: u8,
    easting_nw: f64,
    northing_nw: f64,
    x_meters_per_pixel: f64,
    y_meters_per_pixel: f64,
}

impl Projector {
    /// Build a projector for an image of `width` x `height` pixels covering `bounds`.
    pub fn new(bounds: &ProjectedBounds, width: u32, height: u32) -> ReceptionResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReceptionError::Projection(format!(
                "map image has no area ({}x{})",
                width, height
            )));
        }

        let utm = Utm::wgs84();
        let center = bounds.center();
        let zone = Utm::zone_for(center.lat, center.lon)?;

        let nw = utm
            .from_lat_lon_in_zone(bounds.nw().lat, bounds.nw().lon, zone)
            .map_err(|e| ReceptionError::Projection(format!("map northwest corner: {}", e)))?;
        let se = utm
            .from_lat_lon_in_zone(bounds.se().lat, bounds.se().lon, zone)
            .map_err(|e| ReceptionError::Projection(format!("map southeast corner: {}", e)))?;

        let x_meters_per_pixel = (se.easting - nw.easting) / width as f64;
        let y_meters_per_pixel = (nw.northing - se.northing) / height as f64;

        for (axis, scale) in [("x", x_meters_per_pixel), ("y", y_meters_per_pixel)] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ReceptionError::Projection(format!(
                    "degenerate {} scale of {} meters per pixel",
                    axis, scale
                )));
            }
        }

        tracing::debug!(
            zone,
            x_meters_per_pixel,
            y_meters_per_pixel,
            width,
            height,
            "Initialized map projector"
        );

        Ok(Self {
            utm,
            zone,
            easting_nw: nw.easting,
            northing_nw: nw.northing,
            x_meters_per_pixel,
            y_meters_per_pixel,
        })
    }

    /// Pixel position of a coordinate.
    ///
    /// Pixel offsets have 0.5 added and are then truncated toward zero.
    /// Points outside the map bounds produce pixels outside the image;
    /// callers clip when drawing.
    pub fn project(&self, coord: GeoCoordinate) -> ReceptionResult<PixelPoint> {
        let p = self.utm.from_lat_lon_in_zone(coord.lat, coord.lon, self.zone)?;

        let x = ((p.easting - self.easting_nw) / self.x_meters_per_pixel + 0.5).trunc();
        let y = ((self.northing_nw - p.northing) / self.y_meters_per_pixel + 0.5).trunc();

        if x.abs() > i32::MAX as f64 || y.abs() > i32::MAX as f64 {
            return Err(ReceptionError::Projection(format!(
                "({}, {}) is too far from the map to place",
                coord.lat, coord.lon
            )));
        }

        Ok(PixelPoint::new(x as i32, y as i32))
    }

    /// UTM zone every point is projected in.
    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Meters per pixel in (x, y).
    pub fn meters_per_pixel(&self) -> (f64, f64) {
        (self.x_meters_per_pixel, self.y_meters_per_pixel)
    }
}
