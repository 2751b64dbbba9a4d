//! Universal Transverse Mercator (UTM) projection.
//!
//! UTM divides the Earth into 60 zones, each 6° of longitude wide, and
//! projects each one with a transverse Mercator projection centred on the
//! zone's central meridian. Within a zone, easting/northing are metric and
//! close to linear, which is what makes them useful for placing points on a
//! flat map image.
//!
//! The forward transform uses the Krüger series in the third flattening `n`
//! on the WGS84 ellipsoid, truncated after the n³ terms (sub-millimetre
//! within a zone).
//!
//! Valid latitudes are 80°S to 84°N; the polar regions use UPS instead.

use std::f64::consts::PI;

use thiserror::Error;

/// WGS84 semi-major axis (meters)
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// Scale factor on the central meridian
const K0: f64 = 0.9996;
/// False easting (meters)
const FALSE_EASTING: f64 = 500_000.0;
/// False northing for the southern hemisphere (meters)
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

pub const MIN_LATITUDE: f64 = -80.0;
pub const MAX_LATITUDE: f64 = 84.0;

/// Latitude band letters, 8° each from 80°S. X is 12° tall.
const BAND_LETTERS: &[u8] = b"CDEFGHJKLMNPQRSTUVWX";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UtmError {
    #[error("latitude {0} is outside the UTM range (-80 to 84)")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside -180 to 180")]
    LongitudeOutOfRange(f64),

    #[error("zone {0} is not a UTM zone (1 to 60)")]
    InvalidZone(u8),
}

/// A projected UTM position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoordinate {
    /// Meters east, including the 500 km false easting
    pub easting: f64,
    /// Meters north of the equator (plus 10 000 km in the south)
    pub northing: f64,
    /// Zone number, 1 to 60
    pub zone: u8,
    /// Latitude band letter
    pub band: char,
}

/// UTM transform constants for the WGS84 ellipsoid.
#[derive(Debug, Clone)]
pub struct Utm {
    /// Third flattening
    n: f64,
    /// Rectifying radius (meters)
    a_rect: f64,
    /// Krüger series coefficients α1..α3
    alpha: [f64; 3],
}

impl Default for Utm {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl Utm {
    pub fn wgs84() -> Self {
        let n = WGS84_F / (2.0 - WGS84_F);
        let n2 = n * n;
        let n3 = n2 * n;

        let a_rect = WGS84_A / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);
        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0,
            61.0 * n3 / 240.0,
        ];

        Self { n, a_rect, alpha }
    }

    /// The standard zone for a coordinate, including the Norway and
    /// Svalbard exceptions.
    pub fn zone_for(lat_deg: f64, lon_deg: f64) -> Result<u8, UtmError> {
        check_latitude(lat_deg)?;
        check_longitude(lon_deg)?;

        if (56.0..64.0).contains(&lat_deg) && (3.0..12.0).contains(&lon_deg) {
            return Ok(32);
        }

        if (72.0..=84.0).contains(&lat_deg) && lon_deg >= 0.0 && lon_deg < 42.0 {
            return Ok(match lon_deg {
                l if l < 9.0 => 31,
                l if l < 21.0 => 33,
                l if l < 33.0 => 35,
                _ => 37,
            });
        }

        let zone = ((lon_deg + 180.0) / 6.0).floor() as i32 + 1;
        Ok(zone.clamp(1, 60) as u8)
    }

    /// Latitude band letter for a coordinate.
    pub fn latitude_band(lat_deg: f64) -> Result<char, UtmError> {
        check_latitude(lat_deg)?;
        let index = (((lat_deg - MIN_LATITUDE) / 8.0).floor() as usize).min(BAND_LETTERS.len() - 1);
        Ok(BAND_LETTERS[index] as char)
    }

    /// Central meridian of a zone, in degrees.
    pub fn central_meridian(zone: u8) -> Result<f64, UtmError> {
        if !(1..=60).contains(&zone) {
            return Err(UtmError::InvalidZone(zone));
        }
        Ok(zone as f64 * 6.0 - 183.0)
    }

    /// Project a coordinate into its own standard zone.
    pub fn from_lat_lon(&self, lat_deg: f64, lon_deg: f64) -> Result<UtmCoordinate, UtmError> {
        let zone = Self::zone_for(lat_deg, lon_deg)?;
        self.from_lat_lon_in_zone(lat_deg, lon_deg, zone)
    }

    /// Project a coordinate using a fixed zone's central meridian.
    ///
    /// Points up to a few degrees outside the zone still project smoothly,
    /// which keeps eastings continuous across a map that straddles a zone
    /// boundary.
    pub fn from_lat_lon_in_zone(
        &self,
        lat_deg: f64,
        lon_deg: f64,
        zone: u8,
    ) -> Result<UtmCoordinate, UtmError> {
        check_latitude(lat_deg)?;
        check_longitude(lon_deg)?;
        let lon0_deg = Self::central_meridian(zone)?;

        let to_rad = PI / 180.0;
        let phi = lat_deg * to_rad;

        // Normalize longitude difference to [-π, π]
        let mut dlon = (lon_deg - lon0_deg) * to_rad;
        while dlon > PI {
            dlon -= 2.0 * PI;
        }
        while dlon < -PI {
            dlon += 2.0 * PI;
        }

        // Conformal latitude
        let c = 2.0 * self.n.sqrt() / (1.0 + self.n);
        let sin_phi = phi.sin();
        let t = (sin_phi.atanh() - c * (c * sin_phi).atanh()).sinh();

        let xi_p = (t / dlon.cos()).atan();
        let eta_p = (dlon.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += alpha * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        let easting = FALSE_EASTING + K0 * self.a_rect * eta;
        let mut northing = K0 * self.a_rect * xi;
        if lat_deg < 0.0 {
            northing += FALSE_NORTHING_SOUTH;
        }

        Ok(UtmCoordinate {
            easting,
            northing,
            zone,
            band: Self::latitude_band(lat_deg)?,
        })
    }
}

fn check_latitude(lat_deg: f64) -> Result<(), UtmError> {
    if lat_deg.is_finite() && (MIN_LATITUDE..=MAX_LATITUDE).contains(&lat_deg) {
        Ok(())
    } else {
        Err(UtmError::LatitudeOutOfRange(lat_deg))
    }
}

fn check_longitude(lon_deg: f64) -> Result<(), UtmError> {
    if lon_deg.is_finite() && (-180.0..=180.0).contains(&lon_deg) {
        Ok(())
    } else {
        Err(UtmError::LongitudeOutOfRange(lon_deg))
    }
}
