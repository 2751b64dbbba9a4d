//! Common types and utilities shared across the reception-maps crates.

pub mod error;
pub mod geo;
pub mod operator;
pub mod report;

pub use error::{ReceptionError, ReceptionResult};
pub use geo::{GeoCoordinate, PixelPoint, ProjectedBounds};
pub use operator::{normalize_call_sign, CallSignMatch, Operator, OperatorCatalog, UNKNOWN_VALUE};
pub use report::{CallSignFilter, MapMode, ReportMatrix, TransmitterSelection};
