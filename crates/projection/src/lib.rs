//! Coordinate transformations for placing operators on a base map.
//!
//! Implements the UTM projection from scratch without external dependencies.

pub mod projector;
pub mod utm;

pub use projector::Projector;
pub use utm::{Utm, UtmCoordinate, UtmError};
