//! Map image composition.
//!
//! Implements the drawing side of a reception map:
//! - Icon catalog (category → pre-sized sprite)
//! - Layered canvas (base map, icons, text overlay)
//! - TrueType labels
//! - Legend writer

pub mod canvas;
pub mod font;
pub mod icons;
pub mod legend;

pub use canvas::{label_anchor, load_base_map, Canvas, TEXT_COLOR};
pub use font::{FontFace, FontSettings, Hinting};
pub use icons::IconCatalog;
pub use legend::{legend_lines, LegendWriter};
