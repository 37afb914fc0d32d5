//! Pure geometry and colour data for panelkit
//!
//! Nothing here knows about drawers or animation; these are the value types
//! passed between the layout host and the overlay controllers.

mod color;
mod geometry;

pub use color::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, Point, Size};
}
