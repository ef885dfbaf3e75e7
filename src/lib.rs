//! Regions of a scanned page that belong to single text lines.
//!
//! A [`LineRegion`] is bounded above by the midline to the previous line and
//! below by the midline to the next one. Its polygon is used to crop or mask
//! word shapes, and can be probed for the top and bottom extent at any x.

mod boundary;
pub mod geometry;
mod line;
mod options;
pub mod page;
mod probe;
mod region;
mod util;

pub use boundary::build_boundary;
pub use geometry::{Polygon, Segment};
pub use line::Line;
pub use options::*;
pub use probe::{baseline_quad, y_intercept};
pub use region::{LineRegion, LineRegionBuilder};

pub use imageproc::point::Point;
