use imageproc::point::Point;
use tracing::instrument;

use crate::geometry::{Polygon, Segment};

/// Probes `polygon` along the vertical through `point` and returns a padded
/// y-coordinate of its boundary above (or below) the point.
///
/// The value returned is halfway between `point.y` and the outermost crossing
/// in the requested direction, truncated toward `point.y`'s side as integer
/// division does. When the vertical misses the polygon, `point.y` is returned.
#[instrument(level = "trace", skip(polygon), fields(vertices = polygon.len()))]
pub fn y_intercept(polygon: &Polygon, point: Point<i32>, above: bool) -> i32 {
    let Some(bounds) = polygon.bounding_rect() else {
        log::trace!("Probe against an empty polygon, keeping y = {}", point.y);
        return point.y;
    };
    let top = bounds.min().y.min(0);
    let bottom = bounds.max().y.max(point.y).saturating_add(1);
    let probe = Segment::vertical(point.x, bottom, top);

    match polygon.intersect_segment(&probe) {
        Some(hit) if above => {
            let y = hit.p0.y.min(hit.p1.y);
            pad(y, point.y)
        }
        Some(hit) => {
            let y = hit.p0.y.max(hit.p1.y);
            pad(point.y, y)
        }
        None => {
            log::trace!("No boundary at x = {}, keeping y = {}", point.x, point.y);
            point.y
        }
    }
}

/// `from` moved halfway toward `to`, truncating toward `from`.
fn pad(from: i32, to: i32) -> i32 {
    let from = from as i64;
    (from + (to as i64 - from) / 2) as i32
}

/// Builds the clockwise quad hugging the baseline from `p0` (left) to `p1`
/// (right), closed by repeating its first vertex.
#[instrument(level = "trace", skip(polygon))]
pub fn baseline_quad(polygon: &Polygon, p0: Point<i32>, p1: Point<i32>) -> Polygon {
    let mut quad = Polygon::new();
    quad.add_point(p0.x, y_intercept(polygon, p0, true));
    quad.add_point(p1.x, y_intercept(polygon, p1, true));
    quad.add_point(p1.x, y_intercept(polygon, p1, false));
    quad.add_point(p0.x, y_intercept(polygon, p0, false));
    quad.close();
    quad
}
