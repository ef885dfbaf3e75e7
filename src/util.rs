use geo::{Coord, Line, LineString, Polygon, Rect};
use image::DynamicImage;
use imageproc::point::Point;

use crate::geometry::Segment;

pub(crate) fn to_geo_coord(point: Point<i32>) -> Coord<f64> {
    Coord {
        x: point.x as f64,
        y: point.y as f64,
    }
}

/// Intersection coordinates are truncated toward zero, same as the integer midpoints.
pub(crate) fn to_pixel(coord: Coord<f64>) -> Point<i32> {
    Point::new(coord.x as i32, coord.y as i32)
}

pub(crate) fn to_geo_line(segment: &Segment) -> Line<f64> {
    Line::new(to_geo_coord(segment.p0), to_geo_coord(segment.p1))
}

pub(crate) fn to_line_string(points: &[Point<i32>]) -> LineString<i32> {
    points
        .iter()
        .map(|point| Coord {
            x: point.x,
            y: point.y,
        })
        .collect()
}

pub(crate) fn to_geo_poly(points: &[Point<i32>]) -> Polygon<f64> {
    let points = points.iter().copied().map(to_geo_coord).collect();
    Polygon::new(LineString::new(points), vec![])
}

/// Crops `image` to the inclusive pixel rectangle `rect`, clamped to the image.
/// Returns the crop together with its offset in the source image.
pub(crate) fn part_image(image: &DynamicImage, rect: Rect<i32>) -> (u32, u32, DynamicImage) {
    let x = (rect.min().x.max(0) as u32).min(image.width());
    let y = (rect.min().y.max(0) as u32).min(image.height());
    let width = ((rect.width() + 1).max(0) as u32).min(image.width() - x);
    let height = ((rect.height() + 1).max(0) as u32).min(image.height() - y);
    log::trace!("Slicing subimage to {rect:?}");
    (x, y, image.crop_imm(x, y, width, height))
}
