//! Integer pixel geometry shared by the boundary builder and the probe.
//!
//! Points are `imageproc` points so that contours found on a page can be used
//! as lines directly. Heavier lifting (segment intersection, bounding boxes)
//! goes through `geo`.

use float_ord::FloatOrd;
use geo::{
    line_intersection::{line_intersection, LineIntersection},
    BoundingRect, Rect,
};
use imageproc::point::Point;

use crate::util::{to_geo_line, to_geo_poly, to_line_string, to_pixel};

/// Squared euclidean distance. Only ever compared, never reported.
/// Exact for any pair of `i32` points.
pub(crate) fn distance_squared(a: Point<i32>, b: Point<i32>) -> u128 {
    let dx = a.x.abs_diff(b.x) as u128;
    let dy = a.y.abs_diff(b.y) as u128;
    dx * dx + dy * dy
}

/// Truncating integer midpoint, computed wide so it cannot overflow.
pub(crate) fn midpoint(a: i32, b: i32) -> i32 {
    ((a as i64 + b as i64) / 2) as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub p0: Point<i32>,
    pub p1: Point<i32>,
}

impl Segment {
    pub fn new(p0: Point<i32>, p1: Point<i32>) -> Self {
        Self { p0, p1 }
    }

    /// A vertical segment at `x` running from `y0` to `y1`.
    pub fn vertical(x: i32, y0: i32, y1: i32) -> Self {
        Self::new(Point::new(x, y0), Point::new(x, y1))
    }
}

/// An owned vertex list, closed by convention (first vertex repeated last).
///
/// Regions hand these out by reference and allow callers to adjust them
/// afterwards through the mutating methods below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polygon {
    points: Vec<Point<i32>>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, x: i32, y: i32) {
        self.points.push(Point::new(x, y));
    }

    pub fn push(&mut self, point: Point<i32>) {
        self.points.push(point);
    }

    pub fn insert(&mut self, index: usize, point: Point<i32>) {
        self.points.insert(index, point);
    }

    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point<i32>] {
        &mut self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point<i32>> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point<i32>> {
        self.points.last().copied()
    }

    pub fn is_closed(&self) -> bool {
        !self.points.is_empty() && self.first() == self.last()
    }

    /// Appends a copy of the first vertex, whether or not the loop is already closed.
    pub fn close(&mut self) {
        if let Some(first) = self.first() {
            self.points.push(first);
        }
    }

    /// The vertices with any trailing repeats of the first vertex removed.
    pub fn outline(&self) -> &[Point<i32>] {
        let mut end = self.points.len();
        while end > 1 && self.points[end - 1] == self.points[0] {
            end -= 1;
        }
        &self.points[..end]
    }

    /// Every boundary edge, including the implicit closing edge of an open loop.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let closing = match (self.first(), self.last()) {
            (Some(first), Some(last)) if self.points.len() > 2 && first != last => {
                Some(Segment::new(last, first))
            }
            _ => None,
        };
        self.points
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .chain(closing)
    }

    pub fn bounding_rect(&self) -> Option<Rect<i32>> {
        to_line_string(&self.points).bounding_rect()
    }

    /// Intersects `segment` with the polygon boundary.
    ///
    /// The result runs from the crossing with the smallest y to the crossing
    /// with the largest y. Collinear overlaps contribute both of their ends.
    pub fn intersect_segment(&self, segment: &Segment) -> Option<Segment> {
        let probe = to_geo_line(segment);
        let crossings = self
            .edges()
            .filter_map(|edge| line_intersection(to_geo_line(&edge), probe))
            .flat_map(|hit| match hit {
                LineIntersection::SinglePoint { intersection, .. } => {
                    [intersection, intersection]
                }
                LineIntersection::Collinear { intersection } => {
                    [intersection.start, intersection.end]
                }
            })
            .collect::<Vec<_>>();

        let top = crossings.iter().min_by_key(|coord| FloatOrd(coord.y))?;
        let bottom = crossings.iter().max_by_key(|coord| FloatOrd(coord.y))?;
        Some(Segment::new(to_pixel(*top), to_pixel(*bottom)))
    }
}

impl From<Vec<Point<i32>>> for Polygon {
    fn from(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }
}

impl FromIterator<Point<i32>> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point<i32>>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl From<&Polygon> for geo::Polygon<f64> {
    fn from(polygon: &Polygon) -> Self {
        to_geo_poly(polygon.outline())
    }
}
