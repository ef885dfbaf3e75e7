use imageproc::{contours::Contour, point::Point};

/// The left-to-right points of one detected text line, baseline or contour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    points: Vec<Point<i32>>,
}

impl Line {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Point<i32>>> for Line {
    fn from(points: Vec<Point<i32>>) -> Self {
        Self::new(points)
    }
}

impl From<Contour<i32>> for Line {
    fn from(contour: Contour<i32>) -> Self {
        Self::new(contour.points)
    }
}

impl FromIterator<Point<i32>> for Line {
    fn from_iter<I: IntoIterator<Item = Point<i32>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromIterator<(i32, i32)> for Line {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        iter.into_iter().map(|(x, y)| Point::new(x, y)).collect()
    }
}
