use imageproc::point::Point;
use tracing::instrument;

use crate::{
    geometry::{distance_squared, midpoint, Polygon},
    Line,
};

/// Order in which a ratchet edge visits both point sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// Right to left, used for the top edge.
    Backward,
    /// Left to right, used for the bottom edge.
    Forward,
}

impl Walk {
    fn pick(self, points: &[Point<i32>], step: usize) -> Point<i32> {
        match self {
            Walk::Forward => points[step],
            Walk::Backward => points[points.len() - 1 - step],
        }
    }
}

/// Builds the closed region polygon of `current`.
///
/// The top edge runs right to left, the bottom edge left to right, and the
/// first vertex is repeated at the end. Without a neighbour an edge is offset
/// half a line height from `current` and clamped to the image; with one it
/// follows the midline between the two lines.
#[instrument(level = "debug", skip_all, fields(points = current.len()))]
pub fn build_boundary(
    current: &Line,
    previous: Option<&Line>,
    next: Option<&Line>,
    line_height: i32,
    image_height: u32,
) -> Polygon {
    let mut poly = Polygon::new();
    let points = current.points();
    if points.is_empty() {
        log::debug!("Line has no points, its region is empty.");
        return poly;
    }
    let half = line_height / 2;

    match present(previous) {
        Some(previous) => ratchet_edge(points, previous.points(), Walk::Backward, &mut poly),
        None => {
            for point in points.iter().rev() {
                poly.add_point(point.x, point.y.saturating_sub(half).max(0));
            }
        }
    }

    match present(next) {
        Some(next) => ratchet_edge(points, next.points(), Walk::Forward, &mut poly),
        None => {
            let max_y = i32::try_from(image_height.saturating_sub(1)).unwrap_or(i32::MAX);
            for point in points {
                poly.add_point(point.x, point.y.saturating_add(half).min(max_y));
            }
        }
    }

    poly.close();
    log::trace!("Region polygon has {} vertices", poly.len());
    poly
}

fn present(line: Option<&Line>) -> Option<&Line> {
    match line {
        Some(line) if line.is_empty() => {
            log::debug!("Neighbouring line has no points, treating it as absent.");
            None
        }
        other => other,
    }
}

fn ratchet_edge(current: &[Point<i32>], neighbour: &[Point<i32>], walk: Walk, poly: &mut Polygon) {
    let last = current.len() - 1;
    for (step, best) in ratchet_matches(current, neighbour, walk).into_iter().enumerate() {
        let point = walk.pick(current, step);
        let matched = walk.pick(neighbour, best);
        // straight sides at both ends of the line
        let x = if step == 0 || step == last {
            point.x
        } else {
            midpoint(matched.x, point.x)
        };
        poly.add_point(x, midpoint(matched.y, point.y));
    }
}

/// Greedy nearest-point pairing of `current` against `neighbour`, both walked
/// in `walk` order. Returns, per step along `current`, the step along
/// `neighbour` it was paired with. The neighbour step never moves backward.
fn ratchet_matches(current: &[Point<i32>], neighbour: &[Point<i32>], walk: Walk) -> Vec<usize> {
    let end = neighbour.len() - 1;
    let mut matches = Vec::with_capacity(current.len());
    let mut step = 0;
    let mut j = 0;
    let mut best = 0;
    let mut best_dist = u128::MAX;
    while step < current.len() {
        let dist = distance_squared(walk.pick(current, step), walk.pick(neighbour, j));
        if dist < best_dist {
            best = j;
            if j < end {
                j += 1;
            }
            best_dist = dist;
        } else {
            matches.push(best);
            step += 1;
            j = best;
            best_dist = u128::MAX;
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(i32, i32)]) -> Line {
        points.iter().copied().collect()
    }

    fn pairs(poly: &Polygon) -> Vec<(i32, i32)> {
        poly.points().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn empty_line_gives_empty_polygon() {
        let prev = line(&[(0, 0), (10, 0)]);
        let poly = build_boundary(&Line::default(), Some(&prev), None, 20, 500);
        assert!(poly.is_empty());
    }

    #[test]
    fn lone_line_is_offset_by_half_height() {
        let current = line(&[(10, 100), (50, 100), (90, 100)]);
        let poly = build_boundary(&current, None, None, 20, 500);
        assert_eq!(
            pairs(&poly),
            vec![
                (90, 90),
                (50, 90),
                (10, 90),
                (10, 110),
                (50, 110),
                (90, 110),
                (90, 90)
            ]
        );
    }

    #[test]
    fn synthetic_edges_clamp_to_image() {
        let current = line(&[(10, 5), (50, 495)]);
        let poly = build_boundary(&current, None, None, 21, 500);
        assert_eq!(
            pairs(&poly),
            vec![(50, 485), (10, 0), (10, 15), (50, 499), (50, 485)]
        );
    }

    #[test]
    fn aligned_neighbours_pair_index_for_index() {
        let current = line(&[(10, 100), (50, 100), (90, 100)]);
        let prev = line(&[(10, 40), (50, 40), (90, 40)]);
        let next = line(&[(10, 160), (50, 160), (90, 160)]);
        let poly = build_boundary(&current, Some(&prev), Some(&next), 20, 500);
        assert_eq!(
            pairs(&poly),
            vec![
                (90, 70),
                (50, 70),
                (10, 70),
                (10, 130),
                (50, 130),
                (90, 130),
                (90, 70)
            ]
        );
    }

    #[test]
    fn ends_keep_current_x_middle_averages() {
        // previous line is shifted right, so inner vertices lean toward it
        let current = line(&[(0, 100), (40, 100), (80, 100)]);
        let prev = line(&[(20, 60), (60, 60), (100, 60)]);
        let poly = build_boundary(&current, Some(&prev), None, 20, 500);
        let top = &poly.points()[..3];
        assert_eq!(top[0].x, 80);
        assert_eq!(top[2].x, 0);
        assert_eq!(top[1], Point::new(50, 80));
    }

    #[test]
    fn empty_neighbour_is_ignored() {
        let current = line(&[(10, 100), (90, 100)]);
        let with_empty = build_boundary(&current, Some(&Line::default()), None, 20, 500);
        let without = build_boundary(&current, None, None, 20, 500);
        assert_eq!(with_empty, without);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let current = line(&[(i32::MIN + 1, 0), (0, 0)]);
        let prev = line(&[(i32::MAX, i32::MAX)]);
        let poly = build_boundary(&current, Some(&prev), None, 20, 500);
        assert_eq!(
            pairs(&poly),
            vec![
                (0, 1073741823),
                (i32::MIN + 1, 1073741823),
                (i32::MIN + 1, 10),
                (0, 10),
                (0, 1073741823)
            ]
        );

        let current = line(&[(i32::MIN, 0), (i32::MAX - 2, 0), (i32::MAX, 0)]);
        let prev = line(&[(i32::MAX, 0)]);
        let poly = build_boundary(&current, Some(&prev), None, 20, 500);
        assert_eq!(
            pairs(&poly),
            vec![
                (i32::MAX, 0),
                (i32::MAX - 1, 0),
                (i32::MIN, 0),
                (i32::MIN, 10),
                (i32::MAX - 2, 10),
                (i32::MAX, 10),
                (i32::MAX, 0)
            ]
        );
    }

    #[test]
    fn synthetic_offsets_saturate() {
        let current = line(&[(0, i32::MIN + 3), (5, i32::MAX - 3)]);
        let poly = build_boundary(&current, None, None, 20, u32::MAX);
        assert_eq!(
            pairs(&poly),
            vec![
                (5, i32::MAX - 13),
                (0, 0),
                (0, i32::MIN + 13),
                (5, i32::MAX),
                (5, i32::MAX - 13)
            ]
        );
    }

    #[test]
    fn ratchet_never_moves_back() {
        let current = line(&[(0, 100), (15, 98), (30, 105), (45, 99), (60, 100), (75, 102)]);
        let neighbour = line(&[(5, 50), (12, 52), (33, 47), (34, 55), (70, 49)]);
        for walk in [Walk::Forward, Walk::Backward] {
            let matches = ratchet_matches(current.points(), neighbour.points(), walk);
            assert_eq!(matches.len(), current.len());
            assert!(matches.windows(2).all(|pair| pair[0] <= pair[1]));
            assert!(matches.iter().all(|&m| m < neighbour.len()));
        }
    }

    #[test]
    fn shorter_neighbour_is_shared() {
        let current = line(&[(10, 100), (50, 100), (90, 100)]);
        let next = line(&[(50, 140)]);
        let poly = build_boundary(&current, None, Some(&next), 20, 500);
        let bottom = &poly.points()[3..6];
        assert_eq!(bottom[0], Point::new(10, 120));
        assert_eq!(bottom[1], Point::new(50, 120));
        assert_eq!(bottom[2], Point::new(90, 120));
        assert!(poly.is_closed());
    }
}
