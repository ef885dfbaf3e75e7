//! Linking the lines of one page into regions.
//!
//! Every region only reads its own line and its neighbours, so the polygons of
//! a page can be built on all threads at once.

use rayon::prelude::*;
use tracing::instrument;

use crate::{Line, LineRegion, Polygon};

/// One region per line, each bounded by the line before and after it.
/// `lines` must be ordered top to bottom.
pub fn regions(lines: &[Line], line_height: i32, image_height: u32) -> Vec<LineRegion<'_>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            LineRegion::builder(line, line_height)
                .previous(i.checked_sub(1).and_then(|above| lines.get(above)))
                .next(lines.get(i + 1))
                .image_height(image_height)
                .build()
        })
        .collect()
}

/// Builds every region polygon in parallel, returned in region order.
#[instrument(level = "debug", skip_all, fields(regions = regions.len()))]
pub fn build_all<'r>(regions: &'r [LineRegion<'_>]) -> Vec<&'r Polygon> {
    regions.par_iter().map(|region| region.poly()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::build_boundary;

    fn page() -> Vec<Line> {
        (0..6)
            .map(|row| {
                (0..8)
                    .map(|col| (col * 25, 40 + row * 50 + (col % 3)))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn neighbours_are_linked() {
        let lines = page();
        let regions = regions(&lines, 50, 400);
        assert_eq!(regions.len(), 6);
        assert!(regions[0].previous().is_none());
        assert_eq!(regions[0].next(), Some(&lines[1]));
        assert_eq!(regions[3].previous(), Some(&lines[2]));
        assert!(regions[5].next().is_none());
    }

    #[test]
    fn parallel_build_matches_sequential() {
        let lines = page();
        let regions = regions(&lines, 50, 400);
        let built = build_all(&regions);
        for (i, poly) in built.into_iter().enumerate() {
            let expected = build_boundary(
                &lines[i],
                i.checked_sub(1).map(|k| &lines[k]),
                lines.get(i + 1),
                50,
                400,
            );
            assert_eq!(*poly, expected);
            assert!(regions[i].is_built());
        }
    }
}
