use image::{DynamicImage, GrayImage, Luma, Rgba};
use imageproc::{drawing::draw_polygon_mut, point::Point};
use once_cell::sync::OnceCell;
use tracing::instrument;

use crate::{
    boundary::build_boundary,
    probe::{baseline_quad, y_intercept},
    util::part_image,
    Line, Polygon,
};

const INSIDE: Luma<u8> = Luma([255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub struct LineRegionBuilder<'a> {
    current: &'a Line,
    previous: Option<&'a Line>,
    next: Option<&'a Line>,
    line_height: i32,
    image_height: Option<u32>,
}

impl<'a> LineRegionBuilder<'a> {
    fn new(current: &'a Line, line_height: i32) -> Self {
        Self {
            current,
            previous: None,
            next: None,
            line_height,
            image_height: None,
        }
    }

    /// The line above, `None` for the first line on the page.
    pub fn previous(mut self, line: Option<&'a Line>) -> Self {
        self.previous = line;
        self
    }

    /// The line below, `None` for the last line on the page.
    pub fn next(mut self, line: Option<&'a Line>) -> Self {
        self.next = line;
        self
    }

    /// Height of the page image; bottom edges without a next line stop above it.
    pub fn image_height(mut self, image_height: u32) -> Self {
        self.image_height = Some(image_height);
        self
    }

    pub fn build(self) -> LineRegion<'a> {
        if self.line_height <= 0 {
            log::warn!(
                "Line height {} leaves edges without neighbours flat on the line.",
                self.line_height
            );
        }
        let image_height = self.image_height.unwrap_or_else(|| {
            log::debug!("No image height given, bottom edges are not clamped.");
            u32::MAX
        });
        LineRegion {
            current: self.current,
            previous: self.previous,
            next: self.next,
            line_height: self.line_height,
            image_height,
            poly: OnceCell::new(),
        }
    }
}

/// The part of a page that belongs to one text line.
///
/// The region borrows its line and the neighbouring lines from the page layout
/// and computes its polygon on first access. Once computed the polygon is never
/// rebuilt, though callers may adjust it through [`LineRegion::poly_mut`].
#[derive(Debug)]
pub struct LineRegion<'a> {
    current: &'a Line,
    previous: Option<&'a Line>,
    next: Option<&'a Line>,
    line_height: i32,
    image_height: u32,
    poly: OnceCell<Polygon>,
}

impl<'a> LineRegion<'a> {
    /// `line_height` is the estimated average line pitch in pixels.
    pub fn builder(current: &'a Line, line_height: i32) -> LineRegionBuilder<'a> {
        LineRegionBuilder::new(current, line_height)
    }

    /// A builder whose vertical bound is the height of `image`.
    pub fn for_image(
        image: &DynamicImage,
        current: &'a Line,
        line_height: i32,
    ) -> LineRegionBuilder<'a> {
        LineRegionBuilder::new(current, line_height).image_height(image.height())
    }

    pub fn current(&self) -> &'a Line {
        self.current
    }

    pub fn previous(&self) -> Option<&'a Line> {
        self.previous
    }

    pub fn next(&self) -> Option<&'a Line> {
        self.next
    }

    pub fn line_height(&self) -> i32 {
        self.line_height
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn is_built(&self) -> bool {
        self.poly.get().is_some()
    }

    /// The region polygon, built on first call.
    pub fn poly(&self) -> &Polygon {
        self.poly.get_or_init(|| self.calculate())
    }

    /// The region polygon for external adjustment, built first if needed.
    pub fn poly_mut(&mut self) -> &mut Polygon {
        if self.poly.get().is_none() {
            self.poly = OnceCell::with_value(self.calculate());
        }
        match self.poly.get_mut() {
            Some(poly) => poly,
            None => unreachable!("region polygon is built before it is handed out"),
        }
    }

    /// The padded boundary y above or below `point`.
    pub fn y_intercept(&self, point: Point<i32>, above: bool) -> i32 {
        y_intercept(self.poly(), point, above)
    }

    /// The quad around the baseline segment from `p0` to `p1`.
    pub fn line_base(&self, p0: Point<i32>, p1: Point<i32>) -> Polygon {
        baseline_quad(self.poly(), p0, p1)
    }

    /// A `width` x `height` mask, 255 on and inside the region, 0 elsewhere.
    #[instrument(level = "debug", skip(self))]
    pub fn mask(&self, width: u32, height: u32) -> GrayImage {
        let mut mask = GrayImage::new(width, height);
        let outline = self.poly().outline();
        if outline.len() > 1 {
            draw_polygon_mut(&mut mask, outline, INSIDE);
        }
        mask
    }

    /// Crops `image` to the region's bounding box and whitens everything
    /// outside the region. `None` when the region is empty.
    #[instrument(level = "debug", skip(self, image))]
    pub fn crop(&self, image: &DynamicImage) -> Option<DynamicImage> {
        let bounds = self.poly().bounding_rect()?;
        let mask = self.mask(image.width(), image.height());
        let (left, top, part) = part_image(image, bounds);
        let mut part = part.into_rgba8();
        for (x, y, pixel) in part.enumerate_pixels_mut() {
            if mask.get_pixel(left + x, top + y)[0] == 0 {
                *pixel = WHITE;
            }
        }
        Some(DynamicImage::ImageRgba8(part))
    }

    fn calculate(&self) -> Polygon {
        build_boundary(
            self.current,
            self.previous,
            self.next,
            self.line_height,
            self.image_height,
        )
    }
}
