use std::time::Instant;

use line_region::{page, Line, PageOptions, Point};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

const IMAGE_HEIGHT: u32 = 400;

fn main() {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = match std::env::args().nth(1) {
        Some(json) => PageOptions::parse(&json).expect("Invalid options"),
        None => PageOptions::default(),
    };

    // a gently curving page of six lines, each drifting down to the right
    let lines = (0..6)
        .map(|row| {
            (0..=20)
                .map(|col| {
                    let x = 20 + col * 30;
                    let y = 40 + row * 60 + col / 2 + (col % 4 == 0) as i32 * 3;
                    (x, y)
                })
                .collect::<Line>()
        })
        .collect::<Vec<_>>();
    let line_height = options.line_height(60.0);

    let start = Instant::now();
    let regions = page::regions(&lines, line_height, IMAGE_HEIGHT);
    let polygons = page::build_all(&regions);
    let end = start.elapsed();
    log::info!("Built {} regions in {end:?}", polygons.len());

    for (i, poly) in polygons.iter().enumerate() {
        log::debug!("Region {i}: {:?}", poly.points());
    }

    let middle = &regions[regions.len() / 2];
    let quad = middle.line_base(Point::new(110, 226), Point::new(350, 233));
    log::info!("Baseline quad of the middle line: {:?}", quad.points());
}
