//! Ray directions for blast sampling.

use std::sync::OnceLock;

use glam::DVec3;

/// Cells per edge of the sampling cube.
const GRID: i32 = 16;

/// Number of directions, one per border cell of the cube (16³ - 14³).
pub const DIRECTION_COUNT: usize = 1352;

static DIRECTIONS: OnceLock<Vec<DVec3>> = OnceLock::new();

/// Unit vectors through every border cell of a 16³ cube centred on the
/// origin, in x, then y, then z order.
///
/// Built on first use and shared read-only afterwards.
pub fn directions() -> &'static [DVec3] {
    DIRECTIONS.get_or_init(build)
}

fn build() -> Vec<DVec3> {
    let edge = GRID - 1;
    let scale = 2.0 / edge as f64;

    let mut out: Vec<DVec3> = Vec::with_capacity(DIRECTION_COUNT);
    for x in 0..GRID {
        for y in 0..GRID {
            for z in 0..GRID {
                let on_border = x == 0 || x == edge || y == 0 || y == edge || z == 0 || z == edge;
                if !on_border {
                    continue;
                }

                let d = DVec3::new(
                    x as f64 * scale - 1.0,
                    y as f64 * scale - 1.0,
                    z as f64 * scale - 1.0,
                );
                let d = d / d.length();
                if !out.contains(&d) {
                    out.push(d);
                }
            }
        }
    }
    out
}
