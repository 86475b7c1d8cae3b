use crate::graphics::Rgb;
use crate::math::wrap;
use crate::mesh::Mesh;
use crate::state::TRACK_REPEAT;

/// Track surface height, where the tires touch down
pub const TRACK_Y: f64 = -0.41;
pub const HALF_LENGTH: f64 = 40.0;
pub const HALF_WIDTH: f64 = 4.0;

const TILE_LENGTH: f64 = 4.0;
const EDGE_LINE_WIDTH: f64 = 0.15;
const DASH_PERIOD: f64 = 4.0;
const DASH_LENGTH: f64 = 2.0;
const DASH_WIDTH: f64 = 0.12;
const KERB_SEGMENT: f64 = 1.25;
const KERB_WIDTH: f64 = 0.4;
const GRASS_WIDTH: f64 = 15.0;
const START_LINE_X: f64 = -25.0;
const START_LINE_LENGTH: f64 = 0.5;
const FINISH_LINE_X: f64 = 25.0;
const CHECKER: f64 = 0.3;
const CHECKER_ROWS: usize = 3;

/// Paint sits slightly above the asphalt to win the depth test
const PAINT_LIFT: f64 = 0.01;

const ASPHALT: Rgb = Rgb::new(64, 64, 69);
const LINE: Rgb = Rgb::new(240, 240, 240);
const KERB_RED: Rgb = Rgb::new(230, 26, 26);
const GRASS: Rgb = Rgb::new(38, 115, 38);

/// Horizontal rectangle at height `y`
fn patch(mesh: &mut Mesh, x: (f64, f64), z: (f64, f64), y: f64, color: Rgb) {
    mesh.push_quad(
        [x.0, y, z.0],
        [x.1, y, z.0],
        [x.1, y, z.1],
        [x.0, y, z.1],
        color,
    );
}

/// Position of a fixed track feature after scrolling, kept within one repeat
/// length around the car
fn scrolled(x: f64, offset: f64) -> f64 {
    let half = TRACK_REPEAT * 0.5;
    wrap(x + offset + half, TRACK_REPEAT) - half
}

/// Repeating segments of `length` every `period`, scrolled by `offset` and
/// clipped to the visible track. Yields (start, end, index); the index is
/// anchored to the painted segment, so it stays with it while it scrolls.
fn repeating(offset: f64, period: f64, length: f64) -> impl Iterator<Item = (f64, f64, i64)> {
    let anchor = (offset / period).floor() as i64;
    let first = -HALF_LENGTH + offset - anchor as f64 * period - period;
    (0..)
        .map(move |i: i64| (first + i as f64 * period, i - anchor))
        .take_while(|&(start, _)| start < HALF_LENGTH)
        .filter_map(move |(start, index)| {
            let (a, b) = (start.max(-HALF_LENGTH), (start + length).min(HALF_LENGTH));
            (a < b).then_some((a, b, index))
        })
}

fn kerb_color(index: i64) -> Rgb {
    if index.rem_euclid(2) == 0 {
        KERB_RED
    } else {
        LINE
    }
}

/// Track geometry for the given scroll offset. The car stays at the origin
/// and the paint moves with the offset; every pattern repeats with a period
/// dividing `TRACK_REPEAT`, so a wrapped offset draws the same track.
pub fn build_track(offset: f64) -> Mesh {
    let mut mesh = Mesh::new();
    let paint_y = TRACK_Y + PAINT_LIFT;

    // Asphalt and grass are uniform, so they do not need to scroll
    let tiles = (2.0 * HALF_LENGTH / TILE_LENGTH) as usize;
    let verge_inner = HALF_WIDTH + KERB_WIDTH;
    for i in 0..tiles {
        let x0 = -HALF_LENGTH + i as f64 * TILE_LENGTH;
        let x = (x0, x0 + TILE_LENGTH);
        patch(&mut mesh, x, (-HALF_WIDTH, HALF_WIDTH), TRACK_Y, ASPHALT);
        for side in [-1.0, 1.0] {
            let z = (side * verge_inner, side * (verge_inner + GRASS_WIDTH));
            patch(&mut mesh, x, z, TRACK_Y, GRASS);
        }
    }

    for side in [-1.0, 1.0] {
        let inner = side * (HALF_WIDTH - EDGE_LINE_WIDTH);
        patch(
            &mut mesh,
            (-HALF_LENGTH, HALF_LENGTH),
            (inner, side * HALF_WIDTH),
            paint_y,
            LINE,
        );
    }

    for (x0, x1, _) in repeating(offset, DASH_PERIOD, DASH_LENGTH) {
        patch(
            &mut mesh,
            (x0, x1),
            (-DASH_WIDTH * 0.5, DASH_WIDTH * 0.5),
            paint_y,
            LINE,
        );
    }

    for (x0, x1, index) in repeating(offset, KERB_SEGMENT, KERB_SEGMENT) {
        let color = kerb_color(index);
        for side in [-1.0, 1.0] {
            let z = (side * HALF_WIDTH, side * verge_inner);
            patch(&mut mesh, (x0, x1), z, paint_y, color);
        }
    }

    let start = scrolled(START_LINE_X, offset);
    if start.abs() + START_LINE_LENGTH < HALF_LENGTH {
        patch(
            &mut mesh,
            (start, start + START_LINE_LENGTH),
            (-HALF_WIDTH, HALF_WIDTH),
            paint_y,
            LINE,
        );
    }

    let finish = scrolled(FINISH_LINE_X, offset);
    let finish_length = CHECKER * CHECKER_ROWS as f64;
    if finish.abs() + finish_length < HALF_LENGTH {
        let columns = (2.0 * HALF_WIDTH / CHECKER) as usize;
        for row in 0..CHECKER_ROWS {
            let x0 = finish + row as f64 * CHECKER;
            for column in 0..columns {
                let z0 = -HALF_WIDTH + column as f64 * CHECKER;
                let color = if (row + column) % 2 == 0 {
                    LINE
                } else {
                    Rgb::BLACK
                };
                patch(&mut mesh, (x0, x0 + CHECKER), (z0, z0 + CHECKER), paint_y, color);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dash_starts(offset: f64) -> Vec<f64> {
        repeating(offset, DASH_PERIOD, DASH_LENGTH)
            .map(|(start, _, _)| start)
            .filter(|&start| start > -HALF_LENGTH)
            .collect()
    }

    #[test]
    fn track_repeats_every_repeat_length() {
        let a = build_track(-3.3);
        let b = build_track(-3.3 - TRACK_REPEAT);
        assert_eq!(a.faces.len(), b.faces.len());
        for (fa, fb) in a.faces.iter().zip(&b.faces) {
            assert_eq!(fa.color, fb.color);
            for (va, vb) in fa.vertices.iter().zip(&fb.vertices) {
                for k in 0..3 {
                    assert!((va[k] - vb[k]).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn dashes_move_backwards_as_offset_decreases() {
        let before = dash_starts(0.0);
        let after = dash_starts(-1.0);
        assert!(!before.is_empty());
        for start in &before {
            let shifted = start - 1.0;
            assert!(after.iter().any(|a| (a - shifted).abs() < 1e-9));
        }
    }

    #[test]
    fn patterns_stay_on_the_track() {
        for offset in [0.0, -0.4, -37.9, -99.99] {
            let (min, max) = build_track(offset).bounds().unwrap();
            assert!(min[0] >= -HALF_LENGTH - 1e-9);
            assert!(max[0] <= HALF_LENGTH + 1e-9);
        }
    }

    fn kerb_color_at(x: f64, offset: f64) -> Option<Rgb> {
        repeating(offset, KERB_SEGMENT, KERB_SEGMENT)
            .find(|&(start, end, _)| start <= x && x < end)
            .map(|(_, _, index)| kerb_color(index))
    }

    #[test]
    fn kerb_colors_alternate() {
        let segments: Vec<_> = repeating(-0.6, KERB_SEGMENT, KERB_SEGMENT).collect();
        for pair in segments.windows(2) {
            assert_ne!(kerb_color(pair[0].2), kerb_color(pair[1].2));
            assert!((pair[0].1 - pair[1].0).abs() < 1e-9);
        }
    }

    #[test]
    fn kerb_keeps_its_color_while_scrolling() {
        // Each pair follows one painted segment 0.02 units back, the last two
        // across a multiple of the segment length
        for (x, offset) in [(-1.24, -0.5), (0.1, -1.24), (10.0, -2.49)] {
            let before = kerb_color_at(x, offset);
            let after = kerb_color_at(x - 0.02, offset - 0.02);
            assert!(before.is_some());
            assert_eq!(before, after, "segment at {x} changed color");
        }
    }

    #[test]
    fn start_line_scrolls_with_offset() {
        assert!((scrolled(START_LINE_X, 0.0) - START_LINE_X).abs() < 1e-12);
        assert!((scrolled(START_LINE_X, -10.0) - (START_LINE_X - 10.0)).abs() < 1e-12);
        assert!((scrolled(START_LINE_X, -30.0) - 45.0).abs() < 1e-9);
    }
}
