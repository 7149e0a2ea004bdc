//! Curved path synthesis
//!
//! Control points are laid on the straight line between two positions and
//! pushed off it by a random deviation proportional to the travel distance.
//! The curve through them is sampled with De Casteljau's algorithm.

use crate::humanize::Humanizer;

use super::Position;

/// Samples on a curve at humanization level 0
pub const BASE_SAMPLE_COUNT: usize = 20;
/// Extra samples per humanization level
pub const SAMPLES_PER_LEVEL: usize = 3;

/// Number of curve segments for a humanization level
pub fn sample_count(humanization_level: u8) -> usize {
    BASE_SAMPLE_COUNT + humanization_level as usize * SAMPLES_PER_LEVEL
}

/// Build `interior + 2` control points from `start` to `end`
///
/// Interior points sit at evenly spaced fractions of the straight line and
/// are each displaced on both axes by up to
/// `path_deviation * (|dx| + |dy|)`.
pub fn control_points(
    humanizer: &mut Humanizer,
    start: Position,
    end: Position,
    interior: usize,
    path_deviation: f64,
) -> Vec<Position> {
    let delta = start.delta_to(end);
    let max_deviation = (delta.manhattan() as f64 * path_deviation) as i64;

    let mut points = Vec::with_capacity(interior + 2);
    points.push(start);

    for i in 0..interior {
        let t = (i + 1) as f64 / (interior + 1) as f64;
        let line_x = start.x as f64 + t * delta.dx as f64;
        let line_y = start.y as f64 + t * delta.dy as f64;

        let x = line_x.round() as i64 + humanizer.deviation(max_deviation);
        let y = line_y.round() as i64 + humanizer.deviation(max_deviation);
        points.push(Position::new(saturate(x), saturate(y)));
    }

    points.push(end);
    points
}

/// Evaluate the Bezier curve defined by `points` at `t`
///
/// Interpolation runs in floating point and is rounded once at the end, so
/// `t = 0` and `t = 1` return the first and last control points exactly.
pub fn de_casteljau(points: &[Position], t: f64) -> Option<Position> {
    let mut work: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.x as f64, p.y as f64))
        .collect();

    if work.is_empty() {
        return None;
    }

    for level in (1..work.len()).rev() {
        for k in 0..level {
            let (ax, ay) = work[k];
            let (bx, by) = work[k + 1];
            work[k] = ((1.0 - t) * ax + t * bx, (1.0 - t) * ay + t * by);
        }
    }

    let (x, y) = work[0];
    Some(Position::new(saturate(x.round() as i64), saturate(y.round() as i64)))
}

/// Sample `segments + 1` evenly spaced points along the curve
pub fn sample_curve(points: &[Position], segments: usize) -> Vec<Position> {
    let segments = segments.max(1);
    (0..=segments)
        .filter_map(|i| de_casteljau(points, i as f64 / segments as f64))
        .collect()
}

/// Generate a randomized curve from `start` to `end`
///
/// The result holds `sample_count(humanization_level) + 1` points; the
/// first equals `start` and the last equals `end`.
pub fn generate_bezier_curve(
    humanizer: &mut Humanizer,
    start: Position,
    end: Position,
    interior: usize,
    humanization_level: u8,
    path_deviation: f64,
) -> Vec<Position> {
    let controls = control_points(humanizer, start, end, interior, path_deviation);
    sample_curve(&controls, sample_count(humanization_level))
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
