// THEORY:
// The `viewport` module is a small geometry utility that sits beside the voting
// engine, not inside it. Given a line in Hough normal form `(r, theta)` and a
// rectangular viewport, it finds the visible segment of that infinite line so that
// a renderer can draw it.
//
// Algorithm:
// 1.  Reversed limits are swapped so that `x0 <= x1` and `y0 <= y1`.
// 2.  Vertical lines (sin = 0) sit at `x = r*cos(theta)` and span the full height.
//     Horizontal lines (cos = 0) sit at `y = r*sin(theta)` and span the full width.
// 3.  Any other line is rewritten as `y = m*x + c` and intersected with the four
//     borders. Exactly two distinct crossings make a visible segment. Anything else
//     (a miss, or a line that only grazes a corner) means there is nothing to draw.
//
// Angles are in degrees. Multiples of 90 degrees use exact sines and cosines, so the
// degenerate branches fire for the grid's own angle samples.

use serde::{Deserialize, Serialize};

/// Two crossings closer than this are the same point (a corner hit twice).
const SAME_POINT_EPS: f64 = 1e-9;

/// The visible part of a line, endpoint to endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

/// `(sin, cos)` of an angle in degrees, exact at multiples of 90.
pub fn sin_cos_deg(theta_deg: f64) -> (f64, f64) {
    let quarter = theta_deg / 90.0;
    if quarter.fract() == 0.0 {
        return match (quarter as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    theta_deg.to_radians().sin_cos()
}

/// Clips the line `r = x*cos(theta) + y*sin(theta)` to the viewport.
///
/// Returns `None` when the line does not cross the viewport in two distinct points.
///
/// A line through a corner meets two borders at the same point. That corner counts
/// once, so a diagonal from corner to corner still yields a segment, while a line that
/// only touches one corner yields `None`.
pub fn clip_line_to_viewport(
    r: f64,
    theta_deg: f64,
    xlims: (f64, f64),
    ylims: (f64, f64),
) -> Option<Segment> {
    let (x0, x1) = ordered(xlims);
    let (y0, y1) = ordered(ylims);
    let (sin, cos) = sin_cos_deg(theta_deg);

    if sin == 0.0 {
        let x = r * cos;
        return (x0..=x1).contains(&x).then_some(Segment {
            start: (x, y0),
            end: (x, y1),
        });
    }
    if cos == 0.0 {
        let y = r * sin;
        return (y0..=y1).contains(&y).then_some(Segment {
            start: (x0, y),
            end: (x1, y),
        });
    }

    let m = -cos / sin;
    let c = r / sin;

    let mut crossings: Vec<(f64, f64)> = Vec::with_capacity(4);
    let mut push = |p: (f64, f64)| {
        let dup = crossings
            .iter()
            .any(|q| (q.0 - p.0).abs() <= SAME_POINT_EPS && (q.1 - p.1).abs() <= SAME_POINT_EPS);
        if !dup {
            crossings.push(p);
        }
    };

    let y_left = m * x0 + c;
    if (y0..=y1).contains(&y_left) {
        push((x0, y_left));
    }
    let y_right = m * x1 + c;
    if (y0..=y1).contains(&y_right) {
        push((x1, y_right));
    }
    let x_bottom = (y0 - c) / m;
    if (x0..=x1).contains(&x_bottom) {
        push((x_bottom, y0));
    }
    let x_top = (y1 - c) / m;
    if (x0..=x1).contains(&x_top) {
        push((x_top, y1));
    }

    match crossings.as_slice() {
        [start, end] => Some(Segment {
            start: *start,
            end: *end,
        }),
        _ => None,
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a > b { (b, a) } else { (a, b) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn horizontal_line_spans_the_width() {
        let seg = clip_line_to_viewport(5.0, 90.0, (0.0, 10.0), (0.0, 10.0)).unwrap();
        assert_eq!(seg.start, (0.0, 5.0));
        assert_eq!(seg.end, (10.0, 5.0));
    }

    #[test]
    fn vertical_line_spans_the_height() {
        let seg = clip_line_to_viewport(3.0, 0.0, (0.0, 10.0), (0.0, 8.0)).unwrap();
        assert_eq!(seg.start, (3.0, 0.0));
        assert_eq!(seg.end, (3.0, 8.0));

        // theta = 180 flips the sign of r
        let seg = clip_line_to_viewport(-3.0, 180.0, (0.0, 10.0), (0.0, 8.0)).unwrap();
        assert_eq!(seg.start, (3.0, 0.0));
    }

    #[test]
    fn lines_outside_the_viewport_are_dropped() {
        assert_eq!(clip_line_to_viewport(20.0, 0.0, (0.0, 10.0), (0.0, 10.0)), None);
        assert_eq!(clip_line_to_viewport(-1.0, 90.0, (0.0, 10.0), (0.0, 10.0)), None);
        assert_eq!(clip_line_to_viewport(100.0, 45.0, (0.0, 10.0), (0.0, 10.0)), None);
    }

    #[test]
    fn diagonal_line_crosses_two_borders() {
        // x + y = 5
        let r = 5.0 / 2f64.sqrt();
        let seg = clip_line_to_viewport(r, 45.0, (0.0, 10.0), (0.0, 10.0)).unwrap();
        assert_relative_eq!(seg.start.0, 0.0, epsilon = 1e-9);
        assert_relative_eq!(seg.start.1, 5.0, epsilon = 1e-9);
        assert_relative_eq!(seg.end.0, 5.0, epsilon = 1e-9);
        assert_relative_eq!(seg.end.1, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn corner_to_corner_diagonal_counts_each_corner_once() {
        // y = x enters at the origin and leaves at (10, 10)
        let seg = clip_line_to_viewport(0.0, 135.0, (0.0, 10.0), (0.0, 10.0)).unwrap();
        assert_eq!(seg.start, (0.0, 0.0));
        assert_relative_eq!(seg.end.0, 10.0, epsilon = 1e-9);
        assert_relative_eq!(seg.end.1, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn corner_graze_is_not_a_segment() {
        // x + y = 0 touches the viewport only at the origin
        assert_eq!(clip_line_to_viewport(0.0, 45.0, (0.0, 10.0), (0.0, 10.0)), None);
    }

    #[test]
    fn reversed_limits_are_swapped() {
        let a = clip_line_to_viewport(4.0, 30.0, (10.0, 0.0), (10.0, 0.0));
        let b = clip_line_to_viewport(4.0, 30.0, (0.0, 10.0), (0.0, 10.0));
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn exact_trig_at_quarter_turns() {
        assert_eq!(sin_cos_deg(90.0), (1.0, 0.0));
        assert_eq!(sin_cos_deg(270.0), (-1.0, 0.0));
        assert_eq!(sin_cos_deg(-90.0), (-1.0, 0.0));
        assert_eq!(sin_cos_deg(360.0), (0.0, 1.0));
        let (s, c) = sin_cos_deg(30.0);
        assert_relative_eq!(s, 0.5, epsilon = 1e-12);
        assert_relative_eq!(c, 3f64.sqrt() / 2.0, epsilon = 1e-12);
    }
}
