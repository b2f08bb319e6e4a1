// turtle/src/tracer.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Splits a straight move into drawn segments and edge-to-edge jumps.
//!
//! With wrapping enabled, a move that would leave the canvas is cut at the
//! edge it crosses and resumes from the mirrored point on the opposite edge,
//! keeping its direction and the distance still to travel. Edges are tested
//! in a fixed order: right, left, top, bottom.

use crate::config::Bounds;
use turtle_geometry::{heading_vector, Point2D};

/// Upper bound on edge crossings for a single move.
pub const MAX_WRAPS: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceStep {
    /// Animated move to the point; drawn if the pen is down.
    Draw(Point2D),
    /// Instant relocation, never drawn.
    Jump(Point2D),
}

impl TraceStep {
    #[inline]
    pub fn point(&self) -> Point2D {
        match *self {
            TraceStep::Draw(point) | TraceStep::Jump(point) => point,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

// Crossings closer together than this are resolved by edge priority.
const TIE_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug)]
struct Crossing {
    axis: Axis,
    cut: f64,
    opposite: f64,
    to_edge: f64,
}

/// Traces a move from `from` to `to` travelling along `theta` (turtle
/// radians). All emitted points are rounded to four decimals.
///
/// Edge priority (right, left, top, bottom) only picks which X and which Y
/// edge are candidates. When the move passes both, it wraps at the one it
/// reaches first, and near-ties go to the X edge. A strict priority scan
/// would cut at the X edge even when the Y edge comes first, drawing past the
/// canvas near its corners.
pub fn trace(bounds: &Bounds, from: Point2D, to: Point2D, theta: f64, wrap: bool) -> Vec<TraceStep> {
    if !wrap {
        return vec![TraceStep::Draw(to.rounded())];
    }

    let (sin, cos) = heading_vector(theta);
    let mut remaining = from.distance_to(to);
    let mut steps = vec![];
    let mut current = from;
    let mut wraps = 0;

    while remaining > 0.0 {
        let candidate = Point2D::new(current.x + remaining * sin, current.y + remaining * cos);
        let crossing = match find_crossing(bounds, current, candidate, sin, cos) {
            Some(crossing) if wraps < MAX_WRAPS => crossing,
            Some(_) => {
                tracing::warn!(wraps, remaining, "wrap limit reached, finishing move unwrapped");
                steps.push(TraceStep::Draw(candidate.rounded()));
                break;
            }
            None => {
                steps.push(TraceStep::Draw(candidate.rounded()));
                break;
            }
        };

        let (edge, mirrored) = match crossing.axis {
            Axis::X => {
                let y = current.y + cos * crossing.to_edge;
                (Point2D::new(crossing.cut, y), Point2D::new(crossing.opposite, y))
            }
            Axis::Y => {
                let x = current.x + sin * crossing.to_edge;
                (Point2D::new(x, crossing.cut), Point2D::new(x, crossing.opposite))
            }
        };

        steps.push(TraceStep::Draw(edge.rounded()));
        remaining -= crossing.to_edge;
        current = mirrored.rounded();
        steps.push(TraceStep::Jump(current));
        wraps += 1;
    }

    steps
}

// Edges are tested right, left, top, bottom. When the candidate lies past both
// an X and a Y edge, the one the ray meets first wins; exact corners go to X.
fn find_crossing(
    bounds: &Bounds,
    current: Point2D,
    candidate: Point2D,
    sin: f64,
    cos: f64,
) -> Option<Crossing> {
    let x_edge = if candidate.x > bounds.max_x {
        Some((bounds.max_x, bounds.min_x))
    } else if candidate.x < bounds.min_x {
        Some((bounds.min_x, bounds.max_x))
    } else {
        None
    };
    let y_edge = if candidate.y > bounds.max_y {
        Some((bounds.max_y, bounds.min_y))
    } else if candidate.y < bounds.min_y {
        Some((bounds.min_y, bounds.max_y))
    } else {
        None
    };

    let x = x_edge.and_then(|(cut, opposite)| edge_crossing(Axis::X, cut, opposite, current.x, sin));
    let y = y_edge.and_then(|(cut, opposite)| edge_crossing(Axis::Y, cut, opposite, current.y, cos));
    match (x, y) {
        (Some(x), Some(y)) if y.to_edge < x.to_edge - TIE_EPSILON => Some(y),
        (Some(x), _) => Some(x),
        (None, y) => y,
    }
}

fn edge_crossing(axis: Axis, cut: f64, opposite: f64, along: f64, trig: f64) -> Option<Crossing> {
    // A zero component never reaches the edge; it also guards the division.
    if trig == 0.0 {
        return None;
    }
    let offset = cut - along;
    // Starting outside the canvas and heading further out: the edge is behind.
    if offset * trig < 0.0 {
        return None;
    }
    Some(Crossing {
        axis,
        cut,
        opposite,
        to_edge: offset.abs() / trig.abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    fn square(size: f64) -> Bounds {
        Bounds::new(size, size).unwrap()
    }

    fn drawn_length(from: Point2D, steps: &[TraceStep]) -> f64 {
        let mut total = 0.0;
        let mut at = from;
        for step in steps {
            if let TraceStep::Draw(point) = *step {
                total += at.distance_to(point);
            }
            at = step.point();
        }
        total
    }

    #[test]
    fn stays_inside_without_crossing() {
        let steps = trace(&square(200.0), Point2D::origin(), Point2D::new(0.0, 50.0), 0.0, true);
        assert_eq!(steps, vec![TraceStep::Draw(Point2D::new(0.0, 50.0))]);
    }

    #[test]
    fn zero_distance_emits_nothing() {
        let steps = trace(&square(200.0), Point2D::new(3.0, 4.0), Point2D::new(3.0, 4.0), 1.0, true);
        assert!(steps.is_empty());
    }

    #[test]
    fn unwrapped_move_goes_straight_to_target() {
        let to = Point2D::new(1000.123_456, -999.0);
        let steps = trace(&square(10.0), Point2D::origin(), to, 2.0, false);
        assert_eq!(steps, vec![TraceStep::Draw(Point2D::new(1000.1235, -999.0))]);
    }

    #[test]
    fn two_widths_right_crosses_the_right_edge_twice() {
        let bounds = square(200.0);
        let steps = trace(&bounds, Point2D::origin(), Point2D::new(400.0, 0.0), FRAC_PI_2, true);
        assert_eq!(
            steps,
            vec![
                TraceStep::Draw(Point2D::new(100.0, 0.0)),
                TraceStep::Jump(Point2D::new(-100.0, 0.0)),
                TraceStep::Draw(Point2D::new(100.0, 0.0)),
                TraceStep::Jump(Point2D::new(-100.0, 0.0)),
                TraceStep::Draw(Point2D::new(0.0, 0.0)),
            ]
        );
        assert!((drawn_length(Point2D::origin(), &steps) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn corner_wrap_crosses_x_then_y() {
        let bounds = square(200.0);
        let theta = 45f64.to_radians();
        let from = Point2D::new(90.0, 90.0);
        let to = from.advance(theta, 50.0);
        let steps = trace(&bounds, from, to, theta, true);

        let jumps: Vec<Point2D> = steps
            .iter()
            .filter_map(|step| match *step {
                TraceStep::Jump(point) => Some(point),
                TraceStep::Draw(_) => None,
            })
            .collect();
        assert_eq!(jumps, vec![Point2D::new(-100.0, 100.0), Point2D::new(-100.0, -100.0)]);
        assert_eq!(steps[0], TraceStep::Draw(Point2D::new(100.0, 100.0)));

        let last = steps.last().unwrap().point();
        let expected = 90.0 + 50.0 * theta.sin() - 200.0;
        assert!((last.x - expected).abs() < 1e-4);
        assert!((last.y - expected).abs() < 1e-4);
    }

    #[test]
    fn nearer_top_edge_wins_over_the_right_edge() {
        let bounds = square(200.0);
        let theta = 45f64.to_radians();
        let from = Point2D::new(90.0, 95.0);
        let to = from.advance(theta, 20.0);
        let steps = trace(&bounds, from, to, theta, true);

        assert_eq!(steps[0], TraceStep::Draw(Point2D::new(95.0, 100.0)));
        assert_eq!(steps[1], TraceStep::Jump(Point2D::new(95.0, -100.0)));
        assert_eq!(steps[2], TraceStep::Draw(Point2D::new(100.0, -95.0)));
        assert_eq!(steps[3], TraceStep::Jump(Point2D::new(-100.0, -95.0)));
        assert!((drawn_length(from, &steps) - 20.0).abs() < 1e-3);
    }

    #[test]
    fn moving_down_along_the_right_edge_never_wraps_horizontally() {
        let bounds = square(200.0);
        let from = Point2D::new(100.0, 50.0);
        let steps = trace(&bounds, from, Point2D::new(100.0, 0.0), std::f64::consts::PI, true);
        assert_eq!(steps, vec![TraceStep::Draw(Point2D::new(100.0, 0.0))]);
    }

    #[test]
    fn wrap_limit_stops_runaway_moves() {
        let bounds = square(1.0);
        let to = Point2D::new(0.0, 1e9);
        let steps = trace(&bounds, Point2D::origin(), to, 0.0, true);
        assert_eq!(steps.len(), MAX_WRAPS * 2 + 1);
    }

    proptest! {
        #[test]
        fn drawn_segments_add_up_to_the_move(
            x in -99.0f64..99.0,
            y in -99.0f64..99.0,
            degrees in 0.0f64..360.0,
            distance in 0.0f64..900.0
        ) {
            let bounds = square(200.0);
            let from = Point2D::new(x, y).rounded();
            let theta = degrees.to_radians();
            let to = from.advance(theta, distance);
            let steps = trace(&bounds, from, to, theta, true);

            let tolerance = 1e-3 * (steps.len() as f64 + 1.0);
            prop_assert!((drawn_length(from, &steps) - distance).abs() < tolerance);
            for step in &steps {
                let p = step.point();
                prop_assert!(p.x.abs() <= 100.0 + 1e-6 && p.y.abs() <= 100.0 + 1e-6);
            }
        }

        #[test]
        fn disabled_wrap_is_a_single_step(
            x in -1e4f64..1e4,
            y in -1e4f64..1e4,
            degrees in 0.0f64..360.0,
        ) {
            let to = Point2D::new(x, y);
            let steps = trace(&square(20.0), Point2D::origin(), to, degrees.to_radians(), false);
            prop_assert_eq!(steps, vec![TraceStep::Draw(to.rounded())]);
        }
    }
}
