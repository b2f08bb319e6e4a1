// geometry/src/point.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::ops::{Add, Mul, Sub};

/// Stored coordinates keep four fractional digits.
pub const ROUNDING_PRECISION: f64 = 10_000.0;

// Trig components smaller than this are flushed to zero.
const TRIG_EPSILON: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    #[inline]
    pub const fn origin() -> Point2D {
        Point2D::new(0.0, 0.0)
    }

    #[inline]
    pub fn distance_to(self, other: Point2D) -> f64 {
        (other - self).length()
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction of travel from `self` toward `other`, in turtle radians.
    #[inline]
    pub fn bearing_to(self, other: Point2D) -> f64 {
        let delta = other - self;
        delta.x.atan2(delta.y)
    }

    /// Moves `distance` units along the turtle-radian direction `theta`.
    #[inline]
    pub fn advance(self, theta: f64, distance: f64) -> Point2D {
        let (s, c) = heading_vector(theta);
        Point2D::new(self.x + distance * s, self.y + distance * c)
    }

    #[inline]
    pub fn rounded(self) -> Point2D {
        Point2D::new(round_coord(self.x), round_coord(self.y))
    }

    /// Rotates counterclockwise by `radians` about the origin.
    #[inline]
    pub fn rotate(self, radians: f64) -> Point2D {
        let (s, c) = radians.sin_cos();
        Point2D::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }
}

impl Add for Point2D {
    type Output = Point2D;
    #[inline]
    fn add(self, other: Point2D) -> Point2D {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    #[inline]
    fn sub(self, other: Point2D) -> Point2D {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;
    #[inline]
    fn mul(self, factor: f64) -> Point2D {
        Point2D::new(self.x * factor, self.y * factor)
    }
}

impl Display for Point2D {
    fn fmt(&self, formatter: &mut Formatter) -> FormatResult {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

#[inline]
pub fn round_coord(value: f64) -> f64 {
    (value * ROUNDING_PRECISION).round() / ROUNDING_PRECISION
}

/// Returns `(sin theta, cos theta)` with near-zero components snapped to zero,
/// so a move along an axis never drifts across the perpendicular edge.
#[inline]
pub fn heading_vector(theta: f64) -> (f64, f64) {
    let (s, c) = theta.sin_cos();
    (flush(s), flush(c))
}

#[inline]
fn flush(value: f64) -> f64 {
    if value.abs() < TRIG_EPSILON {
        0.0
    } else {
        value
    }
}
