// turtle/src/surface.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The drawing primitives playback needs from a rendering backend.

use crate::snapshot::Snapshot;
use turtle_geometry::{ColorSpec, InvalidColor, Point2D};

/// Distance from the turtle's position to the icon's tip.
pub const ICON_TIP: f64 = 10.0;
/// Distance from the turtle's position back to the icon's base.
pub const ICON_TAIL: f64 = 5.0;
pub const ICON_HALF_BASE: f64 = 6.0;

/// A drawing target. Coordinates are centered on the surface with +Y up.
pub trait Surface {
    fn create(width: u32, height: u32) -> Self
    where
        Self: Sized;

    fn clear(&mut self);

    fn set_stroke_style(&mut self, color: &ColorSpec) -> Result<(), InvalidColor>;

    fn set_fill_style(&mut self, color: &ColorSpec) -> Result<(), InvalidColor>;

    /// Negative widths draw as zero.
    fn set_line_width(&mut self, width: f64);

    /// `None` restores the default (transparent) background.
    fn set_background(&mut self, color: Option<&ColorSpec>) -> Result<(), InvalidColor>;

    fn stroke_line(&mut self, from: Point2D, to: Point2D);

    fn fill_polygon(&mut self, points: &[Point2D]);

    /// Draws the full content of `source` over this surface.
    fn composite_from(&mut self, source: &Self)
    where
        Self: Sized;
}

/// The persistent trace plus the visible surface it is shown on.
#[derive(Debug)]
pub struct Stage<S> {
    pub trace: S,
    pub display: S,
}

impl<S> Stage<S>
where
    S: Surface,
{
    pub fn new(width: u32, height: u32) -> Stage<S> {
        Stage {
            trace: S::create(width, height),
            display: S::create(width, height),
        }
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Pen width, pen color and background take effect immediately.
    pub fn apply_style(&mut self, state: &Snapshot) -> Result<(), InvalidColor> {
        self.trace.set_line_width(state.width);
        self.trace.set_stroke_style(&state.color)?;
        self.display.set_background(state.bg_color.as_ref())
    }

    pub fn stroke(&mut self, from: Point2D, to: Point2D) {
        self.trace.stroke_line(from, to);
    }

    /// Rebuilds the display: background, the trace, then the turtle icon.
    pub fn redraw(&mut self, state: &Snapshot) -> Result<(), InvalidColor> {
        self.display.clear();
        self.display.composite_from(&self.trace);
        if state.visible {
            self.display.set_fill_style(&state.color)?;
            self.display
                .fill_polygon(&icon_polygon(state.position(), state.angle));
        }
        Ok(())
    }
}

/// The turtle icon: an isosceles triangle pointing along `angle` (degrees,
/// clockwise from up).
pub fn icon_polygon(position: Point2D, angle: f64) -> [Point2D; 3] {
    let rotation = -angle.to_radians();
    [
        Point2D::new(0.0, ICON_TIP),
        Point2D::new(-ICON_HALF_BASE, -ICON_TAIL),
        Point2D::new(ICON_HALF_BASE, -ICON_TAIL),
    ]
    .map(|corner| position + corner.rotate(rotation))
}
