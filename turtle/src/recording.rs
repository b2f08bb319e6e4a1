// turtle/src/recording.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A headless surface that records every call instead of drawing.

use crate::surface::Surface;
use turtle_geometry::{ColorSpec, ColorU, InvalidColor, Point2D};

#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Clear,
    StrokeStyle(ColorU),
    FillStyle(ColorU),
    LineWidth(f64),
    Background(Option<ColorU>),
    StrokeLine(Point2D, Point2D),
    FillPolygon(Vec<Point2D>),
    /// Number of ops the source surface held when composited.
    Composite(usize),
}

/// A stroked segment together with the pen it was drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub from: Point2D,
    pub to: Point2D,
    pub color: ColorU,
    pub width: f64,
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Every line drawn since the last clear, with the style in effect.
    pub fn strokes(&self) -> Vec<Stroke> {
        let mut strokes = vec![];
        let mut color = ColorU::black();
        let mut width = 1.0;
        for op in &self.ops {
            match *op {
                SurfaceOp::Clear => strokes.clear(),
                SurfaceOp::StrokeStyle(c) => color = c,
                SurfaceOp::LineWidth(w) => width = w,
                SurfaceOp::StrokeLine(from, to) => strokes.push(Stroke {
                    from,
                    to,
                    color,
                    width,
                }),
                _ => {}
            }
        }
        strokes
    }

    pub fn count(&self, matches: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.ops.iter().filter(|op| matches(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn create(width: u32, height: u32) -> RecordingSurface {
        RecordingSurface {
            width,
            height,
            ops: vec![],
        }
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn set_stroke_style(&mut self, color: &ColorSpec) -> Result<(), InvalidColor> {
        self.ops.push(SurfaceOp::StrokeStyle(color.resolve()?));
        Ok(())
    }

    fn set_fill_style(&mut self, color: &ColorSpec) -> Result<(), InvalidColor> {
        self.ops.push(SurfaceOp::FillStyle(color.resolve()?));
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(SurfaceOp::LineWidth(width.max(0.0)));
    }

    fn set_background(&mut self, color: Option<&ColorSpec>) -> Result<(), InvalidColor> {
        let color = color.map(ColorSpec::resolve).transpose()?;
        self.ops.push(SurfaceOp::Background(color));
        Ok(())
    }

    fn stroke_line(&mut self, from: Point2D, to: Point2D) {
        self.ops.push(SurfaceOp::StrokeLine(from, to));
    }

    fn fill_polygon(&mut self, points: &[Point2D]) {
        self.ops.push(SurfaceOp::FillPolygon(points.to_vec()));
    }

    fn composite_from(&mut self, source: &RecordingSurface) {
        self.ops.push(SurfaceOp::Composite(source.ops.len()));
    }
}
