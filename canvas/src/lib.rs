// canvas/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A CPU raster implementation of the turtle drawing surface.

use image::{ImageFormat, Rgba, RgbaImage};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use turtle_engine::Surface;
use turtle_geometry::{ColorSpec, ColorU, InvalidColor, Point2D};

const HAIRLINE_STROKE_WIDTH: f64 = 1.0;

// Distance between hairline samples, in pixels.
const SAMPLE_SPACING: f64 = 0.5;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// An RGBA pixel buffer addressed in centered, +Y-up coordinates.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
    stroke: ColorU,
    fill: ColorU,
    line_width: f64,
    background: ColorU,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Canvas {
        Canvas {
            image: RgbaImage::new(width, height),
            stroke: ColorU::black(),
            fill: ColorU::black(),
            line_width: 1.0,
            background: ColorU::transparent_black(),
        }
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The pixel under a canvas-space point, if it lies on the canvas.
    pub fn pixel_at(&self, point: Point2D) -> Option<ColorU> {
        let (x, y) = self.to_pixel(point);
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let Rgba([r, g, b, a]) = *self.image.get_pixel(x, y);
        Some(ColorU::new(r, g, b, a))
    }

    /// Number of pixels that differ from the background.
    pub fn painted_pixels(&self) -> usize {
        let background = rgba(self.background);
        self.image.pixels().filter(|&&pixel| pixel != background).count()
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), CanvasError> {
        let path = path.as_ref();
        self.image.save_with_format(path, ImageFormat::Png)?;
        tracing::info!(path = %path.display(), "wrote canvas");
        Ok(())
    }

    #[inline]
    fn to_pixel(&self, point: Point2D) -> (f64, f64) {
        (
            point.x + self.width() as f64 / 2.0,
            self.height() as f64 / 2.0 - point.y,
        )
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: ColorU) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        *pixel = source_over(*pixel, color);
    }

    // Hairlines cover the pixel under each sample along the line.
    fn stroke_hairline(&mut self, start: (f64, f64), end: (f64, f64)) {
        let extent = (self.width() as f64, self.height() as f64);
        let Some((start, end)) = clip_segment(start, end, (0.0, 0.0), extent) else {
            return;
        };
        let length = (end.0 - start.0).hypot(end.1 - start.1);
        let samples = (length / SAMPLE_SPACING).ceil() as usize;

        // Each pixel is blended once so translucent strokes stay even.
        let mut pixels = HashSet::new();
        pixels.insert((start.0.floor() as i64, start.1.floor() as i64));
        for index in 1..=samples {
            let t = index as f64 / samples as f64;
            let x = start.0 + (end.0 - start.0) * t;
            let y = start.1 + (end.1 - start.1) * t;
            pixels.insert((x.floor() as i64, y.floor() as i64));
        }

        let color = self.stroke;
        for (x, y) in pixels {
            self.blend_pixel(x, y, color);
        }
    }

    // Wide strokes cover every on-canvas pixel whose center lies within
    // `radius` of the segment.
    fn stroke_capsule(&mut self, start: (f64, f64), end: (f64, f64), radius: f64) {
        let (width, height) = (self.width() as f64, self.height() as f64);
        let Some((start, end)) =
            clip_segment(start, end, (-radius, -radius), (width + radius, height + radius))
        else {
            return;
        };

        let x0 = (start.0.min(end.0) - radius).floor().max(0.0) as u32;
        let x1 = (start.0.max(end.0) + radius).ceil().min(width) as u32;
        let y0 = (start.1.min(end.1) - radius).floor().max(0.0) as u32;
        let y1 = (start.1.max(end.1) + radius).ceil().min(height) as u32;

        let color = self.stroke;
        for y in y0..y1 {
            for x in x0..x1 {
                let center = (x as f64 + 0.5, y as f64 + 0.5);
                if distance_squared(center, start, end) <= radius * radius {
                    let pixel = self.image.get_pixel_mut(x, y);
                    *pixel = source_over(*pixel, color);
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn create(width: u32, height: u32) -> Canvas {
        Canvas::new(width, height)
    }

    fn clear(&mut self) {
        let background = rgba(self.background);
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
    }

    fn set_stroke_style(&mut self, color: &ColorSpec) -> Result<(), InvalidColor> {
        self.stroke = color.resolve()?;
        Ok(())
    }

    fn set_fill_style(&mut self, color: &ColorSpec) -> Result<(), InvalidColor> {
        self.fill = color.resolve()?;
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width.max(0.0);
    }

    fn set_background(&mut self, color: Option<&ColorSpec>) -> Result<(), InvalidColor> {
        self.background = match color {
            Some(color) => color.resolve()?,
            None => ColorU::transparent_black(),
        };
        Ok(())
    }

    fn stroke_line(&mut self, from: Point2D, to: Point2D) {
        let radius = f64::max(self.line_width, HAIRLINE_STROKE_WIDTH) / 2.0;
        let (start, end) = (self.to_pixel(from), self.to_pixel(to));
        if radius <= 0.5 {
            self.stroke_hairline(start, end);
        } else {
            self.stroke_capsule(start, end, radius);
        }
    }

    fn fill_polygon(&mut self, points: &[Point2D]) {
        if points.len() < 3 {
            return;
        }
        let vertices: Vec<(f64, f64)> = points.iter().map(|&point| self.to_pixel(point)).collect();
        let min_y = vertices.iter().map(|v| v.1).fold(f64::INFINITY, f64::min);
        let max_y = vertices.iter().map(|v| v.1).fold(f64::NEG_INFINITY, f64::max);
        let color = self.fill;

        let mut crossings = vec![];
        for y in (min_y.floor() as i64)..=(max_y.ceil() as i64) {
            let scan = y as f64 + 0.5;
            crossings.clear();
            for (index, &(ax, ay)) in vertices.iter().enumerate() {
                let (bx, by) = vertices[(index + 1) % vertices.len()];
                if (ay <= scan) != (by <= scan) {
                    crossings.push(ax + (scan - ay) / (by - ay) * (bx - ax));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil() as i64;
                let end = (span[1] - 0.5).floor() as i64;
                for x in start..=end {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn composite_from(&mut self, source: &Canvas) {
        for (x, y, pixel) in source.image.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            if a == 0 || x >= self.width() || y >= self.height() {
                continue;
            }
            let target = self.image.get_pixel_mut(x, y);
            *target = source_over(*target, ColorU::new(r, g, b, a));
        }
    }
}

// Liang-Barsky clip of a segment against the rectangle `min..=max`.
fn clip_segment(
    start: (f64, f64),
    end: (f64, f64),
    min: (f64, f64),
    max: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let (mut enter, mut leave) = (0.0f64, 1.0f64);
    let boundaries = [
        (-dx, start.0 - min.0),
        (dx, max.0 - start.0),
        (-dy, start.1 - min.1),
        (dy, max.1 - start.1),
    ];
    for (p, q) in boundaries {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            enter = enter.max(t);
        } else {
            leave = leave.min(t);
        }
        if enter > leave {
            return None;
        }
    }
    Some((
        (start.0 + dx * enter, start.1 + dy * enter),
        (start.0 + dx * leave, start.1 + dy * leave),
    ))
}

fn distance_squared(point: (f64, f64), start: (f64, f64), end: (f64, f64)) -> f64 {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length_squared = dx * dx + dy * dy;
    let t = if length_squared == 0.0 {
        0.0
    } else {
        (((point.0 - start.0) * dx + (point.1 - start.1) * dy) / length_squared).clamp(0.0, 1.0)
    };
    let (nx, ny) = (start.0 + dx * t - point.0, start.1 + dy * t - point.1);
    nx * nx + ny * ny
}

#[inline]
fn rgba(color: ColorU) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

fn source_over(destination: Rgba<u8>, source: ColorU) -> Rgba<u8> {
    match source.a {
        0 => destination,
        255 => rgba(source),
        _ => {
            let sa = source.a as f32 / 255.0;
            let Rgba([dr, dg, db, da]) = destination;
            let da = da as f32 / 255.0;
            let out = sa + da * (1.0 - sa);
            let mix = |s: u8, d: u8| {
                ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out).round() as u8
            };
            Rgba([
                mix(source.r, dr),
                mix(source.g, dg),
                mix(source.b, db),
                (out * 255.0).round() as u8,
            ])
        }
    }
}
