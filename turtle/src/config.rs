// turtle/src/config.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::snapshot::Snapshot;
use crate::speed::SpeedTable;
use crate::TurtleError;
use std::time::Duration;
use turtle_geometry::ColorSpec;

/// One animation frame at 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

#[derive(Clone, Debug, PartialEq)]
pub struct TurtleConfig {
    pub width: u32,
    pub height: u32,
    /// Pause after each drawn state change.
    pub step_interval: Duration,
    /// Pause between interpolation frames.
    pub frame_interval: Duration,
    pub speeds: SpeedTable,
    /// Seeds `Turtle::random`; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for TurtleConfig {
    fn default() -> TurtleConfig {
        TurtleConfig {
            width: 400,
            height: 400,
            step_interval: FRAME_INTERVAL,
            frame_interval: FRAME_INTERVAL,
            speeds: SpeedTable::default(),
            seed: None,
        }
    }
}

impl TurtleConfig {
    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> TurtleConfig {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn step_interval(mut self, interval: Duration) -> TurtleConfig {
        self.step_interval = interval;
        self
    }

    #[must_use]
    pub fn frame_interval(mut self, interval: Duration) -> TurtleConfig {
        self.frame_interval = interval;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> TurtleConfig {
        self.seed = Some(seed);
        self
    }

    pub fn bounds(&self) -> Result<Bounds, TurtleError> {
        Bounds::new(self.width as f64, self.height as f64)
    }

    /// State of a fresh session: origin, facing up, pen down, black, visible.
    pub fn initial_state(&self) -> Snapshot {
        Snapshot {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            pen_down: true,
            width: 1.0,
            visible: true,
            redraw: true,
            wrap: true,
            color: ColorSpec::black(),
            bg_color: None,
            speed: self.speeds.normal(),
            clear_requested: false,
            animate_movement: true,
            instant: false,
        }
    }
}

/// Canvas half extents, symmetric about the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Result<Bounds, TurtleError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(TurtleError::EmptyCanvas { width, height });
        }
        Ok(Bounds {
            min_x: -width / 2.0,
            max_x: width / 2.0,
            min_y: -height / 2.0,
            max_y: height / 2.0,
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
