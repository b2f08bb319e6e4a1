// turtle/src/turtle.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The command layer: every call updates the working state and queues a
//! snapshot when something changed.

use crate::config::{Bounds, TurtleConfig};
use crate::snapshot::{CommandLog, Snapshot};
use crate::speed::SpeedSetting;
use crate::tracer::{self, TraceStep};
use crate::TurtleError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use turtle_geometry::{ColorSpec, Point2D};

#[derive(Debug)]
pub struct Turtle {
    pub(crate) config: TurtleConfig,
    bounds: Bounds,
    state: Snapshot,
    pub(crate) log: CommandLog,
    /// Last snapshot played back; the next batch animates from here.
    pub(crate) anchor: Option<Snapshot>,
    rng: StdRng,
}

impl Default for Turtle {
    fn default() -> Turtle {
        Turtle::new()
    }
}

impl Turtle {
    pub fn new() -> Turtle {
        Turtle::with_config(TurtleConfig::default()).expect("default canvas is not empty")
    }

    pub fn with_config(config: TurtleConfig) -> Result<Turtle, TurtleError> {
        let bounds = config.bounds()?;
        let state = config.initial_state();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Turtle {
            config,
            bounds,
            anchor: Some(state.clone()),
            state,
            log: CommandLog::new(),
            rng,
        })
    }

    #[inline]
    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// The working state commands mutate.
    #[inline]
    pub fn state(&self) -> &Snapshot {
        &self.state
    }

    /// Snapshots queued since the last playback.
    #[inline]
    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    fn apply<F>(&mut self, change: F)
    where
        F: FnOnce(Snapshot) -> Snapshot,
    {
        self.state = change(self.state.clone());
        self.log.append(&self.state);
    }

    pub fn forward(&mut self, distance: f64) {
        tracing::trace!(distance, "forward");
        let from = self.state.position();
        let heading = self.state.angle.to_radians();
        let to = from.advance(heading, distance);
        let theta = if distance < 0.0 { heading + PI } else { heading };
        self.travel(from, to, theta);
    }

    pub fn backward(&mut self, distance: f64) {
        self.forward(-distance);
    }

    /// Moves in a straight line to `(x, y)` whatever the current heading,
    /// which is left unchanged.
    pub fn goto(&mut self, x: f64, y: f64) {
        tracing::trace!(x, y, "goto");
        let from = self.state.position();
        let to = Point2D::new(x, y);
        self.travel(from, to, from.bearing_to(to));
    }

    fn travel(&mut self, from: Point2D, to: Point2D, theta: f64) {
        for step in tracer::trace(&self.bounds, from, to, theta, self.state.wrap) {
            match step {
                TraceStep::Draw(point) => self.apply(|state| Snapshot {
                    x: point.x,
                    y: point.y,
                    ..state
                }),
                TraceStep::Jump(point) => self.teleport(point.x, point.y),
            }
        }
    }

    /// Relocates without animating the transition.
    pub fn teleport(&mut self, x: f64, y: f64) {
        let to = Point2D::new(x, y).rounded();
        let animate = self.state.animate_movement;
        self.apply(|state| Snapshot {
            x: to.x,
            y: to.y,
            animate_movement: false,
            ..state
        });
        self.state.animate_movement = animate;
    }

    pub fn set_heading(&mut self, degrees: f64) {
        self.apply(|state| Snapshot {
            angle: degrees,
            ..state
        });
    }

    pub fn right(&mut self, degrees: f64) {
        self.apply(|state| Snapshot {
            angle: state.angle + degrees,
            ..state
        });
    }

    pub fn left(&mut self, degrees: f64) {
        self.apply(|state| Snapshot {
            angle: state.angle - degrees,
            ..state
        });
    }

    pub fn pen_up(&mut self) {
        self.apply(|state| Snapshot {
            pen_down: false,
            ..state
        });
    }

    pub fn pen_down(&mut self) {
        self.apply(|state| Snapshot {
            pen_down: true,
            ..state
        });
    }

    pub fn width(&mut self, width: f64) {
        self.apply(|state| Snapshot { width, ..state });
    }

    /// Accepts a color string, `(r, g, b)` or `(r, g, b, alpha)`.
    pub fn color<C: Into<ColorSpec>>(&mut self, color: C) {
        let color = color.into();
        self.apply(|state| Snapshot { color, ..state });
    }

    pub fn bg_color<C: Into<ColorSpec>>(&mut self, color: C) {
        let bg_color = Some(color.into());
        self.apply(|state| Snapshot { bg_color, ..state });
    }

    pub fn wrap(&mut self, wrap: bool) {
        self.apply(|state| Snapshot { wrap, ..state });
    }

    pub fn show_hide(&mut self, visible: bool) {
        self.apply(|state| Snapshot { visible, ..state });
    }

    pub fn show_turtle(&mut self) {
        self.show_hide(true);
    }

    pub fn hide_turtle(&mut self) {
        self.show_hide(false);
    }

    pub fn redraw_on_move(&mut self, redraw: bool) {
        self.apply(|state| Snapshot { redraw, ..state });
    }

    pub fn speed<'a, S: Into<SpeedSetting<'a>>>(&mut self, speed: S) {
        let speed = self.config.speeds.resolve(speed.into());
        self.apply(|state| Snapshot { speed, ..state });
    }

    /// Requests a clear of the trace; only the next queued snapshot carries it.
    pub fn clear(&mut self) {
        self.apply(|state| Snapshot {
            clear_requested: true,
            ..state
        });
        self.state.clear_requested = false;
    }

    /// Back to the initial state with a cleared trace. The jump home is not
    /// animated.
    pub fn reset(&mut self) {
        tracing::trace!("reset");
        let initial = self.config.initial_state();
        self.apply(|_| Snapshot {
            clear_requested: true,
            animate_movement: false,
            ..initial
        });
        self.state.clear_requested = false;
        self.state.animate_movement = true;
    }

    /// Faces up and jumps to the origin, without any playback delay.
    pub fn home(&mut self) {
        let instant = self.state.instant;
        self.state.instant = true;
        self.set_heading(0.0);
        self.teleport(0.0, 0.0);
        self.state.instant = instant;
    }

    #[inline]
    pub fn position(&self) -> Point2D {
        self.state.position()
    }

    #[inline]
    pub fn heading(&self) -> f64 {
        self.state.angle
    }

    /// Uniform integer in `low..=high`; the bounds may come in either order.
    pub fn random(&mut self, low: i64, high: i64) -> i64 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.rng.gen_range(low..=high)
    }

    pub fn repeat<F>(&mut self, times: usize, mut action: F)
    where
        F: FnMut(&mut Turtle),
    {
        for _ in 0..times {
            action(self);
        }
    }
}
