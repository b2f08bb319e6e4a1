// turtle/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Records turtle commands as state snapshots and plays them back as an
//! animated drawing.
//!
//! Commands never draw directly. Each one updates the session's working
//! state and queues a snapshot in the [`CommandLog`] when the state changed;
//! moves that leave the canvas are split at the edge by the [`tracer`].
//! [`Turtle::play`] later drains the log onto a [`Stage`], pacing the
//! animation through a [`Pacer`].

pub mod config;
pub mod pacer;
pub mod playback;
pub mod recording;
pub mod script;
pub mod snapshot;
pub mod speed;
pub mod surface;
pub mod tracer;
pub mod turtle;

pub use crate::config::{Bounds, TurtleConfig};
pub use crate::pacer::{Pacer, RecordingPacer, ThreadPacer, Unpaced};
pub use crate::playback::PlaybackReport;
pub use crate::recording::RecordingSurface;
pub use crate::snapshot::{diff, Changes, CommandLog, Snapshot};
pub use crate::speed::{SpeedSetting, SpeedTable};
pub use crate::surface::{Stage, Surface};
pub use crate::turtle::Turtle;

pub use turtle_geometry::{ColorSpec, ColorU, InvalidColor, Point2D};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TurtleError {
    #[error(transparent)]
    InvalidColor(#[from] InvalidColor),

    #[error("canvas must have a positive size, got {width}x{height}")]
    EmptyCanvas { width: f64, height: f64 },

    #[error("script error: {0}")]
    Script(#[from] uturtle::ScriptError),
}
