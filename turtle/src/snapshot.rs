// turtle/src/snapshot.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turtle state snapshots and the command log they are queued in.

use bitflags::bitflags;
use std::fmt::{Display, Formatter, Result as FormatResult};
use turtle_geometry::{ColorSpec, Point2D};

/// The full turtle state at one instant.
///
/// Once a snapshot is in the [`CommandLog`] it is never mutated again; the
/// session keeps its own working copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub x: f64,
    pub y: f64,
    /// Degrees, 0 faces up, clockwise positive. Never normalized.
    pub angle: f64,
    pub pen_down: bool,
    pub width: f64,
    pub visible: bool,
    pub redraw: bool,
    pub wrap: bool,
    pub color: ColorSpec,
    pub bg_color: Option<ColorSpec>,
    pub speed: u32,
    pub clear_requested: bool,
    /// Whether the transition into this snapshot is interpolated.
    pub animate_movement: bool,
    pub instant: bool,
}

impl Snapshot {
    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Returns every field that differs between `self` and `other`.
    pub fn changes(&self, other: &Snapshot) -> Changes {
        let mut changes = Changes::empty();
        changes.set(Changes::POSITION, self.x != other.x || self.y != other.y);
        changes.set(Changes::ANGLE, self.angle != other.angle);
        changes.set(Changes::PEN_DOWN, self.pen_down != other.pen_down);
        changes.set(Changes::WIDTH, self.width != other.width);
        changes.set(Changes::VISIBLE, self.visible != other.visible);
        changes.set(Changes::REDRAW, self.redraw != other.redraw);
        changes.set(Changes::WRAP, self.wrap != other.wrap);
        changes.set(Changes::COLOR, self.color != other.color);
        changes.set(Changes::BG_COLOR, self.bg_color != other.bg_color);
        changes.set(Changes::SPEED, self.speed != other.speed);
        changes.set(Changes::CLEAR, self.clear_requested != other.clear_requested);
        changes.set(Changes::ANIMATE, self.animate_movement != other.animate_movement);
        changes.set(Changes::INSTANT, self.instant != other.instant);
        changes
    }
}

bitflags! {
    // NB: If you change this, make sure to update the `Display`
    // implementation as well.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Changes: u16 {
        const POSITION  = 0x0001;
        const ANGLE     = 0x0002;
        const PEN_DOWN  = 0x0004;
        const WIDTH     = 0x0008;
        const VISIBLE   = 0x0010;
        const REDRAW    = 0x0020;
        const WRAP      = 0x0040;
        const COLOR     = 0x0080;
        const BG_COLOR  = 0x0100;
        const SPEED     = 0x0200;
        const CLEAR     = 0x0400;
        const ANIMATE   = 0x0800;
        const INSTANT   = 0x1000;
    }
}

impl Display for Changes {
    fn fmt(&self, formatter: &mut Formatter) -> FormatResult {
        if self.is_empty() {
            return formatter.write_str("none");
        }

        let mut first = true;
        for (bit, name) in NAMES.iter().enumerate() {
            if (self.bits() >> bit) & 1 == 0 {
                continue;
            }
            if !first {
                formatter.write_str(", ")?;
            } else {
                first = false;
            }
            formatter.write_str(name)?;
        }

        return Ok(());

        // Must match the order in `Changes`.
        static NAMES: &[&str] = &[
            "position",
            "angle",
            "pen",
            "width",
            "visible",
            "redraw",
            "wrap",
            "color",
            "background",
            "speed",
            "clear",
            "animate",
            "instant",
        ];
    }
}

/// True iff `current` differs from `previous` in any field, or there is no
/// previous snapshot.
#[inline]
pub fn diff(previous: Option<&Snapshot>, current: &Snapshot) -> bool {
    previous.map_or(true, |previous| !previous.changes(current).is_empty())
}

/// Ordered snapshots awaiting playback.
#[derive(Clone, Debug, Default)]
pub struct CommandLog {
    entries: Vec<Snapshot>,
}

impl CommandLog {
    pub fn new() -> CommandLog {
        CommandLog::default()
    }

    /// Appends a copy of `state` unless it equals the current tail.
    pub fn append(&mut self, state: &Snapshot) -> bool {
        if !diff(self.entries.last(), state) {
            return false;
        }
        if let Some(tail) = self.entries.last() {
            tracing::trace!(changes = %tail.changes(state), len = self.entries.len() + 1, "append");
        }
        self.entries.push(state.clone());
        true
    }

    /// Takes every queued snapshot, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Snapshot> {
        std::mem::take(&mut self.entries)
    }

    #[inline]
    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    #[inline]
    pub fn last(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TurtleConfig;

    fn initial() -> Snapshot {
        TurtleConfig::default().initial_state()
    }

    #[test]
    fn identical_snapshots_collapse() {
        let mut log = CommandLog::new();
        let state = initial();
        assert!(log.append(&state));
        assert!(!log.append(&state));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn restoring_a_previous_value_still_appends() {
        let mut log = CommandLog::new();
        let a = initial();
        let b = Snapshot { pen_down: false, ..a.clone() };
        assert!(log.append(&a));
        assert!(log.append(&b));
        assert!(log.append(&a));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn diff_treats_missing_side_as_different() {
        let state = initial();
        assert!(diff(None, &state));
        assert!(!diff(Some(&state), &state));
    }

    #[test]
    fn changes_name_each_field() {
        let a = initial();
        let b = Snapshot {
            x: 1.0,
            color: ColorSpec::new("red"),
            ..a.clone()
        };
        let changes = a.changes(&b);
        assert_eq!(changes, Changes::POSITION | Changes::COLOR);
        assert_eq!(changes.to_string(), "position, color");
        assert_eq!(Changes::empty().to_string(), "none");
    }

    #[test]
    fn drain_empties_the_log() {
        let mut log = CommandLog::new();
        log.append(&initial());
        assert_eq!(log.drain().len(), 1);
        assert!(log.is_empty());
        assert!(log.drain().is_empty());
    }
}
