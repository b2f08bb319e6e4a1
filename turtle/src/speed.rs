// turtle/src/speed.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Speed code that disables every playback delay.
pub const FASTEST: u32 = 0;

/// Name to speed-code lookup. Higher codes animate in larger steps; 0 skips
/// pacing altogether.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedTable {
    entries: &'static [(&'static str, u32)],
    fallback: u32,
}

static NAMED_SPEEDS: &[(&str, u32)] = &[
    ("fastest", 0),
    ("fast", 10),
    ("normal", 6),
    ("slow", 3),
    ("slowest", 1),
];

impl SpeedTable {
    #[inline]
    pub fn code_of(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|&(_, code)| code)
    }

    /// The code of "normal", used for unknown names and new sessions.
    #[inline]
    pub fn normal(&self) -> u32 {
        self.fallback
    }

    pub fn resolve(&self, setting: SpeedSetting) -> u32 {
        match setting {
            SpeedSetting::Code(code) => code,
            SpeedSetting::Named(name) => self.code_of(name).unwrap_or_else(|| {
                tracing::warn!(name, fallback = self.fallback, "unknown speed name");
                self.fallback
            }),
        }
    }
}

impl Default for SpeedTable {
    fn default() -> SpeedTable {
        SpeedTable {
            entries: NAMED_SPEEDS,
            fallback: 6,
        }
    }
}

/// Argument to [`crate::Turtle::speed`]: a level name or a raw code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedSetting<'a> {
    Named(&'a str),
    Code(u32),
}

impl<'a> From<&'a str> for SpeedSetting<'a> {
    fn from(name: &'a str) -> SpeedSetting<'a> {
        SpeedSetting::Named(name)
    }
}

impl From<u32> for SpeedSetting<'static> {
    fn from(code: u32) -> SpeedSetting<'static> {
        SpeedSetting::Code(code)
    }
}
