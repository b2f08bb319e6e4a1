// geometry/src/color.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Color specs as the turtle records them, and their resolution to RGBA.

use regex::Regex;
use std::fmt::{Display, Formatter, Result as FormatResult};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorU {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorU {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> ColorU {
        ColorU { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> ColorU {
        ColorU::new(0, 0, 0, 255)
    }

    #[inline]
    pub const fn transparent_black() -> ColorU {
        ColorU::new(0, 0, 0, 0)
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color: {spec:?}")]
pub struct InvalidColor {
    pub spec: String,
}

/// An unresolved color, kept as written so snapshots compare by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorSpec(String);

impl ColorSpec {
    pub fn new<S: Into<String>>(spec: S) -> ColorSpec {
        ColorSpec(spec.into())
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
        ColorSpec(format!("rgb({}, {}, {})", r, g, b))
    }

    /// `alpha` is clamped to `0.0..=1.0`.
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> ColorSpec {
        ColorSpec(format!("rgba({}, {}, {}, {})", r, g, b, alpha.clamp(0.0, 1.0)))
    }

    pub fn black() -> ColorSpec {
        ColorSpec::new("black")
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn resolve(&self) -> Result<ColorU, InvalidColor> {
        let spec = self.0.trim().to_ascii_lowercase();
        let resolved = if let Some(hex) = spec.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(captures) = functional_regex().captures(&spec) {
            parse_functional(&captures)
        } else {
            named_color(&spec)
        };
        resolved.ok_or_else(|| InvalidColor { spec: self.0.clone() })
    }
}

impl Display for ColorSpec {
    fn fmt(&self, formatter: &mut Formatter) -> FormatResult {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for ColorSpec {
    fn from(spec: &str) -> ColorSpec {
        ColorSpec::new(spec)
    }
}

impl From<String> for ColorSpec {
    fn from(spec: String) -> ColorSpec {
        ColorSpec(spec)
    }
}

impl From<(u8, u8, u8)> for ColorSpec {
    fn from((r, g, b): (u8, u8, u8)) -> ColorSpec {
        ColorSpec::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, f32)> for ColorSpec {
    fn from((r, g, b, a): (u8, u8, u8, f32)) -> ColorSpec {
        ColorSpec::rgba(r, g, b, a)
    }
}

impl From<ColorU> for ColorSpec {
    fn from(color: ColorU) -> ColorSpec {
        if color.is_opaque() {
            ColorSpec::rgb(color.r, color.g, color.b)
        } else {
            ColorSpec::rgba(color.r, color.g, color.b, color.a as f32 / 255.0)
        }
    }
}

fn functional_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
        )
        .expect("color regex is valid")
    })
}

fn parse_functional(captures: &regex::Captures) -> Option<ColorU> {
    let channel = |index: usize| -> Option<u8> { captures.get(index)?.as_str().parse().ok() };
    let a = match captures.get(4) {
        Some(alpha) => {
            let alpha: f32 = alpha.as_str().parse().ok()?;
            (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };
    Some(ColorU::new(channel(1)?, channel(2)?, channel(3)?, a))
}

fn parse_hex(hex: &str) -> Option<ColorU> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(ColorU::new(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        4 => Some(ColorU::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(ColorU::new(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(ColorU::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<ColorU> {
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, (r, g, b, a))| ColorU::new(r, g, b, a))
}

static NAMED_COLORS: &[(&str, (u8, u8, u8, u8))] = &[
    ("transparent", (0, 0, 0, 0)),
    ("black", (0, 0, 0, 255)),
    ("silver", (192, 192, 192, 255)),
    ("gray", (128, 128, 128, 255)),
    ("grey", (128, 128, 128, 255)),
    ("white", (255, 255, 255, 255)),
    ("maroon", (128, 0, 0, 255)),
    ("red", (255, 0, 0, 255)),
    ("purple", (128, 0, 128, 255)),
    ("fuchsia", (255, 0, 255, 255)),
    ("magenta", (255, 0, 255, 255)),
    ("green", (0, 128, 0, 255)),
    ("lime", (0, 255, 0, 255)),
    ("olive", (128, 128, 0, 255)),
    ("yellow", (255, 255, 0, 255)),
    ("navy", (0, 0, 128, 255)),
    ("blue", (0, 0, 255, 255)),
    ("teal", (0, 128, 128, 255)),
    ("aqua", (0, 255, 255, 255)),
    ("cyan", (0, 255, 255, 255)),
    ("orange", (255, 165, 0, 255)),
    ("brown", (165, 42, 42, 255)),
    ("pink", (255, 192, 203, 255)),
    ("gold", (255, 215, 0, 255)),
    ("violet", (238, 130, 238, 255)),
    ("indigo", (75, 0, 130, 255)),
];
