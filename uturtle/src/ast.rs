// uturtle/src/ast.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Inspiration for the commands are from https://docs.kde.org/trunk5/en/kdeedu/kturtle/commands.html

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Reset,
    Clear,
    PenUp,
    PenDown,
    Forward(Value),
    Backward(Value),
    TurnLeft(Value),
    TurnRight(Value),
    Direction(Value),
    Go(Value, Value),
    Teleport(Value, Value),
    Home,
    PenWidth(Value),
    PenColor(Color),
    CanvasColor(Color),
    Wrap(bool),
    Show,
    Hide,
    Redraw(bool),
    Speed(Speed),
    Repeat(Value, Vec<Command>),
}

/// A numeric argument, resolved when the command runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Random(f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Spec(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Speed {
    Named(String),
    Code(u32),
}

pub type Turtle = Vec<Command>;

pub(crate) fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
