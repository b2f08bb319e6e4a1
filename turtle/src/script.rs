// turtle/src/script.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Drives a session from a parsed turtle script.

use crate::turtle::Turtle;
use crate::TurtleError;
use turtle_geometry::ColorSpec;
use uturtle::ast::{Color, Command, Speed, Value};

impl Turtle {
    /// Parses `source` and queues every command it contains.
    pub fn run_script(&mut self, source: &str) -> Result<(), TurtleError> {
        let program = uturtle::parse(source)?;
        tracing::debug!(commands = program.len(), "running script");
        self.run_program(&program);
        Ok(())
    }

    pub fn run_program(&mut self, program: &[Command]) {
        for cmd in program {
            match cmd {
                Command::Reset => self.reset(),
                Command::Clear => self.clear(),
                Command::PenUp => self.pen_up(),
                Command::PenDown => self.pen_down(),
                Command::Forward(distance) => {
                    let distance = self.value(*distance);
                    self.forward(distance)
                }
                Command::Backward(distance) => {
                    let distance = self.value(*distance);
                    self.backward(distance)
                }
                Command::TurnLeft(degrees) => {
                    let degrees = self.value(*degrees);
                    self.left(degrees)
                }
                Command::TurnRight(degrees) => {
                    let degrees = self.value(*degrees);
                    self.right(degrees)
                }
                Command::Direction(degrees) => {
                    let degrees = self.value(*degrees);
                    self.set_heading(degrees)
                }
                Command::Go(x, y) => {
                    let (x, y) = (self.value(*x), self.value(*y));
                    self.goto(x, y)
                }
                Command::Teleport(x, y) => {
                    let (x, y) = (self.value(*x), self.value(*y));
                    self.teleport(x, y)
                }
                Command::Home => self.home(),
                Command::PenWidth(width) => {
                    let width = self.value(*width);
                    self.width(width)
                }
                Command::PenColor(color) => self.color(color_spec(color)),
                Command::CanvasColor(color) => self.bg_color(color_spec(color)),
                Command::Wrap(wrap) => self.wrap(*wrap),
                Command::Show => self.show_turtle(),
                Command::Hide => self.hide_turtle(),
                Command::Redraw(redraw) => self.redraw_on_move(*redraw),
                Command::Speed(Speed::Named(name)) => self.speed(name.as_str()),
                Command::Speed(Speed::Code(code)) => self.speed(*code),
                Command::Repeat(count, body) => {
                    let count = self.value(*count).max(0.0) as usize;
                    self.repeat(count, |turtle| turtle.run_program(body));
                }
            }
        }
    }

    fn value(&mut self, value: Value) -> f64 {
        match value {
            Value::Number(number) => number,
            Value::Random(low, high) => self.random(low.round() as i64, high.round() as i64) as f64,
        }
    }
}

fn color_spec(color: &Color) -> ColorSpec {
    match *color {
        Color::Spec(ref spec) => ColorSpec::new(spec.as_str()),
        Color::Rgb(r, g, b) => ColorSpec::rgb(r, g, b),
        Color::Rgba(r, g, b, a) => ColorSpec::rgba(r, g, b, a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TurtleConfig;
    use turtle_geometry::Point2D;

    fn turtle() -> Turtle {
        Turtle::with_config(TurtleConfig::default().size(200, 200).seed(1)).unwrap()
    }

    #[test]
    fn script_drives_the_session() {
        let mut turtle = turtle();
        turtle
            .run_script(
                "penup go 50 50 pendown\n\
                 pencolor 255, 0, 0\n\
                 canvascolor #000\n\
                 speed fast\n\
                 repeat 2 [ forward 10 turnright ]",
            )
            .unwrap();
        assert_eq!(turtle.position(), Point2D::new(60.0, 60.0));
        assert_eq!(turtle.heading(), 180.0);
        assert_eq!(turtle.state().color, ColorSpec::rgb(255, 0, 0));
        assert_eq!(turtle.state().bg_color, Some(ColorSpec::new("#000")));
        assert_eq!(turtle.state().speed, 10);
    }

    #[test]
    fn script_toggles_and_jumps() {
        let mut turtle = turtle();
        turtle
            .run_script("wrap off hide redraw off teleport 500 0 direction 90")
            .unwrap();
        let state = turtle.state();
        assert!(!state.wrap && !state.visible && !state.redraw);
        assert_eq!(turtle.position(), Point2D::new(500.0, 0.0));
        assert_eq!(turtle.heading(), 90.0);
        turtle.run_script("home").unwrap();
        assert_eq!(turtle.position(), Point2D::origin());
    }

    #[test]
    fn random_arguments_stay_in_range() {
        let mut turtle = turtle();
        turtle.run_script("wrap off repeat 20 [ go random -5 5 random 10 20 ]").unwrap();
        for state in turtle.log().entries().iter().skip(1) {
            assert!((-5.0..=5.0).contains(&state.x));
            assert!((10.0..=20.0).contains(&state.y));
        }
    }

    #[test]
    fn parse_errors_surface() {
        let mut turtle = turtle();
        assert!(matches!(turtle.run_script("forward"), Err(TurtleError::Script(_))));
        assert!(turtle.log().is_empty());
    }
}
