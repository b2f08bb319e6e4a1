// turtle/src/playback.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Replays the command log as timed drawing calls.
//!
//! Playback drains the log once, in order. For each snapshot it applies the
//! pen and background styles, redraws and pauses when the state changed, and
//! then interpolates the move into the following snapshot unless that
//! snapshot is a teleport. Wrapping already happened while recording, so
//! interpolation is always a straight line.

use crate::config::TurtleConfig;
use crate::pacer::{Pacer, ThreadPacer};
use crate::snapshot::{diff, Changes, Snapshot};
use crate::speed::FASTEST;
use crate::surface::{Stage, Surface};
use crate::turtle::Turtle;
use crate::TurtleError;
use std::time::Duration;

/// Interpolation step used at the fastest speed.
pub const FASTEST_STEP: f64 = 500.0;

/// What one playback batch did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    pub snapshots: usize,
    pub clears: usize,
    pub redraws: usize,
    pub segments: usize,
    pub pauses: usize,
}

impl PlaybackReport {
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == PlaybackReport::default()
    }
}

/// Distance covered per interpolation frame.
///
/// The square of the speed code grows unevenly across the speed range;
/// kept as is so existing drawings pace the same.
#[inline]
pub fn step_size(speed: u32) -> f64 {
    if speed == FASTEST {
        FASTEST_STEP
    } else {
        let speed = speed as f64;
        speed * speed
    }
}

impl Turtle {
    /// Plays every queued snapshot onto `stage`, then leaves the log empty.
    ///
    /// With nothing queued this returns an empty report without touching the
    /// stage. The batch is consumed even when an invalid color stops it.
    pub async fn play<S, P>(
        &mut self,
        stage: &mut Stage<S>,
        pacer: &mut P,
    ) -> Result<PlaybackReport, TurtleError>
    where
        S: Surface,
        P: Pacer,
    {
        let batch = self.log.drain();
        if batch.is_empty() {
            tracing::trace!("nothing to play");
            return Ok(PlaybackReport::default());
        }

        tracing::debug!(snapshots = batch.len(), "playback started");
        let anchored = self.anchor.is_some();
        let mut frames = Vec::with_capacity(batch.len() + 1);
        frames.extend(self.anchor.take());
        frames.extend(batch);

        let mut report = PlaybackReport::default();
        let mut styled = None;
        let result = replay(
            &self.config,
            &frames,
            anchored,
            stage,
            pacer,
            &mut report,
            &mut styled,
        )
        .await;

        // A style that failed to resolve never reached the stage, so the next
        // batch starts from the last one that did.
        let fallback = match (&result, styled) {
            (Ok(()), _) => None,
            (Err(_), Some(index)) => Some(frames[index].clone()),
            (Err(_), None) => Some(self.config.initial_state()),
        };
        self.anchor = frames.pop().map(|last| match fallback {
            Some(style) => Snapshot {
                color: style.color,
                bg_color: style.bg_color,
                clear_requested: false,
                ..last
            },
            None => Snapshot {
                clear_requested: false,
                ..last
            },
        });

        match result {
            Ok(()) => {
                tracing::debug!(?report, "playback finished");
                Ok(report)
            }
            Err(err) => {
                tracing::warn!(%err, "playback aborted");
                Err(err)
            }
        }
    }

    /// Blocks until the queued snapshots have played at real-time pace.
    pub fn done<S>(&mut self, stage: &mut Stage<S>) -> Result<PlaybackReport, TurtleError>
    where
        S: Surface,
    {
        pollster::block_on(self.play(stage, &mut ThreadPacer))
    }
}

// `frames[0]` is the anchor, already on screen, when `anchored` is set.
// `styled` tracks the last frame whose style was applied.
async fn replay<S, P>(
    config: &TurtleConfig,
    frames: &[Snapshot],
    anchored: bool,
    stage: &mut Stage<S>,
    pacer: &mut P,
    report: &mut PlaybackReport,
    styled: &mut Option<usize>,
) -> Result<(), TurtleError>
where
    S: Surface,
    P: Pacer,
{
    let mut last_drawn: Option<&Snapshot> = if anchored { frames.first() } else { None };

    for (index, state) in frames.iter().enumerate() {
        if !(anchored && index == 0) {
            report.snapshots += 1;
        }

        if state.clear_requested {
            stage.clear_trace();
            report.clears += 1;
        }
        stage.apply_style(state)?;
        *styled = Some(index);

        if diff(last_drawn, state) {
            if state.redraw {
                stage.redraw(state)?;
                report.redraws += 1;
            }
            last_drawn = Some(state);
            if !(state.instant || state.speed == FASTEST) {
                pacer.pause(config.step_interval).await;
                report.pauses += 1;
            }
        }

        if let Some(next) = frames.get(index + 1) {
            if next.animate_movement && state.changes(next).contains(Changes::POSITION) {
                interpolate(config, state, next, stage, pacer, report).await?;
            }
        }
    }

    Ok(())
}

async fn interpolate<S, P>(
    config: &TurtleConfig,
    from: &Snapshot,
    to: &Snapshot,
    stage: &mut Stage<S>,
    pacer: &mut P,
    report: &mut PlaybackReport,
) -> Result<(), TurtleError>
where
    S: Surface,
    P: Pacer,
{
    let start = from.position();
    let target = to.position();
    let distance = start.distance_to(target);
    let step = step_size(from.speed);
    let bearing = start.bearing_to(target);
    let frame = if from.speed == FASTEST {
        Duration::ZERO
    } else {
        config.frame_interval
    };

    let frames = (distance / step).ceil() as usize;
    let mut at = start;
    for index in 1..=frames {
        let next = if index == frames {
            target
        } else {
            start.advance(bearing, step * index as f64)
        };

        if from.pen_down {
            stage.stroke(at, next);
            report.segments += 1;
        }
        if from.redraw {
            let cursor = Snapshot {
                x: next.x,
                y: next.y,
                ..from.clone()
            };
            stage.redraw(&cursor)?;
            report.redraws += 1;
        }

        pacer.pause(frame).await;
        report.pauses += 1;
        at = next;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacer::{RecordingPacer, Unpaced};
    use crate::recording::{RecordingSurface, SurfaceOp};
    use pollster::block_on;
    use turtle_geometry::{ColorU, Point2D};

    type TestStage = Stage<RecordingSurface>;

    fn turtle() -> Turtle {
        let config = TurtleConfig::default()
            .size(200, 200)
            .step_interval(Duration::from_millis(50));
        Turtle::with_config(config).unwrap()
    }

    fn stage() -> TestStage {
        Stage::new(200, 200)
    }

    fn play(turtle: &mut Turtle, stage: &mut TestStage) -> (PlaybackReport, RecordingPacer) {
        let mut pacer = RecordingPacer::new();
        let report = block_on(turtle.play(stage, &mut pacer)).unwrap();
        (report, pacer)
    }

    #[test]
    fn empty_log_is_a_no_op() {
        let mut turtle = turtle();
        let mut stage = stage();
        let (report, pacer) = play(&mut turtle, &mut stage);
        assert!(report.is_empty());
        assert!(pacer.delays.is_empty());
        assert!(stage.trace.ops.is_empty() && stage.display.ops.is_empty());
    }

    #[test]
    fn second_playback_does_nothing() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.forward(50.0);
        let (first, _) = play(&mut turtle, &mut stage);
        assert_eq!(first.snapshots, 1);
        assert!(turtle.log().is_empty());

        let trace_ops = stage.trace.ops.len();
        let display_ops = stage.display.ops.len();
        let (second, _) = play(&mut turtle, &mut stage);
        assert!(second.is_empty());
        assert_eq!(stage.trace.ops.len(), trace_ops);
        assert_eq!(stage.display.ops.len(), display_ops);
    }

    #[test]
    fn styled_batch_strokes_only_the_pen_down_move() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.pen_up();
        turtle.goto(50.0, 50.0);
        turtle.pen_down();
        turtle.color((255, 0, 0));
        turtle.forward(20.0);
        play(&mut turtle, &mut stage);

        let strokes = stage.trace.strokes();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].from, Point2D::new(50.0, 50.0));
        assert_eq!(strokes[0].to, Point2D::new(50.0, 70.0));
        assert_eq!(strokes[0].color, ColorU::new(255, 0, 0, 255));
    }

    #[test]
    fn interpolation_steps_by_speed_squared() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.speed(2);
        turtle.forward(10.0);
        let (report, pacer) = play(&mut turtle, &mut stage);

        let strokes = stage.trace.strokes();
        assert_eq!(strokes.len(), 3);
        assert_eq!(strokes[0].to, Point2D::new(0.0, 4.0));
        assert_eq!(strokes[1].to, Point2D::new(0.0, 8.0));
        assert_eq!(strokes[2].to, Point2D::new(0.0, 10.0));
        assert_eq!(report.segments, 3);

        let frame = turtle.config().frame_interval;
        assert_eq!(pacer.delays.iter().filter(|&&delay| delay == frame).count(), 3);
    }

    #[test]
    fn fastest_speed_never_waits() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.speed("fastest");
        turtle.right(90.0);
        turtle.forward(80.0);
        turtle.left(90.0);
        let (report, pacer) = play(&mut turtle, &mut stage);
        assert!(pacer.total().is_zero());
        assert_eq!(report.segments, 1);
    }

    #[test]
    fn changed_states_pause_for_one_step() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.pen_up();
        turtle.width(3.0);
        let (report, pacer) = play(&mut turtle, &mut stage);
        let step = turtle.config().step_interval;
        assert_eq!(pacer.delays, vec![step, step]);
        assert_eq!(report.redraws, 2);
        assert_eq!(report.pauses, 2);
    }

    #[test]
    fn teleports_are_never_drawn() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.right(90.0);
        turtle.forward(400.0);
        play(&mut turtle, &mut stage);

        let strokes = stage.trace.strokes();
        assert!(!strokes.is_empty());
        for stroke in &strokes {
            assert!((stroke.to.x - stroke.from.x).abs() <= 36.0 + 1e-9);
            assert!(stroke.from.x.abs() <= 100.0 && stroke.to.x.abs() <= 100.0);
        }
        let drawn: f64 = strokes.iter().map(|s| s.from.distance_to(s.to)).sum();
        assert!((drawn - 400.0).abs() < 1e-6);
    }

    #[test]
    fn clear_wipes_the_trace_once() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.forward(10.0);
        turtle.clear();
        turtle.forward(10.0);
        let (report, _) = play(&mut turtle, &mut stage);
        assert_eq!(report.clears, 1);
        assert_eq!(stage.trace.count(|op| *op == SurfaceOp::Clear), 1);
        assert_eq!(stage.trace.strokes().len(), 1);
    }

    #[test]
    fn home_jumps_without_drawing_or_waiting() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.forward(30.0);
        play(&mut turtle, &mut stage);
        turtle.home();
        let strokes_before = stage.trace.strokes().len();
        let (report, pacer) = play(&mut turtle, &mut stage);
        assert_eq!(stage.trace.strokes().len(), strokes_before);
        assert_eq!(report.segments, 0);
        assert!(pacer.delays.is_empty());
    }

    #[test]
    fn next_batch_animates_from_the_last_position() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.forward(10.0);
        play(&mut turtle, &mut stage);
        turtle.forward(10.0);
        let (report, _) = play(&mut turtle, &mut stage);
        assert_eq!(report.snapshots, 1);
        let strokes = stage.trace.strokes();
        assert_eq!(strokes.last().unwrap().from, Point2D::new(0.0, 10.0));
        assert_eq!(strokes.last().unwrap().to, Point2D::new(0.0, 20.0));
    }

    #[test]
    fn reset_clears_without_drawing_home() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.forward(50.0);
        play(&mut turtle, &mut stage);
        turtle.reset();
        let (report, _) = play(&mut turtle, &mut stage);
        assert_eq!(report.clears, 1);
        assert_eq!(report.segments, 0);
        assert!(stage.trace.strokes().is_empty());
    }

    #[test]
    fn hidden_turtle_and_disabled_redraw() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.hide_turtle();
        turtle.forward(10.0);
        play(&mut turtle, &mut stage);
        assert_eq!(stage.display.count(|op| matches!(op, SurfaceOp::FillPolygon(_))), 0);
        assert!(stage.display.count(|op| matches!(op, SurfaceOp::Composite(_))) > 0);

        let mut stage = self::stage();
        turtle.redraw_on_move(false);
        turtle.forward(10.0);
        play(&mut turtle, &mut stage);
        assert_eq!(stage.display.count(|op| matches!(op, SurfaceOp::Composite(_))), 0);
        assert_eq!(stage.trace.strokes().len(), 1);
    }

    #[test]
    fn background_reaches_the_display() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.bg_color("navy");
        play(&mut turtle, &mut stage);
        assert!(stage
            .display
            .ops
            .contains(&SurfaceOp::Background(Some(ColorU::new(0, 0, 128, 255)))));
    }

    #[test]
    fn invalid_color_aborts_but_consumes_the_batch() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.color("not-a-color");
        turtle.forward(10.0);
        let mut pacer = RecordingPacer::new();
        let result = block_on(turtle.play(&mut stage, &mut pacer));
        assert!(matches!(result, Err(TurtleError::InvalidColor(_))));
        assert!(turtle.log().is_empty());
    }

    #[test]
    fn session_recovers_after_an_invalid_color() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.color("not-a-color");
        turtle.forward(10.0);
        let mut pacer = RecordingPacer::new();
        assert!(block_on(turtle.play(&mut stage, &mut pacer)).is_err());
        assert!(stage.trace.strokes().is_empty());

        turtle.color("red");
        turtle.forward(10.0);
        let (report, _) = play(&mut turtle, &mut stage);
        assert_eq!(report.snapshots, 2);

        let strokes = stage.trace.strokes();
        let last = strokes.last().unwrap();
        assert_eq!(last.from, Point2D::new(0.0, 10.0));
        assert_eq!(last.to, Point2D::new(0.0, 20.0));
        assert_eq!(last.color, ColorU::new(255, 0, 0, 255));
    }

    #[test]
    fn invalid_background_does_not_stick() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.bg_color("nowhere");
        let mut pacer = RecordingPacer::new();
        assert!(block_on(turtle.play(&mut stage, &mut pacer)).is_err());

        turtle.bg_color("white");
        play(&mut turtle, &mut stage);
        assert!(stage
            .display
            .ops
            .contains(&SurfaceOp::Background(Some(ColorU::new(255, 255, 255, 255)))));
    }

    #[test]
    fn done_plays_with_real_pacing() {
        let config = TurtleConfig::default()
            .size(100, 100)
            .step_interval(Duration::ZERO)
            .frame_interval(Duration::ZERO);
        let mut turtle = Turtle::with_config(config).unwrap();
        let mut stage = stage();
        turtle.forward(20.0);
        turtle.right(90.0);
        turtle.forward(20.0);
        let report = turtle.done(&mut stage).unwrap();
        assert_eq!(report.snapshots, 3);
        assert_eq!(stage.trace.strokes().len(), 2);
        assert!(turtle.log().is_empty());
        assert!(turtle.done(&mut stage).unwrap().is_empty());
    }

    #[test]
    fn unpaced_counts_every_pause() {
        let mut turtle = turtle();
        let mut stage = stage();
        turtle.width(2.0);
        turtle.forward(80.0);
        let mut pacer = Unpaced::default();
        let report = block_on(turtle.play(&mut stage, &mut pacer)).unwrap();
        assert_eq!(pacer.pauses, report.pauses);
        assert!(pacer.pauses > 0);
    }

    #[test]
    fn step_size_table() {
        assert_eq!(step_size(0), 500.0);
        assert_eq!(step_size(1), 1.0);
        assert_eq!(step_size(6), 36.0);
        assert_eq!(step_size(10), 100.0);
    }
}
