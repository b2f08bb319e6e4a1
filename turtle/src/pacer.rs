// turtle/src/pacer.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::future::Future;
use std::thread;
use std::time::Duration;

/// Where playback suspends between steps and frames.
///
/// A delayed pause only postpones the next frame; nothing is skipped.
pub trait Pacer {
    fn pause(&mut self, delay: Duration) -> impl Future<Output = ()>;
}

/// Blocks the calling thread for each delay.
///
/// Meant for hosts that drive playback with `pollster::block_on`; an async
/// executor sharing the thread makes no progress while it sleeps.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) -> impl Future<Output = ()> {
        async move {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
    }
}

/// Never waits; only counts how often playback asked to.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unpaced {
    pub pauses: usize,
}

impl Pacer for Unpaced {
    fn pause(&mut self, _delay: Duration) -> impl Future<Output = ()> {
        self.pauses += 1;
        std::future::ready(())
    }
}

/// Never waits; remembers every delay it was asked for.
#[derive(Clone, Debug, Default)]
pub struct RecordingPacer {
    pub delays: Vec<Duration>,
}

impl RecordingPacer {
    pub fn new() -> RecordingPacer {
        RecordingPacer::default()
    }

    pub fn total(&self) -> Duration {
        self.delays.iter().sum()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration) -> impl Future<Output = ()> {
        self.delays.push(delay);
        std::future::ready(())
    }
}
