// demo/native-turtle/src/main.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runs a turtle script and writes the finished drawing to a PNG.

use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use turtle_canvas::Canvas;
use turtle_engine::{Stage, Turtle, TurtleConfig, Unpaced};

#[derive(Debug, Parser)]
#[command(name = "turtle-demo", about = "Replay a turtle script onto a PNG", version)]
struct Options {
    /// Script to run.
    script: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Where to write the drawing.
    #[arg(short, long, default_value = "turtle.png")]
    output: PathBuf,

    /// Skip the playback pacing and render immediately.
    #[arg(long)]
    no_delay: bool,

    /// Seed for `random` arguments.
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = Options::parse();
    init_logging(options.verbose);

    let source = fs::read_to_string(&options.script)?;

    let mut config = TurtleConfig::default().size(options.width, options.height);
    if let Some(seed) = options.seed {
        config = config.seed(seed);
    }
    let mut turtle = Turtle::with_config(config)?;
    turtle.run_script(&source)?;
    tracing::info!(snapshots = turtle.log().len(), "script recorded");

    let mut stage: Stage<Canvas> = Stage::new(options.width, options.height);
    let report = if options.no_delay {
        let mut pacer = Unpaced::default();
        let report = pollster::block_on(turtle.play(&mut stage, &mut pacer))?;
        tracing::debug!(skipped = pacer.pauses, "pacing skipped");
        report
    } else {
        turtle.done(&mut stage)?
    };
    tracing::info!(
        segments = report.segments,
        redraws = report.redraws,
        "playback complete"
    );

    stage.display.save_png(&options.output)?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
