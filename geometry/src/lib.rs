// geometry/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Planar geometry and color primitives shared by the turtle crates.
//!
//! Coordinates are centered on the canvas with +Y pointing up. Angles in
//! radians follow the turtle convention: 0 faces +Y and grows toward +X.

pub mod color;
pub mod point;

pub use color::{ColorSpec, ColorU, InvalidColor};
pub use point::{heading_vector, round_coord, Point2D};
