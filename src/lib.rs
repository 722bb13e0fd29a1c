#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never runs off to infinity.  Points outside the set do run
//! off, and how many iterations they last before crossing the escape
//! threshold is their "escape time."
//!
//! A render picks a window of the complex plane, lays a grid of
//! pixels over it, samples the escape time of every pixel, and colors
//! each one from a gradient indexed by that escape time.  Points that
//! never escape land in the last bucket of the gradient, which is
//! always black.  The finished raster is handed to an image encoder.

#[macro_use]
extern crate log;
extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;

pub mod config;
pub mod emit;
pub mod errors;
pub mod escape;
pub mod gradient;
pub mod planes;
pub mod raster;

pub use config::RenderConfig;
pub use emit::{emit, ImageFormat};
pub use errors::Error;
pub use escape::{escape_time, sample};
pub use gradient::{build_gradient, Color, Gradient};
pub use planes::{Pixel, PlaneMapper, PlaneWindow, Resolution};
pub use raster::{assemble, assemble_threaded, Raster};

/// Renders the raster a configuration describes.  The gradient is
/// built here, shared read-only by every pixel, and dropped once the
/// raster is full.
pub fn render(config: &RenderConfig) -> Result<Raster, Error> {
    let mapper = config.mapper()?;
    let gradient = build_gradient(config.iter_max, config.color_start, config.color_end)?;

    info!(
        "rendering {}x{} pixels over [{}, {}] x [{}, {}], {} iterations, {} thread(s)",
        mapper.width(),
        mapper.height(),
        mapper.window().x_min(),
        mapper.window().x_max(),
        mapper.window().y_min(),
        mapper.window().y_max(),
        config.iter_max,
        config.threads
    );

    let raster = if config.threads > 1 {
        assemble_threaded(&mapper, &gradient, config.iter_max, config.threads)?
    } else {
        assemble(&mapper, &gradient, config.iter_max)?
    };

    debug!("filled {} pixels", raster.len());
    Ok(raster)
}
