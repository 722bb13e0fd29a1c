// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type the renderer hands back.  Configuration
//! problems, buffers that can't be had, and files that can't be
//! written all end up here.

use failure::Fail;
use std::io;

/// Everything that can go wrong between reading a configuration and
/// writing the last byte of the image.
#[derive(Debug, Fail)]
pub enum Error {
    /// The plane window is empty, inverted, or not finite.
    #[fail(display = "invalid plane window: {}", _0)]
    InvalidWindow(String),

    /// Pixels per unit must be a positive integer.
    #[fail(display = "pixels per unit must be greater than zero")]
    InvalidResolution,

    /// A gradient needs at least the interior bucket.
    #[fail(display = "gradient size must be at least 1, got {}", _0)]
    InvalidGradientSize(usize),

    /// The gradient and the iteration cap disagree about how many
    /// buckets there are.
    #[fail(
        display = "gradient holds {} colors but the iteration cap is {}",
        gradient, iter_max
    )]
    GradientMismatch {
        /// Length of the gradient supplied.
        gradient: usize,
        /// Iteration cap supplied.
        iter_max: usize,
    },

    /// A buffer could not be reserved.
    #[fail(display = "could not allocate {} elements for the {}", elements, what)]
    AllocationFailure {
        /// Which buffer we were building.
        what: &'static str,
        /// How many elements were asked for (saturated on overflow).
        elements: usize,
    },

    /// A raster write landed outside the raster.
    #[fail(
        display = "pixel ({}, {}) lies outside the {}x{} raster",
        column, row, width, height
    )]
    PixelOutOfBounds {
        /// Column of the offending pixel.
        column: usize,
        /// Row of the offending pixel.
        row: usize,
        /// Raster width.
        width: usize,
        /// Raster height.
        height: usize,
    },

    /// One of the threads of the banded render panicked.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// The output image could not be created or written.
    #[fail(display = "could not write {}: {}", path, io)]
    EmitFailure {
        /// Where we tried to write.
        path: String,
        /// What the operating system (or encoder) said.
        #[cause]
        io: io::Error,
    },
}
