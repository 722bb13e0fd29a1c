// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The raster: a row-major grid of 8-bit RGB triples, exactly the
//! layout the image encoders want, and the passes that fill it in by
//! sampling every pixel and looking its escape count up in a
//! gradient.

extern crate crossbeam;

use errors::Error;
use escape::sample;
use gradient::{Color, Gradient};
use itertools::iproduct;
use planes::{Pixel, PlaneMapper};

const CHANNELS: usize = 3;

/// A width x height grid of colors.  Pixel `(column, row)` lives at
/// byte offset `(row * width + column) * 3`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Allocates a raster with every pixel black.  Sizes that
    /// overflow, or that the allocator won't give us, come back as
    /// `AllocationFailure` rather than an abort.
    pub fn new(width: usize, height: usize) -> Result<Raster, Error> {
        let failure = Error::AllocationFailure {
            what: "raster",
            elements: width.saturating_mul(height),
        };
        let bytes = match width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
        {
            Some(bytes) => bytes,
            None => return Err(failure),
        };

        let mut pixels: Vec<u8> = Vec::new();
        if pixels.try_reserve_exact(bytes).is_err() {
            return Err(failure);
        }
        pixels.resize(bytes, 0);

        Ok(Raster {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the raster has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn offset(&self, pixel: &Pixel) -> Option<usize> {
        if pixel.0 < self.width && pixel.1 < self.height {
            Some((pixel.1 * self.width + pixel.0) * CHANNELS)
        } else {
            None
        }
    }

    /// The color at `pixel`, or `None` outside the raster.
    pub fn get(&self, pixel: &Pixel) -> Option<Color> {
        self.offset(pixel).map(|at| Color {
            red: self.pixels[at],
            green: self.pixels[at + 1],
            blue: self.pixels[at + 2],
        })
    }

    /// Paints `pixel`.  Writing outside the raster is an error and
    /// leaves the raster untouched.
    pub fn set(&mut self, pixel: &Pixel, color: Color) -> Result<(), Error> {
        match self.offset(pixel) {
            Some(at) => {
                self.pixels[at..at + CHANNELS].copy_from_slice(&color.to_rgb());
                Ok(())
            }
            None => Err(Error::PixelOutOfBounds {
                column: pixel.0,
                row: pixel.1,
                width: self.width,
                height: self.height,
            }),
        }
    }

    /// The raw row-major RGB bytes.
    pub fn as_rgb(&self) -> &[u8] {
        &self.pixels
    }

    /// Gives up the raster and hands back its bytes.
    pub fn into_rgb(self) -> Vec<u8> {
        self.pixels
    }
}

fn check_gradient(gradient: &Gradient, iter_max: usize) -> Result<(), Error> {
    if iter_max == 0 {
        return Err(Error::InvalidGradientSize(iter_max));
    }
    if gradient.len() != iter_max {
        return Err(Error::GradientMismatch {
            gradient: gradient.len(),
            iter_max,
        });
    }
    Ok(())
}

// The escape count is in 1..=iter_max and the gradient holds exactly
// iter_max buckets, so the lookup cannot miss.
fn color_at(pixel: &Pixel, mapper: &PlaneMapper, gradient: &Gradient, iter_max: usize) -> Color {
    gradient[sample(pixel, mapper, iter_max) - 1]
}

/// The reference pass.  Visits every pixel in row-major order on the
/// calling thread, samples it, and paints it with its gradient bucket.
pub fn assemble(
    mapper: &PlaneMapper,
    gradient: &Gradient,
    iter_max: usize,
) -> Result<Raster, Error> {
    check_gradient(gradient, iter_max)?;
    let mut raster = Raster::new(mapper.width(), mapper.height())?;
    for (row, column) in iproduct!(0..mapper.height(), 0..mapper.width()) {
        let pixel = Pixel(column, row);
        raster.set(&pixel, color_at(&pixel, mapper, gradient, iter_max))?;
    }
    Ok(raster)
}

// Paints a contiguous run of whole rows starting at `first_row`.
fn paint_band(
    band: &mut [u8],
    first_row: usize,
    mapper: &PlaneMapper,
    gradient: &Gradient,
    iter_max: usize,
) {
    let stride = mapper.width() * CHANNELS;
    for (offset, row) in band.chunks_mut(stride).enumerate() {
        for (column, cell) in row.chunks_mut(CHANNELS).enumerate() {
            let pixel = Pixel(column, first_row + offset);
            cell.copy_from_slice(&color_at(&pixel, mapper, gradient, iter_max).to_rgb());
        }
    }
}

/// Renders the same raster as `assemble`, but splits it into bands of
/// whole rows and hands each band to its own thread.  Bands never
/// overlap and everything else is shared read-only, so the result is
/// byte for byte the same as the single-threaded pass.
pub fn assemble_threaded(
    mapper: &PlaneMapper,
    gradient: &Gradient,
    iter_max: usize,
    threads: usize,
) -> Result<Raster, Error> {
    if threads <= 1 || mapper.is_empty() {
        return assemble(mapper, gradient, iter_max);
    }
    check_gradient(gradient, iter_max)?;

    // More threads than rows would only leave bands empty.
    let threads = threads.min(mapper.height());
    let mut raster = Raster::new(mapper.width(), mapper.height())?;
    let rows_per_band = match mapper.height() % threads {
        0 => mapper.height() / threads,
        _ => mapper.height() / threads + 1,
    };
    let band_size = rows_per_band * mapper.width() * CHANNELS;
    debug!(
        "splitting {} rows into bands of {} across {} threads",
        mapper.height(),
        rows_per_band,
        threads
    );

    crossbeam::scope(|spawner| {
        for (index, band) in raster.pixels.chunks_mut(band_size).enumerate() {
            spawner.spawn(move |_| {
                paint_band(band, index * rows_per_band, mapper, gradient, iter_max);
            });
        }
    })
    .map_err(|_| Error::WorkerPanicked)?;

    Ok(raster)
}
