// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time sampler.  Take a point `c` on the complex plane,
//! start `z` at the origin, and repeatedly replace `z` with `z² + c`.
//! The number of times we get to do that before `z` wanders off is
//! the "velocity" of the point, and it's what picks the color.

use num::Complex;
use planes::{Pixel, PlaneMapper};

/// A point has escaped once `|z|²` reaches this.  That's a radius of
/// roughly 1.414 rather than the textbook 2, so points are let go a
/// little early.  Changing it changes every boundary pixel.
pub const ESCAPE_NORM_SQR: f64 = 2.0;

/// Iterates `z² + c` from zero and returns how many steps survived,
/// counting from one.  A point that never escapes within `iter_max`
/// steps returns `iter_max`.  If an iterate maps exactly onto itself
/// the orbit has settled on a fixed point and can never escape, so we
/// stop early and report `iter_max` as well.
///
/// For any `iter_max >= 1` the result lies in `1..=iter_max`.
pub fn escape_time(c: Complex<f64>, iter_max: usize) -> usize {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut count = 0;
    while z.norm_sqr() < ESCAPE_NORM_SQR && count < iter_max {
        let next = z * z + c;
        if next == z {
            return iter_max;
        }
        z = next;
        count += 1;
    }
    count
}

/// Maps a pixel onto the complex plane and samples it.
pub fn sample(pixel: &Pixel, mapper: &PlaneMapper, iter_max: usize) -> usize {
    escape_time(mapper.pixel_to_point(pixel), iter_max)
}
