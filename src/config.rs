// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything a render needs to know, gathered into one immutable
//! struct that gets passed down by reference, plus the little parsers
//! the command line uses to fill it in.

use errors::Error;
use gradient::Color;
use num::Complex;
use planes::{PlaneMapper, PlaneWindow, DEFAULT_PIXELS_PER_UNIT};
use std::convert::TryFrom;
use std::str::FromStr;

/// The iteration cap, and therefore the gradient length, when nobody
/// says otherwise.
pub const DEFAULT_ITER_MAX: usize = 100;

/// The parameters of a single render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Pixels per unit of the complex plane.
    pub pixels_per_unit: u32,
    /// The region of the complex plane to sample.
    pub window: PlaneWindow,
    /// The iteration cap.
    pub iter_max: usize,
    /// Color of points that escape at once.
    pub color_start: Color,
    /// Color the gradient ramps toward.
    pub color_end: Color,
    /// Threads for the banded pass; one means the reference pass.
    pub threads: usize,
}

/// The full set at a thousand pixels per unit, a hundred iterations,
/// shading from orange to blue.
impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
            window: PlaneWindow::default(),
            iter_max: DEFAULT_ITER_MAX,
            color_start: Color::new(255, 50, 0),
            color_end: Color::new(0, 0, 255),
            threads: 1,
        }
    }
}

impl RenderConfig {
    /// The pixel mapping this configuration describes.
    pub fn mapper(&self) -> Result<PlaneMapper, Error> {
        PlaneMapper::new(self.window, self.pixels_per_unit)
    }
}

/// Reads a pixel density.  Anything that isn't a positive integer
/// that fits, including nothing at all, quietly becomes the default.
pub fn parse_pixels_per_unit(arg: Option<&str>) -> u32 {
    let arg = match arg {
        Some(arg) => arg,
        None => return DEFAULT_PIXELS_PER_UNIT,
    };
    match i64::from_str(arg.trim()).map(u32::try_from) {
        Ok(Ok(density)) if density > 0 => density,
        _ => {
            warn!(
                "pixels per unit {:?} is not a positive integer, using {}",
                arg, DEFAULT_PIXELS_PER_UNIT
            );
            DEFAULT_PIXELS_PER_UNIT
        }
    }
}

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and expecting
/// floating point numbers.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_full_set() {
        let config = RenderConfig::default();
        assert_eq!(config.pixels_per_unit, 1000);
        assert_eq!(config.iter_max, 100);
        assert_eq!(config.window, PlaneWindow::new(-2.0, 1.0, -1.0, 1.0).unwrap());
        assert_eq!(config.color_start, Color::new(255, 50, 0));
        assert_eq!(config.color_end, Color::new(0, 0, 255));
        let mapper = config.mapper().unwrap();
        assert_eq!((mapper.width(), mapper.height()), (3000, 2000));
    }

    #[test]
    fn density_accepts_positive_integers() {
        assert_eq!(parse_pixels_per_unit(Some("10")), 10);
        assert_eq!(parse_pixels_per_unit(Some(" 250 ")), 250);
    }

    #[test]
    fn density_falls_back_to_default() {
        for bad in &["0", "-5", "abc", "", "1.5", "99999999999"] {
            assert_eq!(parse_pixels_per_unit(Some(*bad)), DEFAULT_PIXELS_PER_UNIT, "{}", bad);
        }
        assert_eq!(parse_pixels_per_unit(None), DEFAULT_PIXELS_PER_UNIT);
    }

    #[test]
    fn parse_pair_splits_on_separator() {
        assert_eq!(parse_pair::<u32>("640x480", 'x'), Some((640, 480)));
        assert_eq!(parse_pair::<u32>("640x", 'x'), None);
        assert_eq!(parse_pair::<u32>("640", 'x'), None);
    }

    #[test]
    fn parse_complex_reads_corners() {
        assert_eq!(parse_complex("-2,-1"), Some(Complex::new(-2.0, -1.0)));
        assert_eq!(parse_complex("1.5,0.25"), Some(Complex::new(1.5, 0.25)));
        assert_eq!(parse_complex("1.5"), None);
    }
}
