// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The color lookup table.  Escape counts are turned into colors by
//! indexing a gradient that ramps linearly from a start color toward
//! an end color, one bucket per iteration.  The very last bucket is
//! reserved for points that never escaped and is always black, no
//! matter what end color was asked for.

use errors::Error;
use std::ops::Index;
use std::slice;

/// An 8-bit RGB triple.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Color {
    /// The interior of the set.
    pub const BLACK: Color = Color {
        red: 0,
        green: 0,
        blue: 0,
    };

    /// Constructor.
    pub fn new(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }

    /// The channels in the order an RGB raster stores them.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

/// An immutable table of `size` colors.  Bucket `i` colors a pixel
/// whose escape count was `i + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gradient {
    colors: Vec<Color>,
}

// The step is a single-precision division truncated toward zero, taken
// once per channel.  Entries are then start + i * step, so the ramp
// never quite reaches the end color.
fn channel_step(start: u8, end: u8, size: usize) -> i64 {
    ((i32::from(end) - i32::from(start)) as f32 / size as f32) as i64
}

fn channel_at(start: u8, step: i64, index: usize) -> u8 {
    (i64::from(start) + (index as i64) * step) as u8
}

impl Gradient {
    /// Builds a gradient of exactly `size` buckets from `start`
    /// toward `end`.  Fails only for a size of zero, or when the
    /// table cannot be allocated.
    pub fn new(size: usize, start: Color, end: Color) -> Result<Gradient, Error> {
        if size == 0 {
            return Err(Error::InvalidGradientSize(size));
        }

        let mut colors: Vec<Color> = Vec::new();
        colors
            .try_reserve_exact(size)
            .map_err(|_| Error::AllocationFailure {
                what: "gradient",
                elements: size,
            })?;

        let steps = (
            channel_step(start.red, end.red, size),
            channel_step(start.green, end.green, size),
            channel_step(start.blue, end.blue, size),
        );

        colors.extend((0..size - 1).map(|i| Color {
            red: channel_at(start.red, steps.0, i),
            green: channel_at(start.green, steps.1, i),
            blue: channel_at(start.blue, steps.2, i),
        }));
        colors.push(Color::BLACK);

        debug!(
            "built {} bucket gradient from {:?} toward {:?} with steps {:?}",
            size, start, end, steps
        );
        Ok(Gradient { colors })
    }

    /// Number of buckets.  Always at least one.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a gradient that was successfully built; present
    /// for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color reserved for points that never escaped.
    pub fn interior(&self) -> Color {
        self.colors[self.colors.len() - 1]
    }

    /// Walks the buckets in order.
    pub fn iter(&self) -> slice::Iter<Color> {
        self.colors.iter()
    }
}

impl Index<usize> for Gradient {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.colors[index]
    }
}

/// Builds the lookup table for an iteration cap of `size`.  See
/// `Gradient::new`.
pub fn build_gradient(size: usize, start: Color, end: Color) -> Result<Gradient, Error> {
    Gradient::new(size, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire() -> (Color, Color) {
        (Color::new(255, 50, 0), Color::new(0, 0, 255))
    }

    #[test]
    fn zero_size_is_rejected() {
        let (start, end) = fire();
        match build_gradient(0, start, end) {
            Err(Error::InvalidGradientSize(0)) => {}
            other => panic!("expected InvalidGradientSize, got {:?}", other),
        }
    }

    #[test]
    fn length_matches_size_and_ends_black() {
        let (start, end) = fire();
        for &size in &[1, 2, 3, 7, 100, 256, 1000] {
            let g = build_gradient(size, start, end).unwrap();
            assert_eq!(g.len(), size);
            assert_eq!(g[size - 1], Color::BLACK);
            assert_eq!(g.interior(), Color::BLACK);
        }
    }

    #[test]
    fn last_bucket_is_black_even_when_end_is_white() {
        let g = build_gradient(10, Color::new(0, 0, 0), Color::new(255, 255, 255)).unwrap();
        assert_eq!(g[9], Color::BLACK);
        assert_eq!(g[8], Color::new(200, 200, 200));
    }

    #[test]
    fn single_bucket_is_only_black() {
        let g = build_gradient(1, Color::new(9, 9, 9), Color::new(200, 200, 200)).unwrap();
        assert_eq!(g.iter().cloned().collect::<Vec<_>>(), vec![Color::BLACK]);
    }

    #[test]
    fn first_bucket_is_start() {
        let (start, end) = fire();
        for &size in &[2, 5, 100] {
            assert_eq!(build_gradient(size, start, end).unwrap()[0], start);
        }
    }

    #[test]
    fn steps_are_truncated_once() {
        // (0 - 255) / 100 = -2.55 -> -2, (0 - 50) / 100 -> 0, 255 / 100 -> 2
        let (start, end) = fire();
        let g = build_gradient(100, start, end).unwrap();
        assert_eq!(g[1], Color::new(253, 50, 2));
        assert_eq!(g[50], Color::new(155, 50, 100));
        assert_eq!(g[98], Color::new(59, 50, 196));
    }

    #[test]
    fn large_sizes_flatten_to_start() {
        let (start, end) = fire();
        let g = build_gradient(1000, start, end).unwrap();
        assert!(g.iter().take(999).all(|c| *c == start));
    }
}
