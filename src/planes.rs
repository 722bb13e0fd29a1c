// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window on the complex plane bounded by `x_min..x_max` and
//! `y_min..y_max`.  The integral plane is derived from the window:
//! every unit of the complex plane is `pixels_per_unit` pixels wide.

use errors::Error;
use num::Complex;

/// How many pixels span one unit of the complex plane when nobody
/// says otherwise.
pub const DEFAULT_PIXELS_PER_UNIT: u32 = 1000;

/// Describes the column, row of a pixel in the raster.  Row zero is
/// the top of the image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pixel(pub usize, pub usize);

/// The rectangle of the complex plane being sampled, treating the
/// real part as x and the imaginary part as y.  Once built, the
/// bounds are guaranteed finite with `x_max > x_min` and
/// `y_max > y_min`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneWindow {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl PlaneWindow {
    /// Constructor.  Rejects windows that are empty, inverted, or not
    /// made of finite numbers.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<PlaneWindow, Error> {
        if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
            return Err(Error::InvalidWindow(
                "the window bounds must be finite numbers".to_string(),
            ));
        }

        if x_max <= x_min {
            return Err(Error::InvalidWindow(format!(
                "x_max ({}) is not to the right of x_min ({})",
                x_max, x_min
            )));
        }

        if y_max <= y_min {
            return Err(Error::InvalidWindow(format!(
                "y_max ({}) is not above y_min ({})",
                y_max, y_min
            )));
        }

        Ok(PlaneWindow {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Builds a window from its left-lower and right-upper corners.
    pub fn from_corners(
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneWindow, Error> {
        PlaneWindow::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }

    /// Left edge.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Right edge.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Bottom edge; this is where row zero of the raster lands.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Top edge.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Extent along the real axis.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// The classic full view of the set: `[-2, 1] x [-1, 1]`.
impl Default for PlaneWindow {
    fn default() -> PlaneWindow {
        PlaneWindow {
            x_min: -2.0,
            x_max: 1.0,
            y_min: -1.0,
            y_max: 1.0,
        }
    }
}

/// The size of the integral plane, derived from a window and a pixel
/// density.  Width and height are truncated toward zero, so a window
/// narrower than one pixel produces an empty raster.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pixels_per_unit: u32,
    width: usize,
    height: usize,
}

impl Resolution {
    /// Derives the raster size for `window` at `pixels_per_unit`
    /// pixels per unit of the complex plane.
    pub fn new(pixels_per_unit: u32, window: &PlaneWindow) -> Result<Resolution, Error> {
        if pixels_per_unit == 0 {
            return Err(Error::InvalidResolution);
        }
        let density = f64::from(pixels_per_unit);
        Ok(Resolution {
            pixels_per_unit,
            width: (density * window.width()) as usize,
            height: (density * window.height()) as usize,
        })
    }

    /// Pixels per unit of the complex plane.
    pub fn pixels_per_unit(&self) -> u32 {
        self.pixels_per_unit
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Contains the definitions of two planes: an integral cartesian
/// plane, and the complex window it samples.  Maps pixels from one to
/// the other.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneMapper {
    window: PlaneWindow,
    resolution: Resolution,
}

impl PlaneMapper {
    /// Constructor.  Derives the resolution from the window, so the
    /// two can never disagree.
    pub fn new(window: PlaneWindow, pixels_per_unit: u32) -> Result<PlaneMapper, Error> {
        let resolution = Resolution::new(pixels_per_unit, &window)?;
        Ok(PlaneMapper { window, resolution })
    }

    /// The complex window.
    pub fn window(&self) -> &PlaneWindow {
        &self.window
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.resolution.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.resolution.height
    }

    /// The total number of points in the integral grid.  Saturates
    /// rather than overflowing; the raster refuses sizes that large
    /// anyway.
    pub fn len(&self) -> usize {
        self.resolution.width.saturating_mul(self.resolution.height)
    }

    /// Describes that the integral plane has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.resolution.width == 0 || self.resolution.height == 0
    }

    /// Given a pixel on the integral cartesian plane, map it to the
    /// point on the complex plane at its upper-left corner.  The
    /// vertical axis is not flipped: moving down a row moves up the
    /// imaginary axis.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let density = f64::from(self.resolution.pixels_per_unit());
        Complex::new(
            self.window.x_min + (pixel.0 as f64) / density,
            self.window.y_min + (pixel.1 as f64) / density,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_fails_on_bad_shape() {
        assert!(PlaneWindow::new(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(PlaneWindow::new(-1.0, 1.0, 1.0, -1.0).is_err());
        assert!(PlaneWindow::new(-1.0, -1.0, -1.0, 1.0).is_err());
    }

    #[test]
    fn window_fails_on_non_finite_bounds() {
        assert!(PlaneWindow::new(::std::f64::NAN, 1.0, -1.0, 1.0).is_err());
        assert!(PlaneWindow::new(-1.0, ::std::f64::INFINITY, -1.0, 1.0).is_err());
    }

    #[test]
    fn window_from_corners_matches_bounds() {
        let window =
            PlaneWindow::from_corners(Complex::new(-2.0, -1.0), Complex::new(1.0, 1.0)).unwrap();
        assert_eq!(window, PlaneWindow::default());
        assert_eq!(window.width(), 3.0);
        assert_eq!(window.height(), 2.0);
    }

    #[test]
    fn resolution_rejects_zero_density() {
        match Resolution::new(0, &PlaneWindow::default()) {
            Err(Error::InvalidResolution) => {}
            other => panic!("expected InvalidResolution, got {:?}", other),
        }
    }

    #[test]
    fn resolution_scales_window() {
        let r = Resolution::new(10, &PlaneWindow::default()).unwrap();
        assert_eq!(r.pixels_per_unit(), 10);
        assert_eq!((r.width(), r.height()), (30, 20));

        let r = Resolution::new(DEFAULT_PIXELS_PER_UNIT, &PlaneWindow::default()).unwrap();
        assert_eq!((r.width(), r.height()), (3000, 2000));
    }

    #[test]
    fn resolution_truncates_partial_pixels() {
        let window = PlaneWindow::new(0.0, 0.25, 0.0, 0.05).unwrap();
        let r = Resolution::new(10, &window).unwrap();
        assert_eq!((r.width(), r.height()), (2, 0));
        assert!(PlaneMapper::new(window, 10).unwrap().is_empty());
    }

    #[test]
    fn pixel_to_point_at_origin_is_window_origin() {
        let pm = PlaneMapper::new(PlaneWindow::default(), 10).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -1.0));
    }

    #[test]
    fn pixel_to_point_does_not_flip_rows() {
        let pm = PlaneMapper::new(PlaneWindow::default(), 10).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(20, 10)), Complex::new(0.0, 0.0));
        assert!(pm.pixel_to_point(&Pixel(0, 1)).im > pm.pixel_to_point(&Pixel(0, 0)).im);
    }

    #[test]
    fn pixel_to_point_at_far_corner_is_one_step_short() {
        let pm = PlaneMapper::new(PlaneWindow::default(), 10).unwrap();
        let far = pm.pixel_to_point(&Pixel(pm.width() - 1, pm.height() - 1));
        assert!((far.re - 0.9).abs() < 1e-12);
        assert!((far.im - 0.9).abs() < 1e-12);
    }

    #[test]
    fn mapper_len_is_width_times_height() {
        let pm = PlaneMapper::new(PlaneWindow::default(), 10).unwrap();
        assert_eq!(pm.len(), 600);
        assert_eq!((pm.width(), pm.height()), (30, 20));
    }
}
