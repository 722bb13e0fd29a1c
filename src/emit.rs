// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing the finished raster out.  The encoders come from the
//! `image` crate; all we promise them is 8-bit, three channel,
//! row-major RGB.

use errors::Error;
use image::png::PNGEncoder;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use raster::Raster;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// The container formats we know how to write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics, non-interlaced.
    Png,
    /// Binary portable pixmap (P6).
    Pnm,
}

impl ImageFormat {
    /// Picks a format from the file extension.  `.ppm` and `.pnm` get
    /// a pixmap; everything else, including no extension, gets PNG.
    pub fn from_path(path: &Path) -> ImageFormat {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
        {
            Some(ref e) if e == "ppm" || e == "pnm" => ImageFormat::Pnm,
            _ => ImageFormat::Png,
        }
    }
}

/// The raster's dimensions as the encoders want them.  Anything that
/// does not fit a `u32` is refused rather than truncated.
fn encoder_dimensions(width: usize, height: usize) -> io::Result<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("a {}x{} raster is too large to encode", width, height),
        )),
    }
}

/// Encodes the raster into `writer`.
pub fn write_image<W: Write>(raster: &Raster, format: ImageFormat, writer: W) -> io::Result<()> {
    if raster.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "a {}x{} raster has no pixels to write",
                raster.width(),
                raster.height()
            ),
        ));
    }

    let (width, height) = encoder_dimensions(raster.width(), raster.height())?;
    match format {
        ImageFormat::Png => {
            PNGEncoder::new(writer).encode(raster.as_rgb(), width, height, ColorType::RGB(8))
        }
        ImageFormat::Pnm => PNMEncoder::new(writer)
            .with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary))
            .encode(raster.as_rgb(), width, height, ColorType::RGB(8)),
    }
}

/// Writes the raster to `path`, choosing the format from the
/// extension.  Any failure to create, encode, or flush the file comes
/// back as `EmitFailure`.
pub fn emit(raster: &Raster, path: &Path) -> Result<(), Error> {
    let format = ImageFormat::from_path(path);
    let failed = |cause: io::Error| Error::EmitFailure {
        path: path.display().to_string(),
        io: cause,
    };

    let file = File::create(path).map_err(&failed)?;
    let mut writer = BufWriter::new(file);
    write_image(raster, format, &mut writer).map_err(&failed)?;
    writer.flush().map_err(&failed)?;

    info!(
        "wrote {}x{} {:?} image to {}",
        raster.width(),
        raster.height(),
        format,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradient::Color;
    use planes::Pixel;

    #[test]
    fn format_follows_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("out.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("out.PPM")), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_path(Path::new("out.pnm")), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_path(Path::new("out")), ImageFormat::Png);
    }

    #[test]
    fn pixmap_is_header_then_raw_rgb() {
        let mut raster = Raster::new(2, 1).unwrap();
        raster.set(&Pixel(1, 0), Color::new(1, 2, 3)).unwrap();
        let mut out: Vec<u8> = Vec::new();
        write_image(&raster, ImageFormat::Pnm, &mut out).unwrap();
        assert!(out.starts_with(b"P6"));
        assert!(out.ends_with(&[0, 0, 0, 1, 2, 3]));
    }

    #[test]
    fn png_starts_with_signature() {
        let raster = Raster::new(2, 2).unwrap();
        let mut out: Vec<u8> = Vec::new();
        write_image(&raster, ImageFormat::Png, &mut out).unwrap();
        assert!(out.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn empty_raster_is_not_written() {
        let raster = Raster::new(0, 4).unwrap();
        let mut out: Vec<u8> = Vec::new();
        let err = write_image(&raster, ImageFormat::Png, &mut out).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn oversized_dimensions_are_refused() {
        assert_eq!(encoder_dimensions(30, 20).unwrap(), (30, 20));
        let max = ::std::u32::MAX as usize;
        assert_eq!(encoder_dimensions(max, 1).unwrap(), (::std::u32::MAX, 1));
        if let Some(wide) = max.checked_add(1) {
            let err = encoder_dimensions(wide, 1).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
            let err = encoder_dimensions(1, ::std::usize::MAX).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn missing_directory_is_an_emit_failure() {
        let raster = Raster::new(1, 1).unwrap();
        match emit(&raster, Path::new("/nonexistent/dir/out.png")) {
            Err(Error::EmitFailure { ref path, .. }) => {
                assert_eq!(path, "/nonexistent/dir/out.png")
            }
            other => panic!("expected EmitFailure, got {:?}", other),
        }
    }
}
