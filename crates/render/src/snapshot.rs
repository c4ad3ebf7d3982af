//! PNG encoding of a rendered [`Frame`].
//!
//! Feature-gated behind `png` (default on) so that frames can be produced
//! without pulling in the `image` crate.

use crate::pixel::Frame;
use efield_core::FieldError;
use std::path::Path;

/// Writes a frame as an RGBA PNG.
///
/// Returns `FieldError::InvalidDimensions` if the frame size overflows `u32`,
/// or `FieldError::Io` on encode or write failure.
pub fn write_png(frame: &Frame, path: &Path) -> Result<(), FieldError> {
    let w = u32::try_from(frame.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(frame.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, frame.as_rgba().to_vec())
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    log::debug!("wrote {w}x{h} frame to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Srgb;
    use efield_core::Viewport;

    #[test]
    fn write_png_round_trip() {
        let mut frame = Frame::new(Viewport::new(16, 8).unwrap(), Srgb::LIGHT_BLUE);
        frame.put(3, 2, Srgb::RED);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        write_png(&frame, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 8);
        assert_eq!(img.get_pixel(3, 2).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [173, 216, 230, 255]);
    }

    #[test]
    fn write_into_missing_directory_is_io_error() {
        let frame = Frame::new(Viewport::new(2, 2).unwrap(), Srgb::WHITE);
        let dir = tempfile::tempdir().unwrap();
        let result = write_png(&frame, &dir.path().join("missing").join("frame.png"));
        assert!(matches!(result, Err(FieldError::Io(_))));
    }
}
