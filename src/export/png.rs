//! PNG output for rendered buffers.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{PixelateError, Result};
use crate::types::PixelBuffer;

/// Losslessly encode a buffer as an RGBA8 PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            buffer.as_bytes(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| PixelateError::Encode {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_round_trip() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set_pixel(0, 0, [0, 0, 0, 255]);
        buf.set_pixel(1, 0, [255, 255, 255, 255]);
        buf.set_pixel(1, 1, [255, 0, 0, 128]);

        let bytes = encode_png(&buf).unwrap();

        // Read back and verify
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 128]);
    }

    #[test]
    fn test_encode_has_png_signature() {
        let bytes = encode_png(&PixelBuffer::new(1, 1)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
