//! Flat RGBA pixel buffer.

use std::collections::{HashMap, HashSet};

use image::RgbaImage;

use crate::error::{PixelateError, Result};

use super::Colour;

/// A row-major RGBA8 pixel buffer.
///
/// Invariant: `data.len() == width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap caller-supplied RGBA bytes.
    ///
    /// Fails with [`PixelateError::Decode`] when the length does not match
    /// the declared dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PixelateError::Decode {
                message: format!(
                    "buffer of {} bytes does not match {}x{} RGBA ({} bytes)",
                    data.len(),
                    width,
                    height,
                    expected
                ),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of a decoded `image` buffer.
    pub fn from_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Copy into an `image` buffer.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| image::Rgba(self.pixel(x, y)))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the buffer has zero area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// RGBA sample at (x, y). Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// RGB colour at (x, y), alpha dropped.
    pub fn colour_at(&self, x: u32, y: u32) -> Colour {
        let [r, g, b, _] = self.pixel(x, y);
        Colour::rgb(r, g, b)
    }

    /// Alpha at (x, y).
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.data[self.offset(x, y) + 3]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Iterate every pixel's RGB colour in row-major order.
    pub fn colours(&self) -> impl Iterator<Item = Colour> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| Colour::rgb(px[0], px[1], px[2]))
    }

    /// Distinct colours in first-occurrence order.
    pub fn distinct_colours(&self) -> Vec<Colour> {
        let mut seen = HashSet::new();
        self.colours().filter(|c| seen.insert(*c)).collect()
    }

    /// Distinct colours with their pixel counts, in first-occurrence order.
    pub fn colour_histogram(&self) -> Vec<(Colour, u64)> {
        self.histogram(|_| true)
    }

    /// Like [`PixelBuffer::colour_histogram`], skipping fully transparent
    /// pixels.
    pub fn visible_colour_histogram(&self) -> Vec<(Colour, u64)> {
        self.histogram(|px| px[3] > 0)
    }

    fn histogram(&self, keep: impl Fn(&[u8]) -> bool) -> Vec<(Colour, u64)> {
        let mut index: HashMap<Colour, usize> = HashMap::new();
        let mut counts: Vec<(Colour, u64)> = Vec::new();
        for px in self.data.chunks_exact(4).filter(|px| keep(*px)) {
            let colour = Colour::rgb(px[0], px[1], px[2]);
            let slot = *index.entry(colour).or_insert_with(|| {
                counts.push((colour, 0));
                counts.len() - 1
            });
            counts[slot].1 += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.as_bytes().len(), 3 * 2 * 4);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, PixelateError::Decode { .. }));
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_pixel_access() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set_pixel(1, 1, [10, 20, 30, 40]);
        assert_eq!(buf.pixel(1, 1), [10, 20, 30, 40]);
        assert_eq!(buf.colour_at(1, 1), Colour::rgb(10, 20, 30));
        assert_eq!(buf.alpha_at(1, 1), 40);
        assert_eq!(buf.pixel(0, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_distinct_colours_keeps_order() {
        let data = vec![
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            255, 0, 0, 128, //
            0, 0, 255, 255,
        ];
        let buf = PixelBuffer::from_raw(2, 2, data).unwrap();
        assert_eq!(
            buf.distinct_colours(),
            vec![
                Colour::rgb(255, 0, 0),
                Colour::rgb(0, 255, 0),
                Colour::rgb(0, 0, 255)
            ]
        );
    }

    #[test]
    fn test_colour_histogram_counts_pixels() {
        let data = vec![
            0, 0, 255, 255, //
            255, 0, 0, 255, //
            0, 0, 255, 0, //
            0, 0, 255, 255,
        ];
        let buf = PixelBuffer::from_raw(2, 2, data).unwrap();
        assert_eq!(
            buf.colour_histogram(),
            vec![(Colour::rgb(0, 0, 255), 3), (Colour::rgb(255, 0, 0), 1)]
        );
        assert_eq!(
            buf.visible_colour_histogram(),
            vec![(Colour::rgb(0, 0, 255), 2), (Colour::rgb(255, 0, 0), 1)]
        );
    }

    #[test]
    fn test_to_image_copies_every_pixel() {
        let mut buf = PixelBuffer::new(3, 2);
        buf.set_pixel(2, 1, [7, 8, 9, 10]);
        let img = buf.to_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [7, 8, 9, 10]);
        assert_eq!(img.as_raw(), buf.as_bytes());
    }

    #[test]
    fn test_image_round_trip() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.set_pixel(0, 0, [1, 2, 3, 4]);
        let img = buf.to_image();
        assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 4]);
        assert_eq!(PixelBuffer::from_image(img), buf);
    }
}
