//! JSON output: a row-major grid of block colours.

use serde::{Deserialize, Serialize};

use crate::error::{PixelateError, Result};
use crate::render::BlockGrid;
use crate::types::{Colour, PixelBuffer};

/// Block colours in grid order.
///
/// Alpha is not part of the JSON document. A grid sampled from a buffer
/// remembers each cell's alpha in memory; a deserialized grid treats every
/// cell as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelGrid {
    /// Cells in the first row (0 when there are no rows).
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    pub pixels: Vec<Vec<Colour>>,
    #[serde(skip)]
    alpha: Vec<Vec<u8>>,
}

impl PixelGrid {
    /// A fully opaque grid from rows of colours.
    pub fn new(pixels: Vec<Vec<Colour>>) -> Self {
        Self {
            width: pixels.first().map_or(0, |row| row.len() as u32),
            height: pixels.len() as u32,
            pixels,
            alpha: Vec::new(),
        }
    }

    /// Sample each block's top-left pixel.
    pub fn from_buffer(buffer: &PixelBuffer, pixel_size: u32) -> Self {
        let grid = BlockGrid::new(buffer.width(), buffer.height(), pixel_size);
        let size = grid.block_size();

        let (pixels, alpha): (Vec<Vec<Colour>>, Vec<Vec<u8>>) = (0..grid.rows())
            .map(|row| {
                (0..grid.columns())
                    .map(|col| {
                        let [r, g, b, a] = buffer.pixel(col * size, row * size);
                        (Colour::rgb(r, g, b), a)
                    })
                    .unzip::<_, _, Vec<_>, Vec<_>>()
            })
            .filter(|(row, _)| !row.is_empty())
            .unzip();

        Self {
            alpha,
            ..Self::new(pixels)
        }
    }

    /// Alpha of the cell at (`col`, `row`); 255 when the grid has no alpha.
    pub fn alpha(&self, col: usize, row: usize) -> u8 {
        self.alpha
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(255)
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PixelateError::Encode {
            message: format!("Failed to encode pixel grid: {}", e),
        })
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| PixelateError::Parse {
            message: format!("Invalid pixel grid: {}", e),
            help: Some("Expected an object with width, height and pixels".to_string()),
        })
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.pixels.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buf.set_pixel(x, y, [x as u8, y as u8, 0, 255]);
            }
        }
        buf
    }

    #[test]
    fn test_samples_block_origins() {
        let grid = PixelGrid::from_buffer(&gradient(5, 3), 2);
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        assert_eq!(
            grid.pixels,
            vec![
                vec![Colour::rgb(0, 0, 0), Colour::rgb(2, 0, 0), Colour::rgb(4, 0, 0)],
                vec![Colour::rgb(0, 2, 0), Colour::rgb(2, 2, 0), Colour::rgb(4, 2, 0)],
            ]
        );
        assert_eq!(grid.len(), 6);
    }

    #[test]
    fn test_empty_buffer() {
        let grid = PixelGrid::from_buffer(&PixelBuffer::new(0, 0), 4);
        assert_eq!(grid.width, 0);
        assert_eq!(grid.height, 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_alpha_is_sampled_but_not_serialized() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set_pixel(0, 0, [9, 9, 9, 255]);
        buf.set_pixel(1, 0, [9, 9, 9, 128]);

        let grid = PixelGrid::from_buffer(&buf, 1);
        assert_eq!(grid.alpha(0, 0), 255);
        assert_eq!(grid.alpha(1, 0), 128);
        assert_eq!(grid.alpha(0, 1), 0);
        assert!(!grid.to_json().unwrap().contains("alpha"));
    }

    #[test]
    fn test_json_layout() {
        let grid = PixelGrid::from_buffer(&gradient(1, 1), 1);
        insta::assert_snapshot!(grid.to_json().unwrap(), @r#"
        {
          "width": 1,
          "height": 1,
          "pixels": [
            [
              {
                "r": 0,
                "g": 0,
                "b": 0
              }
            ]
          ]
        }
        "#);
    }

    #[test]
    fn test_from_json() {
        let grid = PixelGrid::from_buffer(&gradient(4, 4), 2);
        let parsed = PixelGrid::from_json(&grid.to_json().unwrap()).unwrap();
        assert_eq!(parsed.pixels, grid.pixels);
        assert_eq!((parsed.width, parsed.height), (2, 2));
        assert_eq!(parsed.alpha(1, 1), 255);

        assert!(matches!(
            PixelGrid::from_json("{\"width\": 1}"),
            Err(PixelateError::Parse { .. })
        ));
    }
}
