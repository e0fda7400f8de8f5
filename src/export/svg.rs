//! SVG output: one `<rect>` per visible block.

use std::fmt;

use crate::render::BlockGrid;
use crate::types::{Colour, PixelBuffer};

use super::PixelGrid;

/// A filled square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
    pub fill: Colour,
    pub alpha: u8,
}

impl Rect {
    /// Alpha as a 0..=1 opacity.
    pub fn opacity(&self) -> f64 {
        self.alpha as f64 / 255.0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="rgb({}, {}, {})" opacity="{}" />"#,
            self.x,
            self.y,
            self.size,
            self.size,
            self.fill.r,
            self.fill.g,
            self.fill.b,
            self.opacity()
        )
    }
}

/// A vector document: canvas size plus rectangles in row-major block order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDocument {
    pub width: u32,
    pub height: u32,
    pub rects: Vec<Rect>,
}

impl VectorDocument {
    /// One rect per block whose top-left pixel is not fully transparent.
    pub fn from_buffer(buffer: &PixelBuffer, pixel_size: u32) -> Self {
        let grid = BlockGrid::new(buffer.width(), buffer.height(), pixel_size);
        let size = grid.block_size();
        let rects = grid
            .iter()
            .filter_map(|block| {
                let [r, g, b, a] = buffer.pixel(block.x, block.y);
                (a > 0).then_some(Rect {
                    x: block.x,
                    y: block.y,
                    size,
                    fill: Colour::rgb(r, g, b),
                    alpha: a,
                })
            })
            .collect();

        Self {
            width: buffer.width(),
            height: buffer.height(),
            rects,
        }
    }

    /// Re-encode a pixel grid: one rect per cell that is not fully
    /// transparent.
    pub fn from_grid(grid: &PixelGrid, pixel_size: u32) -> Self {
        let size = pixel_size.max(1);
        let rects = grid
            .pixels
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells.iter().enumerate().filter_map(move |(col, &fill)| {
                    let alpha = grid.alpha(col, row);
                    (alpha > 0).then_some(Rect {
                        x: col as u32 * size,
                        y: row as u32 * size,
                        size,
                        fill,
                        alpha,
                    })
                })
            })
            .collect();

        Self {
            width: grid.width * size,
            height: grid.height * size,
            rects,
        }
    }
}

impl fmt::Display for VectorDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
            self.width, self.height
        )?;
        for rect in &self.rects {
            write!(f, "{}", rect)?;
        }
        f.write_str("</svg>")
    }
}
