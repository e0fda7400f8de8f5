//! Block grid and per-block averaging.

use crate::types::{Colour, PixelBuffer};

/// One cell of a [`BlockGrid`], already clipped to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Block {
    /// Number of canvas pixels covered.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Partition of a canvas into square blocks of side `size`.
///
/// The last column and row are narrower when the canvas is not an exact
/// multiple of the block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    width: u32,
    height: u32,
    size: u32,
}

impl BlockGrid {
    /// A `size` of 0 is treated as 1.
    pub fn new(width: u32, height: u32, size: u32) -> Self {
        Self {
            width,
            height,
            size: size.max(1),
        }
    }

    pub fn block_size(&self) -> u32 {
        self.size
    }

    pub fn columns(&self) -> u32 {
        self.width.div_ceil(self.size)
    }

    pub fn rows(&self) -> u32 {
        self.height.div_ceil(self.size)
    }

    pub fn len(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blocks left-to-right, then top-to-bottom.
    pub fn iter(&self) -> impl Iterator<Item = Block> + '_ {
        let size = self.size;
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |col| {
                let x = col * size;
                let y = row * size;
                Block {
                    x,
                    y,
                    width: size.min(self.width - x),
                    height: size.min(self.height - y),
                }
            })
        })
    }
}

/// Clip a block at (x, y) with side `size` to the buffer bounds.
fn clip(buffer: &PixelBuffer, x: u32, y: u32, size: u32) -> (u32, u32, u32, u32) {
    let x_end = x.saturating_add(size).min(buffer.width());
    let y_end = y.saturating_add(size).min(buffer.height());
    (x, y, x_end, y_end)
}

/// Truncated mean RGB over the in-bounds part of a square block.
///
/// Alpha is ignored. The origin must lie inside the buffer; with an
/// out-of-bounds origin there are no samples and black is returned.
pub fn average_block(buffer: &PixelBuffer, x: u32, y: u32, size: u32) -> Colour {
    let (x0, y0, x1, y1) = clip(buffer, x, y, size);
    let (mut r, mut g, mut b, mut count) = (0u64, 0u64, 0u64, 0u64);

    for py in y0..y1 {
        for px in x0..x1 {
            let [pr, pg, pb, _] = buffer.pixel(px, py);
            r += pr as u64;
            g += pg as u64;
            b += pb as u64;
            count += 1;
        }
    }

    if count == 0 {
        return Colour::BLACK;
    }
    Colour::rgb((r / count) as u8, (g / count) as u8, (b / count) as u8)
}

/// Truncated mean alpha over the same samples as [`average_block`].
pub fn average_alpha(buffer: &PixelBuffer, x: u32, y: u32, size: u32) -> u8 {
    let (x0, y0, x1, y1) = clip(buffer, x, y, size);
    let mut sum = 0u64;
    let mut count = 0u64;
    for py in y0..y1 {
        for px in x0..x1 {
            sum += buffer.alpha_at(px, py) as u64;
            count += 1;
        }
    }
    if count == 0 {
        0
    } else {
        (sum / count) as u8
    }
}

/// Paint every pixel of `block` with one RGBA value.
pub fn fill_block(buffer: &mut PixelBuffer, block: Block, rgba: [u8; 4]) {
    for py in block.y..block.y + block.height {
        for px in block.x..block.x + block.width {
            buffer.set_pixel(px, py, rgba);
        }
    }
}
