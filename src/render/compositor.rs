//! The pixelation pipeline.
//!
//! `render` letterboxes the source into the output canvas, builds a palette
//! from the canvas colours, then paints each block with the nearest palette
//! entry to its (adjusted) average colour.

use crate::error::{PixelateError, Result};
use crate::types::{adjust, AdjustmentParams, Palette, PixelBuffer, Preset};

use super::block::{average_alpha, average_block, fill_block, BlockGrid};
use super::letterbox::{letterbox, Resample};
use super::quantize::{QuantizeOptions, Quantizer};

/// Everything a render needs besides the source image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub output_width: u32,
    pub output_height: u32,
    /// Block side length in output pixels.
    pub pixel_size: u32,
    /// Upper bound on palette size.
    pub colour_count: usize,
    pub adjustment: AdjustmentParams,
    pub quantize: QuantizeOptions,
    pub resample: Resample,
    /// Fixed palette; skips clustering when set.
    pub palette: Option<Palette>,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            output_width: 800,
            output_height: 600,
            pixel_size: 10,
            colour_count: 16,
            adjustment: AdjustmentParams::NONE,
            quantize: QuantizeOptions::default(),
            resample: Resample::default(),
            palette: None,
        }
    }
}

impl RenderParams {
    /// Canvas of the given size, everything else default.
    pub fn with_size(output_width: u32, output_height: u32) -> Self {
        Self {
            output_width,
            output_height,
            ..Self::default()
        }
    }

    /// Take block size, colour count and adjustments from a preset.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.pixel_size = preset.pixel_size;
        self.colour_count = preset.colour_count;
        self.adjustment = preset.adjustment;
    }

    /// Reject parameters the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.pixel_size < 1 {
            return Err(PixelateError::invalid(
                "pixel_size",
                "must be at least 1",
                "Use 1 to keep every canvas pixel as its own block",
            ));
        }
        if self.colour_count < 2 {
            return Err(PixelateError::invalid(
                "colour_count",
                format!("{} is below the minimum of 2", self.colour_count),
                "Request at least 2 colours",
            ));
        }
        if self.output_width == 0 || self.output_height == 0 {
            return Err(PixelateError::invalid(
                "output_size",
                format!(
                    "{}x{} has no area",
                    self.output_width, self.output_height
                ),
                "Output width and height must both be positive",
            ));
        }
        if self.palette.as_ref().is_some_and(Palette::is_empty) {
            return Err(PixelateError::invalid(
                "palette",
                "fixed palette is empty",
                "Provide at least one colour or drop the fixed palette",
            ));
        }
        self.adjustment.validate()
    }
}

/// Output of a render: the painted canvas and the palette it was painted with.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    pub buffer: PixelBuffer,
    pub palette: Palette,
}

/// Run the pipeline and return only the painted canvas.
pub fn render(source: &PixelBuffer, params: &RenderParams) -> Result<PixelBuffer> {
    render_detailed(source, params).map(|r| r.buffer)
}

/// Run the pipeline and keep the palette as well.
pub fn render_detailed(source: &PixelBuffer, params: &RenderParams) -> Result<Rendering> {
    params.validate()?;
    if source.is_empty() {
        return Err(PixelateError::EmptySource {
            width: source.width(),
            height: source.height(),
        });
    }

    let canvas = letterbox(
        source,
        params.output_width,
        params.output_height,
        params.resample,
    );

    let palette = match &params.palette {
        Some(fixed) => fixed.clone(),
        None => {
            let population = canvas.colour_histogram();
            Quantizer::new(&params.quantize).quantize_weighted(&population, params.colour_count)
        }
    };

    let grid = BlockGrid::new(canvas.width(), canvas.height(), params.pixel_size);
    let adjustments = params.adjustment.pipeline();
    tracing::debug!(
        blocks = grid.len(),
        palette = palette.len(),
        adjustments = adjustments.len(),
        "painting blocks"
    );

    let mut output = PixelBuffer::new(canvas.width(), canvas.height());
    for block in grid.iter() {
        let size = grid.block_size();
        let average = average_block(&canvas, block.x, block.y, size);
        let alpha = average_alpha(&canvas, block.x, block.y, size);
        let colour = palette.nearest(adjust::apply_all(&adjustments, average));
        fill_block(&mut output, block, colour.with_alpha(alpha));
    }

    Ok(Rendering {
        buffer: output,
        palette,
    })
}
