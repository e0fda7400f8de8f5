//! Uniform scaling of a source image into a fixed canvas.
//!
//! The source keeps its aspect ratio and is centred; uncovered margins stay
//! fully transparent.

use std::fmt;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::types::PixelBuffer;

/// Resampling filter used when the source has to change size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Resample {
    /// Nearest neighbour; keeps hard edges.
    Nearest,
    /// Linear interpolation.
    #[default]
    Bilinear,
    /// Lanczos with window 3; sharpest, slowest.
    Lanczos,
}

impl Resample {
    fn filter(self) -> FilterType {
        match self {
            Resample::Nearest => FilterType::Nearest,
            Resample::Bilinear => FilterType::Triangle,
            Resample::Lanczos => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for Resample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resample::Nearest => write!(f, "nearest"),
            Resample::Bilinear => write!(f, "bilinear"),
            Resample::Lanczos => write!(f, "lanczos"),
        }
    }
}

/// Placement of the scaled source inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub draw_width: u32,
    pub draw_height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl Placement {
    /// Fit `source` into `canvas` with a single scale factor.
    ///
    /// Both sizes must be non-zero.
    pub fn fit(source: (u32, u32), canvas: (u32, u32)) -> Self {
        let (sw, sh) = source;
        let (cw, ch) = canvas;
        let scale = (cw as f64 / sw as f64).min(ch as f64 / sh as f64);

        let draw_width = ((sw as f64 * scale).round() as u32).clamp(1, cw);
        let draw_height = ((sh as f64 * scale).round() as u32).clamp(1, ch);

        Self {
            draw_width,
            draw_height,
            offset_x: (cw - draw_width) / 2,
            offset_y: (ch - draw_height) / 2,
        }
    }
}

/// Scale and centre `source` on a transparent `width` x `height` canvas.
pub fn letterbox(source: &PixelBuffer, width: u32, height: u32, resample: Resample) -> PixelBuffer {
    let placement = Placement::fit((source.width(), source.height()), (width, height));
    tracing::debug!(?placement, %resample, "letterboxing source");

    let src = source.to_image();
    let scaled = if (placement.draw_width, placement.draw_height) == src.dimensions() {
        src
    } else {
        imageops::resize(
            &src,
            placement.draw_width,
            placement.draw_height,
            resample.filter(),
        )
    };

    let mut canvas = RgbaImage::new(width, height);
    imageops::replace(
        &mut canvas,
        &scaled,
        placement.offset_x as i64,
        placement.offset_y as i64,
    );
    PixelBuffer::from_image(canvas)
}
