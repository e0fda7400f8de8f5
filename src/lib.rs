//! pixelate - Turn images into block-quantized pixel art
//!
//! A library for letterboxing an image onto a fixed canvas, averaging it
//! into square blocks, adjusting the block colours, and snapping them to a
//! k-means palette. Results export as PNG, SVG or a JSON colour grid.
//!
//! ```ignore
//! use pixelate::{export, render, ExportFormat, PixelBuffer, RenderParams};
//!
//! let source = PixelBuffer::from_image(image::open("cat.jpg")?.to_rgba8());
//! let params = RenderParams { pixel_size: 8, ..RenderParams::with_size(320, 240) };
//! let art = render(&source, &params)?;
//! let svg = export(&art, params.pixel_size, ExportFormat::Svg)?;
//! ```

pub mod cli;
pub mod discovery;
pub mod error;
pub mod export;
pub mod output;
pub mod render;
pub mod types;

pub use discovery::{discover, ScanResult, Settings};
pub use error::{PixelateError, Result};
pub use export::{export, ExportArtifact, ExportFormat, PixelGrid, Rect, VectorDocument};
pub use render::{
    letterbox, quantize, quantize_weighted, render, render_detailed, BlockGrid, QuantizeOptions,
    Quantizer, RenderParams, Rendering, Resample, Reseed,
};
pub use types::{Adjustment, AdjustmentParams, BuiltinPresets, Colour, Palette, PixelBuffer, Preset};
