//! Export encoders.
//!
//! Each encoder reads a rendered [`PixelBuffer`] and produces an immutable
//! [`ExportArtifact`]. The vector and grid encoders read one sample per
//! block (its top-left pixel) since rendered blocks are uniform.

mod json;
mod png;
mod svg;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PixelBuffer;

pub use json::PixelGrid;
pub use png::encode_png;
pub use svg::{Rect, VectorDocument};

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Svg,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Svg, ExportFormat::Json];

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An encoded export, tagged with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    format: ExportFormat,
    bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The payload as text, for the text-based formats.
    pub fn as_text(&self) -> Option<&str> {
        match self.format {
            ExportFormat::Png => None,
            ExportFormat::Svg | ExportFormat::Json => std::str::from_utf8(&self.bytes).ok(),
        }
    }
}

/// Encode a rendered buffer.
///
/// `pixel_size` must be the block size the buffer was rendered with; the
/// raster encoder ignores it.
pub fn export(buffer: &PixelBuffer, pixel_size: u32, format: ExportFormat) -> Result<ExportArtifact> {
    let bytes = match format {
        ExportFormat::Png => encode_png(buffer)?,
        ExportFormat::Svg => VectorDocument::from_buffer(buffer, pixel_size)
            .to_string()
            .into_bytes(),
        ExportFormat::Json => PixelGrid::from_buffer(buffer, pixel_size)
            .to_json()?
            .into_bytes(),
    };
    Ok(ExportArtifact { format, bytes })
}
