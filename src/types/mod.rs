//! Core data types.

pub mod adjust;
mod buffer;
mod colour;
mod palette;
mod preset;

pub use adjust::{Adjustment, AdjustmentParams};
pub use buffer::PixelBuffer;
pub use colour::Colour;
pub use palette::Palette;
pub use preset::{BuiltinPresets, Preset};
