//! Rendering module for pixelate.
//!
//! This module turns a decoded source image into block-quantized pixel art:
//! letterboxing, block averaging, colour adjustment and palette lookup.

pub mod block;
mod compositor;
mod letterbox;
pub mod quantize;

pub use block::{average_block, Block, BlockGrid};
pub use compositor::{render, render_detailed, RenderParams, Rendering};
pub use letterbox::{letterbox, Placement, Resample};
pub use quantize::{quantize, quantize_weighted, QuantizeOptions, Quantizer, Reseed, DEFAULT_ITERATIONS};
