pub mod batch;
pub mod completions;
pub mod convert;
pub mod palette;
pub mod presets;

use clap::{Parser, Subcommand};

/// pixelate - Turn images into block-quantized pixel art
#[derive(Parser, Debug)]
#[command(name = "pixelate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert images to pixel art
    Convert(convert::ConvertArgs),

    /// Convert every image in a directory tree
    Batch(batch::BatchArgs),

    /// Extract a quantized colour palette from an image
    Palette(palette::PaletteArgs),

    /// List the built-in style presets
    Presets(presets::PresetsArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
