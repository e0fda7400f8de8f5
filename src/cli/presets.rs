//! Presets command implementation.

use clap::Args;

use crate::error::Result;
use crate::types::{BuiltinPresets, Preset};

/// List the built-in style presets
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Print names only, one per line
    #[arg(long, short)]
    pub quiet: bool,
}

pub fn run(args: PresetsArgs) -> Result<()> {
    for preset in BuiltinPresets::all() {
        if args.quiet {
            println!("{}", preset.name);
        } else {
            println!("{}", describe(preset));
        }
    }
    Ok(())
}

/// One table row: name, block size, colours, adjustments, description.
fn describe(preset: &Preset) -> String {
    let adj = &preset.adjustment;
    format!(
        "{:<10} {:>3}px {:>3} colours  b{:<4} c{:<4} s{:<4} {}",
        preset.name,
        preset.pixel_size,
        preset.colour_count,
        adj.brightness,
        adj.contrast,
        adj.saturation,
        preset.description
    )
}
