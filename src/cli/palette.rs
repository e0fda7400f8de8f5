use std::path::PathBuf;

use clap::Args;

use crate::error::{PixelateError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::{quantize_weighted, QuantizeOptions, Reseed, DEFAULT_ITERATIONS};
use crate::types::{Palette, PixelBuffer};

use super::convert::load_source;

/// Extract a quantized colour palette from an image
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Image to extract colours from
    #[arg(required = true)]
    pub file: PathBuf,

    /// Number of colours to output
    #[arg(long, short = 'c', default_value_t = 16)]
    pub colours: usize,

    /// k-means iterations
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Seed for empty-cluster reseeding
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reseed empty clusters from the farthest colour instead of at random
    #[arg(long)]
    pub deterministic: bool,
}

impl PaletteArgs {
    fn options(&self) -> QuantizeOptions {
        QuantizeOptions {
            iterations: self.iterations,
            reseed: if self.deterministic {
                Reseed::Farthest
            } else {
                Reseed::Random
            },
            seed: self.seed,
        }
    }
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    if args.colours < 2 {
        return Err(PixelateError::invalid(
            "colours",
            format!("{} is below the minimum of 2", args.colours),
            "Request at least 2 colours",
        ));
    }

    let source = load_source(&args.file)?;
    let palette = extract(&source, args.colours, &args.options());

    printer.status(
        "Sampled",
        &format!(
            "{} from {}",
            plural(palette.len(), "colour", "colours"),
            display_path(&args.file)
        ),
    );

    // Palette lines go to stdout
    for line in palette_lines(&palette) {
        println!("{}", line);
    }

    Ok(())
}

/// Quantize the visible colours of an image, weighted by pixel count.
/// Fully transparent pixels are ignored.
pub fn extract(source: &PixelBuffer, colours: usize, options: &QuantizeOptions) -> Palette {
    quantize_weighted(&source.visible_colour_histogram(), colours, options)
}

/// `$colour-N: #RRGGBB`, numbered from 1.
pub fn palette_lines(palette: &Palette) -> Vec<String> {
    palette
        .iter()
        .enumerate()
        .map(|(i, colour)| format!("$colour-{}: {}", i + 1, colour))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;

    #[test]
    fn test_extract_skips_transparent() {
        let mut buf = PixelBuffer::new(3, 1);
        buf.set_pixel(0, 0, [255, 0, 0, 255]);
        buf.set_pixel(1, 0, [0, 0, 255, 255]);

        let palette = extract(&buf, 4, &QuantizeOptions::default());
        assert_eq!(
            palette.colours(),
            &[Colour::rgb(255, 0, 0), Colour::rgb(0, 0, 255)]
        );
    }

    #[test]
    fn test_extract_reduces_to_k() {
        let mut buf = PixelBuffer::new(3, 1);
        buf.set_pixel(0, 0, [255, 0, 0, 255]);
        buf.set_pixel(1, 0, [250, 0, 0, 255]);
        buf.set_pixel(2, 0, [0, 0, 255, 255]);

        let options = QuantizeOptions {
            reseed: Reseed::Farthest,
            ..Default::default()
        };
        assert_eq!(extract(&buf, 2, &options).len(), 2);
    }

    #[test]
    fn test_palette_lines() {
        let palette = Palette::new(vec![Colour::BLACK, Colour::rgb(255, 128, 0)]);
        assert_eq!(
            palette_lines(&palette),
            vec!["$colour-1: #000000", "$colour-2: #FF8000"]
        );
    }
}
