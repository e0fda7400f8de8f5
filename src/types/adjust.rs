//! Per-colour adjustments: brightness, contrast, saturation and hue.
//!
//! Each transform is a pure `Colour -> Colour` function whose channels are
//! rounded to the nearest integer and clamped to `[0, 255]`. Active
//! adjustments always run in the order brightness, contrast, saturation,
//! hue; each one sees the clamped output of the previous one.

use palette::{Hsl, IntoColor, ShiftHue, Srgb};
use serde::{Deserialize, Serialize};

use crate::error::{PixelateError, Result};

use super::Colour;

/// Valid range for brightness, contrast and saturation.
pub const PERCENT_RANGE: std::ops::RangeInclusive<i32> = -100..=100;

/// Valid range for hue rotation, in degrees.
pub const HUE_RANGE: std::ops::RangeInclusive<i32> = -180..=180;

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn map_channels(colour: Colour, f: impl Fn(f64) -> f64) -> Colour {
    Colour::rgb(
        channel(f(colour.r as f64)),
        channel(f(colour.g as f64)),
        channel(f(colour.b as f64)),
    )
}

/// Scale every channel by `1 + amount/100`.
pub fn brightness(colour: Colour, amount: i32) -> Colour {
    let factor = 1.0 + amount as f64 / 100.0;
    map_channels(colour, |c| c * factor)
}

/// Stretch channels away from (or towards) mid-grey.
pub fn contrast(colour: Colour, amount: i32) -> Colour {
    // 259 would divide by zero.
    let amount = amount.clamp(-255, 254) as f64;
    let factor = (259.0 * (amount + 255.0)) / (255.0 * (259.0 - amount));
    map_channels(colour, |c| factor * (c - 128.0) + 128.0)
}

/// Push channels away from (or towards) the colour's luma.
pub fn saturation(colour: Colour, amount: i32) -> Colour {
    let luma = 0.299 * colour.r as f64 + 0.587 * colour.g as f64 + 0.114 * colour.b as f64;
    let factor = 1.0 + amount as f64 / 100.0;
    map_channels(colour, |c| luma + factor * (c - luma))
}

/// Rotate the hue by `degrees` in HSL space.
pub fn hue(colour: Colour, degrees: i32) -> Colour {
    let rgb: Srgb<f32> = Srgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
    );
    let hsl: Hsl = rgb.into_color();
    let rgb_out: Srgb<f32> = hsl.shift_hue(degrees as f32).into_color();
    Colour::rgb(
        channel(rgb_out.red as f64 * 255.0),
        channel(rgb_out.green as f64 * 255.0),
        channel(rgb_out.blue as f64 * 255.0),
    )
}

/// A single active adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Brightness(i32),
    Contrast(i32),
    Saturation(i32),
    Hue(i32),
}

impl Adjustment {
    pub fn apply(self, colour: Colour) -> Colour {
        match self {
            Adjustment::Brightness(v) => brightness(colour, v),
            Adjustment::Contrast(v) => contrast(colour, v),
            Adjustment::Saturation(v) => saturation(colour, v),
            Adjustment::Hue(v) => hue(colour, v),
        }
    }
}

/// User-facing adjustment amounts. Zero means "leave alone".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentParams {
    /// -100..=100
    pub brightness: i32,
    /// -100..=100
    pub contrast: i32,
    /// -100..=100
    pub saturation: i32,
    /// Degrees, -180..=180
    pub hue: i32,
}

impl AdjustmentParams {
    pub const NONE: Self = Self {
        brightness: 0,
        contrast: 0,
        saturation: 0,
        hue: 0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::NONE
    }

    /// Reject amounts outside their documented ranges.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("brightness", self.brightness, &PERCENT_RANGE),
            ("contrast", self.contrast, &PERCENT_RANGE),
            ("saturation", self.saturation, &PERCENT_RANGE),
            ("hue", self.hue, &HUE_RANGE),
        ];
        for (name, value, range) in checks {
            if !range.contains(&value) {
                return Err(PixelateError::invalid(
                    name,
                    format!("{} is outside {}..={}", value, range.start(), range.end()),
                    "Adjustments are signed amounts; 0 disables the adjustment",
                ));
            }
        }
        Ok(())
    }

    /// Active adjustments in application order.
    pub fn pipeline(&self) -> Vec<Adjustment> {
        let steps: [(i32, fn(i32) -> Adjustment); 4] = [
            (self.brightness, Adjustment::Brightness),
            (self.contrast, Adjustment::Contrast),
            (self.saturation, Adjustment::Saturation),
            (self.hue, Adjustment::Hue),
        ];
        steps
            .into_iter()
            .filter(|(amount, _)| *amount != 0)
            .map(|(amount, make)| make(amount))
            .collect()
    }

    /// Run a colour through every active adjustment.
    pub fn apply(&self, colour: Colour) -> Colour {
        apply_all(&self.pipeline(), colour)
    }
}

/// Fold a colour through an ordered adjustment list.
pub fn apply_all(adjustments: &[Adjustment], colour: Colour) -> Colour {
    adjustments.iter().fold(colour, |c, adj| adj.apply(c))
}
