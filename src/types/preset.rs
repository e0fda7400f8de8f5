//! Built-in style presets.
//!
//! A preset fixes block size, colour count and adjustments; output size and
//! quantizer options are left to the caller.

use crate::error::{PixelateError, Result};

use super::AdjustmentParams;

/// A named set of render parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub pixel_size: u32,
    pub colour_count: usize,
    pub adjustment: AdjustmentParams,
}

const fn adjust(brightness: i32, contrast: i32, saturation: i32) -> AdjustmentParams {
    AdjustmentParams {
        brightness,
        contrast,
        saturation,
        hue: 0,
    }
}

static PRESETS: [Preset; 5] = [
    Preset {
        name: "8bit",
        description: "Classic 8-bit console look",
        pixel_size: 8,
        colour_count: 16,
        adjustment: adjust(0, 20, 30),
    },
    Preset {
        name: "16bit",
        description: "16-bit era sprite art",
        pixel_size: 4,
        colour_count: 64,
        adjustment: adjust(0, 10, 20),
    },
    Preset {
        name: "low-poly",
        description: "Chunky geometric blocks",
        pixel_size: 12,
        colour_count: 8,
        adjustment: adjust(-10, 30, 10),
    },
    Preset {
        name: "retro",
        description: "Faded retro palette",
        pixel_size: 6,
        colour_count: 32,
        adjustment: adjust(-15, 25, 40),
    },
    Preset {
        name: "minimal",
        description: "Few colours, muted tones",
        pixel_size: 10,
        colour_count: 4,
        adjustment: adjust(10, 15, -20),
    },
];

/// Built-in presets.
pub struct BuiltinPresets;

impl BuiltinPresets {
    pub fn all() -> &'static [Preset] {
        &PRESETS
    }

    /// Look up a preset by name, ignoring case and `-`/`_` separators.
    pub fn get(name: &str) -> Option<&'static Preset> {
        let wanted = normalize(name);
        PRESETS.iter().find(|p| normalize(p.name) == wanted)
    }

    /// Like [`BuiltinPresets::get`], but unknown names are an error.
    pub fn lookup(name: &str) -> Result<&'static Preset> {
        Self::get(name).ok_or_else(|| PixelateError::Parse {
            message: format!("Unknown preset: {}", name),
            help: Some(format!(
                "Available presets: {}",
                PRESETS.iter().map(|p| p.name).collect::<Vec<_>>().join(", ")
            )),
        })
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in BuiltinPresets::all() {
            assert!(preset.pixel_size >= 1, "{}", preset.name);
            assert!(preset.colour_count >= 2, "{}", preset.name);
            preset.adjustment.validate().unwrap();
        }
    }

    #[test]
    fn test_lookup_is_forgiving() {
        assert_eq!(BuiltinPresets::get("8bit").unwrap().pixel_size, 8);
        assert_eq!(BuiltinPresets::get("lowPoly").unwrap().name, "low-poly");
        assert_eq!(BuiltinPresets::get("LOW_POLY").unwrap().colour_count, 8);
        assert!(BuiltinPresets::get("vaporwave").is_none());
    }

    #[test]
    fn test_lookup_unknown_lists_presets() {
        match BuiltinPresets::lookup("nope").unwrap_err() {
            PixelateError::Parse { help, .. } => {
                assert!(help.unwrap().contains("retro"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
