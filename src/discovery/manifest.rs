//! Settings file (pixelate.yaml) parsing.
//!
//! Every field is optional. A field left out falls through to the preset
//! (if any) and then to the built-in default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PixelateError, Result};
use crate::export::ExportFormat;
use crate::render::{Resample, Reseed};

/// Settings loaded from pixelate.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Built-in preset to start from.
    pub preset: Option<String>,

    /// Output canvas width in pixels.
    pub width: Option<u32>,

    /// Output canvas height in pixels.
    pub height: Option<u32>,

    /// Block side length.
    pub pixel_size: Option<u32>,

    /// Palette size.
    pub colours: Option<usize>,

    pub brightness: Option<i32>,
    pub contrast: Option<i32>,
    pub saturation: Option<i32>,
    pub hue: Option<i32>,

    /// Fixed palette as hex strings; disables clustering.
    pub palette: Vec<String>,

    /// k-means rounds.
    pub iterations: Option<usize>,

    /// RNG seed for empty-cluster reseeding.
    pub seed: Option<u64>,

    pub reseed: Option<Reseed>,
    pub resample: Option<Resample>,

    /// Formats to write; empty means PNG only.
    pub formats: Vec<ExportFormat>,

    /// Output directory.
    pub output: Option<PathBuf>,

    /// Patterns to skip during batch discovery.
    pub excludes: Vec<String>,
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PixelateError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PixelateError::Parse {
            message: format!("Invalid settings: {}", e),
            help: Some("Check pixelate.yaml syntax".to_string()),
        })
    }

    /// Load `path` if given, else `pixelate.yaml` in `dir` when it exists.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Option<Self>> {
        match path {
            Some(path) => Self::load(path).map(Some),
            None => {
                let default = dir.join(super::SETTINGS_FILENAME);
                if default.is_file() {
                    tracing::debug!(path = %default.display(), "using settings file");
                    Self::load(&default).map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Formats to write, defaulting to PNG.
    pub fn effective_formats(&self) -> Vec<ExportFormat> {
        if self.formats.is_empty() {
            vec![ExportFormat::Png]
        } else {
            self.formats.clone()
        }
    }
}

/// Minimal glob matching: `*.ext`, `dir/*`, `**/dir/*`, or a plain substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(rest) = pattern.strip_prefix("**/") {
        if let Some(dir) = rest.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }
        return path.ends_with(rest) || path.contains(&format!("/{}", rest));
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !suffix.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(dir) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
    }

    path.contains(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_settings() {
        let settings = Settings::parse("pixel_size: 6").unwrap();

        assert_eq!(settings.pixel_size, Some(6));
        assert!(settings.preset.is_none());
        assert!(settings.palette.is_empty());
    }

    #[test]
    fn test_parse_full_settings() {
        let yaml = r##"
preset: retro
width: 320
height: 200
pixel_size: 4
colours: 12
brightness: -5
contrast: 10
saturation: 20
hue: 90
palette: ["#000000", "#ffffff"]
iterations: 20
seed: 7
reseed: farthest
resample: lanczos
formats: [png, svg, json]
output: build/art
excludes:
  - "*.bak"
  - "**/thumbs/*"
"##;
        let settings = Settings::parse(yaml).unwrap();

        assert_eq!(settings.preset.as_deref(), Some("retro"));
        assert_eq!((settings.width, settings.height), (Some(320), Some(200)));
        assert_eq!(settings.colours, Some(12));
        assert_eq!(settings.brightness, Some(-5));
        assert_eq!(settings.hue, Some(90));
        assert_eq!(settings.palette, vec!["#000000", "#ffffff"]);
        assert_eq!(settings.iterations, Some(20));
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.reseed, Some(Reseed::Farthest));
        assert_eq!(settings.resample, Some(Resample::Lanczos));
        assert_eq!(
            settings.formats,
            vec![ExportFormat::Png, ExportFormat::Svg, ExportFormat::Json]
        );
        assert_eq!(settings.output, Some(PathBuf::from("build/art")));
        assert_eq!(settings.excludes.len(), 2);
    }

    #[test]
    fn test_parse_empty_settings() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
        assert_eq!(Settings::parse("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = Settings::parse("pixel_sise: 4").unwrap_err();
        assert!(matches!(err, PixelateError::Parse { .. }));
    }

    #[test]
    fn test_effective_formats() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_formats(), vec![ExportFormat::Png]);

        settings.formats = vec![ExportFormat::Svg];
        assert_eq!(settings.effective_formats(), vec![ExportFormat::Svg]);
    }

    #[test]
    fn test_is_excluded() {
        let settings = Settings {
            excludes: vec![
                "*.bak".to_string(),
                "**/thumbs/*".to_string(),
                "raw".to_string(),
            ],
            ..Default::default()
        };

        assert!(settings.is_excluded(Path::new("photo.bak")));
        assert!(settings.is_excluded(Path::new("thumbs/a.png")));
        assert!(settings.is_excluded(Path::new("album/thumbs/a.png")));
        assert!(settings.is_excluded(Path::new("album/raw/a.png")));
        assert!(!settings.is_excluded(Path::new("album/a.png")));
    }

    #[test]
    fn test_discover_default_file() {
        let dir = tempdir().unwrap();
        assert!(Settings::discover(None, dir.path()).unwrap().is_none());

        fs::write(dir.path().join("pixelate.yaml"), "colours: 8\n").unwrap();
        let settings = Settings::discover(None, dir.path()).unwrap().unwrap();
        assert_eq!(settings.colours, Some(8));
    }

    #[test]
    fn test_discover_explicit_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            Settings::discover(Some(&missing), dir.path()),
            Err(PixelateError::Io { .. })
        ));
    }
}
