//! Settings and input discovery for the pixelate CLI.
//!
//! This module loads the optional `pixelate.yaml` settings file and finds
//! image files for batch conversion.
//!
//! # Example
//!
//! ```ignore
//! use pixelate::discovery::{discover, Settings};
//!
//! let settings = Settings::discover(None, Path::new("."))?.unwrap_or_default();
//! let scan = discover("./photos", &settings)?;
//! println!("Found {} images", scan.total());
//! ```

mod manifest;
mod scanner;

use std::path::Path;

use crate::error::{PixelateError, Result};

pub use manifest::Settings;
pub use scanner::{is_image, scan_directory, ScanResult, IMAGE_EXTENSIONS};

/// The name of the settings file looked up in the working directory.
pub const SETTINGS_FILENAME: &str = "pixelate.yaml";

/// Find every image under `root`, honouring the settings' excludes.
///
/// Unlike [`scan_directory`], a root that is not a directory is an error.
pub fn discover(root: impl AsRef<Path>, settings: &Settings) -> Result<ScanResult> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(PixelateError::Io {
            path: root.to_path_buf(),
            message: "Not a directory".to_string(),
        });
    }
    Ok(scan_directory(root, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempdir().unwrap();

        let result = discover(dir.path(), &Settings::default()).unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_discover_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("photo.png");
        fs::write(&file, b"").unwrap();

        assert!(matches!(
            discover(&file, &Settings::default()),
            Err(PixelateError::Io { .. })
        ));
    }

    #[test]
    fn test_discover_with_settings_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILENAME),
            "excludes:\n  - \"*.gif\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();
        fs::write(dir.path().join("b.gif"), b"").unwrap();

        let settings = Settings::discover(None, dir.path()).unwrap().unwrap();
        let result = discover(dir.path(), &settings).unwrap();

        assert_eq!(result.total(), 1);
        assert_eq!(result.excluded, 1);
    }
}
