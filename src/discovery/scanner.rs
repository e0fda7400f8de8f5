//! File system scanner for batch inputs.
//!
//! Recursively scans directories for decodable image files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Settings;

/// Extensions the batch command picks up, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Result of scanning for images.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered image files, sorted by path.
    pub images: Vec<PathBuf>,
    /// Files skipped by an exclude pattern.
    pub excluded: usize,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.images.extend(other.images);
        self.excluded += other.excluded;
    }
}

/// Scan a directory for image files.
///
/// A missing root yields an empty result.
pub fn scan_directory(root: &Path, settings: &Settings) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !is_image(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if settings.is_excluded(relative) {
            result.excluded += 1;
            continue;
        }

        result.images.push(path.to_path_buf());
    }

    tracing::debug!(
        root = %root.display(),
        found = result.images.len(),
        excluded = result.excluded,
        "scanned for images"
    );
    result
}

/// Check a path's extension against [`IMAGE_EXTENSIONS`].
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("cat.png")));
        assert!(is_image(Path::new("cat.JPG")));
        assert!(is_image(Path::new("dir/cat.jpeg")));
        assert!(is_image(Path::new("cat.webp")));
        assert!(is_image(Path::new("cat.gif")));
        assert!(!is_image(Path::new("cat.svg")));
        assert!(!is_image(Path::new("cat")));
        assert!(!is_image(Path::new("notes.md")));
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        fs::write(dir.path().join("readme.txt"), b"").unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.webp"), b"").unwrap();

        let result = scan_directory(dir.path(), &Settings::default());

        assert_eq!(result.total(), 3);
        let names: Vec<_> = result
            .images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "c.webp"]);
    }

    #[test]
    fn test_scan_with_excludes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep.png"), b"").unwrap();
        fs::create_dir_all(dir.path().join("thumbs")).unwrap();
        fs::write(dir.path().join("thumbs/skip.png"), b"").unwrap();

        let settings = Settings {
            excludes: vec!["**/thumbs/*".to_string()],
            ..Default::default()
        };
        let result = scan_directory(dir.path(), &settings);

        assert_eq!(result.total(), 1);
        assert_eq!(result.excluded, 1);
        assert!(result.images[0].ends_with("keep.png"));
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempdir().unwrap();
        let result = scan_directory(&dir.path().join("missing"), &Settings::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut a = ScanResult {
            images: vec![PathBuf::from("a.png")],
            excluded: 1,
        };
        a.merge(ScanResult {
            images: vec![PathBuf::from("b.png")],
            excluded: 2,
        });
        assert_eq!(a.total(), 2);
        assert_eq!(a.excluded, 3);
    }
}
