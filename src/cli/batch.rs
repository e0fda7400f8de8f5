//! Batch command implementation.
//!
//! Converts every image under a directory. Each image is independent: a
//! failure is reported and the rest still run.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::discover;
use crate::error::{PixelateError, Result};
use crate::output::{display_path, plural, Printer};

use super::convert::{convert_file, Job, RenderArgs};

/// Convert every image in a directory tree
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory to scan for png, jpg, gif and webp files
    #[arg(required = true)]
    pub dir: PathBuf,

    #[command(flatten)]
    pub render: RenderArgs,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, PixelateError)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

pub fn run(args: BatchArgs, printer: &Printer) -> Result<()> {
    let job = args.render.resolve()?;
    let report = convert_tree(&args.dir, &job, printer)?;

    if report.total() == 0 {
        printer.warning(
            "Skipping",
            &format!("no images found in {}", display_path(&args.dir)),
        );
        return Ok(());
    }

    printer.info(
        "Finished",
        &format!(
            "{} to {}",
            plural(report.converted.len(), "image", "images"),
            printer.cyan(&display_path(&job.output))
        ),
    );

    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(PixelateError::BatchFailed {
            failed: report.failed.len(),
            total: report.total(),
        })
    }
}

/// Convert every discovered image, mirroring subdirectories under the
/// job's output directory.
///
/// Images already inside the output directory are skipped, so an output
/// nested under `root` is never fed back in.
pub fn convert_tree(root: &Path, job: &Job, printer: &Printer) -> Result<BatchReport> {
    let scan = discover(root, &job.settings)?;
    let output = job.output.canonicalize().ok();
    let mut report = BatchReport::default();

    for path in scan.images {
        if is_within(&path, output.as_deref()) {
            tracing::debug!(path = %path.display(), "skipping previous output");
            continue;
        }

        let relative = path
            .parent()
            .and_then(|parent| parent.strip_prefix(root).ok())
            .unwrap_or_else(|| Path::new(""));
        let out_dir = job.output.join(relative);

        match convert_file(&path, job, &out_dir) {
            Ok(_) => {
                printer.status("Converted", &display_path(&path));
                report.converted.push(path);
            }
            Err(e) => {
                printer.error("Failed", &format!("{}: {}", display_path(&path), e));
                report.failed.push((path, e));
            }
        }
    }

    Ok(report)
}

/// True when `path` resolves to somewhere under `dir`.
fn is_within(path: &Path, dir: Option<&Path>) -> bool {
    let Some(dir) = dir else {
        return false;
    };
    path.canonicalize()
        .map(|resolved| resolved.starts_with(dir))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_png(path: &Path, rgba: [u8; 4]) {
        image::RgbaImage::from_pixel(4, 4, image::Rgba(rgba))
            .save(path)
            .unwrap();
    }

    fn job(output: PathBuf) -> Job {
        let dir = tempdir().unwrap();
        let args = RenderArgs {
            width: Some(4),
            height: Some(4),
            pixel_size: Some(2),
            output: Some(output),
            ..Default::default()
        };
        args.resolve_in(dir.path()).unwrap()
    }

    #[test]
    fn test_convert_tree_mirrors_directories() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::create_dir_all(src.path().join("sub")).unwrap();
        write_png(&src.path().join("a.png"), [255, 0, 0, 255]);
        write_png(&src.path().join("sub/b.png"), [0, 0, 255, 255]);

        let report = convert_tree(src.path(), &job(out.path().to_path_buf()), &Printer::plain())
            .unwrap();

        assert_eq!(report.converted.len(), 2);
        assert!(report.failed.is_empty());
        assert!(out.path().join("a.png").is_file());
        assert!(out.path().join("sub/b.png").is_file());
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_png(&src.path().join("good.png"), [0, 255, 0, 255]);
        fs::write(src.path().join("bad.png"), b"garbage").unwrap();

        let report = convert_tree(src.path(), &job(out.path().to_path_buf()), &Printer::plain())
            .unwrap();

        assert_eq!(report.converted.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("bad.png"));
        assert!(matches!(report.failed[0].1, PixelateError::Decode { .. }));
        assert!(out.path().join("good.png").is_file());
    }

    #[test]
    fn test_output_inside_root_is_not_rescanned() {
        let src = tempdir().unwrap();
        write_png(&src.path().join("a.png"), [255, 0, 0, 255]);
        let job = job(src.path().join("dist"));

        let first = convert_tree(src.path(), &job, &Printer::plain()).unwrap();
        let second = convert_tree(src.path(), &job, &Printer::plain()).unwrap();

        assert_eq!(first.converted.len(), 1);
        assert_eq!(second.converted.len(), first.converted.len());
        assert!(src.path().join("dist/a.png").is_file());
        assert!(!src.path().join("dist/dist").exists());
    }

    #[test]
    fn test_missing_root() {
        let out = tempdir().unwrap();
        let result = convert_tree(
            &out.path().join("nowhere"),
            &job(out.path().to_path_buf()),
            &Printer::plain(),
        );
        assert!(matches!(result, Err(PixelateError::Io { .. })));
    }
}
