//! Convert command implementation.
//!
//! Renders each input image and writes one file per requested format.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::Settings;
use crate::error::{PixelateError, Result};
use crate::export::{export, ExportFormat};
use crate::output::{display_path, plural, Printer};
use crate::render::{render, RenderParams, Resample, Reseed};
use crate::types::{BuiltinPresets, Colour, Palette, PixelBuffer};

/// Render options shared by `convert` and `batch`.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Built-in style preset (see `pixelate presets`)
    #[arg(long, short)]
    pub preset: Option<String>,

    /// Block size in output pixels
    #[arg(long, short = 's')]
    pub pixel_size: Option<u32>,

    /// Maximum number of palette colours
    #[arg(long, short = 'c')]
    pub colours: Option<usize>,

    /// Output canvas width
    #[arg(long)]
    pub width: Option<u32>,

    /// Output canvas height
    #[arg(long)]
    pub height: Option<u32>,

    /// Brightness adjustment (-100..=100)
    #[arg(long, allow_negative_numbers = true)]
    pub brightness: Option<i32>,

    /// Contrast adjustment (-100..=100)
    #[arg(long, allow_negative_numbers = true)]
    pub contrast: Option<i32>,

    /// Saturation adjustment (-100..=100)
    #[arg(long, allow_negative_numbers = true)]
    pub saturation: Option<i32>,

    /// Hue rotation in degrees (-180..=180)
    #[arg(long, allow_negative_numbers = true)]
    pub hue: Option<i32>,

    /// Output format; repeat for several
    #[arg(long = "format", short = 'f', value_enum)]
    pub formats: Vec<ExportFormat>,

    /// Fixed palette as comma-separated hex colours
    #[arg(long)]
    pub palette: Option<String>,

    /// k-means iterations
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Seed for empty-cluster reseeding
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reseed empty clusters from the farthest colour instead of at random
    #[arg(long)]
    pub deterministic: bool,

    /// Resampling filter used when scaling the source
    #[arg(long, value_enum)]
    pub resample: Option<Resample>,

    /// Settings file (defaults to ./pixelate.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Fully resolved render settings for one invocation.
#[derive(Debug, Clone)]
pub struct Job {
    pub params: RenderParams,
    pub formats: Vec<ExportFormat>,
    pub output: PathBuf,
    pub settings: Settings,
}

impl RenderArgs {
    /// Resolve against the settings file in the working directory.
    pub fn resolve(&self) -> Result<Job> {
        let cwd = std::env::current_dir()?;
        self.resolve_in(&cwd)
    }

    /// Layer defaults, settings and flags into a [`Job`].
    ///
    /// Order, lowest first: built-in defaults, the settings file's preset,
    /// the settings file, the `--preset` flag, the remaining flags.
    pub fn resolve_in(&self, dir: &Path) -> Result<Job> {
        let settings = Settings::discover(self.config.as_deref(), dir)?.unwrap_or_default();
        let mut params = RenderParams::default();

        if let Some(name) = &settings.preset {
            params.apply_preset(BuiltinPresets::lookup(name)?);
        }
        apply_settings(&mut params, &settings)?;

        if let Some(name) = &self.preset {
            params.apply_preset(BuiltinPresets::lookup(name)?);
        }
        self.apply_flags(&mut params)?;

        let mut formats = Vec::new();
        let requested = if self.formats.is_empty() {
            settings.effective_formats()
        } else {
            self.formats.clone()
        };
        for format in requested {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }

        let output = self
            .output
            .clone()
            .or_else(|| settings.output.clone())
            .unwrap_or_else(|| PathBuf::from("dist"));

        params.validate()?;
        Ok(Job {
            params,
            formats,
            output,
            settings,
        })
    }

    fn apply_flags(&self, params: &mut RenderParams) -> Result<()> {
        set(&mut params.output_width, self.width);
        set(&mut params.output_height, self.height);
        set(&mut params.pixel_size, self.pixel_size);
        set(&mut params.colour_count, self.colours);
        set(&mut params.adjustment.brightness, self.brightness);
        set(&mut params.adjustment.contrast, self.contrast);
        set(&mut params.adjustment.saturation, self.saturation);
        set(&mut params.adjustment.hue, self.hue);
        set(&mut params.quantize.iterations, self.iterations);
        set(&mut params.resample, self.resample);
        if self.seed.is_some() {
            params.quantize.seed = self.seed;
        }
        if self.deterministic {
            params.quantize.reseed = Reseed::Farthest;
        }
        if let Some(list) = &self.palette {
            params.palette = Some(Palette::from_hex_list(list)?);
        }
        Ok(())
    }
}

fn apply_settings(params: &mut RenderParams, settings: &Settings) -> Result<()> {
    set(&mut params.output_width, settings.width);
    set(&mut params.output_height, settings.height);
    set(&mut params.pixel_size, settings.pixel_size);
    set(&mut params.colour_count, settings.colours);
    set(&mut params.adjustment.brightness, settings.brightness);
    set(&mut params.adjustment.contrast, settings.contrast);
    set(&mut params.adjustment.saturation, settings.saturation);
    set(&mut params.adjustment.hue, settings.hue);
    set(&mut params.quantize.iterations, settings.iterations);
    set(&mut params.quantize.reseed, settings.reseed);
    set(&mut params.resample, settings.resample);
    if settings.seed.is_some() {
        params.quantize.seed = settings.seed;
    }
    if !settings.palette.is_empty() {
        let colours = settings
            .palette
            .iter()
            .map(|hex| Colour::from_hex(hex))
            .collect::<Result<Vec<_>>>()?;
        params.palette = Some(Palette::new(colours));
    }
    Ok(())
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Convert images to pixel art
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Images to convert
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub render: RenderArgs,
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let job = args.render.resolve()?;

    let mut written = 0;
    for file in &args.files {
        let outputs = convert_file(file, &job, &job.output)?;
        printer.status(
            "Converted",
            &format!(
                "{} {}",
                display_path(file),
                printer.dim(&format!("-> {}", describe(&outputs)))
            ),
        );
        written += outputs.len();
    }

    printer.info(
        "Finished",
        &format!(
            "{} to {}",
            plural(written, "file", "files"),
            printer.cyan(&display_path(&job.output))
        ),
    );
    Ok(())
}

/// Decode an image file into a buffer.
pub fn load_source(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => PixelateError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image: {}", io),
        },
        other => PixelateError::Decode {
            message: format!("{}: {}", path.display(), other),
        },
    })?;
    Ok(PixelBuffer::from_image(img.to_rgba8()))
}

/// Render one image and write `<stem>.<ext>` into `out_dir` per format.
pub fn convert_file(path: &Path, job: &Job, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let source = load_source(path)?;
    tracing::debug!(
        path = %path.display(),
        width = source.width(),
        height = source.height(),
        "decoded source"
    );
    let rendered = render(&source, &job.params)?;

    fs::create_dir_all(out_dir).map_err(|e| PixelateError::Io {
        path: out_dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");

    let mut outputs = Vec::with_capacity(job.formats.len());
    for &format in &job.formats {
        let artifact = export(&rendered, job.params.pixel_size, format)?;
        let target = out_dir.join(format!("{}.{}", stem, format.extension()));
        fs::write(&target, artifact.bytes()).map_err(|e| PixelateError::Io {
            path: target.clone(),
            message: format!("Failed to write output: {}", e),
        })?;
        outputs.push(target);
    }
    Ok(outputs)
}

fn describe(outputs: &[PathBuf]) -> String {
    outputs
        .iter()
        .map(|p| display_path(p))
        .collect::<Vec<_>>()
        .join(", ")
}
