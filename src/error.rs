use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pixelate operations
#[derive(Error, Diagnostic, Debug)]
pub enum PixelateError {
    #[error("Invalid parameter `{name}`: {message}")]
    #[diagnostic(code(pixelate::invalid_parameter))]
    InvalidParameter {
        name: &'static str,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Source image is empty ({width}x{height})")]
    #[diagnostic(
        code(pixelate::empty_source),
        help("The source image must be at least 1x1 pixels")
    )]
    EmptySource { width: u32, height: u32 },

    #[error("Decode error: {message}")]
    #[diagnostic(code(pixelate::decode))]
    Decode { message: String },

    #[error("Encode error: {message}")]
    #[diagnostic(code(pixelate::encode))]
    Encode { message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pixelate::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{failed} of {total} images failed to convert")]
    #[diagnostic(
        code(pixelate::batch_failed),
        help("The remaining images were written; see the errors above")
    )]
    BatchFailed { failed: usize, total: usize },

    #[error("IO error: {0}")]
    #[diagnostic(code(pixelate::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pixelate::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },
}

impl PixelateError {
    /// Shorthand for an [`PixelateError::InvalidParameter`] with a help line.
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>, help: &str) -> Self {
        PixelateError::InvalidParameter {
            name,
            message: message.into(),
            help: Some(help.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PixelateError>;
