//! Error types for the gradient engines.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for gradient construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Handle id registered twice on one slider (-1)
    DuplicateHandle = -1,
    /// Unknown handle id (-2)
    HandleNotFound = -2,
    /// Slider min not below max (-3)
    InvalidRange = -3,
    /// Slider step not positive (-4)
    InvalidStep = -4,
    /// Malformed color string (E100)
    ColorParse = 100,
    /// Texture catalog too small (E200)
    NotEnoughTextures = 200,
    /// Invalid stop layout (E201)
    InvalidStops = 201,
    /// Configuration or catalog file could not be read (E300)
    Io = 300,
    /// Configuration or catalog file is not valid JSON (E301)
    Json = 301,
}

/// Main error type for the gradient engines.
#[derive(Debug, Error)]
pub enum GradientError {
    #[error("Handle '{id}' already exists on this slider")]
    DuplicateHandle { id: String },

    #[error("Handle not found: '{id}'")]
    HandleNotFound { id: String },

    #[error("Invalid slider range: min {min} must be less than max {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("Invalid slider step: {step} (must be positive)")]
    InvalidStep { step: f64 },

    #[error("Cannot parse color '{input}': {message}")]
    ColorParse { input: String, message: String },

    #[error("Texture catalog needs at least two entries, found {count}")]
    NotEnoughTextures { count: usize },

    #[error("Invalid stops: expected 0 <= left < mid < right <= 100, one handle radius apart, got {left}/{mid}/{right}")]
    InvalidStops { left: f64, mid: f64, right: f64 },

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GradientError {
    /// Shorthand for a color parse failure.
    pub fn color_parse(input: &str, message: impl Into<String>) -> Self {
        GradientError::ColorParse {
            input: input.to_string(),
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            GradientError::DuplicateHandle { .. } => ErrorCode::DuplicateHandle,
            GradientError::HandleNotFound { .. } => ErrorCode::HandleNotFound,
            GradientError::InvalidRange { .. } => ErrorCode::InvalidRange,
            GradientError::InvalidStep { .. } => ErrorCode::InvalidStep,
            GradientError::ColorParse { .. } => ErrorCode::ColorParse,
            GradientError::NotEnoughTextures { .. } => ErrorCode::NotEnoughTextures,
            GradientError::InvalidStops { .. } => ErrorCode::InvalidStops,
            GradientError::Read { .. } => ErrorCode::Io,
            GradientError::Json(_) => ErrorCode::Json,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for gradient operations.
pub type Result<T> = std::result::Result<T, GradientError>;
