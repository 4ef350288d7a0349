//! Error types.

use std::ffi::NulError;
use std::io;
use std::path::PathBuf;

use russeract_types::{InvalidValue, PageIteratorLevel};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Engine initialization failed for language '{language}'")]
    Init { language: String },

    #[error("Failed to read image from {0:?}")]
    ImageRead(PathBuf),

    #[error("Failed to decode image from {0} bytes")]
    ImageDecode(usize),

    #[error("Image of {width}x{height} pixels is too large for the engine")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("No image has been set on the session")]
    NoImage,

    #[error("Recognition failed")]
    Recognition,

    #[error("Engine rejected variable '{name}'")]
    Variable { name: String },

    #[error("Engine returned no {0}")]
    NullResult(&'static str),

    #[error("Failed to encode thresholded image")]
    ThresholdExport,

    /// A non-empty cursor position failed to answer a query.
    #[error("Cursor fault at {level} level: no {query} for a non-empty position")]
    CursorFault {
        level: PageIteratorLevel,
        query: &'static str,
    },

    #[error("Invalid engine value: {0}")]
    InvalidValue(#[from] InvalidValue),

    #[error("String contains an interior NUL byte: {0}")]
    Nul(#[from] NulError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "tesseract")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T, E = OcrError> = std::result::Result<T, E>;
