//! Native Tesseract engine.
//!
//! Thin wrappers over the Tesseract C API and leptonica. Every engine call
//! goes through a [`Session`]; iteration goes through [`EngineCursor`],
//! which implements [`ResultCursor`](crate::ResultCursor).

mod cursor;
mod pix;
mod session;

use std::ffi::CStr;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{OcrError, Result};

pub use cursor::EngineCursor;
pub use session::Session;

/// Version string of the linked libtesseract.
pub fn version() -> String {
    let raw = unsafe { tesseract_sys::TessVersion() };
    if raw.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned()
}

/// Languages with models in the default data path.
pub fn available_languages() -> Result<Vec<String>> {
    let session = Session::new()?;
    let raw = unsafe { tesseract_sys::TessBaseAPIGetAvailableLanguagesAsVector(session.handle()) };
    if raw.is_null() {
        return Err(OcrError::NullResult("language list"));
    }

    let mut languages = Vec::new();
    let mut index = 0;
    loop {
        let entry = unsafe { *raw.add(index) };
        if entry.is_null() {
            break;
        }
        languages.push(unsafe { CStr::from_ptr(entry) }.to_string_lossy().into_owned());
        index += 1;
    }
    unsafe { tesseract_sys::TessDeleteTextArray(raw) };

    debug!(count = languages.len(), "Listed available languages");
    Ok(languages)
}

/// Where the engine looks for models when no data path is configured.
pub fn default_data_path() -> Result<PathBuf> {
    Session::new()?
        .data_path()
        .ok_or(OcrError::NullResult("data path"))
}
