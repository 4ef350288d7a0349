//! Owned leptonica images.

use std::ffi::CString;
use std::ptr::{self, NonNull};
use std::slice;

use tracing::trace;

use crate::error::{OcrError, Result};

/// A leptonica `Pix` we hold a reference to. Dropping it releases the
/// reference; the engine keeps its own while it uses the image.
pub(crate) struct Pix {
    raw: NonNull<leptonica_sys::Pix>,
}

// Leptonica reference counts are only touched through `&mut`/Drop.
unsafe impl Send for Pix {}

impl Pix {
    pub(crate) fn from_raw(raw: *mut leptonica_sys::Pix) -> Option<Self> {
        NonNull::new(raw).map(|raw| Self { raw })
    }

    pub(crate) fn read(path: &CString) -> Option<Self> {
        Self::from_raw(unsafe { leptonica_sys::pixRead(path.as_ptr()) })
    }

    pub(crate) fn read_mem(data: &[u8]) -> Option<Self> {
        Self::from_raw(unsafe { leptonica_sys::pixReadMem(data.as_ptr(), data.len() as _) })
    }

    pub(crate) fn as_ptr(&self) -> *mut leptonica_sys::Pix {
        self.raw.as_ptr()
    }

    /// Encode in the format leptonica picks for this image's depth.
    pub(crate) fn encode(&self) -> Result<Vec<u8>> {
        let format = unsafe { leptonica_sys::pixChooseOutputFormat(self.as_ptr()) };
        let mut data: *mut u8 = ptr::null_mut();
        let mut size = 0;
        let rc = unsafe { leptonica_sys::pixWriteMem(&mut data, &mut size, self.as_ptr(), format) };

        if data.is_null() {
            return Err(OcrError::ThresholdExport);
        }
        let bytes = if rc == 0 {
            Some(unsafe { slice::from_raw_parts(data, size as usize) }.to_vec())
        } else {
            None
        };
        unsafe { leptonica_sys::lept_free(data.cast()) };

        let bytes = bytes.ok_or(OcrError::ThresholdExport)?;
        trace!(format, size = bytes.len(), "Encoded image");
        Ok(bytes)
    }
}

impl Drop for Pix {
    fn drop(&mut self) {
        let mut raw = self.raw.as_ptr();
        unsafe { leptonica_sys::pixDestroy(&mut raw) };
    }
}
