//! Engine session.

use std::ffi::{CStr, CString};
use std::path::{Path, PathBuf};
use std::ptr::{self, NonNull};

use image::DynamicImage;
use libc::{c_char, c_int};
use russeract_types::{PageIteratorLevel, PageRecord, PageSegMode};
use tesseract_sys::{TessBaseAPI, TessOcrEngineMode, TessPageSegMode};
use tracing::{debug, trace};

use super::cursor::EngineCursor;
use super::pix::Pix;
use crate::config::SessionConfig;
use crate::cursor::CursorSource;
use crate::error::{OcrError, Result};
use crate::replay;
use crate::results::{self, Results};

/// Copy an engine-allocated string and hand it back to the engine.
pub(crate) unsafe fn take_text(raw: *mut c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    let text = CStr::from_ptr(raw).to_string_lossy().into_owned();
    tesseract_sys::TessDeleteText(raw);
    Some(text)
}

/// Copy a string the engine keeps ownership of.
unsafe fn copy_text(raw: *const c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    Some(CStr::from_ptr(raw).to_string_lossy().into_owned())
}

#[cfg(unix)]
fn path_to_cstring(path: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;
    Ok(CString::new(path.as_os_str().as_bytes())?)
}

#[cfg(not(unix))]
fn path_to_cstring(path: &Path) -> Result<CString> {
    Ok(CString::new(path.to_string_lossy().as_bytes())?)
}

/// An initialized Tesseract engine.
///
/// Methods that recognize or change the image take `&mut self`, so a live
/// [`EngineCursor`] or [`Results`] keeps the session frozen until it is
/// dropped. The engine handle is ended and deleted when the session drops.
pub struct Session {
    handle: NonNull<TessBaseAPI>,
    pix: Option<Pix>,
    has_image: bool,
}

// The handle is only reachable through this value and is never shared.
unsafe impl Send for Session {}

impl Session {
    /// English, default engine mode, compiled-in data path.
    pub fn new() -> Result<Self> {
        Self::with_config(&SessionConfig::default())
    }

    pub fn with_config(config: &SessionConfig) -> Result<Self> {
        let raw = unsafe { tesseract_sys::TessBaseAPICreate() };
        let handle = NonNull::new(raw).ok_or(OcrError::NullResult("engine handle"))?;
        let mut session = Session {
            handle,
            pix: None,
            has_image: false,
        };

        let datapath = config
            .datapath
            .as_deref()
            .map(path_to_cstring)
            .transpose()?;
        let language = CString::new(config.language.as_str())?;
        let configs = config
            .config_files
            .iter()
            .map(|path| path_to_cstring(path))
            .collect::<Result<Vec<_>>>()?;
        let mut names = Vec::with_capacity(config.variables.len());
        let mut values = Vec::with_capacity(config.variables.len());
        for (name, value) in &config.variables {
            names.push(CString::new(name.as_str())?);
            values.push(CString::new(value.as_str())?);
        }

        let mut config_ptrs: Vec<*mut c_char> =
            configs.iter().map(|c| c.as_ptr() as *mut c_char).collect();
        let mut name_ptrs: Vec<*mut c_char> = names.iter().map(|c| c.as_ptr() as *mut c_char).collect();
        let mut value_ptrs: Vec<*mut c_char> =
            values.iter().map(|c| c.as_ptr() as *mut c_char).collect();

        debug!(
            language = %config.language,
            datapath = ?config.datapath,
            engine_mode = ?config.engine_mode,
            "Initializing engine"
        );
        let rc = unsafe {
            tesseract_sys::TessBaseAPIInit4(
                session.handle(),
                datapath.as_ref().map_or(ptr::null(), |path| path.as_ptr()),
                language.as_ptr(),
                i32::from(config.engine_mode) as TessOcrEngineMode,
                config_ptrs.as_mut_ptr(),
                config_ptrs.len() as c_int,
                name_ptrs.as_mut_ptr(),
                value_ptrs.as_mut_ptr(),
                name_ptrs.len() as _,
                c_int::from(config.set_only_non_debug_params),
            )
        };
        if rc != 0 {
            return Err(OcrError::Init {
                language: config.language.clone(),
            });
        }

        if let Some(mode) = config.page_seg_mode {
            session.set_page_seg_mode(mode);
        }
        if let Some(ppi) = config.source_resolution {
            session.set_source_resolution(ppi);
        }
        debug!("Engine initialized");
        Ok(session)
    }

    pub(super) fn handle(&self) -> *mut TessBaseAPI {
        self.handle.as_ptr()
    }

    fn require_image(&self) -> Result<()> {
        if self.has_image {
            Ok(())
        } else {
            Err(OcrError::NoImage)
        }
    }

    pub fn set_page_seg_mode(&mut self, mode: PageSegMode) {
        trace!(?mode, "Setting page segmentation mode");
        let raw = i32::from(mode) as TessPageSegMode;
        unsafe { tesseract_sys::TessBaseAPISetPageSegMode(self.handle(), raw) }
    }

    pub fn page_seg_mode(&self) -> Result<PageSegMode> {
        let raw = unsafe { tesseract_sys::TessBaseAPIGetPageSegMode(self.handle()) };
        Ok(PageSegMode::try_from(raw as i32)?)
    }

    /// Pixels per inch of the source image, for images without metadata.
    pub fn set_source_resolution(&mut self, ppi: u32) {
        let ppi = c_int::try_from(ppi).unwrap_or(c_int::MAX);
        unsafe { tesseract_sys::TessBaseAPISetSourceResolution(self.handle(), ppi) }
    }

    /// Restrict recognition to a sub-rectangle of the image. Call after
    /// setting the image.
    pub fn set_rectangle(&mut self, left: i32, top: i32, width: i32, height: i32) {
        unsafe { tesseract_sys::TessBaseAPISetRectangle(self.handle(), left, top, width, height) }
    }

    /// Set a non-init variable.
    pub fn set_variable(&mut self, name: &str, value: &str) -> Result<()> {
        let name_c = CString::new(name)?;
        let value_c = CString::new(value)?;
        let ok = unsafe { tesseract_sys::TessBaseAPISetVariable(self.handle(), name_c.as_ptr(), value_c.as_ptr()) };
        if ok == 0 {
            return Err(OcrError::Variable {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Value of a string variable, or `None` if there is no such variable.
    pub fn variable(&self, name: &str) -> Result<Option<String>> {
        let name_c = CString::new(name)?;
        Ok(unsafe { copy_text(tesseract_sys::TessBaseAPIGetStringVariable(self.handle(), name_c.as_ptr())) })
    }

    /// Directory the engine loads its models from.
    pub fn data_path(&self) -> Option<PathBuf> {
        unsafe { copy_text(tesseract_sys::TessBaseAPIGetDatapath(self.handle())) }.map(PathBuf::from)
    }

    fn install(&mut self, pix: Pix) {
        unsafe { tesseract_sys::TessBaseAPISetImage2(self.handle(), pix.as_ptr()) };
        self.pix = Some(pix);
        self.has_image = true;
    }

    pub fn set_image_from_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!("Reading image from {:?}", path);
        let pix = Pix::read(&path_to_cstring(path)?)
            .ok_or_else(|| OcrError::ImageRead(path.to_path_buf()))?;
        self.install(pix);
        Ok(())
    }

    /// Decode an encoded image (PNG, JPEG, TIFF, ...) with leptonica.
    pub fn set_image_from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        debug!(size = bytes.len(), "Decoding image from memory");
        let pix = Pix::read_mem(bytes).ok_or(OcrError::ImageDecode(bytes.len()))?;
        self.install(pix);
        Ok(())
    }

    /// Hand an already decoded image to the engine, which copies the pixels.
    pub fn set_image(&mut self, image: &DynamicImage) -> Result<()> {
        let (width, height) = (image.width(), image.height());
        let too_large = || OcrError::ImageTooLarge { width, height };

        let color = image.color();
        let (pixels, channels): (Vec<u8>, c_int) = if color.channel_count() == 1 {
            (image.to_luma8().into_raw(), 1)
        } else if color.has_alpha() {
            (image.to_rgba8().into_raw(), 4)
        } else {
            (image.to_rgb8().into_raw(), 3)
        };
        let w = c_int::try_from(width).map_err(|_| too_large())?;
        let h = c_int::try_from(height).map_err(|_| too_large())?;
        let stride = w.checked_mul(channels).ok_or_else(too_large)?;

        debug!(width, height, channels, "Setting decoded image");
        unsafe { tesseract_sys::TessBaseAPISetImage(self.handle(), pixels.as_ptr(), w, h, channels, stride) };
        self.pix = None;
        self.has_image = true;
        Ok(())
    }

    /// Free recognition results and the image, keeping loaded models.
    pub fn clear(&mut self) {
        unsafe { tesseract_sys::TessBaseAPIClear(self.handle()) };
        self.pix = None;
        self.has_image = false;
    }

    pub fn recognize(&mut self) -> Result<()> {
        self.require_image()?;
        debug!("Running recognition");
        let rc = unsafe { tesseract_sys::TessBaseAPIRecognize(self.handle(), ptr::null_mut()) };
        if rc != 0 {
            return Err(OcrError::Recognition);
        }
        Ok(())
    }

    /// Recognize the image and position a cursor at the start of the page.
    ///
    /// `Ok(None)` when recognition found nothing to iterate.
    pub fn cursor(&mut self) -> Result<Option<EngineCursor<'_>>> {
        self.recognize()?;
        let raw = unsafe { tesseract_sys::TessBaseAPIGetIterator(self.handle()) };
        Ok(NonNull::new(raw).map(EngineCursor::new))
    }

    /// Walk the recognized page at `level`.
    pub fn iter_at(&mut self, level: PageIteratorLevel) -> Result<Results<EngineCursor<'_>>> {
        results::iter_at(self, level)
    }

    /// Capture the recognized page for later replay.
    pub fn record_page(&mut self) -> Result<PageRecord> {
        match self.cursor()? {
            Some(mut cursor) => replay::record_page(&mut cursor),
            None => Ok(PageRecord::default()),
        }
    }

    /// The binarized image the engine recognizes from, encoded in the
    /// format leptonica prefers for it.
    pub fn thresholded_image(&mut self) -> Result<Vec<u8>> {
        self.require_image()?;
        if unsafe { tesseract_sys::TessBaseAPIGetThresholdedImageScaleFactor(self.handle()) } == 0 {
            return Err(OcrError::NoImage);
        }
        let raw = unsafe { tesseract_sys::TessBaseAPIGetThresholdedImage(self.handle()) };
        let pix = Pix::from_raw(raw).ok_or(OcrError::NullResult("thresholded image"))?;
        pix.encode()
    }

    fn text_output(
        &mut self,
        what: &'static str,
        get: impl FnOnce(*mut TessBaseAPI) -> *mut c_char,
    ) -> Result<String> {
        self.require_image()?;
        trace!("Reading {}", what);
        let raw = get(self.handle());
        unsafe { take_text(raw) }.ok_or(OcrError::NullResult(what))
    }

    /// All recognized text, recognizing first if needed.
    pub fn utf8_text(&mut self) -> Result<String> {
        self.text_output("UTF-8 text", |h| unsafe { tesseract_sys::TessBaseAPIGetUTF8Text(h) })
    }

    pub fn unlv_text(&mut self) -> Result<String> {
        self.text_output("UNLV text", |h| unsafe { tesseract_sys::TessBaseAPIGetUNLVText(h) })
    }

    /// hOCR markup. `page` is 0-based and shows up 1-based in the output.
    pub fn hocr_text(&mut self, page: i32) -> Result<String> {
        self.text_output("hOCR text", |h| unsafe { tesseract_sys::TessBaseAPIGetHOCRText(h, page) })
    }

    pub fn tsv_text(&mut self, page: i32) -> Result<String> {
        self.text_output("TSV text", |h| unsafe { tesseract_sys::TessBaseAPIGetTsvText(h, page) })
    }

    pub fn alto_text(&mut self, page: i32) -> Result<String> {
        self.text_output("ALTO text", |h| unsafe { tesseract_sys::TessBaseAPIGetAltoText(h, page) })
    }

    pub fn lstm_box_text(&mut self, page: i32) -> Result<String> {
        self.text_output("LSTM box text", |h| unsafe { tesseract_sys::TessBaseAPIGetLSTMBoxText(h, page) })
    }

    pub fn box_text(&mut self, page: i32) -> Result<String> {
        self.text_output("box text", |h| unsafe { tesseract_sys::TessBaseAPIGetBoxText(h, page) })
    }

    pub fn word_str_box_text(&mut self, page: i32) -> Result<String> {
        self.text_output("WordStr box text", |h| unsafe {
            tesseract_sys::TessBaseAPIGetWordStrBoxText(h, page)
        })
    }

    /// Orientation and script detection report. Needs the `osd` model.
    pub fn osd_text(&mut self, page: i32) -> Result<String> {
        self.text_output("OSD text", |h| unsafe { tesseract_sys::TessBaseAPIGetOsdText(h, page) })
    }
}

impl CursorSource for Session {
    type Cursor<'a> = EngineCursor<'a>
    where
        Self: 'a;

    fn acquire(&mut self) -> Result<Option<EngineCursor<'_>>> {
        self.cursor()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        unsafe {
            tesseract_sys::TessBaseAPIEnd(self.handle());
            tesseract_sys::TessBaseAPIDelete(self.handle());
        }
        debug!("Engine session closed");
    }
}
