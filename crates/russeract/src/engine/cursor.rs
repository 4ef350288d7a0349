//! Engine result iterator.

use std::marker::PhantomData;
use std::ptr::NonNull;

use libc::c_int;
use russeract_types::{BoundingBox, PageIteratorLevel};
use tesseract_sys::{TessPageIterator, TessPageIteratorLevel, TessResultIterator};

use super::session::{take_text, Session};
use crate::cursor::ResultCursor;

fn raw_level(level: PageIteratorLevel) -> TessPageIteratorLevel {
    i32::from(level) as TessPageIteratorLevel
}

/// Owned engine result iterator.
///
/// Borrows the [`Session`] that produced it mutably, so the session's
/// results cannot change underneath it. The iterator is deleted on drop.
pub struct EngineCursor<'session> {
    raw: NonNull<TessResultIterator>,
    _session: PhantomData<&'session mut Session>,
}

impl<'session> EngineCursor<'session> {
    pub(crate) fn new(raw: NonNull<TessResultIterator>) -> Self {
        Self {
            raw,
            _session: PhantomData,
        }
    }

    fn page(&self) -> *mut TessPageIterator {
        unsafe { tesseract_sys::TessResultIteratorGetPageIterator(self.raw.as_ptr()) }
    }
}

impl ResultCursor for EngineCursor<'_> {
    fn begin(&mut self) {
        unsafe { tesseract_sys::TessPageIteratorBegin(self.page()) }
    }

    // The C API has no Empty(); BoundingBox fails exactly when the
    // position is empty at that level.
    fn is_empty(&self, level: PageIteratorLevel) -> bool {
        self.bounding_box(level).is_none()
    }

    fn bounding_box(&self, level: PageIteratorLevel) -> Option<BoundingBox> {
        let (mut left, mut top, mut right, mut bottom): (c_int, c_int, c_int, c_int) = (0, 0, 0, 0);
        let found = unsafe {
            tesseract_sys::TessPageIteratorBoundingBox(
                self.page(),
                raw_level(level),
                &mut left,
                &mut top,
                &mut right,
                &mut bottom,
            )
        };
        (found != 0).then(|| BoundingBox::from_corners(left, top, right, bottom))
    }

    fn text(&self, level: PageIteratorLevel) -> Option<String> {
        unsafe { take_text(tesseract_sys::TessResultIteratorGetUTF8Text(self.raw.as_ptr(), raw_level(level))) }
    }

    fn confidence(&self, level: PageIteratorLevel) -> f32 {
        unsafe { tesseract_sys::TessResultIteratorConfidence(self.raw.as_ptr(), raw_level(level)) }
    }

    fn advance(&mut self, level: PageIteratorLevel) -> bool {
        unsafe { tesseract_sys::TessResultIteratorNext(self.raw.as_ptr(), raw_level(level)) != 0 }
    }

    fn is_at_beginning_of(&self, level: PageIteratorLevel) -> bool {
        unsafe { tesseract_sys::TessPageIteratorIsAtBeginningOf(self.page(), raw_level(level)) != 0 }
    }

    fn is_at_final_element(&self, level: PageIteratorLevel, element: PageIteratorLevel) -> bool {
        unsafe {
            tesseract_sys::TessPageIteratorIsAtFinalElement(self.page(), raw_level(level), raw_level(element)) != 0
        }
    }
}

impl Drop for EngineCursor<'_> {
    fn drop(&mut self) {
        unsafe { tesseract_sys::TessResultIteratorDelete(self.raw.as_ptr()) }
    }
}
