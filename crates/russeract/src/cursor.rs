//! Result cursor protocol.
//!
//! A cursor is a stateful position in a page's result tree. It answers
//! queries about the object under it at a chosen [`PageIteratorLevel`] and
//! moves forward in reading order. Engines implement [`ResultCursor`] for
//! their cursor type and [`CursorSource`] for whatever hands cursors out.

use russeract_types::{BoundingBox, PageIteratorLevel};

use crate::error::Result;

/// A position within recognition results.
pub trait ResultCursor {
    /// Move back to the first object on the page.
    fn begin(&mut self);

    /// Whether there is no object at `level` under the cursor.
    ///
    /// True past the end of the page, and at symbol level for words that
    /// hold no symbols.
    fn is_empty(&self, level: PageIteratorLevel) -> bool;

    /// Box of the object at `level`, or `None` when empty.
    fn bounding_box(&self, level: PageIteratorLevel) -> Option<BoundingBox>;

    /// UTF-8 text of the object at `level`, or `None` when empty.
    fn text(&self, level: PageIteratorLevel) -> Option<String>;

    /// Confidence of the object at `level`, 0 to 100.
    fn confidence(&self, level: PageIteratorLevel) -> f32;

    /// Move to the start of the next object at `level`.
    ///
    /// Returns false once the end of the page has been reached.
    fn advance(&mut self, level: PageIteratorLevel) -> bool;

    /// Whether the cursor sits at the start of an object at `level`.
    fn is_at_beginning_of(&self, level: PageIteratorLevel) -> bool;

    /// Whether the cursor is on the last `element` inside the current
    /// `level` object, e.g. the last word of a paragraph.
    fn is_at_final_element(&self, level: PageIteratorLevel, element: PageIteratorLevel) -> bool;
}

/// Something that can hand out a cursor over its results.
///
/// The cursor borrows the source mutably, so the source cannot be
/// reconfigured or asked for a second cursor while one is alive.
pub trait CursorSource {
    type Cursor<'a>: ResultCursor
    where
        Self: 'a;

    /// Obtain a cursor positioned at the beginning of the page.
    ///
    /// Returns `Ok(None)` when there are no results to walk.
    fn acquire(&mut self) -> Result<Option<Self::Cursor<'_>>>;
}
