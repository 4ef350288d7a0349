//! Lazy traversal of recognition results.
//!
//! [`iter_at`] turns a [`CursorSource`] into a [`Results`] iterator that
//! walks the page at one granularity level and yields a [`ResultItem`] per
//! object. The cursor is advanced lazily, just before the next item is
//! produced, and released as soon as the traversal ends or the iterator is
//! dropped.

use std::iter::FusedIterator;

use russeract_types::{PageIteratorLevel, ResultItem};
use tracing::{debug, trace, warn};

use crate::cursor::{CursorSource, ResultCursor};
use crate::error::{OcrError, Result};

/// Walk `source` at `level`, yielding one item per object in reading order.
///
/// Acquiring the cursor may run recognition; failures surface here, before
/// any item is produced.
pub fn iter_at<S>(source: &mut S, level: PageIteratorLevel) -> Result<Results<S::Cursor<'_>>>
where
    S: CursorSource + ?Sized,
{
    let cursor = source.acquire()?;
    match cursor {
        Some(_) => debug!(%level, "Acquired result cursor"),
        None => debug!(%level, "No recognition results to iterate"),
    }
    Ok(Results::new(cursor, level))
}

/// Forward-only, single-pass sequence of results at one level.
///
/// Holds the cursor it walks. Once the sequence ends, either by reaching
/// the end of the page or on an engine fault, the cursor is released and
/// every further call to `next` returns `None`.
pub struct Results<C: ResultCursor> {
    cursor: Option<C>,
    level: PageIteratorLevel,
    started: bool,
    produced: usize,
}

impl<C: ResultCursor> Results<C> {
    /// Wrap a cursor already positioned at the beginning of the page.
    pub fn new(cursor: Option<C>, level: PageIteratorLevel) -> Self {
        Self {
            cursor,
            level,
            started: false,
            produced: 0,
        }
    }

    pub fn level(&self) -> PageIteratorLevel {
        self.level
    }

    /// Number of items produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Whether the traversal has ended and the cursor was released.
    pub fn is_finished(&self) -> bool {
        self.cursor.is_none()
    }

    fn finish(&mut self) {
        if self.cursor.take().is_some() {
            debug!(level = %self.level, produced = self.produced, "Released result cursor");
        }
    }
}

fn read_item<C: ResultCursor>(cursor: &C, level: PageIteratorLevel) -> Result<ResultItem> {
    let bbox = cursor.bounding_box(level).ok_or(OcrError::CursorFault {
        level,
        query: "bounding box",
    })?;
    let text = cursor.text(level).ok_or(OcrError::CursorFault {
        level,
        query: "text",
    })?;
    let confidence = cursor.confidence(level);
    Ok(ResultItem {
        bbox,
        text,
        confidence,
    })
}

impl<C: ResultCursor> Iterator for Results<C> {
    type Item = Result<ResultItem>;

    fn next(&mut self) -> Option<Self::Item> {
        let level = self.level;
        let step = {
            let cursor = self.cursor.as_mut()?;
            if self.started && !cursor.advance(level) {
                None
            } else if cursor.is_empty(level) {
                None
            } else {
                Some(read_item(cursor, level))
            }
        };
        self.started = true;

        match step {
            Some(Ok(item)) => {
                self.produced += 1;
                trace!(%level, index = self.produced - 1, bbox = %item.bbox, "Produced result");
                Some(Ok(item))
            }
            Some(Err(err)) => {
                warn!(%level, produced = self.produced, "Traversal aborted: {}", err);
                self.finish();
                Some(Err(err))
            }
            None => {
                self.finish();
                None
            }
        }
    }
}

impl<C: ResultCursor> FusedIterator for Results<C> {}

impl<C: ResultCursor> Drop for Results<C> {
    fn drop(&mut self) {
        self.finish();
    }
}
