//! Replay of recorded recognition results.
//!
//! A [`ReplaySession`] serves a [`PageRecord`] through the same cursor
//! protocol as the native engine, so traversals can be reproduced without
//! libtesseract. Pages are captured with [`record_page`] and stored as JSON.

mod cursor;
mod record;

use std::fs;
use std::path::Path;

use russeract_types::{PageIteratorLevel, PageRecord};
use tracing::debug;

use crate::cursor::{CursorSource, ResultCursor};
use crate::error::Result;
use crate::results::{self, Results};

pub use cursor::ReplayCursor;
pub use record::record_page;

use cursor::{index_words, WordPath};

/// Recognition session backed by a recorded page.
#[derive(Debug, Clone)]
pub struct ReplaySession {
    page: PageRecord,
    paths: Vec<WordPath>,
}

impl ReplaySession {
    pub fn new(page: PageRecord) -> Self {
        let paths = index_words(&page);
        Self { page, paths }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a page previously written with [`ReplaySession::save`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading recorded page from {:?}", path);
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Write the page as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.page)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn page(&self) -> &PageRecord {
        &self.page
    }

    pub fn into_page(self) -> PageRecord {
        self.page
    }

    /// Walk the page at `level`.
    pub fn iter_at(&mut self, level: PageIteratorLevel) -> Result<Results<ReplayCursor<'_>>> {
        results::iter_at(self, level)
    }

    /// Whole-page text, blocks concatenated.
    pub fn utf8_text(&self) -> String {
        let mut cursor = ReplayCursor::new(&self.page, &self.paths);
        let mut text = String::new();
        while let Some(block) = cursor.text(PageIteratorLevel::Block) {
            text.push_str(&block);
            if !cursor.advance(PageIteratorLevel::Block) {
                break;
            }
        }
        text
    }
}

impl From<PageRecord> for ReplaySession {
    fn from(page: PageRecord) -> Self {
        Self::new(page)
    }
}

impl CursorSource for ReplaySession {
    type Cursor<'a> = ReplayCursor<'a>
    where
        Self: 'a;

    fn acquire(&mut self) -> Result<Option<ReplayCursor<'_>>> {
        if self.paths.is_empty() {
            return Ok(None);
        }
        Ok(Some(ReplayCursor::new(&self.page, &self.paths)))
    }
}
