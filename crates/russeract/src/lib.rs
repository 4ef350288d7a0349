//! Tesseract OCR bindings with lazy, scoped result iteration.
//!
//! Results are walked through the [`ResultCursor`] protocol. [`iter_at`]
//! wraps any [`CursorSource`] in a [`Results`] iterator that yields one
//! [`ResultItem`] per block, paragraph, line, word or symbol and releases the
//! cursor as soon as the walk ends.
//!
//! Two sources are provided:
//! - [`ReplaySession`] replays a recorded [`PageRecord`] and needs no native
//!   libraries.
//! - `engine::Session` drives libtesseract directly. It is only built with
//!   the `tesseract` cargo feature.
//!
//! ```
//! use russeract::{PageIteratorLevel, ReplaySession};
//!
//! let mut session = ReplaySession::from_json_str(r#"{"blocks": []}"#).unwrap();
//! assert_eq!(session.iter_at(PageIteratorLevel::Word).unwrap().count(), 0);
//! ```

pub mod config;
pub mod cursor;
pub mod error;
pub mod replay;
pub mod results;

#[cfg(feature = "tesseract")]
pub mod engine;

pub use config::SessionConfig;
pub use cursor::{CursorSource, ResultCursor};
pub use error::{OcrError, Result};
pub use replay::{record_page, ReplayCursor, ReplaySession};
pub use results::{iter_at, Results};

pub use russeract_types::{
    BlockRecord, BoundingBox, InvalidValue, LineRecord, OcrEngineMode, PageIteratorLevel,
    PageRecord, PageSegMode, ParagraphRecord, ResultItem, SymbolRecord, WordRecord,
};
