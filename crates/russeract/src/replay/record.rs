//! Capture a cursor's results as a [`PageRecord`].

use russeract_types::{
    BlockRecord, BoundingBox, LineRecord, PageIteratorLevel, PageRecord, ParagraphRecord,
    SymbolRecord, WordRecord,
};
use tracing::debug;

use crate::cursor::ResultCursor;
use crate::error::{OcrError, Result};

/// Walk `cursor` word by word from the beginning of the page and rebuild the
/// result tree.
///
/// Words without symbols are not captured, and neither are containers left
/// without words. A line, paragraph or block that starts on a skipped word
/// still opens with the next captured one. The cursor is left at the end of
/// the page.
pub fn record_page<C: ResultCursor + ?Sized>(cursor: &mut C) -> Result<PageRecord> {
    let mut page = PageRecord::default();
    let mut opened: Option<PageIteratorLevel> = None;
    let mut symbols = 0usize;

    cursor.begin();
    while !cursor.is_empty(PageIteratorLevel::Block) {
        opened = coarsest(opened, outermost_beginning(cursor));
        let has_symbols = !cursor.is_empty(PageIteratorLevel::Word)
            && cursor
                .text(PageIteratorLevel::Word)
                .is_some_and(|text| !text.is_empty());
        if has_symbols {
            symbols += push_word(&mut page, cursor, opened.take())?;
        }
        if !cursor.advance(PageIteratorLevel::Word) {
            break;
        }
    }

    debug!(blocks = page.blocks.len(), symbols, "Recorded page");
    Ok(page)
}

fn outermost_beginning<C: ResultCursor + ?Sized>(cursor: &C) -> Option<PageIteratorLevel> {
    [
        PageIteratorLevel::Block,
        PageIteratorLevel::Para,
        PageIteratorLevel::Textline,
    ]
    .into_iter()
    .find(|&level| cursor.is_at_beginning_of(level))
}

fn coarsest(
    a: Option<PageIteratorLevel>,
    b: Option<PageIteratorLevel>,
) -> Option<PageIteratorLevel> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (level, None) | (None, level) => level,
    }
}

/// Append the word under the cursor and its symbols, opening every container
/// at or below `opened`. Leaves the cursor on the word's last symbol.
fn push_word<C: ResultCursor + ?Sized>(
    page: &mut PageRecord,
    cursor: &mut C,
    opened: Option<PageIteratorLevel>,
) -> Result<usize> {
    let opens = |level: PageIteratorLevel| opened.is_some_and(|outermost| outermost <= level);

    let block = last_or_push(&mut page.blocks, opens(PageIteratorLevel::Block), || {
        Ok(BlockRecord {
            bbox: bbox_at(cursor, PageIteratorLevel::Block)?,
            paragraphs: Vec::new(),
        })
    })?;
    let para = last_or_push(&mut block.paragraphs, opens(PageIteratorLevel::Para), || {
        Ok(ParagraphRecord {
            bbox: bbox_at(cursor, PageIteratorLevel::Para)?,
            lines: Vec::new(),
        })
    })?;
    let line = last_or_push(&mut para.lines, opens(PageIteratorLevel::Textline), || {
        Ok(LineRecord {
            bbox: bbox_at(cursor, PageIteratorLevel::Textline)?,
            words: Vec::new(),
        })
    })?;
    let word = last_or_push(&mut line.words, true, || {
        Ok(WordRecord {
            bbox: bbox_at(cursor, PageIteratorLevel::Word)?,
            confidence: cursor.confidence(PageIteratorLevel::Word),
            symbols: Vec::new(),
        })
    })?;

    loop {
        let text = cursor
            .text(PageIteratorLevel::Symbol)
            .ok_or(OcrError::CursorFault {
                level: PageIteratorLevel::Symbol,
                query: "text",
            })?;
        word.symbols.push(SymbolRecord {
            bbox: bbox_at(cursor, PageIteratorLevel::Symbol)?,
            text,
            confidence: cursor.confidence(PageIteratorLevel::Symbol),
        });
        if cursor.is_at_final_element(PageIteratorLevel::Word, PageIteratorLevel::Symbol)
            || !cursor.advance(PageIteratorLevel::Symbol)
        {
            break;
        }
    }
    Ok(word.symbols.len())
}

fn bbox_at<C: ResultCursor + ?Sized>(cursor: &C, level: PageIteratorLevel) -> Result<BoundingBox> {
    cursor.bounding_box(level).ok_or(OcrError::CursorFault {
        level,
        query: "bounding box",
    })
}

fn last_or_push<T>(
    items: &mut Vec<T>,
    start_new: bool,
    make: impl FnOnce() -> Result<T>,
) -> Result<&mut T> {
    if start_new || items.is_empty() {
        items.push(make()?);
    }
    let last = items.len() - 1;
    Ok(&mut items[last])
}
