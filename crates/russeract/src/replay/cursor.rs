//! Cursor over a recorded page.

use std::ops::Range;

use russeract_types::{BoundingBox, PageIteratorLevel, PageRecord, SymbolRecord, WordRecord};

use crate::cursor::ResultCursor;

/// Location of one word inside the record tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WordPath {
    block: usize,
    para: usize,
    line: usize,
    word: usize,
}

impl WordPath {
    /// Whether both words live in the same object at `level`.
    fn shares(&self, other: &WordPath, level: PageIteratorLevel) -> bool {
        match level {
            PageIteratorLevel::Block => self.block == other.block,
            PageIteratorLevel::Para => (self.block, self.para) == (other.block, other.para),
            PageIteratorLevel::Textline => {
                (self.block, self.para, self.line) == (other.block, other.para, other.line)
            }
            PageIteratorLevel::Word | PageIteratorLevel::Symbol => self == other,
        }
    }
}

/// Every word of `page` in reading order. Containers without words do not
/// appear, which is how the cursor skips them.
pub(crate) fn index_words(page: &PageRecord) -> Vec<WordPath> {
    let mut paths = Vec::new();
    for (block, block_record) in page.blocks.iter().enumerate() {
        for (para, para_record) in block_record.paragraphs.iter().enumerate() {
            for (line, line_record) in para_record.lines.iter().enumerate() {
                for word in 0..line_record.words.len() {
                    paths.push(WordPath {
                        block,
                        para,
                        line,
                        word,
                    });
                }
            }
        }
    }
    paths
}

/// Cursor that walks a [`PageRecord`] the way the engine walks its own
/// results.
///
/// Text is assembled as the engine does: words in a line are joined by a
/// single space and the line ends with `"\n"`; the last line of a paragraph
/// gets an extra `"\n"` unless it is the last line on the page. Confidence
/// above word level is the mean of the contained words.
///
/// Words without symbols are visited at word level and skipped at symbol
/// level, including when the page opens with one.
#[derive(Debug, Clone)]
pub struct ReplayCursor<'a> {
    page: &'a PageRecord,
    paths: &'a [WordPath],
    word: usize,
    symbol: usize,
}

impl<'a> ReplayCursor<'a> {
    pub(crate) fn new(page: &'a PageRecord, paths: &'a [WordPath]) -> Self {
        Self {
            page,
            paths,
            word: 0,
            symbol: 0,
        }
    }

    fn word_record(&self, index: usize) -> &'a WordRecord {
        let path = self.paths[index];
        &self.page.blocks[path.block].paragraphs[path.para].lines[path.line].words[path.word]
    }

    /// Word that symbol-level queries read: the current word, or the next
    /// one holding symbols when the current word has none.
    fn symbol_word(&self) -> usize {
        let mut word = self.word;
        while word < self.paths.len() && self.word_record(word).symbols.is_empty() {
            word += 1;
        }
        word
    }

    fn symbol_record(&self) -> Option<&'a SymbolRecord> {
        let word = self.symbol_word();
        if word >= self.paths.len() {
            return None;
        }
        self.word_record(word).symbols.get(self.symbol)
    }

    /// Indices of the words in the current object at `level`.
    fn span(&self, level: PageIteratorLevel) -> Range<usize> {
        let current = self.paths[self.word];
        let mut start = self.word;
        while start > 0 && self.paths[start - 1].shares(&current, level) {
            start -= 1;
        }
        let mut end = self.word + 1;
        while end < self.paths.len() && self.paths[end].shares(&current, level) {
            end += 1;
        }
        start..end
    }

    /// Split `range` into runs of words sharing an object at `level`.
    fn runs(&self, range: Range<usize>, level: PageIteratorLevel) -> Vec<Range<usize>> {
        let mut runs = Vec::new();
        let mut start = range.start;
        for index in range.start + 1..range.end {
            if !self.paths[index].shares(&self.paths[start], level) {
                runs.push(start..index);
                start = index;
            }
        }
        if start < range.end {
            runs.push(start..range.end);
        }
        runs
    }

    /// Words joined by a space, then `"\n"`. A line that closes a paragraph
    /// carries the paragraph separator too, unless it ends the page.
    fn line_text(&self, range: Range<usize>) -> String {
        let next = range.end;
        let words: Vec<String> = range.map(|index| self.word_record(index).text()).collect();
        let mut text = words.join(" ");
        text.push('\n');
        let closes_paragraph = next < self.paths.len()
            && !self.paths[next].shares(&self.paths[next - 1], PageIteratorLevel::Para);
        if closes_paragraph {
            text.push('\n');
        }
        text
    }

    fn paragraph_text(&self, range: Range<usize>) -> String {
        self.runs(range, PageIteratorLevel::Textline)
            .into_iter()
            .map(|line| self.line_text(line))
            .collect()
    }

    fn skip_words_without_symbols(&mut self) {
        while self.word < self.paths.len() && self.word_record(self.word).symbols.is_empty() {
            self.word += 1;
        }
    }
}

impl ResultCursor for ReplayCursor<'_> {
    fn begin(&mut self) {
        self.word = 0;
        self.symbol = 0;
    }

    fn is_empty(&self, level: PageIteratorLevel) -> bool {
        if self.word >= self.paths.len() {
            return true;
        }
        level == PageIteratorLevel::Symbol && self.symbol_record().is_none()
    }

    fn bounding_box(&self, level: PageIteratorLevel) -> Option<BoundingBox> {
        if self.is_empty(level) {
            return None;
        }
        let path = self.paths[self.word];
        let block = &self.page.blocks[path.block];
        let bbox = match level {
            PageIteratorLevel::Block => block.bbox,
            PageIteratorLevel::Para => block.paragraphs[path.para].bbox,
            PageIteratorLevel::Textline => block.paragraphs[path.para].lines[path.line].bbox,
            PageIteratorLevel::Word => self.word_record(self.word).bbox,
            PageIteratorLevel::Symbol => self.symbol_record()?.bbox,
        };
        Some(bbox)
    }

    fn text(&self, level: PageIteratorLevel) -> Option<String> {
        if self.is_empty(level) {
            return None;
        }
        let text = match level {
            PageIteratorLevel::Symbol => self.symbol_record()?.text.clone(),
            PageIteratorLevel::Word => self.word_record(self.word).text(),
            PageIteratorLevel::Textline => self.line_text(self.span(level)),
            PageIteratorLevel::Para => self.paragraph_text(self.span(level)),
            PageIteratorLevel::Block => self
                .runs(self.span(level), PageIteratorLevel::Para)
                .into_iter()
                .map(|para| self.paragraph_text(para))
                .collect(),
        };
        Some(text)
    }

    fn confidence(&self, level: PageIteratorLevel) -> f32 {
        if self.is_empty(level) {
            return 0.0;
        }
        match level {
            PageIteratorLevel::Symbol => self.symbol_record().map_or(0.0, |symbol| symbol.confidence),
            PageIteratorLevel::Word => self.word_record(self.word).confidence,
            _ => {
                let span = self.span(level);
                let count = span.len();
                if count == 0 {
                    return 0.0;
                }
                let total: f32 = span.map(|index| self.word_record(index).confidence).sum();
                (total / count as f32).clamp(0.0, 100.0)
            }
        }
    }

    fn advance(&mut self, level: PageIteratorLevel) -> bool {
        if self.word >= self.paths.len() {
            return false;
        }
        match level {
            PageIteratorLevel::Symbol => {
                self.word = self.symbol_word();
                if self.word >= self.paths.len() {
                    return false;
                }
                self.symbol += 1;
                if self.symbol >= self.word_record(self.word).symbols.len() {
                    self.word += 1;
                    self.symbol = 0;
                    self.skip_words_without_symbols();
                }
            }
            PageIteratorLevel::Word => {
                self.word += 1;
                self.symbol = 0;
            }
            _ => {
                let current = self.paths[self.word];
                while self.word < self.paths.len() && self.paths[self.word].shares(&current, level) {
                    self.word += 1;
                }
                self.symbol = 0;
            }
        }
        self.word < self.paths.len()
    }

    fn is_at_beginning_of(&self, level: PageIteratorLevel) -> bool {
        if self.word >= self.paths.len() {
            return false;
        }
        match level {
            PageIteratorLevel::Symbol => true,
            PageIteratorLevel::Word => self.symbol == 0,
            _ => {
                self.symbol == 0
                    && (self.word == 0
                        || !self.paths[self.word - 1].shares(&self.paths[self.word], level))
            }
        }
    }

    fn is_at_final_element(&self, level: PageIteratorLevel, element: PageIteratorLevel) -> bool {
        if self.is_empty(element) {
            return true;
        }
        let mut next = self.clone();
        next.advance(element);
        if next.is_empty(element) {
            return true;
        }
        let mut current = element;
        while current > level {
            match current.coarser() {
                Some(coarser) => current = coarser,
                None => break,
            }
            if !next.is_at_beginning_of(current) {
                return false;
            }
        }
        true
    }
}
