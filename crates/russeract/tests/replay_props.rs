use proptest::prelude::*;
use russeract::{
    record_page, BlockRecord, BoundingBox, CursorSource, LineRecord, PageIteratorLevel,
    PageRecord, ParagraphRecord, ReplaySession, SymbolRecord, WordRecord,
};

/// Blocks of paragraphs of lines of words. An empty word stands for a word
/// the engine found without symbols.
type Layout = Vec<Vec<Vec<Vec<String>>>>;

fn layout() -> impl Strategy<Value = Layout> {
    let word = "[A-Za-z0-9]{0,6}";
    let line = prop::collection::vec(word, 0..4);
    let para = prop::collection::vec(line, 0..3);
    let block = prop::collection::vec(para, 0..3);
    prop::collection::vec(block, 0..4)
}

fn build_page(layout: &Layout) -> PageRecord {
    let mut row = 0;
    let blocks = layout
        .iter()
        .map(|paras| {
            let paragraphs: Vec<ParagraphRecord> = paras
                .iter()
                .map(|lines| {
                    let lines: Vec<LineRecord> = lines
                        .iter()
                        .map(|words| {
                            let line = build_line(row, words);
                            row += 1;
                            line
                        })
                        .collect();
                    ParagraphRecord {
                        bbox: union(lines.iter().map(|line| line.bbox)),
                        lines,
                    }
                })
                .collect();
            BlockRecord {
                bbox: union(paragraphs.iter().map(|para| para.bbox)),
                paragraphs,
            }
        })
        .collect();
    PageRecord { blocks }
}

fn build_line(row: i32, words: &[String]) -> LineRecord {
    let top = 10 + row * 30;
    let mut left = 10;
    let words: Vec<WordRecord> = words
        .iter()
        .map(|text| {
            let symbols: Vec<SymbolRecord> = text
                .chars()
                .enumerate()
                .map(|(i, c)| SymbolRecord {
                    bbox: BoundingBox::new(left + 8 * i as i32, top, 8, 20),
                    text: c.to_string(),
                    confidence: 90.0,
                })
                .collect();
            let bbox = BoundingBox::new(left, top, 8 * symbols.len().max(1) as i32, 20);
            left += bbox.width + 8;
            WordRecord {
                bbox,
                confidence: 90.0,
                symbols,
            }
        })
        .collect();
    LineRecord {
        bbox: union(words.iter().map(|word| word.bbox)),
        words,
    }
}

fn union(boxes: impl Iterator<Item = BoundingBox>) -> BoundingBox {
    boxes.reduce(|a, b| a.union(&b)).unwrap_or_default()
}

/// What the cursor should report for a layout, computed from the layout
/// alone.
#[derive(Debug, Default)]
struct Expected {
    blocks: usize,
    paras: usize,
    lines: Vec<String>,
    words: Vec<String>,
    symbols: usize,
}

impl Expected {
    fn of(layout: &Layout) -> Self {
        let mut expected = Expected::default();
        // (paragraph index, words) for every line that holds a word.
        let mut lines: Vec<(usize, &Vec<String>)> = Vec::new();
        for (para, lines_in_para) in layout.iter().flatten().enumerate() {
            for words in lines_in_para.iter().filter(|words| !words.is_empty()) {
                lines.push((para, words));
            }
        }
        for block in layout {
            let paras = block
                .iter()
                .filter(|para| para.iter().any(|words| !words.is_empty()))
                .count();
            expected.paras += paras;
            expected.blocks += usize::from(paras > 0);
        }

        for (i, (para, words)) in lines.iter().enumerate() {
            let mut text = format!("{}\n", words.join(" "));
            if lines.get(i + 1).is_some_and(|(next, _)| next != para) {
                text.push('\n');
            }
            expected.lines.push(text);
            expected.words.extend(words.iter().cloned());
        }
        expected.symbols = expected.words.iter().map(|word| word.chars().count()).sum();
        expected
    }
}

/// `page` without symbol-less words and without the containers that leaves
/// empty.
fn prune(mut page: PageRecord) -> PageRecord {
    for block in &mut page.blocks {
        for para in &mut block.paragraphs {
            for line in &mut para.lines {
                line.words.retain(|word| !word.symbols.is_empty());
            }
            para.lines.retain(|line| !line.words.is_empty());
        }
        block.paragraphs.retain(|para| !para.lines.is_empty());
    }
    page.blocks.retain(|block| !block.paragraphs.is_empty());
    page
}

fn texts(session: &mut ReplaySession, level: PageIteratorLevel) -> Vec<String> {
    session
        .iter_at(level)
        .unwrap()
        .map(|item| item.unwrap().text)
        .collect()
}

proptest! {
    #[test]
    fn words_come_out_in_reading_order(layout in layout()) {
        let expected = Expected::of(&layout);
        let mut session = ReplaySession::new(build_page(&layout));

        prop_assert_eq!(texts(&mut session, PageIteratorLevel::Word), expected.words.clone());
        prop_assert_eq!(texts(&mut session, PageIteratorLevel::Symbol).concat(), expected.words.concat());
    }

    #[test]
    fn one_item_per_object(layout in layout()) {
        let expected = Expected::of(&layout);
        let mut session = ReplaySession::new(build_page(&layout));
        let counts = [
            (PageIteratorLevel::Block, expected.blocks),
            (PageIteratorLevel::Para, expected.paras),
            (PageIteratorLevel::Textline, expected.lines.len()),
            (PageIteratorLevel::Word, expected.words.len()),
            (PageIteratorLevel::Symbol, expected.symbols),
        ];

        for (level, count) in counts {
            let items: Vec<_> = session.iter_at(level).unwrap().map(Result::unwrap).collect();
            let boxes: Vec<BoundingBox> = items.iter().map(|item| item.bbox).collect();
            let item_texts: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
            let confidences: Vec<f32> = items.iter().map(|item| item.confidence).collect();

            prop_assert_eq!(boxes.len(), count, "boxes at {:?}", level);
            prop_assert_eq!(item_texts.len(), count, "texts at {:?}", level);
            prop_assert_eq!(confidences.len(), count, "confidences at {:?}", level);
        }
        prop_assert_eq!(texts(&mut session, PageIteratorLevel::Textline), expected.lines);
    }

    #[test]
    fn traversal_is_deterministic(layout in layout()) {
        let mut session = ReplaySession::new(build_page(&layout));
        for level in PageIteratorLevel::ALL {
            let first: Vec<_> = session.iter_at(level).unwrap().map(Result::unwrap).collect();
            let second: Vec<_> = session.iter_at(level).unwrap().map(Result::unwrap).collect();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn abandoned_traversal_does_not_affect_the_next(layout in layout(), take in 0usize..4) {
        let mut session = ReplaySession::new(build_page(&layout));
        let full = texts(&mut session, PageIteratorLevel::Word);

        let partial: Vec<String> = session
            .iter_at(PageIteratorLevel::Word)
            .unwrap()
            .take(take)
            .map(|item| item.unwrap().text)
            .collect();
        prop_assert_eq!(&partial[..], &full[..take.min(full.len())]);
        prop_assert_eq!(texts(&mut session, PageIteratorLevel::Word), full);
    }

    #[test]
    fn page_text_is_block_texts_joined(layout in layout()) {
        let expected = Expected::of(&layout);
        let mut session = ReplaySession::new(build_page(&layout));
        let blocks = texts(&mut session, PageIteratorLevel::Block);

        prop_assert_eq!(session.utf8_text(), blocks.concat());
        prop_assert_eq!(session.utf8_text(), expected.lines.concat());
        if !expected.lines.is_empty() {
            prop_assert!(session.utf8_text().ends_with('\n'));
        }
    }

    #[test]
    fn recording_reproduces_the_page(layout in layout()) {
        let page = build_page(&layout);
        let mut session = ReplaySession::new(page.clone());
        match session.acquire().unwrap() {
            Some(mut cursor) => prop_assert_eq!(record_page(&mut cursor).unwrap(), prune(page)),
            None => prop_assert_eq!(prune(page), PageRecord::default()),
        }
    }
}
