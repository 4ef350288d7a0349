//! Recorded recognition results.
//!
//! A [`PageRecord`] captures the engine's result tree for one page so a
//! traversal can be replayed later without the engine.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// Result tree for one recognized page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PageRecord {
    /// Blocks in reading order.
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
}

impl PageRecord {
    /// Iterate over every word on the page in reading order.
    pub fn words(&self) -> impl Iterator<Item = &WordRecord> + '_ {
        self.blocks
            .iter()
            .flat_map(|block| block.paragraphs.iter())
            .flat_map(|para| para.lines.iter())
            .flat_map(|line| line.words.iter())
    }

    /// Whether the page holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.words().next().is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BlockRecord {
    pub bbox: BoundingBox,
    #[serde(default)]
    pub paragraphs: Vec<ParagraphRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParagraphRecord {
    pub bbox: BoundingBox,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LineRecord {
    pub bbox: BoundingBox,
    #[serde(default)]
    pub words: Vec<WordRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WordRecord {
    pub bbox: BoundingBox,
    /// Engine confidence for the whole word, 0 to 100.
    pub confidence: f32,
    #[serde(default)]
    pub symbols: Vec<SymbolRecord>,
}

impl WordRecord {
    /// Word text: its symbols concatenated.
    pub fn text(&self) -> String {
        self.symbols.iter().map(|symbol| symbol.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SymbolRecord {
    pub bbox: BoundingBox,
    pub text: String,
    /// Engine confidence for this symbol, 0 to 100.
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, confidence: f32) -> WordRecord {
        WordRecord {
            bbox: BoundingBox::new(0, 0, 10 * text.len() as i32, 10),
            confidence,
            symbols: text
                .chars()
                .map(|c| SymbolRecord {
                    bbox: BoundingBox::new(0, 0, 10, 10),
                    text: c.to_string(),
                    confidence,
                })
                .collect(),
        }
    }

    #[test]
    fn test_word_text_concatenates_symbols() {
        assert_eq!(word("quick", 90.0).text(), "quick");
        assert_eq!(WordRecord::default().text(), "");
    }

    #[test]
    fn test_words_in_reading_order() {
        let page = PageRecord {
            blocks: vec![BlockRecord {
                bbox: BoundingBox::default(),
                paragraphs: vec![ParagraphRecord {
                    bbox: BoundingBox::default(),
                    lines: vec![
                        LineRecord {
                            bbox: BoundingBox::default(),
                            words: vec![word("The", 90.0), word("quick", 80.0)],
                        },
                        LineRecord {
                            bbox: BoundingBox::default(),
                            words: vec![word("fox", 70.0)],
                        },
                    ],
                }],
            }],
        };

        let texts: Vec<String> = page.words().map(WordRecord::text).collect();
        assert_eq!(texts, ["The", "quick", "fox"]);
        assert!(!page.is_empty());
        assert!(PageRecord::default().is_empty());
    }

    #[test]
    fn test_missing_children_default_to_empty() {
        let json = r#"{"blocks":[{"bbox":{"left":0,"top":0,"width":5,"height":5}}]}"#;
        let page: PageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(page.blocks.len(), 1);
        assert!(page.blocks[0].paragraphs.is_empty());
        assert!(page.is_empty());
    }
}
