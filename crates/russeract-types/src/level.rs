//! Result granularity levels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Granularity at which a result cursor groups recognized text.
///
/// Discriminants match the engine's `RIL_*` constants. Levels are ordered
/// from coarsest to finest, so `Block < Symbol`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PageIteratorLevel {
    /// Block of text, image or separator line.
    Block = 0,
    /// Paragraph within a block.
    Para = 1,
    /// Line within a paragraph.
    Textline = 2,
    /// Word within a text line.
    Word = 3,
    /// Symbol (character) within a word.
    Symbol = 4,
}

impl PageIteratorLevel {
    /// All levels, coarsest first.
    pub const ALL: [PageIteratorLevel; 5] = [
        PageIteratorLevel::Block,
        PageIteratorLevel::Para,
        PageIteratorLevel::Textline,
        PageIteratorLevel::Word,
        PageIteratorLevel::Symbol,
    ];

    /// The next coarser level, or `None` for `Block`.
    pub fn coarser(self) -> Option<Self> {
        match self {
            PageIteratorLevel::Block => None,
            PageIteratorLevel::Para => Some(PageIteratorLevel::Block),
            PageIteratorLevel::Textline => Some(PageIteratorLevel::Para),
            PageIteratorLevel::Word => Some(PageIteratorLevel::Textline),
            PageIteratorLevel::Symbol => Some(PageIteratorLevel::Word),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PageIteratorLevel::Block => "block",
            PageIteratorLevel::Para => "para",
            PageIteratorLevel::Textline => "textline",
            PageIteratorLevel::Word => "word",
            PageIteratorLevel::Symbol => "symbol",
        }
    }
}

impl std::fmt::Display for PageIteratorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PageIteratorLevel> for i32 {
    fn from(level: PageIteratorLevel) -> Self {
        level as i32
    }
}

impl TryFrom<i32> for PageIteratorLevel {
    type Error = InvalidValue;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PageIteratorLevel::Block),
            1 => Ok(PageIteratorLevel::Para),
            2 => Ok(PageIteratorLevel::Textline),
            3 => Ok(PageIteratorLevel::Word),
            4 => Ok(PageIteratorLevel::Symbol),
            _ => Err(InvalidValue::new("page iterator level", value)),
        }
    }
}

/// A raw engine integer that does not name any enum variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct InvalidValue {
    /// Name of the enum being converted.
    pub kind: &'static str,
    /// Rejected raw value.
    pub value: i32,
}

impl InvalidValue {
    pub fn new(kind: &'static str, value: i32) -> Self {
        Self { kind, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_ordered_coarse_to_fine() {
        assert!(PageIteratorLevel::Block < PageIteratorLevel::Para);
        assert!(PageIteratorLevel::Word < PageIteratorLevel::Symbol);

        let mut sorted = PageIteratorLevel::ALL;
        sorted.sort();
        assert_eq!(sorted, PageIteratorLevel::ALL);
    }

    #[test]
    fn test_raw_conversion() {
        for level in PageIteratorLevel::ALL {
            assert_eq!(PageIteratorLevel::try_from(i32::from(level)), Ok(level));
        }

        let err = PageIteratorLevel::try_from(5).unwrap_err();
        assert_eq!(err.value, 5);
        assert_eq!(err.to_string(), "invalid page iterator level: 5");
    }

    #[test]
    fn test_coarser_chain_ends_at_block() {
        let mut level = PageIteratorLevel::Symbol;
        let mut steps = 0;
        while let Some(next) = level.coarser() {
            level = next;
            steps += 1;
        }
        assert_eq!(level, PageIteratorLevel::Block);
        assert_eq!(steps, 4);
    }

    #[test]
    fn test_level_json() {
        let json = serde_json::to_string(&PageIteratorLevel::Textline).unwrap();
        assert_eq!(json, "\"textline\"");

        let level: PageIteratorLevel = serde_json::from_str("\"para\"").unwrap();
        assert_eq!(level, PageIteratorLevel::Para);
    }
}
