//! Result tuples produced by a traversal.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// One recognized object at the traversal's granularity level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultItem {
    /// Location of the object in the source image.
    pub bbox: BoundingBox,
    /// Recognized UTF-8 text, including any trailing newline the engine adds.
    pub text: String,
    /// Engine confidence, 0 to 100.
    pub confidence: f32,
}

impl ResultItem {
    pub fn new(bbox: BoundingBox, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox,
            text: text.into(),
            confidence,
        }
    }
}

impl From<ResultItem> for (BoundingBox, String, f32) {
    fn from(item: ResultItem) -> Self {
        (item.bbox, item.text, item.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_tuple() {
        let item = ResultItem::new(BoundingBox::new(0, 0, 10, 10), "fox jumps over\n", 91.5);
        let (bbox, text, confidence) = item.into();
        assert_eq!(bbox.width, 10);
        assert_eq!(text, "fox jumps over\n");
        assert_eq!(confidence, 91.5);
    }

    #[test]
    fn test_item_json() {
        let item = ResultItem::new(BoundingBox::new(1, 2, 3, 4), "Hello,", 96.0);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"text\":\"Hello,\""));
        assert!(json.contains("\"bbox\":{\"left\":1"));

        let back: ResultItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
