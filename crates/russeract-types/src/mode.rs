//! Engine configuration enums.

use serde::{Deserialize, Serialize};

use crate::level::InvalidValue;

/// Page segmentation mode.
///
/// Discriminants match the engine's `PSM_*` constants. The engine's
/// `PSM_COUNT` sentinel is not a mode and has no variant here.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PageSegMode {
    /// Orientation and script detection only.
    OsdOnly = 0,
    /// Automatic page segmentation with orientation and script detection.
    AutoOsd = 1,
    /// Automatic page segmentation, but no OSD or OCR.
    AutoOnly = 2,
    /// Fully automatic page segmentation, but no OSD.
    Auto = 3,
    /// Assume a single column of text of variable sizes.
    SingleColumn = 4,
    /// Assume a single uniform block of vertically aligned text.
    SingleBlockVertText = 5,
    /// Assume a single uniform block of text.
    #[default]
    SingleBlock = 6,
    /// Treat the image as a single text line.
    SingleLine = 7,
    /// Treat the image as a single word.
    SingleWord = 8,
    /// Treat the image as a single word in a circle.
    CircleWord = 9,
    /// Treat the image as a single character.
    SingleChar = 10,
    /// Find as much text as possible in no particular order.
    SparseText = 11,
    /// Sparse text with orientation and script detection.
    SparseTextOsd = 12,
    /// Treat the image as a single text line, bypassing Tesseract-specific hacks.
    RawLine = 13,
}

impl From<PageSegMode> for i32 {
    fn from(mode: PageSegMode) -> Self {
        mode as i32
    }
}

impl TryFrom<i32> for PageSegMode {
    type Error = InvalidValue;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        let mode = match value {
            0 => PageSegMode::OsdOnly,
            1 => PageSegMode::AutoOsd,
            2 => PageSegMode::AutoOnly,
            3 => PageSegMode::Auto,
            4 => PageSegMode::SingleColumn,
            5 => PageSegMode::SingleBlockVertText,
            6 => PageSegMode::SingleBlock,
            7 => PageSegMode::SingleLine,
            8 => PageSegMode::SingleWord,
            9 => PageSegMode::CircleWord,
            10 => PageSegMode::SingleChar,
            11 => PageSegMode::SparseText,
            12 => PageSegMode::SparseTextOsd,
            13 => PageSegMode::RawLine,
            _ => return Err(InvalidValue::new("page segmentation mode", value)),
        };
        Ok(mode)
    }
}

/// Recognition engine selection.
///
/// Discriminants match the engine's `OEM_*` constants.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OcrEngineMode {
    /// Legacy engine only. Deprecated upstream.
    TesseractOnly = 0,
    /// LSTM line recognizer only.
    LstmOnly = 1,
    /// LSTM with legacy fallback. Deprecated upstream.
    TesseractLstmCombined = 2,
    /// Infer the mode from the language config and command-line configs.
    #[default]
    Default = 3,
}

impl From<OcrEngineMode> for i32 {
    fn from(mode: OcrEngineMode) -> Self {
        mode as i32
    }
}

impl TryFrom<i32> for OcrEngineMode {
    type Error = InvalidValue;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OcrEngineMode::TesseractOnly),
            1 => Ok(OcrEngineMode::LstmOnly),
            2 => Ok(OcrEngineMode::TesseractLstmCombined),
            3 => Ok(OcrEngineMode::Default),
            _ => Err(InvalidValue::new("engine mode", value)),
        }
    }
}
