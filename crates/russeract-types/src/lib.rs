//! Plain data types for the russeract Tesseract bindings.
//!
//! This crate defines the enums, geometry and result types that flow between
//! the OCR engine and callers. It carries no native code, so recorded
//! results can be stored, shipped and replayed anywhere.

mod geometry;
mod item;
mod level;
mod mode;
mod page;

pub use geometry::*;
pub use item::*;
pub use level::*;
pub use mode::*;
pub use page::*;
