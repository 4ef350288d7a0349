//! Bounding box geometry.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in source image pixels.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Left edge X coordinate.
    pub left: i32,
    /// Top edge Y coordinate.
    pub top: i32,
    /// Width of the box.
    pub width: i32,
    /// Height of the box.
    pub height: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build a box from the engine's `(left, top, right, bottom)` corners.
    pub fn from_corners(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Right edge X coordinate (exclusive).
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    /// Bottom edge Y coordinate (exclusive).
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Whether the box has a non-negative origin and a positive area.
    pub fn is_valid(&self) -> bool {
        self.left >= 0 && self.top >= 0 && self.width > 0 && self.height > 0
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::from_corners(left, top, right, bottom)
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Box<left:{},top:{},width:{},height:{}>",
            self.left, self.top, self.width, self.height
        )
    }
}
