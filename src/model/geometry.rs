//! Pixel geometry shared by the font fitter, the layout engine and the canvas.

use crate::model::error::LayoutError;

/// Four-sided margin in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margin {
    /// Pixels above the first line.
    pub top: u32,
    /// Pixels left of every line.
    pub left: u32,
    /// Pixels right of every line.
    pub right: u32,
    /// Pixels below the last line.
    pub bottom: u32,
}

impl Margin {
    /// No margin at all.
    pub const ZERO: Self = Self {
        top: 0,
        left: 0,
        right: 0,
        bottom: 0,
    };

    /// Create a margin from its four sides (top, left, right, bottom).
    pub fn new(top: u32, left: u32, right: u32, bottom: u32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Same margin on every side.
    pub fn uniform(px: u32) -> Self {
        Self::new(px, px, px, px)
    }

    /// Margins proportional to the screen: 1/40 of the height above and below,
    /// 1/20 of the width left and right.
    pub fn proportional(width: u32, height: u32) -> Self {
        let vertical = height / 40;
        let horizontal = width / 20;
        Self::new(vertical, horizontal, horizontal, vertical)
    }
}

/// The pixel surface a page is laid out on.
///
/// Passed explicitly into font fitting and layout. Construction does not validate the
/// usable area; [`Viewport::ensure_usable`] does, and both consumers call it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    margin: Margin,
}

impl Viewport {
    /// Create a viewport of `width x height` pixels with the given margin.
    pub fn new(width: u32, height: u32, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Full width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Full height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Margin around the usable area.
    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Width minus left and right margins (saturating at 0).
    pub fn usable_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin.left.saturating_add(self.margin.right))
    }

    /// Height minus top and bottom margins (saturating at 0).
    pub fn usable_height(&self) -> u32 {
        self.height
            .saturating_sub(self.margin.top.saturating_add(self.margin.bottom))
    }

    /// X coordinate where every line starts.
    pub fn content_left(&self) -> u32 {
        self.margin.left
    }

    /// Y coordinate of the top of the usable area.
    pub fn content_top(&self) -> u32 {
        self.margin.top
    }

    /// X coordinate no glyph may pass.
    pub fn content_right(&self) -> u32 {
        self.margin.left + self.usable_width()
    }

    /// Y coordinate no descender may pass.
    pub fn content_bottom(&self) -> u32 {
        self.margin.top + self.usable_height()
    }

    /// Fail with [`LayoutError::EmptyViewport`] unless both usable dimensions are positive.
    pub fn ensure_usable(&self) -> Result<(), LayoutError> {
        if self.usable_width() == 0 || self.usable_height() == 0 {
            return Err(LayoutError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Requested character grid (`columns x rows`) a font is fitted to.
///
/// Only the font fitter reads it; text is free to wrap differently afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    /// Characters per line.
    pub columns: u16,
    /// Lines per page.
    pub rows: u16,
}

impl PageGeometry {
    /// A classic VT100 screen.
    pub const VT100: Self = Self {
        columns: 80,
        rows: 24,
    };

    /// Create a page geometry.
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::new(20, 6)
    }
}

/// Pen position in pixels. `y` is the baseline of the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PenPosition {
    /// Horizontal position where the next glyph starts.
    pub x: u32,
    /// Baseline of the current line.
    pub y: u32,
}

impl PenPosition {
    /// Create a pen position.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Create a rectangle from its top-left corner and size.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when `(px, py)` lies inside the rectangle (right/bottom edges exclusive).
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Center point, rounded down.
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Size of one terminal cell in pixels.
///
/// The terminal canvas maps the pixel plane onto cells of this size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    /// Cell width in pixels (>= 1).
    pub width_px: u32,
    /// Cell height in pixels (>= 1).
    pub height_px: u32,
}

impl CellSize {
    /// Create a cell size, clamping both sides to at least one pixel.
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px: width_px.max(1),
            height_px: height_px.max(1),
        }
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_margin_matches_screen_fractions() {
        let margin = Margin::proportional(1200, 800);
        assert_eq!(margin, Margin::new(20, 60, 60, 20));
    }

    #[test]
    fn usable_area_subtracts_margins() {
        let viewport = Viewport::new(640, 384, Margin::proportional(640, 384));
        assert_eq!(viewport.usable_width(), 576);
        assert_eq!(viewport.usable_height(), 366);
        assert_eq!(viewport.content_left(), 32);
        assert_eq!(viewport.content_right(), 608);
        assert_eq!(viewport.content_top(), 9);
        assert_eq!(viewport.content_bottom(), 375);
    }

    #[test]
    fn oversized_margins_make_viewport_unusable() {
        let viewport = Viewport::new(100, 100, Margin::new(0, 60, 60, 0));
        assert_eq!(viewport.usable_width(), 0);
        assert_eq!(
            viewport.ensure_usable(),
            Err(LayoutError::EmptyViewport {
                width: 100,
                height: 100
            })
        );
    }

    #[test]
    fn zero_height_viewport_is_unusable() {
        let viewport = Viewport::new(100, 0, Margin::ZERO);
        assert!(viewport.ensure_usable().is_err());
    }

    #[test]
    fn default_page_is_twenty_by_six() {
        assert_eq!(PageGeometry::default(), PageGeometry::new(20, 6));
    }

    #[test]
    fn rect_contains_is_edge_exclusive() {
        let rect = PixelRect::new(10, 10, 5, 5);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(14, 14));
        assert!(!rect.contains(15, 14));
        assert!(!rect.contains(9, 12));
    }

    #[test]
    fn cell_size_never_collapses_to_zero() {
        assert_eq!(CellSize::new(0, 0), CellSize::new(1, 1));
    }
}
