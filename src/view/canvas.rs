//! Render targets for the layout engine.
//!
//! The layout engine works in pixels. [`TerminalCanvas`] maps that pixel plane onto
//! a ratatui [`Buffer`], one cell per `CellSize` block of pixels.

use crate::layout::metrics::Font;
use crate::model::{CellSize, PenPosition, PixelRect};
use ratatui::buffer::Buffer;
use ratatui::style::Color;

/// Surface the layout engine emits glyphs to.
pub trait Canvas {
    /// Fill the whole surface with `color`, removing all glyphs.
    fn clear(&mut self, color: Color);

    /// Draw `text` starting at `baseline` (pen position; `y` is the baseline).
    fn draw_text(&mut self, baseline: PenPosition, text: &str, font: &Font, color: Color);

    /// Fill `rect` with `color`, keeping any glyphs inside it.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);
}

/// Canvas over a ratatui buffer.
pub struct TerminalCanvas<'a> {
    buffer: &'a mut Buffer,
    cell: CellSize,
}

impl<'a> TerminalCanvas<'a> {
    /// Wrap `buffer`, treating each of its cells as `cell` pixels.
    pub fn new(buffer: &'a mut Buffer, cell: CellSize) -> Self {
        Self { buffer, cell }
    }

    /// Cell column holding pixel column `px`.
    fn column(&self, px: u32) -> u16 {
        u16::try_from(px / self.cell.width_px).unwrap_or(u16::MAX)
    }

    /// Cell row holding pixel row `py`.
    fn row(&self, py: u32) -> u16 {
        u16::try_from(py / self.cell.height_px).unwrap_or(u16::MAX)
    }

    fn cell_mut(&mut self, column: u16, row: u16) -> Option<&mut ratatui::buffer::Cell> {
        let area = self.buffer.area;
        if column >= area.width || row >= area.height {
            return None;
        }
        self.buffer.cell_mut((area.x + column, area.y + row))
    }
}

impl Canvas for TerminalCanvas<'_> {
    fn clear(&mut self, color: Color) {
        let area = self.buffer.area;
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_bg(color);
                }
            }
        }
    }

    fn draw_text(&mut self, baseline: PenPosition, text: &str, font: &Font, color: Color) {
        // A glyph lands in the cell holding the center of its em box.
        let row = self.row(baseline.y.saturating_sub(font.line_spacing() / 2));
        let mut x = baseline.x;
        let mut utf8 = [0u8; 4];
        for ch in text.chars() {
            let advance = font.text_width(ch.encode_utf8(&mut utf8));
            let column = self.column(x + advance / 2);
            if !ch.is_whitespace() {
                if let Some(cell) = self.cell_mut(column, row) {
                    cell.set_char(ch).set_fg(color);
                }
            }
            x += advance;
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let first_column = self.column(rect.x);
        let last_column = self.column(rect.x + rect.width - 1);
        let first_row = self.row(rect.y);
        let last_row = self.row(rect.y + rect.height - 1);
        let cell = self.cell;

        let mut filled = false;
        for row in first_row..=last_row {
            for column in first_column..=last_column {
                let center_x = u32::from(column) * cell.width_px + cell.width_px / 2;
                let center_y = u32::from(row) * cell.height_px + cell.height_px / 2;
                if rect.contains(center_x, center_y) {
                    if let Some(target) = self.cell_mut(column, row) {
                        target.set_bg(color);
                        filled = true;
                    }
                }
            }
        }

        // Rectangles smaller than a cell still get one cell
        if !filled {
            let (cx, cy) = rect.center();
            let (column, row) = (self.column(cx), self.row(cy));
            if let Some(target) = self.cell_mut(column, row) {
                target.set_bg(color);
            }
        }
    }
}
