//! Glyph metrics and the fitted font handed to the layout engine.

use std::fmt;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// Extra pixels added to the sized height to get the distance between baselines.
pub const LINE_PADDING_PX: u32 = 2;

/// Cursor height as a percentage of the line spacing.
pub const CURSOR_HEIGHT_PERCENT: u32 = 80;

/// Source of pixel metrics for a monospace font at a given size.
///
/// This is the seam to the font rasterizer. The layout engine only ever asks for
/// string widths, the sized height and the descent.
pub trait MetricsProvider: Send + Sync + fmt::Debug {
    /// Pixel width of `text` rendered at `size`.
    fn text_width(&self, text: &str, size: u16) -> u32;

    /// Height of a line of glyphs at `size`, without padding.
    fn sized_height(&self, size: u16) -> u32;

    /// Pixels the glyphs extend below the baseline at `size`.
    fn descent(&self, size: u16) -> u32;
}

/// Metrics of an idealized monospace font.
///
/// Every column advances by `round(size * advance_ratio)` pixels (at least 1); wide
/// characters take two columns as reported by `unicode-width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    advance_ratio: f32,
    height_ratio: f32,
    descent_ratio: f32,
}

impl MonospaceMetrics {
    /// Create metrics from per-size ratios.
    pub fn new(advance_ratio: f32, height_ratio: f32, descent_ratio: f32) -> Self {
        Self {
            advance_ratio,
            height_ratio,
            descent_ratio,
        }
    }

    /// Advance of one column at `size`.
    pub fn advance(&self, size: u16) -> u32 {
        scaled(size, self.advance_ratio).max(1)
    }
}

impl Default for MonospaceMetrics {
    /// Proportions close to FreeMono: 0.6 em advance, 1.2 em line, 0.25 em descent.
    fn default() -> Self {
        Self::new(0.6, 1.2, 0.25)
    }
}

impl MetricsProvider for MonospaceMetrics {
    fn text_width(&self, text: &str, size: u16) -> u32 {
        let columns = u32::try_from(text.width()).unwrap_or(u32::MAX);
        columns.saturating_mul(self.advance(size))
    }

    fn sized_height(&self, size: u16) -> u32 {
        scaled(size, self.height_ratio).max(1)
    }

    fn descent(&self, size: u16) -> u32 {
        scaled(size, self.descent_ratio)
    }
}

fn scaled(size: u16, ratio: f32) -> u32 {
    (f32::from(size) * ratio).round().max(0.0) as u32
}

/// A font chosen for one render pass: family, size and the metrics behind it.
#[derive(Clone)]
pub struct Font {
    family: String,
    size: u16,
    metrics: Arc<dyn MetricsProvider>,
}

impl Font {
    /// Create a font at `size` backed by `metrics`.
    pub fn new(family: impl Into<String>, size: u16, metrics: Arc<dyn MetricsProvider>) -> Self {
        Self {
            family: family.into(),
            size,
            metrics,
        }
    }

    /// Family name, as requested from the fitter.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Font size.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Pixel width of `text`.
    pub fn text_width(&self, text: &str) -> u32 {
        self.metrics.text_width(text, self.size)
    }

    /// Width of one space glyph; also the cursor width.
    pub fn space_width(&self) -> u32 {
        self.text_width(" ")
    }

    /// Distance between two baselines.
    pub fn line_spacing(&self) -> u32 {
        self.metrics.sized_height(self.size) + LINE_PADDING_PX
    }

    /// Pixels below the baseline.
    pub fn descent(&self) -> u32 {
        self.metrics.descent(self.size)
    }

    /// Cursor rectangle height.
    pub fn cursor_height(&self) -> u32 {
        self.line_spacing() * CURSOR_HEIGHT_PERCENT / 100
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.family)
            .field("size", &self.size)
            .field("line_spacing", &self.line_spacing())
            .field("space_width", &self.space_width())
            .finish()
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.size == other.size
            && self.line_spacing() == other.line_spacing()
            && self.space_width() == other.space_width()
    }
}
