//! Cursor placement and blink timing.
//!
//! The cursor has no layout of its own: it is a measure-only layout call over the
//! same visible text the draw pass used, one offset further.

use crate::layout::engine::measure;
use crate::layout::metrics::Font;
use crate::model::{LayoutError, PenPosition, PixelRect, Viewport};
use std::time::Duration;

/// Default blink cycle.
pub const DEFAULT_BLINK_PERIOD: Duration = Duration::from_secs(1);

/// Locate the cursor after `cursor_offset` characters of `visible`.
///
/// # Errors
///
/// Any [`LayoutError`] the measure pass raises.
pub fn resolve_cursor(
    visible: &str,
    viewport: &Viewport,
    font: &Font,
    cursor_offset: usize,
) -> Result<PixelRect, LayoutError> {
    let result = measure(visible, viewport, font, Some(cursor_offset))?;
    Ok(cursor_rect(result.pen, font))
}

/// Cursor rectangle sitting on the baseline at `pen`: one space wide, 80% of a line tall.
pub fn cursor_rect(pen: PenPosition, font: &Font) -> PixelRect {
    let height = font.cursor_height();
    PixelRect::new(
        pen.x,
        pen.y.saturating_sub(height),
        font.space_width(),
        height,
    )
}

/// Blink timing. The cursor shows during the second half of every period.
///
/// The state is derived from elapsed time rather than stored, so the frame loop
/// just passes its clock reading in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blink {
    period: Duration,
}

impl Blink {
    /// Blink with the given period (at least 1 ms).
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
        }
    }

    /// The blink period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// True when the cursor is drawn at `elapsed`.
    pub fn is_on(&self, elapsed: Duration) -> bool {
        let period = self.period.as_millis();
        elapsed.as_millis() % period > period / 2
    }
}

impl Default for Blink {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_PERIOD)
    }
}
