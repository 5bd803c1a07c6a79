//! Fits a monospace font size to a requested character grid.

use crate::layout::metrics::{Font, MetricsProvider, LINE_PADDING_PX};
use crate::model::{LayoutError, PageGeometry, Viewport};
use std::sync::Arc;
use tracing::{info, trace};

/// Largest font size tried.
pub const MAX_FONT_SIZE: u16 = 100;

/// Smallest acceptable font size; below this fitting fails.
pub const MIN_FONT_SIZE: u16 = 2;

/// Safety pad added to the reference glyph width, per character.
const WIDTH_PAD_PX: u32 = 1;

/// Find the largest font size that keeps `geometry` inside the usable area of `viewport`.
///
/// Candidates run from [`MAX_FONT_SIZE`] down to [`MIN_FONT_SIZE`]. A size fits when
/// `(space_width + 1) * columns <= usable_width` and
/// `(sized_height + 2) * rows <= usable_height`; the pads absorb rasterizer rounding.
///
/// # Errors
///
/// - [`LayoutError::InvalidPageGeometry`] for a grid with zero columns or rows
/// - [`LayoutError::EmptyViewport`] when the margins eat the whole viewport
/// - [`LayoutError::FontFit`] when no size down to the minimum fits
pub fn fit_font(
    metrics: Arc<dyn MetricsProvider>,
    viewport: &Viewport,
    geometry: PageGeometry,
    family: &str,
) -> Result<Font, LayoutError> {
    if geometry.columns == 0 || geometry.rows == 0 {
        return Err(LayoutError::InvalidPageGeometry {
            columns: geometry.columns,
            rows: geometry.rows,
        });
    }
    viewport.ensure_usable()?;

    let usable_width = viewport.usable_width();
    let usable_height = viewport.usable_height();
    let columns = u32::from(geometry.columns);
    let rows = u32::from(geometry.rows);

    for size in (MIN_FONT_SIZE..=MAX_FONT_SIZE).rev() {
        let ref_width = metrics.text_width(" ", size) + WIDTH_PAD_PX;
        let ref_height = metrics.sized_height(size) + LINE_PADDING_PX;

        if ref_width.saturating_mul(columns) > usable_width
            || ref_height.saturating_mul(rows) > usable_height
        {
            trace!(size, ref_width, ref_height, "font size too large for page");
            continue;
        }

        info!(
            size,
            family,
            columns = geometry.columns,
            rows = geometry.rows,
            ref_width,
            ref_height,
            "Fitted font to page"
        );
        return Ok(Font::new(family, size, metrics));
    }

    Err(LayoutError::FontFit {
        columns: geometry.columns,
        rows: geometry.rows,
        min_size: MIN_FONT_SIZE,
        usable_width,
        usable_height,
    })
}
