//! Error types for xask.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose cleanly via `?` and `From` conversions up to `main`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all domain-specific failures
//!   - [`LayoutError`] - Font fitting and text layout failures (viewport too small, word
//!     too wide, text overflow)
//!   - [`crate::view::TuiError`] - Terminal/frame loop failures
//!   - [`crate::narration::NarrationError`] - Text-to-speech engine selection failures
//!   - [`crate::config::ConfigError`] - Configuration file failures
//!   - [`crate::logging::LoggingError`] - Tracing subscriber initialization failures
//!
//! # Error Recovery Strategy
//!
//! Layout errors are **fatal**: the page cannot be shown at the fitted font size and there
//! is no automatic font-size downgrade. The only non-fatal layout condition is
//! [`LayoutError::OffsetMismatch`], which is formatted into a `warn!` diagnostic and never
//! returned from the layout engine.

use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All domain-specific error types convert to `AppError` via `From`, enabling clean error
/// propagation with the `?` operator from the session layer up to `main`.
///
/// # Examples
///
/// ```
/// use xask::model::error::{AppError, LayoutError};
///
/// fn show() -> Result<(), AppError> {
///     Err::<(), _>(LayoutError::EmptyViewport { width: 0, height: 0 })?;
///     Ok(())
/// }
/// assert!(matches!(show(), Err(AppError::Layout(_))));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// The page could not be fitted or laid out in the viewport.
    ///
    /// **Recovery**: None. The screen is aborted and the error is reported on stderr after
    /// the terminal has been restored.
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Terminal or frame loop error.
    ///
    /// Raised when the terminal cannot be initialized, drawn to, or polled for input.
    /// Without a working terminal nothing can be shown, so this is fatal.
    #[error("Terminal error: {0}")]
    Tui(#[from] crate::view::TuiError),

    /// The requested text-to-speech engine is unknown or not installed.
    ///
    /// Checked once at start-up, before any screen is shown.
    #[error("Narration error: {0}")]
    Narration(#[from] crate::narration::NarrationError),

    /// The configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Reading the message from stdin or running an answer command failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while fitting a font or laying out a page.
///
/// Every variant carries enough pixel context to explain why the page did not fit, so the
/// message printed after the terminal is restored is actionable.
///
/// # Design Notes
///
/// `OffsetMismatch` is listed here so the diagnostic has a single, typed representation,
/// but the layout engine only ever logs it. Callers never have to match on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The margins consume the whole viewport.
    ///
    /// **When this occurs**: The terminal is too small for its own proportional margins,
    /// or a caller built a [`crate::model::Viewport`] with oversized margins.
    ///
    /// # Examples
    ///
    /// ```
    /// use xask::model::error::LayoutError;
    ///
    /// let err = LayoutError::EmptyViewport { width: 10, height: 0 };
    /// assert!(err.to_string().contains("10x0"));
    /// ```
    #[error("Viewport {width}x{height} px has no usable area left after margins")]
    EmptyViewport {
        /// Full viewport width in pixels.
        width: u32,
        /// Full viewport height in pixels.
        height: u32,
    },

    /// The requested page geometry has zero columns or zero rows.
    #[error("Page geometry must have at least one column and one row (got {columns}x{rows})")]
    InvalidPageGeometry {
        /// Requested columns.
        columns: u16,
        /// Requested rows.
        rows: u16,
    },

    /// No font size at or above the minimum fits the requested page geometry.
    ///
    /// **When this occurs**: Font fitting, once per screen, before anything is drawn. The
    /// viewport is too small for the requested `columns x rows` grid.
    ///
    /// **Recovery**: None. Use a bigger terminal or a smaller page geometry.
    #[error(
        "No font size >= {min_size} fits a {columns}x{rows} page into {usable_width}x{usable_height} px"
    )]
    FontFit {
        /// Requested columns.
        columns: u16,
        /// Requested rows.
        rows: u16,
        /// Smallest font size that was tried.
        min_size: u16,
        /// Usable viewport width in pixels.
        usable_width: u32,
        /// Usable viewport height in pixels.
        usable_height: u32,
    },

    /// A single word is wider than a whole line.
    ///
    /// Words are never hyphenated or broken by character, so a word that does not fit on an
    /// empty line cannot be laid out.
    #[error("Word {word:?} is {overflow_px} px too wide for the viewport")]
    WordTooWide {
        /// The word (including a re-attached trailing space) that did not fit.
        word: String,
        /// How many pixels it sticks out past the right edge.
        overflow_px: u32,
    },

    /// The text runs past the bottom edge of the usable area.
    ///
    /// There is no scrolling or pagination. Callers must split text that does not fit.
    #[error("Text overflows the viewport: baseline {baseline} + descent {descent} > bottom edge {bottom}")]
    TextOverflow {
        /// Baseline of the line that overflowed.
        baseline: u32,
        /// Font descent below the baseline.
        descent: u32,
        /// Bottom edge of the usable area.
        bottom: u32,
    },

    /// The stream offset reached by the layout differs from the requested stop offset.
    ///
    /// Diagnostic only: logged at `warn` level, never returned. A mismatch means the
    /// paragraph/space accounting drifted from the character count of the text.
    #[error("Layout stopped at stream offset {actual} but the requested stop offset was {expected}")]
    OffsetMismatch {
        /// Requested stop offset.
        expected: i64,
        /// Stream offset actually reached.
        actual: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_error_converts_into_app_error() {
        fn fails() -> Result<(), AppError> {
            Err::<(), _>(LayoutError::InvalidPageGeometry {
                columns: 0,
                rows: 6,
            })?;
            Ok(())
        }

        let err = fails().unwrap_err();
        assert!(matches!(err, AppError::Layout(_)));
        assert!(err.to_string().contains("0x6"));
    }

    #[test]
    fn font_fit_error_names_the_grid_and_area() {
        let err = LayoutError::FontFit {
            columns: 80,
            rows: 24,
            min_size: 2,
            usable_width: 100,
            usable_height: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("80x24"), "got: {msg}");
        assert!(msg.contains("100x50"), "got: {msg}");
    }

    #[test]
    fn word_too_wide_quotes_the_word() {
        let err = LayoutError::WordTooWide {
            word: "supercalifragilistic".to_string(),
            overflow_px: 12,
        };
        assert!(err.to_string().contains("\"supercalifragilistic\""));
    }

    #[test]
    fn io_error_converts_into_app_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
