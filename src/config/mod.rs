//! Configuration module.

pub mod loader;

pub use loader::{resolve_config, ConfigError, ConfigFile, ResolvedConfig};

use crate::model::{CellSize, PageGeometry};
use crate::view::cursor::DEFAULT_BLINK_PERIOD;
use ratatui::style::Color;
use std::str::FromStr;
use std::time::Duration;

/// Screen colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Background fill.
    pub background: Color,
    /// Glyphs.
    pub text: Color,
    /// Cursor rectangle.
    pub cursor: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: Color::Black,
            text: Color::White,
            cursor: Color::Rgb(0, 128, 0),
        }
    }
}

/// Immutable render settings handed to the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Character grid the font is fitted to.
    pub page: PageGeometry,
    /// Font family name.
    pub font_family: String,
    /// Ticks per second.
    pub fps: u32,
    /// Cursor blink cycle.
    pub blink_period: Duration,
    /// Screen colors.
    pub colors: ColorScheme,
    /// Pixels per terminal cell, used when the terminal does not report its size.
    pub cell: CellSize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page: PageGeometry::default(),
            font_family: "FreeMono, Monospace".to_string(),
            fps: 30,
            blink_period: DEFAULT_BLINK_PERIOD,
            colors: ColorScheme::default(),
            cell: CellSize::default(),
        }
    }
}

impl RenderConfig {
    /// Build render settings from a resolved config, parsing its colors.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidColor`] for a color ratatui cannot parse.
    pub fn from_resolved(config: &ResolvedConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            page: PageGeometry::new(config.page_columns, config.page_rows),
            font_family: config.font_family.clone(),
            fps: config.fps.max(1),
            blink_period: DEFAULT_BLINK_PERIOD,
            colors: ColorScheme {
                background: parse_color("background_color", &config.background_color)?,
                text: parse_color("text_color", &config.text_color)?,
                cursor: parse_color("cursor_color", &config.cursor_color)?,
            },
            cell: CellSize::new(config.cell_width_px, config.cell_height_px),
        })
    }
}

/// Parse a color name, index or `#rrggbb` value.
///
/// # Errors
///
/// [`ConfigError::InvalidColor`] naming `key`.
pub fn parse_color(key: &'static str, value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value).map_err(|_| ConfigError::InvalidColor {
        key,
        value: value.to_string(),
    })
}
