//! Shared helpers for whitebox tests.
//!
//! Wraps `FrameLoop<TestBackend, ScriptedKeys, ManualClock>` construction and offers
//! a recording canvas and narrator, so tests read as scenarios.

use crate::config::RenderConfig;
use crate::layout::metrics::{Font, MonospaceMetrics};
use crate::model::{PenPosition, PixelRect};
use crate::narration::{NarrationError, Narrator};
use crate::view::{Canvas, FrameLoop, ManualClock, ScriptedKeys};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Color;
use ratatui::Terminal;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Loop type every whitebox scenario runs on.
pub type TestLoop = FrameLoop<TestBackend, ScriptedKeys, ManualClock>;

/// Frame loop on an 80x24 test terminal with default render settings.
///
/// The clock starts in the "on" half of the blink cycle and steps 33 ms per tick.
pub fn test_loop(keys: ScriptedKeys) -> TestLoop {
    test_loop_sized(80, 24, keys)
}

/// Frame loop on a `width x height` test terminal.
pub fn test_loop_sized(width: u16, height: u16, keys: ScriptedKeys) -> TestLoop {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    FrameLoop::with_parts(
        terminal,
        keys,
        ManualClock::starting_at(Duration::from_millis(600), Duration::from_millis(33)),
        RenderConfig::default(),
        Arc::new(MonospaceMetrics::default()),
    )
}

/// Font with advance 6, line spacing 14 and descent 3.
pub fn small_font() -> Font {
    Font::new("Test Mono", 10, Arc::new(MonospaceMetrics::default()))
}

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Empty lines are removed to keep snapshots clean.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Glyphs of each non-empty row, with the gaps between cells removed.
pub fn glyph_rows(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area();
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .filter(|symbol| !symbol.trim().is_empty())
                .collect::<String>()
        })
        .filter(|row| !row.is_empty())
        .collect()
}

/// Cells whose background is `color`, as `(column, row)`.
pub fn cells_with_bg(buffer: &Buffer, color: Color) -> Vec<(u16, u16)> {
    let area = buffer.area();
    let mut cells = Vec::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if buffer[(x, y)].bg == color {
                cells.push((x, y));
            }
        }
    }
    cells
}

/// Canvas that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    /// `(pen, text)` per `draw_text` call.
    pub words: Vec<(PenPosition, String)>,
    /// Rectangles passed to `fill_rect`.
    pub fills: Vec<PixelRect>,
    /// Number of `clear` calls.
    pub clears: usize,
}

impl RecordingCanvas {
    /// One line per drawn word: `(x, y) "text"`.
    pub fn transcript(&self) -> String {
        self.words
            .iter()
            .map(|(pen, text)| format!("({}, {}) {:?}", pen.x, pen.y, text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, _color: Color) {
        self.clears += 1;
    }

    fn draw_text(&mut self, baseline: PenPosition, text: &str, _font: &Font, _color: Color) {
        self.words.push((baseline, text.to_string()));
    }

    fn fill_rect(&mut self, rect: PixelRect, _color: Color) {
        self.fills.push(rect);
    }
}

/// Narrator that remembers what it was asked to say.
#[derive(Debug, Default)]
pub struct RecordingNarrator {
    spoken: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingNarrator {
    /// A narrator whose every call fails after recording the text.
    pub fn failing() -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Texts narrated so far, in order.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl Narrator for RecordingNarrator {
    fn narrate(&self, text: &str) -> Result<(), NarrationError> {
        self.spoken.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(NarrationError::Spawn {
                program: "recording".into(),
                source: std::io::Error::other("narration disabled"),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
