//! Word wrap with an optional stop offset.
//!
//! One entry point serves both the draw pass and the cursor pass so the two can
//! never disagree about where a character lands. The engine consumes the text as
//! a stream of characters: words with their re-attached trailing space, plus one
//! synthetic character per paragraph break.

use crate::layout::metrics::Font;
use crate::model::{LayoutError, PenPosition, Viewport};
use crate::view::canvas::Canvas;
use ratatui::style::Color;
use std::fmt;
use tracing::{debug, trace, warn};

/// What a layout call does besides measuring.
pub enum Pass<'a> {
    /// Only track the pen.
    Measure,
    /// Also emit every placed word to `canvas` in `color`.
    Draw {
        /// Render target.
        canvas: &'a mut dyn Canvas,
        /// Glyph color.
        color: Color,
    },
}

impl Pass<'_> {
    fn is_draw(&self) -> bool {
        matches!(self, Pass::Draw { .. })
    }
}

impl fmt::Debug for Pass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Measure => f.write_str("Measure"),
            Pass::Draw { color, .. } => f.debug_struct("Draw").field("color", color).finish(),
        }
    }
}

/// Outcome of one layout call. Produced fresh per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutResult {
    /// Where the next glyph would go; `y` is the baseline.
    pub pen: PenPosition,
    /// Index of the last character consumed (-1 when nothing was consumed).
    pub stream_offset: i64,
    /// Stop offset the call ran to, after defaulting.
    pub stop_offset: i64,
    /// True when characters after the stop offset were left unconsumed.
    pub truncated: bool,
}

impl LayoutResult {
    /// Difference between the consumed stream and the requested stop.
    pub fn offset_drift(&self) -> i64 {
        self.stream_offset - self.stop_offset
    }
}

/// Lay out `text` on `viewport` and return the final pen position.
///
/// `stop_offset` is an inclusive character index; layout halts once the character
/// at that index has been consumed. `None` lays out the whole text.
///
/// Lines wrap at word boundaries. A word that does not fit on an empty line fails
/// with [`LayoutError::WordTooWide`]; a line whose descenders pass the bottom of
/// the usable area fails with [`LayoutError::TextOverflow`].
///
/// # Errors
///
/// [`LayoutError::EmptyViewport`], [`LayoutError::WordTooWide`] or
/// [`LayoutError::TextOverflow`].
pub fn layout(
    text: &str,
    viewport: &Viewport,
    font: &Font,
    stop_offset: Option<usize>,
    mut pass: Pass<'_>,
) -> Result<LayoutResult, LayoutError> {
    viewport.ensure_usable()?;

    let text_len = char_count(text);
    let stop = stop_offset.map_or(text_len - 1, to_i64);
    let left = viewport.content_left();
    let right = viewport.content_right();
    let bottom = viewport.content_bottom();
    let line_spacing = font.line_spacing();
    let descent = font.descent();

    let mut pen = PenPosition::new(left, viewport.content_top() + line_spacing);
    let mut stream: i64 = -1;
    let mut halted = false;

    let paragraphs: Vec<&str> = text.split('\n').collect();
    'paragraphs: for (index, paragraph) in paragraphs.iter().enumerate() {
        for word in paragraph_words(paragraph) {
            let word_len = char_count(&word);
            let word = if stream + word_len >= stop {
                halted = true;
                let keep = usize::try_from((stop - stream).clamp(0, word_len)).unwrap_or(0);
                trace!(word = %word, keep, stream, stop, "truncating word at stop offset");
                take_chars(&word, keep)
            } else {
                word
            };
            stream += char_count(&word);

            let width = font.text_width(&word);
            if pen.x + width > right && pen.x > left {
                pen = PenPosition::new(left, pen.y + line_spacing);
                trace!(word = %word, y = pen.y, "wrapped to next line");
            }
            if pen.x + width > right {
                return Err(LayoutError::WordTooWide {
                    word,
                    overflow_px: pen.x + width - right,
                });
            }
            if pen.y + descent > bottom {
                return Err(LayoutError::TextOverflow {
                    baseline: pen.y,
                    descent,
                    bottom,
                });
            }

            if let Pass::Draw { canvas, color } = &mut pass {
                if !word.is_empty() {
                    canvas.draw_text(pen, &word, font, *color);
                }
            }
            pen.x += width;

            if halted {
                break 'paragraphs;
            }
        }

        if index + 1 < paragraphs.len() {
            if stream >= stop {
                break;
            }
            pen = PenPosition::new(left, pen.y + line_spacing);
            stream += 1;
            if stream >= stop {
                break;
            }
        }
    }

    let truncated = stream < text_len - 1;
    let result = LayoutResult {
        pen,
        stream_offset: stream,
        stop_offset: stop,
        truncated,
    };

    if stop < text_len && result.offset_drift() != 0 {
        let mismatch = LayoutError::OffsetMismatch {
            expected: stop,
            actual: stream,
        };
        warn!(drift = result.offset_drift(), "{mismatch}");
    }

    debug!(
        draw = pass.is_draw(),
        x = pen.x,
        y = pen.y,
        stream,
        stop,
        truncated,
        "layout finished"
    );
    Ok(result)
}

/// Measure-only shorthand for [`layout`].
///
/// # Errors
///
/// Same as [`layout`].
pub fn measure(
    text: &str,
    viewport: &Viewport,
    font: &Font,
    stop_offset: Option<usize>,
) -> Result<LayoutResult, LayoutError> {
    layout(text, viewport, font, stop_offset, Pass::Measure)
}

/// Split a paragraph into the words the engine places, spaces re-attached.
///
/// Every word keeps one trailing space unless all later tokens on the line are
/// empty; empty tokens become a single space. The words' characters add up to the
/// paragraph's characters.
fn paragraph_words(paragraph: &str) -> Vec<String> {
    if paragraph.is_empty() {
        return Vec::new();
    }
    let mut tokens: Vec<&str> = paragraph.split(' ').collect();
    // A blank line of n spaces splits into n + 1 empty tokens
    if tokens.iter().all(|token| token.is_empty()) {
        tokens.pop();
    }

    let mut words = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        let later_text = tokens[index + 1..].iter().any(|t| !t.is_empty());
        let mut word = (*token).to_string();
        if later_text || word.is_empty() {
            word.push(' ');
        }
        words.push(word);
    }
    words
}

fn take_chars(word: &str, keep: usize) -> String {
    word.chars().take(keep).collect()
}

fn char_count(text: &str) -> i64 {
    to_i64(text.chars().count())
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
