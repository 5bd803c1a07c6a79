//! Terminal rendering and the reveal frame loop (impure shell)

pub mod canvas;
pub mod clock;
pub mod cursor;
pub mod input;

pub use canvas::{Canvas, TerminalCanvas};
pub use clock::{FixedRateClock, FrameClock, ManualClock};
pub use cursor::{cursor_rect, resolve_cursor, Blink};
pub use input::{CrosstermKeys, KeySource, ScriptedKeys};

use crate::config::{ColorScheme, RenderConfig};
use crate::layout::engine::{layout, Pass};
use crate::layout::font_fit::fit_font;
use crate::layout::metrics::{Font, MetricsProvider, MonospaceMetrics};
use crate::model::{CellSize, LayoutError, Margin, Page, Viewport};
use crate::state::{RevealController, RevealFrame};
use crossterm::{
    event::KeyCode,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Fitting or laying out the page failed
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// How a reveal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// A key other than Escape was pressed.
    Key(KeyCode),
    /// Escape (or Ctrl+C) was pressed.
    Cancelled,
    /// The page settled and no key was awaited.
    Completed,
}

impl RevealOutcome {
    /// The character of a `Key(Char(_))` outcome.
    pub fn key_char(&self) -> Option<char> {
        match self {
            RevealOutcome::Key(KeyCode::Char(c)) => Some(*c),
            _ => None,
        }
    }
}

/// Fixed-rate loop revealing one page per call.
///
/// Generic over backend, key source and clock so tests can drive it with
/// `TestBackend`, [`ScriptedKeys`] and [`ManualClock`].
pub struct FrameLoop<B, K, C>
where
    B: Backend,
    K: KeySource,
    C: FrameClock,
{
    terminal: Terminal<B>,
    keys: K,
    clock: C,
    config: RenderConfig,
    metrics: Arc<dyn MetricsProvider>,
    cell: CellSize,
}

impl FrameLoop<CrosstermBackend<Stdout>, CrosstermKeys, FixedRateClock> {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    ///
    /// The pixel size of a cell comes from the terminal when it reports one, else
    /// from `config.cell`. Call [`restore_terminal`] when done.
    pub fn new(config: RenderConfig) -> Result<Self, TuiError> {
        let cell = terminal_cell_size(config.cell);
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let clock = FixedRateClock::new(config.fps);
        info!(
            cell_width = cell.width_px,
            cell_height = cell.height_px,
            fps = config.fps,
            "Terminal initialized"
        );
        Ok(Self {
            terminal,
            keys: CrosstermKeys,
            clock,
            config,
            metrics: Arc::new(MonospaceMetrics::default()),
            cell,
        })
    }
}

impl<B, K, C> FrameLoop<B, K, C>
where
    B: Backend,
    K: KeySource,
    C: FrameClock,
{
    /// Assemble a loop from explicit parts. Cells are `config.cell` pixels.
    pub fn with_parts(
        terminal: Terminal<B>,
        keys: K,
        clock: C,
        config: RenderConfig,
        metrics: Arc<dyn MetricsProvider>,
    ) -> Self {
        let cell = config.cell;
        Self {
            terminal,
            keys,
            clock,
            config,
            metrics,
            cell,
        }
    }

    /// Pixel viewport covering the terminal, with proportional margins.
    pub fn viewport(&self) -> Result<Viewport, TuiError> {
        let size = self.terminal.size()?;
        let width = u32::from(size.width) * self.cell.width_px;
        let height = u32::from(size.height) * self.cell.height_px;
        Ok(Viewport::new(width, height, Margin::proportional(width, height)))
    }

    /// Fit the configured page geometry to the current viewport.
    pub fn fit(&self) -> Result<(Viewport, Font), TuiError> {
        let viewport = self.viewport()?;
        let font = fit_font(
            Arc::clone(&self.metrics),
            &viewport,
            self.config.page,
            &self.config.font_family,
        )?;
        Ok((viewport, font))
    }

    /// Reveal `page` from `start_offset`, one character per tick.
    ///
    /// Returns on the first key press, even mid-reveal. Without
    /// `wait_for_keypress` it also returns [`RevealOutcome::Completed`] once the
    /// settled page has been presented.
    pub fn run_reveal(
        &mut self,
        page: Page,
        start_offset: usize,
        wait_for_keypress: bool,
    ) -> Result<RevealOutcome, TuiError> {
        let (viewport, font) = self.fit()?;
        let blink = Blink::new(self.config.blink_period);
        let colors = self.config.colors;
        let cell = self.cell;

        let mut reveal = RevealController::new(page);
        reveal.start(start_offset);

        loop {
            if let Some(key) = self.keys.poll_key()? {
                if input::is_cancel(&key) {
                    info!(revealed = reveal.revealed(), "Reveal cancelled");
                    return Ok(RevealOutcome::Cancelled);
                }
                debug!(code = ?key.code, revealed = reveal.revealed(), "key pressed");
                return Ok(RevealOutcome::Key(key.code));
            }

            let blink_on = blink.is_on(self.clock.elapsed());
            let mut rendered = Ok(());
            self.terminal.draw(|frame| {
                let mut canvas = TerminalCanvas::new(frame.buffer_mut(), cell);
                rendered = render_reveal_frame(
                    &mut canvas,
                    &mut reveal,
                    &viewport,
                    &font,
                    colors,
                    blink_on,
                )
                .map(|_| ());
            })?;
            rendered?;

            if reveal.is_settled() && !wait_for_keypress {
                return Ok(RevealOutcome::Completed);
            }
            self.clock.wait_next_tick();
        }
    }

    /// The terminal, for inspecting the last frame.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// The key source.
    pub fn keys(&self) -> &K {
        &self.keys
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Render settings.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

/// Draw one tick onto `canvas` and advance `reveal`.
///
/// Clears, draws the visible prefix, advances the controller, then measures the
/// cursor over the same prefix and fills it when `blink_on`. Returns the frame
/// that was drawn.
pub fn render_reveal_frame(
    canvas: &mut dyn Canvas,
    reveal: &mut RevealController,
    viewport: &Viewport,
    font: &Font,
    colors: ColorScheme,
    blink_on: bool,
) -> Result<RevealFrame, LayoutError> {
    canvas.clear(colors.background);

    let frame = reveal.frame();
    layout(
        reveal.page().prefix(frame.visible_chars),
        viewport,
        font,
        Some(frame.draw_stop),
        Pass::Draw {
            canvas: &mut *canvas,
            color: colors.text,
        },
    )?;

    reveal.advance();

    let cursor = resolve_cursor(
        reveal.page().prefix(frame.visible_chars),
        viewport,
        font,
        frame.cursor_offset,
    )?;
    if blink_on {
        canvas.fill_rect(cursor, colors.cursor);
    }
    Ok(frame)
}

/// Pixel size of one terminal cell, as reported by the terminal.
///
/// Falls back to `fallback` when the terminal reports no pixel size.
pub fn terminal_cell_size(fallback: CellSize) -> CellSize {
    match crossterm::terminal::window_size() {
        Ok(size) if size.width > 0 && size.height > 0 && size.columns > 0 && size.rows > 0 => {
            CellSize::new(
                u32::from(size.width) / u32::from(size.columns),
                u32::from(size.height) / u32::from(size.rows),
            )
        }
        _ => fallback,
    }
}

/// Restore terminal to normal state
///
/// Disables raw mode, shows the cursor and leaves alternate screen
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::cursor::Show)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
