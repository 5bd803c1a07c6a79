//! Reveal state machine: how much of a page is visible on each tick.
//!
//! `Idle -> Revealing -> Settled`. While revealing, one more character becomes
//! visible per [`RevealController::advance`]. The controller is pure; the frame
//! loop owns timing and drawing.

use crate::model::Page;
use tracing::debug;

/// Phase of a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealPhase {
    /// No reveal started yet; nothing is visible.
    #[default]
    Idle,
    /// Characters are still being disclosed.
    Revealing,
    /// The whole page is visible. Terminal state.
    Settled,
}

/// What one tick draws, captured before the controller advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFrame {
    /// Number of leading page characters drawn this tick.
    pub visible_chars: usize,
    /// Stop offset for the draw pass.
    pub draw_stop: usize,
    /// Stop offset for the cursor pass, one past the last drawn glyph.
    pub cursor_offset: usize,
    /// Phase at capture time.
    pub phase: RevealPhase,
}

/// Drives the progressive disclosure of one [`Page`].
#[derive(Debug, Clone)]
pub struct RevealController {
    page: Page,
    revealed: usize,
    phase: RevealPhase,
}

impl RevealController {
    /// Create an idle controller for `page`.
    pub fn new(page: Page) -> Self {
        Self {
            page,
            revealed: 0,
            phase: RevealPhase::Idle,
        }
    }

    /// Begin revealing at `start_offset`.
    ///
    /// Text before the offset shows at once. An offset at or past the end of the
    /// page settles immediately.
    pub fn start(&mut self, start_offset: usize) {
        self.revealed = start_offset.min(self.page.len());
        self.phase = if self.revealed >= self.page.len() {
            RevealPhase::Settled
        } else {
            RevealPhase::Revealing
        };
        debug!(
            start_offset,
            len = self.page.len(),
            phase = ?self.phase,
            "reveal started"
        );
    }

    /// Disclose one more character. No-op unless revealing.
    pub fn advance(&mut self) {
        if self.phase != RevealPhase::Revealing {
            return;
        }
        self.revealed += 1;
        if self.revealed >= self.page.len() {
            self.phase = RevealPhase::Settled;
            debug!(len = self.page.len(), "reveal settled");
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// True once the whole page is visible.
    pub fn is_settled(&self) -> bool {
        self.phase == RevealPhase::Settled
    }

    /// Reveal offset: index of the newest visible character.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// The page being revealed.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Number of characters visible this tick.
    pub fn visible_chars(&self) -> usize {
        match self.phase {
            RevealPhase::Idle => 0,
            RevealPhase::Revealing | RevealPhase::Settled => {
                (self.revealed + 1).min(self.page.len())
            }
        }
    }

    /// Page prefix drawn this tick: characters `0..=revealed`, clamped to the page.
    pub fn visible_text(&self) -> &str {
        self.page.prefix(self.visible_chars())
    }

    /// Stop offset for the draw pass.
    pub fn draw_stop(&self) -> usize {
        self.revealed
    }

    /// Stop offset for the cursor pass.
    pub fn cursor_offset(&self) -> usize {
        self.revealed + 1
    }

    /// Snapshot of what this tick draws.
    pub fn frame(&self) -> RevealFrame {
        RevealFrame {
            visible_chars: self.visible_chars(),
            draw_stop: self.draw_stop(),
            cursor_offset: self.cursor_offset(),
            phase: self.phase,
        }
    }
}
