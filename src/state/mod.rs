//! Reveal state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod reveal;

// Re-export for convenience
pub use reveal::{RevealController, RevealFrame, RevealPhase};
