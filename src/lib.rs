//! xask
//!
//! Typewriter-style prompts for the terminal: a page of text is fitted to the
//! screen, revealed one character per frame behind a blinking cursor, and read
//! aloud by a text-to-speech engine.
//!
//! The library follows a Pure Core / Impure Shell split: `model`, `layout` and
//! `state` are pure; `view`, `narration` and `session` own the terminal, child
//! processes and threads.

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod narration;
pub mod session;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
