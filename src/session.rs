//! Prompt sessions: one or two screens, each revealed while being narrated.

use crate::model::Page;
use crate::narration::Narrator;
use crate::view::{FrameClock, FrameLoop, KeySource, RevealOutcome, TuiError};
use crossterm::event::KeyCode;
use ratatui::backend::Backend;
use std::io;
use std::process::{Command, ExitStatus};
use std::thread;
use tracing::{error, info};

/// Result of a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// A yes key (`y`, `Y`, `j`, `J`) was pressed.
    Yes,
    /// Any other key.
    No,
    /// Escape or Ctrl+C.
    Cancelled,
}

impl Answer {
    /// Interpret how the question screen ended.
    pub fn from_outcome(outcome: RevealOutcome) -> Self {
        match outcome {
            RevealOutcome::Cancelled => Answer::Cancelled,
            RevealOutcome::Key(KeyCode::Char(c)) if is_yes_key(c) => Answer::Yes,
            RevealOutcome::Key(_) | RevealOutcome::Completed => Answer::No,
        }
    }

    /// True for [`Answer::Yes`].
    pub fn is_yes(&self) -> bool {
        *self == Answer::Yes
    }
}

/// Keys that answer yes (English and German).
pub fn is_yes_key(c: char) -> bool {
    matches!(c, 'y' | 'Y' | 'j' | 'J')
}

/// A yes/no question with optional replies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    /// Question text.
    pub message: String,
    /// Shown and spoken after a yes.
    pub yes_reply: Option<String>,
    /// Shown and spoken after anything else.
    pub no_reply: Option<String>,
}

impl Prompt {
    /// A question without replies.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// The reply for `answer`, if one is configured.
    pub fn reply_for(&self, answer: Answer) -> Option<&str> {
        match answer {
            Answer::Yes => self.yes_reply.as_deref(),
            Answer::No => self.no_reply.as_deref(),
            Answer::Cancelled => None,
        }
    }
}

/// Reveal `page` while `narrator` speaks `narration`; join both before returning.
///
/// Narration failures are logged, not returned: the screen is still useful silent.
pub fn show_screen<B, K, C>(
    frame_loop: &mut FrameLoop<B, K, C>,
    narrator: &dyn Narrator,
    page: Page,
    start_offset: usize,
    narration: &str,
    wait_for_keypress: bool,
) -> Result<RevealOutcome, TuiError>
where
    B: Backend,
    K: KeySource,
    C: FrameClock,
{
    thread::scope(|scope| {
        let speaking = scope.spawn(move || narrator.narrate(narration));
        let outcome = frame_loop.run_reveal(page, start_offset, wait_for_keypress);

        match speaking.join() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!(engine = narrator.name(), error = %err, "Narration failed"),
            Err(_) => error!(engine = narrator.name(), "Narration thread panicked"),
        }
        outcome
    })
}

/// Show and narrate `message`.
pub fn say<B, K, C>(
    frame_loop: &mut FrameLoop<B, K, C>,
    narrator: &dyn Narrator,
    message: &str,
    wait_for_keypress: bool,
) -> Result<RevealOutcome, TuiError>
where
    B: Backend,
    K: KeySource,
    C: FrameClock,
{
    show_screen(
        frame_loop,
        narrator,
        Page::new(message),
        0,
        message,
        wait_for_keypress,
    )
}

/// Ask `prompt`, then show the matching reply as a continuation of the question.
///
/// The reply screen keeps the question on screen, appends the pressed key and the
/// reply on a new line, and animates only the appended part. It ends on its own.
pub fn ask<B, K, C>(
    frame_loop: &mut FrameLoop<B, K, C>,
    narrator: &dyn Narrator,
    prompt: &Prompt,
) -> Result<Answer, TuiError>
where
    B: Backend,
    K: KeySource,
    C: FrameClock,
{
    let question = Page::new(prompt.message.as_str());
    let outcome = show_screen(
        frame_loop,
        narrator,
        question.clone(),
        0,
        &prompt.message,
        true,
    )?;
    let answer = Answer::from_outcome(outcome);
    info!(?answer, ?outcome, "Question answered");

    if let Some(reply) = prompt.reply_for(answer) {
        let key = outcome
            .key_char()
            .filter(|c| !c.is_control())
            .map(String::from)
            .unwrap_or_default();
        let (page, start_offset) = question.continued(&format!("{key}\n{reply}"));
        show_screen(frame_loop, narrator, page, start_offset, reply, false)?;
    }
    Ok(answer)
}

/// Run `command` through `sh -c`, inheriting the terminal.
///
/// # Errors
///
/// I/O errors from spawning the shell.
pub fn run_shell_command(command: &str) -> io::Result<ExitStatus> {
    info!(command, "Executing command");
    let status = Command::new("sh").arg("-c").arg(command).status()?;
    if !status.success() {
        error!(command, %status, "Command failed");
    }
    Ok(status)
}
