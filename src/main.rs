//! xask - Entry Point

use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use xask::config::{resolve_config, RenderConfig};
use xask::model::AppError;
use xask::narration::narrator_for_engine;
use xask::session::{self, Answer, Prompt};
use xask::view::{restore_terminal, FrameLoop, RevealOutcome};

/// xask - ask a yes/no question, typewriter style, and say it out loud
#[derive(Parser, Debug)]
#[command(name = "xask")]
#[command(version)]
#[command(about = "Reveal a question character by character, narrate it, and wait for y/n")]
pub struct Args {
    /// Message to show (reads one line from stdin if not provided)
    pub message: Option<String>,

    /// Reply shown and spoken after a yes
    #[arg(long, value_name = "TEXT")]
    pub yes: Option<String>,

    /// Reply shown and spoken after a no
    #[arg(long, value_name = "TEXT")]
    pub no: Option<String>,

    /// Narration engine: espeak, festival or dummy
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Command run through `sh -c` after a yes
    #[arg(long, value_name = "CMD")]
    pub yes_exec: Option<String>,

    /// Command run through `sh -c` after a no
    #[arg(long, value_name = "CMD")]
    pub no_exec: Option<String>,

    /// Only show and narrate the message, then wait for any key
    #[arg(long)]
    pub say: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Command to run for `answer`.
    fn command_for(&self, answer: Answer) -> Option<&str> {
        match answer {
            Answer::Yes => self.yes_exec.as_deref(),
            Answer::No => self.no_exec.as_deref(),
            Answer::Cancelled => None,
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    let answer = run(&args)?;
    Ok(ExitCode::from(exit_status(answer)))
}

/// Resolve config, run the session, then the command chosen by the answer.
fn run(args: &Args) -> Result<Answer, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(args.config.clone(), args.engine.clone())?;

    xask::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let message = match args.message.clone() {
        Some(message) => message,
        None => read_message(io::stdin().lock())?,
    };

    // Both fail before the terminal is taken over
    let narrator = narrator_for_engine(&config.engine)?;
    let render = RenderConfig::from_resolved(&config)?;

    let mut frame_loop = FrameLoop::new(render)?;
    let result = if args.say {
        session::say(
            &mut frame_loop,
            narrator.as_ref(),
            &message,
            config.wait_for_keypress,
        )
        .map(|outcome| match outcome {
            RevealOutcome::Cancelled => Answer::Cancelled,
            _ => Answer::Yes,
        })
    } else {
        let prompt = Prompt {
            message,
            yes_reply: args.yes.clone(),
            no_reply: args.no.clone(),
        };
        session::ask(&mut frame_loop, narrator.as_ref(), &prompt)
    };

    // Always restore terminal state, even when the session failed
    drop(frame_loop);
    restore_terminal()?;
    let answer = result?;
    info!(?answer, "Session finished");

    if !args.say {
        if let Some(command) = args.command_for(answer) {
            session::run_shell_command(command)?;
        }
    }
    Ok(answer)
}

/// 0 for yes (or a finished `--say`), 1 otherwise.
fn exit_status(answer: Answer) -> u8 {
    if answer.is_yes() {
        0
    } else {
        1
    }
}

/// First line of `input`, without its line ending.
fn read_message(mut input: impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["xask", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["xask", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["xask"]);
        assert_eq!(args.message, None);
        assert_eq!(args.yes, None);
        assert_eq!(args.no, None);
        assert_eq!(args.engine, None);
        assert!(!args.say);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_message_and_replies() {
        let args = Args::parse_from([
            "xask",
            "Do you want to play a game?",
            "--yes",
            "Splendid!",
            "--no",
            "Maybe later.",
        ]);
        assert_eq!(args.message.as_deref(), Some("Do you want to play a game?"));
        assert_eq!(args.yes.as_deref(), Some("Splendid!"));
        assert_eq!(args.no.as_deref(), Some("Maybe later."));
    }

    #[test]
    fn test_engine_short_and_long() {
        assert_eq!(
            Args::parse_from(["xask", "-e", "festival"]).engine.as_deref(),
            Some("festival")
        );
        assert_eq!(
            Args::parse_from(["xask", "--engine", "dummy"]).engine.as_deref(),
            Some("dummy")
        );
    }

    #[test]
    fn test_exec_commands_follow_answer() {
        let args = Args::parse_from(["xask", "Go?", "--yes-exec", "make", "--no-exec", "true"]);
        assert_eq!(args.command_for(Answer::Yes), Some("make"));
        assert_eq!(args.command_for(Answer::No), Some("true"));
        assert_eq!(args.command_for(Answer::Cancelled), None);
    }

    #[test]
    fn test_say_flag() {
        let args = Args::parse_from(["xask", "--say", "Hello"]);
        assert!(args.say);
        assert_eq!(args.message.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["xask", "--config", "/tmp/xask.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/xask.toml")));
    }

    #[test]
    fn exit_status_is_zero_only_for_yes() {
        assert_eq!(exit_status(Answer::Yes), 0);
        assert_eq!(exit_status(Answer::No), 1);
        assert_eq!(exit_status(Answer::Cancelled), 1);
    }

    #[test]
    fn read_message_takes_first_line() {
        let input = io::Cursor::new("Shall we?\r\nignored\n");
        assert_eq!(read_message(input).unwrap(), "Shall we?");
    }
}
