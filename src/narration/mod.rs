//! Text-to-speech narration through command-line engines.
//!
//! Narration runs next to the reveal animation. A narrator blocks until the engine
//! finishes speaking; the session puts it on its own thread.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while choosing or running a narration engine.
#[derive(Debug, Error)]
pub enum NarrationError {
    /// The engine name is not one we know how to drive.
    #[error("Unknown narration engine {0:?} (expected one of: espeak, festival, dummy)")]
    UnknownEngine(String),

    /// The engine's binary is not on `PATH`.
    #[error(
        "Narration engine {engine} is not available: {binary} not found on PATH \
         (installed: {})",
        engine_list(.installed)
    )]
    EngineUnavailable {
        /// Engine requested.
        engine: Engine,
        /// Binary looked for.
        binary: &'static str,
        /// Engines that are usable instead.
        installed: Vec<Engine>,
    },

    /// The engine process could not be started or fed.
    #[error("Failed to run {program:?}: {source}")]
    Spawn {
        /// Program that failed.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The engine ran but exited unsuccessfully.
    #[error("{program:?} exited with {status}")]
    Failed {
        /// Program that failed.
        program: PathBuf,
        /// Its exit status.
        status: ExitStatus,
    },
}

/// Speaks text aloud.
pub trait Narrator: Send + Sync {
    /// Speak `text`, returning once the engine is done.
    ///
    /// # Errors
    ///
    /// [`NarrationError::Spawn`] or [`NarrationError::Failed`].
    fn narrate(&self, text: &str) -> Result<(), NarrationError>;

    /// Engine name, for logs.
    fn name(&self) -> &str;
}

/// Supported narration engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    /// `espeak --stdin`, text on stdin
    Espeak,
    /// `festival --tts`, text on stdin
    Festival,
    /// No audio at all.
    Dummy,
}

impl Engine {
    /// Every engine, in order of preference.
    pub const ALL: [Engine; 3] = [Engine::Espeak, Engine::Festival, Engine::Dummy];

    /// Config/CLI name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Espeak => "espeak",
            Engine::Festival => "festival",
            Engine::Dummy => "dummy",
        }
    }

    /// Binary the engine needs, if any.
    pub fn binary(&self) -> Option<&'static str> {
        match self {
            Engine::Espeak => Some("espeak"),
            Engine::Festival => Some("festival"),
            Engine::Dummy => None,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = NarrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Engine::ALL
            .into_iter()
            .find(|engine| engine.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NarrationError::UnknownEngine(s.to_string()))
    }
}

/// Narrator that says nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn narrate(&self, text: &str) -> Result<(), NarrationError> {
        debug!(chars = text.chars().count(), "silent narration");
        Ok(())
    }

    fn name(&self) -> &str {
        Engine::Dummy.as_str()
    }
}

/// Narrator backed by an external TTS program.
#[derive(Debug, Clone)]
pub struct CommandNarrator {
    engine: Engine,
    program: PathBuf,
}

impl CommandNarrator {
    /// Drive `engine` through the binary at `program`.
    pub fn with_program(engine: Engine, program: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            program: program.into(),
        }
    }

    fn spawn_error(&self, source: io::Error) -> NarrationError {
        NarrationError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl Narrator for CommandNarrator {
    fn narrate(&self, text: &str) -> Result<(), NarrationError> {
        let mut command = Command::new(&self.program);
        // Engine chatter would scribble over the alternate screen
        command.stdout(Stdio::null()).stderr(Stdio::null());

        let args: &[&str] = match self.engine {
            Engine::Espeak => &["--stdin"],
            Engine::Festival => &["--tts"],
            Engine::Dummy => &[],
        };
        // Text goes on stdin so a leading '-' is never read as an option
        let mut child = command
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(text.as_bytes()) {
                // The engine may exit without reading; its status says how it went
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                    return Err(self.spawn_error(e));
                }
                _ => {}
            }
        }
        let status = child.wait().map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            return Err(NarrationError::Failed {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        self.engine.as_str()
    }
}

/// Build the narrator for the engine called `name`.
///
/// The engine's binary is looked up on `PATH` now, so a missing engine fails before
/// any screen is shown.
///
/// # Errors
///
/// [`NarrationError::UnknownEngine`] or [`NarrationError::EngineUnavailable`].
pub fn narrator_for_engine(name: &str) -> Result<Box<dyn Narrator>, NarrationError> {
    let engine: Engine = name.parse()?;
    let Some(binary) = engine.binary() else {
        return Ok(Box::new(SilentNarrator));
    };
    let program = find_on_path(binary).ok_or_else(|| NarrationError::EngineUnavailable {
        engine,
        binary,
        installed: available_engines(),
    })?;
    info!(%engine, program = %program.display(), "Narration engine ready");
    Ok(Box::new(CommandNarrator::with_program(engine, program)))
}

/// Engines usable on this machine.
pub fn available_engines() -> Vec<Engine> {
    Engine::ALL
        .into_iter()
        .filter(|engine| engine.binary().map_or(true, |b| find_on_path(b).is_some()))
        .collect()
}

fn engine_list(engines: &[Engine]) -> String {
    engines
        .iter()
        .map(Engine::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Locate an executable called `program` in the directories of `PATH`.
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_names_parse_case_insensitively() {
        assert_eq!("espeak".parse::<Engine>().unwrap(), Engine::Espeak);
        assert_eq!("Festival".parse::<Engine>().unwrap(), Engine::Festival);
        assert_eq!(" dummy ".parse::<Engine>().unwrap(), Engine::Dummy);
    }

    #[test]
    fn unknown_engine_is_rejected() {
        let err = narrator_for_engine("google").err();
        assert!(matches!(err, Some(NarrationError::UnknownEngine(name)) if name == "google"));
    }

    #[test]
    fn dummy_engine_is_always_available() {
        let narrator = narrator_for_engine("dummy").unwrap();
        assert_eq!(narrator.name(), "dummy");
        narrator.narrate("Hello").unwrap();
        assert!(available_engines().contains(&Engine::Dummy));
    }

    #[cfg(unix)]
    #[test]
    fn finds_shell_on_path() {
        assert!(find_on_path("sh").is_some());
        assert!(find_on_path("definitely-not-a-tts-engine").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn command_narrator_reports_exit_status() {
        let ok = CommandNarrator::with_program(Engine::Espeak, "true");
        ok.narrate("hello").unwrap();

        let failing = CommandNarrator::with_program(Engine::Espeak, "false");
        let err = failing.narrate("hello").unwrap_err();
        assert!(matches!(err, NarrationError::Failed { .. }));
    }

    #[test]
    fn unavailable_engine_lists_the_installed_ones() {
        let err = NarrationError::EngineUnavailable {
            engine: Engine::Festival,
            binary: "festival",
            installed: vec![Engine::Espeak, Engine::Dummy],
        };
        assert_eq!(
            err.to_string(),
            "Narration engine festival is not available: festival not found on PATH \
             (installed: espeak, dummy)"
        );
    }

    #[cfg(unix)]
    #[test]
    fn espeak_reads_text_from_stdin() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join(format!("xask-espeak-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let script = dir.join("espeak");
        fs::write(
            &script,
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args\"\ncat > \"$(dirname \"$0\")/heard\"\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let narrator = CommandNarrator::with_program(Engine::Espeak, &script);
        narrator.narrate("-5 degrees, go out?").unwrap();

        assert_eq!(fs::read_to_string(dir.join("args")).unwrap(), "--stdin\n");
        assert_eq!(
            fs::read_to_string(dir.join("heard")).unwrap(),
            "-5 degrees, go out?"
        );
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let narrator = CommandNarrator::with_program(Engine::Espeak, "/nonexistent/espeak");
        let err = narrator.narrate("hi").unwrap_err();
        assert!(matches!(err, NarrationError::Spawn { .. }));
    }
}
