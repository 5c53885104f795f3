//! Log subscriber setup.
//!
//! The terminal interface owns the screen, so logs only go to stderr in headless runs. With a log
//! file every run logs there instead; without one an interactive run installs no subscriber and
//! its events are dropped.

use std::{fs::File, io, path::Path, sync::Mutex};

use color_eyre::eyre::{eyre, Result, WrapErr as _};
use tracing_subscriber::EnvFilter;

/// Where log output goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target<'path> {
    /// Discard everything.
    Discard,
    /// Write to standard error.
    Stderr,
    /// Append to a file, created if missing.
    File(&'path Path),
}

impl<'path> Target<'path> {
    /// Picks the target for a run: the log file when one is given, stderr for headless runs and
    /// nothing otherwise.
    pub const fn select(log_file: Option<&'path Path>, headless: bool) -> Self {
        match (log_file, headless) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Stderr,
            (None, false) => Self::Discard,
        }
    }
}

/// Filter honouring `RUST_LOG`, falling back to `debug` when `verbose` and `info` otherwise.
fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

/// Installs the global subscriber for `target`.
///
/// # Errors
///
/// - the log file cannot be opened
/// - a global subscriber is already installed
pub fn init(target: Target<'_>, verbose: bool) -> Result<()> {
    match target {
        Target::Discard => Ok(()),
        Target::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter(verbose))
            .with_writer(io::stderr)
            .try_init()
            .map_err(|err| eyre!("failed to install log subscriber: {err}")),
        Target::File(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter(verbose))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| eyre!("failed to install log subscriber: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_prefers_log_file() {
        let path = Path::new("run.log");

        assert_eq!(Target::select(Some(path), true), Target::File(path));
        assert_eq!(Target::select(Some(path), false), Target::File(path));
    }

    #[test]
    fn test_select_without_log_file() {
        assert_eq!(Target::select(None, true), Target::Stderr);
        assert_eq!(Target::select(None, false), Target::Discard);
    }

    #[test]
    fn test_discard_installs_nothing() {
        assert!(init(Target::Discard, false).is_ok());
    }
}
