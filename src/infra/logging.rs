//! Diagnostic logging on stderr.
//!
//! stdout carries suggestions for the shell, so every log line goes to
//! stderr. `MISE_COMPLETE_LOG` takes an `EnvFilter` directive and wins over
//! the `-v` count.
//!
//! `complete` runs inside a shell widget where any stderr text lands in the
//! user's prompt, so it stays at ERROR unless `-v` or `MISE_COMPLETE_LOG`
//! asks for more.

use std::io::IsTerminal;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "MISE_COMPLETE_LOG";

/// Level picked from global flags when `MISE_COMPLETE_LOG` is unset.
pub fn level_for(
    verbose: u8,
    quiet: bool,
    completing: bool,
) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 if completing => LevelFilter::ERROR,
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3.. => LevelFilter::TRACE,
    }
}

/// Escapes only when colors are allowed and stderr is a terminal.
pub fn use_ansi(
    no_color: bool,
    stderr_is_terminal: bool,
) -> bool {
    !no_color && stderr_is_terminal
}

pub fn init(
    verbose: u8,
    quiet: bool,
    no_color: bool,
    completing: bool,
) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose, quiet, completing).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    // a subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi(no_color, std::io::stderr().is_terminal()))
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_ladder() {
        assert_eq!(level_for(0, false, false), LevelFilter::WARN);
        assert_eq!(level_for(1, false, false), LevelFilter::INFO);
        assert_eq!(level_for(2, false, false), LevelFilter::DEBUG);
        assert_eq!(level_for(7, false, false), LevelFilter::TRACE);
        assert_eq!(level_for(3, true, false), LevelFilter::ERROR);
    }

    #[test]
    fn completion_is_silent_unless_asked() {
        assert_eq!(level_for(0, false, true), LevelFilter::ERROR);
        assert_eq!(level_for(1, false, true), LevelFilter::INFO);
    }

    #[test]
    fn no_escapes_off_a_terminal() {
        assert!(use_ansi(false, true));
        assert!(!use_ansi(false, false));
        assert!(!use_ansi(true, true));
    }
}
