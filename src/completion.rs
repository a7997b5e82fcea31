//! Completion scripts for `mise-complete`'s own flags and subcommands.
//!
//! The script goes to stdout unless `--out-dir` names a directory, in which
//! case the shell's conventional file name is used (`mise-complete.bash`,
//! `_mise-complete`, ...).

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Generator, Shell};
use tracing::debug;

use crate::cli::{AppContext, Cli, CompletionsArgs};

const BIN_NAME: &str = "mise-complete";

/// Render the script for `shell` into memory.
pub fn script(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    buf
}

pub fn run(
    args: CompletionsArgs,
    ctx: &AppContext,
) -> Result<()> {
    let body = script(args.shell);

    let Some(dir) = args.out_dir else {
        io::stdout()
            .write_all(&body)
            .context("Cannot write completion script to stdout")?;
        return Ok(());
    };

    fs::create_dir_all(&dir).with_context(|| format!("Cannot create {}", dir.display()))?;
    let path = dir.join(args.shell.file_name(BIN_NAME));
    fs::write(&path, &body).with_context(|| format!("Cannot write {}", path.display()))?;
    debug!(path = %path.display(), bytes = body.len(), "completion script written");

    if !ctx.quiet {
        eprintln!("Wrote {} completions to {}", args.shell, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_name_this_binary() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            let body = String::from_utf8(script(shell)).expect("utf-8");
            assert!(body.contains(BIN_NAME), "{shell} script lacks the binary name");
        }
    }

    #[test]
    fn out_dir_uses_the_shell_file_name() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path().join("nested");
        let args = CompletionsArgs { shell: Shell::Zsh, out_dir: Some(dir.clone()) };

        run(args, &AppContext { quiet: true, no_color: true }).expect("writes");
        let written = fs::read(dir.join("_mise-complete")).expect("file exists");
        assert_eq!(written, script(Shell::Zsh));
    }
}
