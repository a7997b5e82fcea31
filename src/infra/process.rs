//! Bounded subprocess execution for generators.
//!
//! Spawns the script directly (no shell), captures stdout on a reader
//! thread and polls the child until a deadline. The child leads its own
//! process group, so on timeout the whole group is killed and the child is
//! reaped. Wrapper scripts that fork cannot leave a grandchild behind. The
//! child is held by a guard so an early return or a panic never leaves a
//! process running.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::core::generator::{GeneratorError, ScriptRunner};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Runs generator scripts as real child processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    poll_interval: Duration,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self { poll_interval: POLL_INTERVAL }
    }
}

/// Kills the child's process group and reaps the child on drop.
struct ChildGuard {
    child: Child,
}

impl ChildGuard {
    fn terminate(&mut self) {
        let running = matches!(self.child.try_wait(), Ok(None));
        // descendants may outlive the direct child
        kill_tree(&self.child, running);
        if running {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
        trace!(pid = self.child.id(), running, "child terminated");
    }
}

#[cfg(unix)]
fn kill_tree(
    child: &Child,
    _running: bool,
) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Ok(pid) = i32::try_from(child.id()) else {
        return;
    };
    match killpg(Pid::from_raw(pid), Signal::SIGKILL) {
        Ok(()) => trace!(pid, "process group killed"),
        Err(err) => trace!(pid, %err, "process group already gone"),
    }
}

#[cfg(windows)]
fn kill_tree(
    child: &Child,
    running: bool,
) {
    if !running {
        return;
    }
    let _ = Command::new("taskkill")
        .args(["/pid", &child.id().to_string(), "/f", "/t"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

#[cfg(not(any(unix, windows)))]
fn kill_tree(
    _child: &Child,
    _running: bool,
) {
}

fn spawn(
    program: &str,
    args: &[String],
) -> std::io::Result<Child> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    command.spawn()
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.terminate();
    }
}

impl ScriptRunner for SystemRunner {
    fn run(
        &self,
        script: &[String],
        timeout: Duration,
    ) -> Result<String, GeneratorError> {
        let (program, args) = script
            .split_first()
            .ok_or(GeneratorError::EmptyScript)?;

        let child = spawn(program, args).map_err(|source| GeneratorError::Spawn { program: program.clone(), source })?;
        let mut guard = ChildGuard { child };
        debug!(pid = guard.child.id(), %program, "spawned generator");

        let deadline = Instant::now() + timeout;
        let timed_out = || GeneratorError::Timeout { program: program.clone(), timeout };
        let io_error =
            |source: std::io::Error| GeneratorError::Io { program: program.clone(), source };

        let mut stdout = guard
            .child
            .stdout
            .take()
            .ok_or_else(|| io_error(std::io::Error::other("stdout was not captured")))?;

        // Drain stdout concurrently so a chatty child never blocks on a full pipe.
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let res = stdout
                .read_to_end(&mut buf)
                .map(|_| buf);
            let _ = tx.send(res);
        });

        let status = loop {
            match guard.child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    let now = Instant::now();
                    if now >= deadline {
                        guard.terminate();
                        return Err(timed_out());
                    }
                    thread::sleep(
                        self.poll_interval
                            .min(deadline - now),
                    );
                }
                Err(source) => return Err(io_error(source)),
            }
        };

        // A grandchild may still hold the pipe open; stay within the deadline.
        let remaining = deadline.saturating_duration_since(Instant::now());
        let bytes = match rx.recv_timeout(remaining) {
            Ok(res) => res.map_err(io_error)?,
            Err(_) => return Err(timed_out()),
        };

        if !status.success() {
            return Err(GeneratorError::Failed { program: program.clone(), status });
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".into(), "-c".into(), script.into()]
    }

    #[test]
    fn captures_stdout() {
        let out = SystemRunner::default()
            .run(&sh("printf 'node\\nruby\\n'"), Duration::from_secs(5))
            .expect("runs");
        assert_eq!(out, "node\nruby\n");
    }

    #[test]
    fn arguments_are_not_shell_interpreted() {
        let script = vec!["printf".to_string(), "%s".to_string(), "$(echo nope)".to_string()];
        let out = SystemRunner::default()
            .run(&script, Duration::from_secs(5))
            .expect("runs");
        assert_eq!(out, "$(echo nope)");
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let err = SystemRunner::default()
            .run(&sh("echo partial; exit 3"), Duration::from_secs(5))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Failed { .. }));
    }

    #[test]
    fn slow_child_is_killed_at_the_deadline() {
        let started = Instant::now();
        let err = SystemRunner::default()
            .run(&sh("sleep 5"), Duration::from_millis(100))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    /// Alive and not a zombie waiting for init to reap it.
    fn is_running(pid: i32) -> bool {
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        if kill(Pid::from_raw(pid), None).is_err() {
            return false;
        }
        match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
            Ok(stat) => !stat
                .rsplit(')')
                .next()
                .is_some_and(|rest| rest.trim_start().starts_with('Z')),
            Err(_) => !cfg!(target_os = "linux"),
        }
    }

    #[test]
    fn forked_grandchild_dies_with_the_child() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pid_file = dir.path().join("grandchild.pid");
        let script = format!("sleep 30 & echo $! > '{}'; wait", pid_file.display());

        let err = SystemRunner::default()
            .run(&sh(&script), Duration::from_millis(300))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Timeout { .. }));

        let pid: i32 = std::fs::read_to_string(&pid_file)
            .expect("pid written")
            .trim()
            .parse()
            .expect("pid");
        let deadline = Instant::now() + Duration::from_secs(2);
        while is_running(pid) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(20));
        }
        assert!(!is_running(pid), "grandchild {pid} outlived the timeout");
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let script = vec!["definitely-not-a-real-binary-1b7f".to_string()];
        let err = SystemRunner::default()
            .run(&script, Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Spawn { .. }));
    }
}
