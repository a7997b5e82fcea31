//! Dynamic suggestions produced by running an external command.
//!
//! A [`Generator`] is declared once as part of the static spec and runs
//! fresh on every completion request. Its script is an argv vector that is
//! executed literally (no shell), and its stdout is turned into
//! [`Suggestion`]s by a [`PostProcess`] step. Every failure mode (spawn
//! error, non-zero exit, timeout) collapses to "no suggestions" on the
//! completion path; [`Generator::try_generate`] keeps the error for callers
//! that want to report it.

use std::fmt;
use std::io;
use std::process::ExitStatus;
use std::sync::Arc;
use std::time::Duration;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::core::suggestion::{Suggestion, SuggestionKind, SuggestionOverrides};

/// Errors raised while running a generator script.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("generator script is empty")]
    EmptyScript,

    #[error("failed to spawn `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("failed to collect output of `{program}`")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Runs a script and returns its captured stdout.
///
/// The production implementation is [`crate::infra::process::SystemRunner`];
/// tests substitute canned output.
pub trait ScriptRunner {
    fn run(
        &self,
        script: &[String],
        timeout: Duration,
    ) -> Result<String, GeneratorError>;
}

pub type PostProcessFn = Arc<dyn Fn(&str) -> Vec<Suggestion> + Send + Sync>;

/// Maps raw stdout to suggestion records.
#[derive(Clone)]
pub enum PostProcess {
    /// One suggestion per non-empty line, with the overrides merged in.
    Lines(SuggestionOverrides),
    /// Arbitrary pure mapping.
    Custom(PostProcessFn),
}

impl PostProcess {
    pub fn apply(&self, output: &str) -> Vec<Suggestion> {
        match self {
            PostProcess::Lines(overrides) => lines_to_suggestions(output, overrides),
            PostProcess::Custom(f) => f(output),
        }
    }
}

impl fmt::Debug for PostProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostProcess::Lines(overrides) => f
                .debug_tuple("Lines")
                .field(overrides)
                .finish(),
            PostProcess::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Serialize for PostProcess {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PostProcess::Lines(overrides) => {
                let mut s = serializer.serialize_struct("PostProcess", 2)?;
                s.serialize_field("split", "lines")?;
                s.serialize_field("overrides", overrides)?;
                s.end()
            }
            PostProcess::Custom(_) => serializer.serialize_str("custom"),
        }
    }
}

/// Split captured text into one argument suggestion per non-empty line.
///
/// Surrounding whitespace (including a `\r` from CRLF output) is trimmed and
/// blank lines are dropped; order is preserved.
pub fn lines_to_suggestions(
    output: &str,
    overrides: &SuggestionOverrides,
) -> Vec<Suggestion> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| overrides.apply(Suggestion::new(line, SuggestionKind::Arg)))
        .collect()
}

/// A declared external invocation plus its output mapping.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generator {
    pub script: Vec<String>,
    pub post_process: PostProcess,
}

impl Generator {
    /// Line-splitting generator with the given overrides.
    pub fn lines<I, S>(script: I, overrides: SuggestionOverrides) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: script
                .into_iter()
                .map(Into::into)
                .collect(),
            post_process: PostProcess::Lines(overrides),
        }
    }

    pub fn custom<I, S, F>(script: I, post_process: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&str) -> Vec<Suggestion> + Send + Sync + 'static,
    {
        Self {
            script: script
                .into_iter()
                .map(Into::into)
                .collect(),
            post_process: PostProcess::Custom(Arc::new(post_process)),
        }
    }

    /// Merge caller overrides over the declared ones.
    ///
    /// Custom post-processors are wrapped so the overrides still apply.
    pub fn with_overrides(&self, overrides: &SuggestionOverrides) -> Self {
        let post_process = match &self.post_process {
            PostProcess::Lines(base) => PostProcess::Lines(base.merged(overrides)),
            PostProcess::Custom(f) => {
                let f = Arc::clone(f);
                let overrides = overrides.clone();
                PostProcess::Custom(Arc::new(move |out: &str| {
                    f(out)
                        .into_iter()
                        .map(|s| overrides.apply(s))
                        .collect()
                }))
            }
        };
        Self { script: self.script.clone(), post_process }
    }

    pub fn program(&self) -> Option<&str> {
        self.script
            .first()
            .map(String::as_str)
    }

    /// Run the script and map its output, surfacing any failure.
    pub fn try_generate(
        &self,
        runner: &dyn ScriptRunner,
        timeout: Duration,
    ) -> Result<Vec<Suggestion>, GeneratorError> {
        if self.script.is_empty() {
            return Err(GeneratorError::EmptyScript);
        }
        let output = runner.run(&self.script, timeout)?;
        Ok(self.post_process.apply(&output))
    }

    /// Run the script; any failure yields an empty list.
    #[instrument(level = "debug", skip_all, fields(script = %self.script.join(" ")))]
    pub fn generate(
        &self,
        runner: &dyn ScriptRunner,
        timeout: Duration,
    ) -> Vec<Suggestion> {
        match self.try_generate(runner, timeout) {
            Ok(suggestions) => {
                debug!(count = suggestions.len(), "generator finished");
                suggestions
            }
            Err(err @ GeneratorError::Timeout { .. }) => {
                warn!(error = %err, "generator timed out");
                Vec::new()
            }
            Err(err) => {
                debug!(error = %err, "generator failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Returns canned output and counts invocations.
    struct Canned {
        output: Result<&'static str, ()>,
        calls: Cell<usize>,
    }

    impl Canned {
        fn ok(output: &'static str) -> Self {
            Self { output: Ok(output), calls: Cell::new(0) }
        }

        fn timeout() -> Self {
            Self { output: Err(()), calls: Cell::new(0) }
        }
    }

    impl ScriptRunner for Canned {
        fn run(
            &self,
            script: &[String],
            timeout: Duration,
        ) -> Result<String, GeneratorError> {
            self.calls
                .set(self.calls.get() + 1);
            match self.output {
                Ok(out) => Ok(out.to_string()),
                Err(()) => Err(GeneratorError::Timeout { program: script[0].clone(), timeout }),
            }
        }
    }

    const TIMEOUT: Duration = Duration::from_millis(500);

    #[test]
    fn blank_lines_are_dropped() {
        let generator =
            Generator::lines(["tool", "plugins", "ls", "--quiet"], SuggestionOverrides::default());
        let runner = Canned::ok("node\nruby\n\n");

        let names: Vec<String> = generator
            .generate(&runner, TIMEOUT)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["node", "ruby"]);
    }

    #[test]
    fn crlf_output_is_trimmed() {
        let out = lines_to_suggestions("node\r\n  ruby  \r\n", &SuggestionOverrides::default());
        assert_eq!(out[0].name, "node");
        assert_eq!(out[1].name, "ruby");
    }

    #[test]
    fn every_call_reruns_the_script() {
        let generator = Generator::lines(["tool", "ls"], SuggestionOverrides::default());
        let runner = Canned::ok("a\n");

        generator.generate(&runner, TIMEOUT);
        generator.generate(&runner, TIMEOUT);
        assert_eq!(runner.calls.get(), 2);
    }

    #[test]
    fn timeout_degrades_to_empty() {
        let generator = Generator::lines(["tool", "ls"], SuggestionOverrides::default());
        let runner = Canned::timeout();

        assert!(generator
            .generate(&runner, TIMEOUT)
            .is_empty());
        assert!(matches!(
            generator.try_generate(&runner, TIMEOUT),
            Err(GeneratorError::Timeout { .. })
        ));
    }

    #[test]
    fn empty_script_never_reaches_the_runner() {
        let generator = Generator::lines(Vec::<String>::new(), SuggestionOverrides::default());
        let runner = Canned::ok("x\n");

        assert!(matches!(
            generator.try_generate(&runner, TIMEOUT),
            Err(GeneratorError::EmptyScript)
        ));
        assert_eq!(runner.calls.get(), 0);
    }

    #[test]
    fn overrides_reach_custom_post_processors() {
        let generator = Generator::custom(["tool"], |out: &str| {
            out.split(',')
                .map(|n| Suggestion::new(n, SuggestionKind::Arg))
                .collect()
        })
        .with_overrides(&SuggestionOverrides::default().priority(90));
        let runner = Canned::ok("a,b");

        let out = generator.generate(&runner, TIMEOUT);
        assert_eq!(out.len(), 2);
        assert!(out
            .iter()
            .all(|s| s.priority == Some(90)));
    }
}
