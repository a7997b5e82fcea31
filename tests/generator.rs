//! Generators end to end: installed plugin names, real child processes and
//! the line transform.

use std::time::Duration;

use mise_complete::core::generator::{GeneratorError, ScriptRunner, lines_to_suggestions};
use mise_complete::core::suggestion::{PRIORITY_TOP_THRESHOLD, SuggestionOverrides};
use mise_complete::specs::mise::installed_plugin_names;
use proptest::prelude::*;

/// Answers any script with fixed stdout.
struct FakeMise(&'static str);

impl ScriptRunner for FakeMise {
    fn run(
        &self,
        script: &[String],
        _timeout: Duration,
    ) -> Result<String, GeneratorError> {
        assert_eq!(script, ["mise", "plugins", "ls", "--quiet"]);
        Ok(self.0.to_string())
    }
}

#[test]
fn installed_plugins_become_top_priority_suggestions() {
    let generator = installed_plugin_names("mise", &SuggestionOverrides::default());
    let out = generator.generate(&FakeMise("node\nruby\n\n"), Duration::from_secs(1));

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].name, "node");
    assert_eq!(out[1].name, "ruby");
    for s in &out {
        assert_eq!(s.description.as_deref(), Some("Plugin name"));
        assert_eq!(s.priority, Some(PRIORITY_TOP_THRESHOLD));
    }
}

#[test]
fn caller_overrides_win_over_the_defaults() {
    let generator = installed_plugin_names("mise", &SuggestionOverrides::default().description("Installed plugin"));
    let out = generator.generate(&FakeMise("node\n"), Duration::from_secs(1));

    assert_eq!(out[0].description.as_deref(), Some("Installed plugin"));
    assert_eq!(out[0].priority, Some(PRIORITY_TOP_THRESHOLD));
}

#[cfg(unix)]
mod process {
    use super::*;
    use mise_complete::core::Generator;
    use mise_complete::infra::SystemRunner;

    fn sh(script: &str) -> Generator {
        Generator::lines(["sh", "-c", script], SuggestionOverrides::default())
    }

    #[test]
    fn stdout_lines_from_a_real_child() {
        let out = sh("printf 'node\\nruby\\n\\n'").generate(&SystemRunner::default(), Duration::from_secs(5));
        let names: Vec<&str> = out
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["node", "ruby"]);
    }

    #[test]
    fn failing_child_yields_nothing() {
        let generator = sh("echo node; exit 3");
        let runner = SystemRunner::default();

        assert!(generator
            .generate(&runner, Duration::from_secs(5))
            .is_empty());
        assert!(matches!(
            generator.try_generate(&runner, Duration::from_secs(5)),
            Err(GeneratorError::Failed { .. })
        ));
    }

    #[test]
    fn slow_child_is_cut_off() {
        let generator = sh("sleep 5; echo late");
        let started = std::time::Instant::now();
        let out = generator.generate(&SystemRunner::default(), Duration::from_millis(100));

        assert!(out.is_empty());
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}

proptest! {
    #[test]
    fn line_transform_keeps_non_blank_lines_in_order(lines in prop::collection::vec("[ a-z\\r]{0,8}", 0..16)) {
        let output = lines.join("\n");
        let expected: Vec<String> = lines
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        let got: Vec<String> = lines_to_suggestions(&output, &SuggestionOverrides::default())
            .into_iter()
            .map(|s| s.name)
            .collect();
        prop_assert_eq!(got, expected);
    }
}
