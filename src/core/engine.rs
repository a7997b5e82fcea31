//! Resolve → suggest → merge pipeline for one completion request.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::core::generator::ScriptRunner;
use crate::core::resolve::{Expecting, Resolution};
use crate::core::spec::{ArgNode, CommandNode, Names};
use crate::core::suggestion::{Suggestion, SuggestionKind, dedupe, sort_by_priority};
use crate::core::template;
use crate::core::validate::SpecTree;

/// Default bound on a single generator run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1500);

/// Answers completion requests against a validated tree.
pub struct Engine<'a> {
    tree: &'a SpecTree,
    runner: &'a dyn ScriptRunner,
    timeout: Duration,
    show_hidden: bool,
}

impl<'a> Engine<'a> {
    pub fn new(
        tree: &'a SpecTree,
        runner: &'a dyn ScriptRunner,
    ) -> Self {
        Self { tree, runner, timeout: DEFAULT_TIMEOUT, show_hidden: false }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    /// Suggestions for `current` after the completed `tokens`.
    ///
    /// Never fails: a token path that does not resolve yields no suggestions.
    #[instrument(level = "debug", skip_all, fields(tokens = tokens.len(), current = current))]
    pub fn complete<S: AsRef<str>>(
        &self,
        tokens: &[S],
        current: &str,
    ) -> Vec<Suggestion> {
        let resolution = match self.tree.resolve(tokens) {
            Ok(resolution) => resolution,
            Err(err) => {
                debug!(error = %err, "resolution miss");
                return Vec::new();
            }
        };

        let candidates = match resolution.expecting {
            Expecting::OptionValue { arg, .. } => self.arg_suggestions(arg, current),
            expecting => {
                if current.starts_with('-') && !resolution.options_ended {
                    self.option_suggestions(&resolution, current)
                } else {
                    let mut out = Vec::new();
                    if resolution.can_descend() {
                        out.extend(self.subcommand_suggestions(resolution.command(), current));
                    }
                    if let Expecting::Positional(arg) = expecting {
                        out.extend(self.arg_suggestions(arg, current));
                    }
                    out
                }
            }
        };

        let filtered = candidates
            .into_iter()
            .filter(|s| s.name.starts_with(current))
            .collect();
        let mut out = dedupe(filtered);
        sort_by_priority(&mut out);
        debug!(count = out.len(), "completed");
        out
    }

    fn subcommand_suggestions(
        &self,
        command: &CommandNode,
        current: &str,
    ) -> Vec<Suggestion> {
        command
            .subcommands
            .iter()
            .filter(|c| self.visible(c.hidden, &c.names, current))
            .filter_map(|c| {
                let name = insertable_name(&c.names, current)?;
                let mut s = Suggestion::new(name, SuggestionKind::Subcommand).with_description(c.description.as_deref());
                s.is_dangerous = c.is_dangerous;
                s.hidden = c.hidden;
                Some(s)
            })
            .collect()
    }

    fn option_suggestions(
        &self,
        resolution: &Resolution<'_>,
        current: &str,
    ) -> Vec<Suggestion> {
        resolution
            .options
            .iter()
            .filter(|o| self.visible(o.hidden, &o.names, current))
            .filter_map(|o| {
                let name = insertable_name(&o.names, current)?;
                let mut s = Suggestion::new(name, SuggestionKind::Option).with_description(o.description.as_deref());
                s.hidden = o.hidden;
                Some(s)
            })
            .collect()
    }

    /// Static suggestions, then template entries, then generator output.
    fn arg_suggestions(
        &self,
        arg: &ArgNode,
        current: &str,
    ) -> Vec<Suggestion> {
        let mut out = arg.suggestions.clone();
        if let Some(t) = arg.template {
            out.extend(template::expand(t, current));
        }
        for generator in &arg.generators {
            out.extend(generator.generate(self.runner, self.timeout));
        }
        if arg.is_dangerous {
            for s in &mut out {
                s.is_dangerous = true;
            }
        }
        out
    }

    /// Hidden entries surface only on request or when typed in full.
    fn visible(
        &self,
        hidden: bool,
        names: &Names,
        current: &str,
    ) -> bool {
        !hidden || self.show_hidden || names.contains(current)
    }
}

/// The first spelling that extends what the user typed.
fn insertable_name(
    names: &Names,
    current: &str,
) -> Option<String> {
    names
        .iter()
        .find(|n| n.starts_with(current))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::core::generator::{Generator, GeneratorError};
    use crate::core::spec::{OptionNode, Template};
    use crate::core::suggestion::{PRIORITY_TOP_THRESHOLD, SuggestionOverrides};

    struct Fixed {
        out: &'static str,
        calls: Cell<usize>,
    }

    impl ScriptRunner for Fixed {
        fn run(
            &self,
            _script: &[String],
            _timeout: Duration,
        ) -> Result<String, GeneratorError> {
            self.calls
                .set(self.calls.get() + 1);
            Ok(self.out.to_string())
        }
    }

    fn runner(out: &'static str) -> Fixed {
        Fixed { out, calls: Cell::new(0) }
    }

    fn tree() -> SpecTree {
        let plugins = Generator::lines(
            ["tool", "plugins", "ls"],
            SuggestionOverrides::default()
                .description("Plugin name")
                .priority(PRIORITY_TOP_THRESHOLD),
        );
        let root = CommandNode::new("tool")
            .option(OptionNode::new(["-v", "--verbose"]).persistent())
            .option(OptionNode::new("--debug").persistent().hidden())
            .option(
                OptionNode::new("--log-level")
                    .persistent()
                    .arg(ArgNode::new("LEVEL").suggestions(["error", "warn", "info"])),
            )
            .subcommand(CommandNode::new(["global", "g"]).hidden())
            .subcommand(CommandNode::new(["ls", "list"]).description("List things\nmore text"))
            .subcommand(
                CommandNode::new("rm").dangerous().arg(
                    ArgNode::new("PLUGIN")
                        .variadic()
                        .suggestions(["node"])
                        .generator(plugins),
                ),
            )
            .subcommand(CommandNode::new("cd").arg(ArgNode::new("DIR").template(Template::Folders)));
        SpecTree::new(root).expect("valid")
    }

    fn names(items: &[Suggestion]) -> Vec<&str> {
        items
            .iter()
            .map(|s| s.name.as_str())
            .collect()
    }

    #[test]
    fn root_offers_visible_subcommands() {
        let tree = tree();
        let runner = runner("");
        let out = Engine::new(&tree, &runner).complete::<&str>(&[], "");

        assert_eq!(names(&out), ["ls", "rm", "cd"]);
        assert_eq!(out[0].summary(), "List things");
        assert!(out[1].is_dangerous);
    }

    #[test]
    fn aliases_complete_when_canonical_does_not_match() {
        let tree = tree();
        let runner = runner("");
        let out = Engine::new(&tree, &runner).complete::<&str>(&[], "li");
        assert_eq!(names(&out), ["list"]);
    }

    #[test]
    fn hidden_entries_on_request_or_exact_match() {
        let tree = tree();
        let runner = runner("");

        let engine = Engine::new(&tree, &runner);
        assert_eq!(names(&engine.complete::<&str>(&[], "g")), Vec::<&str>::new());
        assert_eq!(names(&engine.complete::<&str>(&[], "global")), ["global"]);
        assert_eq!(names(&engine.complete::<&str>(&[], "--d")), Vec::<&str>::new());

        let engine = Engine::new(&tree, &runner).show_hidden(true);
        assert_eq!(names(&engine.complete::<&str>(&[], "g")), ["global"]);
    }

    #[test]
    fn dash_offers_options_including_inherited() {
        let tree = tree();
        let runner = runner("");
        let out = Engine::new(&tree, &runner).complete(&["ls"], "--");
        assert_eq!(names(&out), ["--verbose", "--log-level"]);
    }

    #[test]
    fn option_value_slot_only_offers_its_values() {
        let tree = tree();
        let runner = runner("");
        let out = Engine::new(&tree, &runner).complete(&["--log-level"], "");
        assert_eq!(names(&out), ["error", "warn", "info"]);
    }

    #[test]
    fn generated_values_merge_after_static_ones() {
        let tree = tree();
        let runner = runner("node\nruby\n\n");
        let out = Engine::new(&tree, &runner).complete(&["rm"], "");

        // generated records carry the top priority, static `node` wins the name
        assert_eq!(names(&out), ["ruby", "node"]);
        assert_eq!(out[0].description.as_deref(), Some("Plugin name"));
        assert_eq!(out[1].description, None);
        assert!(out.iter().all(|s| s.is_dangerous));
        assert_eq!(runner.calls.get(), 1);
    }

    #[test]
    fn generators_rerun_per_request() {
        let tree = tree();
        let runner = runner("node\n");
        let engine = Engine::new(&tree, &runner);

        engine.complete(&["rm"], "");
        engine.complete(&["rm", "node"], "");
        assert_eq!(runner.calls.get(), 2);
    }

    #[test]
    fn unknown_option_fails_open() {
        let tree = tree();
        let runner = runner("node\n");
        let out = Engine::new(&tree, &runner).complete(&["rm", "--nope"], "");
        assert!(out.is_empty());
        assert_eq!(runner.calls.get(), 0);
    }

    #[test]
    fn filled_slots_offer_nothing() {
        let tree = tree();
        let runner = runner("");
        let out = Engine::new(&tree, &runner).complete(&["ls", "extra"], "");
        assert!(out.is_empty());
    }
}
