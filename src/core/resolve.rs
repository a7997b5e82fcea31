//! Walking typed tokens against the spec tree.
//!
//! Resolution is a deterministic left-to-right walk. While no positional
//! value has been seen, a token equal to a child's name or alias descends
//! into that child. Recognised options may appear anywhere before `--`
//! without ending descent; the first other token ends it, and it and
//! everything after it are arguments of the current command.

use tracing::{instrument, trace};

use crate::core::spec::{ArgNode, CommandNode, OptionNode};
use crate::core::validate::SpecTree;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown option `{option}` for `{command}`")]
    UnknownOption { command: String, option: String },

    #[error("option `{option}` does not take a value")]
    UnexpectedValue { option: String },
}

/// What the next word fills.
#[derive(Debug, Clone, Copy)]
pub enum Expecting<'a> {
    /// The value of an option that was just typed.
    OptionValue { option: &'a OptionNode, arg: &'a ArgNode },
    /// The next positional slot.
    Positional(&'a ArgNode),
    /// Every declared slot is already filled.
    Nothing,
}

/// Result of walking a token path.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// Root first, current command last.
    pub path: Vec<&'a CommandNode>,
    /// Own options, then persistent options of ancestors (nearest first).
    pub options: Vec<&'a OptionNode>,
    /// Tokens consumed as positional values of the current command.
    pub positionals: Vec<String>,
    pub expecting: Expecting<'a>,
    /// `--` was seen; later words are positional.
    pub options_ended: bool,
}

impl<'a> Resolution<'a> {
    pub fn command(&self) -> &'a CommandNode {
        self.path[self.path.len() - 1]
    }

    /// Canonical names joined, e.g. `mise plugins install`.
    pub fn command_path(&self) -> String {
        self.path
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Subcommands are only reachable until a positional value or `--`.
    pub fn can_descend(&self) -> bool {
        self.positionals.is_empty() && !self.options_ended
    }

    pub fn find_option(&self, name: &str) -> Option<&'a OptionNode> {
        self.options
            .iter()
            .copied()
            .find(|o| o.names.contains(name))
    }
}

/// Options visible at the end of `path`.
pub fn visible_options<'a>(path: &[&'a CommandNode]) -> Vec<&'a OptionNode> {
    let Some((current, ancestors)) = path.split_last() else {
        return Vec::new();
    };
    let own = current.options.iter();
    let inherited = ancestors
        .iter()
        .rev()
        .flat_map(|node| {
            node.options
                .iter()
                .filter(|o| o.is_persistent)
        });
    own.chain(inherited).collect()
}

impl SpecTree {
    /// Resolve completed tokens (the word under the cursor excluded).
    #[instrument(level = "trace", skip_all, fields(tokens = tokens.len()))]
    pub fn resolve<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Result<Resolution<'_>, ResolveError> {
        let mut path = vec![self.root()];
        let mut positionals: Vec<String> = Vec::new();
        let mut options_ended = false;
        let mut pending: Option<&OptionNode> = None;

        for token in tokens {
            let token = token.as_ref();

            if let Some(option) = pending.take() {
                let optional = option
                    .args
                    .as_ref()
                    .is_some_and(|a| a.is_optional);
                if !(optional && token.starts_with('-')) {
                    trace!(option = option.names.canonical(), value = token, "option value");
                    continue;
                }
            }

            if !options_ended {
                if token == "--" {
                    options_ended = true;
                    continue;
                }
                if token.len() > 1 && token.starts_with('-') {
                    let visible = visible_options(&path);
                    pending = consume_option(&path, &visible, token)?;
                    continue;
                }
                if positionals.is_empty() {
                    let current = path[path.len() - 1];
                    if let Some(child) = current.find_subcommand(token) {
                        trace!(command = child.name(), "descend");
                        path.push(child);
                        continue;
                    }
                }
            }

            positionals.push(token.to_string());
        }

        let options = visible_options(&path);
        let current = path[path.len() - 1];
        let expecting = match pending {
            Some(option) => match &option.args {
                Some(arg) => Expecting::OptionValue { option, arg },
                None => Expecting::Nothing,
            },
            None => next_positional(current, positionals.len()),
        };

        Ok(Resolution { path, options, positionals, expecting, options_ended })
    }
}

fn next_positional(
    command: &CommandNode,
    consumed: usize,
) -> Expecting<'_> {
    match command.args.get(consumed) {
        Some(arg) => Expecting::Positional(arg),
        None => match command.args.last() {
            Some(last) if last.is_variadic => Expecting::Positional(last),
            _ => Expecting::Nothing,
        },
    }
}

/// Consume one option token; returns the option if its value is the next token.
fn consume_option<'a>(
    path: &[&'a CommandNode],
    visible: &[&'a OptionNode],
    token: &str,
) -> Result<Option<&'a OptionNode>, ResolveError> {
    let find = |name: &str| {
        visible
            .iter()
            .copied()
            .find(|o| o.names.contains(name))
    };
    let unknown = || ResolveError::UnknownOption {
        command: path
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(" "),
        option: token.to_string(),
    };

    // --name or --name=value
    if token.starts_with("--") {
        let (name, value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        let option = find(name).ok_or_else(unknown)?;
        return match (value, option.takes_value()) {
            (Some(_), false) => Err(ResolveError::UnexpectedValue { option: name.to_string() }),
            (Some(_), true) => Ok(None),
            (None, takes_value) => Ok(takes_value.then_some(option)),
        };
    }

    if let Some(option) = find(token) {
        return Ok(option
            .takes_value()
            .then_some(option));
    }

    // short cluster: -vv, -fa, -j4
    let flags = &token[1..];
    for (idx, c) in flags.char_indices() {
        let name = format!("-{c}");
        let option = find(&name).ok_or_else(unknown)?;
        if option.takes_value() {
            let rest = &flags[idx + c.len_utf8()..];
            return Ok(rest
                .is_empty()
                .then_some(option));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> SpecTree {
        let root = CommandNode::new("tool")
            .option(OptionNode::new(["-v", "--verbose"]).persistent())
            .option(OptionNode::new(["-C", "--cd"]).persistent().arg(ArgNode::new("DIR")))
            .option(OptionNode::new(["-V", "--version"]))
            .subcommand(
                CommandNode::new(["plugins", "p"])
                    .option(OptionNode::new(["-u", "--urls"]))
                    .subcommand(
                        CommandNode::new(["install", "i"])
                            .option(OptionNode::new(["-f", "--force"]))
                            .option(OptionNode::new(["-j", "--jobs"]).arg(ArgNode::new("JOBS")))
                            .arg(ArgNode::new("NEW_PLUGIN").optional())
                            .arg(ArgNode::new("GIT_URL").optional()),
                    ),
            )
            .subcommand(CommandNode::new("exec").arg(ArgNode::new("COMMAND").variadic()));
        SpecTree::new(root).expect("valid")
    }

    fn names(options: &[&OptionNode]) -> Vec<String> {
        options
            .iter()
            .map(|o| o.names.canonical().to_string())
            .collect()
    }

    #[test]
    fn persistent_options_are_inherited_nearest_first() {
        let tree = tree();
        let res = tree
            .resolve(&["plugins", "install"])
            .unwrap();

        assert_eq!(res.command_path(), "tool plugins install");
        assert_eq!(names(&res.options), ["-f", "-j", "-v", "-C"]);
        assert!(res.find_option("--version").is_none());
    }

    #[test]
    fn aliases_resolve() {
        let tree = tree();
        let res = tree.resolve(&["p", "i"]).unwrap();
        assert_eq!(res.command().name(), "install");
    }

    #[test]
    fn positional_ends_descent() {
        let tree = tree();
        let res = tree
            .resolve(&["plugins", "install", "node", "install"])
            .unwrap();

        assert_eq!(res.command().name(), "install");
        assert_eq!(res.positionals, ["node", "install"]);
        assert!(!res.can_descend());
        assert!(matches!(res.expecting, Expecting::Nothing));
    }

    #[test]
    fn options_may_precede_subcommands() {
        let tree = tree();
        let res = tree
            .resolve(&["-vv", "--cd", "/tmp", "plugins", "-u", "install", "-j4"])
            .unwrap();

        assert_eq!(res.command_path(), "tool plugins install");
        assert!(res.positionals.is_empty());
        match res.expecting {
            Expecting::Positional(arg) => assert_eq!(arg.name, "NEW_PLUGIN"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn trailing_option_expects_its_value() {
        let tree = tree();
        let res = tree
            .resolve(&["plugins", "install", "--jobs"])
            .unwrap();

        match res.expecting {
            Expecting::OptionValue { option, arg } => {
                assert_eq!(option.names.canonical(), "-j");
                assert_eq!(arg.name, "JOBS");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn inline_values_are_consumed() {
        let tree = tree();
        let res = tree
            .resolve(&["--cd=/tmp", "plugins"])
            .unwrap();
        assert_eq!(res.command().name(), "plugins");

        let err = tree
            .resolve(&["--verbose=3"])
            .unwrap_err();
        assert_eq!(err, ResolveError::UnexpectedValue { option: "--verbose".into() });
    }

    #[test]
    fn double_dash_makes_everything_positional() {
        let tree = tree();
        let res = tree
            .resolve(&["exec", "--", "-v", "plugins"])
            .unwrap();

        assert_eq!(res.positionals, ["-v", "plugins"]);
        assert!(res.options_ended);
        match res.expecting {
            Expecting::Positional(arg) => assert_eq!(arg.name, "COMMAND"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_option_is_a_miss() {
        let tree = tree();
        let err = tree
            .resolve(&["plugins", "--bogus"])
            .unwrap_err();
        assert_eq!(err, ResolveError::UnknownOption { command: "tool plugins".into(), option: "--bogus".into() });

        // non-persistent root flag is not visible below the root
        assert!(tree
            .resolve(&["plugins", "-V"])
            .is_err());
    }

    #[test]
    fn empty_path_is_the_root() {
        let tree = tree();
        let res = tree
            .resolve::<&str>(&[])
            .unwrap();
        assert_eq!(res.command().name(), "tool");
        assert!(res.can_descend());
    }
}
