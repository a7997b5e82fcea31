//! Load-time validation of the spec tree.
//!
//! [`SpecTree::new`] is the only way to obtain a resolvable tree, so every
//! structural invariant is checked once when the spec is loaded instead of
//! being assumed by the resolver.

use std::collections::HashSet;

use miette::Diagnostic;
use serde::Serialize;

use crate::core::spec::{ArgNode, CommandNode};

/// Structural problems found in a spec.
#[derive(Debug, Clone, PartialEq, Eq, Diagnostic, thiserror::Error)]
pub enum SpecError {
    #[error("empty name declared under `{path}`")]
    #[diagnostic(code(spec::empty_name), help("every command, option and argument needs a non-empty name"))]
    EmptyName { path: String },

    #[error("subcommand name `{name}` is declared twice under `{path}`")]
    #[diagnostic(
        code(spec::duplicate_subcommand),
        help("sibling commands must not share a name or alias")
    )]
    DuplicateSubcommand { path: String, name: String },

    #[error("option `{name}` on `{path}` is already in scope")]
    #[diagnostic(
        code(spec::duplicate_option),
        help("option names must be unique across the command and the persistent options of its ancestors")
    )]
    DuplicateOption { path: String, name: String },

    #[error("variadic argument `{arg}` on `{path}` is not the last positional")]
    #[diagnostic(
        code(spec::variadic_not_last),
        help("a command may declare at most one variadic positional, and it must come last")
    )]
    VariadicNotLast { path: String, arg: String },

    #[error("generator for `{arg}` on `{path}` has an empty script")]
    #[diagnostic(code(spec::empty_generator))]
    EmptyGeneratorScript { path: String, arg: String },
}

/// Node counts reported by `validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecStats {
    pub commands: usize,
    pub hidden_commands: usize,
    pub options: usize,
    pub persistent_options: usize,
    pub args: usize,
    pub generators: usize,
    pub max_depth: usize,
}

/// A validated, immutable spec.
#[derive(Debug, Clone)]
pub struct SpecTree {
    root: CommandNode,
}

impl SpecTree {
    /// Validate `root`, returning the first problem found.
    pub fn new(root: CommandNode) -> Result<Self, SpecError> {
        match validate(&root)
            .into_iter()
            .next()
        {
            Some(err) => Err(err),
            None => Ok(Self { root }),
        }
    }

    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    pub fn stats(&self) -> SpecStats {
        let mut stats = SpecStats::default();
        for (depth, node) in self.root.walk() {
            stats.commands += 1;
            stats.hidden_commands += usize::from(node.hidden);
            stats.options += node.options.len();
            stats.persistent_options += node
                .options
                .iter()
                .filter(|o| o.is_persistent)
                .count();
            stats.args += node.args.len();
            stats.generators += node
                .args
                .iter()
                .chain(
                    node.options
                        .iter()
                        .filter_map(|o| o.args.as_ref()),
                )
                .map(|a| a.generators.len())
                .sum::<usize>();
            stats.max_depth = stats.max_depth.max(depth);
        }
        stats
    }
}

/// Collect every structural problem in the tree, in depth-first order.
pub fn validate(root: &CommandNode) -> Vec<SpecError> {
    let mut errors = Vec::new();
    let mut path = Vec::new();
    check_node(root, &mut path, &HashSet::new(), &mut errors);
    errors
}

fn check_node<'a>(
    node: &'a CommandNode,
    path: &mut Vec<&'a str>,
    inherited: &HashSet<&'a str>,
    errors: &mut Vec<SpecError>,
) {
    path.push(node.name());
    let here = path.join(" ");

    if node
        .names
        .iter()
        .any(str::is_empty)
    {
        errors.push(SpecError::EmptyName { path: here.clone() });
    }

    // options: own names against each other and against inherited persistent ones
    let mut own = HashSet::new();
    let mut scope = inherited.clone();
    for option in &node.options {
        for name in option.names.iter() {
            if name.is_empty() {
                errors.push(SpecError::EmptyName { path: here.clone() });
            } else if !own.insert(name) || inherited.contains(name) {
                errors.push(SpecError::DuplicateOption { path: here.clone(), name: name.to_string() });
            }
            if option.is_persistent {
                scope.insert(name);
            }
        }
        if let Some(arg) = &option.args {
            check_arg(arg, &here, errors);
        }
    }

    // positionals
    let last = node
        .args
        .len()
        .saturating_sub(1);
    for (idx, arg) in node
        .args
        .iter()
        .enumerate()
    {
        if arg.is_variadic && idx != last {
            errors.push(SpecError::VariadicNotLast { path: here.clone(), arg: arg.name.clone() });
        }
        check_arg(arg, &here, errors);
    }

    // siblings
    let mut siblings = HashSet::new();
    for child in &node.subcommands {
        for name in child.names.iter() {
            if !name.is_empty() && !siblings.insert(name) {
                errors.push(SpecError::DuplicateSubcommand { path: here.clone(), name: name.to_string() });
            }
        }
    }

    for child in &node.subcommands {
        check_node(child, path, &scope, errors);
    }
    path.pop();
}

fn check_arg(
    arg: &ArgNode,
    path: &str,
    errors: &mut Vec<SpecError>,
) {
    if arg.name.is_empty() {
        errors.push(SpecError::EmptyName { path: path.to_string() });
    }
    if arg
        .generators
        .iter()
        .any(|g| g.script.is_empty())
    {
        errors.push(SpecError::EmptyGeneratorScript { path: path.to_string(), arg: arg.name.clone() });
    }
}
