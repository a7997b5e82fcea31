//! Completion spec for `mise`, the front-end to your dev env.
//!
//! Mirrors a single `mise` CLI surface. Descriptions are copied from the
//! tool's help output and are treated as opaque display text.

use crate::core::generator::Generator;
use crate::core::spec::{ArgNode, CommandNode, OptionNode, Template};
use crate::core::suggestion::{PRIORITY_TOP_THRESHOLD, SuggestionOverrides};
use crate::core::validate::{SpecError, SpecTree};

/// Executable used by generators unless configured otherwise.
pub const DEFAULT_PROGRAM: &str = "mise";

const HELP: &str = "Print this message or the help of the given subcommand(s)";
const JOBS: &str = "Number of jobs to run in parallel [default: 4] [env: MISE_JOBS=]";
const RAW: &str = "Directly pipe stdin/stdout/stderr from plugin to user Sets --jobs=1";
const SHELLS: [&str; 5] = ["bash", "fish", "nu", "xonsh", "zsh"];

/// Names of installed plugins, from `<program> plugins ls --quiet`.
pub fn installed_plugin_names(
    program: &str,
    overrides: &SuggestionOverrides,
) -> Generator {
    let base = SuggestionOverrides::default()
        .description("Plugin name")
        .priority(PRIORITY_TOP_THRESHOLD);
    Generator::lines([program, "plugins", "ls", "--quiet"], base.merged(overrides))
}

/// Flags accepted by every `mise` command.
pub fn common_options() -> Vec<OptionNode> {
    vec![
        OptionNode::new(["-h", "--help"])
            .description("Print help (see more with '--help')")
            .persistent(),
        OptionNode::new(["-v", "--verbose"])
            .description("Show extra output (use -vv for even more)")
            .persistent(),
        OptionNode::new(["-q", "--quiet"])
            .description("Suppress non-error messages")
            .persistent(),
        OptionNode::new(["-P", "--profile"])
            .description("Set the profile (environment)")
            .arg(ArgNode::new("PROFILE"))
            .persistent(),
        OptionNode::new(["-C", "--cd"])
            .description("Change directory before running command")
            .arg(ArgNode::new("DIR").template(Template::Folders))
            .persistent(),
        OptionNode::new("--log-level")
            .description("Set the log output verbosity")
            .hidden()
            .arg(ArgNode::new("LEVEL").suggestions(["error", "warn", "info", "debug", "trace"]))
            .persistent(),
        OptionNode::new("--trace")
            .description("Sets log level to trace")
            .hidden()
            .persistent(),
        OptionNode::new("--debug")
            .description("Sets log level to debug")
            .hidden()
            .persistent(),
    ]
}

/// Build and validate the `mise` tree, pointing generators at `program`.
pub fn spec(program: &str) -> Result<SpecTree, SpecError> {
    SpecTree::new(command(program))
}

/// The unvalidated root node.
pub fn command(program: &str) -> CommandNode {
    CommandNode::new("mise")
        .description("The front-end to your dev env")
        .subcommand(activate())
        .subcommand(alias())
        .subcommand(backend())
        .subcommand(CommandNode::new("bin-paths").description("List all the active runtime bin paths"))
        .subcommand(cache())
        .subcommand(
            CommandNode::new("completion")
                .description("Generate shell completions")
                .arg(
                    ArgNode::new("SHELL")
                        .description("Shell type to generate completions for [possible values: bash, fish, zsh]")
                        .suggestions(["bash", "fish", "zsh"]),
                ),
        )
        .subcommand(config())
        .subcommand(
            CommandNode::new("current")
                .description("Shows current active and installed runtime versions")
                .arg(ArgNode::new("PLUGIN").description(
                    "Plugin to show versions of\n\
                     e.g.: ruby, node, cargo:eza, npm:prettier, etc",
                )),
        )
        .subcommand(CommandNode::new("deactivate").description("Disable mise for current shell session"))
        .subcommand(
            CommandNode::new("direnv")
                .description("Output direnv function to use mise inside direnv")
                .subcommand(
                    CommandNode::new("activate").description("Output direnv function to use mise inside direnv"),
                )
                .subcommand(help()),
        )
        .subcommand(
            CommandNode::new(["doctor", "dr"]).description("Check mise installation for possible problems [aliases: dr]"),
        )
        .subcommand(env())
        .subcommand(exec())
        .subcommand(generate())
        .subcommand(global())
        .subcommand(
            CommandNode::new("implode")
                .description("Removes mise CLI and all related data")
                .option(
                    OptionNode::new(["-n", "--dry-run"])
                        .description("List directories that would be removed without actually removing them"),
                ),
        )
        .subcommand(install())
        .subcommand(
            CommandNode::new("latest")
                .description("Gets the latest available version for a plugin")
                .arg(
                    ArgNode::new("TOOL@VERSION")
                        .description("Tool to get the latest version of")
                        .optional(),
                )
                .option(
                    OptionNode::new(["-i", "--installed"])
                        .description("Show latest installed instead of available version"),
                ),
        )
        .subcommand(link())
        .subcommand(local())
        .subcommand(ls())
        .subcommand(ls_remote())
        .subcommand(
            CommandNode::new("outdated")
                .description("Shows outdated tool versions")
                .arg(
                    ArgNode::new("TOOL@VERSION")
                        .description(
                            "Tool(s) to show outdated versions for\n\
                             e.g.: node@20 python@3.10\n\
                             If not specified, all tools in global and local configs will be shown",
                        )
                        .optional(),
                )
                .option(json()),
        )
        .subcommand(plugins(program))
        .subcommand(prune())
        .subcommand(CommandNode::new("registry").description("[experimental] List available tools"))
        .subcommand(CommandNode::new("reshim").description("Rebuilds the shim farm"))
        .subcommand(run())
        .subcommand(
            CommandNode::new("self-update")
                .description("Updates mise itself")
                .arg(
                    ArgNode::new("VERSION")
                        .description("Update to a specific version")
                        .optional(),
                )
                .option(OptionNode::new(["-f", "--force"]).description("Update even if already up to date"))
                .option(OptionNode::new("--no-plugins").description("Disable auto-updating plugins")),
        )
        .subcommand(set())
        .subcommand(settings())
        .subcommand(shell())
        .subcommand(sync())
        .subcommand(tasks())
        .subcommand(trust())
        .subcommand(uninstall())
        .subcommand(unset())
        .subcommand(upgrade())
        .subcommand(CommandNode::new("usage").description("Generate a usage CLI spec"))
        .subcommand(use_())
        .subcommand(CommandNode::new("version").description("Show mise version"))
        .subcommand(watch())
        .subcommand(
            CommandNode::new("where")
                .description("Display the installation path for a runtime")
                .arg(ArgNode::new("TOOL@VERSION").description(
                    "Tool(s) to look up\n\
                     e.g.: ruby@3\n\
                     if \"@<PREFIX>\" is specified, it will show the latest installed version\n\
                     that matches the prefix\n\
                     otherwise, it will show the current, active installed version",
                )),
        )
        .subcommand(which())
        .subcommand(help())
        .options(common_options())
        .option(OptionNode::new(["-V", "--version"]).description("Print version"))
}

fn help() -> CommandNode {
    CommandNode::new("help").description(HELP)
}

fn jobs() -> OptionNode {
    OptionNode::new(["-j", "--jobs"])
        .description(JOBS)
        .arg(ArgNode::new("JOBS"))
}

fn raw() -> OptionNode {
    OptionNode::new("--raw").description(RAW)
}

fn json() -> OptionNode {
    OptionNode::new(["-J", "--json"]).description("Output in JSON format")
}

fn no_header(description: &str) -> OptionNode {
    OptionNode::new("--no-header").description(description)
}

fn activate() -> CommandNode {
    CommandNode::new("activate")
        .description("Initializes mise in the current shell session")
        .arg(
            ArgNode::new("SHELL_TYPE")
                .description("Shell type to generate the script for [possible values: bash, fish, nu, xonsh, zsh]")
                .suggestions(SHELLS),
        )
        .option(OptionNode::new("--shims").description(
            "Use shims instead of modifying PATH\n\
             Effectively the same as:\n\
             PATH=\"$HOME/.local/share/mise/shims:$PATH\"",
        ))
}

fn alias() -> CommandNode {
    CommandNode::new(["alias", "a"])
        .description("Manage aliases [aliases: a]")
        .subcommand(
            CommandNode::new("get")
                .description("Show an alias for a plugin")
                .arg(ArgNode::new("ALIAS").description("The alias to show"))
                .arg(ArgNode::new("PLUGIN").description("The plugin to show the alias for")),
        )
        .subcommand(
            CommandNode::new(["ls", "list"])
                .description(
                    "List aliases\n\
                     Shows the aliases that can be specified.\n\
                     These can come from user config or from plugins in `bin/list-aliases`. [aliases: list]",
                )
                .arg(ArgNode::new("PLUGIN").description("Show aliases for <PLUGIN>"))
                .option(no_header("Don't show table header")),
        )
        .subcommand(
            CommandNode::new(["set", "add", "create"])
                .description("Add/update an alias for a plugin [aliases: add, create]")
                .arg(ArgNode::new("ALIAS").description("The alias to set"))
                .arg(ArgNode::new("PLUGIN").description("The plugin to set the alias for"))
                .arg(ArgNode::new("value").description("The value to set the alias to")),
        )
        .subcommand(
            CommandNode::new(["unset", "rm", "remove", "delete", "del"])
                .description("Clears an alias for a plugin [aliases: rm, remove, delete, del]")
                .arg(ArgNode::new("ALIAS").description("The alias to remove"))
                .arg(ArgNode::new("PLUGIN").description("The plugin to remove the alias from")),
        )
        .subcommand(help())
        .option(
            OptionNode::new(["-p", "--plugin"])
                .description("Filter aliases by plugin")
                .arg(ArgNode::new("PLUGIN").description("Plugin to filter aliases by")),
        )
        .option(no_header("Don't show table header"))
}

fn backend() -> CommandNode {
    CommandNode::new(["backend", "b"])
        .description("Manage backends")
        .subcommand(CommandNode::new(["ls", "list"]).description("List built-in backends [aliases: b]"))
        .subcommand(help())
}

fn cache() -> CommandNode {
    CommandNode::new("cache")
        .description("Manage the mise cache")
        .subcommand(
            CommandNode::new(["clear", "c", "clean"])
                .description("Deletes all cache files in mise [aliases: c]")
                .arg(
                    ArgNode::new("PLUGIN")
                        .description(
                            "Plugin(s) to clear cache for\n\
                             e.g.: node, python",
                        )
                        .optional()
                        .variadic(),
                ),
        )
        .subcommand(help())
}

fn config() -> CommandNode {
    CommandNode::new(["config", "cfg"])
        .description("[experimental] Manage config files [aliases: cfg]")
        .subcommand(CommandNode::new("ls").description("[experimental] List config files currently in use"))
        .subcommand(
            CommandNode::new(["generate", "g"]).description("[experimental] Generate an .mise.toml file [aliases: g]"),
        )
        .subcommand(help())
        .option(no_header("Do not print table header"))
}

fn env() -> CommandNode {
    CommandNode::new(["env", "e"])
        .description("Exports env vars to activate mise a single time [aliases: e]")
        .arg(
            ArgNode::new("TOOL@VERSION")
                .description("Tool(s) to use")
                .optional()
                .variadic(),
        )
        .option(json())
        .option(
            OptionNode::new(["-s", "--shell"])
                .description(
                    "Shell type to generate environment variables for [possible values: bash, fish, nu, xonsh, zsh]",
                )
                .arg(ArgNode::new("SHELL").suggestions(SHELLS)),
        )
}

fn exec() -> CommandNode {
    // Only the trailing COMMAND is variadic; tool specs come first, one per slot.
    CommandNode::new(["exec", "x"])
        .description("Execute a command with tool(s) set [aliases: x]")
        .arg(
            ArgNode::new("TOOL@VERSION")
                .description("Tool(s) to install e.g.: node@20 python@3.10")
                .optional(),
        )
        .arg(
            ArgNode::new("COMMAND")
                .description("Command string to execute (same as --command)")
                .optional()
                .variadic(),
        )
        .option(
            OptionNode::new(["-c", "--command"])
                .description("Command string to execute")
                .arg(ArgNode::new("C")),
        )
        .option(jobs())
        .option(OptionNode::new("--raw").description(
            "Directly pipe stdin/stdout/stderr from plugin to user\n\
             Sets --jobs=1",
        ))
}

fn generate() -> CommandNode {
    CommandNode::new(["generate", "gen"])
        .description("[experimental] Generate files for various tools/services [aliases: gen]")
        .subcommand(CommandNode::new("git-pre-commit").description("[experimental] Generate a git pre-commit hook"))
        .subcommand(
            CommandNode::new("github-action").description("[experimental] Generate a GitHub Action workflow file"),
        )
        .subcommand(help())
}

fn global() -> CommandNode {
    CommandNode::new(["global", "g"])
        .description("Sets/gets the global tool version(s)")
        .hidden()
        .option(OptionNode::new("--pin").description(
            "Save exact version to `~/.tool-versions`\n\
             e.g.: `mise global --pin node@20` will save `node 20.0.0` to ~/.tool-versions",
        ))
        .option(OptionNode::new("--fuzzy").description(
            "Save fuzzy version to `~/.tool-versions`\n\
             e.g.: `mise global --fuzzy node@20` will save `node 20` to ~/.tool-versions\n\
             this is the default behavior unless MISE_ASDF_COMPAT=1",
        ))
        .option(
            OptionNode::new("--remove")
                .description("Remove the plugin(s) from ~/.tool-versions")
                .arg(ArgNode::new("PLUGIN")),
        )
        .option(OptionNode::new("--path").description("Get the path of the global config file"))
        .arg(
            ArgNode::new("TOOL@VERSION")
                .description(
                    "Tool(s) to add to .tool-versions\n\
                     e.g.: node@20\n\
                     If this is a single tool with no version, the current value of the global\n\
                     .tool-versions will be displayed",
                )
                .optional()
                .variadic(),
        )
}

fn install() -> CommandNode {
    CommandNode::new(["install", "i"])
        .description("Install a tool version [aliases: i]")
        .arg(
            ArgNode::new("TOOL@VERSION")
                .description("Tool(s) to install e.g.: node@20")
                .optional()
                .variadic(),
        )
        .option(OptionNode::new(["-f", "--force"]).description("Force reinstall even if already installed"))
        .option(jobs())
        .option(raw())
}

fn link() -> CommandNode {
    CommandNode::new(["link", "ln"])
        .description("Symlinks a tool version into mise [aliases: ln]")
        .arg(ArgNode::new("TOOL@VERSION").description("Tool name and version to create a symlink for"))
        .arg(ArgNode::new("PATH").description(
            "The local path to the tool version\n\
             e.g.: ~/.nvm/versions/node/v20.0.0",
        ))
        .option(OptionNode::new(["-f", "--force"]).description("Overwrite existing tool version"))
}

fn local() -> CommandNode {
    CommandNode::new(["local", "l"])
        .description("Sets/gets tool version in local .tool-versions or .mise.toml")
        .hidden()
        .option(OptionNode::new("--pin").description(
            "Save exact version to `~/.mise.toml`\n\
             e.g.: `mise local --pin node@20` will save `node 20.0.0` to ~/.mise.toml",
        ))
        .option(OptionNode::new("--fuzzy").description(
            "Save fuzzy version to `~/.mise.toml`\n\
             e.g.: `mise local --fuzzy node@20` will save `node 20` to ~/.mise.toml\n\
             this is the default behavior unless MISE_ASDF_COMPAT=1",
        ))
        .option(
            OptionNode::new("--remove")
                .description("Remove the plugin(s) from ~/.mise.toml")
                .arg(ArgNode::new("PLUGIN")),
        )
        .option(OptionNode::new("--path").description("Get the path of the local config file"))
        .arg(
            ArgNode::new("TOOL@VERSION")
                .description(
                    "Tool(s) to add to .tool-versions\n\
                     e.g.: node@20\n\
                     If this is a single tool with no version, the current value of the local\n\
                     .tool-versions will be displayed",
                )
                .optional()
                .variadic(),
        )
}

fn ls() -> CommandNode {
    CommandNode::new(["ls", "list"])
        .description("List installed and active tool versions [aliases: list]")
        .arg(
            ArgNode::new("PLUGIN")
                .description("Only show tool versions from [PLUGIN]")
                .optional(),
        )
        .option(
            OptionNode::new(["-c", "--current"])
                .description("Only show tool versions currently specified in a .tool-versions/.mise.toml"),
        )
        .option(
            OptionNode::new(["-g", "--global"])
                .description("Only show tool versions currently specified in a the global .tool-versions/.mise.toml"),
        )
        .option(OptionNode::new(["-i", "--installed"]).description(
            "Only show tool versions that are installed (Hides tools defined in .tool-versions/.mise.toml but not installed)",
        ))
        .option(json())
        .option(OptionNode::new(["-m", "--missing"]).description("Display missing tool versions"))
        .option(
            OptionNode::new("--prefix")
                .description("Display versions matching this prefix")
                .arg(ArgNode::new("PREFIX")),
        )
        .option(no_header("Don't display headers"))
}

fn ls_remote() -> CommandNode {
    CommandNode::new("ls-remote")
        .description("List runtime versions available for install")
        .arg(ArgNode::new("TOOL@VERSION").description("Plugin to get versions for"))
        .arg(ArgNode::new("PREFIX").description(
            "The version prefix to use when querying the latest version\n\
             same as the first argument after the \"@\"",
        ))
        .option(OptionNode::new("--all").description("Show all installed plugins and versions"))
}

fn plugins(program: &str) -> CommandNode {
    let installed = || installed_plugin_names(program, &SuggestionOverrides::default());

    CommandNode::new(["plugins", "p"])
        .description("Manage plugins [aliases: p]")
        .subcommand(
            CommandNode::new(["install", "i", "a", "add"])
                .description("Install a plugin [aliases: i, a, add]")
                .arg(
                    ArgNode::new("NEW_PLUGIN")
                        .description(
                            "The name of the plugin to install\n\
                             e.g.: node, ruby\n\
                             Can specify multiple plugins: `mise plugins install node ruby python`",
                        )
                        .optional(),
                )
                .arg(
                    ArgNode::new("GIT_URL")
                        .description("The git url of the plugin")
                        .optional(),
                )
                .option(OptionNode::new(["-f", "--force"]).description("Reinstall even if plugin exists"))
                .option(OptionNode::new(["-a", "--all"]).description("Install all missing plugins")),
        )
        .subcommand(
            CommandNode::new(["link", "ln"])
                .description("Symlinks a plugin into mise [aliases: ln]")
                .arg(
                    ArgNode::new("NAME")
                        .description(
                            "The name of the plugin\n\
                             e.g.: node, ruby",
                        )
                        .optional(),
                )
                .arg(
                    ArgNode::new("PATH")
                        .description(
                            "The local path to the plugin\n\
                             e.g.: ./mise-node",
                        )
                        .optional(),
                )
                .option(OptionNode::new(["-f", "--force"]).description("Overwrite existing plugin")),
        )
        .subcommand(
            CommandNode::new(["uninstall", "remove", "rm"])
                .description("Removes a plugin [aliases: remove, rm]")
                .arg(
                    ArgNode::new("PLUGIN")
                        .description("Plugin(s) to remove")
                        .optional()
                        .dangerous()
                        .variadic()
                        .generator(installed()),
                )
                .option(
                    OptionNode::new(["-p", "--purge"])
                        .description("Also remove the plugin's installs, downloads, and cache"),
                )
                .option(OptionNode::new(["-a", "--all"]).description("Remove all plugins")),
        )
        .subcommand(
            CommandNode::new(["update", "up", "upgrade"])
                .description("Updates a plugin to the latest version [aliases: up, upgrade]")
                .arg(
                    ArgNode::new("PLUGIN")
                        .description("Plugin(s) to update")
                        .optional()
                        .variadic()
                        .generator(installed()),
                )
                .option(
                    OptionNode::new(["-j", "--jobs"])
                        .description(
                            "Number of jobs to run in parallel\n\
                             Default: 4",
                        )
                        .arg(ArgNode::new("JOBS")),
                ),
        )
        .subcommand(
            CommandNode::new(["ls", "list"])
                .description("List installed plugins [aliases: list]")
                .option(OptionNode::new(["-c", "--core"]).description(
                    "The built-in plugins only\n\
                     Normally these are not shown",
                ))
                .option(OptionNode::new("--user").description("List installed plugins"))
                .option(OptionNode::new(["-u", "--urls"]).description(
                    "Show the git url for each plugin\n\
                     e.g.: e.g.: https://github.com/asdf-vm/asdf-nodejs.git",
                )),
        )
        .subcommand(
            CommandNode::new(["ls-remote", "list-remote", "list-all"])
                .description("List all available remote plugins [aliases: list-remote, list-all]")
                .option(OptionNode::new(["-u", "--urls"]).description(
                    "Show the git url for each plugin\n\
                     e.g.: e.g.: https://github.com/mise-plugins/mise-poetry.git",
                )),
        )
        .subcommand(help())
        .option(OptionNode::new(["-c", "--core"]).description(
            "The built-in plugins only\n\
             Normally these are not shown",
        ))
        .option(OptionNode::new(["-u", "--urls"]).description(
            "Show the git url for each plugin\n\
             e.g.: https://github.com/asdf-vm/asdf-nodejs.git",
        ))
}

fn prune() -> CommandNode {
    CommandNode::new("prune")
        .description("Delete unused versions of tools")
        .arg(
            ArgNode::new("PLUGIN")
                .description("Prune only versions from this plugin(s)")
                .optional()
                .dangerous()
                .variadic(),
        )
        .option(OptionNode::new(["-n", "--dry-run"]).description("Do not actually delete anything"))
        .option(OptionNode::new("--configs").description(
            "Prune only tracked and trusted configuration links that point to non-existent configurations",
        ))
        .option(OptionNode::new("--tools").description("Prune only unused versions of tools"))
}

fn run() -> CommandNode {
    CommandNode::new(["run", "r"])
        .description("[experimental] Run a tasks [aliases: r]")
        .arg(ArgNode::new("TASK").description(
            "Tasks to run\n\
             Can specify multiple tasks by separating with `:::`\n\
             e.g.: mise run task1 arg1 arg2 ::: task2 arg1 arg2 [default: default]",
        ))
        .arg(ArgNode::new("ARGS").description("Arguments to pass to the tasks. Use \":::\" to separate tasks"))
        .option(
            OptionNode::new(["-n", "--dry-run"])
                .description("Don't actually run the tasks(s), just print them in order of execution"),
        )
        .option(OptionNode::new(["-f", "--force"]).description("Force the tasks to run even if outputs are up to date"))
        .option(OptionNode::new(["-p", "--prefix"]).description(
            "Print stdout/stderr by line, prefixed with the tasks's label\n\
             Defaults to true if --jobs > 1\n\
             Configure with `task_output` config or `MISE_TASK_OUTPUT` env var",
        ))
        .option(OptionNode::new(["-i", "--interleave"]).description(
            "Print directly to stdout/stderr instead of by line\n\
             Defaults to true if --jobs == 1\n\
             Configure with `task_output` config or `MISE_TASK_OUTPUT` env var",
        ))
        .option(
            OptionNode::new(["-t", "--tool"])
                .description("Tool(s) to also add e.g.: node@20 python@3.10")
                .arg(ArgNode::new("TOOL@VERSION")),
        )
        .option(
            OptionNode::new(["-j", "--jobs"])
                .description(
                    "Number of tasks to run in parallel [default: 4]\n\
                     Configure with `jobs` config or `MISE_JOBS` env var [env: MISE_JOBS=]",
                )
                .arg(ArgNode::new("JOBS")),
        )
        .option(OptionNode::new(["-r", "--raw"]).description(
            "Read/write directly to stdin/stdout/stderr instead of by line\n\
             Configure with `raw` config or `MISE_RAW` env var",
        ))
        .option(OptionNode::new("--timings").description("Shows elapsed time after each tasks"))
}

fn set() -> CommandNode {
    CommandNode::new("set")
        .description("Manage environment variables")
        .arg(
            ArgNode::new("ENV_VARS")
                .description(
                    "Environment variable(s) to set\n\
                     e.g.: NODE_ENV=production",
                )
                .optional(),
        )
        .option(
            OptionNode::new(["-g", "--global"]).description("Set the environment variable in the global config file"),
        )
        .option(
            OptionNode::new("--file")
                .description("The TOML file to update")
                .arg(ArgNode::new("FILE")),
        )
}

fn settings() -> CommandNode {
    CommandNode::new("settings")
        .description("Manage settings")
        .subcommand(
            CommandNode::new("get")
                .description("Show a current setting")
                .arg(ArgNode::new("SETTING").description("The setting to show")),
        )
        .subcommand(
            CommandNode::new(["ls", "list"])
                .description("Show current settings [aliases: list]")
                .option(OptionNode::new("--keys").description("Only display key names for each setting")),
        )
        .subcommand(
            CommandNode::new(["set", "add", "create"])
                .description("Add/update a setting [aliases: add, create]")
                .arg(ArgNode::new("SETTING").description("The setting to set"))
                .arg(ArgNode::new("VALUE").description("The value to set")),
        )
        .subcommand(
            CommandNode::new(["unset", "rm", "remove", "delete", "del"])
                .description("Clears a setting [aliases: rm, remove, delete, del]")
                .arg(ArgNode::new("SETTING").description("The setting to remove")),
        )
        .subcommand(help())
        .option(OptionNode::new("--keys").description("Only display key names for each setting"))
}

fn shell() -> CommandNode {
    CommandNode::new(["shell", "sh"])
        .description("Sets a tool version for the current session [aliases: sh]")
        .arg(
            ArgNode::new("TOOL@VERSION")
                .description("Tool(s) to use")
                .optional(),
        )
        .option(jobs())
        .option(raw())
        .option(OptionNode::new(["-u", "--unset"]).description("Removes a previously set version"))
}

fn sync() -> CommandNode {
    const SYNC: &str = "Symlinks all tool versions from an external tool into mise";

    CommandNode::new("sync")
        .description("Add tool versions from external tools to mise")
        .subcommand(
            CommandNode::new("node")
                .description(SYNC)
                .option(OptionNode::new("--brew").description("Get tool versions from Homebrew"))
                .option(OptionNode::new("--nvm").description("Get tool versions from nvm"))
                .option(OptionNode::new("--nodenv").description("Get tool versions from nodenv")),
        )
        .subcommand(
            CommandNode::new("python")
                .description(SYNC)
                .option(OptionNode::new("--pyenv").description("Get tool versions from pyenv")),
        )
        .subcommand(help())
}

fn tasks() -> CommandNode {
    CommandNode::new(["tasks", "t"])
        .description("[experimental] Manage tasks [aliases: t]")
        .subcommand(
            CommandNode::new("deps").description("[experimental] Display a tree visualization of a dependency graph"),
        )
        .subcommand(CommandNode::new("edit").description("[experimental] Edit a tasks with $EDITOR"))
        .subcommand(CommandNode::new("ls").description(
            "[experimental] List available tasks to execute\n\
             These may be included from the config file or from the project's .mise/tasks directory\n\
             mise will merge all tasks from all parent directories into this list",
        ))
        .subcommand(CommandNode::new(["run", "r"]).description("[experimental] Run a tasks [aliases: r]"))
        .subcommand(help())
        .option(no_header("Do not print table header"))
        .option(OptionNode::new(["-x", "--extended"]).description("Show all columns"))
        .option(OptionNode::new("--hidden").description("Show hidden tasks"))
        .option(
            OptionNode::new("--sort")
                .description("Sort by column. Default is name")
                .arg(
                    ArgNode::new("COLUMN")
                        .default_value("name")
                        .suggestions(["name", "alias", "description", "source"]),
                ),
        )
        .option(
            OptionNode::new("--sort-order")
                .description("Sort order. Default is asc")
                .arg(
                    ArgNode::new("SORT_ORDER")
                        .default_value("asc")
                        .suggestions(["asc", "desc"]),
                ),
        )
        .option(json())
}

fn trust() -> CommandNode {
    CommandNode::new("trust")
        .description("Marks a config file as trusted")
        .arg(
            ArgNode::new("CONFIG_FILE")
                .description("The config file to trust")
                .optional(),
        )
        .option(
            OptionNode::new(["-a", "--all"]).description("Trust all config files in the current directory and its parents"),
        )
        .option(OptionNode::new("--untrust").description("No longer trust this config"))
        .option(OptionNode::new("--show").description(
            "Show the trusted status of config files from the current directory and its parents. Does not trust or untrust any files",
        ))
}

fn uninstall() -> CommandNode {
    CommandNode::new(["uninstall", "remove", "rm"])
        .description("Removes runtime versions [aliases: remove, rm]")
        .dangerous()
        .arg(
            ArgNode::new("INSTALLED_TOOL@VERSION")
                .description("Tool(s) to remove")
                .optional()
                .variadic(),
        )
        .option(OptionNode::new(["-a", "--all"]).description("Delete all installed versions"))
        .option(OptionNode::new(["-n", "--dry-run"]).description("Do not actually delete anything"))
}

fn unset() -> CommandNode {
    CommandNode::new("unset")
        .description("Remove environment variable(s) from the config file")
        .arg(
            ArgNode::new("KEYS")
                .description(
                    "Environment variable(s) to remove\n\
                     e.g.: NODE_ENV",
                )
                .optional(),
        )
        .option(
            OptionNode::new(["-f", "--file"])
                .description("Specify a file to use instead of `.mise.toml`")
                .arg(ArgNode::new("FILE")),
        )
        .option(OptionNode::new(["-g", "--global"]).description("Use the global config file"))
}

fn upgrade() -> CommandNode {
    CommandNode::new(["upgrade", "up"])
        .description("Upgrades outdated tool versions [aliases: up]")
        .arg(
            ArgNode::new("TOOL@VERSION")
                .description(
                    "Tool(s) to upgrade\n\
                     e.g.: node@20 python@3.10\n\
                     If not specified, all current tools will be upgraded",
                )
                .optional(),
        )
        .option(
            OptionNode::new(["-n", "--dry-run"]).description("Just print what would be done, don't actually do it"),
        )
        .option(jobs())
        .option(raw())
        .option(
            OptionNode::new(["-i", "--interactive"]).description("Display multiselect menu to choose which tools to upgrade"),
        )
}

fn use_() -> CommandNode {
    CommandNode::new(["use", "u"])
        .description("Install tool version and add it to config [aliases: u]")
        .arg(ArgNode::new("TOOL@VERSION").description(
            "Tool(s) to add to config file\n\
             e.g.: node@20, cargo:ripgrep@latest npm:prettier@3\n\
             If no version is specified, it will default to @latest",
        ))
        .option(OptionNode::new(["-f", "--force"]).description("Force reinstall even if already installed"))
        .option(OptionNode::new("--fuzzy").description(
            "Save fuzzy version to config file\n\
             e.g.: `mise use --fuzzy node@20` will save 20 as the version\n\
             this is the default behavior unless MISE_ASDF_COMPAT=1",
        ))
        .option(
            OptionNode::new(["-g", "--global"])
                .description("Use the global config file (~/.config/mise/config.toml) instead of the local one"),
        )
        .option(
            OptionNode::new(["-e", "--env"])
                .description("Modify an environment-specific config file like .mise.<env>.toml")
                .arg(ArgNode::new("ENV")),
        )
        .option(jobs())
        .option(raw())
        .option(
            OptionNode::new("--remove")
                .description("Remove the plugin(s) from config file")
                .arg(ArgNode::new("PLUGIN")),
        )
        .option(
            OptionNode::new(["-p", "--path"])
                .description(
                    "Specify a path to a config file or directory If a directory is specified, it will look for .mise.toml (default) or .tool-versions",
                )
                .arg(ArgNode::new("PATH")),
        )
        .option(OptionNode::new("--pin").description(
            "Save exact version to config file\n\
             e.g.: `mise use --pin node@20` will save 20.0.0 as the version\n\
             Set MISE_ASDF_COMPAT=1 to make this the default behavior",
        ))
}

fn watch() -> CommandNode {
    CommandNode::new(["watch", "w"])
        .description("[experimental] Run a tasks watching for changes [aliases: w]")
        .arg(
            ArgNode::new("ARGS")
                .description("Extra arguments")
                .optional(),
        )
        .option(
            OptionNode::new(["-t", "--task"])
                .description("Tasks to run [default: default]")
                .arg(ArgNode::new("TASK").default_value("default")),
        )
        .option(
            OptionNode::new(["-g", "--glob"])
                .description(
                    "Files to watch\n\
                     Defaults to sources from the tasks(s)",
                )
                .arg(ArgNode::new("GLOB")),
        )
}

fn which() -> CommandNode {
    CommandNode::new("which")
        .description("Shows the path that a bin name points to")
        .arg(ArgNode::new("BIN_NAME").description("The bin name to look up"))
        .option(OptionNode::new("--plugin").description("Show the plugin name instead of the path"))
        .option(OptionNode::new("--version").description("Show the version instead of the path"))
        .option(
            OptionNode::new(["-t", "--tool"])
                .description(
                    "Use a specific tool@version\n\
                     e.g.: `mise which npm --tool=node@20`",
                )
                .arg(ArgNode::new("TOOL@VERSION")),
        )
}
