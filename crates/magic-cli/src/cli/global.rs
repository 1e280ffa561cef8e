//! Global arguments that apply to every subcommand.
//!
//! Declared here and flattened into [`super::Cli`] so that `-v`, `-q`, etc.
//! are available on any invocation without repetition

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-v`), twice for DEBUG (`-vv`), three times for
    /// TRACE (`-vvv`).  Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -v      - Info level (menu and input mode decisions)
    -vv     - Debug level (every key and transition)
    -vvv    - Trace level (every painted frame)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>). Any value counts except the falsey
    /// ones (`0`, `false`, `no`, `off`, empty).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Input protocol for menus. Overrides `input.mode` from the config.
    #[arg(
        long = "input",
        global = true,
        value_enum,
        value_name = "MODE",
        help = "Menu input: arrow keys (raw), numbers (line), or auto-detect"
    )]
    pub input: Option<InputArg>,

    /// Write logs to this file instead of stderr.
    #[arg(
        long = "log-file",
        global = true,
        value_name = "FILE",
        help = "Write logs to a file (keeps the menu screen clean)"
    )]
    pub log_file: Option<PathBuf>,
}

/// How menus read keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InputArg {
    /// Raw keys on a terminal, numbers otherwise.
    #[default]
    Auto,
    /// Arrow keys only; fail if the terminal cannot provide them.
    Raw,
    /// Type a number and press Enter.
    Line,
}

impl std::fmt::Display for InputArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Raw => write!(f, "raw"),
            Self::Line => write!(f, "line"),
        }
    }
}
