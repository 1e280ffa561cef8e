//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, InputArg};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "magic",
    bin_name = "magic",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2728} Menu-driven developer toolkit",
    long_about = "Magic puts everyday developer chores (git, project layout, \
                  settings) behind a keyboard-navigated terminal menu.",
    after_help = "EXAMPLES:\n\
        \x20 magic                      # open the main menu\n\
        \x20 magic --input line         # numeric input, e.g. over a dumb terminal\n\
        \x20 magic --log-file magic.log -vv\n\
        \x20 magic config list\n\
        \x20 magic completions bash > /usr/share/bash-completion/completions/magic",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute; the main menu when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the interactive main menu.
    #[command(
        visible_alias = "m",
        about = "Open the interactive menu",
        after_help = "EXAMPLES:\n\
            \x20 magic menu\n\
            \x20 magic menu --input line\n\
            \x20 echo 4 | magic menu      # choose item 4 and exit"
    )]
    Menu,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 magic completions bash > ~/.local/share/bash-completion/completions/magic\n\
            \x20 magic completions zsh  > ~/.zfunc/_magic\n\
            \x20 magic completions fish > ~/.config/fish/completions/magic.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Magic configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 magic config get display.color\n\
            \x20 magic config list\n\
            \x20 magic config path"
    )]
    Config(ConfigCommands),
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `magic completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `magic config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `display.color`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
