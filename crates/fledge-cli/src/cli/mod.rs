//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "fledge",
    bin_name = "fledge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create new TypeScript projects",
    long_about = "Fledge creates ready-to-build TypeScript projects: npm libraries \
                  or webpack web applications, with lint, format, CI and IDE \
                  configuration. It never overwrites an existing file.",
    after_help = "EXAMPLES:\n\
        \x20 fledge init my-lib --scope acme\n\
        \x20 fledge init my-app --webapp --github-owner acme\n\
        \x20 fledge inspect my-lib\n\
        \x20 fledge completions bash > /usr/share/bash-completion/completions/fledge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "new",
        about = "Create a new project in an empty or missing directory",
        after_help = "EXAMPLES:\n\
            \x20 fledge init                       # current directory\n\
            \x20 fledge init my-lib --scope acme   # @acme/my-lib\n\
            \x20 fledge init my-app --webapp"
    )]
    Init(InitArgs),

    /// Read an existing project back.
    #[command(
        about = "Print the descriptor of an existing project as JSON",
        after_help = "EXAMPLES:\n\
            \x20 fledge inspect\n\
            \x20 fledge inspect ../my-lib"
    )]
    Inspect(InspectArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fledge completions bash > ~/.local/share/bash-completion/completions/fledge\n\
            \x20 fledge completions zsh  > ~/.zfunc/_fledge\n\
            \x20 fledge completions fish > ~/.config/fish/completions/fledge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Fledge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 fledge config show\n\
            \x20 fledge config path"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `fledge init`.
#[derive(Debug, Default, Args)]
pub struct InitArgs {
    /// Directory to create the project in. Created if missing; must be
    /// empty if it exists.
    #[arg(value_name = "DESTINATION", help = "Project directory (default: current directory)")]
    pub destination: Option<PathBuf>,

    /// npm scope, with or without the leading `@`.
    #[arg(long = "scope", value_name = "SCOPE", help = "npm package scope")]
    pub scope: Option<String>,

    /// Package name. Defaults to the destination directory's name.
    #[arg(long = "name", value_name = "NAME", help = "npm package name")]
    pub name: Option<String>,

    #[arg(
        long = "github-owner",
        value_name = "OWNER",
        help = "GitHub user or organisation (default: scope, then configured owner)"
    )]
    pub github_owner: Option<String>,

    #[arg(
        long = "github-project",
        value_name = "PROJECT",
        help = "GitHub repository name (default: package name)"
    )]
    pub github_project: Option<String>,

    /// Create a webpack web application instead of an npm library.
    #[arg(long = "webapp", help = "Create a web application")]
    pub webapp: bool,

    #[arg(
        long = "author-name",
        value_name = "NAME",
        help = "Author name (default: git config user.name)"
    )]
    pub author_name: Option<String>,

    #[arg(
        long = "author-email",
        value_name = "EMAIL",
        help = "Author email (default: git config user.email)"
    )]
    pub author_email: Option<String>,

    #[arg(long = "license", value_name = "SPDX", help = "SPDX license expression")]
    pub license: Option<String>,

    #[arg(
        long = "copyright-holder",
        value_name = "HOLDER",
        help = "Copyright holder (default: guessed from scope, owner or author)"
    )]
    pub copyright_holder: Option<String>,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `fledge inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    #[arg(value_name = "DIRECTORY", help = "Project directory (default: current directory)")]
    pub directory: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fledge completions`.
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

/// Subcommands for `fledge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
