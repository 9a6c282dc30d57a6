//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Results only, no warnings

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::RepoSlug;

/// Release tooling for Ecobalyse: branch references and tag lookup
#[derive(Parser, Debug)]
#[command(name = "ecobalyse-release")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Results only; suppress warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the tag pointing at a commit
    #[command(
        name = "tag",
        long_about = "Print the tag pointing at a commit.\n\n\
            Lists the tags of the repository on GitHub and prints the name of the \
            first one whose commit matches. Prints nothing when the commit is not \
            tagged.\n\n\
            Anonymous requests share a small rate-limit quota. When it is exhausted \
            a warning is printed on stderr and no tag is printed; set GITHUB_TOKEN \
            (or pass --token) to use the authenticated quota.",
        after_help = "\
EXAMPLES:
    # Tag of the current commit, if any
    ecobalyse-release tag \"$(git rev-parse HEAD)\"

    # Authenticated lookup against a fork
    GITHUB_TOKEN=ghp_xxx ecobalyse-release tag 3f2a9c1 --repository me/ecobalyse"
    )]
    Tag {
        /// Commit SHA to look up
        commit_sha: String,

        /// Access token (defaults to the GITHUB_TOKEN environment variable)
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,

        /// Repository to query, as owner/name
        #[arg(long, value_name = "OWNER/NAME")]
        repository: Option<RepoSlug>,

        /// Print a JSON object instead of the bare tag name
        #[arg(long)]
        json: bool,
    },

    /// Extract the branch named by an `ecobalyse-private:` marker
    #[command(
        name = "branch-ref",
        long_about = "Extract the branch named by an `ecobalyse-private:` marker.\n\n\
            Reads TEXT, the file given with --file, or standard input, and prints \
            the branch that follows the first `ecobalyse-private:` marker. Prints \
            nothing when there is no marker.",
        after_help = "\
EXAMPLES:
    # From a pull request body
    gh pr view 42 --json body -q .body | ecobalyse-release branch-ref

    # From the last commit message
    ecobalyse-release branch-ref \"$(git log -1 --format=%B)\""
    )]
    BranchRef {
        /// Text to search
        text: Option<String>,

        /// Read the text from this file
        #[arg(long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print a JSON object instead of the bare branch name
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell.",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    ecobalyse-release completion bash >> ~/.bashrc

    # Fish
    ecobalyse-release completion fish > ~/.config/fish/completions/ecobalyse-release.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
