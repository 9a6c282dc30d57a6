//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and validates command-specific arguments
//! 2. Calls into `core` for the actual work
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! `tag` talks to GitHub and is async internally. The handler creates a
//! tokio runtime and blocks on the async implementation, so the CLI stays
//! synchronous.

mod branch_ref;
mod completion;
mod tag;

pub use branch_ref::branch_ref;
pub use completion::completion;
pub use tag::{rate_limit_warning, tag, TagArgs};

use super::args::Command;
use super::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Tag {
            commit_sha,
            token,
            repository,
            json,
        } => tag::tag(
            ctx,
            TagArgs {
                commit_sha,
                token,
                repository,
                json,
            },
        ),
        Command::BranchRef { text, file, json } => {
            branch_ref::branch_ref(ctx, text.as_deref(), file.as_deref(), json)
        }
        Command::Completion { shell } => completion::completion(shell),
    }
}
