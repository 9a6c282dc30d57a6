//! cli::commands::branch_ref
//!
//! Print the branch named by an `ecobalyse-private:` marker.
//!
//! Input precedence: positional TEXT, then `--file`, then stdin. Stdin is
//! only read when it is not a terminal.
//!
//! # Example
//!
//! ```bash
//! BRANCH=$(gh pr view "$PR" --json body -q .body | ecobalyse-release branch-ref)
//! ```

use std::io::{IsTerminal, Read};
use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::branch_ref::extract_str;
use crate::ui::output;

/// Run the branch-ref command.
pub fn branch_ref(ctx: &Context, text: Option<&str>, file: Option<&Path>, json: bool) -> Result<()> {
    let verbosity = ctx.verbosity();
    let input = read_input(text, file)?;

    let found = extract_str(&input);
    if json {
        let value = serde_json::json!({ "branch": found.as_ref().map(|b| b.as_str()) });
        output::result(serde_json::to_string(&value)?);
        return Ok(());
    }

    match found {
        Some(branch) => output::result(branch),
        None => output::debug("No ecobalyse-private marker found", verbosity),
    }
    Ok(())
}

/// Collect the text to search.
fn read_input(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("no input: pass TEXT, --file <PATH>, or pipe text on stdin");
    }

    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("Failed to read standard input")?;
    Ok(buf)
}
