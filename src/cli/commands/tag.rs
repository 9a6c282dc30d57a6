//! cli::commands::tag
//!
//! Print the tag pointing at a commit.
//!
//! # Output
//!
//! - Tag found: its name on stdout (or a JSON object with `--json`)
//! - No tag: nothing on stdout (`{"commit": ..., "tag": null}` with `--json`)
//! - Rate limited: a warning with remediation on stderr, nothing on stdout,
//!   exit status 0
//!
//! Any other forge failure is an error (non-zero exit).
//!
//! # Example
//!
//! ```bash
//! TAG=$(ecobalyse-release tag "$GITHUB_SHA")
//! ```

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::tags::{find_tag, ResolveOptions};
use crate::core::types::{CommitSha, RepoSlug, TagName};
use crate::forge::{open_repository, Forge, ForgeError};
use crate::ui::output::{self, Verbosity};

/// Arguments of the `tag` command.
#[derive(Debug, Clone)]
pub struct TagArgs {
    pub commit_sha: String,
    pub token: Option<String>,
    pub repository: Option<RepoSlug>,
    pub json: bool,
}

/// Run the tag command.
///
/// This is a synchronous wrapper that uses tokio to run the lookup.
pub fn tag(ctx: &Context, args: TagArgs) -> Result<()> {
    let verbosity = ctx.verbosity();

    let sha = args.commit_sha.trim();
    if sha.is_empty() {
        bail!("commit SHA cannot be empty");
    }
    let sha = CommitSha::new(sha);

    let config = Config::load(ctx.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = config.path() {
        output::debug(format!("Loaded config from {}", path.display()), verbosity);
    }

    let token = args
        .token
        .filter(|t| !t.trim().is_empty())
        .or_else(|| config.access_token());
    let options = ResolveOptions {
        repository: args.repository.unwrap_or_else(|| config.repository()),
        api_base: Some(config.api_base()?),
    };

    output::debug(
        format!("Looking up tag for {} in {}", sha, options.repository),
        verbosity,
    );

    let rt = tokio::runtime::Runtime::new()?;
    match rt.block_on(lookup(&sha, token.as_deref(), &options, verbosity)) {
        Ok(found) => {
            report(&sha, found.as_ref(), args.json, verbosity)?;
            Ok(())
        }
        Err(ForgeError::RateLimited { reset }) => {
            output::warn(
                rate_limit_warning(token.is_some(), config.token_env(), reset),
                verbosity,
            );
            Ok(())
        }
        Err(err) => {
            Err(err).with_context(|| format!("Failed to look up the tag of commit {}", sha))
        }
    }
}

/// Open the session, resolve the repository, and scan its tags.
async fn lookup(
    sha: &CommitSha,
    token: Option<&str>,
    options: &ResolveOptions,
    verbosity: Verbosity,
) -> Result<Option<TagName>, ForgeError> {
    let (repo, forge) =
        open_repository(token, &options.repository, options.api_base.as_deref()).await?;

    output::debug(
        format!(
            "Resolved {} on {} ({} session, default branch {})",
            repo.slug,
            forge.name(),
            if forge.is_authenticated() {
                "authenticated"
            } else {
                "anonymous"
            },
            repo.default_branch.as_deref().unwrap_or("unknown")
        ),
        verbosity,
    );

    find_tag(&forge, &repo, sha).await
}

/// Print the lookup result.
fn report(sha: &CommitSha, found: Option<&TagName>, json: bool, verbosity: Verbosity) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "commit": sha.as_str(),
            "tag": found.map(TagName::as_str),
        });
        output::result(serde_json::to_string(&value)?);
        return Ok(());
    }

    match found {
        Some(tag) => output::result(tag),
        None => output::debug(format!("No tag points at {}", sha), verbosity),
    }
    Ok(())
}

/// Build the rate-limit warning with remediation guidance.
pub fn rate_limit_warning(authenticated: bool, token_env: &str, reset: Option<u64>) -> String {
    let mut hints = Vec::new();
    if authenticated {
        hints.push("The access token's quota is exhausted; try again later.".to_string());
    } else {
        hints.push(format!(
            "Set {} to a GitHub personal access token (or pass --token) to use the authenticated quota.",
            token_env
        ));
    }
    if let Some(reset) = reset {
        hints.push(format!("The quota resets at unix time {}.", reset));
    }

    format!(
        "GitHub API rate limit exceeded, tag lookup skipped.\n{}",
        output::format_list(&hints, "  ")
    )
}
