//! core::tags
//!
//! Resolution of the tag pointing at a commit.
//!
//! # Algorithm
//!
//! The full tag listing is fetched and scanned linearly; the first tag whose
//! commit SHA equals the query wins. There is no index and no caching
//! between calls: release tags are few and lookups are infrequent.
//!
//! If a commit carries several tags, the winner is whichever the forge lists
//! first. That order is defined by the hosting API and may differ between
//! API versions.
//!
//! # Errors
//!
//! "No tag for this commit" is `Ok(None)`. Forge failures, including
//! `ForgeError::RateLimited`, are returned unmodified; nothing here retries.
//!
//! # Example
//!
//! ```
//! use ecobalyse_release::core::tags::resolve_tag_with;
//! use ecobalyse_release::core::types::{CommitSha, RepoSlug};
//! use ecobalyse_release::forge::mock::MockForge;
//! use ecobalyse_release::forge::TagRecord;
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::with_tags(vec![TagRecord::new("v1", "abc")]);
//! let tag = resolve_tag_with(&forge, &RepoSlug::ecobalyse(), &CommitSha::from("abc"))
//!     .await
//!     .unwrap();
//! assert_eq!(tag.unwrap().as_str(), "v1");
//! # });
//! ```

use super::types::{CommitSha, RepoSlug, TagName};
use crate::forge::{open_repository, Forge, ForgeError, RepositoryHandle, TagRecord};

/// Where to look for tags.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Repository to query
    pub repository: RepoSlug,
    /// API base URL override
    pub api_base: Option<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            repository: RepoSlug::ecobalyse(),
            api_base: None,
        }
    }
}

/// Return the name of the first tag pointing at `sha`.
pub fn first_tag_for<'a>(
    tags: impl IntoIterator<Item = &'a TagRecord>,
    sha: &CommitSha,
) -> Option<TagName> {
    tags.into_iter()
        .find(|tag| tag.commit_sha == *sha)
        .map(|tag| tag.name.clone())
}

/// Find the tag pointing at `sha` in an already resolved repository.
pub async fn find_tag(
    forge: &dyn Forge,
    repo: &RepositoryHandle,
    sha: &CommitSha,
) -> Result<Option<TagName>, ForgeError> {
    let tags = forge.list_tags(repo).await?;
    Ok(first_tag_for(&tags, sha))
}

/// Resolve the repository on `forge`, then find the tag pointing at `sha`.
pub async fn resolve_tag_with(
    forge: &dyn Forge,
    slug: &RepoSlug,
    sha: &CommitSha,
) -> Result<Option<TagName>, ForgeError> {
    let repo = forge.get_repository(slug).await?;
    find_tag(forge, &repo, sha).await
}

/// Open a GitHub session and find the tag pointing at `commit_sha`.
///
/// The session is authenticated when `access_token` is present and
/// anonymous otherwise. Each call opens its own session.
pub async fn resolve_tag(
    commit_sha: &CommitSha,
    access_token: Option<&str>,
    options: &ResolveOptions,
) -> Result<Option<TagName>, ForgeError> {
    let (repo, forge) = open_repository(
        access_token,
        &options.repository,
        options.api_base.as_deref(),
    )
    .await?;
    find_tag(&forge, &repo, commit_sha).await
}
