//! forge::factory
//!
//! Session creation and repository lookup.
//!
//! # Design
//!
//! Callers pass the access token explicitly rather than relying on ambient
//! configuration. The factory opens an authenticated session when a token
//! is present and an anonymous one otherwise, then resolves the repository.
//!
//! A rate-limit failure during the lookup is returned unmodified so the
//! caller can decide to retry with a token, defer, or abort.
//!
//! # Example
//!
//! ```ignore
//! use ecobalyse_release::forge::{open_repository, Forge};
//! use ecobalyse_release::core::types::RepoSlug;
//!
//! let token = std::env::var("GITHUB_TOKEN").ok();
//! let (repo, forge) = open_repository(token.as_deref(), &RepoSlug::ecobalyse(), None).await?;
//! let tags = forge.list_tags(&repo).await?;
//! ```

use super::github::GitHubForge;
use super::traits::{Forge, ForgeError, RepositoryHandle};
use crate::core::types::RepoSlug;

/// Create a GitHub session.
///
/// # Arguments
///
/// * `access_token` - Token for an authenticated session, `None` for anonymous
/// * `api_base` - Custom API base URL, `None` for `https://api.github.com`
pub fn create_forge(access_token: Option<&str>, api_base: Option<&str>) -> GitHubForge {
    let forge = GitHubForge::new(access_token.map(str::to_string));
    match api_base {
        Some(base) => forge.with_api_base(base),
        None => forge,
    }
}

/// Open a session and resolve a repository.
///
/// # Returns
///
/// The repository handle together with the session that produced it.
///
/// # Errors
///
/// Any `ForgeError` from the lookup, `RateLimited` included.
pub async fn open_repository(
    access_token: Option<&str>,
    slug: &RepoSlug,
    api_base: Option<&str>,
) -> Result<(RepositoryHandle, GitHubForge), ForgeError> {
    let forge = create_forge(access_token, api_base);
    let repo = forge.get_repository(slug).await?;
    Ok((repo, forge))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_forge_without_token_is_anonymous() {
        let forge = create_forge(None, None);
        assert!(!forge.is_authenticated());
        assert_eq!(forge.api_base(), super::super::github::DEFAULT_API_BASE);
    }

    #[test]
    fn create_forge_with_token_and_base() {
        let forge = create_forge(Some("ghp_x"), Some("http://localhost:9999"));
        assert!(forge.is_authenticated());
        assert_eq!(forge.api_base(), "http://localhost:9999");
    }

    #[tokio::test]
    async fn open_repository_propagates_rate_limit() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/MTES-MCT/ecobalyse"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = open_repository(None, &RepoSlug::ecobalyse(), Some(&server.uri()))
            .await
            .unwrap_err();

        assert_eq!(err, ForgeError::RateLimited { reset: None });
    }
}
