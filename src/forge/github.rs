//! forge::github
//!
//! GitHub forge implementation using the REST API.
//!
//! # Authentication
//!
//! A session is either anonymous or carries a personal access token. The
//! token only raises the rate-limit quota: every endpoint used here is
//! readable anonymously for public repositories.
//!
//! # Rate Limiting
//!
//! GitHub signals an exhausted quota with `429 Too Many Requests`, or with
//! `403 Forbidden` plus `X-RateLimit-Remaining: 0` (or a "rate limit"
//! message for secondary limits). Both map to `ForgeError::RateLimited`.
//! No automatic retry is done; that is the caller's decision.
//!
//! # Example
//!
//! ```ignore
//! use ecobalyse_release::forge::github::GitHubForge;
//! use ecobalyse_release::forge::Forge;
//! use ecobalyse_release::core::types::RepoSlug;
//!
//! let forge = GitHubForge::new(std::env::var("GITHUB_TOKEN").ok());
//! let repo = forge.get_repository(&RepoSlug::ecobalyse()).await?;
//! for tag in forge.list_tags(&repo).await? {
//!     println!("{} {}", tag.name, tag.commit_sha);
//! }
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::traits::{Forge, ForgeError, RepositoryHandle, TagRecord};
use crate::core::types::RepoSlug;

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "ecobalyse-release";

/// Page size for list endpoints (GitHub's maximum).
const PER_PAGE: usize = 100;

/// Upper bound on pages fetched by a single listing.
pub const MAX_PAGES: u32 = 50;

/// GitHub forge implementation.
pub struct GitHubForge {
    /// HTTP client for making requests
    client: Client,
    /// Access token; `None` for an anonymous session
    token: Option<String>,
    /// API base URL (configurable for tests and GitHub Enterprise)
    api_base: String,
    /// Pages fetched before a listing stops
    max_pages: u32,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubForge")
            .field("has_token", &self.token.is_some())
            .field("api_base", &self.api_base)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

impl GitHubForge {
    /// Create a session, authenticated when a token is supplied.
    ///
    /// Empty or whitespace-only tokens are treated as absent.
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            token: token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            api_base: DEFAULT_API_BASE.to_string(),
            max_pages: MAX_PAGES,
        }
    }

    /// Create an anonymous session (lower rate-limit quota).
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    /// Create a session authenticated with an access token.
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()))
    }

    /// Use a custom API base URL.
    ///
    /// A trailing `/` is stripped.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Limit the number of pages a listing may fetch (at least one).
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Get the API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        let mut headers = HeaderMap::new();
        if let Some(ref token) = self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ForgeError::AuthFailed("token contains invalid characters".into()))?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, slug: &RepoSlug, path: &str) -> String {
        if path.is_empty() {
            format!("{}/repos/{}/{}", self.api_base, slug.owner(), slug.name())
        } else {
            format!(
                "{}/repos/{}/{}/{}",
                self.api_base,
                slug.owner(),
                slug.name(),
                path
            )
        }
    }

    /// Send a GET request and decode the JSON body.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ForgeError> {
        let response = self
            .client
            .get(url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            Err(Self::error_from_response(response, status).await)
        }
    }

    /// Map an error response to a `ForgeError`.
    async fn error_from_response(response: Response, status: StatusCode) -> ForgeError {
        // Read rate-limit headers before consuming the body.
        let headers = response.headers();
        let remaining = header_u64(headers, "X-RateLimit-Remaining");
        let reset = header_u64(headers, "X-RateLimit-Reset");

        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        classify_error(status, remaining, reset, message)
    }
}

/// Parse a numeric header value.
fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

/// Classify an error status into a `ForgeError`.
fn classify_error(
    status: StatusCode,
    remaining: Option<u64>,
    reset: Option<u64>,
    message: String,
) -> ForgeError {
    let mentions_rate_limit = message.to_lowercase().contains("rate limit");

    match status {
        StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited { reset },
        StatusCode::FORBIDDEN if remaining == Some(0) || mentions_rate_limit => {
            ForgeError::RateLimited { reset }
        }
        StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("Invalid or expired token".into()),
        StatusCode::FORBIDDEN => ForgeError::AuthFailed(format!("Permission denied: {}", message)),
        StatusCode::NOT_FOUND => ForgeError::NotFound(message),
        _ if status.is_server_error() => ForgeError::ApiError {
            status: status.as_u16(),
            message: format!("GitHub server error: {}", message),
        },
        _ => ForgeError::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl Forge for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn get_repository(&self, slug: &RepoSlug) -> Result<RepositoryHandle, ForgeError> {
        let url = self.repo_url(slug, "");
        let repo: GitHubRepository = self.get_json(&url).await?;

        // GitHub reports the canonical casing; fall back to the query on
        // anything unexpected.
        let slug = RepoSlug::new(repo.owner.login, repo.name).unwrap_or_else(|_| slug.clone());

        Ok(RepositoryHandle {
            slug,
            default_branch: repo.default_branch,
        })
    }

    async fn list_tags(&self, repo: &RepositoryHandle) -> Result<Vec<TagRecord>, ForgeError> {
        let mut tags: Vec<TagRecord> = Vec::new();
        let mut page: u32 = 1;

        loop {
            let url = format!(
                "{}?per_page={}&page={}",
                self.repo_url(&repo.slug, "tags"),
                PER_PAGE,
                page
            );

            let page_tags: Vec<GitHubTag> = self.get_json(&url).await?;
            let page_count = page_tags.len();

            tags.extend(page_tags.into_iter().map(TagRecord::from));

            // A short page is the last one. Endpoints that ignore `page`
            // keep returning full pages, hence the cap.
            if page_count < PER_PAGE || page >= self.max_pages {
                break;
            }

            page += 1;
        }

        Ok(tags)
    }
}

// --------------------------------------------------------------------------
// API Response Types
// --------------------------------------------------------------------------

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// GitHub repository response (subset).
#[derive(Deserialize)]
struct GitHubRepository {
    name: String,
    owner: GitHubOwnerInfo,
    default_branch: Option<String>,
}

/// Minimal GitHub owner info.
#[derive(Deserialize)]
struct GitHubOwnerInfo {
    login: String,
}

/// GitHub tag list item.
#[derive(Deserialize)]
struct GitHubTag {
    name: String,
    commit: GitHubCommitRef,
}

/// Commit pointer of a tag list item.
#[derive(Deserialize)]
struct GitHubCommitRef {
    sha: String,
}

impl From<GitHubTag> for TagRecord {
    fn from(gh: GitHubTag) -> Self {
        TagRecord::new(gh.name, gh.commit.sha)
    }
}
