//! forge::traits
//!
//! Forge trait definition for querying remote hosting services.
//!
//! # Design
//!
//! The `Forge` trait is async because forge operations involve network I/O.
//! All methods return `Result` so failures reach the caller unmodified; in
//! particular `ForgeError::RateLimited` is never swallowed or retried here.
//!
//! # Example
//!
//! ```ignore
//! use ecobalyse_release::forge::{Forge, ForgeError};
//! use ecobalyse_release::core::types::RepoSlug;
//!
//! async fn count_tags(forge: &dyn Forge) -> Result<usize, ForgeError> {
//!     let repo = forge.get_repository(&RepoSlug::ecobalyse()).await?;
//!     Ok(forge.list_tags(&repo).await?.len())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{CommitSha, RepoSlug, TagName};

/// Errors from forge operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    /// Authentication failed (invalid token, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request quota for this credential (or IP) is exhausted.
    #[error("rate limited")]
    RateLimited {
        /// Unix timestamp at which the quota resets, when reported.
        reset: Option<u64>,
    },

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ForgeError {
    /// Check whether this is a rate-limit failure.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ForgeError::RateLimited { .. })
    }
}

/// Handle to a repository resolved on the forge.
///
/// Obtained from [`Forge::get_repository`] and used for the duration of a
/// single query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    /// Repository identity as reported by the forge
    pub slug: RepoSlug,
    /// Default branch, if reported
    pub default_branch: Option<String>,
}

impl RepositoryHandle {
    pub fn new(slug: RepoSlug) -> Self {
        Self {
            slug,
            default_branch: None,
        }
    }
}

/// A tag as listed by the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Tag name
    pub name: TagName,
    /// SHA of the commit the tag points to
    pub commit_sha: CommitSha,
}

impl TagRecord {
    pub fn new(name: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        Self {
            name: TagName::new(name),
            commit_sha: CommitSha::new(commit_sha),
        }
    }
}

/// The Forge trait for querying remote hosting services.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, ForgeError>`. Callers should handle:
/// - `RateLimited`: Supply an access token or try again later
/// - `AuthFailed`: Check the token
/// - `NotFound`: Repository doesn't exist or is private
/// - `ApiError` / `NetworkError`: Display the message to the user
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "github").
    fn name(&self) -> &'static str;

    /// Whether requests carry a credential.
    fn is_authenticated(&self) -> bool;

    /// Resolve a repository by owner and name.
    ///
    /// # Errors
    ///
    /// - `RateLimited` if the request quota is exhausted
    /// - `NotFound` if the repository doesn't exist
    async fn get_repository(&self, slug: &RepoSlug) -> Result<RepositoryHandle, ForgeError>;

    /// List every tag of the repository.
    ///
    /// Records come back in the order the forge returns them. That order is
    /// not alphabetical or chronological by contract.
    async fn list_tags(&self, repo: &RepositoryHandle) -> Result<Vec<TagRecord>, ForgeError>;
}
