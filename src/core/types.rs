//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchReference`] - Branch name carried by an `ecobalyse-private:` marker
//! - [`CommitSha`] - Opaque commit identifier supplied by the caller
//! - [`TagName`] - Name of a repository tag
//! - [`RepoSlug`] - `owner/name` identity of a hosted repository
//!
//! # Validation
//!
//! `BranchReference` and `RepoSlug` enforce validity at construction time.
//! `CommitSha` and `TagName` are opaque: the hosting API is the authority
//! on what they look like.
//!
//! # Examples
//!
//! ```
//! use ecobalyse_release::core::types::{BranchReference, RepoSlug};
//!
//! let branch = BranchReference::new("feature/new-textile_db").unwrap();
//! assert_eq!(branch.as_str(), "feature/new-textile_db");
//!
//! let slug = RepoSlug::parse("MTES-MCT/ecobalyse").unwrap();
//! assert_eq!(slug.owner(), "MTES-MCT");
//!
//! assert!(BranchReference::new("has space").is_err());
//! assert!(RepoSlug::parse("no-slash").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Repository queried when nothing else is configured.
pub const DEFAULT_REPOSITORY: &str = "MTES-MCT/ecobalyse";

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch reference: {0}")]
    InvalidBranchReference(String),

    #[error("invalid repository slug '{0}', expected 'owner/name'")]
    InvalidRepoSlug(String),
}

/// Returns true for characters allowed in a branch reference.
pub fn is_branch_reference_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '/')
}

/// A branch name embedded in free text.
///
/// Non-empty, restricted to `[A-Za-z0-9./_-]`. Unlike a full Git refname
/// check, no positional rules apply (`..` or a trailing `/` are accepted):
/// the value is whatever the marker convention captured.
///
/// # Example
///
/// ```
/// use ecobalyse_release::core::types::BranchReference;
///
/// let name = BranchReference::new("release/v2.1").unwrap();
/// assert_eq!(name.to_string(), "release/v2.1");
///
/// assert!(BranchReference::new("").is_err());
/// assert!(BranchReference::new("bran<ch").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchReference(String);

impl BranchReference {
    /// Create a new validated branch reference.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchReference` if the value is empty or
    /// contains a character outside `[A-Za-z0-9./_-]`.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidBranchReference(
                "branch reference cannot be empty".into(),
            ));
        }
        if let Some(c) = name.chars().find(|c| !is_branch_reference_char(*c)) {
            return Err(TypeError::InvalidBranchReference(format!(
                "'{}' contains disallowed character {:?}",
                name, c
            )));
        }
        Ok(Self(name))
    }

    /// Get the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the reference, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for BranchReference {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BranchReference> for String {
    fn from(value: BranchReference) -> Self {
        value.0
    }
}

impl AsRef<str> for BranchReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A commit identifier as supplied by the caller.
///
/// No format check is applied: the value is compared verbatim against
/// the SHAs the hosting API reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitSha(String);

impl CommitSha {
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommitSha {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CommitSha {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for CommitSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a repository tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagName(String);

impl TagName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TagName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `owner/name` identity of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Build a slug from its parts.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRepoSlug` if either part is empty or
    /// contains a `/`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, TypeError> {
        let owner = owner.into();
        let name = name.into();
        if owner.is_empty() || name.is_empty() || owner.contains('/') || name.contains('/') {
            return Err(TypeError::InvalidRepoSlug(format!("{}/{}", owner, name)));
        }
        Ok(Self { owner, name })
    }

    /// Parse an `owner/name` string.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let (owner, name) = s
            .split_once('/')
            .ok_or_else(|| TypeError::InvalidRepoSlug(s.to_string()))?;
        Self::new(owner, name).map_err(|_| TypeError::InvalidRepoSlug(s.to_string()))
    }

    /// The default Ecobalyse repository.
    pub fn ecobalyse() -> Self {
        Self {
            owner: "MTES-MCT".to_string(),
            name: "ecobalyse".to_string(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::str::FromStr for RepoSlug {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
