//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge stores a tag listing in memory, in insertion order, and
//! allows configuring failure scenarios. Every call is recorded so tests can
//! assert on what was queried.
//!
//! # Example
//!
//! ```
//! use ecobalyse_release::core::types::RepoSlug;
//! use ecobalyse_release::forge::mock::MockForge;
//! use ecobalyse_release::forge::{Forge, TagRecord};
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::with_tags(vec![
//!     TagRecord::new("v1", "abc"),
//!     TagRecord::new("v2", "def"),
//! ]);
//!
//! let repo = forge.get_repository(&RepoSlug::ecobalyse()).await.unwrap();
//! let tags = forge.list_tags(&repo).await.unwrap();
//! assert_eq!(tags[1].name.as_str(), "v2");
//! # });
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::traits::{Forge, ForgeError, RepositoryHandle, TagRecord};
use crate::core::types::RepoSlug;

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockForge {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockForgeInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockForgeInner {
    /// Tag listing, in the order it is returned.
    tags: Vec<TagRecord>,
    /// Whether to report an authenticated session.
    authenticated: bool,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail get_repository with the given error.
    GetRepository(ForgeError),
    /// Fail list_tags with the given error.
    ListTags(ForgeError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    GetRepository { slug: RepoSlug },
    ListTags { slug: RepoSlug },
}

impl MockForge {
    /// Create a new mock forge with no tags.
    pub fn new() -> Self {
        Self::with_tags(Vec::new())
    }

    /// Create a mock forge with a pre-existing tag listing.
    pub fn with_tags(tags: Vec<TagRecord>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockForgeInner {
                tags,
                authenticated: false,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Report the session as authenticated.
    pub fn authenticated(self) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.authenticated = true;
        }
        self
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use ecobalyse_release::forge::mock::{MockForge, FailOn};
    /// use ecobalyse_release::forge::ForgeError;
    ///
    /// let forge = MockForge::new()
    ///     .fail_on(FailOn::GetRepository(ForgeError::RateLimited { reset: None }));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Append a tag to the listing.
    pub fn push_tag(&self, tag: TagRecord) {
        let mut inner = self.inner.lock().unwrap();
        inner.tags.push(tag);
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Record an operation.
    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }
}

impl Default for MockForge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_authenticated(&self) -> bool {
        self.inner.lock().unwrap().authenticated
    }

    async fn get_repository(&self, slug: &RepoSlug) -> Result<RepositoryHandle, ForgeError> {
        self.record(MockOperation::GetRepository { slug: slug.clone() });

        let inner = self.inner.lock().unwrap();
        if let Some(FailOn::GetRepository(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        Ok(RepositoryHandle {
            slug: slug.clone(),
            default_branch: Some("master".to_string()),
        })
    }

    async fn list_tags(&self, repo: &RepositoryHandle) -> Result<Vec<TagRecord>, ForgeError> {
        self.record(MockOperation::ListTags {
            slug: repo.slug.clone(),
        });

        let inner = self.inner.lock().unwrap();
        if let Some(FailOn::ListTags(e)) = &inner.fail_on {
            return Err(e.clone());
        }

        Ok(inner.tags.clone())
    }
}
