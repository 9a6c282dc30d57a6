//! core
//!
//! Core domain types and operations for the release tooling.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchReference, CommitSha, TagName, RepoSlug
//! - [`branch_ref`] - Branch reference extraction from free text
//! - [`tags`] - Tag resolution for a commit
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - "Not found" is `None`, never an error
//! - Extraction is pure; resolution performs no hidden retries

pub mod branch_ref;
pub mod config;
pub mod tags;
pub mod types;
