//! forge
//!
//! Abstraction for the remote hosting service (GitHub).
//!
//! # Architecture
//!
//! The `Forge` trait defines the two queries the release tooling needs:
//! repository lookup and tag listing. Commands use the [`open_repository`]
//! factory rather than constructing sessions directly.
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait, `ForgeError`, and record types
//! - [`github`]: GitHub implementation using the REST API
//! - [`mock`]: Mock implementation for deterministic testing
//! - `factory`: Session creation and repository lookup

mod factory;
pub mod github;
pub mod mock;
mod traits;

pub use factory::{create_forge, open_repository};
pub use traits::*;
