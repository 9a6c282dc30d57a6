//! ecobalyse-release - release tooling for the Ecobalyse platform
//!
//! Two small pieces of release plumbing used from CI and by hand:
//!
//! - finding the `ecobalyse-private: <branch>` marker in a pull-request body
//!   or commit message, to pick the matching branch of the private companion
//!   repository;
//! - finding the GitHub tag that points at a given commit.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, owns the error boundary)
//! - [`core`] - Domain types, extraction, tag resolution, configuration
//! - [`forge`] - Abstraction over the hosting API (GitHub)
//! - [`ui`] - Console output

pub mod cli;
pub mod core;
pub mod forge;
pub mod ui;
