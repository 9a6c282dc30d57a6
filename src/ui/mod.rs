//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All console output goes through this module so that stdout carries only
//! results and stderr carries diagnostics.

pub mod output;
