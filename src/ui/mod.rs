//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Line input and interactive prompts
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All console output and input goes through this module so quiet and
//! non-interactive modes are honored in one place.

pub mod output;
pub mod prompts;
