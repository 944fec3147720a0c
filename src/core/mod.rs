//! core
//!
//! Definition-time building blocks of the console.
//!
//! # Modules
//!
//! - [`types`] - Argument value kinds and definition errors
//! - [`arguments`] - Positional/keyword specs and bound values
//! - [`tree`] - The command forest and its builder
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Invalid declarations fail when the forest is built, never mid-session
//! - Everything here is immutable once built
//! - Validation predicates are pure

pub mod arguments;
pub mod config;
pub mod tree;
pub mod types;
