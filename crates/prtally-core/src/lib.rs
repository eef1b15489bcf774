//! Core types, configuration, and error handling for prtally.
//!
//! This crate provides the shared foundation used by all other prtally crates:
//! - [`PrTallyError`] — unified error type using `thiserror` and `miette`
//! - [`PrTallyConfig`] — configuration loaded from `.prtally.toml`
//! - Shared types: [`ChangedFile`], [`DiffSummary`], [`FileLabel`]

mod config;
mod error;
mod types;

pub use config::{CommentConfig, GitHubConfig, PrTallyConfig, DEFAULT_API_BASE_URL};
pub use error::PrTallyError;
pub use types::{ChangedFile, DiffSummary, FileLabel};

/// A convenience `Result` type for prtally operations.
pub type Result<T> = std::result::Result<T, PrTallyError>;
