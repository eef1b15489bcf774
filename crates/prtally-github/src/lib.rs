//! GitHub side of prtally.
//!
//! Provides the [`api::PullRequestApi`] seam, an octocrab-backed client,
//! label/comment publishing, and the linear fetch → summarize → publish
//! pipeline.

pub mod api;
pub mod github;
pub mod pipeline;
pub mod publish;
