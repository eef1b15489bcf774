//! Pull request diff summarization and file-type labeling.
//!
//! Turns the changed-file list of a pull request into aggregate counts,
//! one label per file, and the text of the summary comment. Everything in
//! this crate is pure; the GitHub side effects live in `prtally-github`.

pub mod classify;
pub mod summary;
