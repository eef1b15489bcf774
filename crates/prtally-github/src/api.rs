use std::fmt;

use async_trait::async_trait;
use prtally_core::{ChangedFile, PrTallyError};

/// The handful of GitHub REST calls a run needs.
///
/// Pull requests share their number with the issue that carries their
/// labels and comments, so `issue_number` is the pull request number.
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Changed files of a pull request, in the order GitHub reports them.
    async fn list_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<Vec<ChangedFile>, PrTallyError>;

    /// Add labels to an issue. Labels that do not exist yet are created.
    ///
    /// An empty list is a no-op.
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> Result<(), PrTallyError>;

    /// Post a new comment on an issue.
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), PrTallyError>;

    /// Bodies of the comments already on an issue.
    async fn list_comment_bodies(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
    ) -> Result<Vec<String>, PrTallyError>;
}

/// The pull request a run operates on.
///
/// # Examples
///
/// ```
/// use prtally_github::api::PullRequestTarget;
///
/// let target = PullRequestTarget::new("octocat", "hello-world", 42);
/// assert_eq!(target.to_string(), "octocat/hello-world#42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestTarget {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PullRequestTarget {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }
}

impl fmt::Display for PullRequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}
