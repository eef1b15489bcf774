use async_trait::async_trait;
use prtally_core::{ChangedFile, PrTallyError};
use serde::{Deserialize, Serialize};

use crate::api::{PullRequestApi, PullRequestTarget};

/// Largest page the REST API serves; results are not paginated beyond it.
const PER_PAGE: u8 = 100;

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
}

const PAGE: PageParams = PageParams { per_page: PER_PAGE };

/// GitHub REST client for reading pull request files and writing labels and comments.
///
/// # Examples
///
/// ```
/// use prtally_github::github::parse_pr_reference;
///
/// let target = parse_pr_reference("rust-lang/rust#12345").unwrap();
/// assert_eq!(target.owner, "rust-lang");
/// assert_eq!(target.repo, "rust");
/// assert_eq!(target.number, 12345);
/// ```
pub struct GitHubClient {
    octocrab: octocrab::Octocrab,
}

impl GitHubClient {
    /// Create a client authenticated with `token` against `api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PrTallyError::Config`] if the token is empty or the base URL
    /// is invalid, or [`PrTallyError::GitHub`] if the client cannot be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use prtally_github::github::GitHubClient;
    ///
    /// let client = GitHubClient::new("ghp_xxxx", "https://api.github.com").unwrap();
    /// ```
    pub fn new(token: &str, api_base_url: &str) -> Result<Self, PrTallyError> {
        if token.trim().is_empty() {
            return Err(PrTallyError::Config("GitHub token is empty".into()));
        }

        let octocrab = octocrab::Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base_url)
            .map_err(|e| {
                PrTallyError::Config(format!("invalid GitHub API URL '{api_base_url}': {e}"))
            })?
            .build()
            .map_err(|e| PrTallyError::GitHub(format!("failed to create GitHub client: {e}")))?;

        Ok(Self { octocrab })
    }
}

#[async_trait]
impl PullRequestApi for GitHubClient {
    async fn list_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<Vec<ChangedFile>, PrTallyError> {
        let route = format!("/repos/{owner}/{repo}/pulls/{pr_number}/files");
        let raw: Vec<serde_json::Value> = self
            .octocrab
            .get(route, Some(&PAGE))
            .await
            .map_err(|e| api_error("failed to fetch pull request files", e))?;
        decode_files(raw)
    }

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> Result<(), PrTallyError> {
        if labels.is_empty() {
            tracing::debug!("no labels to add to {owner}/{repo}#{issue_number}");
            return Ok(());
        }
        let route = format!("/repos/{owner}/{repo}/issues/{issue_number}/labels");
        let body = serde_json::json!({ "labels": labels });
        let _response: serde_json::Value = self
            .octocrab
            .post(route, Some(&body))
            .await
            .map_err(|e| api_error("failed to add labels", e))?;
        Ok(())
    }

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), PrTallyError> {
        let route = format!("/repos/{owner}/{repo}/issues/{issue_number}/comments");
        let body = serde_json::json!({ "body": body });
        let _response: serde_json::Value = self
            .octocrab
            .post(route, Some(&body))
            .await
            .map_err(|e| api_error("failed to create comment", e))?;
        Ok(())
    }

    async fn list_comment_bodies(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
    ) -> Result<Vec<String>, PrTallyError> {
        #[derive(Deserialize)]
        struct CommentDto {
            body: Option<String>,
        }

        let route = format!("/repos/{owner}/{repo}/issues/{issue_number}/comments");
        let comments: Vec<CommentDto> = self
            .octocrab
            .get(route, Some(&PAGE))
            .await
            .map_err(|e| api_error("failed to list comments", e))?;
        Ok(comments
            .into_iter()
            .map(|c| c.body.unwrap_or_default())
            .collect())
    }
}

fn api_error(context: &str, err: octocrab::Error) -> PrTallyError {
    let message = match err {
        octocrab::Error::GitHub { source, .. } => {
            tracing::debug!(status = %source.status_code, "{context}");
            source.message
        }
        other => {
            tracing::debug!("{context}");
            other.to_string()
        }
    };
    PrTallyError::GitHub(message)
}

/// Decode the files endpoint payload, rejecting entries that do not fit
/// [`ChangedFile`].
///
/// # Errors
///
/// Returns [`PrTallyError::MalformedResponse`] naming the first bad entry.
///
/// # Examples
///
/// ```
/// use prtally_github::github::decode_files;
///
/// let raw = vec![serde_json::json!({"filename": "a.js", "additions": 1, "deletions": 0})];
/// assert_eq!(decode_files(raw).unwrap()[0].filename, "a.js");
/// ```
pub fn decode_files(raw: Vec<serde_json::Value>) -> Result<Vec<ChangedFile>, PrTallyError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            let file: ChangedFile = serde_json::from_value(value).map_err(|e| {
                PrTallyError::MalformedResponse(format!("changed file #{index}: {e}"))
            })?;
            file.validate()?;
            Ok(file)
        })
        .collect()
}

/// Parse a PR reference string (`owner/repo#number`) into its components.
///
/// # Errors
///
/// Returns [`PrTallyError::InvalidInput`] if the format is invalid.
///
/// # Examples
///
/// ```
/// use prtally_github::github::parse_pr_reference;
///
/// let target = parse_pr_reference("octocat/hello-world#42").unwrap();
/// assert_eq!(target.owner, "octocat");
/// assert_eq!(target.repo, "hello-world");
/// assert_eq!(target.number, 42);
/// ```
pub fn parse_pr_reference(pr_ref: &str) -> Result<PullRequestTarget, PrTallyError> {
    let invalid = || {
        PrTallyError::InvalidInput(format!(
            "invalid PR reference '{pr_ref}', expected owner/repo#number"
        ))
    };
    let (owner_repo, number_str) = pr_ref.split_once('#').ok_or_else(invalid)?;
    let (owner, repo) = owner_repo.split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || repo.is_empty() {
        return Err(invalid());
    }
    let number: u64 = number_str
        .parse()
        .map_err(|_| PrTallyError::InvalidInput(format!("invalid PR number: {number_str}")))?;
    Ok(PullRequestTarget::new(owner, repo, number))
}
