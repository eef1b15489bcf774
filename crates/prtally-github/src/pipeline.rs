use prtally_core::PrTallyError;
use prtally_summary::summary::{summarize, DiffTally};

use crate::api::{PullRequestApi, PullRequestTarget};
use crate::publish::{publish, PublishOptions, PublishOutcome};

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Counts and per-file labels.
    pub tally: DiffTally,
    /// Labels and comment sent to GitHub.
    pub outcome: PublishOutcome,
}

/// Fetch the pull request's files, summarize them, and publish the result.
///
/// Steps run strictly in order and the first error ends the run; nothing
/// is published if the fetch fails.
///
/// # Errors
///
/// Returns the first error raised by any step.
pub async fn run(
    api: &dyn PullRequestApi,
    target: &PullRequestTarget,
    options: PublishOptions,
) -> Result<RunReport, PrTallyError> {
    tracing::info!("fetching changed files for {target}");
    let files = api
        .list_files(&target.owner, &target.repo, target.number)
        .await?;
    tracing::debug!(files = files.len(), "fetched changed files");

    let tally = summarize(&files);
    tracing::debug!(
        additions = tally.summary.additions,
        deletions = tally.summary.deletions,
        changed_files = tally.summary.changed_file_count,
        "summarized diff"
    );

    let outcome = publish(api, target, &tally, options).await?;

    Ok(RunReport { tally, outcome })
}
