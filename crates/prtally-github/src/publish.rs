use prtally_core::PrTallyError;
use prtally_summary::summary::{render_comment, DiffTally};

use crate::api::{PullRequestApi, PullRequestTarget};

/// Knobs for [`publish`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishOptions {
    /// List existing comments first and skip posting an identical summary.
    pub skip_existing_comment: bool,
}

/// What [`publish`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Number of labels sent, repeats included.
    pub labels_applied: usize,
    /// Body of the summary comment.
    pub comment: String,
    /// `false` only when an identical comment was already present.
    pub comment_posted: bool,
}

/// Apply the tally's labels to the pull request, then post the summary comment.
///
/// The label list goes to [`PullRequestApi::add_labels`] exactly as given,
/// even when empty. If labeling fails, no comment is posted.
///
/// # Errors
///
/// Returns whatever the underlying [`PullRequestApi`] call returned.
pub async fn publish(
    api: &dyn PullRequestApi,
    target: &PullRequestTarget,
    tally: &DiffTally,
    options: PublishOptions,
) -> Result<PublishOutcome, PrTallyError> {
    let PullRequestTarget {
        owner,
        repo,
        number,
    } = target;

    let names = tally.label_names();
    api.add_labels(owner, repo, *number, &names).await?;
    tracing::info!(count = names.len(), "applied labels to {target}");

    let comment = render_comment(*number, &tally.summary);
    if options.skip_existing_comment {
        let existing = api.list_comment_bodies(owner, repo, *number).await?;
        if existing.iter().any(|body| body.trim() == comment.trim()) {
            tracing::info!("identical summary already on {target}, not commenting");
            return Ok(PublishOutcome {
                labels_applied: names.len(),
                comment,
                comment_posted: false,
            });
        }
    }

    api.create_comment(owner, repo, *number, &comment).await?;
    tracing::info!("posted summary comment on {target}");

    Ok(PublishOutcome {
        labels_applied: names.len(),
        comment,
        comment_posted: true,
    })
}
