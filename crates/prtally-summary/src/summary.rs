//! Aggregate change statistics and the summary comment text.

use prtally_core::{ChangedFile, DiffSummary, FileLabel};

use crate::classify::classify;

/// Counts plus one label per file, in input order.
///
/// # Examples
///
/// ```
/// use prtally_core::{ChangedFile, FileLabel};
/// use prtally_summary::summary::summarize;
///
/// let tally = summarize(&[ChangedFile::new("a.js", 3, 1)]);
/// assert_eq!(tally.summary.additions, 3);
/// assert_eq!(tally.labels, vec![FileLabel::JavaScript]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffTally {
    /// Totals across every file.
    pub summary: DiffSummary,
    /// Label for each file; repeats are kept.
    pub labels: Vec<FileLabel>,
}

impl DiffTally {
    /// Label text in the form the labeling endpoint expects.
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.as_str().to_string()).collect()
    }
}

/// Walk `files` once, summing counts and classifying each filename.
///
/// # Examples
///
/// ```
/// use prtally_summary::summary::summarize;
///
/// let tally = summarize(&[]);
/// assert_eq!(tally.summary.changed_file_count, 0);
/// assert!(tally.labels.is_empty());
/// ```
pub fn summarize(files: &[ChangedFile]) -> DiffTally {
    let mut tally = DiffTally {
        summary: DiffSummary::default(),
        labels: Vec::with_capacity(files.len()),
    };
    for file in files {
        tally.summary.record(file);
        tally.labels.push(classify(&file.filename));
    }
    tally
}

/// Build the body of the summary comment posted on the pull request.
///
/// # Examples
///
/// ```
/// use prtally_core::DiffSummary;
/// use prtally_summary::summary::render_comment;
///
/// let summary = DiffSummary { additions: 3, deletions: 6, changed_file_count: 2 };
/// let body = render_comment(42, &summary);
/// assert!(body.starts_with("Pull request #42"));
/// assert!(body.contains("- 6 deletions"));
/// ```
pub fn render_comment(pr_number: u64, summary: &DiffSummary) -> String {
    format!(
        "Pull request #{pr_number} has been updated with:\n\n\
         - {} additions\n\
         - {} deletions\n\
         - {} changed files\n",
        summary.additions, summary.deletions, summary.changed_file_count
    )
}
