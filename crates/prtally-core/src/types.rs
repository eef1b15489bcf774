use std::fmt;

use serde::Deserialize;

use crate::error::PrTallyError;

/// One file touched by a pull request, as reported by the files endpoint.
///
/// Only the fields the summarizer consumes are kept; everything else in the
/// API payload is ignored during deserialization.
///
/// # Examples
///
/// ```
/// use prtally_core::ChangedFile;
///
/// let file: ChangedFile = serde_json::from_str(
///     r#"{"filename": "src/app.js", "additions": 3, "deletions": 1, "status": "modified"}"#,
/// ).unwrap();
/// assert_eq!(file.filename, "src/app.js");
/// assert_eq!(file.additions, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFile {
    /// Path of the file relative to the repository root.
    pub filename: String,
    /// Lines added.
    pub additions: u64,
    /// Lines removed.
    pub deletions: u64,
}

impl ChangedFile {
    /// Build a changed file entry.
    pub fn new(filename: impl Into<String>, additions: u64, deletions: u64) -> Self {
        Self {
            filename: filename.into(),
            additions,
            deletions,
        }
    }

    /// Check that the entry names at least one path segment.
    ///
    /// # Errors
    ///
    /// Returns [`PrTallyError::MalformedResponse`] if `filename` is empty or
    /// consists only of separators.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtally_core::ChangedFile;
    ///
    /// assert!(ChangedFile::new("README.md", 1, 0).validate().is_ok());
    /// assert!(ChangedFile::new("", 1, 0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), PrTallyError> {
        if self.filename.split('/').all(|segment| segment.trim().is_empty()) {
            return Err(PrTallyError::MalformedResponse(format!(
                "changed file entry has no filename (additions: {}, deletions: {})",
                self.additions, self.deletions
            )));
        }
        Ok(())
    }
}

/// Aggregate change statistics for a pull request.
///
/// # Examples
///
/// ```
/// use prtally_core::DiffSummary;
///
/// let summary = DiffSummary::default();
/// assert_eq!(summary.additions, 0);
/// assert_eq!(summary.changed_file_count, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Total lines added across all files.
    pub additions: u64,
    /// Total lines removed across all files.
    pub deletions: u64,
    /// Number of files processed.
    pub changed_file_count: u64,
}

impl DiffSummary {
    /// Fold one file into the running totals.
    pub fn record(&mut self, file: &ChangedFile) {
        self.additions = self.additions.saturating_add(file.additions);
        self.deletions = self.deletions.saturating_add(file.deletions);
        self.changed_file_count = self.changed_file_count.saturating_add(1);
    }
}

/// File-type label derived from a file extension.
///
/// # Examples
///
/// ```
/// use prtally_core::FileLabel;
///
/// assert_eq!(FileLabel::JavaScript.as_str(), "JavaScript");
/// assert_eq!(format!("{}", FileLabel::Yaml), "YAML");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileLabel {
    JavaScript,
    Json,
    Markdown,
    Python,
    Yaml,
    Other,
}

impl FileLabel {
    /// The label text as applied on GitHub.
    pub fn as_str(self) -> &'static str {
        match self {
            FileLabel::JavaScript => "JavaScript",
            FileLabel::Json => "JSON",
            FileLabel::Markdown => "Markdown",
            FileLabel::Python => "Python",
            FileLabel::Yaml => "YAML",
            FileLabel::Other => "Other",
        }
    }
}

impl fmt::Display for FileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_file_ignores_extra_fields() {
        let json = r#"{
            "sha": "bbcd538c8e72b8c175046e27cc8f907076331401",
            "filename": "docs/guide.md",
            "status": "added",
            "additions": 103,
            "deletions": 21,
            "changes": 124
        }"#;
        let file: ChangedFile = serde_json::from_str(json).unwrap();
        assert_eq!(file, ChangedFile::new("docs/guide.md", 103, 21));
    }

    #[test]
    fn changed_file_rejects_negative_counts() {
        let json = r#"{"filename": "a.js", "additions": -1, "deletions": 0}"#;
        assert!(serde_json::from_str::<ChangedFile>(json).is_err());
    }

    #[test]
    fn validate_rejects_separator_only_names() {
        assert!(ChangedFile::new("/", 0, 0).validate().is_err());
        assert!(ChangedFile::new("   ", 0, 0).validate().is_err());
        assert!(ChangedFile::new("Makefile", 0, 0).validate().is_ok());
    }

    #[test]
    fn record_accumulates() {
        let mut summary = DiffSummary::default();
        summary.record(&ChangedFile::new("a.js", 3, 1));
        summary.record(&ChangedFile::new("b.md", 0, 5));
        assert_eq!(
            summary,
            DiffSummary {
                additions: 3,
                deletions: 6,
                changed_file_count: 2,
            }
        );
    }

    #[test]
    fn label_display_matches_github_text() {
        assert_eq!(FileLabel::Json.to_string(), "JSON");
        assert_eq!(FileLabel::Other.to_string(), FileLabel::Other.as_str());
    }
}
