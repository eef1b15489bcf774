//! Extension-based file labeling.

use prtally_core::FileLabel;

/// Map a file path to its label using the text after the last `.`.
///
/// A path without any `.` is looked up whole, which never matches a known
/// extension. The lookup is exact and case-sensitive, and only `yml` (not
/// `yaml`) is recognized for YAML.
///
/// # Examples
///
/// ```
/// use prtally_core::FileLabel;
/// use prtally_summary::classify::classify;
///
/// assert_eq!(classify("src/index.js"), FileLabel::JavaScript);
/// assert_eq!(classify("README.md"), FileLabel::Markdown);
/// assert_eq!(classify("Makefile"), FileLabel::Other);
/// ```
pub fn classify(filename: &str) -> FileLabel {
    let extension = filename
        .rsplit_once('.')
        .map_or(filename, |(_, ext)| ext);
    match extension {
        "js" => FileLabel::JavaScript,
        "json" => FileLabel::Json,
        "md" => FileLabel::Markdown,
        "py" => FileLabel::Python,
        "yml" => FileLabel::Yaml,
        _ => FileLabel::Other,
    }
}
