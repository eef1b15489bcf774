/// Errors that can occur while tallying and publishing a pull request summary.
///
/// Library crates return this type directly. The binary records the
/// `Display` text as the run's failure message, so variants carrying a
/// message from elsewhere (inputs, the GitHub API) render it verbatim.
///
/// # Examples
///
/// ```
/// use prtally_core::PrTallyError;
///
/// let err = PrTallyError::InputRequired("token".into());
/// assert_eq!(err.to_string(), "Input required and not supplied: token");
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum PrTallyError {
    /// A single required action input was absent or empty.
    #[error("Input required and not supplied: {0}")]
    #[diagnostic(code(prtally::input::required))]
    InputRequired(String),

    /// Several required action inputs were absent or empty.
    #[error("Input required and not supplied: {}", .0.join(", "))]
    #[diagnostic(
        code(prtally::input::missing),
        help("set them under `with:` in the workflow step or pass the matching CLI flags")
    )]
    MissingInputs(Vec<String>),

    /// An input was present but could not be parsed.
    #[error("{0}")]
    #[diagnostic(code(prtally::input::invalid))]
    InvalidInput(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    #[diagnostic(code(prtally::config))]
    Config(String),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(prtally::config::toml))]
    Toml(#[from] toml::de::Error),

    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    #[diagnostic(code(prtally::io))]
    Io(#[from] std::io::Error),

    /// Transport or authorization failure talking to GitHub.
    #[error("{0}")]
    #[diagnostic(code(prtally::github))]
    GitHub(String),

    /// The API answered, but with data that does not fit the expected contract.
    #[error("malformed response: {0}")]
    #[diagnostic(code(prtally::github::malformed))]
    MalformedResponse(String),

    /// Recording a step output failed.
    #[error("unable to set output: {0}")]
    #[diagnostic(code(prtally::output))]
    Output(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_inputs_lists_every_name() {
        let err = PrTallyError::MissingInputs(vec!["owner".into(), "token".into()]);
        assert_eq!(
            err.to_string(),
            "Input required and not supplied: owner, token"
        );
    }

    #[test]
    fn github_error_is_verbatim() {
        let err = PrTallyError::GitHub("Bad credentials".into());
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PrTallyError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = PrTallyError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }
}
