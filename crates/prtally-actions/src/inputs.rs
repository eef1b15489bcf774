use std::collections::HashMap;

use prtally_core::PrTallyError;

/// Anything that can answer "what is the value of input `name`?".
pub trait InputSource {
    /// Raw value of the input, if it was given at all.
    fn get(&self, name: &str) -> Option<String>;
}

/// Inputs as exposed by the Actions runner: `INPUT_<NAME>` environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvInputs;

impl InputSource for EnvInputs {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(input_env_var(name)).ok()
    }
}

/// Environment variable the runner uses for input `name`.
///
/// # Examples
///
/// ```
/// use prtally_actions::inputs::input_env_var;
///
/// assert_eq!(input_env_var("pr_number"), "INPUT_PR_NUMBER");
/// assert_eq!(input_env_var("my input"), "INPUT_MY_INPUT");
/// ```
pub fn input_env_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// In-memory inputs, used for CLI overrides and tests.
///
/// # Examples
///
/// ```
/// use prtally_actions::{InputSource, MapInputs};
///
/// let inputs = MapInputs::default().with("owner", "octocat");
/// assert_eq!(inputs.get("owner").as_deref(), Some("octocat"));
/// assert!(inputs.get("repo").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapInputs(HashMap<String, String>);

impl MapInputs {
    /// Add or replace one input.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Add an input only when a value is present.
    pub fn with_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }
}

impl InputSource for MapInputs {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// Two sources where the first non-empty answer wins.
///
/// # Examples
///
/// ```
/// use prtally_actions::{InputSource, Layered, MapInputs};
///
/// let flags = MapInputs::default().with("repo", "");
/// let env = MapInputs::default().with("repo", "hello-world");
/// assert_eq!(Layered(flags, env).get("repo").as_deref(), Some("hello-world"));
/// ```
#[derive(Debug, Clone)]
pub struct Layered<A, B>(pub A, pub B);

impl<A: InputSource, B: InputSource> InputSource for Layered<A, B> {
    fn get(&self, name: &str) -> Option<String> {
        self.0
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.1.get(name))
    }
}

/// Read one input, trimmed.
///
/// Optional inputs that are absent come back as an empty string.
///
/// # Errors
///
/// Returns [`PrTallyError::InputRequired`] when `required` is set and the
/// input is absent or blank.
pub fn get_input(
    source: &dyn InputSource,
    name: &str,
    required: bool,
) -> Result<String, PrTallyError> {
    let value = source
        .get(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default();
    if required && value.is_empty() {
        return Err(PrTallyError::InputRequired(name.to_string()));
    }
    Ok(value)
}

/// The validated inputs of one run.
#[derive(Clone, PartialEq, Eq)]
pub struct ActionInputs {
    /// Delay before doing any work.
    pub milliseconds: u64,
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request number; also the issue number for labels and comments.
    pub pr_number: u64,
    /// GitHub token used for every API call.
    pub token: String,
}

impl std::fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionInputs")
            .field("milliseconds", &self.milliseconds)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("pr_number", &self.pr_number)
            .field("token", &"***")
            .finish()
    }
}

impl ActionInputs {
    /// Names of all inputs, in the order they are read.
    pub const NAMES: [&'static str; 5] = ["milliseconds", "owner", "repo", "pr_number", "token"];

    /// Read and validate every input in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`PrTallyError::MissingInputs`] naming every absent input, or
    /// [`PrTallyError::InvalidInput`] if `milliseconds` or `pr_number` do not
    /// parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtally_actions::{ActionInputs, MapInputs};
    ///
    /// let source = MapInputs::default()
    ///     .with("milliseconds", "0")
    ///     .with("owner", "octocat")
    ///     .with("repo", "hello-world")
    ///     .with("pr_number", "42")
    ///     .with("token", "ghp_xxxx");
    /// let inputs = ActionInputs::from_source(&source).unwrap();
    /// assert_eq!(inputs.pr_number, 42);
    /// ```
    pub fn from_source(source: &dyn InputSource) -> Result<Self, PrTallyError> {
        let mut missing = Vec::new();
        let mut required = |name: &str| match get_input(source, name, true) {
            Ok(value) => value,
            Err(_) => {
                missing.push(name.to_string());
                String::new()
            }
        };

        let milliseconds = required("milliseconds");
        let owner = required("owner");
        let repo = required("repo");
        let pr_number = required("pr_number");
        let token = required("token");

        if !missing.is_empty() {
            return Err(PrTallyError::MissingInputs(missing));
        }

        Ok(Self {
            milliseconds: parse_milliseconds(&milliseconds)?,
            owner,
            repo,
            pr_number: parse_pr_number(&pr_number)?,
            token,
        })
    }
}

fn parse_milliseconds(value: &str) -> Result<u64, PrTallyError> {
    value
        .parse()
        .map_err(|_| PrTallyError::InvalidInput("milliseconds not a number".into()))
}

fn parse_pr_number(value: &str) -> Result<u64, PrTallyError> {
    match value.trim_start_matches('#').parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PrTallyError::InvalidInput(format!(
            "invalid pull request number: {value}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> MapInputs {
        MapInputs::default()
            .with("milliseconds", "1000")
            .with("owner", "octocat")
            .with("repo", "hello-world")
            .with("pr_number", "42")
            .with("token", "ghp_xxxx")
    }

    #[test]
    fn required_input_missing() {
        let err = get_input(&MapInputs::default(), "token", true).unwrap_err();
        assert_eq!(err.to_string(), "Input required and not supplied: token");
    }

    #[test]
    fn required_input_blank_counts_as_missing() {
        let source = MapInputs::default().with("token", "   ");
        assert!(get_input(&source, "token", true).is_err());
    }

    #[test]
    fn optional_input_missing_is_empty() {
        assert_eq!(get_input(&MapInputs::default(), "x", false).unwrap(), "");
    }

    #[test]
    fn values_are_trimmed() {
        let source = MapInputs::default().with("owner", "  octocat\n");
        assert_eq!(get_input(&source, "owner", true).unwrap(), "octocat");
    }

    #[test]
    fn from_source_reads_everything() {
        let inputs = ActionInputs::from_source(&complete()).unwrap();
        assert_eq!(inputs.milliseconds, 1000);
        assert_eq!(inputs.owner, "octocat");
        assert_eq!(inputs.repo, "hello-world");
        assert_eq!(inputs.pr_number, 42);
        assert_eq!(inputs.token, "ghp_xxxx");
    }

    #[test]
    fn from_source_reports_all_missing() {
        let source = MapInputs::default()
            .with("milliseconds", "10")
            .with("repo", "hello-world");
        match ActionInputs::from_source(&source) {
            Err(PrTallyError::MissingInputs(names)) => {
                assert_eq!(names, vec!["owner", "pr_number", "token"]);
            }
            other => panic!("expected MissingInputs, got {other:?}"),
        }
    }

    #[test]
    fn milliseconds_must_be_numeric() {
        let source = complete().with("milliseconds", "soon");
        let err = ActionInputs::from_source(&source).unwrap_err();
        assert_eq!(err.to_string(), "milliseconds not a number");
    }

    #[test]
    fn pr_number_must_be_positive_integer() {
        for bad in ["0", "-3", "abc", "4.2"] {
            let source = complete().with("pr_number", bad);
            let err = ActionInputs::from_source(&source).unwrap_err();
            assert!(matches!(err, PrTallyError::InvalidInput(_)), "{bad}");
        }
    }

    #[test]
    fn pr_number_accepts_hash_prefix() {
        let source = complete().with("pr_number", "#7");
        assert_eq!(ActionInputs::from_source(&source).unwrap().pr_number, 7);
    }

    #[test]
    fn layered_prefers_first_source() {
        let flags = MapInputs::default().with("owner", "override");
        let layered = Layered(flags, complete());
        let inputs = ActionInputs::from_source(&layered).unwrap();
        assert_eq!(inputs.owner, "override");
        assert_eq!(inputs.repo, "hello-world");
    }

    #[test]
    fn debug_hides_token() {
        let inputs = ActionInputs::from_source(&complete()).unwrap();
        let shown = format!("{inputs:?}");
        assert!(!shown.contains("ghp_xxxx"));
    }
}
