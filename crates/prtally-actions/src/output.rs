//! Step outputs for later steps in the workflow.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use prtally_core::PrTallyError;
use uuid::Uuid;

use crate::commands::issue_command;

/// Record output `name` = `value`.
///
/// Appends to the file named by `GITHUB_OUTPUT` when the runner provides
/// one, otherwise falls back to the legacy `set-output` command.
///
/// # Errors
///
/// Returns [`PrTallyError::Output`] if the output file is missing or the
/// value collides with the generated delimiter, and [`PrTallyError::Io`] on
/// write failure.
pub fn set_output(name: &str, value: &str) -> Result<(), PrTallyError> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) if !path.is_empty() => append_output(Path::new(&path), name, value),
        _ => {
            // Legacy runners read outputs from stdout; keep them off a partial line.
            println!();
            issue_command("set-output", &[("name", name)], value);
            Ok(())
        }
    }
}

/// Append one output block to an existing `GITHUB_OUTPUT` file.
///
/// # Errors
///
/// See [`set_output`].
pub fn append_output(path: &Path, name: &str, value: &str) -> Result<(), PrTallyError> {
    if !path.exists() {
        return Err(PrTallyError::Output(format!(
            "missing file at path: {}",
            path.display()
        )));
    }
    let block = key_value_block(name, value)?;
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(block.as_bytes())?;
    Ok(())
}

/// Format `name` = `value` as a heredoc block with a random delimiter.
///
/// # Errors
///
/// Returns [`PrTallyError::Output`] if either side contains the delimiter.
///
/// # Examples
///
/// ```
/// use prtally_actions::output::key_value_block;
///
/// let block = key_value_block("time", "12:00:00").unwrap();
/// assert!(block.starts_with("time<<ghadelimiter_"));
/// assert!(block.contains("\n12:00:00\n"));
/// ```
pub fn key_value_block(name: &str, value: &str) -> Result<String, PrTallyError> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    if name.contains(&delimiter) {
        return Err(PrTallyError::Output(format!(
            "name should not contain the delimiter \"{delimiter}\""
        )));
    }
    if value.contains(&delimiter) {
        return Err(PrTallyError::Output(format!(
            "value should not contain the delimiter \"{delimiter}\""
        )));
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}
