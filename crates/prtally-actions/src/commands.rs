//! Workflow commands: `::name key=value::message` lines the runner parses from stdout.

use std::io::Write;

/// Escape a command message.
///
/// # Examples
///
/// ```
/// use prtally_actions::commands::escape_data;
///
/// assert_eq!(escape_data("50%\ndone"), "50%25%0Adone");
/// ```
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a command property value.
///
/// # Examples
///
/// ```
/// use prtally_actions::commands::escape_property;
///
/// assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
/// ```
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Render one workflow command line (without the trailing newline).
///
/// # Examples
///
/// ```
/// use prtally_actions::commands::format_command;
///
/// assert_eq!(format_command("debug", &[], "hi"), "::debug::hi");
/// assert_eq!(
///     format_command("set-output", &[("name", "time")], "12:00"),
///     "::set-output name=time::12:00"
/// );
/// ```
pub fn format_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{command}");
    let props: Vec<String> = properties
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{k}={}", escape_property(v)))
        .collect();
    if !props.is_empty() {
        line.push(' ');
        line.push_str(&props.join(","));
    }
    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

/// Write a workflow command to `out`.
pub fn write_command(
    out: &mut impl Write,
    command: &str,
    properties: &[(&str, &str)],
    message: &str,
) -> std::io::Result<()> {
    writeln!(out, "{}", format_command(command, properties, message))
}

/// Write a workflow command to stdout.
///
/// A broken stdout is ignored; there is nowhere left to report it.
pub fn issue_command(command: &str, properties: &[(&str, &str)], message: &str) {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let _ = write_command(&mut lock, command, properties, message);
}

/// Debug message, shown by the runner only when step debugging is enabled.
pub fn debug(message: &str) {
    issue_command("debug", &[], message);
}

/// Mark the step as failed with `message`.
///
/// This only records the failure; the caller sets the process exit code.
pub fn set_failed(message: &str) {
    tracing::error!("{message}");
    issue_command("error", &[], message);
}
