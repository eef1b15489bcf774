//! GitHub Actions runtime plumbing.
//!
//! Reads step inputs from the `INPUT_*` environment variables the runner
//! sets, writes workflow commands (`::debug::`, `::error::`) to stdout,
//! records step outputs through the `GITHUB_OUTPUT` file, and provides the
//! start-of-run delay.

pub mod commands;
pub mod inputs;
pub mod output;
pub mod wait;

pub use commands::{debug, set_failed};
pub use inputs::{get_input, ActionInputs, EnvInputs, InputSource, Layered, MapInputs};
pub use output::set_output;
pub use wait::{time_string, wait};
