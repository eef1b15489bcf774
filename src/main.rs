use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use prtally_actions::{
    debug, set_failed, set_output, time_string, wait, ActionInputs, EnvInputs, Layered, MapInputs,
};
use prtally_core::{PrTallyConfig, PrTallyError};
use prtally_github::api::PullRequestTarget;
use prtally_github::github::{parse_pr_reference, GitHubClient};
use prtally_github::pipeline;
use prtally_github::publish::PublishOptions;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "prtally",
    version,
    about = "Tally pull request changes, label files by type, and post a summary comment",
    long_about = "prtally runs as a GitHub Actions step. It reads its inputs from the INPUT_*\n\
                   variables the runner sets, fetches the pull request's changed files, adds one\n\
                   label per file (JavaScript, JSON, Markdown, Python, YAML or Other), and comments\n\
                   with the addition, deletion and file counts.\n\n\
                   Every input can also be given as a flag, which takes precedence.\n\n\
                   Examples:\n  \
                     prtally                                   Run inside a workflow step\n  \
                     prtally --pr octocat/hello-world#42 --milliseconds 0\n  \
                     prtally --config .prtally.toml --skip-existing-comment"
)]
struct Cli {
    /// Path to configuration file (default: .prtally.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pull request to tally (format: owner/repo#123)
    #[arg(
        long,
        long_help = "Pull request to tally.\n\nFormat: owner/repo#123\nOverrides the owner, repo and pr_number inputs."
    )]
    pr: Option<String>,

    /// Repository owner (overrides the `owner` input)
    #[arg(long)]
    owner: Option<String>,

    /// Repository name (overrides the `repo` input)
    #[arg(long)]
    repo: Option<String>,

    /// Pull request number (overrides the `pr_number` input)
    #[arg(long)]
    pr_number: Option<u64>,

    /// Delay before starting, in milliseconds (overrides the `milliseconds` input)
    #[arg(long)]
    milliseconds: Option<u64>,

    /// GitHub token (overrides the `token` input; falls back to GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// GitHub REST API base URL (overrides `github.api_base_url`)
    #[arg(long)]
    api_url: Option<String>,

    /// Do not comment if an identical summary is already on the pull request
    #[arg(long)]
    skip_existing_comment: bool,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let verbose = cli.verbose;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            set_failed(&err.to_string());
            if verbose {
                eprintln!("{:?}", miette::Report::new(err));
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), PrTallyError> {
    let config = load_config(cli.config.as_deref())?;

    let source = Layered(flag_inputs(&cli)?, Layered(EnvInputs, token_fallback()));
    let inputs = ActionInputs::from_source(&source)?;
    tracing::debug!(?inputs, "resolved inputs");

    debug(&format!("Waiting {} milliseconds ...", inputs.milliseconds));
    debug(&time_string(&Local::now()));
    wait(inputs.milliseconds).await;
    debug(&time_string(&Local::now()));

    set_output("time", &time_string(&Local::now()))?;

    let api_url = cli.api_url.unwrap_or(config.github.api_base_url);
    let client = GitHubClient::new(&inputs.token, &api_url)?;
    let target = PullRequestTarget::new(inputs.owner, inputs.repo, inputs.pr_number);
    let options = PublishOptions {
        skip_existing_comment: cli.skip_existing_comment || config.comment.skip_existing,
    };

    let report = pipeline::run(&client, &target, options).await?;
    println!("{}", report.outcome.comment);

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PrTallyConfig, PrTallyError> {
    match path {
        Some(path) => PrTallyConfig::from_file(path),
        None => {
            let default_path = Path::new(".prtally.toml");
            if default_path.exists() {
                PrTallyConfig::from_file(default_path)
            } else {
                Ok(PrTallyConfig::default())
            }
        }
    }
}

fn flag_inputs(cli: &Cli) -> Result<MapInputs, PrTallyError> {
    let mut flags = MapInputs::default()
        .with_opt("milliseconds", cli.milliseconds.map(|ms| ms.to_string()))
        .with_opt("owner", cli.owner.clone())
        .with_opt("repo", cli.repo.clone())
        .with_opt("pr_number", cli.pr_number.map(|n| n.to_string()))
        .with_opt("token", cli.token.clone());

    if let Some(pr_ref) = &cli.pr {
        let target = parse_pr_reference(pr_ref)?;
        flags = flags
            .with("owner", target.owner)
            .with("repo", target.repo)
            .with("pr_number", target.number.to_string());
    }

    Ok(flags)
}

fn token_fallback() -> MapInputs {
    MapInputs::default().with_opt("token", std::env::var("GITHUB_TOKEN").ok())
}

/// Logs go to stderr; stdout carries workflow commands the runner parses.
fn init_tracing(verbose: bool) {
    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
    let default_level = if verbose || runner_debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
