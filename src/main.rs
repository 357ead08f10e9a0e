//! bulk-merge CLI entry point

mod cli;

use anstream::{eprintln, println};
use bulk_merge::RunConfiguration;
use bulk_merge::error::Error;
use bulk_merge::types::MergeMethod;
use clap::{Parser, ValueEnum};
use cli::style::Stylize;
use cli::{CommandContext, run_bulk_merge};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Bulk approve and squash-merge pull requests across GitHub organizations
#[derive(Parser, Debug)]
#[command(name = "bulk-merge", version, about, long_about = None)]
struct Cli {
    /// Organization(s) to search, comma-separated
    orgs: String,

    /// Text every PR title must contain (case-insensitive)
    title: String,

    /// PR author; `dependabot` selects the dependabot[bot] app
    author: String,

    /// Only these repositories, comma-separated (`owner/repo` or `repo`)
    repos: Option<String>,

    /// Merge regardless of check-run status
    #[arg(short = 'i', long)]
    ignore_checks: bool,

    /// Report what is ready without prompting or merging
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// GitHub Enterprise host (defaults to github.com)
    #[arg(long, env = "GITHUB_HOST")]
    host: Option<String>,

    /// Merge method
    #[arg(long, value_enum, default_value_t = MethodArg::Squash)]
    method: MethodArg,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Squash,
    Merge,
    Rebase,
}

impl From<MethodArg> for MergeMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Squash => Self::Squash,
            MethodArg::Merge => Self::Merge,
            MethodArg::Rebase => Self::Rebase,
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "bulk_merge=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn report_error(e: &Error) -> ExitCode {
    if e.is_aborted() {
        println!("{}", "Aborted".muted());
    } else {
        eprintln!("{} {e}", "error:".error());
        if matches!(e, Error::Usage(_)) {
            eprintln!("{}", "Run 'bulk-merge --help' for usage.".muted());
        }
    }
    ExitCode::from(e.exit_code())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also come through here
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_tracing(cli.verbose);

    let config = match RunConfiguration::new(
        split_list(&cli.orgs),
        cli.repos.as_deref().map(split_list).unwrap_or_default(),
        cli.title,
        cli.author,
        cli.ignore_checks,
    ) {
        Ok(config) => config
            .with_merge_method(cli.method.into())
            .with_dry_run(cli.dry_run),
        Err(e) => return report_error(&e),
    };

    let ctx = match CommandContext::new(config, cli.host.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => return report_error(&e),
    };

    match run_bulk_merge(&ctx).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}
