//! `gh-issues` - CLI for fetching and filtering GitHub issues and
//! repositories via the GraphQL search API.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use console::style;

use gh_issues::{GitHubService, QueryEcho, export, render};

#[derive(Parser)]
#[command(name = "gh-issues")]
#[command(version)]
#[command(about = "Fetch and filter GitHub issues from multiple repositories")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch issues from GitHub repositories
    Issues {
        #[command(flatten)]
        common: CommonArgs,
        /// Filter issues by labels
        #[arg(short = 'l', long = "labels", num_args = 1..)]
        labels: Vec<String>,
    },
    /// Fetch repositories from GitHub organizations
    Repos {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// GitHub organizations to fetch from
    #[arg(short = 'o', long = "orgs", num_args = 1..)]
    orgs: Vec<String>,
    /// GitHub repositories to fetch from (format: owner/repo)
    #[arg(short = 'r', long = "repos", num_args = 1..)]
    repos: Vec<String>,
    /// Lower date bound (YYYY-MM-DD), defaults to one year ago
    #[arg(short = 's', long = "since")]
    since: Option<NaiveDate>,
    /// GitHub API token (defaults to GITHUB_TOKEN env variable)
    #[arg(short = 't', long = "token")]
    token: Option<String>,
    /// Export results to a JSON file
    #[arg(short = 'j', long = "json")]
    json: Option<PathBuf>,
}

impl CommonArgs {
    fn since(&self) -> DateTime<Utc> {
        match self.since {
            Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
            None => Utc::now()
                .checked_sub_months(Months::new(12))
                .unwrap_or_else(Utc::now),
        }
    }

    /// Resolve the token and validate the org/repo precondition before the
    /// service runs. Violations exit immediately with a styled message.
    fn validate(&self) -> String {
        let token = self
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok());
        let Some(token) = token else {
            eprintln!(
                "{}",
                style(
                    "Error: GitHub token is required. Set GITHUB_TOKEN environment variable \
                     or use --token option"
                )
                .red()
            );
            std::process::exit(1);
        };
        if self.orgs.is_empty() && self.repos.is_empty() {
            eprintln!(
                "{}",
                style(
                    "Error: At least one organization (-o) or repository (-r) must be specified"
                )
                .red()
            );
            std::process::exit(1);
        }
        token
    }
}

async fn run_issues(common: CommonArgs, labels: Vec<String>) -> Result<()> {
    let token = common.validate();
    let since = common.since();
    let service = GitHubService::new(token)?;
    let issues = service
        .get_issues(&common.orgs, &common.repos, &labels, since)
        .await?;

    if let Some(path) = &common.json {
        let echo = QueryEcho {
            orgs: common.orgs.clone(),
            repos: common.repos.clone(),
            labels: Some(labels),
            since: since.format("%Y-%m-%d").to_string(),
        };
        export::export_issues(path, &issues, echo)?;
        render::print_exported(issues.len(), "issues", path);
    }

    render::print_issues(&issues);
    Ok(())
}

async fn run_repos(common: CommonArgs) -> Result<()> {
    let token = common.validate();
    let since = common.since();
    let service = GitHubService::new(token)?;
    let repos = service.get_repos(&common.orgs, &common.repos, since).await?;

    if let Some(path) = &common.json {
        let echo = QueryEcho {
            orgs: common.orgs.clone(),
            repos: common.repos.clone(),
            labels: None,
            since: since.format("%Y-%m-%d").to_string(),
        };
        export::export_repos(path, &repos, echo)?;
        render::print_exported(repos.len(), "repositories", path);
    }

    render::print_repos(&repos);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Issues { common, labels } => run_issues(common, labels).await,
        Commands::Repos { common } => run_repos(common).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", style("Error:").red());
            ExitCode::FAILURE
        }
    }
}
