use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use commenters::aggregate::{self, UserStats};
use commenters::cli::{Cli, RepoId};
use commenters::github::{GithubClient, RateLimit};
use commenters::period::Period;
use commenters::report;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let repo = RepoId::parse(&cli.repo)?;
    let period = Period::parse(&cli.period)?;
    let token =
        std::env::var("GITHUB_TOKEN").context("GITHUB_TOKEN environment variable not set")?;

    let client = GithubClient::new(token);
    let now = Utc::now();
    let mut rate = RateLimit::default();
    let mut stats = UserStats::new();

    // Comments first: only users seen here ever receive a commit count.
    client
        .commit_comments(&repo, cli.page_size, &mut rate, |page| {
            aggregate::record_comments(&mut stats, &period, now, page)
        })
        .await;
    client
        .issue_comments(&repo, cli.page_size, &mut rate, |page| {
            aggregate::record_comments(&mut stats, &period, now, page)
        })
        .await;
    client
        .pull_request_comments(&repo, cli.page_size, &mut rate, |page| {
            aggregate::record_comments(&mut stats, &period, now, page)
        })
        .await;
    client
        .contributor_stats(&repo, cli.page_size, &mut rate, |page| {
            aggregate::record_commits(&mut stats, page)
        })
        .await;

    for line in report::render(&stats) {
        println!("{line}");
    }

    Ok(())
}
