//! Per-user aggregation fed by the pagination walker, one handler per
//! endpoint family. Comments create entries; commit totals only ever attach
//! to entries that already exist, so a contributor with commits but no
//! qualifying comment stays invisible to the report.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::period::Period;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStat {
    pub comments: u64,
    pub commits: Option<u64>,
}

pub type UserStats = HashMap<String, UserStat>;

#[derive(Debug, Deserialize)]
pub struct Author {
    pub login: String,
}

/// One comment record, shared by the commit-comment, issue-comment and
/// pull-request-comment endpoints. The author is null for deleted accounts.
#[derive(Debug, Deserialize)]
pub struct Comment {
    pub user: Option<Author>,
    pub created_at: Option<DateTime<Utc>>,
}

/// One contributor summary from the statistics endpoint. `total` is the
/// lifetime commit count; the endpoint carries no per-record timestamp.
#[derive(Debug, Deserialize)]
pub struct ContributorActivity {
    pub author: Option<Author>,
    pub total: u64,
}

pub fn record_comments(stats: &mut UserStats, period: &Period, now: DateTime<Utc>, page: Vec<Comment>) {
    for comment in page {
        let Some(author) = comment.user else { continue };
        let Some(created_at) = comment.created_at else { continue };
        if !period.contains(created_at, now) {
            continue;
        }
        stats
            .entry(author.login)
            .and_modify(|stat| stat.comments += 1)
            .or_insert(UserStat {
                comments: 1,
                commits: None,
            });
    }
}

pub fn record_commits(stats: &mut UserStats, page: Vec<ContributorActivity>) {
    for contributor in page {
        let Some(author) = contributor.author else { continue };
        if let Some(stat) = stats.get_mut(&author.login) {
            stat.commits = Some(contributor.total);
        }
    }
}
