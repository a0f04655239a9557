use crate::aggregate::{UserStat, UserStats};

pub const EMPTY_MESSAGE: &str = "No comments found.";

/// Render the aggregate as ranked, aligned report lines. Sorted by comment
/// count descending; equal counts fall back to login order so the output is
/// deterministic.
pub fn render(stats: &UserStats) -> Vec<String> {
    if stats.is_empty() {
        return vec![EMPTY_MESSAGE.to_string()];
    }

    let mut rows: Vec<(&str, &UserStat)> = stats
        .iter()
        .map(|(login, stat)| (login.as_str(), stat))
        .collect();
    rows.sort_by(|a, b| b.1.comments.cmp(&a.1.comments).then_with(|| a.0.cmp(b.0)));

    let width = rows
        .iter()
        .map(|(_, stat)| stat.comments)
        .max()
        .map(|max| max.to_string().len())
        .unwrap_or(0);

    rows.into_iter()
        .map(|(login, stat)| {
            let commits = match stat.commits {
                Some(n) => format!("{n} commits"),
                None => "no commits".to_string(),
            };
            format!("{:>width$} comments, {login} ({commits})", stat.comments)
        })
        .collect()
}
