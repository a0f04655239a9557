//! GitHub REST client and the pagination walker. One walk follows the
//! `Link` response header from page to page, hands each page of typed
//! records to the caller and tracks rate-limit consumption for display.
//! A failed page is logged and treated as empty; it is never retried, so
//! the walk for that endpoint simply ends there.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{ACCEPT, HeaderMap, LINK, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::cli::RepoId;
use crate::error::FetchError;

const API_ROOT: &str = "https://api.github.com";

#[derive(Clone)]
pub struct GithubClient {
    base: String,
    token: Arc<String>,
    http: Arc<Client>,
}

/// Requests consumed out of the current rate-limit window. Display only;
/// the walker never throttles on it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub used: u64,
    pub total: u64,
}

impl RateLimit {
    /// Snapshot from response headers. Both headers must be present and
    /// numeric, otherwise the previous state is kept.
    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let total = header_u64(headers, "x-ratelimit-limit")?;
        let remaining = header_u64(headers, "x-ratelimit-remaining")?;
        Some(Self {
            used: total.saturating_sub(remaining),
            total,
        })
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Position in one endpoint's page sequence: the request path plus its
/// query parameters. Advancing merges the `next` relation's parameters
/// over the current ones, so the page size set at the start carries
/// through unless the server overrides it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageCursor {
    path: String,
    query: Vec<(String, String)>,
}

impl PageCursor {
    fn first(path: &str, page_size: u32) -> Self {
        Self {
            path: path.to_string(),
            query: vec![("per_page".to_string(), page_size.to_string())],
        }
    }

    fn advance(&self, next: &Url) -> Self {
        let mut query = self.query.clone();
        for (key, value) in next.query_pairs() {
            match query.iter_mut().find(|(name, _)| *name == key) {
                Some(slot) => slot.1 = value.into_owned(),
                None => query.push((key.into_owned(), value.into_owned())),
            }
        }
        Self {
            path: next.path().to_string(),
            query,
        }
    }

    fn page(&self) -> u64 {
        self.query
            .iter()
            .find(|(name, _)| name == "page")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(1)
    }
}

#[derive(Debug, Default)]
struct PageLinks {
    next: Option<Url>,
    last: Option<Url>,
}

/// Parse an RFC 8288-style `Link` header into its `next`/`last` relations.
fn parse_link_header(raw: &str) -> PageLinks {
    let mut links = PageLinks::default();
    for entry in raw.split(',') {
        let mut parts = entry.split(';');
        let Some(target) = parts.next() else { continue };
        let target = target.trim();
        if !(target.starts_with('<') && target.ends_with('>')) {
            continue;
        }
        let Ok(url) = Url::parse(&target[1..target.len() - 1]) else {
            continue;
        };
        for param in parts {
            match param.trim().strip_prefix("rel=").map(|rel| rel.trim_matches('"')) {
                Some("next") => links.next = Some(url.clone()),
                Some("last") => links.last = Some(url.clone()),
                _ => {}
            }
        }
    }
    links
}

fn page_number(url: &Url) -> Option<u64> {
    url.query_pairs()
        .find(|(name, _)| name == "page")
        .and_then(|(_, value)| value.parse().ok())
}

struct FetchedPage<T> {
    items: Vec<T>,
    links: PageLinks,
    rate: Option<RateLimit>,
}

impl GithubClient {
    /// Create a client for api.github.com with the given bearer token.
    pub fn new(token: String) -> Self {
        Self::with_base(token, API_ROOT)
    }

    /// Same client against another host; the pagination tests point this
    /// at a local scripted server.
    pub fn with_base(token: String, base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            token: Arc::new(token),
            http: Arc::new(Client::new()),
        }
    }

    /// Walk every page of `start_path`, invoking `on_page` once per fetched
    /// page, in page order. Rate-limit state and a progress bar (page
    /// position plus rate consumption) are refreshed after each page.
    pub async fn fetch_paged<T, F>(
        &self,
        label: &str,
        start_path: &str,
        page_size: u32,
        rate: &mut RateLimit,
        mut on_page: F,
    ) where
        T: DeserializeOwned,
        F: FnMut(Vec<T>),
    {
        let mut cursor = PageCursor::first(start_path, page_size);

        let pb = ProgressBar::new(1);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:>21} [{bar:30}] page {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        pb.set_prefix(label.to_string());

        let mut first = true;
        loop {
            let page = match self.fetch_page::<T>(&cursor).await {
                Ok(page) => page,
                Err(FetchError::RateLimited) => {
                    eprintln!(
                        "{} {label}: API rate limit exhausted, skipping remaining pages",
                        style("warning:").yellow().bold()
                    );
                    break;
                }
                Err(err) => {
                    eprintln!(
                        "{} {label}: {err}, treating page as empty",
                        style("warning:").yellow().bold()
                    );
                    break;
                }
            };

            on_page(page.items);

            if let Some(snapshot) = page.rate {
                *rate = snapshot;
            }

            if first {
                pb.set_length(page.links.last.as_ref().and_then(page_number).unwrap_or(1));
                first = false;
            }
            pb.set_position(cursor.page());
            pb.set_message(format!("rate {}/{}", rate.used, rate.total));

            let Some(next) = page.links.next else { break };
            cursor = cursor.advance(&next);
        }
        pb.finish_and_clear();
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        cursor: &PageCursor,
    ) -> Result<FetchedPage<T>, FetchError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base, cursor.path))
            .query(&cursor.query)
            .bearer_auth(&*self.token)
            .header(USER_AGENT, "commenters")
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = resp.status();
        let rate = RateLimit::from_headers(resp.headers());

        if !status.is_success() {
            let exhausted = (status == StatusCode::FORBIDDEN
                || status == StatusCode::TOO_MANY_REQUESTS)
                && header_u64(resp.headers(), "x-ratelimit-remaining") == Some(0);
            if exhausted {
                return Err(FetchError::RateLimited);
            }
            return Err(FetchError::Status(status));
        }

        let links = resp
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(parse_link_header)
            .unwrap_or_default();

        let body = resp.text().await?;
        let items: Vec<T> = serde_json::from_str(&body)?;

        Ok(FetchedPage { items, links, rate })
    }

    pub async fn commit_comments<F: FnMut(Vec<crate::aggregate::Comment>)>(
        &self,
        repo: &RepoId,
        page_size: u32,
        rate: &mut RateLimit,
        on_page: F,
    ) {
        let path = format!("/repos/{}/{}/comments", repo.owner, repo.name);
        self.fetch_paged("commit comments", &path, page_size, rate, on_page)
            .await;
    }

    pub async fn issue_comments<F: FnMut(Vec<crate::aggregate::Comment>)>(
        &self,
        repo: &RepoId,
        page_size: u32,
        rate: &mut RateLimit,
        on_page: F,
    ) {
        let path = format!("/repos/{}/{}/issues/comments", repo.owner, repo.name);
        self.fetch_paged("issue comments", &path, page_size, rate, on_page)
            .await;
    }

    pub async fn pull_request_comments<F: FnMut(Vec<crate::aggregate::Comment>)>(
        &self,
        repo: &RepoId,
        page_size: u32,
        rate: &mut RateLimit,
        on_page: F,
    ) {
        let path = format!("/repos/{}/{}/pulls/comments", repo.owner, repo.name);
        self.fetch_paged("pull request comments", &path, page_size, rate, on_page)
            .await;
    }

    pub async fn contributor_stats<F: FnMut(Vec<crate::aggregate::ContributorActivity>)>(
        &self,
        repo: &RepoId,
        page_size: u32,
        rate: &mut RateLimit,
        on_page: F,
    ) {
        let path = format!("/repos/{}/{}/stats/contributors", repo.owner, repo.name);
        self.fetch_paged("contributor stats", &path, page_size, rate, on_page)
            .await;
    }
}
