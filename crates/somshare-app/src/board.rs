//! Board listing and client-side faceted filtering.
//!
//! The backend only filters by exact major, so a college scope is
//! resolved here: fetch broadly, keep posts whose major belongs to the
//! college, and re-sort by upload date descending (ISO dates, so plain
//! string comparison is chronological).

use tracing::debug;

use somshare_client::posts::ListQuery;
use somshare_client::{ApiClient, ApiError};
use somshare_types::api::RateResponse;
use somshare_types::catalog;
use somshare_types::models::Post;

/// Major/college facet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    Major(String),
    College(String),
}

#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    pub search: Option<String>,
    pub scope: Scope,
}

/// Pure filter: a function of (posts, filter) only, so applying it
/// twice with the same filter is a no-op on the second pass.
pub fn filter_posts(posts: &[Post], filter: &BoardFilter) -> Vec<Post> {
    let term = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut out: Vec<Post> = posts
        .iter()
        .filter(|post| {
            let search_ok = term
                .as_deref()
                .is_none_or(|t| matches_search(post, t));
            let scope_ok = match &filter.scope {
                Scope::All => true,
                Scope::Major(code) => post.major == *code,
                Scope::College(name) => {
                    catalog::major_codes_of(name).contains(&post.major.as_str())
                }
            };
            search_ok && scope_ok
        })
        .cloned()
        .collect();

    if let Scope::College(_) = filter.scope {
        out.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
    }
    out
}

/// Case-insensitive substring across title, subject, and professor.
/// `term` must already be lowercased.
fn matches_search(post: &Post, term: &str) -> bool {
    post.title.to_lowercase().contains(term)
        || post.subject.to_lowercase().contains(term)
        || post.professor.to_lowercase().contains(term)
}

/// Fetched posts plus the active facet. The raw fetch is kept; the
/// filtered view is recomputed on demand.
#[derive(Default)]
pub struct BoardState {
    pub posts: Vec<Post>,
    pub filter: BoardFilter,
}

impl BoardState {
    /// Refetch from the server. An exact-major scope is pushed down as
    /// a query parameter; college and unscoped fetches pull everything
    /// and rely on [`filter_posts`]. Results replace the cache only on
    /// success, so a failed refresh leaves the board unchanged.
    pub async fn refresh(&mut self, client: &ApiClient) -> Result<usize, ApiError> {
        let query = ListQuery {
            search: self.filter.search.clone(),
            major: match &self.filter.scope {
                Scope::Major(code) => Some(code.clone()),
                _ => None,
            },
            page: None,
            size: None,
        };
        let posts = client.list_posts(&query).await?.into_posts();
        debug!(count = posts.len(), "board refreshed");
        self.posts = posts;
        Ok(self.posts.len())
    }

    /// The cards to render, in display order.
    pub fn visible(&self) -> Vec<Post> {
        filter_posts(&self.posts, &self.filter)
    }

    pub fn post(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Provisional counter bump for immediate feedback; the next
    /// refresh replaces it with server truth.
    pub fn bump_download_count(&mut self, id: i64) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == id) {
            post.download_count += 1;
        }
    }

    /// Replace like/dislike counters with the server's authoritative
    /// response. Never incremented locally.
    pub fn apply_rating(&mut self, id: i64, resp: &RateResponse) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == id) {
            post.like_count = resp.like_count;
            post.dislike_count = resp.dislike_count;
        }
    }
}
