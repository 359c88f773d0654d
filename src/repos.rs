// Repository listing.
// Merges the curated featured list with live API results, falling back
// to the static snapshot when the API is unreachable or rate limited.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::{self, RequestCache};
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::fallback;
use crate::github::GitHubClient;
use crate::github::types::Repo;
use crate::profile;

/// Query returning up to 100 repositories, most recently updated first.
const REPOS_QUERY: &[(&str, &str)] = &[("per_page", "100"), ("sort", "updated")];

/// Name plus description, for compact listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: String,
}

/// Fetch the user's repositories, propagating any failure.
pub async fn try_fetch_repositories(
    client: &GitHubClient,
    username: &str,
    cancel: &CancelToken,
) -> Result<Vec<Repo>> {
    let response = client
        .get_with_params(&format!("/users/{}/repos", username), REPOS_QUERY, cancel)
        .await?;
    let repos: Vec<Repo> = response.json().await?;
    Ok(repos)
}

/// Fetch the user's repositories, degrading to the snapshot at the
/// default fallback path on any failure. Never returns an error.
pub async fn fetch_repositories(
    client: &GitHubClient,
    username: &str,
    cancel: &CancelToken,
) -> Vec<Repo> {
    fetch_repositories_with_fallback(client, username, Path::new(profile::FALLBACK_PATH), cancel)
        .await
}

/// Resilient fetch with an explicit snapshot path.
pub async fn fetch_repositories_with_fallback(
    client: &GitHubClient,
    username: &str,
    fallback_path: &Path,
    cancel: &CancelToken,
) -> Vec<Repo> {
    match try_fetch_repositories(client, username, cancel).await {
        Ok(repos) => repos,
        Err(e) => {
            warn!("live repository fetch failed, using snapshot: {}", e);
            fallback::load(fallback_path)
        }
    }
}

/// Order repositories for display: featured names first, in the given
/// order, then the remaining non-archived repositories by most recent
/// push. Featured names missing from `repos` are silently dropped.
pub fn organize(repos: Vec<Repo>, featured: &[&str]) -> Vec<Repo> {
    let mut by_name: HashMap<String, Repo> =
        repos.into_iter().map(|r| (r.name.clone(), r)).collect();

    let mut ordered: Vec<Repo> = featured
        .iter()
        .filter_map(|name| by_name.remove(*name))
        .collect();

    let mut remaining: Vec<Repo> = by_name.into_values().filter(|r| !r.archived).collect();
    // Descending by push time; repos that were never pushed sort last.
    remaining.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at));

    ordered.extend(remaining);
    ordered
}

/// Strict composition: fetch then organize, surfacing errors so the UI
/// can show an explicit error state.
pub async fn fetch_organized_repositories(
    client: &GitHubClient,
    username: &str,
    featured: &[&str],
    cancel: &CancelToken,
) -> Result<Vec<Repo>> {
    let repos = try_fetch_repositories(client, username, cancel).await?;
    Ok(organize(repos, featured))
}

/// Resilient composition: like [`fetch_organized_repositories`] but
/// degrading to the snapshot instead of erroring.
pub async fn fetch_featured_repositories(
    client: &GitHubClient,
    username: &str,
    featured: &[&str],
    cancel: &CancelToken,
) -> Vec<Repo> {
    let repos = fetch_repositories(client, username, cancel).await;
    organize(repos, featured)
}

/// Strict composition behind the request cache, keyed `repos-<username>`.
/// The unorganized result is cached so callers with different featured
/// lists share one API call.
pub async fn fetch_organized_repositories_cached(
    client: &GitHubClient,
    request_cache: &RequestCache,
    username: &str,
    featured: &[&str],
    cancel: &CancelToken,
) -> Result<Vec<Repo>> {
    let key = cache::repos_key(username);
    let payload = request_cache
        .get_or_fetch(&key, || async {
            let repos = try_fetch_repositories(client, username, cancel).await?;
            Ok(serde_json::to_value(repos)?)
        })
        .await?;
    let repos: Vec<Repo> = serde_json::from_value(payload)?;
    Ok(organize(repos, featured))
}

/// Names and descriptions only, with a placeholder for repositories
/// that have no description.
pub fn repo_summaries(repos: &[Repo]) -> Vec<RepoSummary> {
    repos
        .iter()
        .map(|r| RepoSummary {
            name: r.name.clone(),
            description: r
                .description
                .clone()
                .unwrap_or_else(|| "No description available".to_string()),
        })
        .collect()
}
