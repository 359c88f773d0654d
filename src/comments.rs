// Visitor comments backed by GitHub issues.
// Open issues labelled `portfolio-comment` on the tracker repository
// become comment records, optionally enriched with the author's public
// profile.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{self, RequestCache};
use crate::cancel::CancelToken;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::github::types::{Issue, IssueUser, UserProfile};
use crate::profile::COMMENT_LABEL;

/// Shown when a comment issue has an empty body.
const EMPTY_BODY_PLACEHOLDER: &str = "(no comment text)";

/// Query for open comment issues, newest first. The upstream API does
/// the sorting.
const ISSUES_QUERY: &[(&str, &str)] = &[
    ("labels", COMMENT_LABEL),
    ("state", "open"),
    ("sort", "created"),
    ("direction", "desc"),
];

/// Comment author display model. The last three fields come from
/// profile enrichment and stay unset when that lookup fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    pub username: String,
    pub avatar_url: String,
    pub profile_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}

/// Visitor comment derived from a tracker issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub number: u64,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub content: String,
    pub author: CommentAuthor,
}

/// JSON comment form some visitors paste into the issue body.
#[derive(Debug, Deserialize)]
struct StructuredBody {
    author: StructuredAuthor,
    content: String,
}

#[derive(Debug, Deserialize)]
struct StructuredAuthor {
    name: String,
    username: String,
    #[serde(rename = "avatar")]
    avatar_url: String,
    #[serde(rename = "profileUrl")]
    profile_url: String,
}

/// Fetch visitor comments from the tracker repository's issues.
///
/// The issues request propagates failures: 403 arrives as a rate-limit
/// error, 404 means the tracker repository is missing. Per-author
/// profile enrichment is best effort; a failed lookup leaves that
/// comment's bio/location/company unset.
pub async fn fetch_comments(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
    cancel: &CancelToken,
) -> Result<Vec<Comment>> {
    let issues = fetch_issues(client, owner, repo, cancel).await?;

    // Memoize profile lookups so repeat commenters cost one request.
    let mut profiles: HashMap<String, Option<UserProfile>> = HashMap::new();
    let mut comments = Vec::with_capacity(issues.len());

    for issue in &issues {
        let mut comment = comment_from_issue(issue);

        let login = comment.author.username.clone();
        let profile = match profiles.get(&login) {
            Some(cached) => cached.clone(),
            None => {
                let fetched = fetch_profile(client, &login, cancel).await;
                profiles.insert(login, fetched.clone());
                fetched
            }
        };
        if let Some(profile) = profile {
            apply_profile(&mut comment.author, &profile);
        }

        comments.push(comment);
    }

    Ok(comments)
}

/// [`fetch_comments`] behind the request cache, keyed
/// `comments-<owner>-<repo>`.
pub async fn fetch_comments_cached(
    client: &GitHubClient,
    request_cache: &RequestCache,
    owner: &str,
    repo: &str,
    cancel: &CancelToken,
) -> Result<Vec<Comment>> {
    let key = cache::comments_key(owner, repo);
    let payload = request_cache
        .get_or_fetch(&key, || async {
            let comments = fetch_comments(client, owner, repo, cancel).await?;
            Ok(serde_json::to_value(comments)?)
        })
        .await?;
    Ok(serde_json::from_value(payload)?)
}

async fn fetch_issues(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
    cancel: &CancelToken,
) -> Result<Vec<Issue>> {
    let response = client
        .get_with_params(
            &format!("/repos/{}/{}/issues", owner, repo),
            ISSUES_QUERY,
            cancel,
        )
        .await?;
    let issues: Vec<Issue> = response.json().await?;
    Ok(issues)
}

/// Best-effort profile lookup. Any failure is absorbed here.
async fn fetch_profile(
    client: &GitHubClient,
    login: &str,
    cancel: &CancelToken,
) -> Option<UserProfile> {
    let result: Result<UserProfile> = async {
        let response = client.get(&format!("/users/{}", login), cancel).await?;
        Ok(response.json::<UserProfile>().await?)
    }
    .await;

    match result {
        Ok(profile) => Some(profile),
        Err(e) => {
            debug!("profile enrichment failed for {}: {}", login, e);
            None
        }
    }
}

/// Map an issue to a comment. A body in the structured JSON form
/// supplies author and content directly; otherwise the raw body is the
/// content, with a placeholder when it is empty.
fn comment_from_issue(issue: &Issue) -> Comment {
    let body = issue.body.as_deref().unwrap_or("").trim();

    let author;
    let content;
    match serde_json::from_str::<StructuredBody>(body) {
        Ok(structured) => {
            author = CommentAuthor {
                name: structured.author.name,
                username: structured.author.username,
                avatar_url: structured.author.avatar_url,
                profile_url: structured.author.profile_url,
                bio: None,
                location: None,
                company: None,
            };
            content = structured.content;
        }
        Err(_) => {
            author = baseline_author(&issue.user);
            content = if body.is_empty() {
                EMPTY_BODY_PLACEHOLDER.to_string()
            } else {
                body.to_string()
            };
        }
    }

    Comment {
        id: issue.id,
        number: issue.number,
        url: issue.html_url.clone(),
        created_at: issue.created_at,
        content,
        author,
    }
}

fn baseline_author(user: &IssueUser) -> CommentAuthor {
    CommentAuthor {
        name: user.name.clone().unwrap_or_else(|| user.login.clone()),
        username: user.login.clone(),
        avatar_url: user.avatar_url.clone(),
        profile_url: user.html_url.clone(),
        bio: None,
        location: None,
        company: None,
    }
}

fn apply_profile(author: &mut CommentAuthor, profile: &UserProfile) {
    if let Some(name) = &profile.name {
        author.name = name.clone();
    }
    author.bio = profile.bio.clone();
    author.location = profile.location.clone();
    author.company = profile.company.clone();
}
