// GitHub API response types.
// Defines structs for deserializing GitHub REST API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public repository. Same shape as the entries in the static fallback
/// snapshot, so a snapshot round-trips through serde unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub language: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub archived: bool,
    pub pushed_at: Option<DateTime<Utc>>,
}

/// Summary user object embedded in an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueUser {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Full user profile from the `/users/{login}` detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}

/// Issue from the comments tracker repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub body: Option<String>,
    pub user: IssueUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_deserializes_from_api_payload() {
        // Trimmed real-world payload: extra fields ignored, missing
        // optional fields defaulted.
        let json = r#"{
            "id": 123,
            "name": "Kerlib",
            "full_name": "KerYagciHTL/Kerlib",
            "description": null,
            "stargazers_count": 4,
            "forks_count": 1,
            "language": "C#",
            "html_url": "https://github.com/KerYagciHTL/Kerlib",
            "archived": false,
            "pushed_at": "2025-06-01T12:00:00Z",
            "visibility": "public"
        }"#;

        let repo: Repo = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "Kerlib");
        assert_eq!(repo.description, None);
        assert_eq!(repo.stargazers_count, 4);
        assert_eq!(repo.language.as_deref(), Some("C#"));
        assert!(repo.topics.is_empty());
        assert!(!repo.archived);
        assert!(repo.pushed_at.is_some());
    }

    #[test]
    fn test_issue_deserializes_with_null_body() {
        let json = r#"{
            "id": 99,
            "number": 7,
            "html_url": "https://github.com/KerYagciHTL/kxrim-dev/issues/7",
            "created_at": "2025-05-20T08:30:00Z",
            "body": null,
            "user": {
                "login": "visitor",
                "avatar_url": "https://github.com/visitor.png",
                "html_url": "https://github.com/visitor"
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.number, 7);
        assert!(issue.body.is_none());
        assert_eq!(issue.user.login, "visitor");
        assert!(issue.user.name.is_none());
    }
}
