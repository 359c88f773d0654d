// GitHub API module.
// Unauthenticated client and wire types for the GitHub REST API.

pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::*;
