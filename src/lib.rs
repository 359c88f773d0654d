// GitHub data layer for the portfolio site.
// Fetches the owner's repositories and issue-backed visitor comments,
// with a TTL request cache and a static snapshot fallback.

pub mod cache;
pub mod cancel;
pub mod comments;
pub mod error;
pub mod fallback;
pub mod github;
pub mod profile;
pub mod repos;

// Re-export commonly used items
pub use cache::RequestCache;
pub use cancel::CancelToken;
pub use error::{FolioError, Result};
pub use github::GitHubClient;
