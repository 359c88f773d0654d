// Offline snapshot pre-fetch.
// Fetches the owner's repositories and writes the static fallback file
// the site serves when the live API is unavailable or rate limited.

use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};

use folio::cancel::CancelToken;
use folio::github::GitHubClient;
use folio::{fallback, profile, repos};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = Path::new(profile::FALLBACK_PATH);

    let client = match GitHubClient::new() {
        Ok(client) => client,
        Err(e) => {
            error!("failed to build client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("fetching repositories for {}", profile::GITHUB_USERNAME);
    let cancel = CancelToken::new();
    match repos::try_fetch_repositories(&client, profile::GITHUB_USERNAME, &cancel).await {
        Ok(fetched) => {
            if let Err(e) = fallback::save(path, &fetched) {
                error!("failed to write snapshot {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            info!("saved {} repositories to {}", fetched.len(), path.display());
        }
        Err(e) => {
            info!("GitHub API request failed: {}", e);
            if path.exists() {
                info!("keeping existing snapshot at {}", path.display());
            } else {
                info!("no prior snapshot, writing empty array");
                if let Err(e) = fallback::save(path, &[]) {
                    error!("failed to write snapshot {}: {}", path.display(), e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}
