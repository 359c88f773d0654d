// Static repository snapshot.
// A JSON array of repositories written by the fetch-repos binary and
// read when the live API is unavailable. Loading never fails: a missing
// or corrupt snapshot degrades to an empty list.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::github::types::Repo;

/// Load the snapshot at `path`, returning an empty list if the file is
/// absent, unreadable, or not valid JSON.
pub fn load(path: &Path) -> Vec<Repo> {
    if !path.exists() {
        return Vec::new();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("unreadable snapshot {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(repos) => repos,
        Err(e) => {
            warn!("malformed snapshot {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Write the snapshot as pretty-printed JSON.
pub fn save(path: &Path, repos: &[Repo]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(repos)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo(name: &str) -> Repo {
        Repo {
            name: name.to_string(),
            description: Some("a repo".to_string()),
            stargazers_count: 1,
            forks_count: 0,
            language: Some("Rust".to_string()),
            html_url: format!("https://github.com/KerYagciHTL/{name}"),
            topics: vec!["portfolio".to_string()],
            archived: false,
            pushed_at: None,
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("repos-fallback.json");

        let repos = vec![repo("Kerlib"), repo("K-Chat")];
        save(&path, &repos).unwrap();

        let loaded = load(&path);
        assert_eq!(loaded, repos);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        assert!(load(&path).is_empty());
    }

    #[test]
    fn test_load_malformed_json_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("repos-fallback.json");
        fs::write(&path, "{not json").unwrap();

        assert!(load(&path).is_empty());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("public").join("repos-fallback.json");

        save(&path, &[repo("Kerlib")]).unwrap();
        assert_eq!(load(&path).len(), 1);
    }
}
