// src/fetch/document.rs
// =============================================================================
// This module downloads the markdown source of one page.
//
// How a page becomes a file:
// 1. Derive the local name from the page URL's path
// 2. If <destination>/<name>.md already exists, return it without touching
//    the network (this is what makes re-runs cheap)
// 3. Otherwise GET the page's download endpoint and write the body
//
// The download endpoint is the page URL with "/download" appended to its
// path; scheme, host and query are kept as-is. That endpoint serves the raw
// markdown source of the rendered page.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::name::local_name;

// Path suffix under which a page serves its raw markdown source
const DOWNLOAD_SUFFIX: &str = "/download";

// Extension given to archived pages on disk
const PAGE_EXTENSION: &str = ".md";

// Fetches one page's markdown source into the destination directory
//
// Parameters:
//   client: shared HTTP client (connection pooling, timeout)
//   url: the page URL as discovered (not the download endpoint)
//   destination: directory the archive is written into
//
// Returns: the path of the archived file, whether it was just written or
// already present.
//
// Errors: URL path with no usable name segment, transport failures,
// non-success HTTP status, filesystem write failures.
pub async fn fetch_document(client: &Client, url: &Url, destination: &Path) -> Result<PathBuf> {
    let name = local_name(url.path())
        .ok_or_else(|| anyhow!("No usable file name in URL path: {}", url))?;

    let target = destination.join(format!("{}{}", name, PAGE_EXTENSION));
    if target.exists() {
        debug!(file = %target.display(), "Destination file already exists, skipping download");
        return Ok(target);
    }

    // The download endpoint replaces the path only; query survives
    let mut download_url = url.clone();
    download_url.set_path(&format!("{}{}", url.path(), DOWNLOAD_SUFFIX));

    debug!(%download_url, "Downloading page");
    let response = client
        .get(download_url.as_str())
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", download_url))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to fetch {}: HTTP {}",
            download_url,
            response.status()
        ));
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read body of {}", download_url))?;

    tokio::fs::write(&target, body)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Port 1 is never listening; any accidental network call fails the test
    fn dead_client() -> Client {
        Client::new()
    }

    #[tokio::test]
    async fn test_existing_file_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("page1.md");
        std::fs::write(&existing, "cached").unwrap();

        let url = Url::parse("http://127.0.0.1:1/page1").unwrap();
        let path = fetch_document(&dead_client(), &url, dir.path())
            .await
            .unwrap();

        assert_eq!(path, existing);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "cached");
    }

    #[tokio::test]
    async fn test_root_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let result = fetch_document(&dead_client(), &url, dir.path()).await;
        assert!(result.is_err());
    }
}
