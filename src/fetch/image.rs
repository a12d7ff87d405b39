// src/fetch/image.rs
// =============================================================================
// This module downloads one referenced image.
//
// Images live under <destination>/uploads/, named by the last segment of
// their URL path with no extension added (the segment usually carries one
// already, e.g. "pic.png"). The uploads folder is created lazily on the
// first image and left alone afterwards.
//
// Like pages, images are idempotent: a file that is already on disk is
// returned without any network call.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::name::local_name;

// Subdirectory of the destination that holds mirrored images
const UPLOADS_DIR: &str = "uploads";

// Fetches one image into <destination>/uploads/
//
// Parameters:
//   client: shared HTTP client
//   url: the image URL exactly as discovered (fetched verbatim)
//   alt: the image's alt text, used only for diagnostics
//   destination: the archive root directory
//
// Returns: the path of the image file, whether just written or already
// present.
pub async fn fetch_image(
    client: &Client,
    url: &Url,
    alt: &str,
    destination: &Path,
) -> Result<PathBuf> {
    let name = local_name(url.path())
        .ok_or_else(|| anyhow!("No usable file name in image URL path: {}", url))?;

    // create_dir_all is a no-op when the folder is already there
    let uploads = destination.join(UPLOADS_DIR);
    tokio::fs::create_dir_all(&uploads)
        .await
        .with_context(|| format!("Failed to create {}", uploads.display()))?;

    let target = uploads.join(name);
    debug!(image = %url, alt, file = %target.display(), "Downloading image");
    if target.exists() {
        debug!(image = %url, "Destination image already exists, skipping download");
        return Ok(target);
    }

    let response = client
        .get(url.as_str())
        .send()
        .await
        .with_context(|| format!("Failed to fetch image {}", url))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to fetch image {}: HTTP {}",
            url,
            response.status()
        ));
    }

    let body = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read body of image {}", url))?;

    tokio::fs::write(&target, &body)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_existing_image_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        std::fs::create_dir_all(&uploads).unwrap();
        std::fs::write(uploads.join("pic.png"), b"cached").unwrap();

        // Nothing listens on port 1, so a network call would error out
        let url = Url::parse("http://127.0.0.1:1/img/pic.png").unwrap();
        let path = fetch_image(&Client::new(), &url, "diagram", dir.path())
            .await
            .unwrap();

        assert_eq!(path, uploads.join("pic.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"cached");
    }

    #[tokio::test]
    async fn test_uploads_dir_created_lazily() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!dir.path().join("uploads").exists());

        // The fetch itself fails (dead port), but the folder appears first
        let url = Url::parse("http://127.0.0.1:1/img/pic.png").unwrap();
        let _ = fetch_image(&Client::new(), &url, "", dir.path()).await;

        assert!(dir.path().join("uploads").exists());
    }
}
