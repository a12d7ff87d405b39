// src/extract/html.rs
// =============================================================================
// This module extracts in-scope links and images from a rendered page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Scoping rules, applied to every anchor href and image src:
// - a value starting with '/' is root-relative: it replaces the origin
//   URL's path and keeps its scheme, host and query
// - anything else must parse as an absolute URL, or the crawl aborts
//   (a *missing* attribute is the only benign shape of "no URL here")
// - URLs on a different host are skipped, as is the bare site root
// - fragments are stripped, so /page and /page#section are the same page
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use super::markdown::render_markdown;

// Everything the crawler needs to know about one parsed page
//
// Both sequences keep document order and may contain duplicates; every
// entry is already scoped to the origin's host.
#[derive(Debug)]
pub struct ParsedInfo {
    /// Same-host page URLs, in document order
    pub links: Vec<Url>,
    /// Same-host (image URL, alt text) pairs, in document order
    pub images: Vec<(Url, String)>,
}

// Parses an archived markdown file into its in-scope references
//
// Parameters:
//   mdfile: path of the markdown file on disk
//   origin: the URL the file was fetched from (defines the host scope)
pub async fn parse_document(mdfile: &Path, origin: &Url) -> Result<ParsedInfo> {
    debug!(file = %mdfile.display(), %origin, "Parsing page");
    let markdown = tokio::fs::read_to_string(mdfile)
        .await
        .with_context(|| format!("Failed to read {}", mdfile.display()))?;
    let html = render_markdown(&markdown);
    extract_references(&html, origin)
}

// Extracts in-scope anchors and images from rendered HTML
//
// Parameters:
//   html: the rendered page (borrowed as &str)
//   origin: the page's own URL; everything is scoped to its host
pub fn extract_references(html: &str, origin: &Url) -> Result<ParsedInfo> {
    let document = Html::parse_document(html);
    let host = origin.host_str();

    // Selector::parse returns Result, so we use .unwrap() which panics on error
    // This is OK here because our selectors are constants and known to be valid
    let anchors = Selector::parse("a").unwrap();
    let imgs = Selector::parse("img").unwrap();

    let mut links = Vec::new();
    for element in document.select(&anchors) {
        let href = match element.value().attr("href") {
            Some(href) => href,
            None => {
                debug!("Skipping link without href");
                continue;
            }
        };
        let url = resolve_reference(origin, href)
            .with_context(|| format!("Failed to parse link: {}", href))?;
        if url.host_str() != host {
            debug!(%url, "Skipping non-local link");
            continue;
        }
        if is_root(&url) {
            debug!(%url, "Skipping root link");
            continue;
        }
        debug!(%url, "Adding link");
        links.push(url);
    }

    let mut images = Vec::new();
    for element in document.select(&imgs) {
        let src = match element.value().attr("src") {
            Some(src) => src,
            None => {
                debug!("Skipping image without src");
                continue;
            }
        };
        // A missing alt is fine; it just becomes the empty string
        let alt = element.value().attr("alt").unwrap_or("").to_string();
        let url = resolve_reference(origin, src)
            .with_context(|| format!("Failed to parse image: {}", src))?;
        if url.host_str() != host {
            debug!(%url, "Skipping non-local image");
            continue;
        }
        if is_root(&url) {
            debug!(%url, "Skipping root image");
            continue;
        }
        debug!(%url, "Adding image");
        images.push((url, alt));
    }

    Ok(ParsedInfo { links, images })
}

// Resolves an href/src value against the page it appeared on
//
// Root-relative values replace the origin's path (keeping scheme, host and
// query); everything else has to stand on its own as an absolute URL.
// The fragment is dropped either way.
fn resolve_reference(origin: &Url, value: &str) -> Result<Url> {
    let mut url = if value.starts_with('/') {
        // The fragment is part of the raw string here, so cut it off
        // before it ends up percent-encoded into the path
        let path = value.split_once('#').map_or(value, |(path, _)| path);
        let mut url = origin.clone();
        url.set_path(path);
        url
    } else {
        Url::parse(value)?
    };
    url.set_fragment(None);
    Ok(url)
}

// The bare site root maps to no file name, so it is never crawled
fn is_root(url: &Url) -> bool {
    url.path().is_empty() || url.path() == "/"
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is scraper and how does it work?
//    - scraper parses HTML into a tree structure (DOM)
//    - You can then query it using CSS selectors (like querySelector)
//    - "a" means "all <a> tags"; we check href ourselves because a missing
//      href must be logged, not silently dropped by the selector
//
// 2. Why does the ? operator appear on link parsing but not host checks?
//    - An unparseable href is a fatal error: the archive would silently
//      miss pages if we guessed what the author meant
//    - A foreign host or a bare root is a normal, expected shape of input
//      and only worth a debug line
//
// 3. What does set_path do?
//    - Replaces just the path component of a URL
//    - Scheme, host, port and query all stay as they were
//    - That is exactly the resolution rule for root-relative references
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://docs.example/page1").unwrap()
    }

    #[test]
    fn test_retains_same_host_absolute_link() {
        let html = r#"<a href="https://docs.example/x">x</a>"#;
        let info = extract_references(html, &origin()).unwrap();
        assert_eq!(info.links, vec![Url::parse("https://docs.example/x").unwrap()]);
    }

    #[test]
    fn test_drops_other_host_link() {
        let html = r#"<a href="https://other.example/x">x</a>"#;
        let info = extract_references(html, &origin()).unwrap();
        assert!(info.links.is_empty());
    }

    #[test]
    fn test_resolves_root_relative_link() {
        let html = r#"<a href="/x">x</a>"#;
        let info = extract_references(html, &origin()).unwrap();
        assert_eq!(info.links, vec![Url::parse("https://docs.example/x").unwrap()]);
    }

    #[test]
    fn test_root_relative_link_keeps_origin_query() {
        let with_query = Url::parse("https://docs.example/page1?lang=en").unwrap();
        let html = r#"<a href="/x">x</a>"#;
        let info = extract_references(html, &with_query).unwrap();
        assert_eq!(
            info.links,
            vec![Url::parse("https://docs.example/x?lang=en").unwrap()]
        );
    }

    #[test]
    fn test_drops_root_link_even_if_same_host() {
        let html = r#"<a href="https://docs.example/">home</a> <a href="/">home</a>"#;
        let info = extract_references(html, &origin()).unwrap();
        assert!(info.links.is_empty());
    }

    #[test]
    fn test_missing_href_is_skipped_not_fatal() {
        let html = r#"<a>nowhere</a> <a href="/x">x</a>"#;
        let info = extract_references(html, &origin()).unwrap();
        assert_eq!(info.links.len(), 1);
    }

    #[test]
    fn test_malformed_href_aborts() {
        let html = r#"<a href="not a valid url without scheme or host">broken</a>"#;
        let result = extract_references(html, &origin());
        assert!(result.is_err());
    }

    #[test]
    fn test_keeps_duplicates_in_document_order() {
        let html = r#"<a href="/b">b</a> <a href="/a">a</a> <a href="/b">b</a>"#;
        let info = extract_references(html, &origin()).unwrap();
        let paths: Vec<&str> = info.links.iter().map(|u| u.path()).collect();
        assert_eq!(paths, vec!["/b", "/a", "/b"]);
    }

    #[test]
    fn test_fragments_are_stripped() {
        let html = r#"<a href="https://docs.example/x#top">x</a> <a href="/y#sec">y</a>"#;
        let info = extract_references(html, &origin()).unwrap();
        let urls: Vec<String> = info.links.iter().map(|u| u.to_string()).collect();
        assert_eq!(urls, vec!["https://docs.example/x", "https://docs.example/y"]);
    }

    #[test]
    fn test_image_scoping_mirrors_links() {
        let html = concat!(
            r#"<img src="https://docs.example/img/pic.png" alt="diagram">"#,
            r#"<img src="https://other.example/img/far.png" alt="far">"#,
            r#"<img src="/img/near.png">"#,
        );
        let info = extract_references(html, &origin()).unwrap();
        assert_eq!(info.images.len(), 2);
        assert_eq!(
            info.images[0],
            (
                Url::parse("https://docs.example/img/pic.png").unwrap(),
                "diagram".to_string()
            )
        );
        // Missing alt defaults to the empty string
        assert_eq!(
            info.images[1],
            (
                Url::parse("https://docs.example/img/near.png").unwrap(),
                String::new()
            )
        );
    }

    #[tokio::test]
    async fn test_parse_document_reads_markdown_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page1.md");
        std::fs::write(
            &file,
            "[next](/page2)\n\n![diagram](https://docs.example/img/pic.png)\n",
        )
        .unwrap();

        let info = parse_document(&file, &origin()).await.unwrap();
        assert_eq!(info.links, vec![Url::parse("https://docs.example/page2").unwrap()]);
        assert_eq!(
            info.images,
            vec![(
                Url::parse("https://docs.example/img/pic.png").unwrap(),
                "diagram".to_string()
            )]
        );
    }
}
