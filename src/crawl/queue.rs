// src/crawl/queue.rs
// =============================================================================
// This module drives the whole archive run.
//
// How it works:
// 1. Start with the initial URL in a queue
// 2. Fetch the page's markdown source (skipped if already on disk)
// 3. Parse it and download every referenced same-host image
// 4. Add same-host links to the queue (if not already visited)
// 5. Repeat until the queue is empty
//
// Termination is guaranteed by the visited set: every distinct URL is
// processed at most once per run, so even pages that link back to each
// other are archived exactly once. The on-disk files carry that guarantee
// across runs, since an archived page is never downloaded again.
//
// Failure policy: a page that cannot be fetched or parsed kills the crawl;
// an image that cannot be fetched only costs a warning.
// =============================================================================

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};
use url::Url;

use crate::extract::{self, ParsedInfo};
use crate::fetch;

// How many image downloads of one page run at the same time
//
// Why 8? Images of a single page are few; this keeps a page's worth of
// downloads in flight without hammering the server like a full-width pool
const IMAGE_CONCURRENCY: usize = 8;

// One archived artifact: where it came from and where it ended up
#[derive(Debug, Clone, Serialize)]
pub struct ArchivedFile {
    /// The URL the artifact was discovered under
    pub url: String,
    /// The local file it was written to
    pub file: String,
}

// Everything a finished crawl produced
#[derive(Debug, Default, Serialize)]
pub struct CrawlReport {
    /// Every page processed this run, in visit order
    pub pages: Vec<ArchivedFile>,
    /// Every image archived this run
    pub images: Vec<ArchivedFile>,
}

// Outcome of trying to claim a local file name for a URL
enum Claim {
    /// The name was free and now belongs to this URL
    New,
    /// This exact URL claimed the name earlier in the run
    Duplicate,
    /// A different URL owns the name; holds the owner
    Collision(Url),
}

// Archives a whole site starting from one URL
//
// Parameters:
//   start_url: the page the crawl begins at
//   destination: directory the archive is written into
//
// Returns: a report of every page and image archived this run.
//
// Errors: page fetch failures, unparseable references, filesystem failures.
// The error aborts the crawl; whatever was written stays on disk and a
// re-run picks up from there.
pub async fn crawl_site(start_url: &Url, destination: &Path) -> Result<CrawlReport> {
    // One client for the whole crawl (connection pooling)
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .context("Failed to create HTTP client")?;

    // Queue of pages to archive
    let mut queue: VecDeque<Url> = VecDeque::new();
    queue.push_back(start_url.clone());

    // Track visited URLs so cyclic sites cannot loop the crawl
    let mut visited: HashSet<Url> = HashSet::new();

    // Which URL claimed which local name; two different URLs mapping to the
    // same name would overwrite each other on disk, so the second is skipped
    let mut page_names: HashMap<String, Url> = HashMap::new();
    let mut image_names: HashMap<String, Url> = HashMap::new();

    let mut report = CrawlReport::default();

    while let Some(url) = queue.pop_front() {
        // insert() returns false if the URL was already in the set
        if !visited.insert(url.clone()) {
            debug!(%url, "Already visited, skipping");
            continue;
        }

        if let Claim::Collision(owner) = claim_name(&mut page_names, &url) {
            warn!(%url, owner = %owner, "Local name collision, skipping page");
            continue;
        }

        info!("Backing up {}", url);

        // The span ties every log line of this branch to its page URL
        let (mdfile, parsed) = visit_page(&client, &url, destination)
            .instrument(info_span!("visit", url = %url))
            .await?;

        report.pages.push(ArchivedFile {
            url: url.to_string(),
            file: mdfile.display().to_string(),
        });

        fetch_page_images(
            &client,
            parsed.images,
            destination,
            &mut image_names,
            &mut report,
        )
        .await;

        for link in parsed.links {
            if !visited.contains(&link) {
                queue.push_back(link);
            }
        }
    }

    Ok(report)
}

// Fetches one page and parses its references
//
// The fetch short-circuits when the file is already on disk, so re-visiting
// an archived page costs a parse but no network traffic.
async fn visit_page(
    client: &Client,
    url: &Url,
    destination: &Path,
) -> Result<(PathBuf, ParsedInfo)> {
    let mdfile = fetch::fetch_document(client, url, destination).await?;
    let parsed = extract::parse_document(&mdfile, url).await?;
    Ok((mdfile, parsed))
}

// Downloads one page's images through a bounded concurrent pool
//
// Image failures are warnings, not crawl killers: a missing diagram should
// not cost the rest of the site.
async fn fetch_page_images(
    client: &Client,
    images: Vec<(Url, String)>,
    destination: &Path,
    image_names: &mut HashMap<String, Url>,
    report: &mut CrawlReport,
) {
    // Claims are checked up front; the map cannot be shared by the
    // concurrent downloads below
    let mut to_fetch = Vec::new();
    for (url, alt) in images {
        match claim_name(image_names, &url) {
            Claim::Collision(owner) => {
                warn!(image = %url, owner = %owner, "Local name collision, skipping image");
            }
            Claim::Duplicate => {
                debug!(image = %url, "Image already handled this run");
            }
            Claim::New => to_fetch.push((url, alt)),
        }
    }

    // Run up to IMAGE_CONCURRENCY downloads at once and collect the
    // results as they finish (not in original order, hence "unordered")
    let fetches = to_fetch.into_iter().map(|(url, alt)| {
        let client = client.clone(); // Clone the client for each task
        async move {
            let result = fetch::fetch_image(&client, &url, &alt, destination).await;
            (url, result)
        }
    });
    let results: Vec<(Url, Result<PathBuf>)> = stream::iter(fetches)
        .buffer_unordered(IMAGE_CONCURRENCY)
        .collect()
        .await;

    for (url, result) in results {
        match result {
            Ok(file) => report.images.push(ArchivedFile {
                url: url.to_string(),
                file: file.display().to_string(),
            }),
            Err(e) => warn!(image = %url, "Failed to download image: {:#}", e),
        }
    }
}

// Claims the local name derived from `url` in the given registry
//
// A URL whose path yields no name is treated as New and left for the
// fetcher, which reports it with a proper error.
fn claim_name(names: &mut HashMap<String, Url>, url: &Url) -> Claim {
    let name = match fetch::local_name(url.path()) {
        Some(name) => name,
        None => return Claim::New,
    };
    match names.get(name) {
        Some(owner) if owner == url => Claim::Duplicate,
        Some(owner) => Claim::Collision(owner.clone()),
        None => {
            names.insert(name.to_string(), url.clone());
            Claim::New
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is VecDeque?
//    - A double-ended queue
//    - push_back() adds to the end, pop_front() removes from the start
//    - That makes the traversal first-in-first-out: pages are archived in
//      the order they were discovered
//
// 2. What is HashSet and why key it by URL?
//    - A set of unique items with O(1) lookup
//    - Keying it by the full URL (not the derived file name) means two
//      different pages that happen to share a file name are still both
//      seen; the name clash is then reported instead of hidden
//
// 3. What is buffer_unordered?
//    - StreamExt::buffer_unordered(N) runs up to N futures concurrently
//    - Results come back as they complete, not in submission order
//    - It's like Promise.all() but with a concurrency limit
//
// 4. Why clone the client?
//    - Each async task needs its own handle to the client
//    - Client is cheap to clone (it's a reference counter internally)
//    - This is a common pattern in async Rust
//
// 5. Why does ? appear on page work but not image work?
//    - A page that cannot be fetched or parsed means the archive is
//      incomplete in a way we cannot recover from mid-run
//    - A single image is an acceptable loss, so its error is logged and
//      the crawl moves on
// -----------------------------------------------------------------------------
