// src/crawl/mod.rs
// =============================================================================
// This module handles the site traversal.
//
// Features:
// - Worklist traversal starting from one URL
// - Respects same-host restriction (never leaves the site)
// - An explicit visited set guarantees termination on cyclic link graphs
// - Bounded concurrent image downloads per page
// =============================================================================

mod queue;

// Re-export the crawl entry point and report types
pub use queue::{crawl_site, ArchivedFile, CrawlReport};
