// src/fetch/mod.rs
// =============================================================================
// This module contains all content fetching logic.
//
// Submodules:
// - name: Derives a local file name from a URL path
// - document: Downloads the markdown source of a page (idempotent)
// - image: Downloads a referenced image into uploads/ (idempotent)
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod document;
mod image;
mod name;

// Re-export public items from submodules
// This lets callers write `fetch::fetch_document()` instead of
// `fetch::document::fetch_document()`
pub use document::fetch_document;
pub use image::fetch_image;
pub use name::local_name;
