//! Stable document identity derived from page URLs
//!
//! Index writes are keyed by a content-addressed ID so that re-indexing the
//! same URL overwrites one document instead of appending a new one.

use md5::{Digest, Md5};

/// Derives the document ID for a page URL
///
/// A 128-bit digest of the literal URL string, rendered as lower-hex. The
/// URL is not normalized: trailing slashes and query strings are significant,
/// and callers must supply the same literal URL used previously to hit the
/// same document.
///
/// # Example
///
/// ```
/// use docsite_indexer::identity::document_id;
///
/// let id = document_id("https://docs.example.com/intro");
/// assert_eq!(id, document_id("https://docs.example.com/intro"));
/// assert_eq!(id.len(), 32);
/// ```
pub fn document_id(url: &str) -> String {
    hex::encode(Md5::digest(url.as_bytes()))
}
