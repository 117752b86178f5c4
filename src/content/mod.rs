//! Page content retrieval and extraction
//!
//! This module turns a page URL into indexable text:
//! - HTTP GET with browser-like headers, following redirects, bounded timeout
//! - Title taken verbatim from `<title>`
//! - Body text from a recognized main-content container, falling back to the
//!   full visible body text

mod extractor;
mod fetcher;

pub use extractor::{extract_content, ExtractedContent};
pub use fetcher::ContentFetcher;
