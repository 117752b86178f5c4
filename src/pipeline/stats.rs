use std::fmt;

/// Per-run tally of entry outcomes
///
/// Every crawled entry starts as discovered and ends in exactly one of:
/// dropped by the incremental window, skipped by the guard, indexed, or
/// failed (fetch or index error).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Sitemap sources crawled successfully
    pub sources_crawled: u64,

    /// Sitemap sources that failed to crawl
    pub sources_failed: u64,

    /// Entries discovered across all sources
    pub discovered: u64,

    /// Entries dropped in incremental mode (no lastmod, or outside window)
    pub out_of_window: u64,

    /// Entries skipped because the index already holds the same lastmod
    pub skipped: u64,

    /// Entries fetched and upserted
    pub indexed: u64,

    /// Entries that failed to fetch or index
    pub failed: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Sources: {} crawled, {} failed",
            self.sources_crawled, self.sources_failed
        )?;
        writeln!(f, "Entries discovered: {}", self.discovered)?;
        writeln!(f, "  out of window:    {}", self.out_of_window)?;
        writeln!(f, "  skipped:          {}", self.skipped)?;
        writeln!(f, "  indexed:          {}", self.indexed)?;
        write!(f, "  failed:           {}", self.failed)
    }
}
