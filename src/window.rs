//! Change-window predicate for incremental runs
//!
//! Decides whether a sitemap-reported modification date falls within the
//! last N days, inclusive of both today and the day exactly N days ago.

use chrono::{Local, NaiveDate};

/// Date format used by sitemap `<lastmod>` values
const LASTMOD_FORMAT: &str = "%Y-%m-%d";

/// Checks whether `date_str` falls within the last `n_days` days of `today`
///
/// The window is inclusive: with `n_days = 3` and today 2024-01-10, dates
/// from 2024-01-07 through 2024-01-10 are inside. Future dates are outside.
/// A date that does not parse as `yyyy-MM-dd` is outside the window; the
/// guard's "prefer completeness" bias lives in the caller, which only uses
/// this predicate to narrow candidates, so an unexpected date format makes
/// the entry drop out of incremental runs rather than be silently reindexed
/// forever.
///
/// # Arguments
///
/// * `date_str` - Candidate date in `yyyy-MM-dd` form
/// * `n_days` - Window size in days
/// * `today` - Reference date (injectable for tests)
pub fn is_within_window(date_str: &str, n_days: i64, today: NaiveDate) -> bool {
    let date = match NaiveDate::parse_from_str(date_str, LASTMOD_FORMAT) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!("Unparseable lastmod date '{}': {}", date_str, e);
            return false;
        }
    };

    let days_between = (today - date).num_days();
    (0..=n_days).contains(&days_between)
}

/// Convenience wrapper using the local calendar date as "today"
pub fn is_within_last_n_days(date_str: &str, n_days: i64) -> bool {
    is_within_window(date_str, n_days, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let today = day("2024-01-10");
        assert!(is_within_window("2024-01-07", 3, today));
        assert!(!is_within_window("2024-01-06", 3, today));
    }

    #[test]
    fn test_today_is_inside() {
        let today = day("2024-01-10");
        assert!(is_within_window("2024-01-10", 3, today));
    }

    #[test]
    fn test_future_date_is_outside() {
        let today = day("2024-01-10");
        assert!(!is_within_window("2024-01-11", 3, today));
    }

    #[test]
    fn test_zero_window_matches_only_today() {
        let today = day("2024-01-10");
        assert!(is_within_window("2024-01-10", 0, today));
        assert!(!is_within_window("2024-01-09", 0, today));
    }

    #[test]
    fn test_unparseable_date_is_outside() {
        let today = day("2024-01-10");
        assert!(!is_within_window("01/07/2024", 3, today));
        assert!(!is_within_window("", 3, today));
        assert!(!is_within_window("2024-01-07T12:00:00Z", 3, today));
    }

    #[test]
    fn test_window_spans_month_boundary() {
        let today = day("2024-02-01");
        assert!(is_within_window("2024-01-30", 3, today));
        assert!(!is_within_window("2024-01-28", 3, today));
    }
}
