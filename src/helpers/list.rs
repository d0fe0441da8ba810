//! Ordering and filtering of records for the listing pages

use crate::config::SiteConfig;
use crate::content::PostRecord;
use crate::helpers::same_route;

/// Most recent first.
///
/// Stable ascending sort on the date followed by a reversal, so records that
/// share a date come out in reverse source order. Undated records compare
/// lower than every dated one and therefore end up last.
pub fn sort_by_date_desc(records: &[PostRecord]) -> Vec<&PostRecord> {
    let mut sorted: Vec<&PostRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.frontmatter.date);
    sorted.reverse();
    sorted
}

/// Whether a record belongs in a listing at all
pub fn is_listable(record: &PostRecord, not_found_path: &str) -> bool {
    record.is_post() && !same_route(&record.path, not_found_path)
}

/// Records shown on the home page
pub fn home_posts<'a>(records: &'a [PostRecord], config: &SiteConfig) -> Vec<&'a PostRecord> {
    sort_by_date_desc(records)
        .into_iter()
        .filter(|record| !record.has_category(&config.archive_category))
        .filter(|record| is_listable(record, &config.not_found_path))
        .collect()
}

/// Records shown on the blog index; archived posts stay listed here
pub fn blog_posts<'a>(records: &'a [PostRecord], config: &SiteConfig) -> Vec<&'a PostRecord> {
    sort_by_date_desc(records)
        .into_iter()
        .filter(|record| is_listable(record, &config.not_found_path))
        .collect()
}
