//! Console rendering of search results.

use crate::search::{SearchReport, WidthGroup};

/// How many primes a width line lists before eliding the rest.
pub const SAMPLE_LIMIT: usize = 10;

/// `"{count} truncatable primes with {width} digits: {sample}"`.
///
/// Groups of fewer than ten primes are listed in full; larger groups list
/// the first ten followed by `...`.
pub fn render_width(group: &WidthGroup) -> String {
    let shown: Vec<String> = group
        .primes
        .iter()
        .take(SAMPLE_LIMIT)
        .map(ToString::to_string)
        .collect();
    let mut sample = shown.join(", ");
    if group.len() >= SAMPLE_LIMIT {
        sample.push_str(", ...");
    }
    format!(
        "{} truncatable primes with {} digits: {sample}",
        group.len(),
        group.width
    )
}

/// One line per width.
pub fn render_report(report: &SearchReport) -> String {
    report
        .widths
        .iter()
        .map(render_width)
        .collect::<Vec<_>>()
        .join("\n")
}
