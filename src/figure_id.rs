//! Figure identifier extraction from record file names.

use once_cell::sync::Lazy;
use regex::Regex;

static FIGURE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*-Figure-[0-9]+).*\.json").unwrap());

/// Extract the stable figure identifier from a record file name.
///
/// Matches names containing `-Figure-` followed by digits and returns
/// everything up to and including the digit run, dropping any trailing
/// variant marker or extension: `paper123-Figure-7-thumbnail.json` yields
/// `paper123-Figure-7`. Names without the pattern yield `None` and are
/// excluded from reporting.
pub fn figure_id(name: &str) -> Option<&str> {
    FIGURE_ID_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
