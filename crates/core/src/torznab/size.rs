//! Release size extraction.
//!
//! Stream titles embed the size as free text, usually behind a decorative
//! symbol (`💾 1.64 GB`). Units are binary multiples.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static SIZE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*([GMK]B)\b").unwrap());

/// Extract the size in bytes from a release title.
///
/// Uses the leftmost `<number>[.<number>] <GB|MB|KB>` token. Returns 0 when
/// there is none.
pub fn parse_size(title: &str) -> u64 {
    let Some(caps) = SIZE_TOKEN.captures(title) else {
        return 0;
    };

    let Ok(number) = caps[1].parse::<f64>() else {
        return 0;
    };

    let multiplier: f64 = match caps[2].to_ascii_uppercase().as_str() {
        "GB" => 1024.0 * 1024.0 * 1024.0,
        "MB" => 1024.0 * 1024.0,
        "KB" => 1024.0,
        _ => return 0,
    };

    // Float-to-int casts truncate and saturate
    (number * multiplier) as u64
}
