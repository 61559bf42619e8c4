//! Version comparison
//!
//! Remote sites report whatever their plugin header says, so versions are not
//! always valid semver (`1.0`, `2.1.3.4`, `1.0rc1`). Valid semver (after
//! padding a missing minor/patch) is compared with the `semver` crate; anything
//! else falls back to PHP `version_compare` ordering.

use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Parse a version, padding `1` / `1.2` to `1.0.0` / `1.2.0`
fn parse_semver(version: &str) -> Option<Version> {
    static SHORT: OnceLock<Regex> = OnceLock::new();
    let short = SHORT.get_or_init(|| Regex::new(r"^\d+(\.\d+)?$").expect("valid regex"));

    let version = version.trim().trim_start_matches('v');
    if let Ok(parsed) = Version::parse(version) {
        return Some(parsed);
    }
    if short.is_match(version) {
        let padded = if version.contains('.') {
            format!("{}.0", version)
        } else {
            format!("{}.0.0", version)
        };
        return Version::parse(&padded).ok();
    }
    None
}

/// Rank of special version words; numbers rank as `#`
fn special_rank(part: &str) -> i32 {
    match part.to_lowercase().as_str() {
        "dev" => 0,
        "alpha" | "a" => 1,
        "beta" | "b" => 2,
        "rc" => 3,
        "#" => 4,
        "pl" | "p" => 5,
        _ => -1,
    }
}

/// Split into parts at separators and digit/letter transitions
fn canonical_parts(version: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut prev_digit: Option<bool> = None;

    for c in version.trim().chars() {
        if matches!(c, '.' | '-' | '_' | '+') {
            if !current.is_empty() {
                parts.push(std::mem::take(&mut current));
            }
            prev_digit = None;
            continue;
        }
        let is_digit = c.is_ascii_digit();
        if prev_digit.is_some_and(|d| d != is_digit) && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev_digit = Some(is_digit);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn is_numeric(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
}

fn compare_parts(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => {
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
        (true, false) => special_rank("#").cmp(&special_rank(b)),
        (false, true) => special_rank(a).cmp(&special_rank("#")),
        (false, false) => special_rank(a).cmp(&special_rank(b)),
    }
}

/// PHP `version_compare` ordering
fn compare_loose(a: &str, b: &str) -> Ordering {
    let a_parts = canonical_parts(a);
    let b_parts = canonical_parts(b);

    for i in 0..a_parts.len().max(b_parts.len()) {
        let ordering = match (a_parts.get(i), b_parts.get(i)) {
            (Some(x), Some(y)) => compare_parts(x, y),
            // A trailing number makes the longer version newer, a trailing
            // word like `rc` makes it older
            (Some(x), None) => {
                if is_numeric(x) {
                    Ordering::Greater
                } else {
                    compare_parts(x, "#")
                }
            }
            (None, Some(y)) => {
                if is_numeric(y) {
                    Ordering::Less
                } else {
                    compare_parts("#", y)
                }
            }
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Compare two version strings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_semver(a), parse_semver(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => compare_loose(a, b),
    }
}

/// Whether the installed `current` version is older than `latest`
pub fn is_update_available(current: &str, latest: &str) -> bool {
    compare_versions(current, latest) == Ordering::Less
}
