//! Reviews section: star markup and rating aggregation
//!
//! A review block marks each review's rating with a line of asterisks:
//!
//! ```text
//! *****
//! Works great.
//!
//! ***
//! Does the job.
//! ```

use super::markdown::render_lines;
use std::collections::BTreeMap;

const STAR: &str = "<span class=\"star dashicons dashicons-star-filled\"></span>\n";

/// Render a star line as icon markup; every `*` becomes one star
fn star_markup(line: &str) -> String {
    let mut markup = String::from("<div class=\"star-rating\">\n<div class=\"wporg-ratings\">\n");
    markup.push_str(&line.replace('*', STAR));
    markup.push_str("</div>\n</div>\n");
    markup
}

/// Render the reviews section: star lines become icon markup, then the whole
/// block goes through markdown
pub fn render_reviews<S: AsRef<str>>(lines: &[S]) -> String {
    let rewritten: Vec<String> = lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            if line.starts_with('*') {
                star_markup(line)
            } else {
                line.to_string()
            }
        })
        .collect();
    render_lines(&rewritten)
}

/// Count reviews by star count
///
/// Buckets 1 to 5 always exist. A line made only of asterisks is one review
/// counted under its length; runs longer than five are recorded as-is.
pub fn collect_ratings<S: AsRef<str>>(lines: &[S]) -> BTreeMap<usize, u32> {
    let mut ratings: BTreeMap<usize, u32> = (1..=5).map(|stars| (stars, 0)).collect();

    for line in lines {
        let line = line.as_ref().trim();
        if !line.is_empty() && line.chars().all(|c| c == '*') {
            *ratings.entry(line.len()).or_insert(0) += 1;
        }
    }

    ratings
}

/// Total number of reviews across every bucket
pub fn count_ratings(ratings: &BTreeMap<usize, u32>) -> u32 {
    ratings.values().sum()
}

/// Score out of 100: `floor(sum(stars * count) / total * 20)` over the 1-5 buckets
///
/// Zero reviews score 0.
pub fn rating_score(ratings: &BTreeMap<usize, u32>, total: u32) -> u32 {
    if ratings.is_empty() || total == 0 {
        return 0;
    }

    let sum: u64 = (1..=5usize)
        .map(|stars| u64::from(ratings.get(&stars).copied().unwrap_or(0)) * stars as u64)
        .sum();

    (sum as f64 / f64::from(total) * 20.0).floor() as u32
}
