//! Approximate name matching.
//!
//! The scorer is a weighted ratio: several string-similarity measures are
//! computed and the best one wins, with measures that tolerate more
//! (partial matches, reordered tokens) discounted against a plain ratio.
//! All measures return a score on a 0–100 scale.
//!
//! | measure | what it tolerates |
//! |---------|-------------------|
//! | [`ratio`] | nothing beyond edits (normalized Indel similarity) |
//! | [`partial_ratio`] | the shorter string matching a slice of the longer |
//! | [`token_sort_ratio`] | token order |
//! | [`token_set_ratio`] | token order and one side having extra tokens |
//!
//! [`extract_one`] runs the weighted ratio over a candidate list after
//! [`default_process`]-ing both sides, which makes it insensitive to case
//! and punctuation (`Street-Address_1` and `street address 1` are equal).

use rapidfuzz::distance::indel;
use std::collections::BTreeSet;

const UNBASE_SCALE: f64 = 0.95;

/// The best candidate found by [`extract_one`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    /// The winning candidate, as given (unprocessed).
    pub choice: &'a str,
    /// Its score, 0–100.
    pub score: f64,
    /// Its position in the candidate list.
    pub index: usize,
}

/// Lowercases `s`, replaces every non-alphanumeric character with a space
/// and trims the ends.
#[must_use]
pub fn default_process(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();
    replaced.trim().to_string()
}

/// Finds the single best match for `query` among `choices`.
///
/// Both sides are passed through [`default_process`] and scored with
/// [`wratio`]. Ties keep the earliest candidate. Returns `None` only when
/// `choices` is empty.
pub fn extract_one<'a, S: AsRef<str>>(query: &str, choices: &'a [S]) -> Option<Match<'a>> {
    let query = default_process(query);
    let mut best: Option<Match<'a>> = None;

    for (index, choice) in choices.iter().enumerate() {
        let choice = choice.as_ref();
        let score = wratio(&query, &default_process(choice));

        if best.map_or(true, |current| score > current.score) {
            best = Some(Match {
                choice,
                score,
                index,
            });
            if score >= 100.0 {
                break;
            }
        }
    }

    best
}

/// Weighted ratio of two strings.
///
/// Strings of similar length are compared whole and as token sets; when
/// one is at least 1.5 times longer than the other, partial matches are
/// considered too, scaled down further the larger the length gap.
#[must_use]
pub fn wratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let end_ratio = ratio(a, b);

    if len_ratio < 1.5 {
        let token_ratio = token_sort_ratio(a, b).max(token_set_ratio(a, b));
        return end_ratio.max(token_ratio * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let end_ratio = end_ratio.max(partial_ratio(a, b) * partial_scale);
    end_ratio.max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}

/// Normalized Indel similarity: `200 · LCS / (|a| + |b|)`.
///
/// Two empty strings are identical (100).
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against every equally long slice of
/// the longer one, including slices hanging over either end.
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    partial_ratio_chars(&a, &b)
}

/// [`ratio`] after sorting the whitespace-separated tokens of both strings.
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Token-set similarity.
///
/// Shared tokens are factored out; if one side's tokens are a subset of the
/// other's the score is 100. Otherwise the best of comparing
/// `shared + rest_a` with `shared + rest_b`, and `shared` alone with each.
#[must_use]
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let shared: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !shared.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let shared = shared.join(" ");
    let with_a = join_nonempty(&shared, &only_a.join(" "));
    let with_b = join_nonempty(&shared, &only_b.join(" "));

    let mut best = ratio(&with_a, &with_b);
    if !shared.is_empty() {
        best = best.max(ratio(&shared, &with_a)).max(ratio(&shared, &with_b));
    }
    best
}

fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let list_a: Vec<&str> = a.split_whitespace().collect();
    let list_b: Vec<&str> = b.split_whitespace().collect();
    let set_a: BTreeSet<&str> = list_a.iter().copied().collect();
    let set_b: BTreeSet<&str> = list_b.iter().copied().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    if set_a.intersection(&set_b).next().is_some() {
        return 100.0;
    }

    let result = partial_ratio(&sorted_tokens(a), &sorted_tokens(b));
    if set_a.len() == list_a.len() && set_b.len() == list_b.len() {
        return result;
    }

    let dedup_a = set_a.into_iter().collect::<Vec<_>>().join(" ");
    let dedup_b = set_b.into_iter().collect::<Vec<_>>().join(" ");
    result.max(partial_ratio(&dedup_a, &dedup_b))
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    100.0 * indel::normalized_similarity(a.iter().copied(), b.iter().copied())
}

fn partial_ratio_chars(a: &[char], b: &[char]) -> f64 {
    if a.len() == b.len() {
        // Equal lengths have no natural needle; try both.
        return best_window(a, b).max(best_window(b, a));
    }
    if a.len() < b.len() {
        best_window(a, b)
    } else {
        best_window(b, a)
    }
}

/// Best `ratio` of `short` against every window of `long`, including the
/// windows that overhang either end.
fn best_window(short: &[char], long: &[char]) -> f64 {
    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let width = short.len();
    let mut best: f64 = 0.0;

    for end in 1..width {
        best = best.max(ratio_chars(short, &long[..end]));
    }
    for start in 0..=long.len() - width {
        best = best.max(ratio_chars(short, &long[start..start + width]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    for start in long.len() - width + 1..long.len() {
        best = best.max(ratio_chars(short, &long[start..]));
    }

    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn process_lowercases_and_strips_punctuation() {
        assert_eq!(default_process("Street-Address_1 "), "street address 1");
        assert_eq!(default_process("__coid__"), "coid");
        assert_eq!(default_process("!!!"), "");
    }

    #[test]
    fn ratio_basics() {
        assert!(close(ratio("abc", "abc"), 100.0));
        assert!(close(ratio("", ""), 100.0));
        assert!(close(ratio("abc", ""), 0.0));
        assert!(close(ratio("abc", "abd"), 200.0 * 2.0 / 6.0));
        assert!(close(ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn ratio_counts_a_subsequence_not_a_substring() {
        assert!(close(ratio("axbycz", "abc"), 200.0 * 3.0 / 9.0));
    }

    #[test]
    fn partial_ratio_finds_embedded_string() {
        assert!(close(partial_ratio("york", "new york mets"), 100.0));
        assert!(close(partial_ratio("new york mets", "york"), 100.0));
        assert!(close(partial_ratio("", "abc"), 0.0));
    }

    #[test]
    fn partial_ratio_considers_overhanging_windows() {
        // "cde" overlaps the end of "abcd" by "cd" only.
        let score = partial_ratio("cde", "abcd");
        assert!(close(score, 200.0 * 2.0 / 5.0));
    }

    #[test]
    fn partial_ratio_is_symmetric_for_equal_lengths() {
        let forward = partial_ratio("abcd xy", "xyab cd");
        let backward = partial_ratio("xyab cd", "abcd xy");
        assert!(close(forward, backward));
        assert!(close(forward, 200.0 * 4.0 / 11.0));
    }

    #[test]
    fn token_sort_ignores_order() {
        assert!(close(token_sort_ratio("address street", "street address"), 100.0));
    }

    #[test]
    fn token_set_subset_is_perfect() {
        assert!(close(token_set_ratio("street address", "street address 1"), 100.0));
        assert!(close(token_set_ratio("", "street"), 0.0));
    }

    #[test]
    fn token_set_without_shared_tokens_compares_rests() {
        assert!(close(token_set_ratio("abc", "abd"), ratio("abc", "abd")));
    }

    #[test]
    fn wratio_identical() {
        assert!(close(wratio("coid", "coid"), 100.0));
    }

    #[test]
    fn wratio_empty_is_zero() {
        assert!(close(wratio("", "coid"), 0.0));
        assert!(close(wratio("coid", ""), 0.0));
    }

    #[test]
    fn wratio_similar_lengths_use_token_set() {
        // ratio is 93.3; the token-set subset match scaled by 0.95 wins.
        assert!(close(wratio("street address", "street address 1"), 95.0));
    }

    #[test]
    fn wratio_long_haystack_uses_partial() {
        let score = wratio("new york mets", "new york mets vs atlanta braves");
        assert!(close(score, 90.0));
    }

    #[test]
    fn wratio_very_different_lengths_scale_harder() {
        // Nine times longer: the exact partial hit is worth only 60.
        let score = wratio("ab", "ab cdefghijklmnopq");
        assert!(close(score, 60.0));
    }

    #[test]
    fn extract_one_empty_choices() {
        let choices: Vec<String> = Vec::new();
        assert!(extract_one("anything", &choices).is_none());
    }

    #[test]
    fn extract_one_picks_best() {
        let choices = ["coid", "eff_timestamp", "street_address_1"];
        let found = extract_one("street_address", &choices).unwrap();

        assert_eq!(found.choice, "street_address_1");
        assert_eq!(found.index, 2);
        assert!(close(found.score, 95.0));
    }

    #[test]
    fn extract_one_ignores_case_and_punctuation() {
        let choices = ["eff_timestamp"];
        let found = extract_one("EFF-TIMESTAMP", &choices).unwrap();
        assert!(close(found.score, 100.0));
    }

    #[test]
    fn extract_one_ties_keep_first() {
        let choices = ["abc_1", "abc_2"];
        let found = extract_one("abc", &choices).unwrap();
        assert_eq!(found.choice, "abc_1");
    }

    #[test]
    fn extract_one_with_blank_query_still_returns_a_candidate() {
        let choices = ["coid"];
        let found = extract_one("---", &choices).unwrap();
        assert!(close(found.score, 0.0));
    }
}
