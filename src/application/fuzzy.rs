//! Similarity scoring for normalized player names.
//!
//! Scores are integers in `0..=100`. The weighted score takes the better of a
//! whole-string edit similarity and a best-window (partial) similarity, with
//! the partial score discounted as the two names diverge in length. Defense
//! names are where the partial score matters: `bills` against
//! `buffalobills`.
//!
//! The whole-string score is normalized Levenshtein distance, which charges a
//! substitution as one edit over the longer length. Indel-based ratios score
//! over the combined length and so rate near misses higher: `joshalen`
//! against `joshallen` is 89 here and 94 under an indel ratio. Thresholds
//! tuned against an indel ratio should be lowered a few points.

use strsim::normalized_levenshtein;

/// Whole-string similarity, 0-100.
#[must_use]
pub fn ratio(a: &str, b: &str) -> u8 {
    to_score(normalized_levenshtein(a, b))
}

/// Best similarity of the shorter string against every equally long window of
/// the longer one, 0-100.
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0;
    }
    let long_chars: Vec<char> = long.chars().collect();
    let best = long_chars
        .windows(short_len)
        .map(|w| {
            let window: String = w.iter().collect();
            normalized_levenshtein(short, &window)
        })
        .fold(0.0_f64, f64::max);
    to_score(best)
}

/// Weighted similarity used for identity resolution, 0-100.
///
/// Identical strings always score 100. Partial matches are scaled by 0.9 once
/// one name is at least 1.5 times the other's length, and by 0.6 beyond 8
/// times, so a substring never outranks an exact match.
#[must_use]
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    if len_a == 0 || len_b == 0 {
        return 0;
    }
    let base = ratio(a, b);
    let longer = len_a.max(len_b) as f64;
    let shorter = len_a.min(len_b) as f64;
    let length_ratio = longer / shorter;
    if length_ratio < 1.5 {
        return base;
    }
    let scale = if length_ratio > 8.0 { 0.6 } else { 0.9 };
    let partial = (f64::from(partial_ratio(a, b)) * scale).round() as u8;
    base.max(partial)
}

/// Best-scoring candidate for `query`. Ties keep the earliest candidate.
pub fn best_match<'a, T>(
    query: &str,
    candidates: impl IntoIterator<Item = (&'a str, T)>,
) -> Option<(T, u8)> {
    let mut best: Option<(T, u8)> = None;
    for (name, key) in candidates {
        let score = weighted_ratio(query, name);
        if best.as_ref().map_or(true, |(_, s)| score > *s) {
            best = Some((key, score));
        }
    }
    best
}

fn to_score(similarity: f64) -> u8 {
    (similarity.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_score_100() {
        assert_eq!(weighted_ratio("patrickmahomes", "patrickmahomes"), 100);
    }

    #[test]
    fn one_typo_scores_high() {
        let score = weighted_ratio("amonrastbrown", "amonrasaintbrown");
        assert!(score >= 75, "got {score}");
        assert!(weighted_ratio("joshalen", "joshallen") >= 85);
    }

    #[test]
    fn single_deletion_scores_by_edit_distance() {
        assert_eq!(ratio("joshalen", "joshallen"), 89);
        assert_eq!(weighted_ratio("joshalen", "joshallen"), 89);
    }

    #[test]
    fn unrelated_names_score_low() {
        assert!(weighted_ratio("joshallen", "derrickhenry") < 40);
    }

    #[test]
    fn defense_nickname_matches_full_name_partially() {
        let score = weighted_ratio("bills", "buffalobills");
        assert_eq!(score, 90);
        assert!(score > weighted_ratio("bills", "bengals"));
    }

    #[test]
    fn empty_names_never_match() {
        assert_eq!(weighted_ratio("", "chiefs"), 0);
        assert_eq!(partial_ratio("", "chiefs"), 0);
    }

    #[test]
    fn best_match_prefers_first_on_tie() {
        let found = best_match("chiefs", [("chiefs", 1), ("chiefs", 2), ("bears", 3)]);
        assert_eq!(found, Some((1, 100)));
        assert_eq!(best_match::<u8>("chiefs", []), None);
    }
}
