// ABOUTME: Fuzzy string similarity scoring on a 0-100 scale for dish name matching
// ABOUTME: Combines whole-string, partial-window and token-based Levenshtein ratios
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weighted fuzzy similarity
//!
//! Both inputs are lowercased and stripped of punctuation before scoring.
//! The final score is the best of:
//! - the plain normalized Levenshtein ratio,
//! - the best-aligned window of the longer string (when lengths differ a lot),
//! - order-insensitive token ratios (sorted tokens, token-set overlap),
//!
//! each discounted by how much the strings differ in length.

use crate::constants::matching::MAX_SCORE;
use std::collections::BTreeSet;

/// Length ratio below which strings are compared whole
const WHOLE_STRING_LEN_RATIO: f64 = 1.5;
/// Length ratio above which partial matches are discounted heavily
const LONG_TAIL_LEN_RATIO: f64 = 8.0;
const TOKEN_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const LONG_TAIL_PARTIAL_SCALE: f64 = 0.6;

/// Lowercase, replace non-alphanumerics with spaces and collapse whitespace
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized Levenshtein similarity in [0, 100]; 0 if either side is empty
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b) * MAX_SCORE
}

/// Best ratio between the shorter string and any equally long window of the longer one
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    if shorter.is_empty() {
        return 0.0;
    }

    let window = shorter.chars().count();
    let longer_chars: Vec<char> = longer.chars().collect();
    let mut best = 0.0_f64;
    for start in 0..=(longer_chars.len() - window) {
        let candidate: String = longer_chars[start..start + window].iter().collect();
        best = best.max(ratio(shorter, &candidate));
        if best >= MAX_SCORE {
            break;
        }
    }
    best
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Ratio of the two strings after sorting their tokens
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Token-set overlap ratio; 100 when one token set contains the other
#[must_use]
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |set: BTreeSet<&&str>| set.into_iter().copied().collect::<Vec<_>>().join(" ");
    let intersection = join(tokens_a.intersection(&tokens_b).collect());
    let only_a = join(tokens_a.difference(&tokens_b).collect());
    let only_b = join(tokens_b.difference(&tokens_a).collect());

    if !intersection.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return MAX_SCORE;
    }

    let combined_a = format!("{intersection} {only_a}").trim().to_owned();
    let combined_b = format!("{intersection} {only_b}").trim().to_owned();

    ratio(&intersection, &combined_a)
        .max(ratio(&intersection, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

/// Weighted similarity score in [0, 100]
#[must_use]
pub fn weighted_ratio(query: &str, choice: &str) -> f64 {
    let a = normalize(query);
    let b = normalize(choice);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let whole = ratio(&a, &b);
    let tokens = token_sort_ratio(&a, &b).max(token_set_ratio(&a, &b));

    if len_ratio < WHOLE_STRING_LEN_RATIO {
        return whole.max(tokens * TOKEN_SCALE);
    }

    let partial_scale = if len_ratio < LONG_TAIL_LEN_RATIO {
        PARTIAL_SCALE
    } else {
        LONG_TAIL_PARTIAL_SCALE
    };

    whole
        .max(partial_ratio(&a, &b) * partial_scale)
        .max(tokens * TOKEN_SCALE * partial_scale)
}
