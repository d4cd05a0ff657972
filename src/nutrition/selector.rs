// ABOUTME: Best-match selection of a USDA search record for a free-text dish query
// ABOUTME: Fuzzy scoring over description + brand labels with a substring containment fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::fuzzy::weighted_ratio;
use crate::constants::matching::DEFAULT_SCORE_CUTOFF;
use crate::external::FoodRecord;

/// How a record was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Highest fuzzy score at or above the cutoff
    Fuzzy,
    /// Query found verbatim (case-insensitive) inside a label
    Substring,
}

/// A selected record together with how it was found
#[derive(Debug, Clone, Copy)]
pub struct BestMatch<'a> {
    /// Selected record
    pub record: &'a FoodRecord,
    /// Position of the record in the candidate list
    pub index: usize,
    /// Fuzzy score of the record's label (0-100)
    pub score: f64,
    /// Strategy that produced the match
    pub strategy: MatchStrategy,
}

/// Comparison label for a record: trimmed description and brand joined by one space
///
/// Missing fields become empty strings; the space is kept even when one side is empty.
#[must_use]
pub fn candidate_label(record: &FoodRecord) -> String {
    format!(
        "{} {}",
        record.description.as_deref().unwrap_or_default().trim(),
        record.brand_name.as_deref().unwrap_or_default().trim()
    )
}

/// Picks the candidate whose label best matches a dish query
#[derive(Debug, Clone, Copy)]
pub struct BestMatchSelector {
    score_cutoff: f64,
}

impl Default for BestMatchSelector {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_CUTOFF)
    }
}

impl BestMatchSelector {
    /// Create a selector with the given minimum acceptable score (0-100)
    #[must_use]
    pub const fn new(score_cutoff: f64) -> Self {
        Self { score_cutoff }
    }

    /// Minimum acceptable fuzzy score
    #[must_use]
    pub const fn score_cutoff(&self) -> f64 {
        self.score_cutoff
    }

    /// Select the best record for `query`, or `None`
    ///
    /// The highest-scoring label wins if it clears the cutoff; on equal scores
    /// the earlier record wins. Otherwise the first label containing the query
    /// (case-insensitive) is returned.
    #[must_use]
    pub fn pick_best<'a>(&self, query: &str, records: &'a [FoodRecord]) -> Option<BestMatch<'a>> {
        if records.is_empty() {
            return None;
        }

        let labels: Vec<String> = records.iter().map(candidate_label).collect();
        let scores: Vec<f64> = labels
            .iter()
            .map(|label| weighted_ratio(query, label))
            .collect();

        let mut best_index = 0;
        for (index, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best_index] {
                best_index = index;
            }
        }

        if scores[best_index] >= self.score_cutoff {
            return Some(BestMatch {
                record: &records[best_index],
                index: best_index,
                score: scores[best_index],
                strategy: MatchStrategy::Fuzzy,
            });
        }

        let needle = query.to_lowercase();
        labels
            .iter()
            .position(|label| label.to_lowercase().contains(&needle))
            .map(|index| BestMatch {
                record: &records[index],
                index,
                score: scores[index],
                strategy: MatchStrategy::Substring,
            })
    }
}
