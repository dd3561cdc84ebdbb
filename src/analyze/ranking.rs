// src/analyze/ranking.rs
//! Ranking & deduplication of condition candidates.

use super::clusters;
use super::Condition;

/// Ranked entries kept before the catch-all is appended.
pub const MAX_RANKED: usize = 3;

/// Merge duplicate names (keeping the higher probability) and sort by
/// probability descending. The sort is stable, so equal probabilities keep
/// cluster-check order. Duplicate names are not expected in practice —
/// cluster names are unique — but the merge is defensive.
pub fn merge_and_sort(candidates: Vec<Condition>) -> Vec<Condition> {
    let mut merged: Vec<Condition> = Vec::with_capacity(candidates.len());
    for cand in candidates {
        match merged.iter_mut().find(|c| c.name == cand.name) {
            Some(existing) => {
                if cand.probability > existing.probability {
                    *existing = cand;
                }
            }
            None => merged.push(cand),
        }
    }
    merged.sort_by(|a, b| b.probability.cmp(&a.probability));
    merged
}

/// Truncate to the top `MAX_RANKED` and append the fixed "Other possible
/// causes" entry unless a condition with that exact name is already present.
/// Output length is 1..=4.
pub fn finalize(mut sorted: Vec<Condition>) -> Vec<Condition> {
    sorted.truncate(MAX_RANKED);
    let catch_all = clusters::catch_all_condition();
    if !sorted.iter().any(|c| c.name == catch_all.name) {
        sorted.push(catch_all.clone());
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{DetailedInfo, Severity};

    fn cond(name: &str, probability: u8) -> Condition {
        Condition {
            name: name.to_string(),
            probability,
            description: String::new(),
            severity: Severity::Low,
            detailed_info: DetailedInfo::default(),
        }
    }

    #[test]
    fn duplicates_merge_keeping_the_higher_probability() {
        let out = merge_and_sort(vec![cond("A", 60), cond("B", 70), cond("A", 80)]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "A");
        assert_eq!(out[0].probability, 80);
    }

    #[test]
    fn equal_probabilities_keep_input_order() {
        let out = merge_and_sort(vec![cond("first", 65), cond("second", 65)]);
        assert_eq!(out[0].name, "first");
        assert_eq!(out[1].name, "second");
    }

    #[test]
    fn finalize_truncates_and_appends_catch_all() {
        let sorted = merge_and_sort(vec![
            cond("A", 90),
            cond("B", 80),
            cond("C", 70),
            cond("D", 60),
        ]);
        let out = finalize(sorted);
        assert_eq!(out.len(), 4);
        assert_eq!(out[2].name, "C");
        assert_eq!(out[3].name, "Other possible causes");
        assert_eq!(out[3].probability, 35);
    }

    #[test]
    fn catch_all_is_not_duplicated() {
        let out = finalize(vec![cond("Other possible causes", 35)]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn single_candidate_yields_two_entries() {
        let out = finalize(vec![cond("A", 75)]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].name, "Other possible causes");
    }
}
