// src/analyze/candidates.rs
//! Condition Candidate Builder: turns the matched clusters into candidate
//! conditions. Pure and infallible for any input.

use super::clusters::{self, Cluster};
use super::Condition;

/// Build candidates from the clusters that fired, in cluster-check order.
///
/// SpO₂ escalation applies only where the cluster declares it; a missing or
/// unparseable reading means no escalation. When nothing fired, the single
/// generic fallback candidate is emitted so the list is never empty.
pub fn build(matched: &[&Cluster], spo2: Option<u32>) -> Vec<Condition> {
    let mut out = Vec::with_capacity(matched.len().max(1));

    for cluster in matched {
        let mut condition = cluster.condition.clone();
        if let Some(esc) = cluster.spo2_escalation {
            if spo2.is_some_and(|v| v < esc.below) {
                condition.probability = esc.probability;
            }
        }
        out.push(condition);
    }

    if out.is_empty() {
        out.push(clusters::fallback_condition().clone());
    }
    out
}
