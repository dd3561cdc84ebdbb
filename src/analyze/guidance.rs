// src/analyze/guidance.rs
//! Guidance/Lifestyle Aggregator: flattens per-cluster advisory strings
//! into the two response lists, disclaimers first.

use super::clusters::Cluster;

/// Fixed baseline disclaimers. Always the first two guidance entries, for
/// every input.
pub const DISCLAIMERS: [&str; 2] = [
    "This analysis is for awareness only and is not a medical diagnosis.",
    "If your symptoms get worse or feel severe, seek medical help immediately.",
];

const GENERIC_LIFESTYLE_TIP: &str =
    "Stay hydrated, eat balanced meals, and get enough rest while you recover.";

/// Collect guidance and lifestyle tips from every matched cluster, in
/// cluster-check order. A cluster contributes here whether or not its
/// condition survived ranking/truncation. When no cluster contributed a
/// lifestyle tip, one generic tip is appended so the list is never empty.
pub fn collect(matched: &[&Cluster]) -> (Vec<String>, Vec<String>) {
    let mut guidance: Vec<String> = DISCLAIMERS.iter().map(|s| s.to_string()).collect();
    let mut lifestyle_tips: Vec<String> = Vec::new();

    for cluster in matched {
        guidance.extend(cluster.guidance.iter().cloned());
        lifestyle_tips.extend(cluster.lifestyle_tips.iter().cloned());
    }

    if lifestyle_tips.is_empty() {
        lifestyle_tips.push(GENERIC_LIFESTYLE_TIP.to_string());
    }

    (guidance, lifestyle_tips)
}
