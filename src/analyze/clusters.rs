// src/analyze/clusters.rs
//! Embedded symptom-cluster table.
//!
//! Each cluster is a fixed group of trigger keywords plus one condition
//! template (hand-assigned probability and severity) and its advisory
//! strings. The table is data, not logic: it ships inside the binary via
//! `include_str!` and is parsed once.

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::Condition;

/// One symptom cluster. Checked in file order; checks are independent, so
/// several clusters can fire from a single symptom list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    pub triggers: Vec<String>,
    pub condition: Condition,
    /// When present: parsed SpO₂ strictly below `below` raises the
    /// condition's probability to `probability`. Severity is unchanged
    /// (the only cluster carrying this is already "high").
    #[serde(default)]
    pub spo2_escalation: Option<Spo2Escalation>,
    #[serde(default)]
    pub guidance: Vec<String>,
    #[serde(default)]
    pub lifestyle_tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Spo2Escalation {
    pub below: u32,
    pub probability: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClusterTable {
    clusters: Vec<Cluster>,
    fallback: Condition,
    catch_all: Condition,
}

static TABLE: Lazy<ClusterTable> = Lazy::new(|| {
    let raw = include_str!("../../data/clusters.json");
    serde_json::from_str(raw).expect("valid cluster table")
});

/// All clusters, in check order.
pub fn clusters() -> &'static [Cluster] {
    &TABLE.clusters
}

/// Generic low-confidence candidate emitted when no cluster fires.
pub fn fallback_condition() -> &'static Condition {
    &TABLE.fallback
}

/// Fixed entry appended after ranking/truncation.
pub fn catch_all_condition() -> &'static Condition {
    &TABLE.catch_all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::Severity;

    #[test]
    fn table_parses_and_has_nine_clusters() {
        assert_eq!(clusters().len(), 9);
    }

    #[test]
    fn triggers_are_stored_lowercase() {
        // The matcher lower-cases only the symptom side.
        for cluster in clusters() {
            for t in &cluster.triggers {
                assert_eq!(t, &t.to_lowercase(), "trigger not lowercase in {}", cluster.id);
            }
        }
    }

    #[test]
    fn probabilities_stay_in_the_observed_band() {
        for cluster in clusters() {
            let p = cluster.condition.probability;
            assert!((60..=90).contains(&p), "{}: {}", cluster.id, p);
            if let Some(esc) = cluster.spo2_escalation {
                assert!(esc.probability > p);
            }
        }
        assert_eq!(fallback_condition().probability, 40);
        assert_eq!(catch_all_condition().probability, 35);
        assert_eq!(catch_all_condition().severity, Severity::Moderate);
    }

    #[test]
    fn only_the_emergency_cluster_escalates() {
        let escalating: Vec<&str> = clusters()
            .iter()
            .filter(|c| c.spo2_escalation.is_some())
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(escalating, vec!["cardiac_emergency"]);

        let emergency = clusters()
            .iter()
            .find(|c| c.id == "cardiac_emergency")
            .unwrap();
        assert_eq!(emergency.condition.severity, Severity::High);
        assert_eq!(emergency.condition.probability, 80);
        let esc = emergency.spo2_escalation.unwrap();
        assert_eq!(esc.below, 94);
        assert_eq!(esc.probability, 90);
    }

    #[test]
    fn cluster_condition_names_are_unique() {
        let mut names: Vec<&str> = clusters().iter().map(|c| c.condition.name.as_str()).collect();
        names.sort();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }
}
