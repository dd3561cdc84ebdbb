// src/analyze/matcher.rs
//! Keyword matcher over the submitted symptom list.
//!
//! Matching is deliberately crude: lower-case the symptoms once, then plain
//! substring containment against each trigger. No stemming, no word
//! boundaries, no typo tolerance. "pain" matches inside "abdominal pain"
//! and also inside longer unrelated phrases; cluster selection depends on
//! exactly these semantics, so do not tighten them.

/// Symptom list lower-cased once at construction.
#[derive(Debug, Clone)]
pub struct SymptomMatcher {
    lowered: Vec<String>,
}

impl SymptomMatcher {
    pub fn new<S: AsRef<str>>(symptoms: &[S]) -> Self {
        Self {
            lowered: symptoms
                .iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// True iff any symptom string contains any of the trigger words.
    /// Triggers are stored lower-case in the cluster table.
    pub fn has_any(&self, triggers: &[String]) -> bool {
        triggers
            .iter()
            .any(|t| self.lowered.iter().any(|s| s.contains(t.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triggers(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn matches_are_case_insensitive_on_the_symptom_side() {
        let m = SymptomMatcher::new(&["Severe COUGH since Monday"]);
        assert!(m.has_any(&triggers(&["cough"])));
    }

    #[test]
    fn substring_semantics_are_preserved() {
        let m = SymptomMatcher::new(&["dull abdominal pain after meals"]);
        // whole-phrase trigger inside a longer symptom
        assert!(m.has_any(&triggers(&["abdominal pain"])));
        // bare fragment also matches, by design
        assert!(m.has_any(&triggers(&["pain"])));
    }

    #[test]
    fn no_match_returns_false() {
        let m = SymptomMatcher::new(&["mild fatigue"]);
        assert!(!m.has_any(&triggers(&["cough", "fever"])));
        assert!(!m.has_any(&[]));
    }
}
