// src/analyze/specialist.rs
//! Specialist Resolver: ordered substring rules over the top-ranked
//! condition name. First matching rule wins. This is a deliberate simple
//! design, kept as an explicit table; do not replace with fuzzy matching.

pub const DEFAULT_SPECIALIST: &str = "General Physician";

/// Rule table, checked top to bottom against the lower-cased condition
/// name. The emergency rule sits first: the emergency cluster's condition
/// name also contains "respiratory" and must not route to a pulmonologist.
const RULES: &[(&[&str], &str)] = &[
    (&["cardiac", "chest", "emergency"], "Cardiologist / Emergency"),
    (&["respiratory"], "General Physician / Pulmonologist"),
    (&["gastro", "stomach"], "Gastroenterologist"),
    (&["headache", "migraine"], "Neurologist"),
    (
        &["musculoskeletal", "joint", "strain"],
        "Orthopedist / Physiotherapist",
    ),
    (&["skin", "allergic", "dermatitis"], "Dermatologist"),
    (&["urinary"], "Urologist"),
    (&["genital", "sti"], "Urologist / Gynecologist"),
    (
        &["stress", "anxiety", "mental"],
        "Psychiatrist / Psychologist",
    ),
];

/// Map a condition name to a human-facing specialist label.
pub fn resolve(top_condition_name: &str) -> String {
    let lowered = top_condition_name.to_lowercase();
    for (needles, label) in RULES {
        if needles.iter().any(|n| lowered.contains(n)) {
            return (*label).to_string();
        }
    }
    DEFAULT_SPECIALIST.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respiratory_routes_to_general_physician_or_pulmonologist() {
        assert_eq!(
            resolve("Viral upper respiratory infection"),
            "General Physician / Pulmonologist"
        );
    }

    #[test]
    fn emergency_beats_the_respiratory_rule() {
        // the name contains both "cardiac" and "respiratory"
        assert_eq!(
            resolve("Possible cardiac or respiratory emergency"),
            "Cardiologist / Emergency"
        );
    }

    #[test]
    fn each_cluster_condition_resolves_to_its_specialist() {
        assert_eq!(resolve("Gastroenteritis (stomach infection)"), "Gastroenterologist");
        assert_eq!(resolve("Tension headache or migraine"), "Neurologist");
        assert_eq!(
            resolve("Musculoskeletal strain or joint inflammation"),
            "Orthopedist / Physiotherapist"
        );
        assert_eq!(resolve("Allergic skin reaction or dermatitis"), "Dermatologist");
        assert_eq!(resolve("Urinary tract infection"), "Urologist");
        assert_eq!(
            resolve("Possible genital infection or STI"),
            "Urologist / Gynecologist"
        );
        assert_eq!(
            resolve("Stress or anxiety related condition"),
            "Psychiatrist / Psychologist"
        );
    }

    #[test]
    fn unknown_names_fall_back_to_general_physician() {
        assert_eq!(resolve("Non-specific mild illness"), DEFAULT_SPECIALIST);
        assert_eq!(resolve("Other possible causes"), DEFAULT_SPECIALIST);
        assert_eq!(resolve(""), DEFAULT_SPECIALIST);
    }
}
