// tests/engine_scenarios.rs
//
// Behavioral scenarios for the rule-based engine. The engine is pure and
// deterministic, so these run without any server or provider wiring.

use symptom_triage_analyzer::analyze::guidance::DISCLAIMERS;
use symptom_triage_analyzer::analyze::{evaluate, AnalysisRequest, Severity, Vitals};

fn request(symptoms: &[&str], spo2: Option<&str>) -> AnalysisRequest {
    AnalysisRequest {
        symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        age: None,
        gender: None,
        duration: None,
        vitals: spo2.map(|v| Vitals {
            spo2: Some(v.to_string()),
            ..Default::default()
        }),
    }
}

#[test]
fn scenario_a_classic_respiratory_presentation() {
    let out = evaluate(&request(&["fever", "cough", "sore throat"], None));

    let top = &out.conditions[0];
    assert_eq!(top.name, "Viral upper respiratory infection");
    assert_eq!(top.probability, 75);
    assert_eq!(top.severity, Severity::Moderate);

    assert!(
        out.recommended_specialist.contains("General Physician")
            || out.recommended_specialist.contains("Pulmonologist"),
        "unexpected specialist: {}",
        out.recommended_specialist
    );
}

#[test]
fn scenario_b_low_spo2_escalates_the_emergency() {
    let out = evaluate(&request(&["chest pain", "shortness of breath"], Some("90")));

    let top = &out.conditions[0];
    assert_eq!(top.severity, Severity::High);
    assert_eq!(top.probability, 90);
    assert_eq!(out.recommended_specialist, "Cardiologist / Emergency");
}

#[test]
fn scenario_c_normal_spo2_keeps_base_probability_but_high_severity() {
    let out = evaluate(&request(&["chest pain"], Some("98")));

    let top = &out.conditions[0];
    assert_eq!(top.severity, Severity::High);
    assert_eq!(top.probability, 80);
}

#[test]
fn scenario_d_unrecognized_symptoms_yield_the_two_fallback_entries() {
    let out = evaluate(&request(&["xyz-unrecognized-token"], None));

    let names: Vec<&str> = out.conditions.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Non-specific mild illness", "Other possible causes"]
    );
    assert_eq!(out.recommended_specialist, "General Physician");
    // the generic lifestyle tip fills the otherwise empty list
    assert_eq!(out.lifestyle_tips.len(), 1);
}

#[test]
fn labeled_normal_spo2_does_not_escalate() {
    // the digit in the "SpO2" label must not be mistaken for the reading
    let out = evaluate(&request(&["chest pain"], Some("SpO2 95")));
    assert_eq!(out.conditions[0].probability, 80);

    let out = evaluate(&request(&["chest pain"], Some("SpO2 90")));
    assert_eq!(out.conditions[0].probability, 90);
}

#[test]
fn unparseable_spo2_behaves_like_no_reading() {
    let with_garbage = evaluate(&request(&["chest pain"], Some("n/a")));
    let without = evaluate(&request(&["chest pain"], None));
    assert_eq!(with_garbage.conditions, without.conditions);
    assert_eq!(with_garbage.conditions[0].probability, 80);
}

#[test]
fn guidance_always_starts_with_both_disclaimers() {
    for symptoms in [
        vec!["fever"],
        vec!["chest pain", "nausea"],
        vec!["nothing recognizable"],
    ] {
        let out = evaluate(&request(&symptoms, None));
        assert_eq!(out.guidance[0], DISCLAIMERS[0]);
        assert_eq!(out.guidance[1], DISCLAIMERS[1]);
    }
}

#[test]
fn conditions_are_bounded_sorted_and_unique_for_broad_input() {
    // fires many clusters at once
    let out = evaluate(&request(
        &[
            "fever and cough",
            "nausea",
            "headache",
            "chest pain",
            "joint pain",
            "rash",
            "burning urination",
            "stress",
        ],
        None,
    ));

    assert!(out.conditions.len() >= 1 && out.conditions.len() <= 4);

    let probs: Vec<u8> = out.conditions.iter().map(|c| c.probability).collect();
    let mut sorted = probs.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(probs, sorted, "conditions must be sorted by probability desc");

    let mut names: Vec<&str> = out.conditions.iter().map(|c| c.name.as_str()).collect();
    let before = names.len();
    names.sort();
    names.dedup();
    assert_eq!(before, names.len(), "condition names must be unique");

    // truncation keeps the 3 strongest clusters plus the catch-all
    assert_eq!(out.conditions[0].name, "Possible cardiac or respiratory emergency");
    assert_eq!(out.conditions[3].name, "Other possible causes");

    // guidance still reflects every matched cluster, including truncated ones
    assert!(out.guidance.len() > 2 + 3);
}

#[test]
fn equal_probability_clusters_keep_check_order() {
    // headache (65) is checked before musculoskeletal (65)
    let out = evaluate(&request(&["headache", "joint pain"], None));
    assert_eq!(out.conditions[0].name, "Tension headache or migraine");
    assert_eq!(
        out.conditions[1].name,
        "Musculoskeletal strain or joint inflammation"
    );
}

#[test]
fn engine_is_idempotent_for_identical_requests() {
    let req = request(&["fever", "joint pain"], Some("97"));
    let a = evaluate(&req);
    let b = evaluate(&req);
    assert_eq!(a, b);

    // byte-identical once serialized, too
    let ja = serde_json::to_string(&a.conditions).unwrap();
    let jb = serde_json::to_string(&b.conditions).unwrap();
    assert_eq!(ja, jb);
}
