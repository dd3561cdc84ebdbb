// src/analyze/mod.rs
//! Analysis pipeline entry: picks the AI or rule-based strategy per request
//! and assembles the final response.

pub mod ai_adapter;
pub mod candidates;
pub mod clusters;
pub mod guidance;
pub mod intake;
pub mod matcher;
pub mod ranking;
pub mod specialist;

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::directory::{Doctor, DoctorDirectory};

// Re-export convenient types.
pub use crate::analyze::ai_adapter::{AiAnalysis, GenerativeProvider};
pub use crate::analyze::clusters::Cluster;
pub use crate::analyze::intake::{AnalysisRequest, ValidationError, Vitals};
pub use crate::analyze::matcher::SymptomMatcher;

/// How many matched doctors the response carries.
const MAX_DOCTORS: usize = 3;

/// Severity bucket shown next to each condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

/// Per-condition advisory bundle. Sections may be empty; the client hides
/// empty ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedInfo {
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default)]
    pub self_care: Vec<String>,
    #[serde(default)]
    pub when_to_see_doctor: Vec<String>,
    #[serde(default)]
    pub common_approaches: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub diet_tips: Vec<String>,
    #[serde(default)]
    pub how_others_can_help: Vec<String>,
}

/// One candidate condition. `name` is the merge key during ranking;
/// `probability` is a hand-assigned heuristic confidence (0-100), not a
/// statistical estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub name: String,
    pub probability: u8,
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub detailed_info: DetailedInfo,
}

/// Final response returned by `POST /api/analyze-symptoms`.
///
/// `doctors` and `nearby_doctors` carry the same list; two generations of
/// the web client read different field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub conditions: Vec<Condition>,
    pub guidance: Vec<String>,
    pub lifestyle_tips: Vec<String>,
    pub recommended_specialist: String,
    pub input: AnalysisRequest,
    pub doctors: Vec<Doctor>,
    pub nearby_doctors: Vec<Doctor>,
}

/// Output of the rule-based engine, before doctor enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub conditions: Vec<Condition>,
    pub guidance: Vec<String>,
    pub lifestyle_tips: Vec<String>,
    pub recommended_specialist: String,
}

/// Full per-request analysis: try the AI strategy once, fall forward to the
/// rule engine on any failure, then enrich with a doctor lookup.
///
/// The request must already be validated (see `AnalysisRequest::validate`).
pub async fn analyze(
    request: AnalysisRequest,
    ai: &dyn GenerativeProvider,
    directory: &dyn DoctorDirectory,
) -> AnalysisResult {
    if let Some(ai_analysis) = ai_adapter::analyze_with_ai(ai, &request).await {
        counter!("analyses_total", "strategy" => "ai").increment(1);
        info!(
            id = %anon_hash(&request.symptoms.join("|")),
            strategy = "ai",
            conditions = ai_analysis.conditions.len(),
            "analysis served"
        );
        let doctors = fetch_doctors(directory, &ai_analysis.recommended_specialist).await;
        return AnalysisResult {
            conditions: ai_analysis.conditions,
            guidance: ai_analysis.guidance,
            lifestyle_tips: ai_analysis.lifestyle_tips,
            recommended_specialist: ai_analysis.recommended_specialist,
            input: request,
            doctors: doctors.clone(),
            nearby_doctors: doctors,
        };
    }

    counter!("analyses_total", "strategy" => "rules").increment(1);
    let outcome = evaluate(&request);
    info!(
        id = %anon_hash(&request.symptoms.join("|")),
        strategy = "rules",
        conditions = outcome.conditions.len(),
        "analysis served"
    );
    let doctors = fetch_doctors(directory, &outcome.recommended_specialist).await;
    AnalysisResult {
        conditions: outcome.conditions,
        guidance: outcome.guidance,
        lifestyle_tips: outcome.lifestyle_tips,
        recommended_specialist: outcome.recommended_specialist,
        input: request,
        doctors: doctors.clone(),
        nearby_doctors: doctors,
    }
}

/// Rule-based engine. Pure and deterministic: never fails, never returns an
/// empty condition list, identical input yields identical output.
pub fn evaluate(request: &AnalysisRequest) -> RuleOutcome {
    let matcher = SymptomMatcher::new(&request.symptoms);
    let spo2 = request.vitals.as_ref().and_then(Vitals::spo2_value);

    let matched: Vec<&Cluster> = clusters::clusters()
        .iter()
        .filter(|c| matcher.has_any(&c.triggers))
        .collect();

    let raw = candidates::build(&matched, spo2);
    let sorted = ranking::merge_and_sort(raw);

    // The specialist reads the top-ranked real condition, before the
    // catch-all entry is appended (matches the AI-path contract).
    let recommended_specialist = specialist::resolve(
        sorted
            .first()
            .map(|c| c.name.as_str())
            .unwrap_or_default(),
    );

    let conditions = ranking::finalize(sorted);
    let (guidance, lifestyle_tips) = guidance::collect(&matched);

    RuleOutcome {
        conditions,
        guidance,
        lifestyle_tips,
        recommended_specialist,
    }
}

/// Doctor lookup with graceful degradation: a failed or empty specialty
/// match falls back to the full directory; a failed directory falls back to
/// an empty list. The analysis response is never blocked by this step.
async fn fetch_doctors(directory: &dyn DoctorDirectory, specialty: &str) -> Vec<Doctor> {
    let query = if specialty.is_empty() {
        specialist::DEFAULT_SPECIALIST
    } else {
        specialty
    };

    let by_specialty = match directory.by_specialty(query).await {
        Ok(list) => list,
        Err(err) => {
            counter!("directory_lookup_failures_total").increment(1);
            tracing::warn!(error = %err, "doctor lookup by specialty failed");
            Vec::new()
        }
    };
    if !by_specialty.is_empty() {
        return by_specialty.into_iter().take(MAX_DOCTORS).collect();
    }

    match directory.all().await {
        Ok(list) => list.into_iter().take(MAX_DOCTORS).collect(),
        Err(err) => {
            counter!("directory_lookup_failures_total").increment(1);
            tracing::warn!(error = %err, "doctor directory unavailable");
            Vec::new()
        }
    }
}

/// Short anonymized id for logs. Symptom text is never logged raw.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
