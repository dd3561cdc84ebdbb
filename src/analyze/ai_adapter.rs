// src/analyze/ai_adapter.rs
//! AI delegation wrapper: provider abstraction + prompt construction +
//! strict response parsing.
//!
//! The provider is a single-attempt collaborator. Missing credentials mean
//! "not configured", never an error; any network/parse failure makes the
//! caller fall forward to the rule engine. There is no retrying, no
//! cross-request caching, no circuit breaker.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::intake::AnalysisRequest;
use super::Condition;

// ------------------------------------------------------------
// Public surface
// ------------------------------------------------------------

/// Parsed AI analysis payload. `conditions` is the only mandatory field;
/// a response without it is a provider failure, not a partial success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub guidance: Vec<String>,
    #[serde(default)]
    pub lifestyle_tips: Vec<String>,
    #[serde(default = "default_specialist")]
    pub recommended_specialist: String,
}

fn default_specialist() -> String {
    super::specialist::DEFAULT_SPECIALIST.to_string()
}

/// Generative model collaborator: prompt in, raw text out.
pub trait GenerativeProvider: Send + Sync {
    fn generate<'a>(
        &'a self,
        system: &'a str,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
    /// Detectable before any call; false means "skip straight to rules".
    fn is_configured(&self) -> bool;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Trait object used by handlers and tests.
pub type DynProvider = Arc<dyn GenerativeProvider>;

/// Factory: build a provider from the environment.
///
/// * `AI_TEST_MODE=mock` returns a deterministic mock provider.
/// * `AI_ENABLED=0` forces the disabled provider.
/// * Otherwise OpenAI when `OPENAI_API_KEY` is set, disabled when not.
pub fn build_provider_from_env() -> DynProvider {
    if std::env::var("AI_TEST_MODE").map(|v| v == "mock").unwrap_or(false) {
        return Arc::new(MockProvider);
    }
    if std::env::var("AI_ENABLED").map(|v| v == "0").unwrap_or(false) {
        return Arc::new(DisabledProvider);
    }
    let provider = OpenAiProvider::from_env(None);
    if provider.is_configured() {
        Arc::new(provider)
    } else {
        Arc::new(DisabledProvider)
    }
}

/// Run one AI analysis attempt. `None` covers every failure mode: not
/// configured, transport error, malformed JSON, missing `conditions`.
/// The caller treats `None` as "use the rule engine".
pub async fn analyze_with_ai(
    provider: &dyn GenerativeProvider,
    request: &AnalysisRequest,
) -> Option<AiAnalysis> {
    if !provider.is_configured() {
        debug!(provider = provider.name(), "AI not configured, using rule engine");
        return None;
    }

    let prompt = build_symptom_prompt(request);
    match provider.generate(SYMPTOM_SYSTEM_PROMPT, &prompt).await {
        Ok(raw) => match parse_analysis(&raw) {
            Ok(analysis) => Some(analysis),
            Err(err) => {
                counter!("ai_fallbacks_total", "reason" => "parse").increment(1);
                warn!(provider = provider.name(), error = %err, "AI response rejected, falling back to rules");
                None
            }
        },
        Err(err) => {
            counter!("ai_fallbacks_total", "reason" => "provider").increment(1);
            warn!(provider = provider.name(), error = %err, "AI call failed, falling back to rules");
            None
        }
    }
}

// ------------------------------------------------------------
// Prompting
// ------------------------------------------------------------

pub const SYMPTOM_SYSTEM_PROMPT: &str = "You are a medical information assistant. Provide helpful health information while emphasizing safety disclaimers. Never provide dosages or specific treatment plans.";

fn build_symptom_prompt(request: &AnalysisRequest) -> String {
    let mut context = String::new();
    if let Some(age) = request.age {
        context.push_str(&format!("\nPatient age: {age}."));
    }
    if let Some(gender) = request.gender.as_deref().filter(|g| !g.is_empty()) {
        context.push_str(&format!("\nGender: {gender}."));
    }
    if let Some(duration) = request.duration.as_deref().filter(|d| !d.is_empty()) {
        context.push_str(&format!("\nSymptom duration: {duration}."));
    }
    if let Some(vitals) = &request.vitals {
        for (label, value) in [
            ("Temperature", &vitals.temperature),
            ("Pulse", &vitals.pulse),
            ("SpO2", &vitals.spo2),
            ("Blood pressure", &vitals.bp),
        ] {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                context.push_str(&format!("\n{label}: {v}."));
            }
        }
    }

    format!(
        "You are a medical information assistant. Based on the following symptoms: {symptoms}, provide a detailed health analysis.{context}\n\n\
IMPORTANT SAFETY RULES:\n\
- This is for awareness only, NOT a diagnosis\n\
- Never provide specific dosages or treatment instructions\n\
- Always recommend consulting a doctor\n\
- Be cautious and conservative in assessments\n\n\
Please respond in JSON format with:\n\
{{\n\
  \"conditions\": [\n\
    {{\n\
      \"name\": \"Condition name\",\n\
      \"probability\": number (0-100),\n\
      \"description\": \"Brief description\",\n\
      \"severity\": \"low\" | \"moderate\" | \"high\"\n\
    }}\n\
  ],\n\
  \"guidance\": [\"General care tip 1\", \"General care tip 2\"],\n\
  \"lifestyleTips\": [\"Lifestyle tip 1\", \"Lifestyle tip 2\"],\n\
  \"recommendedSpecialist\": \"Type of doctor to consult\"\n\
}}",
        symptoms = request.symptoms.join(", "),
        context = context,
    )
}

/// Parse the raw model output into the strict schema. Tolerates a
/// markdown code fence around the JSON, nothing else.
pub fn parse_analysis(raw: &str) -> anyhow::Result<AiAnalysis> {
    let body = strip_code_fence(raw);
    let analysis: AiAnalysis =
        serde_json::from_str(body).context("AI response is not a valid analysis object")?;
    Ok(analysis)
}

pub(crate) fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

// ------------------------------------------------------------
// Concrete providers
// ------------------------------------------------------------

/// OpenAI provider (Chat Completions API). Requires `OPENAI_API_KEY`.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    /// `model_override`: pass Some("gpt-4o-mini") to override; defaults to
    /// `OPENAI_MODEL` or "gpt-5".
    pub fn from_env(model_override: Option<&str>) -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        let http = reqwest::Client::builder()
            .user_agent("symptom-triage-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        let model = model_override
            .map(str::to_string)
            .or_else(|| std::env::var("OPENAI_MODEL").ok())
            .unwrap_or_else(|| "gpt-5".to_string());
        Self {
            http,
            api_key,
            model,
        }
    }
}

impl GenerativeProvider for OpenAiProvider {
    fn generate<'a>(
        &'a self,
        system: &'a str,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            #[derive(Serialize)]
            struct Msg<'a> {
                role: &'a str,
                content: &'a str,
            }
            #[derive(Serialize)]
            struct ResponseFormat<'a> {
                #[serde(rename = "type")]
                kind: &'a str,
            }
            #[derive(Serialize)]
            struct Req<'a> {
                model: &'a str,
                messages: Vec<Msg<'a>>,
                response_format: ResponseFormat<'a>,
            }
            #[derive(Deserialize)]
            struct Resp {
                choices: Vec<Choice>,
            }
            #[derive(Deserialize)]
            struct Choice {
                message: ChoiceMsg,
            }
            #[derive(Deserialize)]
            struct ChoiceMsg {
                content: Option<String>,
            }

            let req = Req {
                model: &self.model,
                messages: vec![
                    Msg {
                        role: "system",
                        content: system,
                    },
                    Msg {
                        role: "user",
                        content: prompt,
                    },
                ],
                response_format: ResponseFormat {
                    kind: "json_object",
                },
            };

            let resp = self
                .http
                .post("https://api.openai.com/v1/chat/completions")
                .bearer_auth(&self.api_key)
                .json(&req)
                .send()
                .await
                .context("OpenAI request failed")?;

            let status = resp.status();
            if !status.is_success() {
                anyhow::bail!("OpenAI returned status {status}");
            }
            let body: Resp = resp.json().await.context("OpenAI response body")?;
            body.choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .filter(|c| !c.trim().is_empty())
                .context("OpenAI response had no content")
        })
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Used when no AI backend is configured: never generates anything.
pub struct DisabledProvider;

impl GenerativeProvider for DisabledProvider {
    fn generate<'a>(
        &'a self,
        _system: &'a str,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async { anyhow::bail!("AI provider disabled") })
    }
    fn is_configured(&self) -> bool {
        false
    }
    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic canned responses used by the symptom-analysis mock path.
pub const MOCK_ANALYSIS_JSON: &str = r#"{
  "conditions": [
    {
      "name": "Mock condition",
      "probability": 88,
      "description": "Deterministic analysis returned by the mock provider.",
      "severity": "low"
    }
  ],
  "guidance": ["Mock guidance."],
  "lifestyleTips": ["Mock lifestyle tip."],
  "recommendedSpecialist": "General Physician"
}"#;

/// Canned medicine payload served by the mock for pharmaceutical prompts.
pub const MOCK_MEDICINE_JSON: &str = r#"{
  "name": "Mockamol",
  "generic_name": "mockamol",
  "uses": ["Testing"],
  "warnings": ["Not a real medicine."],
  "sideEffects": [],
  "category": "Test fixture",
  "general_precautions": [],
  "important_warnings": [],
  "equivalent_medicines": [],
  "disclaimer": "This app does not provide dosage or timing. Always follow your doctor and the medicine label."
}"#;

/// Simple mock provider for tests/local runs (`AI_TEST_MODE=mock`).
/// Chooses the canned payload from the system prompt.
#[derive(Clone)]
pub struct MockProvider;

impl GenerativeProvider for MockProvider {
    fn generate<'a>(
        &'a self,
        system: &'a str,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        let out = if system.contains("pharmaceutical") {
            MOCK_MEDICINE_JSON
        } else {
            MOCK_ANALYSIS_JSON
        };
        Box::pin(async move { Ok(out.to_string()) })
    }
    fn is_configured(&self) -> bool {
        true
    }
    fn name(&self) -> &'static str {
        "mock"
    }
}
