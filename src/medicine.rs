// src/medicine.rs
//! Medicine information lookup by name. Pure AI delegation: unlike symptom
//! analysis there is no rule-based fallback for medicine data, so an
//! unconfigured or failing provider surfaces as "service unavailable" at
//! the API layer. Image-based identification is intentionally not offered.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analyze::ai_adapter::{strip_code_fence, GenerativeProvider};

/// Medicine payload. Field naming mirrors the wire contract the web client
/// already consumes (a mix of snake_case and camelCase, kept as-is).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineInfo {
    pub name: String,
    #[serde(default)]
    pub generic_name: String,
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default, rename = "sideEffects")]
    pub side_effects: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub general_precautions: Vec<String>,
    #[serde(default)]
    pub important_warnings: Vec<String>,
    #[serde(default)]
    pub equivalent_medicines: Vec<EquivalentMedicine>,
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
    #[serde(default)]
    pub pharmacy_links: Vec<PharmacyLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalentMedicine {
    pub brand: String,
    #[serde(default)]
    pub generic_name: String,
    #[serde(default)]
    pub approx_price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacyLink {
    pub label: String,
    pub url: String,
}

fn default_disclaimer() -> String {
    "This app does not provide dosage or timing. Always follow your doctor and the medicine label."
        .to_string()
}

pub const MEDICINE_SYSTEM_PROMPT: &str = "You are a pharmaceutical information assistant. Provide medicine information for awareness only. NEVER provide dosage or specific treatment instructions.";

fn build_medicine_prompt(query: &str) -> String {
    format!(
        "Provide detailed information about the medicine: \"{query}\"\n\n\
CRITICAL SAFETY RULES:\n\
- DO NOT provide dosage information\n\
- DO NOT provide timing or frequency instructions\n\
- Always state this is for awareness only\n\
- Emphasize consulting a doctor\n\n\
Respond in JSON format:\n\
{{\n\
  \"name\": \"Medicine name\",\n\
  \"generic_name\": \"Generic/chemical name\",\n\
  \"uses\": [\"Use 1\", \"Use 2\"],\n\
  \"warnings\": [\"Warning 1\", \"Warning 2\"],\n\
  \"sideEffects\": [\"Side effect 1\", \"Side effect 2\"],\n\
  \"category\": \"Medicine category\",\n\
  \"general_precautions\": [\"Precaution 1\", \"Precaution 2\"],\n\
  \"important_warnings\": [\"Critical warning 1\", \"Critical warning 2\"],\n\
  \"equivalent_medicines\": [\n\
    {{\"brand\": \"Brand name\", \"generic_name\": \"Generic name\", \"approx_price\": \"Price range\"}}\n\
  ],\n\
  \"disclaimer\": \"This app does not provide dosage or timing. Always follow your doctor and the medicine label.\"\n\
}}"
    )
}

/// Look up one medicine by name. `None` means the AI collaborator is not
/// configured or did not produce a usable payload; the caller maps that to
/// a 503, there is nothing local to fall back to.
pub async fn lookup(provider: &dyn GenerativeProvider, query: &str) -> Option<MedicineInfo> {
    if !provider.is_configured() {
        return None;
    }
    let prompt = build_medicine_prompt(query);
    match provider.generate(MEDICINE_SYSTEM_PROMPT, &prompt).await {
        Ok(raw) => match parse_medicine(&raw) {
            Ok(mut info) => {
                info.pharmacy_links.push(PharmacyLink {
                    label: "View on partner pharmacy".to_string(),
                    url: format!(
                        "https://example-pharmacy.com/search?query={}",
                        urlencoding::encode(query)
                    ),
                });
                Some(info)
            }
            Err(err) => {
                warn!(error = %err, "medicine response rejected");
                None
            }
        },
        Err(err) => {
            warn!(error = %err, "medicine lookup failed");
            None
        }
    }
}

fn parse_medicine(raw: &str) -> anyhow::Result<MedicineInfo> {
    serde_json::from_str(strip_code_fence(raw)).context("AI response is not a medicine object")
}
