// src/analyze/intake.rs
//! Request types and validation for the analysis endpoint.
//!
//! The web client sends age and vitals as strings; we coerce age to a
//! number on the way in and echo everything else untouched so the client
//! can restore its form state from the response.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Optional vitals, all free strings as entered in the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub pulse: Option<String>,
    #[serde(default)]
    pub spo2: Option<String>,
    #[serde(default)]
    pub bp: Option<String>,
}

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid number regex"));

impl Vitals {
    /// Parsed SpO₂ reading, if the field holds something numeric.
    /// Accepts "90", "90%", "SpO2 90". The reading is the LAST digit run:
    /// labels like "SpO2" carry a digit of their own, so the first run is
    /// not safe to take. Anything unparseable is `None`; severity
    /// escalation then simply does not apply.
    pub fn spo2_value(&self) -> Option<u32> {
        let raw = self.spo2.as_deref()?;
        DIGIT_RUN.find_iter(raw).last()?.as_str().parse().ok()
    }
}

/// One symptom-analysis submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symptoms: Vec<String>,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub vitals: Option<Vitals>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub &'static str);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for ValidationError {}

impl AnalysisRequest {
    /// Shape check run before the engine: at least one non-blank symptom,
    /// and a positive age when one was given.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.symptoms.iter().any(|s| !s.trim().is_empty()) {
            return Err(ValidationError("At least one symptom is required"));
        }
        if self.age == Some(0) {
            return Err(ValidationError("Age must be a positive number"));
        }
        Ok(())
    }
}

/// Age arrives as a number or a string depending on client version.
/// Unparseable strings coerce to `None` rather than failing the request.
fn lenient_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u32),
        Str(String),
    }

    Ok(match Option::<NumOrStr>::deserialize(deserializer)? {
        None => None,
        Some(NumOrStr::Num(n)) => Some(n),
        Some(NumOrStr::Str(s)) => s.trim().parse().ok(),
    })
}
