// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod directory;
pub mod medicine;
pub mod metrics;

// Analysis pipeline (intake, matcher, clusters, candidates, ranking,
// guidance, specialist, AI adapter)
pub mod analyze;

// ---- Re-exports for stable public API ----
pub use analyze::ai_adapter;
pub use crate::api::{create_router, AppState};
pub use crate::analyze::{analyze, evaluate, AnalysisRequest, AnalysisResult, Condition, Severity};
