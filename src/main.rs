//! Symptom Triage Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

mod analyze;
mod api;
mod directory;
mod medicine;
mod metrics;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - TRIAGE_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("TRIAGE_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("symptom_triage_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This enables OPENAI_API_KEY / AI_TEST_MODE from .env.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    let prometheus = metrics::Metrics::init();

    let state = api::AppState::from_env();
    let router = api::create_router(state).merge(prometheus.router());

    Ok(router.into())
}
