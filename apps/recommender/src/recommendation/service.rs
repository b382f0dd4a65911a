//! Recommendation orchestrator — the single public entry point.
//!
//! Flow: resolve browsing history → build prompt → one completion call →
//! parse response → normalize the empty case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{CompletionClient, GeminiClient};
use crate::models::product::find_by_id;
use crate::models::{Product, UserPreferences};
use crate::recommendation::parser::{parse_recommendations, RecommendationResult};
use crate::recommendation::prompt::build_recommendation_prompt;
use crate::recommendation::prompts::RECOMMENDATION_SYSTEM;

const ERR_NO_RECOMMENDATIONS: &str = "No recommendations could be generated";

/// Orchestrates one recommendation request end to end. Stateless across
/// calls; the caller supplies preferences, history, and catalog per call.
pub struct RecommendationService {
    llm: Arc<dyn CompletionClient>,
}

impl RecommendationService {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }

    /// Builds a service backed by the configured Gemini model.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(GeminiClient::new(config)))
    }

    /// Generates personalized recommendations.
    ///
    /// Hard failures (prompt build, transport/auth/model errors) surface as
    /// `AppError`; degraded model output (no parseable array, zero
    /// resolvable entries) comes back as an `Ok` result with an empty list
    /// and an `error` string.
    pub async fn generate(
        &self,
        preferences: &UserPreferences,
        browsing_history: &[String],
        catalog: &[Product],
    ) -> Result<RecommendationResult, AppError> {
        let browsed = resolve_browsed_products(browsing_history, catalog);
        debug!(
            "Resolved {} of {} browsing-history ids against the catalog",
            browsed.len(),
            browsing_history.len()
        );

        let prompt = build_recommendation_prompt(preferences, &browsed, catalog)
            .map_err(|e| AppError::Llm(format!("Failed to generate recommendations: {e}")))?;

        let reply = self
            .llm
            .complete(RECOMMENDATION_SYSTEM, &prompt)
            .await
            .map_err(|e| AppError::Llm(format!("Failed to generate recommendations: {e}")))?;

        let result = parse_recommendations(&reply, catalog);

        // An empty list normalizes to one generic message, whatever the
        // parser reported
        if result.recommendations.is_empty() {
            warn!("No recommendations generated");
            return Ok(RecommendationResult::degraded(ERR_NO_RECOMMENDATIONS));
        }

        info!(
            "Successfully generated {} recommendations",
            result.recommendations.len()
        );
        Ok(result)
    }
}

/// Resolves browsing-history ids to catalog records. First match wins;
/// ids absent from the catalog are skipped silently.
fn resolve_browsed_products<'a>(
    browsing_history: &[String],
    catalog: &'a [Product],
) -> Vec<&'a Product> {
    browsing_history
        .iter()
        .filter_map(|id| find_by_id(catalog, id))
        .collect()
}
