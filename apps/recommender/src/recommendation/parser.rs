//! Response parsing — extracts the JSON array from raw completion text and
//! joins entries back to full catalog records.
//!
//! Parsing never fails hard: malformed model output degrades to an empty
//! result carrying an explanatory `error` string. Callers branch on data,
//! not on errors.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::product::find_by_id;
use crate::models::Product;

pub(crate) const ERR_NO_JSON_ARRAY: &str = "Could not parse recommendations from LLM response";
pub(crate) const ERR_INVALID_JSON: &str =
    "Failed to parse recommendations: Invalid JSON response";

/// Confidence assigned when the model omits `score`.
const DEFAULT_CONFIDENCE: f64 = 5.0;

// ────────────────────────────────────────────────────────────────────────────
// Result types
// ────────────────────────────────────────────────────────────────────────────

/// Per-recommendation reasoning sub-fields. All optional; the model may
/// return any subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reasoning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_match: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browsing_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complementary_factor: Option<String>,
}

impl Reasoning {
    pub fn is_empty(&self) -> bool {
        self.preference_match.is_none()
            && self.browsing_pattern.is_none()
            && self.complementary_factor.is_none()
    }
}

/// A parsed recommendation joined with its full catalog record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationEntry {
    pub product: Product,
    pub explanation: String,
    pub confidence_score: f64,
    pub reasoning: Reasoning,
}

/// Uniform result shape for both success and soft failure.
///
/// Invariant: `recommendations` is always present; `count` is set only on
/// success; `error` is set only on degraded/empty outcomes, never both an
/// error and a non-empty list.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<RecommendationEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecommendationResult {
    pub fn success(recommendations: Vec<RecommendationEntry>) -> Self {
        let count = recommendations.len();
        Self {
            recommendations,
            count: Some(count),
            error: None,
        }
    }

    /// Empty result with an explanatory message: the soft-failure shape.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            recommendations: Vec::new(),
            count: None,
            error: Some(message.into()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing
// ────────────────────────────────────────────────────────────────────────────

/// One element of the model's JSON array, before catalog join.
#[derive(Debug, Deserialize)]
struct RawEntry {
    product_id: Option<String>,
    #[serde(default)]
    explanation: String,
    #[serde(default = "default_confidence")]
    score: f64,
    #[serde(default)]
    reasoning: Reasoning,
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

/// Parses raw completion text into a `RecommendationResult`.
///
/// The model reply must contain exactly one JSON array between the first
/// `[` and the last `]`; everything around it (prose, code fences) is
/// ignored. Entries whose `product_id` does not resolve against the catalog
/// are dropped silently.
pub fn parse_recommendations(raw: &str, catalog: &[Product]) -> RecommendationResult {
    let Some(start) = raw.find('[') else {
        warn!("Could not find JSON array in LLM response");
        return RecommendationResult::degraded(ERR_NO_JSON_ARRAY);
    };
    let Some(end) = raw.rfind(']').filter(|end| *end >= start) else {
        warn!("Could not find JSON array in LLM response");
        return RecommendationResult::degraded(ERR_NO_JSON_ARRAY);
    };

    let entries: Vec<RawEntry> = match serde_json::from_str(&raw[start..=end]) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Error parsing JSON from LLM response: {e}");
            return RecommendationResult::degraded(ERR_INVALID_JSON);
        }
    };

    let recommendations: Vec<RecommendationEntry> = entries
        .into_iter()
        .filter_map(|entry| {
            let product_id = entry.product_id?;
            // Unresolvable ids are dropped, not reported
            let product = find_by_id(catalog, &product_id)?;
            Some(RecommendationEntry {
                product: product.clone(),
                explanation: entry.explanation,
                confidence_score: entry.score,
                reasoning: entry.reasoning,
            })
        })
        .collect();

    info!("Parsed {} recommendations", recommendations.len());
    RecommendationResult::success(recommendations)
}
