use thiserror::Error;

/// Application-level error type for the hard-failure tier.
///
/// Soft failures (unparseable model output, zero resolvable
/// recommendations) never surface here; they travel inside
/// `RecommendationResult` so callers branch on data, not on errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("LLM error: {0}")]
    Llm(String),
}
