//! LLM-backed product recommendation core.
//!
//! Pipeline: relevance pre-filter → prompt construction → one completion
//! call → best-effort response parsing. The crate owns no HTTP surface and
//! no storage; the embedding application supplies the product catalog and
//! user data per call and owns the tracing subscriber.

pub mod config;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod recommendation;

pub use config::Config;
pub use errors::AppError;
pub use llm_client::{CompletionClient, GeminiClient, LlmError};
pub use models::{Product, UserPreferences};
pub use recommendation::parser::{Reasoning, RecommendationEntry, RecommendationResult};
pub use recommendation::service::RecommendationService;
