// Recommendation pipeline: relevance pre-filter, prompt construction,
// response parsing, orchestration.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod parser;
pub mod prompt;
pub mod prompts;
pub mod relevance;
pub mod service;
