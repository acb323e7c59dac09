//! Scoring API boundary: wire types and the HTTP client behind a trait.

mod client;
mod types;

pub use client::{ApiError, DEFAULT_BASE_URL, HttpScoringApi, ScoringApi};
pub use types::{
    Alternativa, AnswerChoice, ApiQuestion, Opcao, OptionValue, ResultRequest, SessionInfo,
    StartTestRequest, StartTestResponse, TestPayload, TestResult,
};
