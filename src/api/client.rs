//! HTTP client for the scoring service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use super::types::{ResultRequest, StartTestRequest, StartTestResponse, TestResult};

/// Production scoring service.
pub const DEFAULT_BASE_URL: &str =
    "https://perfily-teste-de-perfil-api-678525805394.europe-west1.run.app";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced at the scoring API boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("scoring API request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error("question {question_id} came back without alternatives or options")]
    MissingOptions { question_id: u32 },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// The two remote operations the funnel depends on.
///
/// The same `fetch_result` call scores the quiz and re-checks the payment
/// unlock; the backend scores a fixed answer set deterministically.
#[async_trait]
pub trait ScoringApi: Send + Sync {
    /// Start a test session, returning session metadata and raw questions.
    async fn start_test(&self, api_code: &str) -> Result<StartTestResponse, ApiError>;

    /// Score the submitted answers.
    async fn fetch_result(&self, request: &ResultRequest) -> Result<TestResult, ApiError>;
}

/// Reqwest-backed [`ScoringApi`].
pub struct HttpScoringApi {
    client: Client,
    base_url: String,
}

impl HttpScoringApi {
    /// Build a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` when the underlying client cannot be
    /// constructed.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ScoringApi for HttpScoringApi {
    async fn start_test(&self, api_code: &str) -> Result<StartTestResponse, ApiError> {
        let url = format!("{}/app/iniciar-teste", self.base_url);
        let response = self
            .client
            .post(url)
            .json(&StartTestRequest {
                tipo_teste: api_code,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    async fn fetch_result(&self, request: &ResultRequest) -> Result<TestResult, ApiError> {
        let url = format!("{}/app/obter-resultado", self.base_url);
        let response = self.client.post(url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}
