use std::time::Duration;

use lexika_config::api::ApiConfig;
use lexika_types::{ApiResponse, WordNotesResponse, WordRecord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {code}: {msg}")]
    Api { code: i64, msg: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Only transport-level failures are worth another attempt; an API
    /// rejection will not change on retry.
    fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}

/// Fetches vocabulary records from the notes API with bounded retries and
/// exponential backoff between attempts.
pub struct HttpFetcher {
    config: ApiConfig,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        if config.cookie.is_empty() {
            return Err(FetchError::Config(
                "API cookie not set, export LEXIKA_API_COOKIE".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    pub async fn fetch_data(&self) -> Result<Vec<WordRecord>, FetchError> {
        let mut attempt = 1;
        loop {
            match self.fetch_once().await {
                Ok(records) => return Ok(records),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let backoff = Duration::from_secs(1u64 << attempt.min(5));
                    tracing::warn!(
                        "fetch attempt {attempt}/{} failed: {e}, retrying in {backoff:?}",
                        self.config.max_retries
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self) -> Result<Vec<WordRecord>, FetchError> {
        tracing::debug!("requesting word notes from {}", self.config.endpoint);

        let response: ApiResponse = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("language", self.config.language.as_str()),
                ("source_lang", self.config.source_lang.as_str()),
                ("target_lang", self.config.target_lang.as_str()),
            ])
            .header("Cookie", &self.config.cookie)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.code != 0 {
            return Err(FetchError::Api {
                code: response.code,
                msg: response.msg,
            });
        }

        let Some(data) = response.data else {
            tracing::warn!("no data in API response");
            return Ok(Vec::new());
        };

        match serde_json::from_value::<WordNotesResponse>(data) {
            Ok(payload) => Ok(payload.word_notes),
            Err(e) => {
                tracing::error!("failed to decode word notes: {e}");
                Ok(Vec::new())
            }
        }
    }
}
