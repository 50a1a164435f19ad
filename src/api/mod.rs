pub mod prompt;
pub mod types;

use thiserror::Error;
use types::{GeminiError, GenerateContentRequest, GenerateContentResponse};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, with the request URL (and its key) stripped
    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("API request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("unexpected API response format")]
    InvalidResponse,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.without_url())
    }
}

/// Where and with which model requests are sent
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub model: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ClientOptions {
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    options: ClientOptions,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, options: ClientOptions) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            options,
        }
    }

    /// Ask the model for a SUNO style and lyrics about `topic`.
    /// Returns the raw response text; see [`crate::parser::SongSheet`] for splitting.
    pub async fn generate_lyrics(&self, topic: &str) -> Result<String, ApiError> {
        let request = GenerateContentRequest::from_prompt(prompt::build(topic));
        self.generate_content(&request).await
    }

    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, ApiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.options.base_url,
            self.options.model,
            urlencoding::encode(&self.api_key)
        );

        // The key travels in the query string, keep it out of the logs
        tracing::debug!(
            "Requesting generateContent: {}/models/{}",
            self.options.base_url,
            self.options.model
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::from)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::warn!("Gemini returned {}: {}", status, message);
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Failed to decode Gemini response: {}", e);
            ApiError::InvalidResponse
        })?;

        parsed.into_first_text().ok_or(ApiError::InvalidResponse)
    }
}
