//! Answer providers.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{GenerationError, Result};
use crate::prompt::build_grounded_prompt;

/// Trait for answer providers.
///
/// `context` carries the retrieved passages, highest-similarity first; the
/// provider grounds its answer in them.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Generate an answer to `question` grounded in `context`.
    async fn generate(&self, question: &str, context: &[String]) -> Result<String>;

    /// Check if the provider is usable (API key set, etc.).
    fn is_available(&self) -> bool;
}

/// Default endpoint of the Generative Language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default chat model.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Sampling temperature: low, to keep answers close to the context.
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Hosted Gemini chat-completion provider.
pub struct GeminiChat {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// Chat model identifier.
    model: String,

    /// Sampling temperature.
    temperature: f32,

    /// HTTP client.
    client: reqwest::Client,
}

impl GeminiChat {
    /// Create a new provider, reading the API key from `GOOGLE_API_KEY`.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("GOOGLE_API_KEY").ok(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            client: reqwest::Client::new(),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL (used by tests to target a local mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(GenerationError::ProviderNotConfigured)
    }
}

impl Default for GeminiChat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerProvider for GeminiChat {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, question: &str, context: &[String]) -> Result<String> {
        let api_key = self.api_key()?;

        let prompt = build_grounded_prompt(question, context);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": { "temperature": self.temperature }
        });

        debug!("generating answer with model {}", self.model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::ApiRequest(format!(
                "chat API error {status}: {error_text}"
            )));
        }

        let result: GenerateContentResponse = response.json().await?;
        let candidate = result
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::InvalidResponse("no candidates".to_string()))?;

        let answer: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if answer.is_empty() {
            return Err(GenerationError::InvalidResponse(
                "candidate has no text".to_string(),
            ));
        }

        Ok(answer)
    }

    fn is_available(&self) -> bool {
        self.api_key().is_ok()
    }
}

/// `generateContent` response format.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
