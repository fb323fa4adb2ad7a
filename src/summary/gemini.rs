//! Gemini API client (primary delivery route)

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::summary::client::{DeliveryRoute, SummaryProvider};
use crate::summary::{SummaryError, SummaryRequest};

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Build a client from runtime settings.
    ///
    /// A missing API key is not an error here; it surfaces as
    /// [`SummaryError::CredentialMissing`] when a request is attempted,
    /// before any network activity.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let model = if settings.llm.model.trim().is_empty() {
            DEFAULT_GEMINI_MODEL.to_string()
        } else {
            settings.llm.model.trim().to_string()
        };

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_GEMINI_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(settings.llm.timeout_secs))
                .build()
                .context("Failed to build Gemini HTTP client")?,
            api_key: settings.llm.api_key.trim().to_string(),
            model,
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

#[async_trait]
impl SummaryProvider for GeminiClient {
    fn route(&self) -> DeliveryRoute {
        DeliveryRoute::Provider
    }

    async fn summarize(&self, request: &SummaryRequest) -> Result<String, SummaryError> {
        if self.api_key.is_empty() {
            return Err(SummaryError::CredentialMissing(
                "Set llm.api_key in config or RECAP_GEMINI_API_KEY".to_string(),
            ));
        }

        let body = GeminiGenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt_text.clone(),
                }],
            }],
        };

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            // The request URL carries the API key as a query parameter;
            // drop it so the credential never reaches messages or logs.
            .map_err(|e| SummaryError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SummaryError::Provider {
                status: status.as_u16(),
                message: truncate(&message, 200),
            });
        }

        let payload: GeminiGenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::MalformedResponse(e.without_url().to_string()))?;

        // All fragments of the first candidate: providers chunk long
        // output across multiple parts.
        let candidate = payload.candidates.into_iter().next().ok_or_else(|| {
            SummaryError::MalformedResponse("response contained no candidates".to_string())
        })?;

        let summary: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if summary.trim().is_empty() {
            return Err(SummaryError::MalformedResponse(
                "first candidate contained no text parts".to_string(),
            ));
        }

        Ok(summary)
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[derive(Debug, Serialize)]
struct GeminiGenerateContentRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}
