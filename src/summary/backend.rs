//! Session backend client: summary relay fallback and persistence

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::session::SessionMeta;
use crate::summary::client::{DeliveryRoute, SummaryProvider};
use crate::summary::{SummaryError, SummaryRequest};

const CSRF_HEADER: &str = "X-CSRFToken";
const GENERATE_SUMMARY_PATH: &str = "/api/generate-summary/";

/// Client for the session backend.
///
/// Serves two roles: the fallback delivery route (the backend holds its
/// own provider credential and generates the summary server-side) and the
/// best-effort persistence sink for summaries generated client-side.
pub struct BackendClient {
    http: Client,
    base_url: String,
    meta: SessionMeta,
}

#[derive(Debug, Serialize)]
struct GenerateSummaryBody<'a> {
    transcript: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
    session_id: &'a str,
    room_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateSummaryResponse {
    summary: Option<String>,
}

impl BackendClient {
    pub fn from_settings(settings: &Settings, meta: SessionMeta) -> Result<Self> {
        let base_url = settings.backend.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            anyhow::bail!("Backend base URL is missing. Set backend.base_url in config.");
        }

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(settings.backend.timeout_secs))
                .build()
                .context("Failed to build backend HTTP client")?,
            base_url: base_url.to_string(),
            meta,
        })
    }

    async fn post_summary(
        &self,
        transcript: &str,
        summary: Option<&str>,
    ) -> Result<GenerateSummaryResponse, SummaryError> {
        let body = GenerateSummaryBody {
            transcript,
            summary,
            session_id: &self.meta.session_id,
            room_name: &self.meta.room_name,
        };

        let mut request = self
            .http
            .post(format!("{}{}", self.base_url, GENERATE_SUMMARY_PATH))
            .json(&body);
        if !self.meta.csrf_token.is_empty() {
            request = request.header(CSRF_HEADER, &self.meta.csrf_token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SummaryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummaryError::Provider {
                status: status.as_u16(),
                message: "backend rejected the request".to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| SummaryError::MalformedResponse(e.to_string()))
    }

    /// Persist a transcript and its summary, best-effort.
    ///
    /// Callers log failures and continue; a persistence error never
    /// reaches the user.
    pub async fn save_summary(
        &self,
        transcript: &str,
        summary: &str,
    ) -> Result<(), SummaryError> {
        self.post_summary(transcript, Some(summary)).await?;
        Ok(())
    }
}

#[async_trait]
impl SummaryProvider for BackendClient {
    fn route(&self) -> DeliveryRoute {
        DeliveryRoute::BackendRelay
    }

    /// Relay route: the backend receives the raw transcript, not the
    /// composed prompt, and applies its own template server-side.
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, SummaryError> {
        let payload = self.post_summary(&request.transcript_text, None).await?;

        payload.summary.filter(|s| !s.trim().is_empty()).ok_or_else(|| {
            SummaryError::MalformedResponse("backend response contained no summary".to_string())
        })
    }
}
