//! Delivery route abstraction for summary generation

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::session::SessionMeta;
use crate::summary::backend::BackendClient;
use crate::summary::gemini::GeminiClient;
use crate::summary::{SummaryError, SummaryRequest};

/// Identifies which delivery path produced a result or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryRoute {
    /// Direct call to the generative-language provider
    Provider,
    /// Relay through the session backend
    BackendRelay,
}

impl DeliveryRoute {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::BackendRelay => "backend-relay",
        }
    }
}

/// One way of turning a summary request into summary text.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    fn route(&self) -> DeliveryRoute;

    async fn summarize(&self, request: &SummaryRequest) -> Result<String, SummaryError>;
}

/// Build the ordered delivery chain from runtime settings.
///
/// The primary route is the configured provider; when a backend base URL
/// is configured, the backend relay is appended as the single fallback.
/// Routes are tried in order, at most once each.
pub fn build_delivery_chain(
    settings: &Settings,
    meta: &SessionMeta,
) -> Result<Vec<Box<dyn SummaryProvider>>> {
    let mut chain: Vec<Box<dyn SummaryProvider>> = Vec::new();

    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => chain.push(Box::new(GeminiClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ),
    }

    if !settings.backend.base_url.trim().is_empty() {
        chain.push(Box::new(BackendClient::from_settings(settings, meta.clone())?));
    }

    Ok(chain)
}
