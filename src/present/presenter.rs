//! Summary presenter: synchronized surfaces and user notifications

use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

use crate::present::render::render_markup;
use crate::summary::{SummaryError, SummaryOutcome};

/// A display surface summaries are injected into.
///
/// The session page has two (side panel and detail modal); both must
/// always show identical content for a given result.
pub trait RenderSurface: Send + Sync {
    fn set_content(&self, html: &str);
}

/// In-memory surface, stands in for a DOM injection point.
#[derive(Debug, Default)]
pub struct SurfaceBuffer {
    content: Mutex<String>,
}

impl SurfaceBuffer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn content(&self) -> String {
        self.content.lock().expect("surface lock poisoned").clone()
    }
}

impl RenderSurface for SurfaceBuffer {
    fn set_content(&self, html: &str) {
        *self.content.lock().expect("surface lock poisoned") = html.to_string();
    }
}

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Notifier that routes notices to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info | NoticeLevel::Success => info!("{}", message),
            NoticeLevel::Warning => warn!("{}", message),
            NoticeLevel::Error => error!("{}", message),
        }
    }
}

/// Renders summary outcomes to every registered surface and reports
/// failures to the user. Failures are never swallowed silently.
pub struct SummaryPresenter {
    surfaces: Vec<Arc<dyn RenderSurface>>,
    notifier: Arc<dyn Notifier>,
}

impl SummaryPresenter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            surfaces: Vec::new(),
            notifier,
        }
    }

    pub fn add_surface(&mut self, surface: Arc<dyn RenderSurface>) {
        self.surfaces.push(surface);
    }

    /// Render a summary to every surface.
    ///
    /// Placeholder outcomes are wrapped in a labeled container so a
    /// synthetic stand-in can never pass for a genuine result.
    pub fn present(&self, outcome: &SummaryOutcome) {
        let html = match outcome {
            SummaryOutcome::Generated { text, .. } => render_markup(text),
            SummaryOutcome::Placeholder { text } => format!(
                "<div class=\"placeholder-summary\"><em>Placeholder summary \
(no live summary could be generated)</em><br>{}</div>",
                render_markup(text)
            ),
        };

        for surface in &self.surfaces {
            surface.set_content(&html);
        }

        match outcome {
            SummaryOutcome::Generated { .. } => self
                .notifier
                .notify(NoticeLevel::Success, "AI summary generated successfully!"),
            SummaryOutcome::Placeholder { .. } => self.notifier.notify(
                NoticeLevel::Warning,
                "Showing a placeholder summary; no live summary could be generated.",
            ),
        }
    }

    /// Report a failure to the user, distinguished by kind.
    pub fn present_error(&self, error: &SummaryError) {
        let (level, message) = match error {
            SummaryError::EmptyTranscript => (
                NoticeLevel::Warning,
                "No transcript available for summary generation".to_string(),
            ),
            SummaryError::CredentialMissing(detail) => (
                NoticeLevel::Error,
                format!("Summary service is not configured: {}", detail),
            ),
            SummaryError::Transport(_) | SummaryError::Provider { .. } => (
                NoticeLevel::Error,
                format!("Failed to generate summary: {}. Please try again.", error),
            ),
            SummaryError::MalformedResponse(_) => (
                NoticeLevel::Error,
                "Failed to generate summary: the provider returned an unexpected response."
                    .to_string(),
            ),
        };

        self.notifier.notify(level, &message);
    }
}
