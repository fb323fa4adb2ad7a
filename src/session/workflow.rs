//! Session summary workflow

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::present::SummaryPresenter;
use crate::session::{SessionMeta, SessionPhase};
use crate::summary::{
    build_delivery_chain, build_request, BackendClient, SummaryError, SummaryOutcome,
    SummaryProvider,
};
use crate::transcript::{TranscriptStore, Utterance};

/// One session's summary workflow.
///
/// Owns all per-session state: the utterance log, the ordered delivery
/// chain, the presenter, and the in-flight guard. A single boolean guard
/// is enough because all triggers arrive on one event surface; a second
/// trigger while a request is in flight is skipped without any network
/// activity.
pub struct SessionWorkflow {
    store: TranscriptStore,
    chain: Vec<Box<dyn SummaryProvider>>,
    presenter: SummaryPresenter,
    persistence: Option<BackendClient>,
    placeholder_on_failure: bool,
    in_flight: AtomicBool,
    phase: Mutex<SessionPhase>,
}

impl SessionWorkflow {
    pub fn new(
        store: TranscriptStore,
        chain: Vec<Box<dyn SummaryProvider>>,
        presenter: SummaryPresenter,
        persistence: Option<BackendClient>,
        placeholder_on_failure: bool,
    ) -> Self {
        Self {
            store,
            chain,
            presenter,
            persistence,
            placeholder_on_failure,
            in_flight: AtomicBool::new(false),
            phase: Mutex::new(SessionPhase::Idle),
        }
    }

    /// Build a workflow from runtime settings.
    pub fn from_settings(
        settings: &Settings,
        meta: &SessionMeta,
        presenter: SummaryPresenter,
    ) -> Result<Self> {
        let chain = build_delivery_chain(settings, meta)?;

        let persistence = if settings.backend.base_url.trim().is_empty() {
            None
        } else {
            Some(BackendClient::from_settings(settings, meta.clone())?)
        };

        Ok(Self::new(
            TranscriptStore::with_capacity_limit(settings.summary.max_utterances),
            chain,
            presenter,
            persistence,
            settings.summary.placeholder_on_failure,
        ))
    }

    /// Record one utterance from the transcription source.
    pub fn observe_utterance(&self, utterance: Utterance) {
        self.store.append(utterance);
    }

    /// Number of utterances recorded so far.
    pub fn transcript_len(&self) -> usize {
        self.store.len()
    }

    /// Current workflow phase.
    pub fn phase(&self) -> SessionPhase {
        *self.phase.lock().expect("phase lock poisoned")
    }

    fn set_phase(&self, phase: SessionPhase) {
        *self.phase.lock().expect("phase lock poisoned") = phase;
    }

    /// Run one summary request end to end.
    ///
    /// Returns `true` when the request ran (to any terminal phase) and
    /// `false` when it was skipped because another request was in flight.
    pub async fn request_summary(&self) -> bool {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            warn!("Summary request already in flight, ignoring trigger");
            return false;
        }

        self.run_request().await;

        self.in_flight.store(false, Ordering::SeqCst);
        true
    }

    async fn run_request(&self) {
        self.set_phase(SessionPhase::Building);

        let snapshot = self.store.snapshot();
        let request = match build_request(&snapshot) {
            Ok(request) => request,
            Err(error) => {
                self.set_phase(SessionPhase::Idle);
                self.presenter.present_error(&error);
                return;
            }
        };

        self.set_phase(SessionPhase::Sending);

        let mut last_error: Option<SummaryError> = None;
        for provider in &self.chain {
            match provider.summarize(&request).await {
                Ok(text) => {
                    let outcome = SummaryOutcome::Generated {
                        text,
                        route: provider.route(),
                    };
                    self.presenter.present(&outcome);
                    self.set_phase(SessionPhase::Displayed);
                    self.persist(&request.transcript_text, outcome.text()).await;
                    return;
                }
                Err(error) => {
                    match &error {
                        // Contract violations are logged distinctly so an
                        // API change is diagnosable after the fact.
                        SummaryError::MalformedResponse(detail) => warn!(
                            route = provider.route().label(),
                            detail = %detail,
                            "Provider response did not match the expected contract"
                        ),
                        other => warn!(
                            route = provider.route().label(),
                            error = %other,
                            "Summary delivery route failed"
                        ),
                    }
                    last_error = Some(error);
                }
            }
        }

        let error = last_error.unwrap_or_else(|| {
            SummaryError::Transport("no delivery routes configured".to_string())
        });
        self.presenter.present_error(&error);

        if self.placeholder_on_failure {
            self.presenter.present(&SummaryOutcome::Placeholder {
                text: placeholder_summary(),
            });
        }

        self.set_phase(SessionPhase::ErrorDisplayed);
    }

    /// Persist after display, best-effort: a persistence failure never
    /// reverts the displayed summary or reaches the user.
    async fn persist(&self, transcript: &str, summary: &str) {
        let Some(backend) = &self.persistence else {
            debug!("No backend configured, skipping summary persistence");
            return;
        };

        if let Err(error) = backend.save_summary(transcript, summary).await {
            warn!(error = %error, "Could not save summary to backend");
        }
    }
}

/// Synthetic last-resort summary, shown only when enabled in config.
fn placeholder_summary() -> String {
    "**Session Summary**\n\
This is a placeholder generated locally because the summary service \
could not be reached.\n\
\n\
**Key Topics:**\n\
- Not available\n\
\n\
**Next Steps:**\n\
- Check the provider API key and backend configuration, then request \
the summary again.\n\
\n\
*This is not an AI-generated summary.*"
        .to_string()
}
