//! Session module for recap
//!
//! Session-scoped workflow state: one object per session holds the
//! transcript, the delivery chain, and the in-flight guard. Nothing
//! survives a restart; a fresh session always starts idle.

mod workflow;

pub use workflow::SessionWorkflow;

/// Identity and credentials of the surrounding session.
///
/// Supplied by the caller (page, backend, or CLI), consumed not owned.
#[derive(Debug, Clone, Default)]
pub struct SessionMeta {
    /// Backend session identifier
    pub session_id: String,

    /// Video room name
    pub room_name: String,

    /// Cross-site-request-forgery token for backend calls
    pub csrf_token: String,
}

/// Phase of the summary workflow for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No request in progress
    Idle,
    /// Snapshotting the transcript and composing the prompt
    Building,
    /// A delivery route is in flight
    Sending,
    /// A summary is on screen
    Displayed,
    /// Every route failed and the error is on screen
    ErrorDisplayed,
}
