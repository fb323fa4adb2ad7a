//! Presentation module for recap
//!
//! Markup rendering and the presenter that keeps every display surface
//! showing identical summary content.

mod presenter;
mod render;

pub use presenter::{
    LogNotifier, NoticeLevel, Notifier, RenderSurface, SummaryPresenter, SurfaceBuffer,
};
pub use render::render_markup;
