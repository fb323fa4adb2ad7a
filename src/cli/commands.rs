//! CLI command implementations

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::present::{LogNotifier, SummaryPresenter, SurfaceBuffer};
use crate::session::{SessionMeta, SessionPhase, SessionWorkflow};
use crate::transcript::parse_transcript;

/// Generate a summary from a transcript file (or stdin) and print it.
pub async fn summarize(
    settings: &Settings,
    file: Option<PathBuf>,
    session_id: Option<String>,
    room: Option<String>,
) -> Result<()> {
    let content = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript file: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read transcript from stdin")?;
            buffer
        }
    };

    let utterances = parse_transcript(&content);
    if utterances.is_empty() {
        anyhow::bail!("No utterances found in transcript input");
    }

    let meta = SessionMeta {
        session_id: session_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        room_name: room.unwrap_or_default(),
        csrf_token: std::env::var("RECAP_CSRF_TOKEN").unwrap_or_default(),
    };

    // One primary surface; its content is what we print. A second
    // surface would receive identical content.
    let surface = SurfaceBuffer::new();
    let mut presenter = SummaryPresenter::new(Arc::new(LogNotifier));
    presenter.add_surface(surface.clone());

    let workflow = SessionWorkflow::from_settings(settings, &meta, presenter)?;
    for utterance in utterances {
        workflow.observe_utterance(utterance);
    }

    workflow.request_summary().await;

    match workflow.phase() {
        SessionPhase::Displayed => {
            println!("{}", surface.content());
            Ok(())
        }
        SessionPhase::ErrorDisplayed => {
            if !surface.content().is_empty() {
                println!("{}", surface.content());
            }
            anyhow::bail!("Summary generation failed on every delivery route");
        }
        _ => anyhow::bail!("Transcript too short to summarize"),
    }
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
