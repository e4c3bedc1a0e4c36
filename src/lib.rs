//! Daily finance-content generation daemon.
//!
//! One run: ten catalog prompts through the DeepSeek completion endpoint
//! (fallback posts on failure), post-processed, then rendered to a dated
//! PDF and a plain-text mirror. The binary performs one run at startup
//! and repeats at the configured local time every day.

pub mod catalog;
pub mod completion;
pub mod config;
pub mod pipeline;
pub mod postprocess;
pub mod render;
pub mod scheduler;

use chrono::Local;

use crate::catalog::CatalogVariant;
use crate::completion::CompletionClient;
use crate::render::{RenderError, RunArtifacts, StyleSheet};

/// Execute one full run: generate all items and write both artifacts.
///
/// Per-prompt remote failures are absorbed inside the pipeline; the only
/// errors surfacing here are render/filesystem ones, which the caller
/// logs without leaving the scheduling loop.
pub fn run_once(
    client: &dyn CompletionClient,
    variant: CatalogVariant,
    output_dir: &std::path::Path,
    styles: &StyleSheet,
    pause: std::time::Duration,
) -> Result<RunArtifacts, RenderError> {
    let run_time = Local::now();
    tracing::info!(date = %run_time.format("%Y-%m-%d %H:%M:%S"), "Run started");

    let items = pipeline::generate_all(client, variant, pause);
    let artifacts = render::write_run_outputs(&items, run_time, output_dir, styles)?;

    tracing::info!(
        pdf = %artifacts.pdf.display(),
        txt = %artifacts.txt.display(),
        "Run completed"
    );
    Ok(artifacts)
}
