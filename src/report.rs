//! Markdown report export.
//!
//! A report is built either from a structured [`AnalysisResult`] or from free-form
//! analysis text, which is split into paragraphs on runs of blank lines.

use std::path::{Path, PathBuf};

use color_eyre::{eyre::WrapErr, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::models::AnalysisResult;

/// File name used when the output path names a directory.
pub const DEFAULT_REPORT_FILE: &str = "analysis.md";

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("Invalid paragraph break regex"));

/// Where a report for `output` is written: inside it when it is an existing
/// directory, at `output` itself otherwise.
pub fn report_path(output: &Path) -> PathBuf {
    if output.is_dir() {
        output.join(DEFAULT_REPORT_FILE)
    } else {
        output.to_path_buf()
    }
}

/// Split free text into trimmed, non-empty paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

/// Markdown for free-form analysis text.
pub fn render_text_markdown(text: &str) -> String {
    let mut out = String::from("# Analysis\n");
    for paragraph in split_paragraphs(text) {
        out.push('\n');
        out.push_str(paragraph);
        out.push('\n');
    }
    out
}

/// Markdown for a structured result.
pub fn render_result_markdown(result: &AnalysisResult) -> String {
    let mut out = render_text_markdown(&result.summary);

    if let Some(score) = &result.investment_score {
        out.push_str(&format!("\n## Investment score\n\n{}\n", score));
    }

    if !result.sources.is_empty() {
        out.push_str("\n## Sources\n\n");
        for (index, source) in result.sources.iter().enumerate() {
            out.push_str(&format!("{}. <{}>\n", index + 1, source));
        }
    }

    out
}

/// Write a report, replacing any existing file.
///
/// The text goes to a temporary sibling first and is renamed into place, so a failed
/// write never leaves a truncated report behind.
pub async fn write_report(path: &Path, markdown: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .wrap_err_with(|| format!("Failed to create report directory {:?}", parent))?;
    }

    let temp_path = path.with_extension("md.tmp");
    tokio::fs::write(&temp_path, markdown)
        .await
        .wrap_err_with(|| format!("Failed to write report to {:?}", temp_path))?;
    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e).wrap_err_with(|| format!("Failed to move report to {:?}", path));
    }

    info!(path = %path.display(), bytes = markdown.len(), "report written");
    Ok(())
}
