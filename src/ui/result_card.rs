//! Result and error rendering.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::error::ErrorCategory;
use crate::models::AnalysisResult;

use super::theme::{COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_LINK, COLOR_SUCCESS};

/// Lines for a completed analysis: summary, score, then numbered sources.
pub fn result_lines(result: &AnalysisResult) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Analysis complete",
        Style::default()
            .fg(COLOR_SUCCESS)
            .add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));

    for paragraph in result.summary.lines() {
        lines.push(Line::from(paragraph.to_string()));
    }

    if let Some(score) = &result.investment_score {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Investment score: ", Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD)),
            Span::raw(score.to_string()),
        ]));
    }

    if !result.sources.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Sources",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        )));
        for (index, source) in result.sources.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>2}. ", index + 1), Style::default().fg(COLOR_DIM)),
                Span::styled(
                    source.clone(),
                    Style::default()
                        .fg(COLOR_LINK)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
    }

    lines
}

/// Lines for a failed session. The message is shown exactly as received, followed by
/// the category's recovery hint when it has one.
pub fn error_lines(message: &str, category: Option<ErrorCategory>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Analysis failed",
            Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(COLOR_ERROR),
        )),
    ];

    let hint = category.map(|c| c.recovery_hint()).unwrap_or_default();
    if !hint.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(COLOR_DIM),
        )));
    }

    lines
}
