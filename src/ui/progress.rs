//! Progress gauge.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use super::theme::{COLOR_BORDER, COLOR_PROGRESS};

/// Gauge label: `"{progress}% - {stage}"`, or just the percentage before any stage.
pub fn progress_label(progress: i64, stage: &str) -> String {
    if stage.is_empty() {
        format!("{}%", progress)
    } else {
        format!("{}% - {}", progress, stage)
    }
}

/// Render the gauge. The label shows the value as received; the bar is kept in range.
pub fn render_progress(frame: &mut Frame, area: Rect, progress: i64, stage: &str) {
    let ratio = progress.clamp(0, 100) as f64 / 100.0;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Progress "),
        )
        .gauge_style(Style::default().fg(COLOR_PROGRESS).add_modifier(Modifier::BOLD))
        .ratio(ratio)
        .label(progress_label(progress, stage));
    frame.render_widget(gauge, area);
}
