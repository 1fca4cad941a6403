//! UI rendering for the upload session.
//!
//! The screen is one column:
//! - header with the session status
//! - the selected document and prompt
//! - a progress gauge while a request is running
//! - the result or the error once the session settles
//! - keybind hints

mod progress;
mod result_card;
mod theme;

pub use progress::{progress_label, render_progress};
pub use result_card::{error_lines, result_lines};
pub use theme::{COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_PROGRESS, COLOR_SUCCESS};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::session::{SessionStatus, UploadSession};
use theme::COLOR_KEY;

/// Render the whole screen for `session`.
pub fn render(frame: &mut Frame, session: &UploadSession) {
    let show_gauge = session.status.is_in_flight() || session.progress != 0;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(if show_gauge { 3 } else { 0 }),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], session.status);
    render_input(frame, chunks[1], session);
    if show_gauge {
        render_progress(frame, chunks[2], session.progress, &session.stage);
    }
    render_body(frame, chunks[3], session);
    render_footer(frame, chunks[4], session);
}

fn render_header(frame: &mut Frame, area: Rect, status: SessionStatus) {
    let style = match status {
        SessionStatus::Completed => Style::default().fg(COLOR_SUCCESS),
        SessionStatus::Failed => Style::default().fg(COLOR_ERROR),
        _ => Style::default().fg(COLOR_DIM),
    };
    let line = Line::from(vec![
        Span::styled(
            "Document analysis ",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[{}]", status), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(frame: &mut Frame, area: Rect, session: &UploadSession) {
    let label = Style::default().fg(COLOR_DIM);
    let file = match &session.file {
        Some(file) => format!("{} ({}, {} bytes)", file.name, file.media_type, file.len()),
        None => "no file selected".to_string(),
    };
    let lines = vec![
        Line::from(vec![Span::styled("File:   ", label), Span::raw(file)]),
        Line::from(vec![Span::styled("Prompt: ", label), Span::raw(session.prompt.clone())]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_body(frame: &mut Frame, area: Rect, session: &UploadSession) {
    let lines = match (&session.result, &session.error) {
        (Some(result), _) if session.status == SessionStatus::Completed => result_lines(result),
        // Validation errors also show while idle
        (_, Some(error)) => error_lines(error, session.error_category),
        _ => match session.status {
            SessionStatus::Submitted => vec![Line::from("Uploading...")],
            SessionStatus::Streaming => vec![Line::from("Waiting for the analysis...")],
            _ => Vec::new(),
        },
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Result ");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, session: &UploadSession) {
    let key = Style::default().fg(COLOR_KEY);
    let status = session.status;
    let spans = if status.is_in_flight() {
        vec![Span::styled("[Esc]", key), Span::raw(" Cancel")]
    } else if status.is_terminal() {
        vec![
            Span::styled("[R]", key),
            Span::raw(" Retry  "),
            Span::styled("[Q]", key),
            Span::raw(" Quit"),
        ]
    } else if session.file.is_some() {
        vec![
            Span::styled("[R]", key),
            Span::raw(" Submit  "),
            Span::styled("[Q]", key),
            Span::raw(" Quit"),
        ]
    } else {
        vec![Span::styled("[Q]", key), Span::raw(" Quit")]
    };
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::models::{AnalysisResult, InvestmentScore, UploadFile};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(session: &UploadSession) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, session)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn session_with_file() -> UploadSession {
        let file = UploadFile::new("deal.pdf", "application/pdf", b"%PDF".to_vec()).unwrap();
        let mut session = UploadSession::new(Some(file));
        session.prompt = "Is this a good investment?".to_string();
        session
    }

    #[test]
    fn test_render_idle() {
        let screen = draw(&UploadSession::default());
        assert!(screen.contains("[idle]"));
        assert!(screen.contains("no file selected"));
        assert!(!screen.contains("Progress"));
    }

    #[test]
    fn test_render_streaming_shows_gauge_label() {
        let mut session = session_with_file();
        session.status = SessionStatus::Streaming;
        session.progress = 30;
        session.stage = "Generating queries".to_string();

        let screen = draw(&session);
        assert!(screen.contains("deal.pdf"));
        assert!(screen.contains("30% - Generating queries"));
        assert!(screen.contains("Cancel"));
    }

    #[test]
    fn test_render_out_of_range_progress_does_not_panic() {
        let mut session = session_with_file();
        session.status = SessionStatus::Streaming;
        session.progress = 250;
        let screen = draw(&session);
        assert!(screen.contains("250%"));

        session.progress = -5;
        draw(&session);
    }

    #[test]
    fn test_render_completed() {
        let mut session = session_with_file();
        session.status = SessionStatus::Completed;
        session.progress = 100;
        session.result = Some(AnalysisResult {
            summary: "Strong team".to_string(),
            investment_score: Some(InvestmentScore::Number(8.0)),
            sources: vec!["https://a.example".to_string()],
        });

        let screen = draw(&session);
        assert!(screen.contains("[completed]"));
        assert!(screen.contains("Strong team"));
        assert!(screen.contains("Investment score: 8"));
        assert!(screen.contains("https://a.example"));
    }

    #[test]
    fn test_render_failed() {
        let mut session = session_with_file();
        session.status = SessionStatus::Failed;
        session.error = Some("quota exceeded".to_string());

        let screen = draw(&session);
        assert!(screen.contains("[failed]"));
        assert!(screen.contains("quota exceeded"));
        assert!(screen.contains("Retry"));
    }

    #[test]
    fn test_render_failed_shows_recovery_hint() {
        let mut session = session_with_file();
        session.status = SessionStatus::Failed;
        session.error = Some("Could not reach the analysis service.".to_string());
        session.error_category = Some(ErrorCategory::Transport);

        let screen = draw(&session);
        assert!(screen.contains("Check that the analysis service is running"));
    }

    #[test]
    fn test_render_idle_with_file_offers_submit() {
        let screen = draw(&session_with_file());
        assert!(screen.contains("[R] Submit"));
        assert!(!draw(&UploadSession::default()).contains("Submit"));
    }
}
