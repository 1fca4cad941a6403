use analyst::app::App;
use analyst::cli::{CliArgs, CliCommand};
use analyst::client::AnalysisClient;
use analyst::logging::init_logging;
use analyst::report::{render_result_markdown, report_path, write_report};
use analyst::session::{SessionStatus, UploadSession};
use analyst::terminal::{setup_panic_hook, TerminalManager};
use analyst::ui;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

fn main() -> Result<()> {
    let command = CliArgs::parse().into_command();
    let args = match &command {
        CliCommand::Health(args) | CliCommand::Analyze(args) => args.clone(),
    };

    color_eyre::install()?;
    let full_screen = matches!(command, CliCommand::Analyze(_)) && !args.plain;
    init_logging(&args.log_target(full_screen))?;

    // Every session transition runs on this one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let healthy = match command {
        CliCommand::Health(_) => runtime.block_on(run_health(&args))?,
        _ => runtime.block_on(run_analysis(&args, full_screen))?,
    };
    if !healthy {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_health(args: &CliArgs) -> Result<bool> {
    let client = AnalysisClient::new(args.client_config());
    match client.health_check().await {
        Ok(true) => {
            println!("ok");
            Ok(true)
        }
        Ok(false) => {
            println!("unhealthy");
            Ok(false)
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Ok(false)
        }
    }
}

/// Upload the document and follow it to a terminal state. Returns false on failure.
async fn run_analysis(args: &CliArgs, full_screen: bool) -> Result<bool> {
    let path = args.file.as_deref().ok_or_else(|| eyre!("no document given"))?;
    let mut app = App::new(AnalysisClient::new(args.client_config()));

    if let Err(e) = app.select_path(path).await {
        eprintln!("{}", e.user_message());
        return Ok(false);
    }

    let prompt = match &args.prompt {
        Some(prompt) => prompt.clone(),
        None => read_prompt().await?,
    };
    app.set_prompt(prompt);

    if let Err(e) = app.submit() {
        eprintln!("{}", e);
        return Ok(false);
    }

    if full_screen {
        setup_panic_hook();
        let mut manager = TerminalManager::new()?;
        let outcome = run_tui(manager.terminal(), &mut app).await;
        manager.restore();
        outcome?;
    } else {
        let mut printer = ProgressPrinter::default();
        app.run_until_terminal(|session| printer.print(session)).await;
    }

    finish(&app, args.output.as_deref(), !full_screen).await
}

/// Read one line from stdin as the prompt.
async fn read_prompt() -> Result<String> {
    eprint!("Prompt: ");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Report the settled session and write the report if asked.
async fn finish(app: &App, output: Option<&Path>, print_result: bool) -> Result<bool> {
    let session = app.session();
    match (session.status, &session.result) {
        (SessionStatus::Completed, Some(result)) => {
            let markdown = render_result_markdown(result);
            if print_result {
                println!("\n{}", markdown);
            }
            if let Some(output) = output {
                let path = report_path(output);
                write_report(&path, &markdown).await?;
                eprintln!("Report written to {}", path.display());
            }
            Ok(true)
        }
        (SessionStatus::Failed, _) => {
            eprintln!(
                "Analysis failed: {}",
                session.error.as_deref().unwrap_or("unknown error")
            );
            if let Some(category) = session.error_category {
                let hint = category.recovery_hint();
                if !hint.is_empty() {
                    eprintln!("{}", hint);
                }
            }
            Ok(false)
        }
        (status, _) => {
            info!(status = %status, "exited before the analysis finished");
            Ok(false)
        }
    }
}

/// Prints one line per visible change in plain mode.
#[derive(Default)]
struct ProgressPrinter {
    last: Option<(SessionStatus, i64, String)>,
}

impl ProgressPrinter {
    fn print(&mut self, session: &UploadSession) {
        let current = (session.status, session.progress, session.stage.clone());
        if self.last.as_ref() == Some(&current) {
            return;
        }
        if session.status == SessionStatus::Streaming {
            eprintln!("{}", ui::progress_label(session.progress, &session.stage));
        }
        self.last = Some(current);
    }
}

async fn run_tui<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let Some(mut message_rx) = app.message_rx.take() else {
        return Ok(());
    };

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app.session()))?;
            app.needs_redraw = false;
        }
        if app.should_quit {
            break;
        }

        tokio::select! {
            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.mark_dirty();
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    // Input closed
                    None => break,
                }
            }
            Some(msg) = message_rx.recv() => {
                app.handle_message(msg);
            }
        }
    }

    app.message_rx = Some(message_rx);
    Ok(())
}
