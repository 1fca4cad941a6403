//! Message and key handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::session::{Applied, SessionStatus, SubmitRejected};

use super::{App, AppMessage};

impl App {
    /// Handle an incoming async message
    pub fn handle_message(&mut self, msg: AppMessage) -> Applied {
        match msg {
            AppMessage::Stream { session_id, update } => {
                let applied = self.controller.apply(session_id, update);
                if applied == Applied::Updated {
                    self.mark_dirty();
                }
                applied
            }
        }
    }

    /// Handle a key press in the TUI.
    ///
    /// Esc and Ctrl+C cancel a running submission and quit otherwise. `q` quits once
    /// nothing is in flight. `r` submits from idle and resubmits after a terminal
    /// state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let status = self.controller.status();
        let in_flight = status.is_in_flight();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if in_flight {
                    self.cancel();
                } else {
                    self.quit();
                }
            }
            KeyCode::Esc => {
                if in_flight {
                    self.cancel();
                } else {
                    self.quit();
                }
            }
            KeyCode::Char('q') if !in_flight => self.quit(),
            KeyCode::Char('r') => {
                let submitted = if status == SessionStatus::Idle {
                    self.submit()
                } else {
                    self.retry()
                };
                if let Err(rejected) = submitted {
                    self.surface_rejection(rejected);
                }
            }
            _ => {}
        }
    }

    fn surface_rejection(&mut self, rejected: SubmitRejected) {
        match rejected {
            SubmitRejected::Invalid(err) => {
                self.controller.reject_input(&err);
                self.mark_dirty();
            }
            SubmitRejected::NotIdle { status } => {
                debug!(status = %status, "submit key ignored while a request is running");
            }
        }
    }
}
