//! Upload session state machine.
//!
//! ```text
//! Idle --begin_submit--> Submitted --Opened--> Streaming --Result--> Completed
//!                            |                     |
//!                            +--TransportFailed----+--Error/TransportFailed--> Failed
//! ```
//!
//! `Completed` and `Failed` are terminal; selecting a new file starts a fresh session.
//! Every stream update carries the [`SessionId`] it was opened for, and updates for any
//! other id are dropped.

mod controller;
mod progress;
mod state;

pub use controller::{Applied, SessionController, SubmitRejected};
pub use progress::ProgressPolicy;
pub use state::{SessionId, SessionStatus, UploadSession};
