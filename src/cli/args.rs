//! Command-line argument parsing.
//!
//! ```text
//! analyst <FILE> [--prompt TEXT] [--api-url URL] [--output PATH] [--plain]
//!         [--clamp-progress] [--monotonic-progress] [--log-file PATH]
//! analyst --health [--api-url URL]
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::config::ClientConfig;
use crate::logging::LogTarget;
use crate::session::ProgressPolicy;

/// Options shared by every command that talks to the service.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "analyst", version)]
#[command(about = "Upload a PDF, DOCX or TXT document for analysis and follow its progress", long_about = None)]
pub struct CliArgs {
    /// Document to analyze
    #[arg(required_unless_present = "health")]
    pub file: Option<PathBuf>,

    /// Question to ask about the document (read from stdin if omitted)
    #[arg(short, long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Analysis service base URL (default: $ANALYST_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Write the result as a Markdown report
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print progress lines instead of the full-screen view
    #[arg(long)]
    pub plain: bool,

    /// Keep progress values within 0-100
    #[arg(long)]
    pub clamp_progress: bool,

    /// Ignore progress values lower than the current one
    #[arg(long)]
    pub monotonic_progress: bool,

    /// Append logs to PATH (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Check that the analysis service is reachable
    #[arg(long)]
    pub health: bool,
}

impl CliArgs {
    /// Environment configuration with command-line overrides applied.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env().with_progress_policy(
            ProgressPolicy::permissive()
                .with_clamp(self.clamp_progress)
                .with_monotonic(self.monotonic_progress),
        );
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url);
        }
        config
    }

    /// Logs go to `--log-file` when given. Without it, stderr in plain mode and
    /// nowhere while the full-screen view is up.
    pub fn log_target(&self, full_screen: bool) -> LogTarget {
        match &self.log_file {
            Some(path) => LogTarget::File(path.clone()),
            None if full_screen => LogTarget::Off,
            None => LogTarget::Stderr,
        }
    }

    /// Which command these arguments ask for.
    pub fn into_command(self) -> CliCommand {
        if self.health {
            CliCommand::Health(self)
        } else {
            CliCommand::Analyze(self)
        }
    }
}

/// Parsed command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Health(CliArgs),
    /// Upload a document; `file` is always set
    Analyze(CliArgs),
}

/// Parse command-line arguments, the first being the program name.
///
/// `--help` and `--version` come back as errors of the matching [`clap::error::ErrorKind`];
/// [`clap::Error::exit`] prints them.
///
/// # Examples
///
/// ```
/// use analyst::cli::{parse_args, CliCommand};
///
/// let command = parse_args(["analyst", "--health"]).unwrap();
/// assert!(matches!(command, CliCommand::Health(_)));
/// ```
pub fn parse_args<I, T>(args: I) -> Result<CliCommand, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CliArgs::try_parse_from(args).map(CliArgs::into_command)
}
