//! Operational log file setup.
//!
//! Events are appended to a single file as `[timestamp] [SEVERITY] message`. Library
//! targets (serenity, poise, ...) keep their target in the line so gateway noise is easy to
//! tell apart from the bot's own events. Only operational events go here, never
//! submitted feedback.

use crate::errors::{Error, Result};
use std::fmt::{self, Write as _};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Severity levels written to the log file.
///
/// Platform levels collapse onto these: trace and debug become `Debug`, warn becomes
/// `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Diagnostic detail
    Debug,
    /// Normal operation
    Info,
    /// Something unexpected that did not stop the bot
    Warning,
    /// A failure
    Error,
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warning,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Whether `target` belongs to this crate rather than a library.
fn is_own_target(target: &str) -> bool {
    target == "feedback_bot"
        || target.starts_with("feedback_bot::")
        || target == "feedbackbot"
        || target.starts_with("feedbackbot::")
}

/// Event format for the log file.
struct SeverityFormat;

impl<S, N> FormatEvent<S, N> for SeverityFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        write!(
            writer,
            "[{}] [{}] ",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            Severity::from(*metadata.level())
        )?;
        if !is_own_target(metadata.target()) {
            write!(writer, "{}: ", metadata.target())?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the global subscriber, appending to `log_file`.
///
/// `RUST_LOG` takes precedence over `default_filter`.
///
/// # Errors
/// Returns [`Error::Logging`] if the file cannot be opened, the filter is invalid, or a
/// global subscriber is already installed.
pub fn init<P: AsRef<Path>>(log_file: P, default_filter: &str) -> Result<()> {
    let path = log_file.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::Logging {
            message: format!("Failed to open log file {path:?}: {e}"),
        })?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|e| Error::Logging {
            message: format!("Invalid log filter {default_filter:?}: {e}"),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .event_format(SeverityFormat)
        .try_init()
        .map_err(|e| Error::Logging {
            message: format!("Failed to install log subscriber: {e}"),
        })
}
