//! Signal-driven shutdown.
//!
//! The bot runs as a systemd service, so it listens for the usual termination signals.
//! A signal requests shutdown through a shared [`Shutdown`] handle and records the signal
//! number, which becomes the process exit status.

use crate::errors::{Error, Result};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Shared quit state: a cancellation token plus the exit code to report.
///
/// Cloning is cheap and every clone observes the same state. Once requested, shutdown is
/// never reset.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
    exit_code: Arc<AtomicI32>,
}

impl Shutdown {
    /// Creates a handle with no shutdown requested and an exit code of 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown with `exit_code`. Only the first request sets the code.
    pub fn request(&self, exit_code: i32) {
        if !self.token.is_cancelled() {
            let _ = self
                .exit_code
                .compare_exchange(0, exit_code, Ordering::SeqCst, Ordering::SeqCst);
        }
        self.token.cancel();
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The recorded exit code, 0 until a signal arrives.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.exit_code.load(Ordering::SeqCst)
    }

    /// The recorded exit code as a process [`ExitCode`].
    ///
    /// Codes outside `0..=255` are reported as a generic failure.
    #[must_use]
    pub fn process_exit_code(&self) -> ExitCode {
        u8::try_from(self.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
    }

    /// Completes once shutdown has been requested.
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }
}

/// Signals that stop the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    /// `SIGHUP`
    Hangup,
    /// `SIGINT`
    Interrupt,
    /// `SIGABRT`
    Abort,
    /// `SIGTERM`
    Terminate,
}

impl TerminationSignal {
    /// Every signal the bot listens for.
    pub const ALL: [Self; 4] = [
        Self::Interrupt,
        Self::Abort,
        Self::Hangup,
        Self::Terminate,
    ];

    /// The POSIX signal number, used as the exit status.
    #[must_use]
    pub const fn number(self) -> i32 {
        match self {
            Self::Hangup => 1,
            Self::Interrupt => 2,
            Self::Abort => 6,
            Self::Terminate => 15,
        }
    }

    /// Human-readable description, as `strsignal` would print it.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Hangup => "Hangup",
            Self::Interrupt => "Interrupt",
            Self::Abort => "Aborted",
            Self::Terminate => "Terminated",
        }
    }

    /// Short name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hangup => "SIGHUP",
            Self::Interrupt => "SIGINT",
            Self::Abort => "SIGABRT",
            Self::Terminate => "SIGTERM",
        }
    }
}

/// Records a received signal: logs it and requests shutdown with its number.
pub fn handle_signal(shutdown: &Shutdown, signal: TerminationSignal) {
    info!("{}", signal.description());
    shutdown.request(signal.number());
}

/// Installs listeners for every [`TerminationSignal`].
///
/// Each listener runs as its own task for the rest of the process lifetime. Must be called
/// from within a tokio runtime.
///
/// # Errors
/// Returns [`Error::Signal`] if a handler cannot be registered.
#[cfg(unix)]
pub fn install(shutdown: &Shutdown) -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    for sig in TerminationSignal::ALL {
        let mut stream =
            signal(SignalKind::from_raw(sig.number())).map_err(|source| Error::Signal {
                signal: sig.name(),
                source,
            })?;
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                handle_signal(&shutdown, sig);
            }
        });
    }
    Ok(())
}

/// Installs a Ctrl-C listener; other termination signals do not exist on this platform.
///
/// # Errors
/// Never fails here; registration errors surface when the listener task first polls.
#[cfg(not(unix))]
pub fn install(shutdown: &Shutdown) -> Result<()> {
    let shutdown = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => handle_signal(&shutdown, TerminationSignal::Interrupt),
            Err(source) => tracing::error!(
                "{}",
                Error::Signal {
                    signal: TerminationSignal::Interrupt.name(),
                    source,
                }
            ),
        }
    });
    Ok(())
}
