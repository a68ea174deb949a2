//! Shutdown signals

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// The signal that ended the serve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        })
    }
}

async fn wait_for_signal() -> Result<Signal, ShutdownSignalError> {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .map(|()| Signal::Interrupt)
            .map_err(ShutdownSignalError::CtrlC)
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok::<_, ShutdownSignalError>(Signal::Terminate)
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<Signal, ShutdownSignalError>>();

    tokio::select! {
        received = interrupt => received,
        received = terminate => received,
    }
}

/// Stop the server once a signal arrives, draining in-flight requests for up to `grace`.
pub(crate) async fn listen(handle: ServerHandle, grace: Duration) {
    match wait_for_signal().await {
        Ok(signal) => {
            info!(%signal, grace_seconds = grace.as_secs(), "shutting down");

            handle.stop_graceful(Some(grace));
        }
        Err(error) => {
            warn!(%error, "signal handling unavailable; server will only stop when killed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_display_their_conventional_names() {
        assert_eq!(Signal::Interrupt.to_string(), "SIGINT");
        assert_eq!(Signal::Terminate.to_string(), "SIGTERM");
    }
}
