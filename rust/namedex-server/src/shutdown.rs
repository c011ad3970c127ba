//! Graceful shutdown.
//!
//! On SIGINT or SIGTERM the listener stops accepting connections and
//! in-flight requests get a bounded amount of time to finish. Requests still
//! running when the timeout expires are aborted; dropping them cancels their
//! page scans.

use std::{fmt, future::Future, net::SocketAddr, time::Duration};

use tokio::sync::watch;
use tracing::{error, info, warn};

/// Shutdown signal type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// Received SIGINT (Ctrl+C)
    SigInt,
    /// Received SIGTERM
    SigTerm,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SigInt => write!(f, "SIGINT (Ctrl+C)"),
            Self::SigTerm => write!(f, "SIGTERM"),
        }
    }
}

/// Completes when a shutdown signal is received.
pub async fn shutdown_signal() -> ShutdownSignal {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        ShutdownSignal::SigInt
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
        ShutdownSignal::SigTerm
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<ShutdownSignal>();

    tokio::select! {
        signal = ctrl_c => signal,
        signal = terminate => signal,
    }
}

/// Serves `router` on `addr` until a shutdown signal arrives.
pub async fn serve_with_shutdown(
    router: axum::Router,
    addr: SocketAddr,
    timeout: Duration,
) -> anyhow::Result<()> {
    serve_with_custom_shutdown(router, addr, timeout, async {
        let signal = shutdown_signal().await;
        info!("received {signal}, initiating graceful shutdown");
    })
    .await
}

/// Serves `router` on `addr` until `shutdown` completes, then waits at most
/// `timeout` for in-flight requests.
pub async fn serve_with_custom_shutdown<F>(
    router: axum::Router,
    addr: SocketAddr,
    timeout: Duration,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    let (draining_tx, mut draining_rx) = watch::channel(false);
    let graceful = axum::serve(listener, router).with_graceful_shutdown(async move {
        shutdown.await;
        let _ = draining_tx.send(true);
    });
    let mut server = tokio::spawn(async move { graceful.await });

    tokio::select! {
        result = &mut server => {
            result??;
            return Ok(());
        }
        _ = async {
            let _ = draining_rx.wait_for(|draining| *draining).await;
        } => {}
    }

    match tokio::time::timeout(timeout, &mut server).await {
        Ok(result) => {
            result??;
            info!("server shut down gracefully");
        }
        Err(_) => {
            warn!(?timeout, "in-flight requests did not finish in time, forcing shutdown");
            server.abort();
        }
    }
    Ok(())
}
