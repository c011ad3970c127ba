//! Server startup: build the index, then serve.

use std::sync::Arc;

use anyhow::Context;
use namedex_common::async_runtime::spawn_blocking;
use namedex_index::NameDirectory;
use tracing::info;

use crate::{AppState, ServerConfig, create_router, shutdown::serve_with_shutdown};

/// Builds the index of the configured data file and serves the API until a
/// shutdown signal arrives.
///
/// The listener is only bound once the index is ready; a build failure is
/// returned without serving anything.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    info!(
        environment = %config.environment,
        data_file = %config.data_file.display(),
        port = config.port,
        "starting namedex server"
    );

    let directory = Arc::new(NameDirectory::for_file(
        &config.data_file,
        config.index.clone(),
    ));
    let builder = directory.clone();
    let index = spawn_blocking(move || builder.build())
        .await?
        .with_context(|| format!("failed to index {}", config.data_file.display()))?;
    info!(
        total_records = index.total_records(),
        letters = index.bucket_count(),
        "index ready"
    );

    let addr = config.socket_addr();
    let timeout = config.shutdown_timeout;
    let state = AppState::new(directory, config);
    serve_with_shutdown(create_router(state), addr, timeout).await
}
