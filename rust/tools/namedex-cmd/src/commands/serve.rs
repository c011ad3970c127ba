//! Serve command implementation

use std::{net::IpAddr, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Args;
use namedex_index::IndexConfig;
use namedex_server::ServerConfig;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Names file; relative paths are resolved against ./data
    #[arg(long, env = "DATA_FILE", default_value = ServerConfig::DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = ServerConfig::DEFAULT_PORT)]
    port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Allowed CORS origin
    #[arg(long, env = "CORS_ORIGIN", default_value = "*")]
    cors_origin: String,

    /// Deployment environment; falls back to NODE_ENV, then `development`
    #[arg(long, env = "NAMEDEX_ENV")]
    environment: Option<String>,

    /// Seconds in-flight requests may take to finish on shutdown
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    shutdown_timeout_secs: u64,
}

impl ServeArgs {
    fn into_config(self, index: IndexConfig) -> Result<ServerConfig> {
        let data_dir = std::env::current_dir()
            .context("Failed to get current directory")?
            .join("data");
        let data_file = ServerConfig::resolve_data_file(&self.data_file, &data_dir);
        let environment = self
            .environment
            .or_else(|| std::env::var("NODE_ENV").ok())
            .unwrap_or_else(|| "development".to_string());

        let mut config = ServerConfig::new(data_file);
        config.host = self.host;
        config.port = self.port;
        config.cors_origin = self.cors_origin;
        config.environment = environment;
        config.shutdown_timeout = Duration::from_secs(self.shutdown_timeout_secs);
        config.index = index;
        Ok(config)
    }
}

pub fn run(args: ServeArgs, index: IndexConfig) -> Result<()> {
    let config = args.into_config(index)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(namedex_server::run(config))
}
