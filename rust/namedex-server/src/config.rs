use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    time::Duration,
};

use axum::http::{HeaderValue, Method, header};
use namedex_index::IndexConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// Runtime configuration of the HTTP host.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The names file to index.
    pub data_file: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    /// Deployment environment name; `development` exposes internal error
    /// messages in responses.
    pub environment: String,
    /// Allowed CORS origin, `*` for any.
    pub cors_origin: String,
    /// Page size used when the request does not specify a usable one.
    pub default_page_limit: i64,
    /// Largest page size the public endpoint serves; larger requests are clamped.
    pub public_page_limit: i64,
    /// How long in-flight requests may take to finish once shutdown starts.
    pub shutdown_timeout: Duration,
    pub index: IndexConfig,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 3001;
    pub const DEFAULT_DATA_FILE: &'static str = "usernames.txt";
    pub const DEFAULT_PAGE_LIMIT: i64 = 50;
    pub const PUBLIC_PAGE_LIMIT: i64 = 100;

    pub fn new(data_file: impl Into<PathBuf>) -> ServerConfig {
        ServerConfig {
            data_file: data_file.into(),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: Self::DEFAULT_PORT,
            environment: "development".to_string(),
            cors_origin: "*".to_string(),
            default_page_limit: Self::DEFAULT_PAGE_LIMIT,
            public_page_limit: Self::PUBLIC_PAGE_LIMIT,
            shutdown_timeout: Duration::from_secs(10),
            index: IndexConfig::default(),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Resolves a configured data file: absolute paths are kept, relative
    /// ones are looked up in `data_dir`.
    pub fn resolve_data_file(raw: &Path, data_dir: &Path) -> PathBuf {
        if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            data_dir.join(raw)
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let origin = if self.cors_origin == "*" {
            AllowOrigin::any()
        } else {
            match HeaderValue::from_str(&self.cors_origin) {
                Ok(value) => AllowOrigin::exact(value),
                Err(_) => {
                    warn!(origin = %self.cors_origin, "invalid CORS origin, allowing any origin");
                    AllowOrigin::any()
                }
            }
        };
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig::new(Self::DEFAULT_DATA_FILE)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::ServerConfig;

    #[test]
    fn test_resolve_data_file() {
        let data_dir = Path::new("/srv/app/data");
        assert_eq!(
            ServerConfig::resolve_data_file(Path::new("names.txt"), data_dir),
            Path::new("/srv/app/data/names.txt")
        );
        assert_eq!(
            ServerConfig::resolve_data_file(Path::new("/tmp/names.txt"), data_dir),
            Path::new("/tmp/names.txt")
        );
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3001);
        assert!(config.is_development());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3001");
    }
}
