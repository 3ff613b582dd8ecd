//! Process configuration: command-line flags with environment fallbacks,
//! plus the provider API key, which is only ever read from the environment.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use clap::Parser;
use finstatements_lib::ServiceConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "FMP_KEY";

/// Log directives used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_DIRECTIVES: &str = "finstatements=info,fmp_api=info,tower_http=debug";

/// Builds the log filter from a `RUST_LOG` value. The defaults only apply
/// when no usable value is given, so user directives are never overridden.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

#[derive(Parser, Debug)]
#[command(name = "finstatements")]
#[command(about = "Serve filtered income statements from Financial Modeling Prep")]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Origins allowed to make credentialed cross-origin requests (comma separated)
    #[arg(
        long = "allowed-origin",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://127.0.0.1,http://localhost,http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Override the provider base URL
    #[arg(long, env = "FMP_BASE_URL")]
    pub fmp_base_url: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("FMP_KEY environment variable is not set")]
    MissingApiKey,
    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),
    #[error("invalid allowed origin '{0}'")]
    InvalidOrigin(String),
}

/// Everything the server needs, resolved once at startup.
#[derive(Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub allowed_origins: Vec<HeaderValue>,
    pub service: ServiceConfig,
}

impl Config {
    /// Resolves the configuration, reading the API key from [`API_KEY_VAR`].
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::build(cli, std::env::var(API_KEY_VAR).ok())
    }

    fn build(cli: &Cli, api_key: Option<String>) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let address = format!("{}:{}", cli.host, cli.port);
        let listen_addr = address
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddress(address.clone()))?;

        let allowed_origins = cli
            .allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut service = ServiceConfig::new(&api_key);
        if let Some(base_url) = &cli.fmp_base_url {
            service = service.with_base_url(base_url);
        }

        Ok(Self {
            listen_addr,
            allowed_origins,
            service,
        })
    }
}
