//! Layered configuration: defaults < config file < `CHATW_*` env < CLI.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

/// Default remote chat endpoint.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:5000/chat";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Remote chat endpoint URL
    #[arg(long, env = "CHAT_ENDPOINT_URL")]
    pub endpoint: Option<String>,

    /// Show bot replies as escaped text instead of trusted markup
    #[arg(long)]
    pub escape_bot_markup: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub endpoint: EndpointConfig,
    pub widget: WidgetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    pub url: String,
    /// Insert reply markup unsanitized. Only for fully trusted endpoints.
    pub trusted_markup: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub title: String,
    pub idle_timeout_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("endpoint.url", DEFAULT_ENDPOINT_URL)?
            .set_default("endpoint.trusted_markup", true)?
            .set_default("widget.title", "AI Chatbot")?
            .set_default("widget.idle_timeout_secs", 30 * 60)?;

        builder = match &cli.config {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::new("config.yaml", FileFormat::Yaml).required(false)),
        };

        // CHATW_SERVER__PORT=8000, CHATW_ENDPOINT__URL=...
        builder = builder.add_source(
            Environment::with_prefix("CHATW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(endpoint) = cli.endpoint {
            builder = builder.set_override("endpoint.url", endpoint)?;
        }
        if cli.escape_bot_markup {
            builder = builder.set_override("endpoint.trusted_markup", false)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.endpoint_url()?;
        Ok(cfg)
    }

    /// The parsed endpoint URL.
    pub fn endpoint_url(&self) -> Result<Url, config::ConfigError> {
        Url::parse(&self.endpoint.url).map_err(|e| {
            config::ConfigError::Message(format!(
                "invalid endpoint.url {:?}: {e}",
                self.endpoint.url
            ))
        })
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.widget.idle_timeout_secs)
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
