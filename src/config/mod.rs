//! Configuration management for Veles.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::router::{Router, Uplink, UplinkConfig};
use crate::types::SlaThresholds;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Router configuration.
    #[serde(default)]
    pub router: RouterConfig,

    /// SLA thresholds applied by the demo driver.
    #[serde(default)]
    pub sla: SlaThresholds,

    /// Demo driver configuration.
    #[serde(default)]
    pub demo: DemoConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;

        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.router.uplinks.is_empty() {
            return Err(Error::InvalidConfig("no uplinks configured".into()));
        }

        for uplink in &self.router.uplinks {
            uplink.validate()?;
        }
        if let Some(backup) = &self.router.backup {
            backup.validate()?;
        }

        Ok(())
    }

    /// Create the reference demo configuration: three weighted links plus
    /// a backup, the link set exercised by the demonstration sequence.
    pub fn example() -> Self {
        Self {
            router: RouterConfig {
                uplinks: vec![
                    UplinkConfig {
                        id: "internet".into(),
                        latency_ms: 10.0,
                        jitter_ms: 5.0,
                        loss_pct: 1.0,
                        weight: 3.0,
                    },
                    UplinkConfig {
                        id: "mpls".into(),
                        latency_ms: 20.0,
                        jitter_ms: 10.0,
                        loss_pct: 2.0,
                        weight: 2.0,
                    },
                    UplinkConfig {
                        id: "cellular".into(),
                        latency_ms: 30.0,
                        jitter_ms: 15.0,
                        loss_pct: 3.0,
                        weight: 1.0,
                    },
                ],
                backup: Some(UplinkConfig {
                    id: "backup-mpls".into(),
                    latency_ms: 50.0,
                    jitter_ms: 30.0,
                    loss_pct: 5.0,
                    weight: 0.0,
                }),
            },
            ..Default::default()
        }
    }
}

/// Router configuration: the ordered link set plus an optional backup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Uplink configurations, in routing order.
    #[serde(default)]
    pub uplinks: Vec<UplinkConfig>,

    /// Backup uplink configuration.
    pub backup: Option<UplinkConfig>,
}

impl RouterConfig {
    /// Build the router and its uplinks from this configuration.
    ///
    /// Returns the router together with the constructed links so the
    /// caller can drive fail/recover transitions on the shared handles.
    pub fn build(&self) -> Result<(Router, Vec<Arc<Uplink>>, Option<Arc<Uplink>>)> {
        let links = self
            .uplinks
            .iter()
            .map(|cfg| Uplink::new(cfg.clone()).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        let backup = self
            .backup
            .as_ref()
            .map(|cfg| Uplink::new(cfg.clone()).map(Arc::new))
            .transpose()?;

        let router = Router::new(links.clone(), backup.clone())?;
        Ok((router, links, backup))
    }
}

/// Demo driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Sessions to distribute per load-balancing run.
    #[serde(default = "default_sessions")]
    pub sessions: usize,
}

fn default_sessions() -> usize {
    6
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sessions: default_sessions(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text or json).
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Enable colored output.
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}
fn default_color() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            color: default_color(),
        }
    }
}

/// Initialize logging.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        subscriber
            .with(fmt::layer().json())
            .try_init()
            .map_err(|e| Error::Config(format!("Failed to init logging: {e}")))?;
    } else {
        subscriber
            .with(fmt::layer().with_ansi(config.color))
            .try_init()
            .map_err(|e| Error::Config(format!("Failed to init logging: {e}")))?;
    }

    Ok(())
}
