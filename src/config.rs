use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Directory served under /static (css, js, images).
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
        }
    }
}

fn default_static_dir() -> String {
    "static".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// A bot whose last report is older than this is excluded from active views.
    #[serde(default = "default_active_window_secs")]
    pub active_window_secs: f64,
    /// Max snapshots kept in the in-memory history buffer (FIFO eviction).
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            active_window_secs: default_active_window_secs(),
            history_capacity: default_history_capacity(),
        }
    }
}

fn default_active_window_secs() -> f64 {
    15.0
}

fn default_history_capacity() -> usize {
    100
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.dashboard.static_dir.is_empty(),
            "dashboard.static_dir must be non-empty"
        );
        anyhow::ensure!(
            self.monitoring.active_window_secs > 0.0,
            "monitoring.active_window_secs must be > 0, got {}",
            self.monitoring.active_window_secs
        );
        anyhow::ensure!(
            self.monitoring.history_capacity > 0,
            "monitoring.history_capacity must be > 0, got {}",
            self.monitoring.history_capacity
        );
        Ok(())
    }
}
