//! Configuration file support

use brief_flow::FlowConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for brief
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the intake service
    pub api_url: Option<String>,
    /// Per-request timeout in seconds (no timeout when unset)
    pub timeout_secs: Option<u64>,
    /// Whether to use TUI mode by default
    pub tui: Option<bool>,
    /// Color theme: "dark" or "light"
    pub theme: Option<String>,
    /// Delay before the contact form appears, in milliseconds
    pub contact_reveal_delay_ms: Option<u64>,
    /// How long chat stays disabled after a locally answered message
    pub local_reenable_delay_ms: Option<u64>,
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("brief")
    }

    /// Config file path, `BRIEF_CONFIG_PATH` taking precedence
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("BRIEF_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, falling back to defaults when missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        Self::init_at(&path)?;
        Ok(path)
    }

    pub fn init_at(path: &Path) -> std::io::Result<()> {
        if path.exists() {
            return Ok(());
        }
        let defaults = FlowConfig::default();
        let config = Config {
            api_url: None,
            timeout_secs: None,
            tui: Some(true),
            theme: Some("dark".to_string()),
            contact_reveal_delay_ms: Some(defaults.contact_reveal_delay.as_millis() as u64),
            local_reenable_delay_ms: Some(defaults.local_reenable_delay.as_millis() as u64),
        };
        config.save_to(path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Machine timings, with unset values left at their defaults
    pub fn flow_config(&self) -> FlowConfig {
        let mut flow = FlowConfig::default();
        if let Some(ms) = self.contact_reveal_delay_ms {
            flow.contact_reveal_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.local_reenable_delay_ms {
            flow.local_reenable_delay = Duration::from_millis(ms);
        }
        flow
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# brief configuration file
# Place at ~/.config/brief/config.toml (Linux), ~/Library/Application Support/brief/config.toml (Mac)
# or %APPDATA%\brief\config.toml (Windows), or point BRIEF_CONFIG_PATH at it

# Base URL of the intake service (BRIEF_API_URL and --api-url override this)
# api_url = "http://localhost:8000"

# Per-request timeout in seconds (requests wait indefinitely when unset)
# timeout_secs = 30

# Whether to use TUI mode by default (true by default)
# Set to false for simple stdin/stdout mode
tui = true

# Color theme: "dark" or "light"
theme = "dark"

# Pause before the contact form appears after the estimate (milliseconds)
contact_reveal_delay_ms = 1000

# How long chat stays disabled after a message answered without the service
local_reenable_delay_ms = 500
"#
}
